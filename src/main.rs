use anyhow::{Context, Result};
use clap::Parser;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use docqa::config::Config;
use docqa::document::Document;
use docqa::embedder::download;
use docqa::embedder::onnx::OnnxEmbedder;
use docqa::generator::ollama::OllamaGenerator;
use docqa::index::VectorIndex;
use docqa::pipeline::{Pipeline, PipelineError};

/// Ask questions about a local text document, answered by a local model.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Source document (overrides the configured source_file)
    #[arg(short, long)]
    file: Option<String>,

    /// Answer a single question and exit instead of starting the prompt
    #[arg(short, long)]
    question: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    if let Some(file) = cli.file {
        config.source_file = file;
    }
    config.validate().context("invalid configuration")?;

    // The corpus must exist before anything else is set up
    let document = Document::load(&config.source_file)?;

    let model_dir = download::default_model_dir();
    download::ensure_model_files(&model_dir)?;
    let embedder = OnnxEmbedder::new(&model_dir)?;

    let index = VectorIndex::open(&config.db_path, config.model.dimensions)?;

    let generator = OllamaGenerator::new(&config.ollama.base_url, &config.ollama.model)?;
    if !generator.is_reachable() {
        warn!(
            "Ollama not reachable at {} — start it with `ollama serve`",
            config.ollama.base_url
        );
    }

    println!("Indexing {}...", document.source);
    let pipeline = Pipeline::build(
        &config,
        &document,
        index,
        Box::new(embedder),
        Box::new(generator),
    )?;
    println!("Indexed {} chunks. Ready.", pipeline.chunk_count()?);

    if let Some(question) = cli.question {
        let answer = pipeline.answer(&question)?;
        println!("{answer}");
        return Ok(());
    }

    run_prompt_loop(&pipeline)
}

/// Interactive read loop. Per-question failures are reported and the
/// loop continues; only EOF, Ctrl-C, or an exit keyword ends it.
fn run_prompt_loop(pipeline: &Pipeline) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("Type 'exit' or 'quit' to stop.");

    loop {
        match rl.readline("\nquery> ") {
            Ok(line) => {
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                    println!("Exiting...");
                    break;
                }
                let _ = rl.add_history_entry(question);

                println!("Thinking...");
                match pipeline.answer(question) {
                    Ok(answer) => {
                        println!("\nAnswer:\n{answer}");
                        println!("{}", "-".repeat(50));
                    }
                    Err(e) => {
                        eprintln!("Error: {e}");
                        if matches!(e, PipelineError::Generator(_)) {
                            eprintln!("Make sure Ollama is running: `ollama serve`");
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Exiting...");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
