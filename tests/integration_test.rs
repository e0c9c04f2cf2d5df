/// End-to-end tests for the docqa pipeline:
///   Document → Chunker → Embedder → VectorIndex → Retriever → Composer → Generator
///
/// The mock embedder maps equal texts to equal vectors, so a question
/// whose text matches a chunk retrieves that chunk at distance zero; the
/// echo generator returns the composed prompt so its contents can be
/// asserted on.
use std::fs;

use docqa::composer::REFUSAL;
use docqa::config::Config;
use docqa::document::Document;
use docqa::embedder::Embedder;
use docqa::embedder::mock::MockEmbedder;
use docqa::generator::mock::{FailingGenerator, MockGenerator};
use docqa::index::VectorIndex;
use docqa::index::search::SearchError;
use docqa::pipeline::{Pipeline, PipelineError};
use tempfile::tempdir;

fn test_config(chunk_size: usize, chunk_overlap: usize, top_k: usize) -> Config {
    Config {
        chunk_size,
        chunk_overlap,
        top_k,
        ..Config::default()
    }
}

fn load_fixture(text: &str) -> (tempfile::TempDir, Document) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("speech.txt");
    fs::write(&path, text).unwrap();
    let document = Document::load(&path).unwrap();
    (dir, document)
}

/// The small-document scenario: "A. B. C." at chunk_size=4 / overlap=1
/// yields three covering chunks; a question matching chunk "B. C" with
/// k=1 retrieves exactly that chunk, and the composed prompt carries the
/// chunk text and the literal question.
#[test]
fn test_full_pipeline_retrieves_matching_chunk_into_prompt() {
    let (_dir, document) = load_fixture("A. B. C.");
    let config = test_config(4, 1, 1);

    let embedder = MockEmbedder::default();
    let index = VectorIndex::open_in_memory(embedder.dimensions()).unwrap();

    let pipeline = Pipeline::build(
        &config,
        &document,
        index,
        Box::new(embedder),
        Box::new(MockGenerator::echo()),
    )
    .unwrap();
    assert_eq!(
        pipeline.chunk_count().unwrap(),
        3,
        "8 chars at size 4 / overlap 1 should produce 3 chunks"
    );

    let question = "B. C";
    let prompt = pipeline.answer(question).unwrap();

    assert!(
        prompt.contains("CONTEXT:\nB. C\n"),
        "top-1 context must be exactly the matching chunk, got:\n{prompt}"
    );
    assert!(
        prompt.contains("QUESTION: B. C"),
        "prompt must carry the literal question, got:\n{prompt}"
    );
}

/// When the model refuses, the refusal string reaches the caller
/// verbatim — nothing rewrites or wraps the generated answer.
#[test]
fn test_refusal_surfaces_verbatim() {
    let (_dir, document) = load_fixture("Nothing about the moon in here.");
    let config = test_config(100, 10, 3);

    let embedder = MockEmbedder::default();
    let index = VectorIndex::open_in_memory(embedder.dimensions()).unwrap();

    let pipeline = Pipeline::build(
        &config,
        &document,
        index,
        Box::new(embedder),
        Box::new(MockGenerator::canned(REFUSAL)),
    )
    .unwrap();

    let answer = pipeline.answer("What is the moon made of?").unwrap();
    assert_eq!(answer, REFUSAL);
}

/// An empty corpus still builds (one empty chunk) and answers end to end
/// with the refusal.
#[test]
fn test_empty_corpus_round_trip() {
    let (_dir, document) = load_fixture("");
    let config = test_config(1000, 200, 3);

    let embedder = MockEmbedder::default();
    let index = VectorIndex::open_in_memory(embedder.dimensions()).unwrap();

    let pipeline = Pipeline::build(
        &config,
        &document,
        index,
        Box::new(embedder),
        Box::new(MockGenerator::canned(REFUSAL)),
    )
    .unwrap();

    assert_eq!(pipeline.chunk_count().unwrap(), 1);
    assert_eq!(pipeline.answer("anything").unwrap(), REFUSAL);
}

/// Two pipelines built from the same document and config answer the same
/// question with identical prompts.
#[test]
fn test_rebuild_is_idempotent() {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
    let (_dir, document) = load_fixture(&text);
    let config = test_config(50, 10, 3);

    let build = || {
        let embedder = MockEmbedder::default();
        let index = VectorIndex::open_in_memory(embedder.dimensions()).unwrap();
        Pipeline::build(
            &config,
            &document,
            index,
            Box::new(embedder),
            Box::new(MockGenerator::echo()),
        )
        .unwrap()
    };

    let first = build();
    let second = build();
    let question = "What does the fox do?";
    assert_eq!(
        first.answer(question).unwrap(),
        second.answer(question).unwrap()
    );
}

/// A top_k beyond the index size clamps to the index size: every chunk
/// lands in the context.
#[test]
fn test_top_k_clamped_to_index_size() {
    let (_dir, document) = load_fixture("abcdefgh");
    let config = test_config(4, 0, 50);

    let embedder = MockEmbedder::default();
    let index = VectorIndex::open_in_memory(embedder.dimensions()).unwrap();

    let pipeline = Pipeline::build(
        &config,
        &document,
        index,
        Box::new(embedder),
        Box::new(MockGenerator::echo()),
    )
    .unwrap();
    assert_eq!(pipeline.chunk_count().unwrap(), 2);

    let prompt = pipeline.answer("q").unwrap();
    assert!(prompt.contains("abcd"));
    assert!(prompt.contains("efgh"));
}

/// Query-time generation failures surface as errors without poisoning
/// the pipeline — the caller can keep asking.
#[test]
fn test_generation_failure_is_recoverable() {
    let (_dir, document) = load_fixture("Some corpus text.");
    let config = test_config(100, 10, 3);

    let embedder = MockEmbedder::default();
    let index = VectorIndex::open_in_memory(embedder.dimensions()).unwrap();

    let pipeline = Pipeline::build(
        &config,
        &document,
        index,
        Box::new(embedder),
        Box::new(FailingGenerator),
    )
    .unwrap();

    for _ in 0..3 {
        let err = pipeline.answer("a question").unwrap_err();
        assert!(matches!(err, PipelineError::Generator(_)));
    }
}

/// Querying an index that was never built is a programming error, not a
/// silent empty result.
#[test]
fn test_query_before_build_is_empty_index() {
    let index = VectorIndex::open_in_memory(8).unwrap();
    let err = index.query(&[0.0; 8], 3).unwrap_err();
    assert!(matches!(err, SearchError::EmptyIndex));
}

/// The on-disk index survives a reopen; the next run rebuilds it
/// wholesale, replacing the prior contents.
#[test]
fn test_on_disk_index_persists_and_rebuilds() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("vectors.db");
    let corpus_path = dir.path().join("speech.txt");
    fs::write(&corpus_path, "First version of the corpus.").unwrap();
    let document = Document::load(&corpus_path).unwrap();

    let config = test_config(100, 10, 3);
    let embedder = MockEmbedder::default();
    let dims = embedder.dimensions();

    {
        let index = VectorIndex::open(&db_path, dims).unwrap();
        let pipeline = Pipeline::build(
            &config,
            &document,
            index,
            Box::new(MockEmbedder::default()),
            Box::new(MockGenerator::echo()),
        )
        .unwrap();
        assert_eq!(pipeline.chunk_count().unwrap(), 1);
    }

    // reopened index still holds the entries from the prior run
    let reopened = VectorIndex::open(&db_path, dims).unwrap();
    assert_eq!(reopened.len().unwrap(), 1);
    let query = embedder.embed("First version of the corpus.").unwrap();
    let results = reopened.query(&query, 1).unwrap();
    assert_eq!(results[0].content, "First version of the corpus.");

    // a new build replaces the contents wholesale
    fs::write(&corpus_path, "Second version, now with more text than before.").unwrap();
    let updated = Document::load(&corpus_path).unwrap();
    let pipeline = Pipeline::build(
        &config,
        &updated,
        reopened,
        Box::new(MockEmbedder::default()),
        Box::new(MockGenerator::echo()),
    )
    .unwrap();

    let prompt = pipeline.answer("q").unwrap();
    assert!(prompt.contains("Second version"));
    assert!(!prompt.contains("First version"));
}
