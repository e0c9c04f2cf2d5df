//! # docqa — Local document Q&A
//!
//! Retrieval-augmented question answering over a single plain-text
//! document, fully local: the corpus is chunked, embedded with an ONNX
//! sentence-embedding model, indexed in SQLite + sqlite-vec, and questions
//! are answered by a local Ollama model constrained to the retrieved
//! context.
//!
//! ## Architecture
//!
//! - **[`config`]** — Configuration loading, validation, and defaults
//! - **[`document`]** — Wholesale source-document loading
//! - **[`chunker`]** — Sliding-window chunking with overlap
//! - **[`embedder`]** — Text embedding via ONNX Runtime (all-MiniLM-L6-v2)
//! - **[`index`]** — SQLite + sqlite-vec vector index (wholesale rebuild, cosine search)
//! - **[`retriever`]** — Fixed top-k retrieval over the index
//! - **[`composer`]** — Context-constrained prompt assembly
//! - **[`generator`]** — Answer generation via a local Ollama model
//! - **[`pipeline`]** — Build-time and query-time wiring

pub mod chunker;
pub mod composer;
pub mod config;
pub mod document;
pub mod embedder;
pub mod generator;
pub mod index;
pub mod pipeline;
pub mod retriever;
