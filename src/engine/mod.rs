//! # Generation Engine Module
//!
//! The engine orchestrates one generation run end to end: it invokes the
//! model transformer, loads the configuration's template set, resets the
//! output directory, renders the static actions, creates touch files,
//! emits the license, and fans out over APIs, data-model entities, and
//! operations.
//!
//! ## Run lifecycle
//!
//! ```text
//! raw model ──transform──▶ canonical model
//!                              │
//!   load partials + action templates
//!                              │
//!   reset <outputDir>/<configName>/   (destructive)
//!                              │
//!   declared subdirectories ─▶ static actions ─▶ touch files ─▶ LICENSE
//!                              │
//!   per-API ─▶ per-model ─▶ per-operation fan-out
//! ```
//!
//! Steps are strictly sequential, single pass, no retries: the first error
//! aborts the run and whatever was already written stays on disk. A run
//! owns its output subtree exclusively; callers must not overlap runs that
//! share an output root and configuration name.
//!
//! ## Fan-out
//!
//! Fan-out rules render one file per item of a collection rather than one
//! file per action, and the output *filename* is itself a template rendered
//! against the item's context. Context construction lives in [`fanout`];
//! every context is an independent clone, so no state leaks between
//! iterations.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tplforge::{DefaultTransformer, Engine, FsStorage, GenerationConfig, JinjaRenderer};
//!
//! let engine = Engine::new(
//!     Arc::new(FsStorage),
//!     Box::new(JinjaRenderer::new()),
//!     Box::new(DefaultTransformer),
//! );
//! let config = GenerationConfig::from_file("typescript.yaml".as_ref())?;
//! let summary = engine.generate(&raw_model, &config, "typescript")?;
//! println!("wrote {} files", summary.written.len());
//! ```

mod fanout;
mod run;


pub use fanout::{per_api_contexts, per_model_contexts, per_operation_contexts};
pub use run::{Engine, GenerationSummary};
