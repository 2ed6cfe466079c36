//! # tplforge
//!
//! **tplforge** is a model-driven, multi-file code and document generator:
//! given a parsed source description (a raw API/schema document) and a named
//! output configuration, it renders a directory tree of files by combining a
//! transformed data model with a set of logic-less templates.
//!
//! ## Overview
//!
//! A configuration declares static actions (one template, one output file),
//! directories and touch files to pre-create, a license switch, and three
//! fan-out dimensions that render one file per API, per data-model entity,
//! or per operation. The engine runs them in a single, strictly sequential
//! pass over a pluggable storage backend.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`storage`]** - Storage backends behind the [`Storage`] trait
//!   (filesystem, in-memory, dry-run recording)
//! - **[`templates`]** - Template set resolution and loading
//! - **[`config`]** - Generation run declarations (YAML/JSON)
//! - **[`render`]** - Logic-less rendering with named partials ([`Renderer`])
//! - **[`transform`]** - The model transformer seam ([`ModelTransformer`])
//! - **[`engine`]** - The generation engine and fan-out planner
//! - **[`cli`]** - The `tplforge` command-line binary
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI (tplforge)
//!     participant Transform as ModelTransformer
//!     participant Store as TemplateStore
//!     participant Engine as Engine
//!     participant Storage as Storage backend
//!
//!     CLI->>Engine: generate(raw, config, name)
//!     Engine->>Transform: transform(raw, defaults + configName)
//!     Transform-->>Engine: canonical model
//!     Engine->>Store: load partials + action templates
//!     Store->>Storage: read templates/<name>/*
//!     Engine->>Storage: reset out/<name>/ (ensure + remove contents)
//!     Engine->>Storage: create declared subdirectories
//!     Engine->>Storage: write static actions
//!     Engine->>Storage: create missing touch files
//!     Engine->>Storage: write LICENSE
//!     loop per rule x item (API / entity / operation)
//!         Engine->>Engine: build overlay context
//!         Engine->>Store: load rule template
//!         Engine->>Storage: write rendered file
//!     end
//!     Engine-->>CLI: GenerationSummary
//! ```
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
//! let config = GenerationConfig::from_file("configs/typescript.yaml".as_ref())?;
//! let summary = engine.generate(&raw_model, &config, "typescript")?;
//! ```
//!
//! ## Guarantees and non-guarantees
//!
//! - Every output path is under `<outputDir>/<configName>/`; the engine
//!   reads only under the template root and writes only under that subtree.
//! - The output directory is reset destructively at the start of each run.
//! - Touch files never overwrite existing content.
//! - No atomicity across a run: the first error aborts, already-written
//!   output stays, and the caller sees exactly one `Result`.
//! - One run per (output root, configuration name) at a time; overlap
//!   prevention is the caller's responsibility.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod storage;
pub mod templates;
pub mod transform;

pub use config::{Action, FanoutRule, GenerationConfig};
pub use engine::{Engine, GenerationSummary};
pub use error::Error;
pub use render::{JinjaRenderer, Renderer};
pub use storage::{FsStorage, MemStorage, RecordingStorage, Storage};
pub use templates::TemplateStore;
pub use transform::{DefaultTransformer, ModelTransformer};
