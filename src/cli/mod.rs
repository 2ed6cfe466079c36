//! # CLI Module
//!
//! Command-line interface for the tplforge generator binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Run one generation: transform the raw model, then render the
//! configuration's static actions, touch files, license, and fan-out rules
//! into `<outputDir>/<name>/`:
//!
//! ```bash
//! tplforge generate \
//!     --input api.yaml \
//!     --config typescript.yaml \
//!     --name typescript
//! ```
//!
//! Options:
//! - `--input <FILE>` - Raw model document, YAML or JSON (required)
//! - `--config <FILE>` - Generation configuration file (required)
//! - `--name <NAME>` - Configuration name; selects `templates/<NAME>/` and
//!   the output subdirectory (required)
//! - `--templates <DIR>` - Template root (default `./templates`)
//! - `--output <DIR>` - Override the configuration's output root
//! - `--dry-run` - List the files a run would write without touching disk
//!
//! The run is destructive: the contents of `<outputDir>/<name>/` are
//! removed before anything is written.
//!
//! ### `check`
//!
//! Verify that every template the configuration references (partials,
//! static actions, fan-out rules, license body) resolves and loads:
//!
//! ```bash
//! tplforge check --config typescript.yaml --name typescript
//! ```
//!
//! ## Diagnostics
//!
//! `--verbose` raises the tracing filter to debug level; progress events
//! for individual templates and files are emitted when the configuration
//! sets `defaults.verbose`.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
