//! # Domain Models
//!
//! Pure data types shared across the workspace, with `serde` as the only
//! dependency. No I/O here.
//!
//! - [`config`]: the pipeline configuration document (`prompts`, `messages`,
//!   `chunking`, `logging`) and its built-in default.
//! - [`settings`]: settings of the `ragcfg` tool (blob root, logging).

pub mod config;
pub mod settings;

pub use config::{Chunking, ChunkingStrategy, Config, Logging, Messages, Prompts};
pub use settings::{BlobCompression, BlobSettings, LogSettings, Settings};
