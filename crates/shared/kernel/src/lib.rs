//! Kernel utilities shared by the binaries.
//! Keep this crate lightweight: layered settings loading on top of the domain types.
//!
//! ## Settings loading
//! ```rust,no_run
//! use ragcfg_kernel::settings::load_settings;
//!
//! let settings = load_settings(Some("ragcfg.toml")).unwrap();
//! println!("blobs live in {}", settings.blob.root.display());
//! ```
pub mod settings;

pub use ragcfg_domain as domain;
pub use settings::{SettingsError, SettingsErrorExt, load, load_settings, load_with_vars};
