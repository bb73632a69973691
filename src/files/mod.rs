// Filesystem module.
// Locates the config, log, and export files and writes them atomically.

pub mod paths;
pub mod store;

pub use paths::{config_path, default_export_dir, export_path, log_dir};
pub use store::{read_json, read_text, write_json, write_text};
