//! Vitals Config
//!
//! Settings structures and file loading for the vitals aggregator.

pub mod loader;
pub mod settings;

pub use loader::load_config;
pub use settings::{LogFormat, LoggingSettings, Settings, SourceSettings, TimeoutSettings};
