/// Configuration, errors, and shared vocabulary for glyphgrid.
///
/// This crate contains the types every other workspace member agrees on:
/// the rounding policy, the error taxonomy, charset presets, and the
/// TOML-backed engine configuration.
pub mod charset;
pub mod config;
pub mod error;
pub mod rounding;

pub use config::{EngineConfig, OutputTarget};
pub use error::{EngineError, MatchError, SpecError};
pub use rounding::RoundMethod;
