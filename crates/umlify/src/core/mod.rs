//! Core abstractions for class analysis
//!
//! The model types produced by parsing, the configuration passed through
//! the pipeline, the error taxonomy, and the parser and renderer traits.

mod config;
mod error;
pub mod logging;
mod model;
mod parser;
mod renderer;
mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use model::*;
pub use parser::*;
pub use renderer::*;
pub use types::*;
