//! Résumé generation: portrait lookup, template render, PDF assembly.

pub mod handlers;
pub mod pipeline;

pub use pipeline::{download_filename, generate_resume, GeneratedResume, GenerationError};
