//! Résumé PDF service: one canonical résumé record rendered through three
//! templates into a single-page PDF, plus the client-side preview workflow
//! that consumes it.

pub mod assets;
pub mod config;
pub mod document;
pub mod errors;
pub mod generation;
pub mod layout;
pub mod models;
pub mod preview;
pub mod routes;
pub mod state;
pub mod templates;
