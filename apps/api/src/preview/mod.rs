//! Client preview/download workflow for generated résumés.
//!
//! Mirrors what a browser front end does with the Generation Endpoint:
//! fetch a template's PDF, hold it behind a revocable blob URL while it is
//! shown, and save it to disk on request.

pub mod blob;
pub mod client;
pub mod download;
pub mod session;

pub use blob::{BlobStore, MemoryBlobStore};
pub use client::{FetchError, HttpResumeFetcher, ResumeFetcher};
pub use download::{download_filename, DirectorySaver, DownloadError, FileSaver};
pub use session::{Completion, FetchTicket, PreviewSession, PreviewState};
