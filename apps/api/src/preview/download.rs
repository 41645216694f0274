use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::templates::TemplateKey;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("no preview is ready to download")]
    NotReady,

    #[error("failed to save {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for a downloaded PDF.
pub trait FileSaver {
    /// Persists `bytes` under `filename` and returns where they were written.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError>;
}

/// Writes downloads into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        let path = self.dir.join(filename);
        let io_err = |source| DownloadError::Io {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        std::fs::write(&path, bytes).map_err(io_err)?;
        info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

/// `Jane Doe` + classic → `jane-doe-classic-resume.pdf`.
pub fn download_filename(person: &str, template: TemplateKey) -> String {
    let mut slug = String::with_capacity(person.len());
    for c in person.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "resume" } else { slug };
    format!("{slug}-{template}-resume.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_filename() {
        assert_eq!(
            download_filename("Jane Doe", TemplateKey::Classic),
            "jane-doe-classic-resume.pdf"
        );
        assert_eq!(
            download_filename(" Ana-Maria  O'Neil ", TemplateKey::Creative),
            "ana-maria-o-neil-creative-resume.pdf"
        );
        assert_eq!(
            download_filename("", TemplateKey::Modern),
            "resume-modern-resume.pdf"
        );
    }

    #[test]
    fn test_directory_saver_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let saver = DirectorySaver::new(tmp.path().join("out"));
        let path = saver.save("a.pdf", b"%PDF").unwrap();
        assert_eq!(path, tmp.path().join("out/a.pdf"));
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF");
    }
}
