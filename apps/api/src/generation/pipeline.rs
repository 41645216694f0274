use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinError;
use tracing::info;

use crate::assets::{AssetStore, InlineImage};
use crate::document::{assemble, AssemblyError};
use crate::models::resume::ResumeData;
use crate::templates::{self, TemplateKey};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("document assembly failed: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("render worker failed: {0}")]
    Worker(#[from] JoinError),
}

/// A finished PDF ready to be sent to the caller.
#[derive(Debug, Clone)]
pub struct GeneratedResume {
    pub template: TemplateKey,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Resolves the portrait, renders `template` and serializes the page.
///
/// The portrait read is async; render and assembly are CPU-bound and run on
/// the blocking pool. A missing or undecodable portrait is not an error; the
/// page is rendered without it.
pub async fn generate_resume(
    data: Arc<ResumeData>,
    assets: &AssetStore,
    template: TemplateKey,
) -> Result<GeneratedResume, GenerationError> {
    let image = assets
        .resolve_inline_image(data.personal_info.image.as_deref())
        .await;

    let worker_data = Arc::clone(&data);
    let bytes =
        tokio::task::spawn_blocking(move || render_pdf(template, &worker_data, image.as_ref()))
            .await??;

    info!(
        template = %template,
        bytes = bytes.len(),
        portrait = data.personal_info.image.is_some(),
        "Generated résumé"
    );

    Ok(GeneratedResume {
        template,
        filename: download_filename(&data.personal_info.name, template),
        bytes,
    })
}

/// Synchronous render + assemble for one template.
pub fn render_pdf(
    template: TemplateKey,
    data: &ResumeData,
    image: Option<&InlineImage>,
) -> Result<Vec<u8>, AssemblyError> {
    let tree = templates::render(template, data, image);
    assemble(&tree)
}

/// `Jane Doe` + classic → `Jane_Doe_classic_resume.pdf`.
///
/// Every run of characters outside ASCII alphanumerics becomes a single `_`
/// so the value is always a valid quoted header parameter.
pub fn download_filename(person: &str, template: TemplateKey) -> String {
    let mut stem = String::with_capacity(person.len());
    for c in person.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c);
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_end_matches('_');
    let stem = if stem.is_empty() { "Resume" } else { stem };
    format!("{stem}_{template}_resume.pdf")
}
