//! Image Resolution — turns a portrait path into an inline image.
//!
//! Resolution never fails loudly: any problem (no path, traversal attempt,
//! missing or unreadable file, bytes that do not decode as an image) yields
//! `None` and the document is rendered without a portrait.

pub mod inline;

use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

pub use inline::{ImageMime, InlineImage, InlineImageError};

/// Read-only view of the public-assets directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads `relative_path` under the assets root and encodes it as a data URI.
    ///
    /// One file-system read per call; nothing is cached.
    pub async fn resolve_inline_image(&self, relative_path: Option<&str>) -> Option<InlineImage> {
        let relative_path = relative_path?.trim();
        let full_path = self.locate(relative_path)?;

        let bytes = match tokio::fs::read(&full_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Portrait {} unavailable: {e}", full_path.display());
                return None;
            }
        };

        // The MIME label comes from the extension; the decoder sniffs the content.
        if let Err(e) = image::load_from_memory(&bytes) {
            warn!("Portrait {} is not a decodable image: {e}", full_path.display());
            return None;
        }

        let mime = ImageMime::from_path(relative_path);
        debug!(
            "Resolved portrait {} ({} bytes, {})",
            full_path.display(),
            bytes.len(),
            mime.as_str()
        );
        Some(InlineImage::from_bytes(mime, &bytes))
    }

    /// Maps a public path (`/images/me.png`) onto the assets root.
    fn locate(&self, relative_path: &str) -> Option<PathBuf> {
        let trimmed = relative_path.trim_start_matches(['/', '\\']);
        if trimmed.is_empty() {
            return None;
        }

        let candidate = Path::new(trimmed);
        let escapes_root = candidate
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            warn!("Rejected portrait path outside assets root: {relative_path}");
            return None;
        }

        Some(self.root.join(candidate))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn encoded(side: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbaImage::from_pixel(side, side, Rgba([40, 90, 160, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img).write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn store_with(files: &[(&str, Vec<u8>)]) -> (tempfile::TempDir, AssetStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, bytes) in files {
            let path = dir.path().join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, bytes).unwrap();
        }
        let store = AssetStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_absent_path_resolves_to_none() {
        let (_dir, store) = store_with(&[]);
        assert!(store.resolve_inline_image(None).await.is_none());
        assert!(store.resolve_inline_image(Some("")).await.is_none());
        assert!(store.resolve_inline_image(Some("/")).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_resolves_to_none() {
        let (_dir, store) = store_with(&[]);
        assert!(store
            .resolve_inline_image(Some("/images/nope.png"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_png_resolves_with_png_mime() {
        let png = encoded(4, ImageFormat::Png);
        let (_dir, store) = store_with(&[("images/me.png", png.clone())]);
        let image = store
            .resolve_inline_image(Some("/images/me.png"))
            .await
            .unwrap();
        assert_eq!(image.mime(), ImageMime::Png);
        assert!(image.data_uri().starts_with("data:image/png;base64,"));
        assert_eq!(image.bytes().unwrap(), png);
    }

    #[tokio::test]
    async fn test_leading_separator_is_optional() {
        let (_dir, store) = store_with(&[("me.png", encoded(2, ImageFormat::Png))]);
        let with = store.resolve_inline_image(Some("/me.png")).await.unwrap();
        let without = store.resolve_inline_image(Some("me.png")).await.unwrap();
        assert_eq!(with, without);
    }

    #[tokio::test]
    async fn test_unknown_extension_defaults_to_jpeg() {
        let (_dir, store) = store_with(&[("me.gif", encoded(2, ImageFormat::Gif))]);
        let image = store.resolve_inline_image(Some("me.gif")).await.unwrap();
        assert_eq!(image.mime(), ImageMime::Jpeg);
    }

    #[tokio::test]
    async fn test_undecodable_file_resolves_to_none() {
        let (_dir, store) = store_with(&[
            ("images/garbage.png", b"\x89PNG garbage".to_vec()),
            ("images/empty.jpg", Vec::new()),
        ]);
        assert!(store
            .resolve_inline_image(Some("/images/garbage.png"))
            .await
            .is_none());
        assert!(store
            .resolve_inline_image(Some("/images/empty.jpg"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_parent_traversal_is_rejected() {
        let (dir, store) = store_with(&[("inner/me.png", encoded(2, ImageFormat::Png))]);
        let nested = AssetStore::new(dir.path().join("inner"));
        assert!(nested
            .resolve_inline_image(Some("../inner/me.png"))
            .await
            .is_none());
        assert!(store.resolve_inline_image(Some("inner/me.png")).await.is_some());
    }

    #[tokio::test]
    async fn test_repeated_calls_reread_the_file() {
        let first_png = encoded(2, ImageFormat::Png);
        let second_png = encoded(3, ImageFormat::Png);
        let (dir, store) = store_with(&[("me.png", first_png.clone())]);
        let first = store.resolve_inline_image(Some("me.png")).await.unwrap();
        std::fs::write(dir.path().join("me.png"), &second_png).unwrap();
        let second = store.resolve_inline_image(Some("me.png")).await.unwrap();
        assert_eq!(first.bytes().unwrap(), first_png);
        assert_eq!(second.bytes().unwrap(), second_png);
    }
}
