//! Self-describing inline images (base64 data URIs).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMime {
    Png,
    Webp,
    Jpeg,
}

impl ImageMime {
    /// Infers the MIME type from a file extension. Unknown extensions are treated as JPEG.
    pub fn from_path(path: &str) -> Self {
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => ImageMime::Png,
            "webp" => ImageMime::Webp,
            _ => ImageMime::Jpeg,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Webp => "image/webp",
            ImageMime::Jpeg => "image/jpeg",
        }
    }

    fn parse(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageMime::Png),
            "image/webp" => Some(ImageMime::Webp),
            "image/jpeg" | "image/jpg" => Some(ImageMime::Jpeg),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum InlineImageError {
    #[error("not a base64 data URI")]
    NotDataUri,

    #[error("unsupported image MIME type: {0}")]
    UnsupportedMime(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// An image carried entirely inside a `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    mime: ImageMime,
    data_uri: String,
}

impl InlineImage {
    pub fn from_bytes(mime: ImageMime, bytes: &[u8]) -> Self {
        let data_uri = format!("data:{};base64,{}", mime.as_str(), BASE64.encode(bytes));
        Self { mime, data_uri }
    }

    pub fn parse(data_uri: &str) -> Result<Self, InlineImageError> {
        let (mime, _) = split_data_uri(data_uri)?;
        Ok(Self {
            mime,
            data_uri: data_uri.to_string(),
        })
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Decodes the base64 payload back into raw file bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, InlineImageError> {
        let (_, payload) = split_data_uri(&self.data_uri)?;
        Ok(BASE64.decode(payload)?)
    }
}

fn split_data_uri(uri: &str) -> Result<(ImageMime, &str), InlineImageError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or(InlineImageError::NotDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(InlineImageError::NotDataUri)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(InlineImageError::NotDataUri)?;
    let mime =
        ImageMime::parse(mime).ok_or_else(|| InlineImageError::UnsupportedMime(mime.to_string()))?;
    Ok((mime, payload))
}
