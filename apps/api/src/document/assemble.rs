//! PDF assembly — serializes a laid-out page with lopdf.
//!
//! Output is byte-for-byte deterministic for a given tree: no creation dates,
//! no document IDs, objects written in id order, images resampled with a
//! fixed filter.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;
use tracing::debug;

use crate::assets::{InlineImage, InlineImageError};
use crate::document::flow::{self, DrawOp, PageLayout};
use crate::document::tree::{Color, DocumentTree, ImageShape};
use crate::layout::{FontFamily, PageSpec};

/// Longest edge of an embedded portrait, in pixels.
const MAX_IMAGE_PX: u32 = 512;
/// Bezier control-point distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.5523;
const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("portrait payload is invalid: {0}")]
    Payload(#[from] InlineImageError),

    #[error("portrait could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Lays out `tree` on an A4 page and returns the finished PDF bytes.
pub fn assemble(tree: &DocumentTree) -> Result<Vec<u8>, AssemblyError> {
    assemble_on(tree, &PageSpec::A4)
}

pub fn assemble_on(tree: &DocumentTree, page: &PageSpec) -> Result<Vec<u8>, AssemblyError> {
    let layout = flow::layout(tree, page);
    render_layout(tree, &layout, page)
}

/// Serializes an already positioned page.
pub fn render_layout(
    tree: &DocumentTree,
    layout: &PageLayout,
    page: &PageSpec,
) -> Result<Vec<u8>, AssemblyError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in FontFamily::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }

    let mut resources = dictionary! { "Font" => fonts };
    if !layout.images.is_empty() {
        let mut xobjects = Dictionary::new();
        for (index, image) in layout.images.iter().enumerate() {
            let image_id = doc.add_object(embed_image(image)?);
            xobjects.set(image_name(index), image_id);
        }
        resources.set("XObject", xobjects);
    }

    let content = Content {
        operations: content_operations(layout, page),
    };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            page.width_pt.into(),
            page.height_pt.into(),
        ],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1_i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(&tree.title),
        "Author" => text_string(&tree.author),
        "Producer" => text_string(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    debug!(
        bytes = buffer.len(),
        images = layout.images.len(),
        ops = layout.ops.len(),
        "Assembled PDF"
    );
    Ok(buffer)
}

// ────────────────────────────────────────────────────────────────────────────
// Content stream
// ────────────────────────────────────────────────────────────────────────────

fn content_operations(layout: &PageLayout, page: &PageSpec) -> Vec<Operation> {
    let top = page.height_pt;
    let mut ops = Vec::new();

    for op in &layout.ops {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(fill_color(*color));
                ops.push(Operation::new(
                    "re",
                    numbers(&[*x, top - y - height, *width, *height]),
                ));
                ops.push(Operation::new("f", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }

            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                thickness,
                color,
            } => {
                let [r, g, b] = color.to_unit();
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("RG", numbers(&[r, g, b])));
                ops.push(Operation::new("w", numbers(&[*thickness])));
                ops.push(Operation::new("m", numbers(&[*x1, top - y1])));
                ops.push(Operation::new("l", numbers(&[*x2, top - y2])));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }

            DrawOp::Text {
                x,
                baseline,
                font,
                size,
                color,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font.resource_name().into(), (*size).into()],
                ));
                ops.push(fill_color(*color));
                ops.push(Operation::new("Td", numbers(&[*x, top - baseline])));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }

            DrawOp::Image {
                x,
                y,
                size,
                shape,
                image,
            } => {
                let bottom = top - y - size;
                ops.push(Operation::new("q", vec![]));
                if *shape == ImageShape::Circle {
                    ops.extend(circle_clip(x + size / 2.0, bottom + size / 2.0, size / 2.0));
                }
                ops.push(Operation::new(
                    "cm",
                    numbers(&[*size, 0.0, 0.0, *size, *x, bottom]),
                ));
                ops.push(Operation::new("Do", vec![image_name(*image).into()]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    ops
}

/// Clipping path for a circle centred on (`cx`, `cy`), built from four bezier arcs.
fn circle_clip(cx: f32, cy: f32, r: f32) -> Vec<Operation> {
    let k = r * KAPPA;
    vec![
        Operation::new("m", numbers(&[cx + r, cy])),
        Operation::new("c", numbers(&[cx + r, cy + k, cx + k, cy + r, cx, cy + r])),
        Operation::new("c", numbers(&[cx - k, cy + r, cx - r, cy + k, cx - r, cy])),
        Operation::new("c", numbers(&[cx - r, cy - k, cx - k, cy - r, cx, cy - r])),
        Operation::new("c", numbers(&[cx + k, cy - r, cx + r, cy - k, cx + r, cy])),
        Operation::new("h", vec![]),
        Operation::new("W", vec![]),
        Operation::new("n", vec![]),
    ]
}

fn fill_color(color: Color) -> Operation {
    let [r, g, b] = color.to_unit();
    Operation::new("rg", numbers(&[r, g, b]))
}

fn numbers(values: &[f32]) -> Vec<Object> {
    values.iter().map(|v| (*v).into()).collect()
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn text_string(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}

/// Maps text onto the WinAnsi code page used by the standard fonts.
///
/// Latin-1 passes through; common typographic punctuation is remapped;
/// anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Images
// ────────────────────────────────────────────────────────────────────────────

/// Decodes the portrait, centre-crops it square and flattens it onto white.
fn embed_image(image: &InlineImage) -> Result<Stream, AssemblyError> {
    let bytes = image.bytes()?;
    let decoded = image::load_from_memory(&bytes)?;

    let (width, height) = decoded.dimensions();
    let side = width.min(height);
    let mut square = decoded.crop_imm((width - side) / 2, (height - side) / 2, side, side);
    if side > MAX_IMAGE_PX {
        square = square.resize_exact(MAX_IMAGE_PX, MAX_IMAGE_PX, FilterType::Triangle);
    }

    let rgba = square.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut canvas = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &rgba, 0, 0);
    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => w as i64,
            "Height" => h as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
        },
        rgb.into_raw(),
    ))
}

#[cfg(test)]
pub(crate) mod inspect {
    //! Helpers for reading generated PDFs back in tests.

    use lopdf::content::Content;
    use lopdf::{Document, Object};

    pub fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    fn operations(bytes: &[u8]) -> Vec<lopdf::content::Operation> {
        let doc = Document::load_mem(bytes).unwrap();
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let raw = doc.get_page_content(page_id).unwrap();
        Content::decode(&raw).unwrap().operations
    }

    /// Every `Tj` string on the first page, decoded as Latin-1 and joined by spaces.
    pub fn page_text(bytes: &[u8]) -> String {
        operations(bytes)
            .into_iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(raw, _)) => Some(raw.iter().map(|&b| b as char).collect()),
                _ => None,
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Number of XObject draw operations on the first page.
    pub fn image_draws(bytes: &[u8]) -> usize {
        operations(bytes)
            .iter()
            .filter(|op| op.operator == "Do")
            .count()
    }
}
