//! Flow layout — positions a `DocumentTree` on the page as draw operations.
//!
//! Coordinates are in points from the page's top-left corner; `assemble`
//! flips them into PDF user space. Layout is a single top-down pass: every
//! node is placed at a known origin and width and reports the height it used.

use crate::assets::InlineImage;
use crate::document::tree::{Align, CellWidth, Color, DocumentTree, ImageShape, Node, TextStyle};
use crate::layout::font_metrics::{get_metrics, FontFamily};
use crate::layout::page::PageSpec;
use crate::layout::wrap::wrap_text;

/// Baseline offset from the top of a line box, as a fraction of font size.
const ASCENT: f32 = 0.8;
/// Vertical space between two bullet items, as a fraction of font size.
const ITEM_GAP: f32 = 0.25;
/// Space above and below a rule.
const RULE_PADDING: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Color,
    },
    Text {
        x: f32,
        baseline: f32,
        font: FontFamily,
        size: f32,
        color: Color,
        text: String,
    },
    Image {
        x: f32,
        y: f32,
        size: f32,
        shape: ImageShape,
        /// Index into `PageLayout::images`.
        image: usize,
    },
}

/// A fully positioned page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
    pub images: Vec<InlineImage>,
    /// Height the root node used inside the content box.
    pub content_height: f32,
}

/// Lays `tree` out inside the margins of `page`.
pub fn layout(tree: &DocumentTree, page: &PageSpec) -> PageLayout {
    let mut flow = Flow::default();

    for band in &tree.backdrops {
        flow.ops.push(DrawOp::Rect {
            x: band.x,
            y: band.y,
            width: band.width,
            height: band.height,
            color: band.color,
        });
    }

    let content_height = flow.place(
        &tree.root,
        page.margin_pt,
        page.margin_pt,
        page.content_width(),
    );

    PageLayout {
        ops: flow.ops,
        images: flow.images,
        content_height,
    }
}

#[derive(Default)]
struct Flow {
    ops: Vec<DrawOp>,
    images: Vec<InlineImage>,
}

impl Flow {
    /// Places `node` with its top-left corner at (`x`, `y`) and returns the height used.
    fn place(&mut self, node: &Node, x: f32, y: f32, width: f32) -> f32 {
        match node {
            Node::Column { children, gap } => {
                let mut used = 0.0_f32;
                for child in children {
                    let offset = if used > 0.0 { *gap } else { 0.0 };
                    let height = self.place(child, x, y + used + offset, width);
                    if height > 0.0 {
                        used += offset + height;
                    }
                }
                used
            }

            Node::Row { cells, gap } => {
                let fixed: f32 = cells
                    .iter()
                    .filter_map(|c| match c.width {
                        CellWidth::Fixed(w) => Some(w),
                        CellWidth::Flex(_) => None,
                    })
                    .sum();
                let weights: f32 = cells
                    .iter()
                    .filter_map(|c| match c.width {
                        CellWidth::Flex(w) => Some(w),
                        CellWidth::Fixed(_) => None,
                    })
                    .sum();
                let gaps = *gap * cells.len().saturating_sub(1) as f32;
                let flexible = (width - fixed - gaps).max(0.0);

                let mut cursor = x;
                let mut tallest = 0.0_f32;
                for cell in cells {
                    let cell_width = match cell.width {
                        CellWidth::Fixed(w) => w,
                        CellWidth::Flex(w) if weights > 0.0 => flexible * w / weights,
                        CellWidth::Flex(_) => 0.0,
                    };
                    tallest = tallest.max(self.place(&cell.node, cursor, y, cell_width));
                    cursor += cell_width + *gap;
                }
                tallest
            }

            Node::Text { text, style } => self.place_text(text, style, x, y, width),

            Node::Bullets {
                items,
                style,
                marker,
                indent,
            } => {
                let mut used = 0.0_f32;
                for item in items.iter().filter(|i| !i.trim().is_empty()) {
                    if used > 0.0 {
                        used += style.size * ITEM_GAP;
                    }
                    let marker_style = TextStyle {
                        align: Align::Left,
                        ..*style
                    };
                    self.place_text(marker, &marker_style, x, y + used, *indent);
                    used += self.place_text(item, style, x + indent, y + used, width - indent);
                }
                used
            }

            Node::Image {
                image,
                size,
                shape,
                align,
            } => {
                let left = match align {
                    Align::Left => x,
                    Align::Center => x + (width - size) / 2.0,
                    Align::Right => x + width - size,
                };
                self.images.push(image.clone());
                self.ops.push(DrawOp::Image {
                    x: left,
                    y,
                    size: *size,
                    shape: *shape,
                    image: self.images.len() - 1,
                });
                *size
            }

            Node::Rule { thickness, color } => {
                let mid = y + RULE_PADDING + thickness / 2.0;
                self.ops.push(DrawOp::Line {
                    x1: x,
                    y1: mid,
                    x2: x + width,
                    y2: mid,
                    thickness: *thickness,
                    color: *color,
                });
                thickness + 2.0 * RULE_PADDING
            }

            Node::Panel {
                child,
                padding,
                fill,
            } => {
                let background_at = self.ops.len();
                let inner = self.place(child, x + padding, y + padding, width - 2.0 * padding);
                let height = inner + 2.0 * padding;
                if let Some(color) = fill {
                    self.ops.insert(
                        background_at,
                        DrawOp::Rect {
                            x,
                            y,
                            width,
                            height,
                            color: *color,
                        },
                    );
                }
                height
            }

            Node::MinHeight { child, height } => self.place(child, x, y, width).max(*height),
        }
    }

    fn place_text(&mut self, text: &str, style: &TextStyle, x: f32, y: f32, width: f32) -> f32 {
        let metrics = get_metrics(&style.font);
        let lines = wrap_text(text, metrics, style.size, width);
        let advance = style.size * style.line_height;

        for (i, line) in lines.iter().enumerate() {
            let left = match style.align {
                Align::Left => x,
                Align::Center => x + (width - line.width_pt) / 2.0,
                Align::Right => x + width - line.width_pt,
            };
            self.ops.push(DrawOp::Text {
                x: left,
                baseline: y + i as f32 * advance + style.size * ASCENT,
                font: style.font,
                size: style.size,
                color: style.color,
                text: line.text.clone(),
            });
        }

        lines.len() as f32 * advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageMime, InlineImage};
    use crate::document::tree::{Backdrop, Cell};

    fn style() -> TextStyle {
        TextStyle::new(FontFamily::Helvetica, 10.0, Color::BLACK)
    }

    fn tree(root: Node) -> DocumentTree {
        DocumentTree {
            title: "t".to_string(),
            author: "a".to_string(),
            backdrops: vec![],
            root,
        }
    }

    fn texts(layout: &PageLayout) -> Vec<&str> {
        layout
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_text_starts_inside_margins() {
        let page = PageSpec::A4;
        let out = layout(&tree(Node::text("Hello", style())), &page);
        match &out.ops[0] {
            DrawOp::Text { x, baseline, .. } => {
                assert_eq!(*x, page.margin_pt);
                assert!(*baseline > page.margin_pt);
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert!((out.content_height - 13.0).abs() < 1e-3);
    }

    #[test]
    fn test_column_preserves_child_order() {
        let root = Node::column(
            vec![
                Node::text("first", style()),
                Node::text("second", style()),
                Node::text("third", style()),
            ],
            4.0,
        );
        let out = layout(&tree(root), &PageSpec::A4);
        assert_eq!(texts(&out), vec!["first", "second", "third"]);
        assert!((out.content_height - (3.0 * 13.0 + 2.0 * 4.0)).abs() < 1e-3);
    }

    #[test]
    fn test_empty_children_take_no_gap() {
        let root = Node::column(
            vec![
                Node::text("", style()),
                Node::text("only", style()),
                Node::column(vec![], 0.0),
            ],
            10.0,
        );
        let out = layout(&tree(root), &PageSpec::A4);
        assert!((out.content_height - 13.0).abs() < 1e-3);
    }

    #[test]
    fn test_row_splits_flex_width() {
        let root = Node::row(
            vec![
                Cell::fixed(100.0, Node::text("left", style())),
                Cell::flex(1.0, Node::text("right", style())),
            ],
            20.0,
        );
        let page = PageSpec::A4;
        let out = layout(&tree(root), &page);
        let xs: Vec<f32> = out
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, .. } => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![page.margin_pt, page.margin_pt + 120.0]);
    }

    #[test]
    fn test_bullets_emit_marker_and_item() {
        let root = Node::bullets(
            vec!["one".to_string(), "  ".to_string(), "two".to_string()],
            style(),
            "-",
            8.0,
        );
        let out = layout(&tree(root), &PageSpec::A4);
        assert_eq!(texts(&out), vec!["-", "one", "-", "two"]);
    }

    #[test]
    fn test_panel_background_is_drawn_first() {
        let root = Node::panel(Node::text("inside", style()), 5.0, Some(Color(1, 2, 3)));
        let out = layout(&tree(root), &PageSpec::A4);
        match &out.ops[0] {
            DrawOp::Rect { height, color, .. } => {
                assert!((*height - 23.0).abs() < 1e-3);
                assert_eq!(*color, Color(1, 2, 3));
            }
            other => panic!("expected rect, got {other:?}"),
        }
        assert!(matches!(out.ops[1], DrawOp::Text { .. }));
    }

    #[test]
    fn test_min_height_reserves_space() {
        let root = Node::column(
            vec![
                Node::min_height(Node::text("head", style()), 80.0),
                Node::text("body", style()),
            ],
            0.0,
        );
        let out = layout(&tree(root), &PageSpec::A4);
        assert!((out.content_height - 93.0).abs() < 1e-3);
    }

    #[test]
    fn test_backdrops_precede_content() {
        let mut doc = tree(Node::text("x", style()));
        doc.backdrops.push(Backdrop {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            color: Color::WHITE,
        });
        let out = layout(&doc, &PageSpec::A4);
        assert!(matches!(out.ops[0], DrawOp::Rect { .. }));
    }

    #[test]
    fn test_image_is_registered_and_aligned() {
        let image = InlineImage::from_bytes(ImageMime::Png, b"x");
        let root = Node::image(image.clone(), 50.0, ImageShape::Circle, Align::Right);
        let page = PageSpec::A4;
        let out = layout(&tree(root), &page);
        assert_eq!(out.images, vec![image]);
        match &out.ops[0] {
            DrawOp::Image { x, size, image, .. } => {
                assert!((*x - (page.width_pt - page.margin_pt - 50.0)).abs() < 1e-3);
                assert_eq!(*size, 50.0);
                assert_eq!(*image, 0);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_centered_text_is_offset() {
        let page = PageSpec::A4;
        let out = layout(
            &tree(Node::text("Hi", style().aligned(Align::Center))),
            &page,
        );
        match &out.ops[0] {
            DrawOp::Text { x, .. } => assert!(*x > page.margin_pt + 200.0),
            other => panic!("expected text, got {other:?}"),
        }
    }
}
