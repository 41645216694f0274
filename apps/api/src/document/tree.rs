//! Document tree — the template-independent description of one résumé page.
//!
//! Templates build a `DocumentTree` out of a handful of layout nodes; `flow`
//! positions them and `assemble` serializes the result. The tree carries no
//! coordinates of its own except full-bleed backdrop bands.

use crate::assets::InlineImage;
use crate::layout::FontFamily;

/// RGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);

    /// Channels scaled to the 0.0–1.0 range PDF colour operators expect.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontFamily,
    pub size: f32,
    pub color: Color,
    /// Baseline-to-baseline distance as a multiple of `size`.
    pub line_height: f32,
    pub align: Align,
}

impl TextStyle {
    pub fn new(font: FontFamily, size: f32, color: Color) -> Self {
        Self {
            font,
            size,
            color,
            line_height: 1.3,
            align: Align::Left,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageShape {
    Square,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellWidth {
    /// Exact width in points.
    Fixed(f32),
    /// Share of the width left after fixed cells and gaps.
    Flex(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub width: CellWidth,
    pub node: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Children stacked top to bottom.
    Column { children: Vec<Node>, gap: f32 },
    /// Cells placed left to right; the row is as tall as its tallest cell.
    Row { cells: Vec<Cell>, gap: f32 },
    /// Wrapped paragraph.
    Text { text: String, style: TextStyle },
    /// Wrapped list items, each prefixed with `marker`.
    Bullets {
        items: Vec<String>,
        style: TextStyle,
        marker: String,
        indent: f32,
    },
    /// Square portrait `size` points wide, aligned within the available width.
    Image {
        image: InlineImage,
        size: f32,
        shape: ImageShape,
        align: Align,
    },
    /// Horizontal line across the available width.
    Rule { thickness: f32, color: Color },
    /// Child inset by `padding` on every side, optionally on a filled background.
    Panel {
        child: Box<Node>,
        padding: f32,
        fill: Option<Color>,
    },
    /// Child that occupies at least `height` points vertically.
    MinHeight { child: Box<Node>, height: f32 },
}

impl Node {
    pub fn column(children: Vec<Node>, gap: f32) -> Node {
        Node::Column { children, gap }
    }

    pub fn row(cells: Vec<Cell>, gap: f32) -> Node {
        Node::Row { cells, gap }
    }

    pub fn text(text: impl Into<String>, style: TextStyle) -> Node {
        Node::Text {
            text: text.into(),
            style,
        }
    }

    pub fn bullets(items: Vec<String>, style: TextStyle, marker: &str, indent: f32) -> Node {
        Node::Bullets {
            items,
            style,
            marker: marker.to_string(),
            indent,
        }
    }

    pub fn image(image: InlineImage, size: f32, shape: ImageShape, align: Align) -> Node {
        Node::Image {
            image,
            size,
            shape,
            align,
        }
    }

    pub fn rule(thickness: f32, color: Color) -> Node {
        Node::Rule { thickness, color }
    }

    pub fn panel(child: Node, padding: f32, fill: Option<Color>) -> Node {
        Node::Panel {
            child: Box::new(child),
            padding,
            fill,
        }
    }

    pub fn min_height(child: Node, height: f32) -> Node {
        Node::MinHeight {
            child: Box::new(child),
            height,
        }
    }

    /// True if this node or any descendant draws an image.
    pub fn contains_image(&self) -> bool {
        match self {
            Node::Image { .. } => true,
            Node::Column { children, .. } => children.iter().any(Node::contains_image),
            Node::Row { cells, .. } => cells.iter().any(|c| c.node.contains_image()),
            Node::Panel { child, .. } | Node::MinHeight { child, .. } => child.contains_image(),
            Node::Text { .. } | Node::Bullets { .. } | Node::Rule { .. } => false,
        }
    }
}

impl Cell {
    pub fn fixed(width: f32, node: Node) -> Cell {
        Cell {
            width: CellWidth::Fixed(width),
            node,
        }
    }

    pub fn flex(weight: f32, node: Node) -> Cell {
        Cell {
            width: CellWidth::Flex(weight),
            node,
        }
    }
}

/// Full-bleed rectangle painted behind the content, in page coordinates
/// measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

/// One rendered résumé page, before positioning.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    pub title: String,
    pub author: String,
    pub backdrops: Vec<Backdrop>,
    pub root: Node,
}

impl DocumentTree {
    pub fn has_image(&self) -> bool {
        self.root.contains_image()
    }
}
