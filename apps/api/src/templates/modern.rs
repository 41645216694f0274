//! Modern: dark full-width header band, two-column body.
//!
//! Main column carries summary, experience and projects; the narrower side
//! column carries skills, education, certifications and languages.

use crate::assets::InlineImage;
use crate::document::{Align, Backdrop, Cell, Color, DocumentTree, ImageShape, Node, TextStyle};
use crate::layout::{ContentBudget, FontFamily, PageSpec};
use crate::models::resume::ResumeData;
use crate::templates::common::{contact_line, Theme};

const BAND: Color = Color(30, 41, 59);
const ACCENT: Color = Color(37, 99, 235);
const INK: Color = Color(17, 24, 39);
const MUTED: Color = Color(75, 85, 99);
const ON_BAND: Color = Color(226, 232, 240);
const SIDE_PANEL: Color = Color(241, 245, 249);

/// Bottom edge of the header band, from the top of the page.
const BAND_HEIGHT: f32 = 138.0;
const PORTRAIT: f32 = 84.0;

pub const BUDGET: ContentBudget = ContentBudget {
    achievements_per_role: 4,
    outcomes_per_project: 3,
    max_projects: 3,
};

fn theme() -> Theme {
    Theme {
        heading: TextStyle::new(FontFamily::HelveticaBold, 12.0, ACCENT),
        heading_rule: Some(ACCENT),
        uppercase_headings: true,
        entry_title: TextStyle::new(FontFamily::HelveticaBold, 10.0, INK),
        body: TextStyle::new(FontFamily::Helvetica, 9.0, INK),
        muted: TextStyle::new(FontFamily::HelveticaOblique, 8.5, MUTED),
        marker: "•",
        bullet_indent: 9.0,
        entry_gap: 8.0,
    }
}

pub fn compose(
    data: &ResumeData,
    image: Option<&InlineImage>,
    budget: &ContentBudget,
    page: &PageSpec,
) -> DocumentTree {
    let theme = theme();
    let info = &data.personal_info;

    let identity = Node::column(
        vec![
            Node::text(
                info.name.as_str(),
                TextStyle::new(FontFamily::HelveticaBold, 26.0, Color::WHITE),
            ),
            Node::text(
                info.title.as_str(),
                TextStyle::new(FontFamily::Helvetica, 13.0, ON_BAND),
            ),
            Node::text(
                contact_line(info, &data.links),
                TextStyle::new(FontFamily::Helvetica, 8.5, ON_BAND),
            ),
        ],
        5.0,
    );

    let mut header_cells = vec![Cell::flex(1.0, identity)];
    if let Some(image) = image {
        header_cells.push(Cell::fixed(
            PORTRAIT,
            Node::image(image.clone(), PORTRAIT, ImageShape::Circle, Align::Right),
        ));
    }
    let header = Node::min_height(
        Node::row(header_cells, 16.0),
        BAND_HEIGHT - page.margin_pt,
    );

    let main: Vec<Node> = [
        theme.summary(&data.summary),
        theme.experience(&data.experience, budget),
        theme.projects(&data.projects, budget),
    ]
    .into_iter()
    .flatten()
    .collect();

    let side: Vec<Node> = [
        theme.competencies(&data.core_competencies),
        theme.education(&data.education),
        theme.certifications(&data.certifications),
        theme.languages(&data.languages),
    ]
    .into_iter()
    .flatten()
    .collect();

    let body = Node::row(
        vec![
            Cell::flex(2.0, Node::column(main, 14.0)),
            Cell::flex(
                1.0,
                Node::panel(Node::column(side, 14.0), 10.0, Some(SIDE_PANEL)),
            ),
        ],
        20.0,
    );

    DocumentTree {
        title: format!("{} — Résumé", info.name),
        author: info.name.clone(),
        backdrops: vec![Backdrop {
            x: 0.0,
            y: 0.0,
            width: page.width_pt,
            height: BAND_HEIGHT,
            color: BAND,
        }],
        root: Node::column(vec![header, body], 18.0),
    }
}
