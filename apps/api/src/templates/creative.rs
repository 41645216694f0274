//! Creative: coloured sidebar running the full page height.
//!
//! The sidebar holds the portrait, contact details, skills, education,
//! certifications and languages; the main column holds the name block,
//! summary, experience and projects. Achievements are capped at three per
//! role regardless of how much room is left.

use crate::assets::InlineImage;
use crate::document::{Align, Backdrop, Cell, Color, DocumentTree, ImageShape, Node, TextStyle};
use crate::layout::{ContentBudget, FontFamily, PageSpec};
use crate::models::resume::ResumeData;
use crate::templates::common::{contact_items, Theme, CONTACT};

const SIDEBAR: Color = Color(76, 29, 149);
const ON_SIDEBAR: Color = Color(237, 233, 254);
const ACCENT: Color = Color(124, 58, 237);
const INK: Color = Color(31, 41, 55);
const MUTED: Color = Color(107, 114, 128);

const SIDEBAR_WIDTH: f32 = 158.0;
const COLUMN_GAP: f32 = 26.0;
const PORTRAIT: f32 = 104.0;

/// Fixed per-role achievement cap for this variant.
pub const MAX_ACHIEVEMENTS: usize = 3;

pub const BUDGET: ContentBudget = ContentBudget {
    achievements_per_role: MAX_ACHIEVEMENTS,
    outcomes_per_project: 2,
    max_projects: 2,
};

fn main_theme() -> Theme {
    Theme {
        heading: TextStyle::new(FontFamily::HelveticaBold, 13.0, ACCENT),
        heading_rule: None,
        uppercase_headings: false,
        entry_title: TextStyle::new(FontFamily::HelveticaBold, 10.5, INK),
        body: TextStyle::new(FontFamily::Helvetica, 9.0, INK),
        muted: TextStyle::new(FontFamily::Helvetica, 8.5, MUTED),
        marker: "–",
        bullet_indent: 9.0,
        entry_gap: 9.0,
    }
}

fn sidebar_theme() -> Theme {
    let body = TextStyle::new(FontFamily::Helvetica, 8.5, ON_SIDEBAR);
    Theme {
        heading: TextStyle::new(FontFamily::HelveticaBold, 11.0, Color::WHITE),
        heading_rule: Some(ON_SIDEBAR),
        uppercase_headings: true,
        entry_title: TextStyle::new(FontFamily::HelveticaBold, 9.0, Color::WHITE),
        body,
        muted: TextStyle::new(FontFamily::HelveticaOblique, 8.0, ON_SIDEBAR),
        marker: "•",
        bullet_indent: 8.0,
        entry_gap: 6.0,
    }
}

pub fn compose(
    data: &ResumeData,
    image: Option<&InlineImage>,
    budget: &ContentBudget,
    page: &PageSpec,
) -> DocumentTree {
    let main_theme = main_theme();
    let sidebar_theme = sidebar_theme();
    let info = &data.personal_info;

    let budget = ContentBudget {
        achievements_per_role: budget.achievements_per_role.min(MAX_ACHIEVEMENTS),
        ..*budget
    };

    let contact: Vec<Node> = contact_items(info, &data.links)
        .into_iter()
        .map(|item| Node::text(item, sidebar_theme.body))
        .collect();

    let mut sidebar = Vec::new();
    if let Some(image) = image {
        sidebar.push(Node::image(
            image.clone(),
            PORTRAIT,
            ImageShape::Circle,
            Align::Center,
        ));
    }
    sidebar.extend(
        [
            sidebar_theme.section(CONTACT, contact),
            sidebar_theme.competencies(&data.core_competencies),
            sidebar_theme.education(&data.education),
            sidebar_theme.certifications(&data.certifications),
            sidebar_theme.languages(&data.languages),
        ]
        .into_iter()
        .flatten(),
    );

    let name_block = Node::column(
        vec![
            Node::text(
                info.name.as_str(),
                TextStyle::new(FontFamily::HelveticaBold, 28.0, ACCENT).line_height(1.15),
            ),
            Node::text(
                info.title.as_str(),
                TextStyle::new(FontFamily::HelveticaOblique, 13.0, INK),
            ),
        ],
        2.0,
    );

    let mut main = vec![name_block];
    main.extend(
        [
            main_theme.summary(&data.summary),
            main_theme.experience(&data.experience, &budget),
            main_theme.projects(&data.projects, &budget),
        ]
        .into_iter()
        .flatten(),
    );

    DocumentTree {
        title: format!("{} — Résumé", info.name),
        author: info.name.clone(),
        backdrops: vec![Backdrop {
            x: 0.0,
            y: 0.0,
            width: page.margin_pt + SIDEBAR_WIDTH + COLUMN_GAP / 2.0,
            height: page.height_pt,
            color: SIDEBAR,
        }],
        root: Node::row(
            vec![
                Cell::fixed(SIDEBAR_WIDTH, Node::column(sidebar, 14.0)),
                Cell::flex(1.0, Node::column(main, 14.0)),
            ],
            COLUMN_GAP,
        ),
    }
}
