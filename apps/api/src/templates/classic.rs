//! Classic: single serif column, centred header, ruled section headings.

use crate::assets::InlineImage;
use crate::document::{Align, Color, DocumentTree, ImageShape, Node, TextStyle};
use crate::layout::{ContentBudget, FontFamily, PageSpec};
use crate::models::resume::ResumeData;
use crate::templates::common::{contact_line, Theme};

const INK: Color = Color(20, 20, 20);
const MUTED: Color = Color(85, 85, 85);
const PORTRAIT: f32 = 72.0;

pub const BUDGET: ContentBudget = ContentBudget {
    achievements_per_role: 6,
    outcomes_per_project: 3,
    max_projects: 4,
};

fn theme() -> Theme {
    Theme {
        heading: TextStyle::new(FontFamily::TimesBold, 11.5, INK),
        heading_rule: Some(INK),
        uppercase_headings: true,
        entry_title: TextStyle::new(FontFamily::TimesBold, 10.5, INK),
        body: TextStyle::new(FontFamily::TimesRoman, 10.0, INK),
        muted: TextStyle::new(FontFamily::TimesRoman, 9.5, MUTED),
        marker: "•",
        bullet_indent: 10.0,
        entry_gap: 7.0,
    }
}

pub fn compose(
    data: &ResumeData,
    image: Option<&InlineImage>,
    budget: &ContentBudget,
    _page: &PageSpec,
) -> DocumentTree {
    let theme = theme();
    let info = &data.personal_info;

    let mut header = Vec::new();
    if let Some(image) = image {
        header.push(Node::image(
            image.clone(),
            PORTRAIT,
            ImageShape::Square,
            Align::Center,
        ));
    }
    header.push(Node::text(
        info.name.as_str(),
        TextStyle::new(FontFamily::TimesBold, 22.0, INK).aligned(Align::Center),
    ));
    header.push(Node::text(
        info.title.as_str(),
        TextStyle::new(FontFamily::TimesRoman, 12.0, MUTED).aligned(Align::Center),
    ));
    header.push(Node::text(
        contact_line(info, &data.links),
        TextStyle::new(FontFamily::TimesRoman, 9.5, INK).aligned(Align::Center),
    ));
    header.push(Node::rule(1.25, INK));

    let mut children = vec![Node::column(header, 4.0)];
    children.extend(
        [
            theme.summary(&data.summary),
            theme.experience(&data.experience, budget),
            theme.projects(&data.projects, budget),
            theme.education(&data.education),
            theme.competencies(&data.core_competencies),
            theme.certifications(&data.certifications),
            theme.languages(&data.languages),
        ]
        .into_iter()
        .flatten(),
    );

    DocumentTree {
        title: format!("{} — Résumé", info.name),
        author: info.name.clone(),
        backdrops: Vec::new(),
        root: Node::column(children, 12.0),
    }
}
