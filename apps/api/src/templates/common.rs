//! Section builders shared by every template.
//!
//! Each builder returns `None` when its backing data is empty so a template
//! never emits a heading with nothing under it.

use crate::document::{Align, Cell, Color, Node, TextStyle};
use crate::layout::{get_metrics, ContentBudget};
use crate::models::resume::{
    Certification, Competencies, EducationEntry, ExperienceEntry, Language, Link, PersonalInfo,
    ProjectEntry,
};

pub const SUMMARY: &str = "Summary";
pub const EXPERIENCE: &str = "Experience";
pub const PROJECTS: &str = "Projects";
pub const EDUCATION: &str = "Education";
pub const SKILLS: &str = "Skills";
pub const CERTIFICATIONS: &str = "Certifications";
pub const LANGUAGES: &str = "Languages";
pub const CONTACT: &str = "Contact";

const CONTACT_SEPARATOR: &str = "  |  ";

/// Typography and spacing a template applies to its sections.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub heading: TextStyle,
    /// Rule drawn under each heading.
    pub heading_rule: Option<Color>,
    pub uppercase_headings: bool,
    /// Role, project and degree lines.
    pub entry_title: TextStyle,
    pub body: TextStyle,
    /// Dates, places and other secondary lines.
    pub muted: TextStyle,
    pub marker: &'static str,
    pub bullet_indent: f32,
    pub entry_gap: f32,
}

impl Theme {
    /// Heading followed by `body`; `None` if `body` is empty.
    pub fn section(&self, heading: &str, body: Vec<Node>) -> Option<Node> {
        if body.is_empty() {
            return None;
        }
        let label = if self.uppercase_headings {
            heading.to_uppercase()
        } else {
            heading.to_string()
        };

        let mut children = vec![Node::text(label, self.heading)];
        if let Some(color) = self.heading_rule {
            children.push(Node::rule(0.75, color));
        }
        children.push(Node::column(body, self.entry_gap));
        Some(Node::column(children, 4.0))
    }

    pub fn summary(&self, summary: &str) -> Option<Node> {
        let summary = summary.trim();
        if summary.is_empty() {
            return None;
        }
        self.section(SUMMARY, vec![Node::text(summary, self.body)])
    }

    /// Roles in source order with at most `budget.achievements_per_role` bullets each.
    pub fn experience(&self, entries: &[ExperienceEntry], budget: &ContentBudget) -> Option<Node> {
        let body = entries
            .iter()
            .map(|entry| {
                let mut place = vec![entry.company.clone()];
                place.extend(entry.location.clone());

                let mut parts = vec![
                    self.title_with_period(&entry.role, &entry.period()),
                    Node::text(join_present(&place, " · "), self.muted),
                    self.bullets(&entry.achievements, budget.achievements_per_role),
                ];
                if !entry.technologies.is_empty() {
                    parts.push(Node::text(
                        format!("Tech: {}", entry.technologies.join(", ")),
                        self.muted,
                    ));
                }
                Node::column(parts, 2.0)
            })
            .collect();
        self.section(EXPERIENCE, body)
    }

    pub fn projects(&self, projects: &[ProjectEntry], budget: &ContentBudget) -> Option<Node> {
        let body = projects
            .iter()
            .take(budget.max_projects)
            .map(|project| {
                let mut parts = vec![
                    Node::text(project.name.as_str(), self.entry_title),
                    Node::text(project.description.as_str(), self.body),
                    self.bullets(&project.outcomes, budget.outcomes_per_project),
                ];
                if !project.tech.is_empty() {
                    parts.push(Node::text(
                        format!("Tech: {}", project.tech.join(", ")),
                        self.muted,
                    ));
                }
                if !project.links.is_empty() {
                    parts.push(Node::text(link_line(&project.links), self.muted));
                }
                Node::column(parts, 2.0)
            })
            .collect();
        self.section(PROJECTS, body)
    }

    pub fn education(&self, entries: &[EducationEntry]) -> Option<Node> {
        let body = entries
            .iter()
            .map(|entry| {
                let mut place = vec![entry.institution.clone()];
                place.extend(entry.location.clone());
                Node::column(
                    vec![
                        Node::text(entry.degree.as_str(), self.entry_title),
                        Node::text(join_present(&place, " · "), self.muted),
                        self.bullets(&entry.details, usize::MAX),
                    ],
                    2.0,
                )
            })
            .collect();
        self.section(EDUCATION, body)
    }

    /// One label line and one comma-separated line per group.
    pub fn competencies(&self, competencies: &Competencies) -> Option<Node> {
        let body = competencies
            .groups()
            .map(|(label, items)| {
                Node::column(
                    vec![
                        Node::text(humanize_key(label), self.entry_title),
                        Node::text(items.join(", "), self.body),
                    ],
                    1.0,
                )
            })
            .collect();
        self.section(SKILLS, body)
    }

    pub fn certifications(&self, certifications: &[Certification]) -> Option<Node> {
        let body = certifications
            .iter()
            .map(|cert| {
                let mut detail = Vec::new();
                detail.extend(cert.issuer.clone());
                detail.extend(cert.date.as_deref().map(crate::models::resume::format_month));
                let mut parts = vec![Node::text(cert.name.as_str(), self.body)];
                if !detail.is_empty() {
                    parts.push(Node::text(join_present(&detail, " · "), self.muted));
                }
                Node::column(parts, 1.0)
            })
            .collect();
        self.section(CERTIFICATIONS, body)
    }

    pub fn languages(&self, languages: &[Language]) -> Option<Node> {
        let body = languages
            .iter()
            .map(|language| match &language.proficiency {
                Some(level) => Node::text(format!("{} — {}", language.name, level), self.body),
                None => Node::text(language.name.as_str(), self.body),
            })
            .collect();
        self.section(LANGUAGES, body)
    }

    /// Bold title on the left, period right-aligned on the same line.
    fn title_with_period(&self, title: &str, period: &str) -> Node {
        if period.is_empty() {
            return Node::text(title, self.entry_title);
        }
        let period_width = get_metrics(&self.muted.font).measure_pt(period, self.muted.size) + 2.0;
        Node::row(
            vec![
                Cell::flex(1.0, Node::text(title, self.entry_title)),
                Cell::fixed(
                    period_width,
                    Node::text(period, self.muted.aligned(Align::Right)),
                ),
            ],
            8.0,
        )
    }

    fn bullets(&self, items: &[String], limit: usize) -> Node {
        Node::bullets(
            items.iter().take(limit).cloned().collect(),
            self.body,
            self.marker,
            self.bullet_indent,
        )
    }
}

/// Non-empty contact fields in display order: location, email, phone, portfolio, then links.
pub fn contact_items(info: &PersonalInfo, links: &[Link]) -> Vec<String> {
    [&info.location, &info.email, &info.phone, &info.portfolio]
        .into_iter()
        .map(|s| s.trim().to_string())
        .chain(links.iter().map(|l| l.url.trim().to_string()))
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn contact_line(info: &PersonalInfo, links: &[Link]) -> String {
    contact_items(info, links).join(CONTACT_SEPARATOR)
}

fn link_line(links: &[Link]) -> String {
    links
        .iter()
        .map(|l| format!("{}: {}", l.label, l.url))
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

fn join_present(parts: &[String], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `softSkills` / `soft_skills` / `frontend` → `Soft Skills` / `Soft Skills` / `Frontend`.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in key.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
