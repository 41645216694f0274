//! Template variants — three visual compositions over the same `ResumeData`.
//!
//! The variant set is closed: `TemplateKey` names every renderer and `render`
//! dispatches with a plain `match`. Any unrecognized key falls back to
//! `Modern`.

pub mod classic;
pub mod common;
pub mod creative;
pub mod modern;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assets::InlineImage;
use crate::document::{self, DocumentTree};
use crate::layout::{analyze_page_fill, recommend_fill_action, ContentBudget, FillAction, PageSpec};
use crate::models::resume::ResumeData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKey {
    #[default]
    Modern,
    Creative,
    Classic,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 3] = [
        TemplateKey::Modern,
        TemplateKey::Creative,
        TemplateKey::Classic,
    ];

    /// Case-insensitive lookup; absent or unknown keys resolve to `Modern`.
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return TemplateKey::default();
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "creative" => TemplateKey::Creative,
            "classic" => TemplateKey::Classic,
            _ => TemplateKey::Modern,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::Modern => "modern",
            TemplateKey::Creative => "creative",
            TemplateKey::Classic => "classic",
        }
    }

    /// Most generous content budget the variant starts from.
    pub fn starting_budget(&self) -> ContentBudget {
        match self {
            TemplateKey::Modern => modern::BUDGET,
            TemplateKey::Creative => creative::BUDGET,
            TemplateKey::Classic => classic::BUDGET,
        }
    }

    fn compose(
        &self,
        data: &ResumeData,
        image: Option<&InlineImage>,
        budget: &ContentBudget,
        page: &PageSpec,
    ) -> DocumentTree {
        match self {
            TemplateKey::Modern => modern::compose(data, image, budget, page),
            TemplateKey::Creative => creative::compose(data, image, budget, page),
            TemplateKey::Classic => classic::compose(data, image, budget, page),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders `data` with the chosen variant onto a single A4 page.
pub fn render(key: TemplateKey, data: &ResumeData, image: Option<&InlineImage>) -> DocumentTree {
    fit_to_page(key, data, image, &PageSpec::A4)
}

/// Composes the variant, tightening its content budget until the page fits.
///
/// When the budget floor is reached and the page still overflows, the last
/// composition is returned as is and the overflow is clipped by the page box.
pub fn fit_to_page(
    key: TemplateKey,
    data: &ResumeData,
    image: Option<&InlineImage>,
    page: &PageSpec,
) -> DocumentTree {
    let mut budget = key.starting_budget();

    loop {
        let tree = key.compose(data, image, &budget, page);
        let laid_out = document::layout(&tree, page);
        let analysis = analyze_page_fill(laid_out.content_height, page);

        let action = recommend_fill_action(&analysis, &budget);
        if action == FillAction::NoAction {
            return tree;
        }

        match budget.tightened(action) {
            Some(next) => {
                debug!(
                    template = %key,
                    ?action,
                    overflow = analysis.overflow_fraction,
                    "Tightening content budget"
                );
                budget = next;
            }
            None => {
                warn!(
                    template = %key,
                    overflow = analysis.overflow_fraction,
                    "Résumé still overflows at the minimum budget; clipping"
                );
                return tree;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ImageMime;
    use crate::document::assemble::inspect::{image_draws, page_count, page_text};
    use crate::document::assemble;
    use crate::models::resume::{ExperienceEntry, ResumeData};

    fn data() -> ResumeData {
        ResumeData::embedded().unwrap()
    }

    fn portrait() -> InlineImage {
        let bytes = std::fs::read(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/public/images/profile.png"
        ))
        .unwrap();
        InlineImage::from_bytes(ImageMime::Png, &bytes)
    }

    #[test]
    fn test_resolve_known_keys_case_insensitively() {
        assert_eq!(TemplateKey::resolve(Some("creative")), TemplateKey::Creative);
        assert_eq!(TemplateKey::resolve(Some("CLASSIC")), TemplateKey::Classic);
        assert_eq!(TemplateKey::resolve(Some("Modern")), TemplateKey::Modern);
    }

    #[test]
    fn test_resolve_falls_back_to_modern() {
        for raw in [None, Some(""), Some("unknown"), Some("creative-ish"), Some("  ")] {
            assert_eq!(TemplateKey::resolve(raw), TemplateKey::Modern, "{raw:?}");
        }
    }

    #[test]
    fn test_every_variant_renders_one_page() {
        let data = data();
        for key in TemplateKey::ALL {
            let bytes = assemble(&render(key, &data, None)).unwrap();
            assert_eq!(page_count(&bytes), 1, "{key}");
            assert!(page_text(&bytes).contains(&data.personal_info.name), "{key}");
        }
    }

    #[test]
    fn test_present_replaces_end_date_for_current_role() {
        let mut data = data();
        data.experience = vec![ExperienceEntry {
            company: "Acme".to_string(),
            role: "Lead Engineer".to_string(),
            location: None,
            start_date: "2021-03".to_string(),
            end_date: None,
            current: true,
            achievements: vec!["Shipped things".to_string()],
            technologies: vec![],
        }];
        for key in TemplateKey::ALL {
            let bytes = assemble(&render(key, &data, None)).unwrap();
            assert!(page_text(&bytes).contains("Present"), "{key}");
        }
    }

    #[test]
    fn test_absent_optional_sections_have_no_heading() {
        let mut data = data();
        data.certifications.clear();
        data.languages.clear();
        for key in TemplateKey::ALL {
            let bytes = assemble(&render(key, &data, None)).unwrap();
            let text = page_text(&bytes).to_lowercase();
            assert!(!text.contains("certifications"), "{key}");
            assert!(!text.contains("languages"), "{key}");
        }
    }

    #[test]
    fn test_present_optional_sections_have_heading() {
        let data = data();
        assert!(!data.certifications.is_empty() && !data.languages.is_empty());
        for key in TemplateKey::ALL {
            let bytes = assemble(&render(key, &data, None)).unwrap();
            let text = page_text(&bytes).to_lowercase();
            assert!(text.contains("certifications"), "{key}");
            assert!(text.contains("languages"), "{key}");
        }
    }

    #[test]
    fn test_portrait_region_only_when_image_present() {
        let data = data();
        let image = portrait();
        for key in TemplateKey::ALL {
            assert!(!render(key, &data, None).has_image(), "{key}");
            let with = render(key, &data, Some(&image));
            assert!(with.has_image(), "{key}");
            assert_eq!(image_draws(&assemble(&with).unwrap()), 1, "{key}");
        }
    }

    #[test]
    fn test_creative_caps_achievements_per_role() {
        let mut data = data();
        data.experience.truncate(1);
        data.experience[0].achievements = (1..=6).map(|i| format!("Milestone{i}")).collect();
        let bytes = assemble(&render(TemplateKey::Creative, &data, None)).unwrap();
        let text = page_text(&bytes);
        assert!(text.matches("Milestone").count() <= creative::MAX_ACHIEVEMENTS);
        assert!(!text.contains("Milestone4"));
    }

    #[test]
    fn test_experience_order_is_preserved() {
        let data = data();
        for key in TemplateKey::ALL {
            let bytes = assemble(&render(key, &data, None)).unwrap();
            let text = page_text(&bytes);
            let positions: Vec<usize> = data
                .experience
                .iter()
                .map(|e| text.find(e.company.as_str()).unwrap())
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            assert_eq!(positions, sorted, "{key}");
        }
    }

    #[test]
    fn test_overflowing_content_is_trimmed_to_fit() {
        let mut data = data();
        let template = data.experience[0].clone();
        data.experience = (0..8)
            .map(|i| ExperienceEntry {
                role: format!("Role {i}"),
                achievements: (0..6)
                    .map(|j| format!("Delivered a long and detailed outcome number {j} for role {i} across several teams and quarters"))
                    .collect(),
                ..template.clone()
            })
            .collect();

        for key in TemplateKey::ALL {
            let page = PageSpec::A4;
            let tree = render(key, &data, None);
            let start = key.starting_budget();
            let untrimmed = key.compose(&data, None, &start, &page);
            assert_ne!(tree, untrimmed, "{key} should have tightened its budget");
            assert_eq!(page_count(&assemble(&tree).unwrap()), 1, "{key}");
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let data = data();
        let image = portrait();
        for key in TemplateKey::ALL {
            let a = assemble(&render(key, &data, Some(&image))).unwrap();
            let b = assemble(&render(key, &data, Some(&image))).unwrap();
            assert_eq!(a, b, "{key}");
        }
    }
}
