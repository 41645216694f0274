//! Page Fill Analysis — checks whether a laid-out résumé fits its single page.
//!
//! Templates never paginate. When the composed content runs past the bottom
//! margin this module recommends which part of the content budget to tighten
//! next; the template re-composes and the loop repeats until the page fits or
//! the budget hits its floor.
//!
//! # Page fill rules
//! - Fill ≤ 100% and whitespace ≤ 25% → acceptable
//! - Whitespace > 25%                 → acceptable, but reported (short résumé)
//! - Overflow ≤ 5%                    → trim the smallest unit first (project outcomes)
//! - Overflow > 5%                    → trim achievements per role first

use serde::{Deserialize, Serialize};

use crate::layout::page::PageSpec;

const MAX_WHITESPACE: f32 = 0.25;
const MINOR_OVERFLOW: f32 = 0.05;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Overall page fill verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PageFillVerdict {
    /// Content fits with at most 25% of the page left blank.
    Acceptable,
    /// Content fits but leaves more than 25% of the page blank.
    TooMuchWhitespace,
    /// Up to 5% past the bottom margin.
    MinorOverflow,
    /// More than 5% past the bottom margin.
    MajorOverflow,
}

/// Full page fill analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFillAnalysis {
    pub used_height_pt: f32,
    pub available_height_pt: f32,
    pub whitespace_fraction: f32,
    pub overflow_fraction: f32,
    pub verdict: PageFillVerdict,
}

impl PageFillAnalysis {
    pub fn fits(&self) -> bool {
        matches!(
            self.verdict,
            PageFillVerdict::Acceptable | PageFillVerdict::TooMuchWhitespace
        )
    }
}

/// How much variable-length content a template may place on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBudget {
    pub achievements_per_role: usize,
    pub outcomes_per_project: usize,
    pub max_projects: usize,
}

impl ContentBudget {
    const MIN_ACHIEVEMENTS: usize = 1;
    const MIN_PROJECTS: usize = 1;

    /// Returns the budget after applying `action`, or `None` if nothing can be trimmed.
    pub fn tightened(&self, action: FillAction) -> Option<ContentBudget> {
        let mut next = *self;
        match action {
            FillAction::TrimAchievements if self.can_trim_achievements() => {
                next.achievements_per_role -= 1
            }
            FillAction::TrimOutcomes if self.can_trim_outcomes() => next.outcomes_per_project -= 1,
            FillAction::DropProject if self.can_drop_project() => next.max_projects -= 1,
            FillAction::TrimAchievements | FillAction::TrimOutcomes | FillAction::DropProject => {
                return None
            }
            FillAction::NoAction | FillAction::Clip => return None,
        }
        Some(next)
    }

    fn can_trim_achievements(&self) -> bool {
        self.achievements_per_role > Self::MIN_ACHIEVEMENTS
    }

    fn can_trim_outcomes(&self) -> bool {
        self.outcomes_per_project > 0
    }

    fn can_drop_project(&self) -> bool {
        self.max_projects > Self::MIN_PROJECTS
    }
}

/// Recommended remediation for a page that does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillAction {
    /// Show one fewer achievement bullet per role.
    TrimAchievements,
    /// Show one fewer outcome bullet per project.
    TrimOutcomes,
    /// Show one fewer project.
    DropProject,
    /// Budget exhausted; emit the page and let the page box clip the rest.
    Clip,
    /// No action needed.
    NoAction,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Analyzes how much of the page's content box `used_height_pt` occupies.
pub fn analyze_page_fill(used_height_pt: f32, page: &PageSpec) -> PageFillAnalysis {
    let available = page.content_height();
    let fill_ratio = used_height_pt / available;

    let whitespace_fraction = (1.0_f32 - fill_ratio).max(0.0);
    let overflow_fraction = (fill_ratio - 1.0_f32).max(0.0);

    let verdict = if overflow_fraction > MINOR_OVERFLOW {
        PageFillVerdict::MajorOverflow
    } else if overflow_fraction > 0.0 {
        PageFillVerdict::MinorOverflow
    } else if whitespace_fraction > MAX_WHITESPACE {
        PageFillVerdict::TooMuchWhitespace
    } else {
        PageFillVerdict::Acceptable
    };

    PageFillAnalysis {
        used_height_pt,
        available_height_pt: available,
        whitespace_fraction,
        overflow_fraction,
        verdict,
    }
}

/// Recommends a single trimming step based on the analysis and what the budget still allows.
pub fn recommend_fill_action(analysis: &PageFillAnalysis, budget: &ContentBudget) -> FillAction {
    match analysis.verdict {
        PageFillVerdict::Acceptable | PageFillVerdict::TooMuchWhitespace => FillAction::NoAction,

        PageFillVerdict::MinorOverflow => {
            if budget.can_trim_outcomes() {
                FillAction::TrimOutcomes
            } else if budget.can_trim_achievements() {
                FillAction::TrimAchievements
            } else if budget.can_drop_project() {
                FillAction::DropProject
            } else {
                FillAction::Clip
            }
        }

        PageFillVerdict::MajorOverflow => {
            if budget.can_trim_achievements() {
                FillAction::TrimAchievements
            } else if budget.can_trim_outcomes() {
                FillAction::TrimOutcomes
            } else if budget.can_drop_project() {
                FillAction::DropProject
            } else {
                FillAction::Clip
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageSpec {
        PageSpec::A4
    }

    fn budget(achievements: usize, outcomes: usize, projects: usize) -> ContentBudget {
        ContentBudget {
            achievements_per_role: achievements,
            outcomes_per_project: outcomes,
            max_projects: projects,
        }
    }

    fn height_at(fraction: f32) -> f32 {
        page().content_height() * fraction
    }

    // ── analyze_page_fill verdicts ──────────────────────────────────────────

    #[test]
    fn test_acceptable_fill_verdict() {
        let analysis = analyze_page_fill(height_at(0.9), &page());
        assert_eq!(analysis.verdict, PageFillVerdict::Acceptable);
        assert!(analysis.fits());
        assert!((analysis.whitespace_fraction - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_too_much_whitespace_still_fits() {
        let analysis = analyze_page_fill(height_at(0.5), &page());
        assert_eq!(analysis.verdict, PageFillVerdict::TooMuchWhitespace);
        assert!(analysis.fits());
    }

    #[test]
    fn test_minor_overflow_verdict() {
        let analysis = analyze_page_fill(height_at(1.03), &page());
        assert_eq!(analysis.verdict, PageFillVerdict::MinorOverflow);
        assert!(!analysis.fits());
        assert!(analysis.overflow_fraction > 0.0 && analysis.overflow_fraction <= 0.05);
    }

    #[test]
    fn test_major_overflow_verdict() {
        let analysis = analyze_page_fill(height_at(1.2), &page());
        assert_eq!(analysis.verdict, PageFillVerdict::MajorOverflow);
        assert!(analysis.overflow_fraction > 0.05);
    }

    #[test]
    fn test_exact_fit_is_acceptable() {
        let analysis = analyze_page_fill(page().content_height(), &page());
        assert_eq!(analysis.verdict, PageFillVerdict::Acceptable);
    }

    // ── recommend_fill_action ────────────────────────────────────────────────

    #[test]
    fn test_no_action_when_page_fits() {
        let analysis = analyze_page_fill(height_at(0.8), &page());
        assert_eq!(
            recommend_fill_action(&analysis, &budget(4, 2, 3)),
            FillAction::NoAction
        );
    }

    #[test]
    fn test_minor_overflow_trims_outcomes_first() {
        let analysis = analyze_page_fill(height_at(1.02), &page());
        assert_eq!(
            recommend_fill_action(&analysis, &budget(4, 2, 3)),
            FillAction::TrimOutcomes
        );
        assert_eq!(
            recommend_fill_action(&analysis, &budget(4, 0, 3)),
            FillAction::TrimAchievements
        );
    }

    #[test]
    fn test_major_overflow_trims_achievements_first() {
        let analysis = analyze_page_fill(height_at(1.3), &page());
        assert_eq!(
            recommend_fill_action(&analysis, &budget(4, 2, 3)),
            FillAction::TrimAchievements
        );
        assert_eq!(
            recommend_fill_action(&analysis, &budget(1, 0, 3)),
            FillAction::DropProject
        );
    }

    #[test]
    fn test_exhausted_budget_clips() {
        let analysis = analyze_page_fill(height_at(1.3), &page());
        assert_eq!(
            recommend_fill_action(&analysis, &budget(1, 0, 1)),
            FillAction::Clip
        );
    }

    // ── ContentBudget::tightened ─────────────────────────────────────────────

    #[test]
    fn test_tightened_decrements_one_dimension() {
        let start = budget(4, 2, 3);
        assert_eq!(
            start.tightened(FillAction::TrimAchievements),
            Some(budget(3, 2, 3))
        );
        assert_eq!(start.tightened(FillAction::TrimOutcomes), Some(budget(4, 1, 3)));
        assert_eq!(start.tightened(FillAction::DropProject), Some(budget(4, 2, 2)));
        assert_eq!(start.tightened(FillAction::Clip), None);
        assert_eq!(start.tightened(FillAction::NoAction), None);
    }
}
