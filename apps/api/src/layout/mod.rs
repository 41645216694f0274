// Layout: font metrics, line wrapping and single-page fit analysis.
// Pure, CPU-bound helpers; callers run them inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod page;
pub mod page_fill;
pub mod wrap;

pub use font_metrics::{get_metrics, FontFamily};
pub use page::PageSpec;
pub use page_fill::{analyze_page_fill, recommend_fill_action, ContentBudget, FillAction};
