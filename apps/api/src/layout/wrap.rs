//! Greedy word wrap against a line width in points.

use crate::layout::font_metrics::FontMetricTable;

/// One wrapped line and how much of the available width it fills.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width_pt: f32,
    /// `width_pt / max_width_pt`; may exceed 1.0 for a single word wider than the line.
    pub fill: f32,
}

/// Splits `text` into lines no wider than `max_width_pt` at `size_pt`.
///
/// Whitespace runs collapse to a single space. A word wider than the line is
/// placed on a line of its own rather than broken. Empty input yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let space_w = metrics.space_width * size_pt;
    let max_width = max_width_pt.max(1.0);

    for word in text.split_whitespace() {
        let word_w = metrics.measure_pt(word, size_pt);

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width {
            // Line is full; flush and start the next one with this word.
            lines.push(finish_line(std::mem::take(&mut current), current_width, max_width));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(finish_line(current, current_width, max_width));
    }
    lines
}

fn finish_line(text: String, width_pt: f32, max_width: f32) -> WrappedLine {
    WrappedLine {
        text,
        width_pt,
        fill: width_pt / max_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontFamily};

    fn helvetica() -> &'static FontMetricTable {
        get_metrics(&FontFamily::Helvetica)
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("", helvetica(), 10.0, 200.0).is_empty());
        assert!(wrap_text("   \n\t", helvetica(), 10.0, 200.0).is_empty());
    }

    #[test]
    fn test_short_text_fits_one_line() {
        let lines = wrap_text("Rust engineer", helvetica(), 10.0, 200.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Rust engineer");
        assert!(lines[0].fill < 1.0);
    }

    #[test]
    fn test_long_text_wraps_and_preserves_words() {
        let text = "word ".repeat(60);
        let lines = wrap_text(&text, helvetica(), 10.0, 150.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width_pt <= 150.0 + 1e-3, "line too wide: {line:?}");
        }
        let rejoined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rejoined.join(" "), text.trim_end());
    }

    #[test]
    fn test_whitespace_collapses() {
        let lines = wrap_text("a   b\n c", helvetica(), 10.0, 500.0);
        assert_eq!(lines[0].text, "a b c");
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let lines = wrap_text(
            "x supercalifragilisticexpialidocious y",
            helvetica(),
            12.0,
            40.0,
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "supercalifragilisticexpialidocious");
        assert!(lines[1].fill > 1.0);
    }

    #[test]
    fn test_width_accounts_for_spaces() {
        let metrics = helvetica();
        let lines = wrap_text("ab cd", metrics, 10.0, 500.0);
        let expected = metrics.measure_pt("ab cd", 10.0);
        assert!((lines[0].width_pt - expected).abs() < 1e-3);
    }
}
