use serde::{Deserialize, Serialize};

/// Fixed page geometry in PDF points (1/72 inch).
///
/// Every generated résumé uses exactly one page of this size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageSpec {
    /// ISO A4 with 0.5" margins.
    pub const A4: PageSpec = PageSpec {
        width_pt: 595.28,
        height_pt: 841.89,
        margin_pt: 36.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    pub fn content_height(&self) -> f32 {
        self.height_pt - 2.0 * self.margin_pt
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec::A4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_content_box() {
        let page = PageSpec::A4;
        assert!((page.content_width() - 523.28).abs() < 1e-3);
        assert!((page.content_height() - 769.89).abs() < 1e-3);
    }
}
