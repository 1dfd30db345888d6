use crate::config::PageConfig;

/// Which of the two font sizes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Compact,
    Regular,
}

/// Viewport-width breakpoint choosing between two discrete chart font sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsiveThreshold {
    pub breakpoint_px: f64,
    pub compact_font_size: f64,
    pub regular_font_size: f64,
}

impl Default for ResponsiveThreshold {
    fn default() -> Self {
        Self::from_config(&PageConfig::default())
    }
}

impl ResponsiveThreshold {
    pub fn from_config(config: &PageConfig) -> Self {
        Self {
            breakpoint_px: config.breakpoint_px,
            compact_font_size: config.compact_font_size,
            regular_font_size: config.regular_font_size,
        }
    }

    /// Compact strictly below the breakpoint. A NaN width compares false
    /// and therefore lands on `Regular`.
    pub fn classify(&self, width: f64) -> SizeClass {
        if width < self.breakpoint_px {
            SizeClass::Compact
        } else {
            SizeClass::Regular
        }
    }

    pub fn font_size(&self, class: SizeClass) -> f64 {
        match class {
            SizeClass::Compact => self.compact_font_size,
            SizeClass::Regular => self.regular_font_size,
        }
    }

    pub fn font_size_for(&self, width: f64) -> f64 {
        self.font_size(self.classify(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 9.0)]
    #[case(320.0, 9.0)]
    #[case(500.0, 9.0)]
    #[case(767.0, 9.0)]
    #[case(767.9, 9.0)]
    #[case(768.0, 11.0)]
    #[case(1024.0, 11.0)]
    #[case(2560.0, 11.0)]
    fn font_size_around_breakpoint(#[case] width: f64, #[case] expected: f64) {
        assert_eq!(ResponsiveThreshold::default().font_size_for(width), expected);
    }

    #[test]
    fn nan_width_is_regular() {
        assert_eq!(
            ResponsiveThreshold::default().classify(f64::NAN),
            SizeClass::Regular
        );
    }

    proptest! {
        #[test]
        fn narrow_viewports_are_compact(width in 0.0f64..768.0) {
            prop_assert_eq!(ResponsiveThreshold::default().font_size_for(width), 9.0);
        }

        #[test]
        fn wide_viewports_are_regular(width in 768.0f64..10_000.0) {
            prop_assert_eq!(ResponsiveThreshold::default().font_size_for(width), 11.0);
        }
    }
}
