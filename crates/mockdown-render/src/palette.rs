//! Terminal colour palette.

/// An RGB triple.
pub type Rgb = (u8, u8, u8);

/// Colours used by the painter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Heading colours, h1 through h6
    pub headings: [Rgb; 6],
    /// Markers and borders (bullets, table rules, quote bars)
    pub symbol: Rgb,
    /// Muted text (line numbers, labels)
    pub grey: Rgb,
    /// Code block and inline code background
    pub code_bg: Rgb,
    /// Table header background
    pub header_bg: Rgb,
    pub link: Rgb,
    pub math: Rgb,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            headings: [
                (0x87, 0xce, 0xeb), // sky blue
                (0x98, 0xfb, 0x98), // pale green
                (0xdd, 0xa0, 0xdd), // plum
                (0xf0, 0xe6, 0x8c), // khaki
                (0xb0, 0xc4, 0xde), // light steel
                (0x80, 0x80, 0x80), // grey
            ],
            symbol: (0xdd, 0xa0, 0xdd),
            grey: (0x80, 0x80, 0x80),
            code_bg: (0x1a, 0x1a, 0x2e),
            header_bg: (0x2d, 0x2d, 0x44),
            link: (0x87, 0xce, 0xeb),
            math: (0xf0, 0xe6, 0x8c),
        }
    }

    pub fn light() -> Self {
        Self {
            headings: [
                (0x1f, 0x4e, 0x9a),
                (0x2e, 0x7d, 0x32),
                (0x8e, 0x24, 0xaa),
                (0x9a, 0x67, 0x00),
                (0x45, 0x5a, 0x64),
                (0x75, 0x75, 0x75),
            ],
            symbol: (0x8e, 0x24, 0xaa),
            grey: (0x75, 0x75, 0x75),
            code_bg: (0xf3, 0xf3, 0xf6),
            header_bg: (0xe1, 0xe4, 0xea),
            link: (0x1f, 0x4e, 0x9a),
            math: (0x9a, 0x67, 0x00),
        }
    }

    /// The palette matching a terminal background.
    pub fn for_background(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Colour for a heading level; levels outside 1..=6 are clamped.
    pub fn heading(&self, level: u8) -> Rgb {
        self.headings[usize::from(level.clamp(1, 6)) - 1]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels_clamped() {
        let p = Palette::dark();
        assert_eq!(p.heading(0), p.headings[0]);
        assert_eq!(p.heading(9), p.headings[5]);
        assert_eq!(p.heading(3), p.headings[2]);
    }

    #[test]
    fn test_background_choice() {
        assert_eq!(Palette::for_background(true), Palette::dark());
        assert_ne!(Palette::for_background(false), Palette::dark());
    }
}
