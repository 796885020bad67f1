//! Typography table.
//!
//! Every visual node carries a [`Typography`] picked from its block kind,
//! heading level and presentation [`Variant`]. The six heading levels are
//! always visually distinct within a variant.

use mockdown_core::{BlockKind, Variant};

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weight {
    Regular,
    Medium,
    Semibold,
    Bold,
}

impl Weight {
    /// Whether a terminal should render this weight in bold.
    pub fn is_bold(self) -> bool {
        self >= Weight::Semibold
    }
}

/// Text size, weight and vertical spacing of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Typography {
    /// Nominal font size in points
    pub size: u8,
    pub weight: Weight,
    /// Blank lines before the node
    pub space_before: u8,
    /// Blank lines after the node
    pub space_after: u8,
    pub centered: bool,
}

impl Typography {
    const fn new(size: u8, weight: Weight, space_before: u8, space_after: u8) -> Self {
        Self {
            size,
            weight,
            space_before,
            space_after,
            centered: false,
        }
    }

    const fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}

use Weight::*;

const FULL_HEADINGS: [Typography; 6] = [
    Typography::new(32, Bold, 1, 1).centered(),
    Typography::new(26, Bold, 1, 1).centered(),
    Typography::new(22, Semibold, 1, 0),
    Typography::new(19, Semibold, 1, 0),
    Typography::new(17, Medium, 1, 0),
    Typography::new(15, Medium, 1, 0),
];

const COMPACT_HEADINGS: [Typography; 6] = [
    Typography::new(22, Bold, 1, 0),
    Typography::new(20, Bold, 1, 0),
    Typography::new(18, Semibold, 0, 0),
    Typography::new(16, Semibold, 0, 0),
    Typography::new(15, Medium, 0, 0),
    Typography::new(14, Medium, 0, 0),
];

const MINIMAL_HEADINGS: [Typography; 6] = [
    Typography::new(18, Bold, 0, 0),
    Typography::new(17, Bold, 0, 0),
    Typography::new(16, Semibold, 0, 0),
    Typography::new(15, Semibold, 0, 0),
    Typography::new(14, Medium, 0, 0),
    Typography::new(13, Medium, 0, 0),
];

/// Typography for a block.
///
/// `level` is only read for headings and is clamped to 1..=6.
///
/// # Example
///
/// ```
/// use mockdown_core::{BlockKind, Variant};
/// use mockdown_render::typography::typography;
///
/// let h1 = typography(BlockKind::Heading, 1, Variant::Full);
/// let h2 = typography(BlockKind::Heading, 2, Variant::Full);
/// assert!(h1.size > h2.size);
/// ```
pub fn typography(kind: BlockKind, level: u8, variant: Variant) -> Typography {
    if kind == BlockKind::Heading {
        let index = usize::from(level.clamp(1, 6)) - 1;
        return match variant {
            Variant::Full => FULL_HEADINGS[index],
            Variant::Compact => COMPACT_HEADINGS[index],
            Variant::Minimal => MINIMAL_HEADINGS[index],
        };
    }

    let body = match variant {
        Variant::Full => 16,
        Variant::Compact => 15,
        Variant::Minimal => 13,
    };
    let after = match (variant, kind) {
        (Variant::Full, _) => 1,
        (Variant::Compact, BlockKind::Paragraph | BlockKind::Code | BlockKind::Table) => 1,
        _ => 0,
    };

    match kind {
        BlockKind::Code | BlockKind::Table => Typography::new(body - 1, Regular, 0, after),
        _ => Typography::new(body, Regular, 0, after),
    }
}
