//! Marquee patterns
//!
//! A short cell pattern is rotated by one cell every [`TICKS_PER_CELL`] steps
//! and repeated along the whole strip.

use heapless::Vec;

use super::Pattern;
use crate::color::{BLACK, BLUE, RED, Rgb, WHITE};

/// Number of steps before the pattern advances by one cell
pub const TICKS_PER_CELL: u64 = 10;

/// Every palette color occupies this many adjacent cells
const STRETCH: usize = 2;

const MAX_PATTERN_LEN: usize = 8;

/// Rotating cell pattern shared by the spaced and patriotic marquees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarqueeCommand {
    pattern: Vec<Rgb, MAX_PATTERN_LEN>,
}

impl MarqueeCommand {
    /// Color against black: `[color, color, black, black]`
    pub fn spaced(color: Rgb) -> Self {
        Self::stretched([color, BLACK])
    }

    /// Red, white and blue, two cells each
    pub fn patriotic() -> Self {
        Self::stretched([RED, WHITE, BLUE])
    }

    fn stretched<const N: usize>(palette: [Rgb; N]) -> Self {
        const { assert!(N * STRETCH <= MAX_PATTERN_LEN) };
        let mut pattern = Vec::new();
        pattern.extend(
            palette
                .into_iter()
                .flat_map(|color| core::iter::repeat_n(color, STRETCH)),
        );
        Self { pattern }
    }

    /// One period of the pattern, before rotation
    pub fn pattern(&self) -> &[Rgb] {
        &self.pattern
    }

    /// Rotation offset of the pattern at `step`
    #[allow(clippy::cast_possible_truncation)]
    pub fn offset(&self, step: u64) -> usize {
        if self.pattern.is_empty() {
            return 0;
        }
        ((step / TICKS_PER_CELL) % self.pattern.len() as u64) as usize
    }
}

impl Pattern for MarqueeCommand {
    fn fill(&self, step: u64, leds: &mut [Rgb]) {
        let len = self.pattern.len();
        if len == 0 {
            leds.fill(BLACK);
            return;
        }

        // Rotate left by the offset, then cycle to the strip length
        let offset = self.offset(step);
        for (i, led) in leds.iter_mut().enumerate() {
            *led = self.pattern[(offset + i) % len];
        }
    }
}
