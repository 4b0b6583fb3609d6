//! Solid color fill
//!
//! Fills every LED of the zone with one color, independent of the step.

use super::Pattern;
use crate::color::Rgb;

/// Static color command - fills all LEDs with one color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCommand {
    color: Rgb,
}

impl StaticCommand {
    /// Create a new static color command
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }
}

impl Pattern for StaticCommand {
    const ANIMATED: bool = false;

    fn fill(&self, _step: u64, leds: &mut [Rgb]) {
        leds.fill(self.color);
    }
}
