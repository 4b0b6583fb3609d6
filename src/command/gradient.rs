//! Flowing gradient over a precomputed palette
//!
//! The palette is the concatenation of every segment's expansion. Each LED
//! reads the palette at `step - index * PHASE_STRIDE`, so neighbouring LEDs
//! are a fixed phase apart and the whole pattern moves one entry per step.

use alloc::vec::Vec;

use super::Pattern;
use crate::{
    color::{BLACK, GRADIENT_STEPS, Gradient, Rgb},
    math8::floor_mod,
};

/// Palette distance between two adjacent LEDs
pub const PHASE_STRIDE: usize = GRADIENT_STEPS / 10;

/// Multi-anchor gradient command
///
/// With `seamless` set, a closing segment from the last anchor back to the
/// first one is appended, so the palette wraps without a visible seam
/// (rolling gradient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientCommand {
    gradients: Vec<Gradient>,
    palette: Vec<Rgb>,
    seamless: bool,
}

impl GradientCommand {
    /// Gradient through `anchors` in order
    pub fn new(anchors: &[Rgb]) -> Self {
        Self::build(anchors, false)
    }

    /// Gradient through `anchors` that wraps back to the first anchor
    pub fn rolling(anchors: &[Rgb]) -> Self {
        Self::build(anchors, true)
    }

    fn build(anchors: &[Rgb], seamless: bool) -> Self {
        let mut gradients: Vec<Gradient> = match anchors {
            [] => alloc::vec![Gradient::new(BLACK, BLACK)],
            [only] => alloc::vec![Gradient::new(*only, *only)],
            _ => anchors
                .windows(2)
                .map(|pair| Gradient::new(pair[0], pair[1]))
                .collect(),
        };

        if seamless {
            if let (Some(first), Some(last)) =
                (gradients.first().copied(), gradients.last().copied())
            {
                gradients.push(Gradient::new(last.to, first.from));
            }
        }

        let mut palette = Vec::with_capacity(gradients.len() * GRADIENT_STEPS);
        for gradient in &gradients {
            gradient.extend_into(&mut palette, GRADIENT_STEPS);
        }

        Self {
            gradients,
            palette,
            seamless,
        }
    }

    /// Segments the palette was built from, including the closing segment
    pub fn gradients(&self) -> &[Gradient] {
        &self.gradients
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    pub const fn is_seamless(&self) -> bool {
        self.seamless
    }
}

impl Pattern for GradientCommand {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn fill(&self, step: u64, leds: &mut [Rgb]) {
        let len = self.palette.len();
        if len == 0 {
            leds.fill(BLACK);
            return;
        }

        // Reduce first so the step always fits the signed phase math
        let base = (step % len as u64) as i64;
        for (i, led) in leds.iter_mut().enumerate() {
            let phase = base - (i * PHASE_STRIDE) as i64;
            *led = self.palette[floor_mod(phase, len)];
        }
    }
}
