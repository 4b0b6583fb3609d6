use alloc::vec::Vec;

use crate::color::{Rgb, lerp_colors};

/// Default number of palette entries produced per gradient segment
pub const GRADIENT_STEPS: usize = 200;

/// Two-color linear gradient
///
/// Stateless: the expansion is recomputed every time [`Gradient::colors`]
/// is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub from: Rgb,
    pub to: Rgb,
}

impl Gradient {
    pub const fn new(from: Rgb, to: Rgb) -> Self {
        Self { from, to }
    }

    /// Expand the gradient into exactly `steps` colors.
    ///
    /// The first entry is `from` and the last entry is `to`.
    /// A single step yields `[from]`.
    pub fn colors(&self, steps: usize) -> Vec<Rgb> {
        let mut colors = Vec::with_capacity(steps);
        self.extend_into(&mut colors, steps);
        colors
    }

    /// Append `steps` interpolated colors to `out`
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn extend_into(&self, out: &mut Vec<Rgb>, steps: usize) {
        match steps {
            0 => {}
            1 => out.push(self.from),
            _ => {
                let last = (steps - 1) as f32;
                out.extend((0..steps).map(|i| lerp_colors(self.from, self.to, i as f32 / last)));
            }
        }
    }
}
