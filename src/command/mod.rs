//! Lighting commands
//!
//! A command turns a `(capacity, step)` pair into one frame of colors.
//! All variants are stored in an enum; each one implements [`Pattern`].

mod gradient;
mod marquee;
mod static_color;

use alloc::vec::Vec;

pub use gradient::{GradientCommand, PHASE_STRIDE};
pub use marquee::{MarqueeCommand, TICKS_PER_CELL};
pub use static_color::StaticCommand;

use crate::color::{BLACK, Rgb};

pub trait Pattern {
    /// Whether the output depends on the step
    const ANIMATED: bool = true;

    /// Render the frame for `step` into `leds`
    ///
    /// Must be a pure function of the step, the strip length and the
    /// command parameters.
    fn fill(&self, step: u64, leds: &mut [Rgb]);
}

/// Lighting command - enum containing all command variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Single solid color
    Static(StaticCommand),
    /// One color marching against black
    Spaced(MarqueeCommand),
    /// Flowing gradient, optionally seamless (rolling)
    Gradient(GradientCommand),
    /// Red, white and blue marquee
    PatrioticMarquee(MarqueeCommand),
}

/// Variant tag for external observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Static,
    Spaced,
    Gradient,
    RollingGradient,
    PatrioticMarquee,
}

impl Command {
    pub const fn static_color(color: Rgb) -> Self {
        Self::Static(StaticCommand::new(color))
    }

    pub fn spaced(color: Rgb) -> Self {
        Self::Spaced(MarqueeCommand::spaced(color))
    }

    pub fn gradient(anchors: &[Rgb]) -> Self {
        Self::Gradient(GradientCommand::new(anchors))
    }

    pub fn rolling_gradient(anchors: &[Rgb]) -> Self {
        Self::Gradient(GradientCommand::rolling(anchors))
    }

    /// Gradient that runs from `from` to `to` and back again
    pub fn gradient_between(from: Rgb, to: Rgb) -> Self {
        Self::gradient(&[from, to, from])
    }

    pub fn patriotic_marquee() -> Self {
        Self::PatrioticMarquee(MarqueeCommand::patriotic())
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Static(_) => CommandKind::Static,
            Self::Spaced(_) => CommandKind::Spaced,
            Self::Gradient(command) if command.is_seamless() => CommandKind::RollingGradient,
            Self::Gradient(_) => CommandKind::Gradient,
            Self::PatrioticMarquee(_) => CommandKind::PatrioticMarquee,
        }
    }

    /// Whether time advances the pattern
    pub fn is_animated(&self) -> bool {
        match self {
            Self::Static(_) => StaticCommand::ANIMATED,
            Self::Spaced(_) | Self::PatrioticMarquee(_) => MarqueeCommand::ANIMATED,
            Self::Gradient(_) => GradientCommand::ANIMATED,
        }
    }

    /// Render the frame for `step` into `leds`
    pub fn fill(&self, step: u64, leds: &mut [Rgb]) {
        match self {
            Self::Static(command) => command.fill(step, leds),
            Self::Spaced(command) | Self::PatrioticMarquee(command) => command.fill(step, leds),
            Self::Gradient(command) => command.fill(step, leds),
        }
    }

    /// Colors for a zone of `capacity` LEDs at `step`
    pub fn colors_for(&self, capacity: usize, step: u64) -> Vec<Rgb> {
        let mut leds = alloc::vec![BLACK; capacity];
        self.fill(step, &mut leds);
        leds
    }
}
