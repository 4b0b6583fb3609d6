//! Effect catalog
//!
//! An effect binds a name and a color-count policy to a builder that turns
//! the user's colors into a [`Command`].

use crate::color::Rgb;
use crate::command::Command;
use crate::error::ValidationError;

const EFFECT_NAME_STATIC: &str = "static";
const EFFECT_NAME_SPACED: &str = "spaced";
const EFFECT_NAME_GRADIENT: &str = "gradient";
const EFFECT_NAME_ROLLING_GRADIENT: &str = "rolling_gradient";
const EFFECT_NAME_PATRIOTIC: &str = "patriotic";

const EFFECT_ID_STATIC: u8 = 0;
const EFFECT_ID_SPACED: u8 = 1;
const EFFECT_ID_GRADIENT: u8 = 2;
const EFFECT_ID_ROLLING_GRADIENT: u8 = 3;
const EFFECT_ID_PATRIOTIC: u8 = 4;

/// Number of colors used by [`ColorArity::Dynamic`] effects
pub const DYNAMIC_COLOR_COUNT: usize = 3;

/// How many colors the user has to pick before a command can be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorArity {
    None,
    Count(usize),
    Dynamic,
}

impl ColorArity {
    pub const fn count(self) -> usize {
        match self {
            Self::None => 0,
            Self::Count(count) => count,
            Self::Dynamic => DYNAMIC_COLOR_COUNT,
        }
    }
}

/// Builds a command from the validated user colors
pub type CommandBuilder = fn(&[Rgb]) -> Command;

/// Named effect with its color policy
#[derive(Debug, Clone, Copy)]
pub struct EffectDescriptor {
    pub name: &'static str,
    pub arity: ColorArity,
    builder: CommandBuilder,
}

impl EffectDescriptor {
    pub const fn new(name: &'static str, arity: ColorArity, builder: CommandBuilder) -> Self {
        Self {
            name,
            arity,
            builder,
        }
    }

    /// Build the command, checking the color count against the arity first
    pub fn build_command(&self, colors: &[Rgb]) -> Result<Command, ValidationError> {
        let expected = self.arity.count();
        if colors.len() != expected {
            return Err(ValidationError {
                effect: self.name,
                expected,
                actual: colors.len(),
            });
        }
        Ok((self.builder)(colors))
    }
}

/// Built-in effects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Static = EFFECT_ID_STATIC,
    Spaced = EFFECT_ID_SPACED,
    Gradient = EFFECT_ID_GRADIENT,
    RollingGradient = EFFECT_ID_ROLLING_GRADIENT,
    Patriotic = EFFECT_ID_PATRIOTIC,
}

impl EffectId {
    pub const ALL: [Self; 5] = [
        Self::Static,
        Self::Spaced,
        Self::Gradient,
        Self::RollingGradient,
        Self::Patriotic,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_STATIC => Self::Static,
            EFFECT_ID_SPACED => Self::Spaced,
            EFFECT_ID_GRADIENT => Self::Gradient,
            EFFECT_ID_ROLLING_GRADIENT => Self::RollingGradient,
            EFFECT_ID_PATRIOTIC => Self::Patriotic,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => EFFECT_NAME_STATIC,
            Self::Spaced => EFFECT_NAME_SPACED,
            Self::Gradient => EFFECT_NAME_GRADIENT,
            Self::RollingGradient => EFFECT_NAME_ROLLING_GRADIENT,
            Self::Patriotic => EFFECT_NAME_PATRIOTIC,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_STATIC => Some(Self::Static),
            EFFECT_NAME_SPACED => Some(Self::Spaced),
            EFFECT_NAME_GRADIENT => Some(Self::Gradient),
            EFFECT_NAME_ROLLING_GRADIENT => Some(Self::RollingGradient),
            EFFECT_NAME_PATRIOTIC => Some(Self::Patriotic),
            _ => None,
        }
    }

    pub const fn arity(self) -> ColorArity {
        match self {
            Self::Static | Self::Spaced => ColorArity::Count(1),
            Self::Gradient | Self::RollingGradient => ColorArity::Dynamic,
            Self::Patriotic => ColorArity::None,
        }
    }

    pub fn descriptor(self) -> EffectDescriptor {
        let builder: CommandBuilder = match self {
            Self::Static => |colors| Command::static_color(colors[0]),
            Self::Spaced => |colors| Command::spaced(colors[0]),
            Self::Gradient => Command::gradient,
            Self::RollingGradient => Command::rolling_gradient,
            Self::Patriotic => |_| Command::patriotic_marquee(),
        };
        EffectDescriptor::new(self.as_str(), self.arity(), builder)
    }
}
