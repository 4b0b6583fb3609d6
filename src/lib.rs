#![no_std]

extern crate alloc;

pub mod color;
pub mod command;
pub mod controller;
pub mod device;
pub mod effect;
pub mod error;
pub mod math8;
pub mod runner;
pub mod scheduler;

pub use color::{BLACK, BLUE, Gradient, RED, Rgb, WHITE};
pub use command::{Command, CommandKind, Pattern};
pub use controller::{AuraController, EffectMode};
pub use device::{AuraDevice, ConnectionState, DeviceConfiguration, Zone, ZoneKind};
pub use effect::{ColorArity, EffectDescriptor, EffectId};
pub use error::{DecodeError, Error, TransportError, ValidationError};
pub use runner::{EffectRunner, RunnerConfig, RunnerState, TickReport};
pub use scheduler::{NoSleepInhibitor, PeriodicScheduler, SleepInhibitor, TickCallback, TickHandle};

pub use embassy_time::Duration;
