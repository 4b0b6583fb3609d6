//! Controller collaborator
//!
//! Report framing and device I/O live behind this trait; the runner only
//! decides what to send and when.

use crate::color::Rgb;
use crate::error::TransportError;

/// Device-side lighting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectMode {
    Off = 0x00,
    Static = 0x01,
    /// Render frames pushed through [`AuraController::set_direct`]
    Direct = 0xFF,
}

/// Sends lighting reports to a device
pub trait AuraController {
    /// Transport handle of the target device
    type Device;

    /// Select the device-side mode of an effect channel
    fn set_effect(
        &mut self,
        mode: EffectMode,
        effect_channel: u8,
        device: &Self::Device,
    ) -> Result<(), TransportError>;

    /// Write up to one report worth of colors starting at `start_led`
    ///
    /// The device renders the written colors once a write with `apply`
    /// set arrives.
    fn set_direct(
        &mut self,
        colors: &[Rgb],
        start_led: u8,
        direct_channel: u8,
        apply: bool,
        device: &Self::Device,
    ) -> Result<(), TransportError>;
}
