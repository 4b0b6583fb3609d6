//! Device configuration blob
//!
//! The controller reports a fixed 60-byte capability block. Layout, in
//! rows of six bytes:
//!
//! ```text
//! 00: 1E 9F 02 01 00 00   header (reported addressable channel count at 0x02)
//! 06: 78 3C 00 01 00 00   addressable channel 0, LED count at 0x07
//! 0C: 78 3C 00 00 00 00   addressable channel 1, LED count at 0x0D
//! 18: 00 00 00 08 0A 02   mainboard LED count at 0x1B
//! ```
//!
//! The reported channel count is not reliable across product ids (some
//! blobs report 4 channels with one strip connected), so only the first
//! addressable channel is exposed.

use core::fmt::Write;

use heapless::Vec;

use super::zone::{Zone, ZoneName};
use crate::error::DecodeError;

/// Size of the configuration blob
pub const CONFIG_LEN: usize = 60;

/// Upper bound of addressable channel records that fit in the blob
pub const MAX_ADDRESSABLE_ZONES: usize = 8;

const ROW_LEN: usize = 6;
const MAINBOARD_LED_COUNT_OFFSET: usize = 0x1B;
const CHANNEL_LED_COUNT_OFFSET: usize = 0x01;
const ADDRESSABLE_CHANNEL_COUNT: u8 = 1;

const ROOT_EFFECT_CHANNEL: u8 = 0x00;
const ROOT_DIRECT_CHANNEL: u8 = 0x04;
const ROOT_NAME: &str = "Root";

/// Parsed capability block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfiguration {
    data: [u8; CONFIG_LEN],
}

impl DeviceConfiguration {
    /// Decode a configuration blob
    ///
    /// Bytes past [`CONFIG_LEN`] are ignored.
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        let Some(head) = data.get(..CONFIG_LEN) else {
            return Err(DecodeError::TooShort {
                expected: CONFIG_LEN,
                actual: data.len(),
            });
        };

        let mut bytes = [0; CONFIG_LEN];
        bytes.copy_from_slice(head);

        for (row, chunk) in bytes.chunks(ROW_LEN).enumerate() {
            tracing::trace!("{:02X}: {:02X?}", row * ROW_LEN, chunk);
        }

        Ok(Self { data: bytes })
    }

    pub const fn as_bytes(&self) -> &[u8; CONFIG_LEN] {
        &self.data
    }

    pub const fn mainboard_led_count(&self) -> u8 {
        self.data[MAINBOARD_LED_COUNT_OFFSET]
    }

    /// Number of addressable channels exposed as zones
    pub const fn addressable_channel_count(&self) -> u8 {
        ADDRESSABLE_CHANNEL_COUNT
    }

    /// LED count of the addressable channel at `index`
    pub fn addressable_led_count(&self, index: u8) -> Result<u8, DecodeError> {
        let offset = Self::channel_offset(index) + CHANNEL_LED_COUNT_OFFSET;
        self.data
            .get(offset)
            .copied()
            .ok_or(DecodeError::ChannelOutOfRange { index })
    }

    /// Mainboard zone
    pub fn root_zone(&self) -> Zone {
        Zone::fixed(
            ROOT_EFFECT_CHANNEL,
            ROOT_DIRECT_CHANNEL,
            self.mainboard_led_count(),
        )
        .with_name(ROOT_NAME)
    }

    /// One zone per exposed addressable channel
    pub fn addressable_zones(&self) -> Result<Vec<Zone, MAX_ADDRESSABLE_ZONES>, DecodeError> {
        let mut zones = Vec::new();
        for index in 0..self.addressable_channel_count() {
            let zone = Self::addressable_zone(index, self.addressable_led_count(index)?);
            zones
                .push(zone)
                .map_err(|_| DecodeError::ChannelOutOfRange { index })?;
        }
        Ok(zones)
    }

    fn addressable_zone(index: u8, led_count: u8) -> Zone {
        let mut name = ZoneName::new();
        let _ = write!(name, "Device: {}", index + 1);
        Zone::addressable(index + 1, index, led_count).with_name(&name)
    }

    const fn channel_offset(index: u8) -> usize {
        ROW_LEN * (index as usize + 1)
    }
}
