use heapless::String;

/// Maximum length of a zone display name
pub const ZONE_NAME_LEN: usize = 16;

pub type ZoneName = String<ZONE_NAME_LEN>;

/// Kind of LED region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    /// Mainboard LEDs, driven through the device-side direct effect
    Fixed,
    /// LED strip on an addressable header, driven with per-LED frames
    Addressable,
}

/// Logical LED region of a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Channel that selects the device-side effect
    pub effect_channel: u8,
    /// Channel that receives per-LED color frames
    pub direct_channel: u8,
    pub led_count: u8,
    pub kind: ZoneKind,
    pub name: Option<ZoneName>,
}

impl Zone {
    pub const fn fixed(effect_channel: u8, direct_channel: u8, led_count: u8) -> Self {
        Self {
            effect_channel,
            direct_channel,
            led_count,
            kind: ZoneKind::Fixed,
            name: None,
        }
    }

    pub const fn addressable(effect_channel: u8, direct_channel: u8, led_count: u8) -> Self {
        Self {
            effect_channel,
            direct_channel,
            led_count,
            kind: ZoneKind::Addressable,
            name: None,
        }
    }

    /// Attach a display name, truncated to [`ZONE_NAME_LEN`] bytes
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        let mut label = ZoneName::new();
        for ch in name.chars() {
            if label.push(ch).is_err() {
                break;
            }
        }
        self.name = Some(label);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
