//! Device model
//!
//! An [`AuraDevice`] pairs the transport handle with the zones decoded from
//! its configuration blob and an observable connection state.

mod config;
mod state;
mod zone;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

pub use config::{CONFIG_LEN, DeviceConfiguration, MAX_ADDRESSABLE_ZONES};
pub use state::{ConnectionState, StatePublisher, SubscriptionId};
pub use zone::{ZONE_NAME_LEN, Zone, ZoneKind, ZoneName};

use crate::error::DecodeError;

/// Lighting controller device
///
/// `H` is the transport handle passed back to the controller on every write.
#[derive(Debug)]
pub struct AuraDevice<H> {
    hid: H,
    name: String,
    firmware: Option<String>,
    root: Option<Zone>,
    addressables: Vec<Zone>,
    connection: StatePublisher<ConnectionState>,
}

impl<H> AuraDevice<H> {
    pub fn new(hid: H, name: impl Into<String>) -> Self {
        Self {
            hid,
            name: name.into(),
            firmware: None,
            root: None,
            addressables: Vec::new(),
            connection: StatePublisher::default(),
        }
    }

    pub const fn hid(&self) -> &H {
        &self.hid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn firmware(&self) -> Option<&str> {
        self.firmware.as_deref()
    }

    pub fn set_firmware(&mut self, firmware: impl Into<String>) {
        self.firmware = Some(firmware.into());
    }

    pub const fn root_zone(&self) -> Option<&Zone> {
        self.root.as_ref()
    }

    pub fn set_root_zone(&mut self, zone: Option<Zone>) {
        self.root = zone;
    }

    pub fn addressable_zones(&self) -> &[Zone] {
        &self.addressables
    }

    pub fn set_addressable_zones(&mut self, zones: Vec<Zone>) {
        self.addressables = zones;
    }

    /// Replace the zones with the ones described by `config`
    pub fn apply_configuration(&mut self, config: &DeviceConfiguration) -> Result<(), DecodeError> {
        let addressables = config.addressable_zones()?;
        self.root = Some(config.root_zone());
        self.addressables = addressables.into_iter().collect();
        Ok(())
    }

    /// Root zone (if any) followed by the addressable zones
    pub fn zones(&self) -> Vec<Zone> {
        self.root
            .iter()
            .chain(self.addressables.iter())
            .cloned()
            .collect()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.get()
    }

    /// Update the connection state, notifying observers on change
    pub fn set_connection_state(&mut self, state: ConnectionState) -> bool {
        self.connection.set(state)
    }

    pub fn subscribe_connection_state(
        &mut self,
        observer: impl Fn(ConnectionState) + Send + 'static,
    ) -> SubscriptionId {
        self.connection.subscribe(observer)
    }

    pub fn unsubscribe_connection_state(&mut self, id: SubscriptionId) -> bool {
        self.connection.unsubscribe(id)
    }
}

impl<H> fmt::Display for AuraDevice<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<name: {}, firmware: {:?}, connection_state: {:?}, root: {:?}, addressables: {:?}>",
            self.name,
            self.firmware,
            self.connection.get(),
            self.root,
            self.addressables
        )
    }
}
