#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration as StdDuration;

use aura_light_composer::device::CONFIG_LEN;
use aura_light_composer::{
    AuraController, AuraDevice, DeviceConfiguration, Duration, EffectMode, PeriodicScheduler,
    Rgb, SleepInhibitor, TickCallback, TickHandle, TransportError,
};

pub const DEVICE_HANDLE: u32 = 7;

/// Configuration blob with 8 mainboard LEDs and 120 LEDs on the first header
pub fn sample_config_bytes() -> [u8; CONFIG_LEN] {
    let mut data = [0u8; CONFIG_LEN];
    data[..6].copy_from_slice(&[0x1E, 0x9F, 0x02, 0x01, 0x00, 0x00]);
    data[0x06..0x0C].copy_from_slice(&[0x00, 0x78, 0x01, 0x3E, 0x00, 0x02]);
    data[0x0C..0x12].copy_from_slice(&[0x78, 0x3C, 0x00, 0x00, 0x00, 0x00]);
    data[0x18..0x1E].copy_from_slice(&[0x00, 0x00, 0x00, 0x08, 0x0A, 0x02]);
    data[0x1E..0x24].copy_from_slice(&[0x01, 0xF4, 0x00, 0x00, 0x00, 0x00]);
    data
}

pub fn sample_device() -> AuraDevice<u32> {
    let config = DeviceConfiguration::parse(&sample_config_bytes()).unwrap();
    let mut device = AuraDevice::new(DEVICE_HANDLE, "AURA LED Controller");
    device.apply_configuration(&config).unwrap();
    device
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetEffect {
        mode: EffectMode,
        channel: u8,
        device: u32,
    },
    SetDirect {
        colors: Vec<Rgb>,
        start_led: u8,
        channel: u8,
        apply: bool,
        device: u32,
    },
}

/// Controller that records every call
#[derive(Debug, Clone, Default)]
pub struct MockController {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub failing: Arc<AtomicBool>,
    pub failing_start_led: Arc<Mutex<Option<u8>>>,
}

impl MockController {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Fail only the direct write that starts at `start_led`
    pub fn fail_start_led(&self, start_led: Option<u8>) {
        *self.failing_start_led.lock().unwrap() = start_led;
    }

    pub fn direct_calls(&self) -> Vec<(Vec<Rgb>, u8, u8, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SetDirect {
                    colors,
                    start_led,
                    channel,
                    apply,
                    ..
                } => Some((colors, start_led, channel, apply)),
                Call::SetEffect { .. } => None,
            })
            .collect()
    }

    fn result(&self) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(TransportError::Write("pipe closed".into()))
        } else {
            Ok(())
        }
    }
}

impl AuraController for MockController {
    type Device = u32;

    fn set_effect(
        &mut self,
        mode: EffectMode,
        effect_channel: u8,
        device: &u32,
    ) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(Call::SetEffect {
            mode,
            channel: effect_channel,
            device: *device,
        });
        self.result()
    }

    fn set_direct(
        &mut self,
        colors: &[Rgb],
        start_led: u8,
        direct_channel: u8,
        apply: bool,
        device: &u32,
    ) -> Result<(), TransportError> {
        self.calls.lock().unwrap().push(Call::SetDirect {
            colors: colors.to_vec(),
            start_led,
            channel: direct_channel,
            apply,
            device: *device,
        });
        if *self.failing_start_led.lock().unwrap() == Some(start_led) {
            return Err(TransportError::Write("report rejected".into()));
        }
        self.result()
    }
}

/// Controller that blocks inside every `set_direct` until the test opens its gate
pub struct GatedController {
    pub inner: MockController,
    entered: mpsc::Sender<()>,
    release: Arc<Mutex<mpsc::Receiver<()>>>,
}

pub struct Gate {
    entered: mpsc::Receiver<()>,
    release: mpsc::Sender<()>,
}

impl Gate {
    /// Wait until a write is blocked on the gate
    pub fn wait_entered(&self) {
        self.entered
            .recv_timeout(StdDuration::from_secs(5))
            .expect("no write reached the gate");
    }

    /// Let the next `writes` direct writes through
    pub fn release(&self, writes: usize) {
        for _ in 0..writes {
            self.release.send(()).unwrap();
        }
    }
}

pub fn gated(inner: MockController) -> (GatedController, Gate) {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let controller = GatedController {
        inner,
        entered: entered_tx,
        release: Arc::new(Mutex::new(release_rx)),
    };
    let gate = Gate {
        entered: entered_rx,
        release: release_tx,
    };
    (controller, gate)
}

impl AuraController for GatedController {
    type Device = u32;

    fn set_effect(
        &mut self,
        mode: EffectMode,
        effect_channel: u8,
        device: &u32,
    ) -> Result<(), TransportError> {
        self.inner.set_effect(mode, effect_channel, device)
    }

    fn set_direct(
        &mut self,
        colors: &[Rgb],
        start_led: u8,
        direct_channel: u8,
        apply: bool,
        device: &u32,
    ) -> Result<(), TransportError> {
        let result = self
            .inner
            .set_direct(colors, start_led, direct_channel, apply, device);
        self.entered.send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        result
    }
}

struct Timer {
    every: Duration,
    tolerance: Duration,
    cancelled: Arc<AtomicBool>,
    callback: Arc<Mutex<TickCallback>>,
}

/// Scheduler whose timers only fire when the test says so
#[derive(Clone, Default)]
pub struct ManualScheduler {
    timers: Arc<Mutex<Vec<Timer>>>,
}

pub struct ManualHandle {
    cancelled: Arc<AtomicBool>,
}

impl TickHandle for ManualHandle {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl PeriodicScheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, every: Duration, tolerance: Duration, callback: TickCallback) -> ManualHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.timers.lock().unwrap().push(Timer {
            every,
            tolerance,
            cancelled: cancelled.clone(),
            callback: Arc::new(Mutex::new(callback)),
        });
        ManualHandle { cancelled }
    }
}

impl ManualScheduler {
    /// Fire every live timer once
    pub fn fire(&self) {
        self.fire_where(false);
    }

    /// Fire every timer once, including cancelled ones
    pub fn fire_including_cancelled(&self) {
        self.fire_where(true);
    }

    pub fn fire_times(&self, times: usize) {
        for _ in 0..times {
            self.fire();
        }
    }

    fn fire_where(&self, include_cancelled: bool) {
        let callbacks: Vec<_> = self
            .timers
            .lock()
            .unwrap()
            .iter()
            .filter(|timer| include_cancelled || !timer.cancelled.load(Ordering::SeqCst))
            .map(|timer| timer.callback.clone())
            .collect();
        for callback in callbacks {
            let mut callback = callback.lock().unwrap();
            (*callback)();
        }
    }

    pub fn scheduled(&self) -> usize {
        self.timers.lock().unwrap().len()
    }

    pub fn active(&self) -> usize {
        self.timers
            .lock()
            .unwrap()
            .iter()
            .filter(|timer| !timer.cancelled.load(Ordering::SeqCst))
            .count()
    }

    pub fn periods(&self) -> Vec<(Duration, Duration)> {
        self.timers
            .lock()
            .unwrap()
            .iter()
            .map(|timer| (timer.every, timer.tolerance))
            .collect()
    }
}

/// Inhibitor that counts live guards
#[derive(Debug, Clone, Default)]
pub struct CountingInhibitor {
    pub active: Arc<AtomicUsize>,
    pub acquired: Arc<AtomicUsize>,
}

pub struct CountingGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for CountingGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SleepInhibitor for CountingInhibitor {
    type Guard = CountingGuard;

    fn inhibit(&self, _reason: &'static str) -> CountingGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        self.acquired.fetch_add(1, Ordering::SeqCst);
        CountingGuard {
            active: self.active.clone(),
        }
    }
}

impl CountingInhibitor {
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }
}
