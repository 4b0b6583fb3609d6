//! Host capabilities used by the effect runner
//!
//! The runner never touches a platform timer or power API directly.
//! Hosts plug in their own run loop and idle-sleep handling.

use alloc::boxed::Box;

use embassy_time::Duration;

/// Callback fired on every timer period
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Handle of an armed periodic timer
pub trait TickHandle {
    /// Stop future firings. A callback already running is not interrupted.
    fn cancel(&mut self);
}

/// Periodic timer source
pub trait PeriodicScheduler {
    type Handle: TickHandle;

    /// Arm a timer firing `callback` every `every`, with the given tolerance
    ///
    /// Firings must never overlap.
    fn schedule(&self, every: Duration, tolerance: Duration, callback: TickCallback) -> Self::Handle;
}

/// Keeps the host from idle-sleeping while an animation runs
///
/// The returned guard releases the inhibition when dropped.
pub trait SleepInhibitor {
    type Guard;

    fn inhibit(&self, reason: &'static str) -> Self::Guard;
}

/// Inhibitor for hosts without power management
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSleepInhibitor;

impl SleepInhibitor for NoSleepInhibitor {
    type Guard = ();

    fn inhibit(&self, _reason: &'static str) -> Self::Guard {}
}
