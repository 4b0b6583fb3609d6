//! Effect runner
//!
//! Owns the active command and the target zones, and pushes one frame per
//! zone on every tick. Animated commands are re-rendered by a periodic
//! timer provided by the host; static commands are written once.

use alloc::boxed::Box;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;

use crate::command::{Command, CommandKind};
use crate::controller::{AuraController, EffectMode};
use crate::device::{AuraDevice, Zone, ZoneKind};
use crate::error::TransportError;
use crate::scheduler::{PeriodicScheduler, SleepInhibitor, TickHandle};

/// Default tick period (100 Hz)
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Maximum number of LED colors carried by one direct report
pub const LEDS_PER_REPORT: usize = 20;

const INHIBIT_REASON: &str = "Animating RGBs";

/// Configuration for the effect runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Period of the animation timer
    pub tick_interval: Duration,
    /// Allowed timer slack
    pub tick_tolerance: Duration,
    /// Stop the run after this many consecutive ticks with a failed write.
    /// `None` keeps running regardless of failures.
    pub halt_after_failures: Option<u32>,
}

pub const DEFAULT_RUNNER_CONFIG: RunnerConfig = RunnerConfig {
    tick_interval: DEFAULT_TICK_INTERVAL,
    tick_tolerance: DEFAULT_TICK_INTERVAL,
    halt_after_failures: None,
};

impl Default for RunnerConfig {
    fn default() -> Self {
        DEFAULT_RUNNER_CONFIG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Step the frame was rendered for
    pub step: u64,
    /// Controller calls issued
    pub writes: usize,
    /// Controller calls that failed
    pub failures: usize,
}

impl TickReport {
    fn record(&mut self, result: Result<(), TransportError>, zone: &Zone) {
        self.writes += 1;
        if let Err(err) = result {
            self.failures += 1;
            tracing::warn!(
                zone = zone.name().unwrap_or("unnamed"),
                effect_channel = zone.effect_channel,
                direct_channel = zone.direct_channel,
                "controller write failed: {}",
                err
            );
        }
    }
}

/// Device snapshot and command of one run
///
/// Shared with the tick that is writing it, so a restart never waits for
/// an in-flight frame.
struct Frame<D> {
    command: Command,
    hid: D,
    zones: Vec<Zone>,
}

impl<D> Frame<D> {
    fn render<C: AuraController<Device = D>>(&self, controller: &mut C, step: u64) -> TickReport {
        let mut report = TickReport {
            step,
            ..TickReport::default()
        };

        for zone in &self.zones {
            match zone.kind {
                ZoneKind::Fixed => {
                    // Re-sent every tick, even though the mode never changes
                    let result =
                        controller.set_effect(EffectMode::Direct, zone.effect_channel, &self.hid);
                    report.record(result, zone);
                }
                ZoneKind::Addressable => {
                    let colors = self.command.colors_for(usize::from(zone.led_count), step);
                    let last = colors.len().div_ceil(LEDS_PER_REPORT).saturating_sub(1);
                    // led_count is a u8, so every chunk starts at or below 240
                    let offsets = (0..=u8::MAX).step_by(LEDS_PER_REPORT);
                    let chunks = colors.chunks(LEDS_PER_REPORT).enumerate().zip(offsets);
                    for ((index, chunk), start_led) in chunks {
                        let result = controller.set_direct(
                            chunk,
                            start_led,
                            zone.direct_channel,
                            index == last,
                            &self.hid,
                        );
                        report.record(result, zone);
                    }
                }
            }
        }

        report
    }
}

/// Timer and idle-sleep guard taken out of a run
///
/// Released after the runner mutex is unlocked, since both call into the
/// host.
#[must_use]
struct Detached<H: TickHandle, G> {
    timer: Option<H>,
    inhibit: Option<G>,
}

impl<H: TickHandle, G> Detached<H, G> {
    fn release(self) {
        if let Some(mut timer) = self.timer {
            timer.cancel();
        }
        drop(self.inhibit);
    }
}

/// One frame claimed for writing, together with the controller
struct Job<C: AuraController> {
    controller: C,
    frame: Arc<Frame<C::Device>>,
    step: u64,
    generation: u64,
}

/// Mutable run state, guarded by the runner mutex
struct Run<C: AuraController, H: TickHandle, G> {
    /// `None` while a frame is being written
    controller: Option<C>,
    frame: Option<Arc<Frame<C::Device>>>,
    step: u64,
    /// Bumped on every start/stop so stale timer callbacks are ignored
    generation: u64,
    /// The first frame of the current run has not been written yet
    pending: bool,
    timer: Option<H>,
    inhibit: Option<G>,
    consecutive_failures: u32,
}

impl<C: AuraController, H: TickHandle, G> Run<C, H, G> {
    fn stop(&mut self) -> Detached<H, G> {
        self.frame = None;
        self.pending = false;
        self.generation = self.generation.wrapping_add(1);
        Detached {
            timer: self.timer.take(),
            inhibit: self.inhibit.take(),
        }
    }

    /// Take the controller for the next frame of the current run
    fn claim(&mut self) -> Option<Job<C>> {
        let frame = self.frame.clone()?;
        let controller = self.controller.take()?;
        self.pending = false;
        Some(Job {
            controller,
            frame,
            step: self.step,
            generation: self.generation,
        })
    }
}

/// Effect runner
///
/// Created through [`EffectRunner::new`], which returns an `Arc` so timer
/// callbacks can refer back to the runner without keeping it alive.
///
/// The mutex only guards swapping run state in and out; controller writes
/// and host timer calls happen with it unlocked. At most one frame is
/// written at a time: a timer tick that finds the controller busy is
/// skipped, and a `start` that finds it busy leaves its first frame to the
/// tick that currently holds the controller.
pub struct EffectRunner<C: AuraController, S: PeriodicScheduler, I: SleepInhibitor> {
    this: Weak<Self>,
    scheduler: S,
    inhibitor: I,
    config: RunnerConfig,
    run: Mutex<CriticalSectionRawMutex, RefCell<Run<C, S::Handle, I::Guard>>>,
}

impl<C, S, I> EffectRunner<C, S, I>
where
    C: AuraController + Send + 'static,
    C::Device: Clone + Send + Sync + 'static,
    S: PeriodicScheduler + Send + Sync + 'static,
    S::Handle: Send + 'static,
    I: SleepInhibitor + Send + Sync + 'static,
    I::Guard: Send + 'static,
{
    pub fn new(controller: C, scheduler: S, inhibitor: I, config: RunnerConfig) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            scheduler,
            inhibitor,
            config,
            run: Mutex::new(RefCell::new(Run {
                controller: Some(controller),
                frame: None,
                step: 0,
                generation: 0,
                pending: false,
                timer: None,
                inhibit: None,
                consecutive_failures: 0,
            })),
        })
    }

    /// Start running `command` on `device`
    ///
    /// Replaces any previous run. The first frame is written before this
    /// returns and its report is returned, unless another thread is in the
    /// middle of a write; then that thread writes the first frame and the
    /// returned report is empty.
    pub fn start(&self, command: Command, device: &AuraDevice<C::Device>) -> TickReport {
        let animated = command.is_animated();
        let zones = device.zones();
        tracing::debug!(
            kind = ?command.kind(),
            zones = zones.len(),
            animated,
            "starting effect run on {}",
            device.name()
        );
        let frame = Arc::new(Frame {
            command,
            hid: device.hid().clone(),
            zones,
        });

        let (previous, job, generation) = self.run.lock(|cell| {
            let mut run = cell.borrow_mut();
            let previous = run.stop();
            run.frame = Some(frame);
            run.step = 0;
            run.consecutive_failures = 0;
            run.pending = true;
            (previous, run.claim(), run.generation)
        });
        previous.release();

        let report = match job {
            Some(job) => self.execute(job),
            None => {
                tracing::trace!(generation, "controller busy, deferring first frame");
                TickReport::default()
            }
        };

        if animated && self.is_current(generation) {
            let armed = Detached {
                timer: Some(self.arm(generation)),
                inhibit: Some(self.inhibitor.inhibit(INHIBIT_REASON)),
            };
            let rejected = self.run.lock(|cell| {
                let mut run = cell.borrow_mut();
                if run.generation != generation {
                    return Some(armed);
                }
                run.timer = armed.timer;
                run.inhibit = armed.inhibit;
                None
            });
            if let Some(rejected) = rejected {
                rejected.release();
            }
        }

        report
    }

    fn is_current(&self, generation: u64) -> bool {
        self.run.lock(|cell| cell.borrow().generation == generation)
    }

    fn arm(&self, generation: u64) -> S::Handle {
        let runner = self.this.clone();
        self.scheduler.schedule(
            self.config.tick_interval,
            self.config.tick_tolerance,
            Box::new(move || {
                if let Some(runner) = runner.upgrade() {
                    runner.scheduled_tick(generation);
                }
            }),
        )
    }

    fn scheduled_tick(&self, generation: u64) {
        let job = self.run.lock(|cell| {
            let mut run = cell.borrow_mut();
            if run.generation != generation {
                tracing::trace!(generation, "ignoring stale tick");
                return None;
            }
            let job = run.claim();
            if job.is_none() {
                tracing::trace!(step = run.step, "previous frame still being written");
            }
            job
        });
        if let Some(job) = job {
            self.execute(job);
        }
    }

    /// Write a claimed frame, then any first frame deferred while it was
    /// being written
    fn execute(&self, job: Job<C>) -> TickReport {
        let (report, mut next) = self.write_frame(job);
        while let Some(job) = next {
            next = self.write_frame(job).1;
        }
        report
    }

    fn write_frame(&self, job: Job<C>) -> (TickReport, Option<Job<C>>) {
        let Job {
            mut controller,
            frame,
            step,
            generation,
        } = job;
        let report = frame.render(&mut controller, step);
        drop(frame);

        let (next, halted) = self.run.lock(|cell| {
            let mut run = cell.borrow_mut();
            run.controller = Some(controller);
            let mut halted = None;
            if run.generation == generation {
                run.step += 1;
                halted = self.check_failures(&mut run, &report);
            }
            let next = if run.pending { run.claim() } else { None };
            (next, halted)
        });
        if let Some(halted) = halted {
            halted.release();
        }
        (report, next)
    }

    fn check_failures(
        &self,
        run: &mut Run<C, S::Handle, I::Guard>,
        report: &TickReport,
    ) -> Option<Detached<S::Handle, I::Guard>> {
        if report.failures == 0 {
            run.consecutive_failures = 0;
            return None;
        }
        run.consecutive_failures = run.consecutive_failures.saturating_add(1);

        let limit = self.config.halt_after_failures?;
        if run.consecutive_failures < limit {
            return None;
        }
        tracing::error!(
            failures = run.consecutive_failures,
            step = report.step,
            "halting effect run after repeated transport failures"
        );
        Some(run.stop())
    }
}

impl<C: AuraController, S: PeriodicScheduler, I: SleepInhibitor> EffectRunner<C, S, I> {
    /// Stop the current run
    ///
    /// Cancels the timer and releases the idle-sleep guard. Safe to call
    /// when idle. A frame already being written is finished but not
    /// followed by another.
    pub fn stop(&self) {
        let detached = self.run.lock(|cell| {
            let mut run = cell.borrow_mut();
            if run.frame.is_some() {
                tracing::debug!(step = run.step, "stopping effect run");
            }
            run.stop()
        });
        detached.release();
    }

    pub fn state(&self) -> RunnerState {
        self.run.lock(|cell| {
            if cell.borrow().frame.is_some() {
                RunnerState::Running
            } else {
                RunnerState::Idle
            }
        })
    }

    /// Whether a periodic timer is armed
    pub fn is_animating(&self) -> bool {
        self.run.lock(|cell| cell.borrow().timer.is_some())
    }

    /// Step the next tick will render
    pub fn step(&self) -> u64 {
        self.run.lock(|cell| cell.borrow().step)
    }

    pub fn command_kind(&self) -> Option<CommandKind> {
        self.run
            .lock(|cell| cell.borrow().frame.as_ref().map(|frame| frame.command.kind()))
    }

    /// Number of consecutive ticks that had at least one failed write
    pub fn consecutive_failures(&self) -> u32 {
        self.run.lock(|cell| cell.borrow().consecutive_failures)
    }

    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run `f` with exclusive access to the controller
    ///
    /// Returns `None` when a frame is being written. `f` runs with the
    /// runner mutex held and must not call back into the runner.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        self.run
            .lock(|cell| cell.borrow_mut().controller.as_mut().map(f))
    }
}

impl<C: AuraController, S: PeriodicScheduler, I: SleepInhibitor> Drop for EffectRunner<C, S, I> {
    fn drop(&mut self) {
        self.run.get_mut().get_mut().stop().release();
    }
}
