//! Control engine — the hexagonal core.
//!
//! [`ControlEngine`] holds the fixed thresholds and timings; all mutable
//! state lives in the caller-owned [`ControlContext`].  Every I/O effect
//! flows through port traits injected at call sites, making a full cycle
//! testable with mock adapters and a fake clock.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      ControlEngine     │
//! ActuatorPort ◀──│ sense · auto · poll ·  │◀──▶ RemotePort
//!                 │ report · sleep         │
//!   ClockPort ◀──▶└────────────────────────┘
//! ```
//!
//! ## Cycle order
//!
//! 1. Sense soil and light.
//! 2. Auto-water when auto mode is on, the soil probe is fitted, soil is
//!    strictly below threshold and the watering cooldown has elapsed.
//! 3. Poll for a command when the poll cooldown has elapsed.  `water_now`
//!    waters immediately, bypassing the watering cooldown.
//! 4. Routine report when the report cooldown has elapsed.
//! 5. Sleep one loop slice.
//!
//! Steps 2 and 3 are independent; both may water in the same cycle, and
//! each sends its own `is_watering = true` report outside the report
//! cooldown.

use log::debug;

use crate::config::SystemConfig;

use super::commands::RemoteCommand;
use super::context::{ControlContext, SensorReading};
use super::events::{AppEvent, TelemetryReport, WateringTrigger};
use super::ports::{ActuatorPort, ClockPort, EventSink, RemotePort, SensorPort};

// ───────────────────────────────────────────────────────────────
// Cycle outcome
// ───────────────────────────────────────────────────────────────

/// What one call to [`ControlEngine::run_cycle`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    pub reading: SensorReading,
    pub auto_watered: bool,
    pub manual_watered: bool,
    pub polled: bool,
    /// Routine (cooldown-gated) report attempted this cycle.
    pub reported: bool,
}

impl CycleOutcome {
    /// Whether any pulse ran this cycle.
    pub fn watered(&self) -> bool {
        self.auto_watered || self.manual_watered
    }
}

// ───────────────────────────────────────────────────────────────
// ControlEngine
// ───────────────────────────────────────────────────────────────

/// The decision-and-coordination loop.
#[derive(Debug, Clone)]
pub struct ControlEngine {
    soil_threshold: i32,
    pulse_ms: u64,
    loop_slice_ms: u64,
}

impl ControlEngine {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            soil_threshold: config.soil_threshold,
            pulse_ms: config.pulse_ms,
            loop_slice_ms: config.loop_slice_ms,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the starting state.  Call once before the first cycle.
    pub fn start(&self, ctx: &ControlContext, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            capabilities: ctx.capabilities(),
            auto_mode: ctx.auto_mode(),
        });
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn run_cycle(
        &self,
        ctx: &mut ControlContext,
        hw: &mut (impl SensorPort + ActuatorPort),
        remote: &mut impl RemotePort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        let cycle = ctx.next_cycle();

        // 1. Sense
        let reading = hw.read_all();
        let now = clock.now_ms();
        sink.emit(&AppEvent::CycleStarted { cycle, reading });

        let mut outcome = CycleOutcome {
            reading,
            ..CycleOutcome::default()
        };

        // 2. Automatic watering
        if self.auto_water_due(ctx, &reading, now) {
            outcome.auto_watered = true;
            self.report(remote, TelemetryReport::new(reading, true), sink);
            self.water(ctx, WateringTrigger::Auto, hw, clock, sink);
        }

        // 3. Command poll (independent of step 2)
        if ctx.cooldowns().poll.is_ready(now) {
            ctx.cooldowns_mut().poll.record(now);
            outcome.polled = true;
            let cmd = self.poll(ctx, remote, sink);
            if cmd.water_now {
                outcome.manual_watered = true;
                self.report(remote, TelemetryReport::new(reading, true), sink);
                self.water(ctx, WateringTrigger::Manual, hw, clock, sink);
            }
        }

        // 4. Routine report
        if ctx.cooldowns().report.is_ready(now) {
            ctx.cooldowns_mut().report.record(now);
            outcome.reported = true;
            self.report(remote, TelemetryReport::new(reading, outcome.watered()), sink);
        }

        // 5. Fixed slice
        clock.sleep_ms(self.loop_slice_ms);
        outcome
    }

    /// The automatic-watering predicate (step 2).
    pub fn auto_water_due(&self, ctx: &ControlContext, reading: &SensorReading, now_ms: u64) -> bool {
        ctx.auto_mode()
            && ctx.capabilities().soil_enabled
            && reading.soil < self.soil_threshold
            && ctx.cooldowns().water.is_ready(now_ms)
    }

    // ── Internal ──────────────────────────────────────────────

    /// One blocking pulse.  A disabled pump still takes the full pulse
    /// time and records the cooldown.
    fn water(
        &self,
        ctx: &mut ControlContext,
        trigger: WateringTrigger,
        hw: &mut impl ActuatorPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let simulated = !ctx.capabilities().pump_enabled;
        sink.emit(&AppEvent::WateringStarted { trigger, simulated });

        if simulated {
            clock.sleep_ms(self.pulse_ms);
        } else {
            hw.set_pump(true);
            clock.sleep_ms(self.pulse_ms);
            hw.set_pump(false);
        }

        let at_ms = clock.now_ms();
        ctx.cooldowns_mut().water.record(at_ms);
        sink.emit(&AppEvent::WateringFinished { trigger, at_ms });
    }

    /// Poll the coordinator and apply any auto-mode change.  Failures read
    /// as "no command" and leave auto mode untouched.
    fn poll(
        &self,
        ctx: &mut ControlContext,
        remote: &mut impl RemotePort,
        sink: &mut impl EventSink,
    ) -> RemoteCommand {
        let cmd = match remote.poll_command() {
            Ok(cmd) => cmd,
            Err(error) => {
                sink.emit(&AppEvent::PollFailed(error));
                return RemoteCommand::none();
            }
        };
        sink.emit(&AppEvent::CommandReceived(cmd));

        if let Some(enabled) = cmd.auto_enabled {
            if enabled != ctx.auto_mode() {
                ctx.set_auto_mode(enabled);
                sink.emit(&AppEvent::AutoModeChanged { enabled });
            }
        }
        cmd
    }

    fn report(&self, remote: &mut impl RemotePort, report: TelemetryReport, sink: &mut impl EventSink) {
        match remote.report_telemetry(&report) {
            Ok(()) => sink.emit(&AppEvent::TelemetrySent(report)),
            Err(error) => {
                debug!("report dropped: {}", error);
                sink.emit(&AppEvent::TelemetryFailed { report, error });
            }
        }
    }
}
