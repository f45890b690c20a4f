//! Integration tests for the ControlEngine → ports pipeline.
//!
//! Whole cycles run against the recording mocks with virtual time, so
//! the order of reports, polls and pump edges is asserted exactly.

use irrigator::app::context::ControlContext;
use irrigator::app::events::{AppEvent, TelemetryReport, WateringTrigger};
use irrigator::app::ports::{ActuatorPort, RemoteError};
use irrigator::app::service::{ControlEngine, CycleOutcome};
use irrigator::capabilities::CapabilitySet;
use irrigator::config::SystemConfig;

use crate::mock_hw::{timeline, MockClock, MockHardware, MockRemote, RecordingSink, Step, Timeline};

const LIGHT: i32 = 1_234;
const WET: i32 = 1_005;

struct Rig {
    log: Timeline,
    engine: ControlEngine,
    ctx: ControlContext,
    hw: MockHardware,
    remote: MockRemote,
    clock: MockClock,
    sink: RecordingSink,
}

impl Rig {
    fn new(caps: CapabilitySet, auto: bool, soil: i32) -> Self {
        let config = SystemConfig::default();
        let log = timeline();
        Self {
            engine: ControlEngine::new(&config),
            ctx: ControlContext::new(caps, &config).with_auto_mode(auto),
            hw: MockHardware::new(&log, soil, LIGHT),
            remote: MockRemote::new(&log),
            clock: MockClock::at(&log, 0),
            sink: RecordingSink::new(),
            log,
        }
    }

    fn cycle(&mut self) -> CycleOutcome {
        self.engine
            .run_cycle(&mut self.ctx, &mut self.hw, &mut self.remote, &mut self.clock, &mut self.sink)
    }

    /// Drain the timeline recorded so far.
    fn take_steps(&self) -> Vec<Step> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    fn pump_starts(&self) -> usize {
        self.log.borrow().iter().filter(|s| **s == Step::PumpOn).count()
    }
}

fn report(soil: i32, is_watering: bool) -> Step {
    Step::Report(TelemetryReport {
        soil,
        light: LIGHT,
        is_watering,
    })
}

// ── Automatic watering ────────────────────────────────────────

#[test]
fn dry_soil_reports_then_pulses_then_records_cooldown() {
    let mut rig = Rig::new(CapabilitySet::all(), true, 800);

    let out = rig.cycle();

    assert!(out.auto_watered);
    assert!(!out.manual_watered);
    assert_eq!(
        rig.take_steps(),
        vec![
            report(800, true),
            Step::PumpOn,
            Step::Sleep(5_000),
            Step::PumpOff,
            Step::Poll,
            report(800, true),
            Step::Sleep(1_000),
        ]
    );
    assert_eq!(rig.ctx.cooldowns().water.last_ms(), Some(5_000));
    assert!(!rig.hw.is_pump_on());
}

#[test]
fn soil_at_or_above_threshold_never_auto_waters() {
    for soil in [1_000, 1_001, 4_095] {
        let mut rig = Rig::new(CapabilitySet::all(), true, soil);
        let out = rig.cycle();
        assert!(!out.auto_watered, "soil={soil} must not trigger");
        assert_eq!(rig.pump_starts(), 0);
    }
}

#[test]
fn auto_mode_off_never_waters() {
    let mut rig = Rig::new(CapabilitySet::all(), false, 10);
    for _ in 0..5 {
        assert!(!rig.cycle().watered());
    }
    assert_eq!(rig.pump_starts(), 0);
    assert_eq!(rig.ctx.cooldowns().water.last_ms(), None);
}

#[test]
fn disabled_soil_probe_never_auto_waters() {
    let caps = CapabilitySet {
        soil_enabled: false,
        ..CapabilitySet::all()
    };
    let mut rig = Rig::new(caps, true, 10);
    assert!(!rig.cycle().auto_watered);
}

#[test]
fn watering_cooldown_gates_auto_until_exactly_sixty_seconds() {
    let mut rig = Rig::new(CapabilitySet::all(), true, 800);
    assert!(rig.cycle().auto_watered);
    let last = rig.ctx.cooldowns().water.last_ms().unwrap();

    rig.clock.now = last + 59_999;
    assert!(!rig.cycle().auto_watered);

    rig.clock.now = last + 60_000;
    assert!(rig.cycle().auto_watered);
    assert_eq!(rig.pump_starts(), 2);
}

// ── Manual watering and auto-mode changes ─────────────────────

#[test]
fn manual_water_ignores_cooldown_and_soil_capability() {
    let caps = CapabilitySet {
        soil_enabled: false,
        ..CapabilitySet::all()
    };
    let mut rig = Rig::new(caps, false, WET);
    rig.remote.queue_command(true, None);
    rig.remote.queue_command(true, None);

    assert!(rig.cycle().manual_watered);
    assert!(rig.cycle().manual_watered, "second pulse well inside 60 s");
    assert_eq!(rig.pump_starts(), 2);
}

#[test]
fn water_now_with_auto_disable_does_both_in_one_cycle() {
    let mut rig = Rig::new(CapabilitySet::all(), true, WET);
    rig.remote.queue_command(true, Some(false));

    let out = rig.cycle();

    assert!(!rig.ctx.auto_mode());
    assert!(out.manual_watered);
    assert!(!out.auto_watered);
    assert_eq!(
        rig.take_steps(),
        vec![
            Step::Poll,
            report(WET, true),
            Step::PumpOn,
            Step::Sleep(5_000),
            Step::PumpOff,
            report(WET, true),
            Step::Sleep(1_000),
        ]
    );
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::AutoModeChanged { enabled: false })), 1);
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::WateringFinished { trigger: WateringTrigger::Manual, .. }
        )),
        1
    );
}

#[test]
fn omitted_auto_enabled_is_sticky() {
    let mut rig = Rig::new(CapabilitySet::all(), true, WET);
    rig.remote.queue_command(false, None);
    rig.cycle();
    assert!(rig.ctx.auto_mode());

    rig.remote.queue_command(false, Some(false));
    rig.cycle();
    assert!(!rig.ctx.auto_mode());

    rig.remote.queue_command(false, None);
    rig.cycle();
    assert!(!rig.ctx.auto_mode());

    rig.remote.queue_command(false, Some(true));
    rig.cycle();
    assert!(rig.ctx.auto_mode());
}

#[test]
fn repeated_auto_enabled_emits_no_change_event() {
    let mut rig = Rig::new(CapabilitySet::all(), true, WET);
    rig.remote.queue_command(false, Some(true));
    rig.cycle();
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::AutoModeChanged { .. })), 0);
}

#[test]
fn poll_failure_changes_nothing() {
    for auto in [true, false] {
        let mut rig = Rig::new(CapabilitySet::all(), auto, WET);
        rig.remote.queue_poll(Err(RemoteError::Transport));
        rig.remote.queue_poll(Err(RemoteError::Malformed));
        rig.remote.queue_poll(Err(RemoteError::Status(404)));

        for _ in 0..3 {
            assert!(!rig.cycle().watered());
        }
        assert_eq!(rig.ctx.auto_mode(), auto);
        assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::PollFailed(_))), 3);
    }
}

// ── Reporting ─────────────────────────────────────────────────

#[test]
fn routine_report_suppressed_inside_five_seconds() {
    let mut rig = Rig::new(CapabilitySet::all(), false, WET);

    let first = rig.cycle();
    let second = rig.cycle();
    assert!(first.reported);
    assert!(!second.reported);
    assert_eq!(rig.remote.reports.len(), 1);

    // Cycles at t = 2, 3, 4 s stay quiet; t = 5 s reports again.
    for _ in 0..3 {
        assert!(!rig.cycle().reported);
    }
    assert_eq!(rig.clock.now, 5_000);
    assert!(rig.cycle().reported);
    assert_eq!(rig.remote.reports.len(), 2);
    assert!(rig.remote.reports.iter().all(|r| !r.is_watering));
}

#[test]
fn auto_and_manual_in_one_cycle_send_three_reports() {
    let mut rig = Rig::new(CapabilitySet::all(), true, 800);
    rig.remote.queue_command(true, None);

    let out = rig.cycle();

    assert!(out.auto_watered && out.manual_watered);
    assert_eq!(rig.remote.reports.len(), 3);
    assert!(rig.remote.reports.iter().all(|r| r.is_watering));
    assert_eq!(rig.pump_starts(), 2);
    assert_eq!(rig.ctx.cooldowns().water.last_ms(), Some(10_000));
    assert_eq!(rig.clock.now, 11_000);
}

#[test]
fn poll_cooldown_allows_one_poll_per_half_second() {
    let mut rig = Rig::new(CapabilitySet::all(), false, WET);
    for _ in 0..4 {
        assert!(rig.cycle().polled);
    }
    assert_eq!(rig.remote.poll_count, 4);
}

// ── Failure isolation ─────────────────────────────────────────

#[test]
fn offline_coordinator_still_waters_and_releases_pump() {
    let log = timeline();
    let config = SystemConfig::default();
    let engine = ControlEngine::new(&config);
    let mut ctx = ControlContext::new(CapabilitySet::all(), &config).with_auto_mode(true);
    let mut hw = MockHardware::new(&log, 800, LIGHT);
    let mut remote = MockRemote::offline(&log);
    let mut clock = MockClock::at(&log, 0);
    let mut sink = RecordingSink::new();

    let out = engine.run_cycle(&mut ctx, &mut hw, &mut remote, &mut clock, &mut sink);

    assert!(out.auto_watered);
    assert!(!hw.is_pump_on());
    assert!(ctx.auto_mode());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::TelemetryFailed { .. })), 2);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::PollFailed(RemoteError::Transport))), 1);
    let steps = log.borrow();
    let last_pump = steps
        .iter()
        .rev()
        .find(|s| matches!(s, Step::PumpOn | Step::PumpOff));
    assert_eq!(last_pump, Some(&Step::PumpOff));
}

#[test]
fn start_announces_capabilities_and_auto_mode() {
    let mut rig = Rig::new(CapabilitySet::all(), false, WET);
    rig.engine.start(&rig.ctx, &mut rig.sink);
    assert!(matches!(
        rig.sink.events.first(),
        Some(AppEvent::Started { auto_mode: false, .. })
    ));
}

#[test]
fn cycle_counter_advances() {
    let mut rig = Rig::new(CapabilitySet::all(), false, WET);
    rig.cycle();
    rig.cycle();
    assert_eq!(rig.ctx.cycle_count(), 2);
    assert!(matches!(
        rig.sink.events.iter().rev().find(|e| matches!(e, AppEvent::CycleStarted { .. })),
        Some(AppEvent::CycleStarted { cycle: 2, .. })
    ));
}
