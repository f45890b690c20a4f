//! Integration tests for the boot-time configuration gate and how the
//! chosen capability set shapes the control loop afterwards.

use irrigator::adapters::hardware::HardwareAdapter;
use irrigator::app::context::ControlContext;
use irrigator::app::events::{AppEvent, WateringTrigger};
use irrigator::app::ports::SensorPort;
use irrigator::app::service::ControlEngine;
use irrigator::capabilities::{self, CapabilitySet};
use irrigator::config::SystemConfig;
use irrigator::drivers::pump::{PumpDriver, PumpState};
use irrigator::sensors::{Probe, SensorHub, SimulatedProbe, Source};

use crate::mock_hw::{timeline, MockClock, MockHardware, MockRemote, RecordingSink, ScriptedConsole, Step};

struct Fixed(i32);

impl Probe for Fixed {
    fn sample(&mut self) -> i32 {
        self.0
    }
}

// ── Gate parsing ──────────────────────────────────────────────

#[test]
fn silence_enables_everything_after_twenty_seconds() {
    let config = SystemConfig::default();
    let mut console = ScriptedConsole::silent();

    let caps = capabilities::negotiate(&mut console, config.config_gate_timeout_ms);

    assert_eq!(caps, CapabilitySet::all());
    assert_eq!(console.requested_timeout_ms, Some(20_000));
}

#[test]
fn typed_selection_enables_only_named_subsystems() {
    let mut console = ScriptedConsole::typed("s,l\n");
    let caps = capabilities::negotiate(&mut console, 20_000);
    assert_eq!(
        caps,
        CapabilitySet {
            soil_enabled: true,
            light_enabled: true,
            pump_enabled: false,
        }
    );
}

#[test]
fn empty_line_disables_everything() {
    let mut console = ScriptedConsole::typed("");
    assert_eq!(capabilities::negotiate(&mut console, 20_000), CapabilitySet::none());
}

#[test]
fn tokens_are_case_insensitive_and_separator_free() {
    let mut console = ScriptedConsole::typed("PLS");
    assert_eq!(capabilities::negotiate(&mut console, 20_000), CapabilitySet::all());

    let mut console = ScriptedConsole::typed("no");
    assert_eq!(capabilities::negotiate(&mut console, 20_000), CapabilitySet::none());
}

// ── Effect on the loop ────────────────────────────────────────

#[test]
fn disabled_pump_simulates_the_pulse_without_driving_the_relay() {
    let config = SystemConfig::default();
    let mut console = ScriptedConsole::typed("s,l");
    let caps = capabilities::negotiate(&mut console, config.config_gate_timeout_ms);

    let log = timeline();
    let engine = ControlEngine::new(&config);
    let mut ctx = ControlContext::new(caps, &config).with_auto_mode(true);
    let mut hw = MockHardware::new(&log, 800, 1_200);
    let mut remote = MockRemote::new(&log);
    let mut clock = MockClock::at(&log, 0);
    let mut sink = RecordingSink::new();

    let out = engine.run_cycle(&mut ctx, &mut hw, &mut remote, &mut clock, &mut sink);

    assert!(out.auto_watered);
    let steps = log.borrow();
    assert!(!steps.iter().any(|s| matches!(s, Step::PumpOn | Step::PumpOff)));
    assert!(steps.contains(&Step::Sleep(5_000)));
    assert_eq!(ctx.cooldowns().water.last_ms(), Some(5_000));
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::WateringStarted { trigger: WateringTrigger::Auto, simulated: true }
        )),
        1
    );
}

#[test]
fn simulated_soil_never_triggers_auto_watering() {
    let config = SystemConfig::default();
    let caps = CapabilitySet::parse_selection("p,l");

    let hub = SensorHub::new(
        Source::<Fixed>::Simulated(SimulatedProbe::with_seed(config.soil_band(), 11)),
        Source::Live(Fixed(1_500)),
    );
    let mut hw = HardwareAdapter::new(hub, PumpDriver::new());

    let log = timeline();
    let engine = ControlEngine::new(&config);
    let mut ctx = ControlContext::new(caps, &config).with_auto_mode(true);
    let mut remote = MockRemote::new(&log);
    let mut clock = MockClock::at(&log, 0);
    let mut sink = RecordingSink::new();

    for _ in 0..20 {
        let out = engine.run_cycle(&mut ctx, &mut hw, &mut remote, &mut clock, &mut sink);
        assert!((990..1010).contains(&out.reading.soil));
        assert!(!out.auto_watered);
    }
    assert_eq!(hw.pump().starts(), 0);
    assert_eq!(hw.pump().state(), PumpState::Stopped);
}

#[test]
fn simulated_light_stays_in_band() {
    let config = SystemConfig::default();
    let hub = SensorHub::new(
        Source::Live(Fixed(700)),
        Source::<Fixed>::Simulated(SimulatedProbe::with_seed(config.light_band(), 3)),
    );
    let mut hw = HardwareAdapter::new(hub, PumpDriver::new());
    for _ in 0..50 {
        assert_eq!(hw.read_soil(), 700);
        assert!((1490..1510).contains(&hw.read_light()));
    }
}

#[test]
fn manual_command_drives_real_pump_driver() {
    let config = SystemConfig::default();
    let hub = SensorHub::new(Source::Live(Fixed(1_500)), Source::Live(Fixed(1_500)));
    let mut hw = HardwareAdapter::new(hub, PumpDriver::new());

    let log = timeline();
    let engine = ControlEngine::new(&config);
    let mut ctx = ControlContext::new(CapabilitySet::all(), &config);
    let mut remote = MockRemote::new(&log);
    remote.queue_command(true, None);
    let mut clock = MockClock::at(&log, 0);
    let mut sink = RecordingSink::new();

    let out = engine.run_cycle(&mut ctx, &mut hw, &mut remote, &mut clock, &mut sink);

    assert!(out.manual_watered);
    assert_eq!(hw.pump().starts(), 1);
    assert_eq!(hw.pump().state(), PumpState::Stopped);
}
