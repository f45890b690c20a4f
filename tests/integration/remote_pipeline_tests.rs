//! End-to-end cycles through the real `RemoteChannel`, with only the HTTP
//! layer mocked.  Checks what actually goes over the wire and how
//! coordinator replies feed back into the loop.

use irrigator::app::context::ControlContext;
use irrigator::app::events::AppEvent;
use irrigator::app::ports::RemoteError;
use irrigator::app::service::ControlEngine;
use irrigator::capabilities::CapabilitySet;
use irrigator::config::SystemConfig;
use irrigator::remote::RemoteChannel;

use crate::mock_hw::{timeline, MockClock, MockHardware, MockTransport, RecordingSink, Step};

const SENSOR_URL: &str = "http://192.168.4.2:3000/sensor";
const COMMAND_URL: &str = "http://192.168.4.2:3000/api/command";

struct Rig {
    engine: ControlEngine,
    ctx: ControlContext,
    hw: MockHardware,
    remote: RemoteChannel<MockTransport>,
    clock: MockClock,
    sink: RecordingSink,
}

impl Rig {
    fn new(transport: MockTransport, auto: bool, soil: i32) -> Self {
        let config = SystemConfig::default();
        let log = timeline();
        Self {
            engine: ControlEngine::new(&config),
            ctx: ControlContext::new(CapabilitySet::all(), &config).with_auto_mode(auto),
            hw: MockHardware::new(&log, soil, 1_500),
            remote: RemoteChannel::new(transport, SENSOR_URL, COMMAND_URL),
            clock: MockClock::at(&log, 0),
            sink: RecordingSink::new(),
        }
    }

    fn cycle(&mut self) {
        self.engine
            .run_cycle(&mut self.ctx, &mut self.hw, &mut self.remote, &mut self.clock, &mut self.sink);
    }

    fn posted_bodies(&self) -> Vec<String> {
        self.remote
            .transport()
            .posted
            .iter()
            .map(|(_, body)| String::from_utf8_lossy(body).into_owned())
            .collect()
    }
}

#[test]
fn routine_report_is_compact_json_to_sensor_url() {
    let mut rig = Rig::new(MockTransport::new(), false, 1_200);
    rig.cycle();

    let t = rig.remote.transport();
    assert_eq!(t.posted.len(), 1);
    assert_eq!(t.posted[0].0, SENSOR_URL);
    assert_eq!(
        rig.posted_bodies()[0],
        r#"{"soil":1200,"light":1500,"is_watering":false}"#
    );
    assert_eq!(t.fetched, vec![COMMAND_URL.to_owned()]);
}

#[test]
fn coordinator_command_waters_and_disables_auto() {
    let mut transport = MockTransport::new();
    transport.reply(200, r#"{"water_now":true,"auto_enabled":false}"#);
    let mut rig = Rig::new(transport, true, 1_200);

    rig.cycle();

    assert!(!rig.ctx.auto_mode());
    assert_eq!(
        rig.posted_bodies(),
        vec![
            r#"{"soil":1200,"light":1500,"is_watering":true}"#.to_owned(),
            r#"{"soil":1200,"light":1500,"is_watering":true}"#.to_owned(),
        ]
    );
}

#[test]
fn non_200_poll_is_treated_as_no_command() {
    let mut transport = MockTransport::new();
    transport.reply(204, r#"{"water_now":true}"#);
    transport.reply(500, "oops");
    let mut rig = Rig::new(transport, false, 1_200);

    rig.cycle();
    rig.cycle();

    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::PollFailed(RemoteError::Status(_)))),
        2
    );
    assert!(rig.posted_bodies().iter().all(|b| b.contains(r#""is_watering":false"#)));
}

#[test]
fn garbage_command_body_changes_nothing() {
    let mut transport = MockTransport::new();
    transport.reply(200, "<html>503</html>");
    let mut rig = Rig::new(transport, true, 1_200);

    rig.cycle();

    assert!(rig.ctx.auto_mode());
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::PollFailed(RemoteError::Malformed))),
        1
    );
}

#[test]
fn rejected_telemetry_surfaces_status_and_loop_continues() {
    let mut transport = MockTransport::new();
    transport.post_status = 503;
    let mut rig = Rig::new(transport, true, 700);

    rig.cycle();

    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::TelemetryFailed { error: RemoteError::Status(503), .. }
        )),
        2
    );
    assert_eq!(rig.ctx.cooldowns().water.last_ms(), Some(5_000));
    assert_eq!(rig.ctx.cycle_count(), 1);
}

#[test]
fn pump_edges_bracket_the_pulse() {
    let log = timeline();
    let config = SystemConfig::default();
    let engine = ControlEngine::new(&config);
    let mut ctx = ControlContext::new(CapabilitySet::all(), &config).with_auto_mode(true);
    let mut hw = MockHardware::new(&log, 500, 1_500);
    let mut remote = RemoteChannel::new(MockTransport::new(), SENSOR_URL, COMMAND_URL);
    let mut clock = MockClock::at(&log, 0);
    let mut sink = RecordingSink::new();

    engine.run_cycle(&mut ctx, &mut hw, &mut remote, &mut clock, &mut sink);

    assert_eq!(
        *log.borrow(),
        vec![Step::PumpOn, Step::Sleep(5_000), Step::PumpOff, Step::Sleep(1_000)]
    );
}

#[test]
fn null_auto_enabled_turns_auto_mode_off() {
    let mut transport = MockTransport::new();
    transport.reply(200, r#"{"water_now":false,"auto_enabled":null}"#);
    transport.reply(200, r#"{"water_now":false}"#);
    let mut rig = Rig::new(transport, true, 1_200);

    rig.cycle();
    assert!(!rig.ctx.auto_mode());
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::AutoModeChanged { enabled: false })), 1);

    // Absent key stays sticky.
    rig.cycle();
    assert!(!rig.ctx.auto_mode());
}
