//! Scheduler tests: full poll cycles against mock adapters.

use cosmon::app::events::MonitorEvent;
use cosmon::config::{CosmonConfig, SHUTDOWN_GRACE_MS};
use cosmon::monitor::UnkeyReason;
use cosmon::scheduler::{RunState, Scheduler};
use embedded_hal::digital::PinState;

use crate::mock_hw::{GatewayCall, MockBoard, MockClock, MockGateway, Rig, ScriptedProbe};

fn config() -> CosmonConfig {
    CosmonConfig::default()
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_up_unkeys_even_when_cos_already_active() {
    let mut rig = Rig::new();
    rig.board.cos = true;
    let mut sched = rig.start(&config());

    assert_eq!(rig.gateway.calls, vec![GatewayCall::Unkey]);
    assert_eq!(rig.board.led_writes, vec![PinState::High]);
    assert_eq!(
        rig.sink.events,
        vec![MonitorEvent::Started { cos_active: true }]
    );

    // Already-active COS at start-up is not an edge.
    for _ in 0..10 {
        rig.tick(&mut sched);
    }
    assert_eq!(rig.gateway.calls, vec![GatewayCall::Unkey]);
}

#[test]
fn start_up_failure_on_led_write_is_fatal() {
    struct DeadLed;

    impl cosmon::app::ports::GpioPort for DeadLed {
        fn read_cos(&mut self) -> Result<bool, cosmon::error::GpioError> {
            Ok(false)
        }
        fn read_shutdown_pressed(&mut self) -> Result<bool, cosmon::error::GpioError> {
            Ok(false)
        }
        fn write_network_led(&mut self, _: PinState) -> Result<(), cosmon::error::GpioError> {
            Err(cosmon::error::GpioError::WriteFailed("network LED"))
        }
    }

    let mut gateway = MockGateway::new();
    let mut sink = crate::mock_hw::RecordingSink::new();
    let result = Scheduler::start(&config(), &mut DeadLed, &mut gateway, &mut sink);
    assert!(result.is_err());
    assert!(gateway.calls.is_empty());
}

// ── COS ───────────────────────────────────────────────────────

#[test]
fn stuck_carrier_is_unkeyed_after_1500_ticks() {
    let mut rig = Rig::new();
    let mut sched = rig.start(&config());
    rig.gateway.calls.clear();

    let mut seen = Vec::new();
    rig.board.cos = true;
    for t in 0..=2000u32 {
        let before = rig.gateway.calls.len();
        rig.tick(&mut sched);
        for call in &rig.gateway.calls[before..] {
            seen.push((t, *call));
        }
    }

    assert_eq!(
        seen,
        vec![(0, GatewayCall::Key), (1500, GatewayCall::Unkey)]
    );
    assert!(rig.sink.events.contains(&MonitorEvent::Unkeyed(UnkeyReason::TimedOut)));
    assert!(!sched.watchdog().is_armed());
}

#[test]
fn release_unkeys_and_next_carrier_keys_again() {
    let mut rig = Rig::new();
    let mut sched = rig.start(&config());
    rig.gateway.calls.clear();

    for level in [true, true, false, false, true] {
        rig.board.cos = level;
        rig.tick(&mut sched);
    }

    assert_eq!(
        rig.gateway.calls,
        vec![GatewayCall::Key, GatewayCall::Unkey, GatewayCall::Key]
    );
    assert!(rig.sink.events.contains(&MonitorEvent::Unkeyed(UnkeyReason::Released)));
}

#[test]
fn timeout_disabled_never_forces_unkey() {
    let cfg = CosmonConfig {
        cos_timeout_enabled: false,
        ..config()
    };
    let mut rig = Rig::new();
    let mut sched = rig.start(&cfg);
    rig.gateway.calls.clear();

    rig.board.cos = true;
    for _ in 0..5000 {
        rig.tick(&mut sched);
    }
    assert_eq!(rig.gateway.calls, vec![GatewayCall::Key]);
}

#[test]
fn failed_commands_are_reported_and_polling_continues() {
    let mut rig = Rig::new();
    rig.gateway.fail_with = Some(1);
    let mut sched = rig.start(&config());

    rig.board.cos = true;
    assert_eq!(rig.tick(&mut sched), RunState::Running);
    rig.board.cos = false;
    assert_eq!(rig.tick(&mut sched), RunState::Running);

    let failures = rig
        .sink
        .count(|e| matches!(e, MonitorEvent::CommandFailed(_)));
    // Start-up unkey, key, unkey.
    assert_eq!(failures, 3);
    assert_eq!(rig.sink.count(|e| *e == MonitorEvent::Keyed), 1);
}

#[test]
fn cos_read_fault_does_not_look_like_an_edge() {
    let mut rig = Rig::new();
    rig.board.cos = true;
    let mut sched = rig.start(&config());
    rig.gateway.calls.clear();

    rig.board.fail_cos = true;
    rig.tick(&mut sched);
    rig.board.fail_cos = false;
    rig.tick(&mut sched);

    assert!(rig.gateway.calls.is_empty());
    assert_eq!(
        rig.sink.count(|e| matches!(e, MonitorEvent::PinFault(_))),
        1
    );
}

// ── Shutdown switch ───────────────────────────────────────────

#[test]
fn shutdown_fires_on_the_31st_pressed_sample() {
    let cfg = CosmonConfig {
        shutdown_enabled: true,
        ..config()
    };
    let mut rig = Rig::new();
    let mut sched = rig.start(&cfg);
    rig.board.pressed = true;

    for t in 0..30 {
        assert_eq!(rig.tick(&mut sched), RunState::Running, "tick {t}");
    }
    assert_eq!(rig.gateway.count(GatewayCall::Shutdown), 0);

    assert_eq!(rig.tick(&mut sched), RunState::Terminated);
    assert_eq!(
        rig.gateway.calls,
        vec![
            GatewayCall::Unkey,
            GatewayCall::Shutdown,
            GatewayCall::PowerOff
        ]
    );
    assert_eq!(rig.clock.sleeps, vec![SHUTDOWN_GRACE_MS]);
    assert!(
        rig.sink
            .events
            .contains(&MonitorEvent::ShutdownRequested { held_ticks: 31 })
    );
    assert_eq!(rig.sink.events.last(), Some(&MonitorEvent::PoweringOff));
}

#[test]
fn shutdown_read_fault_pauses_the_hold_count() {
    let cfg = CosmonConfig {
        shutdown_enabled: true,
        ..config()
    };
    let mut rig = Rig::new();
    let mut sched = rig.start(&cfg);
    rig.board.pressed = true;

    for _ in 0..10 {
        rig.tick(&mut sched);
    }
    assert_eq!(sched.debouncer().map(|d| d.pressed_count()), Some(10));

    rig.board.fail_shutdown = true;
    assert_eq!(rig.tick(&mut sched), RunState::Running);
    rig.board.fail_shutdown = false;

    // Neither counted nor treated as a release.
    assert_eq!(sched.debouncer().map(|d| d.pressed_count()), Some(10));
    assert_eq!(
        rig.sink.count(|e| matches!(e, MonitorEvent::PinFault(_))),
        1
    );

    for t in 0..20 {
        assert_eq!(rig.tick(&mut sched), RunState::Running, "tick {t}");
    }
    assert_eq!(rig.tick(&mut sched), RunState::Terminated);
    assert_eq!(rig.gateway.count(GatewayCall::Shutdown), 1);
    assert!(
        rig.sink
            .events
            .contains(&MonitorEvent::ShutdownRequested { held_ticks: 31 })
    );
    assert_eq!(
        rig.sink.count(|e| matches!(e, MonitorEvent::PinFault(_))),
        1
    );
}

#[test]
fn short_presses_never_shut_down() {
    let cfg = CosmonConfig {
        shutdown_enabled: true,
        shutdown_activate_count: 5,
        ..config()
    };
    let mut rig = Rig::new();
    let mut sched = rig.start(&cfg);

    for _ in 0..20 {
        for _ in 0..5 {
            rig.board.pressed = true;
            rig.tick(&mut sched);
        }
        rig.board.pressed = false;
        rig.tick(&mut sched);
    }

    assert_eq!(sched.state(), RunState::Running);
    assert_eq!(rig.gateway.count(GatewayCall::Shutdown), 0);
}

#[test]
fn disabled_switch_is_never_sampled() {
    let mut rig = Rig::new();
    rig.board.pressed = true;
    let mut sched = rig.start(&config());

    for _ in 0..100 {
        rig.tick(&mut sched);
    }
    assert_eq!(rig.board.shutdown_reads, 0);
    assert_eq!(sched.state(), RunState::Running);
}

#[test]
fn run_loop_sleeps_between_ticks_until_power_off() {
    let cfg = CosmonConfig {
        shutdown_enabled: true,
        shutdown_activate_count: 3,
        loop_delay_ms: 50,
        ..config()
    };
    let mut board = MockBoard::new();
    let mut gateway = MockGateway::new();
    let mut probe = ScriptedProbe::default();
    let mut clock = MockClock::default();
    let mut sink = crate::mock_hw::RecordingSink::new();

    let mut sched = Scheduler::start(&cfg, &mut board, &mut gateway, &mut sink).unwrap();
    board.pressed = true;
    let state = sched.run(&mut board, &mut gateway, &mut probe, &mut clock, &mut sink);

    assert_eq!(state, RunState::Terminated);
    assert_eq!(sched.tick_count(), 4);
    assert_eq!(clock.sleeps, vec![50, 50, 50, SHUTDOWN_GRACE_MS]);
}

// ── Network indicator ─────────────────────────────────────────

#[test]
fn network_comes_up_with_one_led_write() {
    let cfg = CosmonConfig {
        network_indicator_enabled: true,
        network_check_divisor: 1,
        ..config()
    };
    let mut rig = Rig::with_probe(ScriptedProbe::new(&["", "192.168.1.5"]));
    let mut sched = rig.start(&cfg);
    rig.board.led_writes.clear();

    rig.tick(&mut sched);
    rig.tick(&mut sched);

    assert_eq!(rig.board.led_writes, vec![PinState::Low]);
    let changes: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            MonitorEvent::NetworkChanged { connected, address } => {
                Some((*connected, address.as_str().to_owned()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![(true, "192.168.1.5".to_owned())]);
}

#[test]
fn network_is_probed_every_divisor_ticks() {
    let cfg = CosmonConfig {
        network_indicator_enabled: true,
        ..config()
    };
    let mut rig = Rig::with_probe(ScriptedProbe::new(&["10.0.0.2", "", "", "10.0.0.3"]));
    let mut sched = rig.start(&cfg);
    rig.board.led_writes.clear();

    for _ in 0..80 {
        rig.tick(&mut sched);
    }

    // Ticks 0, 20, 40, 60.
    assert_eq!(rig.probe.calls, 4);
    assert_eq!(
        rig.board.led_writes,
        vec![PinState::Low, PinState::High, PinState::Low]
    );
    assert!(sched.indicator().is_some_and(|i| i.is_connected()));
}

#[test]
fn disabled_indicator_never_probes() {
    let mut rig = Rig::with_probe(ScriptedProbe::new(&["10.0.0.2"]));
    let mut sched = rig.start(&config());
    for _ in 0..100 {
        rig.tick(&mut sched);
    }
    assert_eq!(rig.probe.calls, 0);
    assert_eq!(rig.board.led_writes, vec![PinState::High]);
}
