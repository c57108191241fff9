use rtdsp_controls::{IirPiQ15, IirPiQ31, IirPidQ31, PiGains, PidGains};
use rtdsp_core::{acc16, acc32, q15, q31};
use rtdsp_sim::*;

fn pi_q15_loop(setpoint: i16) -> Trace {
    let mut pi = IirPiQ15::new(PiGains::new(acc16(1.5), acc16(1.0)));
    let mut plant = FirstOrderSystemQ15::new(q15(-0.25), q15(0.1), 0);
    run_closed_loop(&mut pi, &mut plant, setpoint, SEQUENCE_LENGTH).unwrap()
}

#[test]
fn pi_q15_characterization_trace() {
    let trace = pi_q15_loop(q15(0.1));
    let head: Vec<(i64, i64, i64)> = trace.samples[..3]
        .iter()
        .map(|s| (s.error, s.control, s.output))
        .collect();
    assert_eq!(
        head,
        vec![(-3276, -8190, 819), (-2457, -9418, 737), (-2539, -12080, 1023)]
    );

    // Plant DC gain is b / (1 - a) = 0.08, so a setpoint of 0.1 is out of
    // reach: the controller pins at the negative rail and the plant settles
    // just above 0.08.
    assert_eq!(trace.samples[20].control, i64::from(i16::MIN));
    for s in &trace.samples[50..] {
        assert_eq!(s.control, i64::from(i16::MIN));
        assert!(s.output == 2620 || s.output == 2621, "step {}", s.step);
    }
    assert!(trace.saturated_steps() >= 50);
    assert!(trace.samples[..20].iter().all(|s| s.control > i64::from(i16::MIN)));
}

#[test]
fn pi_q15_tracks_reachable_setpoint() {
    let trace = pi_q15_loop(q15(0.05));
    for s in &trace.samples[80..] {
        assert!((1633..=1637).contains(&s.output), "step {}: {}", s.step, s.output);
    }
    assert_eq!(trace.saturated_steps(), 0);
}

#[test]
fn pi_q31_tracks_setpoint() {
    let mut pi = IirPiQ31::new(PiGains::new(acc32(1.5), acc32(1.0)));
    let mut plant = FirstOrderSystemQ31::new(q31(-0.25), q31(0.1), 0);
    let r = q31(0.05);
    let trace = run_closed_loop(&mut pi, &mut plant, r, 100).unwrap();
    let last = trace.last().unwrap();
    assert!((last.output - i64::from(r)).abs() < i64::from(r) / 1000);
    assert_eq!(trace.saturated_steps(), 0);
}

#[test]
fn pid_q31_tracks_setpoint() {
    let mut pid = IirPidQ31::new(PidGains::new(acc32(1.5), acc32(1.0), acc32(0.1)));
    let mut plant = FirstOrderSystemQ31::new(q31(-0.25), q31(0.1), 0);
    let r = q31(0.05);
    let trace = run_closed_loop(&mut pid, &mut plant, r, 100).unwrap();
    assert_eq!(trace.last().unwrap().output, 107308209);

    let trace = run_closed_loop(&mut pid, &mut plant, r, 100).unwrap();
    assert!((trace.last().unwrap().output - i64::from(r)).abs() < 100);
}

#[test]
fn scenario_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("rtdsp-sim-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("pi.yaml");

    let scenario = Scenario::pi_characterization();
    scenario.save(&path).unwrap();
    let loaded = Scenario::load(&path).unwrap();
    assert_eq!(loaded, scenario);

    let trace = loaded.run().unwrap();
    assert_eq!(trace.output_sequence(), pi_q15_sequence().unwrap());

    let mut csv = Vec::new();
    write_csv(&trace, &mut csv).unwrap();
    let text = String::from_utf8(csv).unwrap();
    assert_eq!(text.lines().count(), SEQUENCE_LENGTH + 1);
    assert_eq!(text.lines().nth(1), Some("0,3276,-3276,-8190,819"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_scenario_file_is_io_error() {
    let err = Scenario::load(std::path::Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
