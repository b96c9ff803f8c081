/*!
 * Workload Tests
 * File-based input, generated workloads end to end, Gantt and config files
 */

use pretty_assertions::assert_eq;
use probsched::workload::{BurstDistribution, IoProfile};
use probsched::{
    generate_static, load_workload, schedule_fcfs, ConfigError, Policy, RandomWorkload, Simulation,
    SimulationConfig, TimeCap, WorkloadError,
};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_workload_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# ID ARRIVAL BURST PRIORITY DEADLINE PERIOD [IO]").unwrap();
    writeln!(file, "1 0 5 2 20 0").unwrap();
    writeln!(file, "2 2 3 1 9 0 4").unwrap();
    writeln!(file, "this line is not a process").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "3 4 2 5 30 10").unwrap();
    file.flush().unwrap();

    let report = load_workload(file.path()).unwrap();
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.malformed.len(), 1);
    assert_eq!(report.malformed[0].line, 4);

    let pids: Vec<u32> = report.records.iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![1, 2, 3]);
    assert_eq!(report.records[1].io_burst_duration, 4);
    assert_eq!(report.records[2].period, 10);
}

#[test]
fn test_missing_workload_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_workload(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, WorkloadError::Io { .. }));
}

#[test]
fn test_static_workload_runs_to_completion() {
    let outcome = schedule_fcfs(generate_static(5), TimeCap::Unbounded).unwrap();
    assert_eq!(outcome.metrics.completed, 5);
    // Bursts 5,6,7,5,6 back to back from t=0
    assert_eq!(outcome.metrics.final_time, 29);
    assert_eq!(outcome.metrics.idle_time, 0);
}

#[test]
fn test_random_workload_feeds_every_policy() {
    let records = RandomWorkload {
        count: 25,
        seed: 2024,
        burst: BurstDistribution::Uniform { min: 1, max: 8 },
        io: IoProfile {
            chance: 0.4,
            min_duration: 1,
            max_duration: 4,
        },
        ..RandomWorkload::default()
    }
    .generate()
    .unwrap();

    for policy in Policy::ALL {
        let outcome = Simulation::builder()
            .with_policy(policy)
            .with_quantum(3)
            .with_context_switch_cost(1)
            .build()
            .unwrap()
            .run(records.clone())
            .unwrap();
        assert_eq!(outcome.metrics.completed, 25, "{}", policy);
    }
}

#[test]
fn test_gantt_csv_file() {
    let outcome = schedule_fcfs(
        vec![
            probsched::ProcessRecord::new(1, 1, 2),
            probsched::ProcessRecord::new(2, 1, 1),
        ],
        TimeCap::Unbounded,
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gantt.csv");
    outcome.gantt.save_csv(&path).unwrap();

    let csv = std::fs::read_to_string(&path).unwrap();
    assert_eq!(csv, "PID,Start,End\n-1,0,1\n1,1,3\n2,3,4\n");
}

#[test]
fn test_config_file_drives_the_run() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"policy":"rr","quantum":1,"context_switch_cost":0,"time_cap":3}}"#
    )
    .unwrap();
    file.flush().unwrap();

    let config = SimulationConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.policy, Policy::RoundRobin);

    let outcome = Simulation::new(config)
        .run(vec![
            probsched::ProcessRecord::new(1, 0, 2),
            probsched::ProcessRecord::new(2, 0, 2),
        ])
        .unwrap();
    assert_eq!(outcome.metrics.final_time, 3);
    assert_eq!(outcome.metrics.completed, 1);
}

#[test]
fn test_malformed_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    file.flush().unwrap();

    let err = SimulationConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Decode(_)));
}

#[test]
fn test_huge_multilevel_quantum_runs() {
    let config =
        SimulationConfig::from_json_str(r#"{"policy":"mlq","quantum":9223372036854775809}"#).unwrap();
    let outcome = Simulation::new(config)
        .run(vec![probsched::ProcessRecord::new(1, 0, 4).with_priority(3)])
        .unwrap();
    assert_eq!(outcome.metrics.completed, 1);
    assert_eq!(outcome.metrics.final_time, 4);
}
