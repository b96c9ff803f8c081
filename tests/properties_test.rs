/*!
 * Property Tests
 * Invariants that must hold for every policy over arbitrary workloads
 */

use probsched::scheduler::band_of;
use probsched::simulation::SeededIo;
use probsched::{
    GanttLog, IoTiming, Occupant, Policy, ProcessRecord, Simulation, SimulationOutcome, Tick,
};
use proptest::prelude::*;

fn workload() -> impl Strategy<Value = Vec<ProcessRecord>> {
    prop::collection::vec((0u64..30, 1u64..10, 1u32..=5, 0u64..60, 0u64..4), 1..12).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (arrival, burst, priority, deadline, io))| {
                    ProcessRecord::new(i as u32 + 1, arrival, burst)
                        .with_priority(priority)
                        .with_deadline(deadline)
                        .with_period(deadline)
                        .with_io(io)
                })
                .collect()
        },
    )
}

fn policy() -> impl Strategy<Value = Policy> {
    prop::sample::select(Policy::ALL.to_vec())
}

fn simulate(
    policy: Policy,
    quantum: Tick,
    switch_cost: Tick,
    records: Vec<ProcessRecord>,
) -> SimulationOutcome {
    Simulation::builder()
        .with_policy(policy)
        .with_quantum(quantum)
        .with_context_switch_cost(switch_cost)
        .build()
        .unwrap()
        .run(records)
        .unwrap()
}

fn process_segments(gantt: &GanttLog) -> impl Iterator<Item = (u32, Tick)> + '_ {
    gantt.segments().iter().filter_map(|s| match s.occupant {
        Occupant::Process(pid) => Some((pid, s.duration())),
        _ => None,
    })
}

proptest! {
    #[test]
    fn prop_every_record_completes_with_consistent_times(
        policy in policy(),
        quantum in 1u64..6,
        switch_cost in 0u64..3,
        records in workload(),
    ) {
        let outcome = simulate(policy, quantum, switch_cost, records);
        prop_assert_eq!(outcome.metrics.unfinished, 0);

        for record in &outcome.records {
            let finish = record.finish_time().unwrap();
            let turnaround = record.turnaround_time().unwrap();
            prop_assert_eq!(turnaround, finish - record.arrival_time);
            prop_assert!(turnaround >= record.burst_time);
            prop_assert_eq!(record.waiting_time().unwrap(), turnaround - record.burst_time);
            prop_assert!(record.start_time().unwrap() >= record.arrival_time);
            prop_assert_eq!(record.remaining_time(), 0);
        }

        let utilization = outcome.metrics.cpu_utilization;
        prop_assert!((0.0..=1.0).contains(&utilization));
    }

    #[test]
    fn prop_gantt_covers_the_run_without_gaps(
        policy in policy(),
        quantum in 1u64..6,
        switch_cost in 0u64..3,
        records in workload(),
    ) {
        let outcome = simulate(policy, quantum, switch_cost, records);
        let segments = outcome.gantt.segments();

        let mut clock = 0;
        for s in segments {
            prop_assert!(s.start < s.end);
            prop_assert_eq!(s.start, clock);
            clock = s.end;
        }
        prop_assert_eq!(clock, outcome.metrics.final_time);
        prop_assert_eq!(outcome.gantt.time_for(Occupant::Idle), outcome.metrics.idle_time);

        for record in &outcome.records {
            let ran: Tick = process_segments(&outcome.gantt)
                .filter(|(pid, _)| *pid == record.pid)
                .map(|(_, d)| d)
                .sum();
            prop_assert_eq!(ran, record.burst_time);
        }
    }

    #[test]
    fn prop_non_preemptive_policies_run_contiguously(
        policy in prop::sample::select(vec![Policy::Fcfs, Policy::Sjf, Policy::PriorityNonPreemptive]),
        switch_cost in 0u64..3,
        records in workload(),
    ) {
        let outcome = simulate(policy, 1, switch_cost, records);
        for record in &outcome.records {
            prop_assert_eq!(outcome.gantt.segments_of(record.pid).count(), 1);
        }
    }

    #[test]
    fn prop_quantum_bounds_every_segment(
        quantum in 1u64..6,
        records in workload(),
    ) {
        let outcome = simulate(Policy::RoundRobin, quantum, 0, records.clone());
        for (_, duration) in process_segments(&outcome.gantt) {
            prop_assert!(duration <= quantum);
        }

        let outcome = simulate(Policy::MultilevelQueue, quantum, 0, records);
        for s in outcome.gantt.segments() {
            if let Occupant::Process(pid) = s.occupant {
                let record = outcome.records.iter().find(|r| r.pid == pid).unwrap();
                match band_of(record.priority) {
                    0 => prop_assert!(s.duration() <= quantum),
                    1 => prop_assert!(s.duration() <= 2 * quantum),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn prop_aging_only_raises_priority(
        preemptive in any::<bool>(),
        records in workload(),
    ) {
        let policy = if preemptive { Policy::PriorityPreemptive } else { Policy::PriorityNonPreemptive };
        let outcome = simulate(policy, 1, 0, records);
        for record in &outcome.records {
            prop_assert!(record.current_priority() <= record.priority);
            prop_assert!(record.current_priority() >= 1);
        }
    }

    #[test]
    fn prop_runs_are_deterministic(
        policy in policy(),
        seed in any::<u64>(),
        records in workload(),
    ) {
        let sim = Simulation::builder()
            .with_policy(policy)
            .with_context_switch_cost(1)
            .with_io_timing(IoTiming::MidBurst)
            .with_seeded_io(seed, 0.5, 0.2)
            .build()
            .unwrap();

        let first = sim.run(records.clone()).unwrap();
        let second = sim.run(records.clone()).unwrap();
        prop_assert_eq!(first.gantt.to_csv_string().unwrap(), second.gantt.to_csv_string().unwrap());
        prop_assert_eq!(
            serde_json::to_string(&first.metrics).unwrap(),
            serde_json::to_string(&second.metrics).unwrap()
        );

        let mut io = SeededIo::new(seed, 0.5, 0.2);
        let injected = sim.run_with_io(records, &mut io).unwrap();
        prop_assert_eq!(first.gantt, injected.gantt);
    }
}
