use std::num::NonZeroU64;

use rr_sim::{
    ProcessSet, RawRecord, SchedulerSpec, Sim, SimConfig, SimError, SimReport, TimelineEvent,
    error::{InputError, ParameterError},
    scheduler::RoundRobinScheduler,
    sim::parse_records,
};

fn sim(records: &[(i64, i64, i64, i64)]) -> Sim {
    Sim::from_records(records.iter().copied(), &SimConfig::default()).unwrap()
}

fn timings(report: &SimReport) -> Vec<(i64, u64, u64)> {
    report
        .processes
        .iter()
        .map(|p| (p.pid, p.waiting_time, p.turnaround_time))
        .collect()
}

fn slice(pid: i64, start: u64, duration: u64) -> TimelineEvent {
    TimelineEvent {
        pid,
        start,
        duration,
    }
}

const THREE: [(i64, i64, i64, i64); 3] = [(1, 0, 5, 2), (2, 1, 3, 1), (3, 2, 8, 3)];

#[test]
fn fcfs_three_processes() {
    let report = sim(&THREE).run(SchedulerSpec::Fcfs);

    assert_eq!(timings(&report), vec![(1, 0, 5), (2, 4, 7), (3, 6, 14)]);
    assert_eq!(
        report.timeline,
        vec![slice(1, 0, 5), slice(2, 5, 3), slice(3, 8, 8)]
    );
    assert_eq!(format!("{:.2}", report.aggregate.average_waiting_time), "3.33");
    assert_eq!(format!("{:.2}", report.aggregate.average_turnaround_time), "8.67");
    assert_eq!(report.aggregate.idle_time, 0);
    assert_eq!(report.aggregate.makespan, 16);
}

#[test]
fn round_robin_three_processes_quantum_two() {
    let report = sim(&THREE).run(SchedulerSpec::round_robin(2).unwrap());

    assert_eq!(report.completion_order(), vec![2, 1, 3]);
    assert_eq!(timings(&report), vec![(1, 7, 12), (2, 5, 8), (3, 6, 14)]);
    assert_eq!(report.process(2).map(|p| p.completion_time), Some(9));
    assert_eq!(
        report.timeline,
        vec![
            slice(1, 0, 2),
            slice(2, 2, 2),
            slice(3, 4, 2),
            slice(1, 6, 2),
            slice(2, 8, 1),
            slice(3, 9, 2),
            slice(1, 11, 1),
            slice(3, 12, 2),
            slice(3, 14, 2),
        ]
    );
    assert_eq!(report.aggregate.average_waiting_time, 6.0);
    assert_eq!(format!("{:.2}", report.aggregate.average_turnaround_time), "11.33");
}

#[test]
fn cyclic_scan_matches_queue_on_three_processes() {
    let sim = sim(&THREE);
    let queue = sim.run(SchedulerSpec::round_robin(2).unwrap());
    let scan = sim.run(SchedulerSpec::cyclic_scan(2).unwrap());
    assert_eq!(queue.timeline, scan.timeline);
    assert_eq!(timings(&queue), timings(&scan));
}

#[test]
fn cyclic_scan_serves_late_arrivals_within_the_same_pass() {
    // P3 arrives while P2 runs. The scan reaches it before wrapping back to
    // P1; the queue puts it behind the already-queued P1.
    let sim = sim(&[(1, 0, 6, 0), (2, 0, 2, 0), (3, 3, 2, 0)]);

    let queue = sim.run(SchedulerSpec::round_robin(2).unwrap());
    assert_eq!(timings(&queue), vec![(1, 4, 10), (2, 2, 4), (3, 3, 5)]);
    assert_eq!(queue.completion_order(), vec![2, 3, 1]);

    let scan = sim.run(SchedulerSpec::cyclic_scan(2).unwrap());
    assert_eq!(timings(&scan), vec![(1, 4, 10), (2, 2, 4), (3, 1, 3)]);
    assert_eq!(
        scan.timeline,
        vec![
            slice(1, 0, 2),
            slice(2, 2, 2),
            slice(3, 4, 2),
            slice(1, 6, 2),
            slice(1, 8, 2),
        ]
    );
}

#[test]
fn round_robin_queue_admits_by_arrival_then_input_order() {
    // P2 and P3 tie on arrival and are queued in input order. P1 arrives
    // just as P3 is preempted and goes ahead of it.
    let report =
        sim(&[(1, 3, 2, 0), (2, 1, 2, 0), (3, 1, 2, 0)]).run(SchedulerSpec::round_robin(1).unwrap());

    assert_eq!(
        report.timeline,
        vec![
            slice(2, 1, 1),
            slice(3, 2, 1),
            slice(2, 3, 1),
            slice(1, 4, 1),
            slice(3, 5, 1),
            slice(1, 6, 1),
        ]
    );
    assert_eq!(report.completion_order(), vec![2, 3, 1]);
    assert_eq!(timings(&report), vec![(1, 2, 4), (2, 1, 3), (3, 3, 5)]);
    assert_eq!(report.aggregate.idle_time, 1);
}

#[test]
fn single_process_under_every_policy() {
    let sim = sim(&[(1, 0, 4, 0)]);
    for spec in ["F", "R1", "R3", "R10", "C1", "C4"] {
        let report = sim.run(spec.parse().unwrap());
        assert_eq!(timings(&report), vec![(1, 0, 4)], "{spec}");
    }
}

#[test]
fn fcfs_follows_input_order_not_arrival_order() {
    let report = sim(&[(1, 5, 2, 0), (2, 0, 3, 0)]).run(SchedulerSpec::Fcfs);

    assert_eq!(timings(&report), vec![(1, 0, 2), (2, 7, 10)]);
    assert_eq!(report.timeline, vec![slice(1, 5, 2), slice(2, 7, 3)]);
    assert_eq!(report.aggregate.idle_time, 5);
    assert_eq!(report.aggregate.busy_time, 5);
}

#[test]
fn idle_processor_waits_for_future_arrivals() {
    let sim = sim(&[(1, 10, 3, 0), (2, 20, 1, 0)]);
    for spec in ["F", "R2", "C2"] {
        let report = sim.run(spec.parse().unwrap());
        assert_eq!(timings(&report), vec![(1, 0, 3), (2, 0, 1)], "{spec}");
        assert_eq!(report.aggregate.idle_time, 17, "{spec}");
        assert_eq!(report.aggregate.makespan, 21, "{spec}");
    }
}

#[test]
fn first_dispatch_is_recorded_as_response_time() {
    let report = sim(&THREE).run(SchedulerSpec::round_robin(2).unwrap());
    let responses: Vec<_> = report.processes.iter().map(|p| p.response_time).collect();
    assert_eq!(responses, vec![0, 1, 2]);
}

#[test]
fn runs_on_independent_copies() {
    let sim = sim(&THREE);
    let reports = sim.run_all(&[
        SchedulerSpec::Fcfs,
        SchedulerSpec::round_robin(2).unwrap(),
        SchedulerSpec::Fcfs,
    ]);
    assert_eq!(reports[0], reports[2]);
    assert_ne!(reports[0].timeline, reports[1].timeline);
    assert_eq!(sim.process_set().total_burst(), 16);
}

#[test]
fn non_positive_quantum_is_rejected() {
    assert_eq!(
        SchedulerSpec::round_robin(0),
        Err(SimError::InvalidParameter(ParameterError::NonPositiveQuantum(0)))
    );
    assert_eq!(
        "R-3".parse::<SchedulerSpec>(),
        Err(SimError::InvalidParameter(ParameterError::NonPositiveQuantum(-3)))
    );
    assert!(matches!(
        "X".parse::<SchedulerSpec>(),
        Err(SimError::InvalidParameter(ParameterError::UnknownAlgorithm(_)))
    ));
}

#[test]
fn hand_built_round_robin_matches_parsed_spec() {
    let sim = sim(&THREE);
    assert_eq!(
        sim.run_with(RoundRobinScheduler::cyclic_scan(NonZeroU64::MIN)).timeline,
        sim.run(SchedulerSpec::cyclic_scan(1).unwrap()).timeline
    );
    let two = NonZeroU64::new(2).unwrap();
    assert_eq!(
        timings(&sim.run_with(RoundRobinScheduler::new(two))),
        timings(&sim.run(SchedulerSpec::round_robin(2).unwrap()))
    );
}

#[test]
fn schedules_that_overflow_the_clock_are_rejected() {
    let huge = [(1, 0, i64::MAX, 0), (2, 0, i64::MAX, 0), (3, 0, i64::MAX, 0)];
    assert_eq!(
        Sim::from_records(huge, &SimConfig::default()).err(),
        Some(SimError::InvalidInput(InputError::HorizonOverflow {
            record: RawRecord::new(3, 0, i64::MAX, 0),
        }))
    );

    // Two maximal bursts still fit, one tick short of the clock's limit
    let report = sim(&huge[..2]).run(SchedulerSpec::Fcfs);
    assert_eq!(report.aggregate.makespan, u64::MAX - 1);
    assert_eq!(report.timeline[1], slice(2, i64::MAX as u64, i64::MAX as u64));
}

#[test]
fn empty_input_is_rejected_before_simulating() {
    let empty: Vec<(i64, i64, i64, i64)> = Vec::new();
    assert_eq!(
        Sim::from_records(empty, &SimConfig::default()).unwrap_err(),
        SimError::EmptyInput
    );

    let records = parse_records("PID Arrival Burst Priority\n").unwrap();
    assert_eq!(
        ProcessSet::new(records, &SimConfig::default()),
        Err(SimError::EmptyInput)
    );
}

#[test]
fn validation_errors_name_the_record() {
    let records: [(i64, i64, i64, i64); 2] = [(1, 0, 3, 0), (2, 4, -1, 0)];
    let err = Sim::from_records(records, &SimConfig::default()).unwrap_err();
    let SimError::InvalidInput(input) = &err else {
        panic!("unexpected error {err:?}");
    };
    assert!(matches!(input, InputError::NonPositiveBurst { .. }));
    assert_eq!(input.record().map(|r| r.pid), Some(2));
    assert!(err.to_string().contains("pid=2"), "{err}");
}

#[test]
fn loaded_file_runs_end_to_end() {
    let input = "PID Arrival Burst Priority\n1 0 5 2\n2 1 3 1\n3 2 8 3\n";
    let records = parse_records(input).unwrap();
    let sim = Sim::from_records(records, &SimConfig::default()).unwrap();
    let report = sim.run("F".parse().unwrap());
    assert_eq!(timings(&report), vec![(1, 0, 5), (2, 4, 7), (3, 6, 14)]);
    assert_eq!(report.process(3).map(|p| p.priority), Some(3));
}

#[test]
fn report_serializes_to_json() {
    let report = sim(&THREE).run(SchedulerSpec::Fcfs);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["scheduler"], "FCFS");
    assert_eq!(json["timeline"][1]["pid"], 2);
    assert_eq!(json["processes"][2]["turnaround_time"], 14);
    assert_eq!(json["aggregate"]["busy_time"], 16);
}
