use std::{fs, io::Write};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command, value_parser};
use env_logger::Builder;
use rr_sim::{
    ProcessSet, SchedulerSpec, Sim, SimConfig, SimReport, TimelineEvent,
    config::DEFAULT_MAX_PROCESSES,
    sim::{BernoulliWorkload, parse_records},
};

fn main() -> Result<()> {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let matches = Command::new("rr_sim")
        .about("Simulate FCFS and Round Robin CPU scheduling over a process table")
        .arg(
            Arg::new("inputfile")
                .long("inputfile")
                .default_value("processes.txt")
                .help("Process table: a header line, then `pid arrival burst priority` per line"),
        )
        .arg(
            Arg::new("schedspec")
                .short('s')
                .long("schedspec")
                .action(ArgAction::Append)
                .value_parser(|s: &str| s.parse::<SchedulerSpec>().map_err(|e| e.to_string()))
                .help("Scheduler: F, R<quantum> or C<quantum> (cyclic scan); repeat to compare"),
        )
        .arg(
            Arg::new("max-processes")
                .long("max-processes")
                .value_parser(value_parser!(usize))
                .help("Reject inputs with more processes than this [default: 100]"),
        )
        .arg(
            Arg::new("random")
                .long("random")
                .value_parser(value_parser!(u64))
                .help("Generate a Bernoulli workload over this many ticks instead of reading a file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .default_value("0")
                .help("Seed for --random"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the full reports as JSON"),
        )
        .get_matches();

    let config = SimConfig::with_max_processes(
        matches
            .get_one::<usize>("max-processes")
            .copied()
            .unwrap_or(DEFAULT_MAX_PROCESSES),
    );
    let specs: Vec<SchedulerSpec> = match matches.get_many::<SchedulerSpec>("schedspec") {
        Some(specs) => specs.copied().collect(),
        None => vec![SchedulerSpec::Fcfs],
    };

    let records = match matches.get_one::<u64>("random") {
        Some(&ticks) => BernoulliWorkload {
            ticks,
            seed: *matches.get_one::<u64>("seed").context("missing --seed")?,
            ..Default::default()
        }
        .generate(),
        None => {
            let path = matches
                .get_one::<String>("inputfile")
                .context("missing --inputfile")?;
            let contents =
                fs::read_to_string(path).with_context(|| format!("Failed to open file: {path}"))?;
            parse_records(&contents).with_context(|| format!("Failed to parse {path}"))?
        }
    };

    let sim = Sim::new(ProcessSet::new(records, &config)?);
    let reports = sim.run_all(&specs);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }
    Ok(())
}

fn print_report(report: &SimReport) {
    println!("\nGantt Chart ({}):", report.scheduler);
    println!("{}", gantt(&report.timeline));

    println!("\nPID\tArrival\tBurst\tWT\tTAT");
    for p in &report.processes {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            p.pid, p.arrival_time, p.burst_time, p.waiting_time, p.turnaround_time
        );
    }

    let agg = &report.aggregate;
    println!(
        "Avg WT: {:.2}, Avg TAT: {:.2}",
        agg.average_waiting_time, agg.average_turnaround_time
    );
    println!(
        "Busy: {} ticks, idle: {} ticks, utilization: {:.1}%",
        agg.busy_time,
        agg.idle_time,
        agg.cpu_utilization * 100.0
    );
}

// Idle gaps between slices show up as `--`
fn gantt(timeline: &[TimelineEvent]) -> String {
    let mut chart = String::new();
    let mut clock = 0;
    for event in timeline {
        if event.start > clock {
            chart.push_str("| -- ");
        }
        chart.push_str(&format!("| P{} ", event.pid));
        clock = event.end();
    }
    chart.push('|');
    chart
}
