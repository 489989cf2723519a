use blocked_reduce::{reduce_with, serial_halving_fold, ReduceConfig, Schedule, DEFAULT_GRAIN_SIZE};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "halving-sum")]
#[command(about = "Fork-join decay-weighted sum of a constant array", long_about = None)]
struct Args {
    /// Number of array elements
    #[arg(value_name = "SIZE")]
    size: usize,
    /// Ranges longer than this are split
    #[arg(short, long, default_value_t = DEFAULT_GRAIN_SIZE)]
    grain: usize,
    /// Value every element is set to
    #[arg(long, default_value_t = 1.0)]
    value: f32,
    /// Worker threads (defaults to the global rayon pool)
    #[arg(short = 'j', long, value_name = "N", conflicts_with = "sequential")]
    threads: Option<usize>,
    /// Run every task on the calling thread
    #[arg(short, long)]
    sequential: bool,
    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let schedule = match (args.sequential, args.threads) {
        (true, _) => Schedule::Sequential,
        (false, Some(threads)) => Schedule::Pool { threads },
        (false, None) => Schedule::Parallel,
    };
    let config = ReduceConfig::new(args.grain).with_schedule(schedule);

    println!("array size: {}", args.size);

    let data = vec![args.value; args.size];

    let outcome = reduce_with(&data, &config).map_err(|e| e.to_string())?;
    println!("parallel sum: {}", outcome.value);

    let serial = serial_halving_fold(&data);
    println!("serial sum: {}", serial);

    if outcome.report.overlaps > 0 {
        log::warn!("{} overlapping joins", outcome.report.overlaps);
    }
    log::info!(
        "{} leaves, {} joins on {} thread(s)",
        outcome.report.leaves,
        outcome.report.joins,
        schedule.threads()
    );
    Ok(())
}
