//! Latency report for every ring variant.
//!
//! Times each operation in isolation for `repeats` rounds and logs the
//! average and worst-case latency:
//!
//! - scalar write of `10 * capacity` samples
//! - scalar read of `10 * capacity` samples
//! - bulk write of `0.8 * capacity` samples
//! - bulk read of `0.8 * capacity` samples
//! - one writer thread and one reader thread moving `0.8 * capacity` samples
//!   in parallel
//!
//! Usage: `floatring-latency [--capacity N] [--repeats N] [--quick]`
//! (log level via `RUST_LOG`, default `info`).

use floatring_rs::{
    Config, LatencyStats, NonBlockingRing, RingBuffer, StrictRing, ThreadSafeRing,
    BENCHMARK_CONFIG,
};
use std::error::Error;
use std::sync::Arc;
use std::thread;
use tracing::info;

const DEFAULT_REPEATS: usize = 1000;

#[derive(Debug, Clone, Copy)]
struct Settings {
    config: Config,
    repeats: usize,
}

fn parse_args() -> Result<Settings, Box<dyn Error>> {
    let mut capacity = BENCHMARK_CONFIG.capacity;
    let mut repeats = DEFAULT_REPEATS;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--capacity" => {
                capacity = args.next().ok_or("--capacity needs a value")?.parse()?;
            }
            "--repeats" => {
                repeats = args.next().ok_or("--repeats needs a value")?.parse()?;
            }
            "--quick" => {
                capacity = 5_000;
                repeats = 100;
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }

    Ok(Settings {
        config: Config::try_new(capacity, true)?,
        repeats,
    })
}

fn report(operation: &str, stats: &LatencyStats, units_per_round: u64, what: &str) {
    info!(
        operation,
        avg_ns = stats.average_per(units_per_round).as_nanos() as u64,
        max_ns = stats.max().as_nanos() as u64,
        "{} {}",
        units_per_round,
        what
    );
}

fn run_benchmark(ring: Arc<dyn RingBuffer>, repeats: usize) {
    let capacity = ring.capacity();
    let scalar_len = 10 * capacity;

    let mut stats = LatencyStats::new();
    for _ in 0..repeats {
        stats.time(|| {
            let mut data = 0.0f32;
            for _ in 0..scalar_len {
                ring.write(data);
                data += 1.0;
            }
        });
    }
    report("write", &stats, scalar_len as u64, "single samples");

    let mut stats = LatencyStats::new();
    for _ in 0..repeats {
        stats.time(|| {
            for _ in 0..scalar_len {
                std::hint::black_box(ring.read());
            }
        });
    }
    report("read", &stats, scalar_len as u64, "single samples");

    let bulk_len = capacity * 4 / 5;
    let input: Arc<[f32]> = (0..bulk_len).map(|i| i as f32 * 0.1).collect();

    let mut stats = LatencyStats::new();
    for _ in 0..repeats {
        stats.time(|| ring.write_slice(&input));
    }
    report("write array", &stats, 1, &format!("array of {bulk_len} samples"));

    let mut out = vec![0.0f32; bulk_len];
    let mut stats = LatencyStats::new();
    for _ in 0..repeats {
        stats.time(|| ring.read_into(&mut out));
    }
    report("read array", &stats, 1, &format!("array of {bulk_len} samples"));

    let mut stats = LatencyStats::new();
    for _ in 0..repeats {
        stats.time(|| {
            let writer = {
                let ring = Arc::clone(&ring);
                let input = Arc::clone(&input);
                thread::spawn(move || ring.write_slice(&input))
            };
            let reader = {
                let ring = Arc::clone(&ring);
                thread::spawn(move || {
                    let mut out = vec![0.0f32; bulk_len];
                    ring.read_into(&mut out);
                })
            };
            let (written, read) = (writer.join(), reader.join());
            if written.is_err() || read.is_err() {
                tracing::error!("parallel worker panicked");
            }
        });
    }
    report(
        "parallel",
        &stats,
        1,
        &format!("array of {bulk_len} samples written and read in parallel threads"),
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = parse_args()?;
    let config = settings.config;
    info!(
        capacity = config.capacity,
        repeats = settings.repeats,
        "starting latency report"
    );

    let non_blocking = Arc::new(NonBlockingRing::new(config));
    info!("benchmark of non-blocking ring");
    run_benchmark(non_blocking.clone(), settings.repeats);
    info!(metrics = ?non_blocking.metrics(), "non-blocking ring done");

    let thread_safe = Arc::new(ThreadSafeRing::new(config));
    info!("benchmark of thread-safe ring");
    run_benchmark(thread_safe.clone(), settings.repeats);
    info!(metrics = ?thread_safe.metrics(), "thread-safe ring done");

    let strict = Arc::new(StrictRing::new(config));
    info!("benchmark of strict ring");
    run_benchmark(strict.clone(), settings.repeats);
    info!(metrics = ?strict.metrics(), "strict ring done");

    Ok(())
}
