//! syspulse - Live CPU, memory and network sampler.
//!
//! Reads `/proc/stat`, `/proc/meminfo` and `/proc/net/dev` on a fixed interval
//! and prints either a refreshing text screen or one JSON record per sample.
//!
//! Usage:
//!   syspulse                  # text screen, 250 ms interval
//!   syspulse --format=json    # one JSON object per line
//!   syspulse -i 1000 -v       # 1 second interval, debug logging

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use syspulse::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use syspulse::collector::mock::MockFs;
use syspulse::collector::SystemCollector;
use syspulse::output::{OutputFormat, write_sample};
use syspulse::sampler::Sampler;

/// Live CPU, memory and network sampler.
#[derive(Parser)]
#[command(name = "syspulse", about = "Live CPU, memory and network sampler", version)]
struct Args {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Polling interval in milliseconds.
    #[arg(short, long, default_value = "250", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Logs go to stderr so stdout carries only samples.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("syspulse={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Sleeps for `interval`, waking early once `running` is cleared.
fn sleep_while_running(interval: Duration, running: &AtomicBool) {
    let sleep_interval = Duration::from_millis(50);
    let mut remaining = interval;
    while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
        let sleep_time = remaining.min(sleep_interval);
        std::thread::sleep(sleep_time);
        remaining = remaining.saturating_sub(sleep_time);
    }
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    info!("syspulse {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}ms, format={:?}, proc={}",
        args.interval, args.format, args.proc_path
    );

    #[cfg(target_os = "linux")]
    let collector = SystemCollector::new(RealFs::new(), &args.proc_path);
    #[cfg(not(target_os = "linux"))]
    let collector = {
        warn!("Not running on Linux, sampling a built-in mock /proc");
        SystemCollector::new(MockFs::typical_system(), &args.proc_path)
    };

    let mut sampler = Sampler::new(collector);
    if let Err(e) = sampler.prime(Instant::now()) {
        error!("Cannot establish CPU baseline: {}", e);
        std::process::exit(1);
    }

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let interval = Duration::from_millis(args.interval);
    let mut stdout = io::stdout().lock();

    while running.load(Ordering::SeqCst) {
        sleep_while_running(interval, &running);
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let Some(sample) = sampler.sample(Instant::now()) else {
            continue;
        };

        if let Err(e) = write_sample(&mut stdout, &sample, args.format) {
            error!("Failed to write sample: {}", e);
            break;
        }
    }

    info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["syspulse"]).unwrap();

        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.interval, 250);
        assert_eq!(args.proc_path, "/proc");
    }

    #[test]
    fn test_args_format_json() {
        let args = Args::try_parse_from(["syspulse", "--format=json"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_args_rejects_unknown() {
        let err = Args::try_parse_from(["syspulse", "--bogus"]).err().unwrap();
        assert_eq!(err.exit_code(), 2);

        assert!(Args::try_parse_from(["syspulse", "--format=xml"]).is_err());
        assert!(Args::try_parse_from(["syspulse", "--interval", "0"]).is_err());
    }

    #[test]
    fn test_args_help() {
        let err = Args::try_parse_from(["syspulse", "--help"]).err().unwrap();
        assert_eq!(err.exit_code(), 0);
        Args::command().debug_assert();
    }

    #[test]
    fn test_sleep_while_running_stops_early() {
        let running = AtomicBool::new(false);
        let started = Instant::now();
        sleep_while_running(Duration::from_secs(10), &running);
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
