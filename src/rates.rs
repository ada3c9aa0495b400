//! Derived metrics computed from two cumulative counter samples.
//!
//! Every counter read from `/proc` only grows while the system is up. A
//! decrease between two samples means the counters were reset (reboot,
//! interface re-created) or wrapped; such an interval reports `0.0` and the
//! caller is expected to adopt the newer sample as its baseline.

use crate::collector::procfs::parser::{CpuTimes, NetTotals};

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Compute counter delta, returning `None` on counter regression (reset).
pub fn counter_delta(curr: u64, prev: u64) -> Option<u64> {
    curr.checked_sub(prev)
}

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

/// Percentage of CPU ticks spent busy between `prev` and `curr`.
///
/// Busy time is everything except `idle` and `iowait`. Returns exactly `0.0`
/// when no ticks elapsed or when any counter went backwards.
pub fn cpu_usage_percent(prev: &CpuTimes, curr: &CpuTimes) -> f64 {
    let Some(delta) = curr.delta(prev) else {
        return 0.0;
    };

    let total = delta.total();
    if total == 0 {
        return 0.0;
    }

    let busy = total.saturating_sub(delta.idle_total());
    busy as f64 * 100.0 / total as f64
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Bytes per second between two cumulative byte counters.
///
/// Returns exactly `0.0` when `elapsed_secs` is not positive (or NaN) and when
/// the counter went backwards.
pub fn byte_rate(prev: u64, curr: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs.is_nan() || elapsed_secs <= 0.0 {
        return 0.0;
    }
    match counter_delta(curr, prev) {
        Some(delta) => delta as f64 / elapsed_secs,
        None => 0.0,
    }
}

/// Receive and transmit throughput in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetRates {
    pub rx_bps: f64,
    pub tx_bps: f64,
}

impl NetRates {
    /// Computes throughput between two aggregated `/proc/net/dev` samples.
    pub fn between(prev: &NetTotals, curr: &NetTotals, elapsed_secs: f64) -> Self {
        Self {
            rx_bps: byte_rate(prev.rx_bytes, curr.rx_bytes, elapsed_secs),
            tx_bps: byte_rate(prev.tx_bytes, curr.tx_bytes, elapsed_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu(user: u64, system: u64, idle: u64) -> CpuTimes {
        CpuTimes {
            user,
            system,
            idle,
            ..CpuTimes::default()
        }
    }

    #[test]
    fn test_counter_delta() {
        assert_eq!(counter_delta(10, 3), Some(7));
        assert_eq!(counter_delta(3, 3), Some(0));
        assert_eq!(counter_delta(3, 10), None);
    }

    #[test]
    fn test_cpu_usage_percent_basic() {
        let usage = cpu_usage_percent(&cpu(100, 100, 100), &cpu(200, 200, 200));
        assert!((usage - 66.6667).abs() < 0.01);
    }

    #[test]
    fn test_cpu_usage_percent_counts_iowait_as_idle() {
        let prev = CpuTimes::default();
        let curr = CpuTimes {
            user: 50,
            idle: 25,
            iowait: 25,
            ..CpuTimes::default()
        };
        assert!((cpu_usage_percent(&prev, &curr) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_cpu_usage_percent_fully_busy_and_idle() {
        assert_eq!(cpu_usage_percent(&cpu(0, 0, 0), &cpu(60, 40, 0)), 100.0);
        assert_eq!(cpu_usage_percent(&cpu(0, 0, 0), &cpu(0, 0, 100)), 0.0);
    }

    #[test]
    fn test_cpu_usage_percent_zero_delta() {
        let snapshot = CpuTimes {
            user: 1,
            nice: 2,
            system: 3,
            idle: 4,
            iowait: 5,
            irq: 6,
            softirq: 7,
            steal: 8,
        };
        assert_eq!(cpu_usage_percent(&snapshot, &snapshot), 0.0);
    }

    #[test]
    fn test_cpu_usage_percent_counter_reset() {
        // Reboot between samples: counters restart near zero.
        let usage = cpu_usage_percent(&cpu(100000, 50000, 900000), &cpu(10, 5, 90));
        assert_eq!(usage, 0.0);
    }

    #[test]
    fn test_byte_rate() {
        assert_eq!(byte_rate(1000, 3000, 2.0), 1000.0);
        assert_eq!(byte_rate(1000, 1000, 0.5), 0.0);
    }

    #[test]
    fn test_byte_rate_non_positive_elapsed() {
        assert_eq!(byte_rate(0, 1_000_000, 0.0), 0.0);
        assert_eq!(byte_rate(0, 1_000_000, -1.5), 0.0);
        assert_eq!(byte_rate(0, 1_000_000, f64::NAN), 0.0);
    }

    #[test]
    fn test_byte_rate_counter_reset() {
        assert_eq!(byte_rate(5_000_000, 100, 1.0), 0.0);
    }

    #[test]
    fn test_net_rates_between() {
        let prev = NetTotals {
            rx_bytes: 1000,
            tx_bytes: 500,
            interfaces: 2,
        };
        let curr = NetTotals {
            rx_bytes: 2000,
            tx_bytes: 750,
            interfaces: 2,
        };

        let rates = NetRates::between(&prev, &curr, 0.25);

        assert_eq!(rates.rx_bps, 4000.0);
        assert_eq!(rates.tx_bps, 1000.0);
    }
}
