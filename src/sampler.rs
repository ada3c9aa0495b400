//! Polling-cycle state: previous baselines and the per-cycle failure policy.
//!
//! The `Sampler` owns the last CPU and network snapshots and turns every
//! call to [`Sampler::sample`] into a [`Sample`] ready for rendering.
//!
//! Failure policy for one cycle:
//! - CPU report unusable: the cycle is skipped and the CPU baseline is kept.
//! - Network report unusable: rates are `0.0` and the network baseline is kept.
//! - Memory report unusable: the sample carries `mem: None`.

use std::time::Instant;

use tracing::{debug, warn};

use crate::collector::procfs::parser::{CpuTimes, MemInfo, NetTotals};
use crate::collector::procfs::{CollectError, SystemCollector};
use crate::collector::traits::FileSystem;
use crate::rates::{NetRates, cpu_usage_percent};

/// One rendered polling cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub cpu_usage_percent: f64,
    pub rx_bps: f64,
    pub tx_bps: f64,
    /// `None` when `/proc/meminfo` could not be read this cycle.
    pub mem: Option<MemInfo>,
}

/// Keeps the previous snapshots between polling cycles.
pub struct Sampler<F: FileSystem> {
    collector: SystemCollector<F>,
    prev_cpu: Option<CpuTimes>,
    prev_net: Option<(NetTotals, Instant)>,
}

impl<F: FileSystem> Sampler<F> {
    pub fn new(collector: SystemCollector<F>) -> Self {
        Self {
            collector,
            prev_cpu: None,
            prev_net: None,
        }
    }

    /// Returns a mutable reference to the collector.
    pub fn collector_mut(&mut self) -> &mut SystemCollector<F> {
        &mut self.collector
    }

    /// Establishes the CPU and network baselines.
    ///
    /// Fails only if the CPU report cannot be read, since no usage can ever
    /// be computed without it. A network failure is logged and retried on the
    /// next cycle.
    pub fn prime(&mut self, now: Instant) -> Result<(), CollectError> {
        let cpu = self.collector.collect_cpu_times()?;
        self.prev_cpu = Some(cpu);

        match self.collector.collect_net_totals() {
            Ok(totals) => self.prev_net = Some((totals, now)),
            Err(e) => warn!("Network baseline unavailable: {}", e),
        }

        debug!("Baseline established at {} total CPU ticks", cpu.total());
        Ok(())
    }

    /// Runs one polling cycle.
    ///
    /// Returns `None` when the cycle produced nothing to render: the CPU
    /// report failed, or this call only established the CPU baseline.
    pub fn sample(&mut self, now: Instant) -> Option<Sample> {
        let cpu = match self.collector.collect_cpu_times() {
            Ok(cpu) => cpu,
            Err(e) => {
                warn!("{}; skipping sample", e);
                return None;
            }
        };

        let rates = self.sample_net(now);

        let Some(prev_cpu) = self.prev_cpu.replace(cpu) else {
            debug!("CPU baseline established");
            return None;
        };
        if cpu.delta(&prev_cpu).is_none() {
            debug!("CPU counters went backwards, treating as a new baseline");
        }

        let mem = match self.collector.collect_meminfo() {
            Ok(mem) => Some(mem),
            Err(e) => {
                warn!("{}; memory unavailable this cycle", e);
                None
            }
        };

        Some(Sample {
            cpu_usage_percent: cpu_usage_percent(&prev_cpu, &cpu),
            rx_bps: rates.rx_bps,
            tx_bps: rates.tx_bps,
            mem,
        })
    }

    /// Reads network totals, computes rates against the baseline and advances it.
    fn sample_net(&mut self, now: Instant) -> NetRates {
        let curr = match self.collector.collect_net_totals() {
            Ok(totals) => totals,
            Err(e) => {
                warn!("{}; network unavailable this cycle", e);
                return NetRates::default();
            }
        };

        let rates = match self.prev_net {
            Some((prev, prev_at)) => {
                let elapsed = now
                    .checked_duration_since(prev_at)
                    .map(|d| d.as_secs_f64())
                    .unwrap_or(0.0);
                NetRates::between(&prev, &curr, elapsed)
            }
            None => NetRates::default(),
        };

        self.prev_net = Some((curr, now));
        rates
    }
}
