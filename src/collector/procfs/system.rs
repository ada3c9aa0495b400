//! System collector for gathering global system metrics from `/proc/`.

use crate::collector::procfs::parser::{
    CpuTimes, MemInfo, NetDevStats, NetTotals, parse_meminfo, parse_net_dev,
    parse_proc_stat_cpu_line,
};
use crate::collector::traits::FileSystem;
use std::path::Path;

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// The report could not be read.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The report was read but its content is unusable.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io { path, source } => write!(f, "failed to read {}: {}", path, source),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io { source, .. } => Some(source),
            CollectError::Parse(_) => None,
        }
    }
}

/// Collects system-wide metrics from `/proc/`.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Mutable access to the underlying filesystem.
    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    fn read(&self, name: &str) -> Result<String, CollectError> {
        let path = format!("{}/{}", self.proc_path, name);
        self.fs
            .read_to_string(Path::new(&path))
            .map_err(|source| CollectError::Io { path, source })
    }

    /// Collects aggregate CPU counters from `/proc/stat`.
    pub fn collect_cpu_times(&self) -> Result<CpuTimes, CollectError> {
        let content = self.read("stat")?;
        parse_proc_stat_cpu_line(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Collects memory information from `/proc/meminfo`.
    pub fn collect_meminfo(&self) -> Result<MemInfo, CollectError> {
        let content = self.read("meminfo")?;
        parse_meminfo(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Collects per-interface byte counters from `/proc/net/dev`.
    pub fn collect_net_dev(&self) -> Result<Vec<NetDevStats>, CollectError> {
        let content = self.read("net/dev")?;
        parse_net_dev(&content).map_err(|e| CollectError::Parse(e.message))
    }

    /// Collects byte counters summed over all interfaces from `/proc/net/dev`.
    pub fn collect_net_totals(&self) -> Result<NetTotals, CollectError> {
        let devices = self.collect_net_dev()?;
        NetTotals::from_report(&devices).map_err(|e| CollectError::Parse(e.message))
    }
}
