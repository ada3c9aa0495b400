//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of `/proc/stat`,
//! `/proc/meminfo` and `/proc/net/dev` into structured data. They never touch
//! the filesystem and never log, so they are easily testable with string inputs.

use std::fmt;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parses a counter made of ASCII digits only.
///
/// `str::parse` alone would also take a leading `+`.
fn parse_counter(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

// ============ CPU Stats Parser ============

/// Aggregate CPU counters from the `cpu` line of `/proc/stat`.
///
/// All values are cumulative clock ticks since boot. A single sample says
/// nothing about utilization; compare two samples with
/// [`cpu_usage_percent`](crate::rates::cpu_usage_percent).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuTimes {
    /// Sum of all eight counters.
    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }

    /// Ticks spent not doing work: `idle + iowait`.
    pub fn idle_total(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }

    /// Componentwise difference `self - prev`.
    ///
    /// Returns `None` if any counter went backwards, which happens when the
    /// counters were reset (reboot between samples) or wrapped.
    pub fn delta(&self, prev: &CpuTimes) -> Option<CpuTimes> {
        Some(CpuTimes {
            user: self.user.checked_sub(prev.user)?,
            nice: self.nice.checked_sub(prev.nice)?,
            system: self.system.checked_sub(prev.system)?,
            idle: self.idle.checked_sub(prev.idle)?,
            iowait: self.iowait.checked_sub(prev.iowait)?,
            irq: self.irq.checked_sub(prev.irq)?,
            softirq: self.softirq.checked_sub(prev.softirq)?,
            steal: self.steal.checked_sub(prev.steal)?,
        })
    }
}

const CPU_FIELDS: [&str; 8] = [
    "user", "nice", "system", "idle", "iowait", "irq", "softirq", "steal",
];

/// Parses the aggregate `cpu` line out of `/proc/stat` content.
///
/// Per-CPU lines (`cpu0`, `cpu1`, ...) are ignored. Exactly eight counters are
/// read after the marker; newer kernels append `guest` and `guest_nice`, which
/// are skipped.
///
/// Format:
/// cpu  10000 500 3000 80000 1000 200 100 0 0 0
pub fn parse_proc_stat_cpu_line(content: &str) -> Result<CpuTimes, ParseError> {
    let mut fields = content
        .lines()
        .find_map(|line| {
            let mut parts = line.split_whitespace();
            (parts.next() == Some("cpu")).then_some(parts)
        })
        .ok_or_else(|| ParseError::new("missing aggregate cpu line in stat"))?;

    let mut values = [0u64; 8];
    for (slot, name) in values.iter_mut().zip(CPU_FIELDS) {
        let raw = fields
            .next()
            .ok_or_else(|| ParseError::new(format!("missing cpu field {}", name)))?;
        *slot = parse_counter(raw)
            .ok_or_else(|| ParseError::new(format!("invalid cpu {}: {:?}", name, raw)))?;
    }

    let [user, nice, system, idle, iowait, irq, softirq, steal] = values;
    Ok(CpuTimes {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
        steal,
    })
}

// ============ Memory Info Parser ============

/// Parsed data from `/proc/meminfo`. All values are in kB.
///
/// Only `mem_total` is guaranteed to come from the report. The other fields
/// read as zero when their line is missing, so an absent field cannot be told
/// apart from one the kernel reported as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    pub mem_available: u64,
    pub buffers: u64,
    pub cached: u64,
}

/// Extracts the kB value from a meminfo line starting with `label`.
///
/// Accepts `Label: 1234 kB` and `Label:1234kB`. A missing or different unit,
/// or no leading integer, yields `None`.
fn parse_kb_value(line: &str, label: &str) -> Option<u64> {
    let rest = line
        .strip_prefix(label)?
        .trim_start_matches(|c: char| c == ':' || c.is_whitespace());

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value = rest[..digits_end].parse().ok()?;
    (rest[digits_end..].trim() == "kB").then_some(value)
}

/// Parses `/proc/meminfo` content.
///
/// Labels are matched as literal, case-sensitive prefixes at the start of the
/// line, so `SwapCached:` never feeds `cached`. Fails if no parseable
/// `MemTotal` line is present.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();
    let mut have_total = false;

    for line in content.lines() {
        if let Some(kb) = parse_kb_value(line, "MemTotal") {
            info.mem_total = kb;
            have_total = true;
        } else if let Some(kb) = parse_kb_value(line, "MemFree") {
            info.mem_free = kb;
        } else if let Some(kb) = parse_kb_value(line, "MemAvailable") {
            info.mem_available = kb;
        } else if let Some(kb) = parse_kb_value(line, "Buffers") {
            info.buffers = kb;
        } else if let Some(kb) = parse_kb_value(line, "Cached") {
            info.cached = kb;
        }
    }

    if !have_total {
        return Err(ParseError::new("missing MemTotal in meminfo"));
    }

    Ok(info)
}

// ============ Network Device Stats Parser ============

/// Network interface name, 1 to [`InterfaceName::MAX_LEN`] bytes.
///
/// Over-long names are rejected rather than truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceName(String);

impl InterfaceName {
    /// Longest accepted name in bytes.
    pub const MAX_LEN: usize = 31;

    pub fn new(name: &str) -> Result<Self, ParseError> {
        if name.is_empty() {
            return Err(ParseError::new("empty interface name"));
        }
        if name.len() > Self::MAX_LEN {
            return Err(ParseError::new(format!(
                "interface name too long: {} bytes, max {}",
                name.len(),
                Self::MAX_LEN
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Byte counters for one interface row of `/proc/net/dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetDevStats {
    /// Interface name (eth0, lo, etc.)
    pub name: InterfaceName,
    /// Bytes received
    pub rx_bytes: u64,
    /// Bytes transmitted
    pub tx_bytes: u64,
}

/// Outcome of decoding a single `/proc/net/dev` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetDevLine {
    /// An interface counter row.
    Stats(NetDevStats),
    /// A line without a colon, such as the two header lines.
    NotADataRow,
}

/// Number of counter columns after the interface name.
const NET_DEV_COLUMNS: usize = 16;
const RX_BYTES_COLUMN: usize = 0;
const TX_BYTES_COLUMN: usize = 8;

/// Longest `/proc/net/dev` line accepted by [`parse_net_dev`].
pub const MAX_NET_DEV_LINE_LEN: usize = 511;

/// Parses one line of `/proc/net/dev`.
///
/// Lines without a colon are reported as [`NetDevLine::NotADataRow`]. A line
/// with a colon must carry a valid interface name and at least 16 integer
/// counters; otherwise it is an error.
///
/// Format:
///   eth0: 9876543 5678 1 2 0 0 0 10 87654321 4321 3 4 0 0 0 0
pub fn parse_net_dev_line(line: &str) -> Result<NetDevLine, ParseError> {
    let Some((name, counters)) = line.split_once(':') else {
        return Ok(NetDevLine::NotADataRow);
    };

    let name = InterfaceName::new(name.trim())?;

    let mut values = counters.split_whitespace();
    let mut rx_bytes = 0;
    let mut tx_bytes = 0;
    for column in 0..NET_DEV_COLUMNS {
        let raw = values.next().ok_or_else(|| {
            ParseError::new(format!(
                "net/dev row for {} has {} counters, expected {}",
                name, column, NET_DEV_COLUMNS
            ))
        })?;
        let value = parse_counter(raw).ok_or_else(|| {
            ParseError::new(format!(
                "invalid counter {:?} in column {} for {}",
                raw, column, name
            ))
        })?;

        match column {
            RX_BYTES_COLUMN => rx_bytes = value,
            TX_BYTES_COLUMN => tx_bytes = value,
            _ => {}
        }
    }

    Ok(NetDevLine::Stats(NetDevStats {
        name,
        rx_bytes,
        tx_bytes,
    }))
}

/// Parses `/proc/net/dev` content into per-interface counters.
///
/// Header lines are skipped. Any malformed data row, or a line longer than
/// [`MAX_NET_DEV_LINE_LEN`], fails the whole report instead of silently
/// under-counting.
///
/// Format:
/// Inter-|   Receive                                                |  Transmit
///  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
///    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
pub fn parse_net_dev(content: &str) -> Result<Vec<NetDevStats>, ParseError> {
    let mut devices = Vec::new();

    for line in content.lines() {
        if line.is_empty() {
            continue;
        }
        if line.len() > MAX_NET_DEV_LINE_LEN {
            return Err(ParseError::new(format!(
                "net/dev line too long: {} bytes",
                line.len()
            )));
        }

        if let NetDevLine::Stats(stats) = parse_net_dev_line(line)? {
            devices.push(stats);
        }
    }

    Ok(devices)
}

/// Receive/transmit byte counters summed over every interface of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetTotals {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    /// Number of interface rows that were summed.
    pub interfaces: usize,
}

impl NetTotals {
    /// Sums the given interfaces. Loopback is not treated specially.
    pub fn sum<'a>(devices: impl IntoIterator<Item = &'a NetDevStats>) -> Self {
        devices
            .into_iter()
            .fold(Self::default(), |acc, dev| NetTotals {
                rx_bytes: acc.rx_bytes.saturating_add(dev.rx_bytes),
                tx_bytes: acc.tx_bytes.saturating_add(dev.tx_bytes),
                interfaces: acc.interfaces + 1,
            })
    }

    /// Sums the interfaces of one report, which must contain at least one row.
    pub fn from_report(devices: &[NetDevStats]) -> Result<Self, ParseError> {
        if devices.is_empty() {
            return Err(ParseError::new("no interface rows in net/dev"));
        }
        Ok(Self::sum(devices))
    }
}

/// Parses `/proc/net/dev` content and sums the byte counters of all interfaces.
///
/// Fails if the report is malformed or contains no interface rows.
pub fn parse_net_dev_totals(content: &str) -> Result<NetTotals, ParseError> {
    NetTotals::from_report(&parse_net_dev(content)?)
}
