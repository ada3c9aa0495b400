//! Rendering of samples as a JSON record or a refreshing text screen.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::collector::procfs::parser::MemInfo;
use crate::sampler::Sample;

/// Output mode of the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Clear the terminal and print labeled lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Writes the number with exactly two decimals, e.g. `0.00` or `12.50`.
fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let raw = RawValue::from_string(format!("{:.2}", value)).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

#[derive(Serialize)]
struct SampleRecord {
    #[serde(serialize_with = "two_decimals")]
    cpu_usage_percent: f64,
    net: NetRecord,
    mem: Option<MemRecord>,
}

#[derive(Serialize)]
struct NetRecord {
    #[serde(serialize_with = "two_decimals")]
    rx_bps: f64,
    #[serde(serialize_with = "two_decimals")]
    tx_bps: f64,
}

#[derive(Serialize)]
struct MemRecord {
    total_kb: u64,
    free_kb: u64,
    available_kb: u64,
    buffers_kb: u64,
    cached_kb: u64,
}

impl From<&MemInfo> for MemRecord {
    fn from(mem: &MemInfo) -> Self {
        Self {
            total_kb: mem.mem_total,
            free_kb: mem.mem_free,
            available_kb: mem.mem_available,
            buffers_kb: mem.buffers,
            cached_kb: mem.cached,
        }
    }
}

impl From<&Sample> for SampleRecord {
    fn from(sample: &Sample) -> Self {
        Self {
            cpu_usage_percent: sample.cpu_usage_percent,
            net: NetRecord {
                rx_bps: sample.rx_bps,
                tx_bps: sample.tx_bps,
            },
            mem: sample.mem.as_ref().map(MemRecord::from),
        }
    }
}

/// Renders a sample as a single-line JSON object (no trailing newline).
///
/// Rates and percentages are printed with exactly two decimals; `mem` is
/// `null` when memory was unavailable.
pub fn render_json(sample: &Sample) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SampleRecord::from(sample))
}

/// Renders a sample as labeled lines for the text screen.
pub fn render_text(sample: &Sample) -> String {
    let mut out = format!(
        "CPU usage: {:.2}%\nNet RX: {:.2} Bps\nNet TX: {:.2} Bps\n",
        sample.cpu_usage_percent, sample.rx_bps, sample.tx_bps
    );
    if let Some(mem) = &sample.mem {
        out.push_str(&format!(
            "MemTotal: {} kB\nMemFree: {} kB\nMemAvailable: {} kB\nBuffers: {} kB\nCached: {} kB\n",
            mem.mem_total, mem.mem_free, mem.mem_available, mem.buffers, mem.cached
        ));
    }
    out
}

/// Writes one sample in the requested format and flushes.
///
/// Text output clears the screen and homes the cursor first.
pub fn write_sample<W: Write>(
    out: &mut W,
    sample: &Sample,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let line = render_json(sample)?;
            writeln!(out, "{}", line)?;
        }
        OutputFormat::Text => {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            out.write_all(render_text(sample).as_bytes())?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(mem: Option<MemInfo>) -> Sample {
        Sample {
            cpu_usage_percent: 66.666666,
            rx_bps: 1536.0,
            tx_bps: 0.0,
            mem,
        }
    }

    fn mem() -> MemInfo {
        MemInfo {
            mem_total: 16384000,
            mem_free: 8192000,
            mem_available: 12000000,
            buffers: 512000,
            cached: 2048000,
        }
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample(Some(mem()))).unwrap();

        assert_eq!(
            json,
            "{\"cpu_usage_percent\":66.67,\"net\":{\"rx_bps\":1536.00,\"tx_bps\":0.00},\
             \"mem\":{\"total_kb\":16384000,\"free_kb\":8192000,\"available_kb\":12000000,\
             \"buffers_kb\":512000,\"cached_kb\":2048000}}"
        );
    }

    #[test]
    fn test_render_json_without_mem() {
        let json = render_json(&sample(None)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["mem"].is_null());
        assert_eq!(value["net"]["rx_bps"], 1536.0);
    }

    #[test]
    fn test_render_json_fixed_decimals() {
        let sample = Sample {
            cpu_usage_percent: 0.0,
            rx_bps: 1536.0,
            tx_bps: 12.5,
            mem: None,
        };
        let json = render_json(&sample).unwrap();

        assert_eq!(
            json,
            "{\"cpu_usage_percent\":0.00,\"net\":{\"rx_bps\":1536.00,\"tx_bps\":12.50},\"mem\":null}"
        );
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample(Some(mem())));

        assert!(text.starts_with("CPU usage: 66.67%\n"));
        assert!(text.contains("Net RX: 1536.00 Bps\n"));
        assert!(text.contains("Net TX: 0.00 Bps\n"));
        assert!(text.contains("MemAvailable: 12000000 kB\n"));
        assert!(text.ends_with("Cached: 2048000 kB\n"));
    }

    #[test]
    fn test_render_text_without_mem() {
        let text = render_text(&sample(None));

        assert_eq!(text.lines().count(), 3);
        assert!(!text.contains("MemTotal"));
    }

    #[test]
    fn test_write_sample_json_is_one_line() {
        let mut buf = Vec::new();
        write_sample(&mut buf, &sample(None), OutputFormat::Json).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert!(out.ends_with("}\n"));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_write_sample_text_clears_screen() {
        let mut buf = Vec::new();
        write_sample(&mut buf, &sample(None), OutputFormat::Text).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("\x1b[2J"));
        assert!(out.contains("CPU usage: 66.67%"));
    }
}
