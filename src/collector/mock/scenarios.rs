//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` filesystem states, plus helpers
//! for rewriting the counters between two samples.

use super::filesystem::MockFs;
use crate::collector::procfs::parser::CpuTimes;

impl MockFs {
    /// Creates a typical 4-core system with loopback and one ethernet device.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
Dirty:              1024 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );
        fs.add_file(
            "/proc/net/dev",
            "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321   654321    5   10    0     0          0       100 123456789   456789    2    5    0     0       0          0
",
        );

        fs
    }

    /// Rewrites `/proc/stat` so the aggregate line carries `cpu`.
    pub fn set_cpu_counters(&mut self, cpu: CpuTimes) {
        self.add_file(
            "/proc/stat",
            format!(
                "cpu  {} {} {} {} {} {} {} {} 0 0\ncpu0 0 0 0 0 0 0 0 0 0 0\nctxt 500000\n",
                cpu.user,
                cpu.nice,
                cpu.system,
                cpu.idle,
                cpu.iowait,
                cpu.irq,
                cpu.softirq,
                cpu.steal
            ),
        );
    }

    /// Rewrites `/proc/net/dev` with one row per `(name, rx_bytes, tx_bytes)`.
    pub fn set_net_counters(&mut self, devices: &[(&str, u64, u64)]) {
        let mut content = String::from(
            "Inter-|   Receive                                                |  Transmit\n \
             face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n",
        );
        for (name, rx, tx) in devices {
            content.push_str(&format!(
                "{:>6}: {} 0 0 0 0 0 0 0 {} 0 0 0 0 0 0 0\n",
                name, rx, tx
            ));
        }
        self.add_file("/proc/net/dev", content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::procfs::parser::{
        parse_meminfo, parse_net_dev_totals, parse_proc_stat_cpu_line,
    };
    use crate::collector::traits::FileSystem;
    use std::path::Path;

    fn read(fs: &MockFs, path: &str) -> String {
        fs.read_to_string(Path::new(path)).unwrap()
    }

    #[test]
    fn test_typical_system_parses() {
        let fs = MockFs::typical_system();

        assert_eq!(
            parse_proc_stat_cpu_line(&read(&fs, "/proc/stat")).unwrap().user,
            10000
        );
        assert_eq!(
            parse_meminfo(&read(&fs, "/proc/meminfo")).unwrap().mem_total,
            16384000
        );
        assert_eq!(
            parse_net_dev_totals(&read(&fs, "/proc/net/dev"))
                .unwrap()
                .interfaces,
            2
        );
    }

    #[test]
    fn test_set_counters() {
        let mut fs = MockFs::new();
        let cpu = CpuTimes {
            user: 7,
            steal: 3,
            ..CpuTimes::default()
        };
        fs.set_cpu_counters(cpu);
        fs.set_net_counters(&[("lo", 10, 10), ("eth0", 100, 200)]);

        assert_eq!(parse_proc_stat_cpu_line(&read(&fs, "/proc/stat")).unwrap(), cpu);

        let totals = parse_net_dev_totals(&read(&fs, "/proc/net/dev")).unwrap();
        assert_eq!(totals.rx_bytes, 110);
        assert_eq!(totals.tx_bytes, 210);
    }
}
