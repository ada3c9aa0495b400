//! System metrics collector for Linux.
//!
//! This module provides infrastructure for reading CPU, memory and network
//! counters from the Linux `/proc` filesystem, with support for mocking for
//! testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      SystemCollector                        │
//! │   - /proc/stat       -> parse_proc_stat_cpu_line            │
//! │   - /proc/meminfo    -> parse_meminfo                       │
//! │   - /proc/net/dev    -> parse_net_dev_line (per row)        │
//! │                            │                                │
//! │                     ┌──────▼──────┐                         │
//! │                     │  FileSystem │ (trait)                 │
//! │                     └──────┬──────┘                         │
//! └────────────────────────────┼────────────────────────────────┘
//!                              │
//!                     ┌────────┴────────┐
//!                     │                 │
//!              ┌──────▼──────┐   ┌──────▼──────┐
//!              │   RealFs    │   │   MockFs    │
//!              │  (Linux)    │   │  (Testing)  │
//!              └─────────────┘   └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use syspulse::collector::{RealFs, SystemCollector};
//!
//! let collector = SystemCollector::new(RealFs::new(), "/proc");
//! let cpu = collector.collect_cpu_times().unwrap();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use syspulse::collector::{MockFs, SystemCollector};
//!
//! let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
//! let mem = collector.collect_meminfo().unwrap();
//! assert_eq!(mem.mem_total, 16384000);
//! ```

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{CollectError, ParseError, SystemCollector};
pub use traits::{FileSystem, RealFs};
