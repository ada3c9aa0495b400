//! syspulse - Live system metrics sampler library.
//!
//! Decodes `/proc/stat`, `/proc/meminfo` and `/proc/net/dev` into typed
//! counters and derives CPU utilization and network throughput from two
//! consecutive samples. Used by the `syspulse` binary.

pub mod collector;
pub mod output;
pub mod rates;
pub mod sampler;
