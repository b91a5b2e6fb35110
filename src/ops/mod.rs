//! High-level operations.
//!
//! These implement the scan on top of an open [`Handle`](crate::db::Handle).

pub mod foreign;
pub mod provides;
pub mod report;
pub mod scan;

pub use foreign::{find_foreign_packages, is_foreign};
pub use provides::{find_provider, Provider};
pub use report::{find_candidates, write_report, Candidate};
pub use scan::{exit_status, init, run, scan, ScanOptions};
