//! Core data structures for pacscan.

pub mod depend;
pub mod package;
pub mod version;

pub use depend::{DepMod, Depend};
pub use package::Package;
pub use version::vercmp;
