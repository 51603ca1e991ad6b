pub mod error;
mod file;
mod walk;

pub use self::file::{Scan, ScanEffort, hash_file, scan_file};
pub use self::walk::{ScanFailure, ScanReport, discover, scan};
