//! Configuration structs for the scanner and the guarded editor.

pub mod scan_config;

pub use scan_config::{EditConfig, ScanConfig};
