//! System abstraction for filesystem operations
//!
//! Configuration files are read through this trait so that tests can run
//! against an in-memory filesystem.

use std::io;
use std::path::Path;

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Filesystem operations needed by the configuration loader
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::fs`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path points to an existing file
    fn exists(&self, path: &Path) -> bool;
}
