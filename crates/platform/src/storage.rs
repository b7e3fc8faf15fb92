//! Storage abstraction for the on-board clip filesystem.
//!
//! The catalog only ever needs one directory listed once per boot; clip
//! content is read through the player's decoder. `list_dir` therefore returns
//! a fixed-capacity snapshot of file names rather than a streaming iterator.

use heapless::{String, Vec};

/// Maximum number of names one directory listing can return.
pub const MAX_DIR_ENTRIES: usize = 64;

/// Maximum length of a single file name in bytes.
pub const MAX_NAME_LEN: usize = 64;

/// One file name inside the clip directory.
pub type FileName = String<MAX_NAME_LEN>;

/// Snapshot of a directory's file names.
pub type DirListing = Vec<FileName, MAX_DIR_ENTRIES>;

/// Directory listing error.
///
/// `NotFound` is split out of the backend error so callers can take the soft
/// "directory absent — run with an empty catalog" path without downcasting.
#[derive(Debug)]
pub enum DirError<E> {
    /// The directory does not exist.
    NotFound,
    /// The listing exceeded [`MAX_DIR_ENTRIES`] or a name exceeded
    /// [`MAX_NAME_LEN`]. The device asset set must fit; treated as fatal.
    Capacity,
    /// Any other backend failure. Fatal.
    Backend(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for DirError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => f.write_str("directory not found"),
            Self::Capacity => f.write_str("directory listing over capacity"),
            Self::Backend(e) => write!(f, "storage error: {e:?}"),
        }
    }
}

/// Storage trait for file system access
pub trait Storage {
    /// Error type
    type Error: core::fmt::Debug;
    /// File type
    type File: File;

    /// List the file names directly inside `path` (no recursion, no ordering
    /// guarantee).
    fn list_dir(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<DirListing, DirError<Self::Error>>>;

    /// Open file for reading
    fn open_file(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<Self::File, Self::Error>>;

    /// Check if path exists
    fn exists(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<bool, Self::Error>>;
}

/// File trait for reading files
pub trait File {
    /// Error type
    type Error: core::fmt::Debug;

    /// Read from current position
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, Self::Error>>;

    /// Seek to position
    fn seek(&mut self, pos: u64) -> impl core::future::Future<Output = Result<u64, Self::Error>>;

    /// Get file size
    fn size(&self) -> u64;
}
