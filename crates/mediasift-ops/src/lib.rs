//! File operations for mediasift.
//!
//! Synchronous helpers used when a media server caches artwork or mirrors
//! files: recursive directory creation, buffered copy, and hard linking with
//! a symbolic-link fallback. Every failure is returned as an
//! [`OpsError`]; the caller decides whether it is fatal.

mod copy;
mod create;
mod link;

pub use copy::{copy_file, COPY_BUFFER_SIZE};
pub use create::{make_dir, make_dir_ex, DEFAULT_DIR_MODE};
pub use link::{link_file, link_file_with, LinkMethod, Linker, SystemLinker};

pub use mediasift_core::OpsError;
