//! File system primitives.
//!
//! [`entry::DirectoryEntry`] describes one listed entry, [`ops`] reads
//! directories and mutates single paths, and [`collision`] picks a free
//! destination name for paste.

pub mod collision;
pub mod entry;
pub mod ops;
