//! Navigation logic.
//!
//! - [`selection::Selection`]: cursor, viewport and multi-selection.
//! - [`directory::DirectoryState`]: the current directory and its listing.
//! - [`memory::CursorMemory`]: remembered positions per directory.
//! - [`controller::Navigator`]: transitions wiring the three together.
//! - [`filter`]: hidden-file policy and listing order.

pub mod controller;
pub mod directory;
pub mod filter;
pub mod memory;
pub mod selection;
