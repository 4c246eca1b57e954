//! Per-directory cursor memory and its persistence.
//!
//! [`CursorMemory`] maps absolute directories to the last [`Position`] seen
//! there. It is bounded: once `capacity` directories are stored, remembering
//! a new one evicts the directory that was left longest ago. Persistence is
//! abstracted behind [`CursorStore`] so the navigator never touches disk
//! directly; [`JsonCursorStore`] is the file-backed implementation.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default number of directories kept before eviction starts.
pub const DEFAULT_CAPACITY: usize = 512;

/// A cursor row plus the first visible row of the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub cursor_index: usize,
    pub viewport_offset: usize,
}

impl Position {
    pub fn new(cursor_index: usize, viewport_offset: usize) -> Self {
        Self {
            cursor_index,
            viewport_offset,
        }
    }
}

/// LRU-bounded map from directory to last cursor position.
///
/// Insertion order doubles as recency order: the front of the map is the
/// least recently remembered directory. All mutation methods consume `self`
/// and return a new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMemory {
    capacity: usize,
    positions: IndexMap<PathBuf, Position>,
}

impl Default for CursorMemory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl CursorMemory {
    /// Creates an empty memory. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            positions: IndexMap::new(),
        }
    }

    /// Returns a copy with a new capacity, evicting the oldest entries if the
    /// map is now over the limit.
    pub fn with_capacity(self, capacity: usize) -> Self {
        let mut memory = Self {
            capacity: capacity.max(1),
            ..self
        };
        memory.evict();
        memory
    }

    /// Records `position` for `dir`, marking it most recently used.
    pub fn remember(mut self, dir: &Path, position: Position) -> Self {
        self.positions.shift_remove(dir);
        self.positions.insert(dir.to_path_buf(), position);
        self.evict();
        self
    }

    /// Returns the stored position for `dir`, if any.
    pub fn recall(&self, dir: &Path) -> Option<Position> {
        self.positions.get(dir).copied()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn evict(&mut self) {
        while self.positions.len() > self.capacity {
            if let Some((dir, _)) = self.positions.shift_remove_index(0) {
                tracing::debug!(dir = %dir.display(), "evicted cursor memory entry");
            }
        }
    }
}

/// On-disk shape of the memory. Capacity is a runtime setting, not data.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPositions {
    #[serde(default)]
    positions: IndexMap<PathBuf, Position>,
}

/// Load/save seam for cursor memory persistence.
pub trait CursorStore {
    /// Reads the stored memory. Missing or unreadable data yields an empty
    /// memory; failures are never surfaced.
    fn load(&self) -> CursorMemory;

    /// Writes `memory`. Failures are swallowed.
    fn save(&self, memory: &CursorMemory);
}

/// JSON file store, by default at `~/.config/gfd/cursor_memory.json`.
#[derive(Debug, Clone)]
pub struct JsonCursorStore {
    path: PathBuf,
}

impl JsonCursorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CursorStore for JsonCursorStore {
    fn load(&self) -> CursorMemory {
        let stored: StoredPositions = match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::debug!(path = %self.path.display(), "ignoring corrupt cursor store: {e}");
                StoredPositions::default()
            }),
            Err(_) => StoredPositions::default(),
        };

        let memory = CursorMemory::default();
        stored
            .positions
            .into_iter()
            .fold(memory, |memory, (dir, pos)| memory.remember(&dir, pos))
    }

    fn save(&self, memory: &CursorMemory) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let stored = StoredPositions {
            positions: memory.positions.clone(),
        };
        let result = serde_json::to_string_pretty(&stored)
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(&self.path, json));
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), "failed to save cursor memory: {e}");
        }
    }
}
