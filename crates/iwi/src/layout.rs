//! Version-dependent placement of the info block and offset table.

use std::fmt;

use crate::Game;

/// Where the info block and mip offset table live in a file.
///
/// Later engines grew the header without changing the magic tag, so the
/// version byte is the only way to tell these apart. All positions are
/// absolute; bytes skipped over by a seek are never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// CoD2 / CoD4 / WaW: info follows the header, 4 offsets follow the info.
    Legacy,
    /// MW2 / MW3: info at 0x08, 4 offsets follow the info.
    ModernWarfare,
    /// Black Ops: info follows the header, 8 offsets at 0x10.
    BlackOps,
    /// Black Ops II: info follows the header, 8 offsets at 0x20.
    BlackOps2,
}

impl Layout {
    /// Resolve the layout for a version byte.
    pub fn from_version(version: u8) -> Option<Self> {
        Game::candidates(version).next().map(Game::layout)
    }

    /// Absolute position of the info block, if it does not directly follow
    /// the header.
    pub const fn info_position(self) -> Option<usize> {
        match self {
            Layout::ModernWarfare => Some(0x08),
            Layout::Legacy | Layout::BlackOps | Layout::BlackOps2 => None,
        }
    }

    /// Absolute position of the offset table, if it does not directly follow
    /// the info block.
    pub const fn table_position(self) -> Option<usize> {
        match self {
            Layout::BlackOps => Some(0x10),
            Layout::BlackOps2 => Some(0x20),
            Layout::Legacy | Layout::ModernWarfare => None,
        }
    }

    /// Number of entries in the offset table.
    pub const fn offset_count(self) -> usize {
        match self {
            Layout::Legacy | Layout::ModernWarfare => 4,
            Layout::BlackOps | Layout::BlackOps2 => 8,
        }
    }

    /// Short name for display.
    pub const fn name(self) -> &'static str {
        match self {
            Layout::Legacy => "legacy",
            Layout::ModernWarfare => "mw2/mw3",
            Layout::BlackOps => "bo1",
            Layout::BlackOps2 => "bo2",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
