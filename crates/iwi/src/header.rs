//! IWI header and version table.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Layout, Result};

/// Game that wrote an IWI file.
///
/// Several games share a version byte, so a header can only narrow the writer
/// down to a set of candidates (see [`Game::candidates`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    Cod2,
    Cod4,
    Cod5,
    Mw2,
    Mw3,
    Bo1,
    Bo2,
}

impl Game {
    /// All known games, in release order.
    pub const ALL: [Game; 7] = [
        Game::Cod2,
        Game::Cod4,
        Game::Cod5,
        Game::Mw2,
        Game::Mw3,
        Game::Bo1,
        Game::Bo2,
    ];

    /// Version byte written by this game.
    pub const fn version(self) -> u8 {
        match self {
            Game::Cod2 => 0x05,
            Game::Cod4 | Game::Cod5 => 0x06,
            Game::Mw2 | Game::Mw3 => 0x08,
            Game::Bo1 => 0x0D,
            Game::Bo2 => 0x1B,
        }
    }

    /// File layout used by this game.
    pub const fn layout(self) -> Layout {
        match self {
            Game::Cod2 | Game::Cod4 | Game::Cod5 => Layout::Legacy,
            Game::Mw2 | Game::Mw3 => Layout::ModernWarfare,
            Game::Bo1 => Layout::BlackOps,
            Game::Bo2 => Layout::BlackOps2,
        }
    }

    /// Human-readable title.
    pub const fn name(self) -> &'static str {
        match self {
            Game::Cod2 => "Call of Duty 2",
            Game::Cod4 => "Call of Duty 4",
            Game::Cod5 => "Call of Duty: World at War",
            Game::Mw2 => "Modern Warfare 2",
            Game::Mw3 => "Modern Warfare 3",
            Game::Bo1 => "Black Ops",
            Game::Bo2 => "Black Ops II",
        }
    }

    /// Games that write the given version byte.
    pub fn candidates(version: u8) -> impl Iterator<Item = Game> {
        Self::ALL.into_iter().filter(move |g| g.version() == version)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Version bytes accepted by the decoder, one per [`Game::ALL`] entry.
pub const SUPPORTED_VERSIONS: [u8; 7] = {
    let mut versions = [0u8; 7];
    let mut i = 0;
    while i < Game::ALL.len() {
        versions[i] = Game::ALL[i].version();
        i += 1;
    }
    versions
};

/// IWI file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct IwiHeader {
    /// Magic tag ("IWi").
    pub magic: [u8; 3],
    /// Format version.
    pub version: u8,
}

impl IwiHeader {
    /// The magic bytes at the start of an IWI file.
    pub const MAGIC: &'static [u8; 3] = b"IWi";

    /// Size of the header in bytes.
    pub const SIZE: usize = 4;

    /// Check the magic tag and version, returning the layout to use.
    pub fn validate(&self) -> Result<Layout> {
        if &self.magic != Self::MAGIC {
            return Err(Error::InvalidMagic(self.magic));
        }
        Layout::from_version(self.version).ok_or(Error::UnsupportedVersion(self.version))
    }

    /// Check if this header would pass [`validate`](Self::validate).
    pub fn is_supported(&self) -> bool {
        &self.magic == Self::MAGIC && SUPPORTED_VERSIONS.contains(&self.version)
    }

    /// Games that may have written this file.
    pub fn games(&self) -> impl Iterator<Item = Game> {
        Game::candidates(self.version)
    }
}

#[cfg(test)]
mod tests {
    use iwi_common::BinaryReader;

    use super::*;

    fn header(version: u8) -> IwiHeader {
        IwiHeader {
            magic: *IwiHeader::MAGIC,
            version,
        }
    }

    #[test]
    fn test_supported_versions() {
        assert_eq!(SUPPORTED_VERSIONS, [0x05, 0x06, 0x06, 0x08, 0x08, 0x0D, 0x1B]);

        for version in SUPPORTED_VERSIONS {
            assert!(header(version).is_supported());
            assert!(header(version).validate().is_ok());
        }
    }

    #[test]
    fn test_unknown_versions_rejected() {
        for version in (0..=u8::MAX).filter(|v| !SUPPORTED_VERSIONS.contains(v)) {
            let h = header(version);
            assert!(!h.is_supported());
            assert!(matches!(h.validate(), Err(Error::UnsupportedVersion(v)) if v == version));
        }
    }

    #[test]
    fn test_bad_magic_rejected() {
        for magic in [*b"IWI", *b"iWi", *b"DDS", [0, 0, 0]] {
            let h = IwiHeader { magic, version: 0x06 };
            assert!(!h.is_supported());
            assert!(matches!(h.validate(), Err(Error::InvalidMagic(m)) if m == magic));
        }
    }

    #[test]
    fn test_read_from_bytes() {
        let mut reader = BinaryReader::new(b"IWi\x1b\xff");
        let h: IwiHeader = reader.read_struct().unwrap();

        assert_eq!(reader.position(), IwiHeader::SIZE);
        assert_eq!(h, header(0x1B));
        assert_eq!(h.validate().unwrap(), Layout::BlackOps2);
    }

    #[test]
    fn test_shared_version_candidates() {
        let games: Vec<_> = Game::candidates(0x06).collect();
        assert_eq!(games, vec![Game::Cod4, Game::Cod5]);

        let games: Vec<_> = header(0x08).games().collect();
        assert_eq!(games, vec![Game::Mw2, Game::Mw3]);

        assert_eq!(Game::candidates(0x07).count(), 0);
    }

    #[test]
    fn test_games_sharing_a_version_share_a_layout() {
        for game in Game::ALL {
            for other in Game::candidates(game.version()) {
                assert_eq!(game.layout(), other.layout());
            }
        }
    }
}
