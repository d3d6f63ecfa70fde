//! Minimal sfnt offset-table reader.
//!
//! The converter embeds whatever bytes it is given. This only looks at the
//! first 12 bytes so we can say something useful in the logs about what is
//! being embedded.

use std::fmt;
use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};

/// Length of the offset table at the start of every sfnt file.
pub const OFFSET_TABLE_LEN: usize = 12;

/// Kind of font file, from the leading version tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Flavor {
    /// `0x00010000`, the usual TrueType tag.
    TrueType,
    /// `true`, used by older Apple fonts.
    AppleTrueType,
    /// `OTTO`, CFF outlines.
    OpenTypeCff,
    /// `ttcf`, a collection. The fields after the tag mean something else.
    Collection,
    Unknown(u32),
}

impl Flavor {
    fn from_tag(tag: u32) -> Self {
        match tag {
            0x0001_0000 => Flavor::TrueType,
            0x7472_7565 => Flavor::AppleTrueType,
            0x4F54_544F => Flavor::OpenTypeCff,
            0x7474_6366 => Flavor::Collection,
            other => Flavor::Unknown(other),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OffsetTable {
    pub flavor: Flavor,
    pub num_tables: u16,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl OffsetTable {
    /// Reads the offset table from the start of `input`.
    pub fn read(mut input: impl Read) -> io::Result<Self> {
        let flavor = Flavor::from_tag(input.read_u32::<BigEndian>()?);
        Ok(OffsetTable {
            flavor,
            num_tables: input.read_u16::<BigEndian>()?,
            search_range: input.read_u16::<BigEndian>()?,
            entry_selector: input.read_u16::<BigEndian>()?,
            range_shift: input.read_u16::<BigEndian>()?,
        })
    }

    /// Whether the binary-search fields agree with `num_tables`. Fonts that
    /// fail this usually still load, but it's a good sign of a truncated or
    /// mislabeled file.
    pub fn is_consistent(&self) -> bool {
        let n = u32::from(self.num_tables);
        if n == 0 {
            return false;
        }
        // Largest power of two <= n.
        let pow = 1u32 << (31 - n.leading_zeros());
        let search_range = pow * 16;
        u32::from(self.search_range) == search_range
            && u32::from(self.entry_selector) == pow.trailing_zeros()
            && u32::from(self.range_shift) == n * 16 - search_range
    }
}

impl fmt::Display for OffsetTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} sfnt, {} tables", self.flavor, self.num_tables)?;
        if !self.is_consistent() {
            write!(f, " (inconsistent search fields)")?;
        }
        Ok(())
    }
}

/// Returns the offset table if `data` looks like an sfnt font.
///
/// Data that is too short, or carries an unknown version tag, gives `None`.
/// For collections only `flavor` is meaningful.
pub fn probe(data: &[u8]) -> Option<OffsetTable> {
    if data.len() < OFFSET_TABLE_LEN {
        return None;
    }
    let table = OffsetTable::read(data).ok()?;
    match table.flavor {
        Flavor::Unknown(_) => None,
        _ => Some(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(tag: &[u8; 4], num_tables: u16) -> Vec<u8> {
        let pow = 1u16 << (15 - num_tables.leading_zeros());
        let mut v = tag.to_vec();
        v.extend_from_slice(&num_tables.to_be_bytes());
        v.extend_from_slice(&(pow * 16).to_be_bytes());
        v.extend_from_slice(&(pow.trailing_zeros() as u16).to_be_bytes());
        v.extend_from_slice(&(num_tables * 16 - pow * 16).to_be_bytes());
        v
    }

    #[test]
    fn truetype_header() {
        let data = header(&[0, 1, 0, 0], 17);
        let table = probe(&data).unwrap();
        assert_eq!(table.flavor, Flavor::TrueType);
        assert_eq!(table.num_tables, 17);
        assert_eq!(table.search_range, 256);
        assert_eq!(table.entry_selector, 4);
        assert_eq!(table.range_shift, 16);
        assert!(table.is_consistent());
    }

    #[test]
    fn other_flavors() {
        assert_eq!(probe(&header(b"OTTO", 9)).unwrap().flavor, Flavor::OpenTypeCff);
        assert_eq!(probe(&header(b"true", 9)).unwrap().flavor, Flavor::AppleTrueType);
        assert_eq!(probe(&header(b"ttcf", 1)).unwrap().flavor, Flavor::Collection);
    }

    #[test]
    fn rejects_short_and_unknown() {
        assert_eq!(probe(&[]), None);
        assert_eq!(probe(&[0, 1, 0, 0, 0]), None);
        assert_eq!(probe(&header(b"wOFF", 3)), None);
    }

    #[test]
    fn inconsistent_search_fields() {
        let mut data = header(&[0, 1, 0, 0], 17);
        // Corrupt rangeShift.
        data[11] ^= 1;
        let table = probe(&data).unwrap();
        assert!(!table.is_consistent());
        assert!(table.to_string().ends_with("(inconsistent search fields)"));
    }
}
