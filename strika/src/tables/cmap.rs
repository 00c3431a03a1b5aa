//! The [cmap](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap) table

use types::{GlyphId, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::TopLevelTable;

/// The Windows platform id, the only platform consulted here.
const WINDOWS_PLATFORM_ID: u16 = 3;

/// The character-to-glyph index mapping table.
///
/// Reading resolves the subtable directory down to a single Windows
/// format 4 subtable; fonts that carry no such subtable fail to load.
#[derive(Clone, Debug)]
pub struct Cmap {
    subtable: Cmap4,
}

impl TopLevelTable for Cmap {
    const TAG: Tag = Tag::new(b"cmap");
}

impl Cmap {
    /// Map a codepoint to a nominal glyph identifier.
    ///
    /// Returns `None` when the codepoint maps to ".notdef" (glyph 0) or
    /// lies outside the basic multilingual plane, the limit of what a
    /// format 4 subtable can encode.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        self.subtable.map_codepoint(codepoint)
    }
}

impl<'a> FontRead<'a> for Cmap {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // version
        let num_tables: u16 = cursor.read()?;
        for _ in 0..num_tables {
            let platform_id: u16 = cursor.read()?;
            cursor.advance::<u16>(); // encodingID
            let offset: u32 = cursor.read()?;
            if platform_id != WINDOWS_PLATFORM_ID {
                continue;
            }
            // subtable offsets are relative to the start of the cmap table
            let subtable_data = data.split_off(offset as usize).ok_or(ReadError::OutOfBounds)?;
            if subtable_data.read_at::<u16>(0)? == 4 {
                let subtable = Cmap4::read(subtable_data)?;
                return Ok(Cmap { subtable });
            }
        }
        Err(ReadError::MalformedData("no Windows format 4 cmap subtable"))
    }
}

/// A format 4 "segment mapping to delta values" subtable, with its
/// parallel segment arrays decoded up front.
#[derive(Clone, Debug)]
pub struct Cmap4 {
    end_code: Vec<u16>,
    start_code: Vec<u16>,
    id_delta: Vec<i16>,
    // idRangeOffset and the glyph id array that follows it, as one block:
    // each offset is in bytes, relative to its own position in this block.
    id_range_offsets: Vec<u16>,
}

impl Cmap4 {
    /// The number of segments in the subtable.
    pub fn seg_count(&self) -> usize {
        self.end_code.len()
    }

    /// Map a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        if codepoint > 0xFFFF {
            return None;
        }
        let codepoint = codepoint as u16;
        let seg = self.end_code.iter().position(|end| *end >= codepoint)?;
        let start = self.start_code.get(seg).copied()?;
        if start > codepoint {
            // between segments
            return None;
        }
        let delta = self.id_delta.get(seg).copied()?;
        let range_offset = self.id_range_offsets.get(seg).copied()?;
        let glyph_id = if range_offset == 0 {
            (codepoint as i32 + delta as i32) as u16
        } else if start < codepoint {
            //NOTE: only code points strictly above the segment start take the
            // indirect path; one equal to the start resolves through the delta
            // arm or not at all.
            let word = seg + range_offset as usize / 2 + (codepoint - start) as usize;
            match self.id_range_offsets.get(word).copied().unwrap_or(0) {
                0 => return None,
                glyph => (glyph as i32 + delta as i32) as u16,
            }
        } else {
            return None;
        };
        match glyph_id {
            0 => None,
            id => Some(GlyphId::new(id)),
        }
    }
}

impl<'a> FontRead<'a> for Cmap4 {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != 4 {
            return Err(ReadError::InvalidFormat(format as i64));
        }
        let length: u16 = cursor.read()?;
        cursor.advance::<u16>(); // language
        let seg_count_x2: u16 = cursor.read()?;
        let seg_count = seg_count_x2 as usize / 2;
        cursor.advance::<u16>(); // searchRange
        cursor.advance::<u16>(); // entrySelector
        cursor.advance::<u16>(); // rangeShift
        let end_code = cursor.read_vec(seg_count)?;
        cursor.advance::<u16>(); // reservedPad
        let start_code = cursor.read_vec(seg_count)?;
        let id_delta = cursor.read_vec(seg_count)?;
        // everything up to `length` belongs to idRangeOffset and the glyph
        // id array; tolerate a length field that overruns the actual data
        let header_len = 16 + 6 * seg_count;
        let tail_len = (length as usize)
            .saturating_sub(header_len)
            .min(cursor.remaining_bytes());
        let id_range_offsets = cursor.read_vec(tail_len / 2)?;
        if id_range_offsets.len() < seg_count {
            return Err(ReadError::OutOfBounds);
        }
        Ok(Cmap4 {
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
        })
    }
}

#[cfg(test)]
mod tests {
    use sfnt_test_data::cmap as test_data;

    use super::*;

    fn windows_cmap() -> Cmap {
        let table = test_data::windows_format4();
        Cmap::read(FontData::new(table.as_slice())).unwrap()
    }

    #[test]
    fn basic_latin_deltas() {
        let cmap = windows_cmap();
        assert_eq!(cmap.map_codepoint('A'), Some(GlyphId::new(1)));
        assert_eq!(cmap.map_codepoint('Z'), Some(GlyphId::new(26)));
        assert_eq!(cmap.map_codepoint('M'), Some(GlyphId::new(13)));
    }

    #[test]
    fn unmapped_codepoints_are_notdef() {
        let cmap = windows_cmap();
        // below, between and above the mapped segment
        assert_eq!(cmap.map_codepoint(0u32), None);
        assert_eq!(cmap.map_codepoint('@'), None);
        assert_eq!(cmap.map_codepoint('a'), None);
        // the terminal segment maps 0xFFFF back to zero
        assert_eq!(cmap.map_codepoint(0xFFFFu32), None);
        // outside the basic multilingual plane
        assert_eq!(cmap.map_codepoint('🦀'), None);
    }

    #[test]
    fn segment_gaps() {
        let table = test_data::format4_gap_subtable();
        let cmap = Cmap4::read(FontData::new(table.as_slice())).unwrap();
        assert_eq!(cmap.map_codepoint(' '), Some(GlyphId::new(35)));
        assert_eq!(cmap.map_codepoint(64u32), Some(GlyphId::new(67)));
        assert_eq!(cmap.map_codepoint(65u32), None);
        assert_eq!(cmap.map_codepoint(127u32), None);
        assert_eq!(cmap.map_codepoint(128u32), Some(GlyphId::new(28)));
        assert_eq!(cmap.map_codepoint(160u32), Some(GlyphId::new(60)));
        assert_eq!(cmap.map_codepoint(161u32), None);
    }

    #[test]
    fn indirect_glyph_id_array() {
        let table = test_data::format4_indirect_subtable();
        let cmap = Cmap4::read(FontData::new(table.as_slice())).unwrap();
        // the segment start never reaches the indirect array
        assert_eq!(cmap.map_codepoint(10u32), None);
        // a zero in the glyph id array stays .notdef
        assert_eq!(cmap.map_codepoint(11u32), None);
        assert_eq!(cmap.map_codepoint(12u32), Some(GlyphId::new(102)));
        assert_eq!(cmap.map_codepoint(13u32), Some(GlyphId::new(103)));
    }

    #[test]
    fn no_windows_subtable() {
        let table = test_data::macintosh_only();
        let result = Cmap::read(FontData::new(table.as_slice()));
        assert!(matches!(result, Err(ReadError::MalformedData(_))));
    }

    #[test]
    fn lookup_is_total() {
        let table = test_data::windows_format4();
        let cmap = Cmap::read(FontData::new(table.as_slice())).unwrap();
        for codepoint in 0u32..=0xFFFF {
            let expected = match codepoint {
                65..=90 => Some(GlyphId::new(codepoint as u16 - 64)),
                _ => None,
            };
            assert_eq!(cmap.map_codepoint(codepoint), expected);
        }
    }
}
