//! The [loca](https://learn.microsoft.com/en-us/typography/opentype/spec/loca) table

use std::ops::Range;

use types::{GlyphId, Tag};

use crate::font_data::FontData;
use crate::read::ReadError;
use crate::TopLevelTable;

/// The glyph-offset index: `num_glyphs + 1` offsets into the `glyf` table.
///
/// The short format stores each offset divided by two; [`Loca::get_raw`]
/// undoes that, so callers always see byte offsets.
#[derive(Clone, Debug)]
pub enum Loca {
    Short(Vec<u16>),
    Long(Vec<u32>),
}

impl TopLevelTable for Loca {
    const TAG: Tag = Tag::new(b"loca");
}

impl Loca {
    /// Read a `loca` table.
    ///
    /// `is_long` comes from `index_to_loc_format` in the `head` table. A
    /// table shorter than `num_glyphs + 1` entries is read to the end
    /// rather than rejected; the missing final bound falls back to the
    /// end of `glyf` during range resolution.
    pub fn read_with_format(
        data: FontData<'_>,
        num_glyphs: u16,
        is_long: bool,
    ) -> Result<Self, ReadError> {
        let entries = num_glyphs as usize + 1;
        let mut cursor = data.cursor();
        if is_long {
            let entries = entries.min(data.len() / 4);
            Ok(Loca::Long(cursor.read_vec(entries)?))
        } else {
            let entries = entries.min(data.len() / 2);
            Ok(Loca::Short(cursor.read_vec(entries)?))
        }
    }

    /// The number of offsets in the table.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(offsets) => offsets.len(),
            Loca::Long(offsets) => offsets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempt to return the byte offset for the given index.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(offsets) => offsets.get(idx).map(|off| *off as u32 * 2),
            Loca::Long(offsets) => offsets.get(idx).copied(),
        }
    }

    /// Resolve the extent of a glyph record within `glyf`.
    ///
    /// Returns `Ok(None)` for an empty glyph (two equal consecutive
    /// offsets). The caller is expected to have already rejected glyph
    /// ids at or above `num_glyphs`; this only bounds-checks the offset
    /// array itself.
    pub fn glyph_range(
        &self,
        glyph_id: GlyphId,
        glyf_len: u32,
    ) -> Result<Option<Range<usize>>, ReadError> {
        let ix = glyph_id.to_usize();
        let start = self.get_raw(ix).ok_or(ReadError::OutOfBounds)?;
        let end = self.get_raw(ix + 1).unwrap_or(glyf_len);
        if start == end {
            return Ok(None);
        }
        if start > end || end > glyf_len {
            return Err(ReadError::MalformedData(
                "loca range outside the glyf table",
            ));
        }
        Ok(Some(start as usize..end as usize))
    }
}

#[cfg(test)]
mod tests {
    use sfnt_test_data::bebuffer::BeBuffer;

    use super::*;

    fn short_loca(entries: &[u16]) -> Loca {
        let buf = BeBuffer::new().extend(entries.iter().copied());
        Loca::read_with_format(FontData::new(buf.as_slice()), entries.len() as u16 - 1, false)
            .unwrap()
    }

    #[test]
    fn short_offsets_are_doubled() {
        let loca = short_loca(&[0, 17, 31, 31, 40]);
        assert_eq!(loca.len(), 5);
        assert_eq!(loca.get_raw(1), Some(34));
        assert_eq!(loca.get_raw(5), None);
    }

    #[test]
    fn resolves_ranges_and_empty_glyphs() {
        let loca = short_loca(&[0, 17, 31, 31, 40]);
        assert_eq!(loca.glyph_range(GlyphId::new(0), 80), Ok(Some(0..34)));
        assert_eq!(loca.glyph_range(GlyphId::new(1), 80), Ok(Some(34..62)));
        // equal consecutive entries mean there is no outline
        assert_eq!(loca.glyph_range(GlyphId::new(2), 80), Ok(None));
        assert_eq!(loca.glyph_range(GlyphId::new(3), 80), Ok(Some(62..80)));
    }

    #[test]
    fn missing_final_bound_falls_back_to_table_end() {
        let loca = short_loca(&[0, 17]);
        assert_eq!(loca.glyph_range(GlyphId::new(1), 40), Ok(Some(34..40)));
    }

    #[test]
    fn rejects_ranges_outside_glyf() {
        let loca = short_loca(&[0, 50, 50]);
        assert_eq!(
            loca.glyph_range(GlyphId::new(0), 80),
            Err(ReadError::MalformedData("loca range outside the glyf table"))
        );
        let loca = short_loca(&[30, 10, 10]);
        assert_eq!(
            loca.glyph_range(GlyphId::new(0), 80),
            Err(ReadError::MalformedData("loca range outside the glyf table"))
        );
    }

    #[test]
    fn long_format_reads_dword_offsets() {
        let buf = BeBuffer::new().extend([0u32, 34, 62, 62, 80]);
        let loca = Loca::read_with_format(FontData::new(buf.as_slice()), 4, true).unwrap();
        assert_eq!(loca.get_raw(4), Some(80));
        assert_eq!(loca.glyph_range(GlyphId::new(3), 80), Ok(Some(62..80)));
    }
}
