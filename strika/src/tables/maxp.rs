//! The [maxp](https://learn.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::Tag;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::TopLevelTable;

/// The maximum profile table.
///
/// Version 0.5 tables (used by CFF outlines) carry no glyph profile and
/// are rejected; glyph storage is sized from `num_glyphs * max_points`
/// so both fields are mandatory here.
#[derive(Clone, Debug)]
pub struct Maxp {
    num_glyphs: u16,
    max_points: u16,
}

impl TopLevelTable for Maxp {
    const TAG: Tag = Tag::new(b"maxp");
}

impl Maxp {
    /// The number of glyphs in the font.
    pub fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }

    /// Maximum points in a non-composite glyph.
    pub fn max_points(&self) -> u16 {
        self.max_points
    }
}

impl<'a> FontRead<'a> for Maxp {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u32 = cursor.read()?;
        if version != 0x00010000 {
            return Err(ReadError::InvalidFormat(version as i64));
        }
        let num_glyphs = cursor.read()?;
        let max_points = cursor.read()?;
        Ok(Maxp {
            num_glyphs,
            max_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use sfnt_test_data::fonts;

    use super::*;

    #[test]
    fn reads_the_glyph_profile() {
        let table = fonts::maxp(4, 8);
        let maxp = Maxp::read(FontData::new(table.as_slice())).unwrap();
        assert_eq!(maxp.num_glyphs(), 4);
        assert_eq!(maxp.max_points(), 8);
    }

    #[test]
    fn version_0_5_has_no_glyph_profile() {
        let table = sfnt_test_data::be_buffer! {
            0x00005000u32,      // Version16Dot16, 0.5
            4u16                // uint16 numGlyphs
        };
        let result = Maxp::read(FontData::new(table.as_slice()));
        assert!(matches!(result, Err(ReadError::InvalidFormat(0x5000))));
    }
}
