//! The [head](https://learn.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{BoundingBox, Fixed, Tag};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::TopLevelTable;

/// The font header table.
///
/// Only the fields the rest of the crate consumes are retained; the
/// bookkeeping fields (checksum adjustment, timestamps, style bits) are
/// validated for presence and then dropped.
#[derive(Clone, Debug)]
pub struct Head {
    font_revision: Fixed,
    units_per_em: u16,
    bounds: BoundingBox<i16>,
    lowest_rec_ppem: u16,
    index_to_loc_format: i16,
}

impl TopLevelTable for Head {
    const TAG: Tag = Tag::new(b"head");
}

impl Head {
    /// Revision set by the font manufacturer.
    pub fn font_revision(&self) -> Fixed {
        self.font_revision
    }

    /// Design units per em, in the range 16..=16384 for well-formed fonts.
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// The union of all glyph bounding boxes, in font units.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }

    /// Smallest readable size, in pixels per em.
    pub fn lowest_rec_ppem(&self) -> u16 {
        self.lowest_rec_ppem
    }

    /// 0 for short (16-bit) `loca` offsets, 1 for long (32-bit) offsets.
    pub fn index_to_loc_format(&self) -> i16 {
        self.index_to_loc_format
    }
}

impl<'a> FontRead<'a> for Head {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // majorVersion
        cursor.advance::<u16>(); // minorVersion
        let font_revision = cursor.read()?;
        cursor.advance::<u32>(); // checkSumAdjustment
        cursor.advance::<u32>(); // magicNumber
        cursor.advance::<u16>(); // flags
        let units_per_em = cursor.read()?;
        cursor.advance_by(16); // created + modified (LONGDATETIME)
        let bounds = BoundingBox {
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
        };
        cursor.advance::<u16>(); // macStyle
        let lowest_rec_ppem = cursor.read()?;
        cursor.advance::<i16>(); // fontDirectionHint
        let index_to_loc_format = cursor.read()?;
        Ok(Head {
            font_revision,
            units_per_em,
            bounds,
            lowest_rec_ppem,
            index_to_loc_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use sfnt_test_data::fonts;

    use super::*;

    #[test]
    fn reads_the_fields_we_keep() {
        let table = fonts::head(64, [8, 8, 56, 40], 0);
        let head = Head::read(FontData::new(table.as_slice())).unwrap();
        assert_eq!(head.font_revision(), Fixed::ONE);
        assert_eq!(head.units_per_em(), 64);
        assert_eq!(
            head.bounds(),
            BoundingBox {
                x_min: 8,
                y_min: 8,
                x_max: 56,
                y_max: 40
            }
        );
        assert_eq!(head.lowest_rec_ppem(), 8);
        assert_eq!(head.index_to_loc_format(), 0);
    }

    #[test]
    fn short_head_is_out_of_bounds() {
        let table = fonts::head(64, [0, 0, 0, 0], 0);
        let result = Head::read(FontData::new(&table.as_slice()[..20]));
        assert!(matches!(result, Err(ReadError::OutOfBounds)));
    }
}
