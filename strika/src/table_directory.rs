//! The sfnt table directory

use types::{Tag, TT_SFNT_VERSION};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The font header, listing the tables present in the file.
///
/// Versions other than [`TT_SFNT_VERSION`] (including the `OTTO` tag used
/// by CFF outlines) are rejected up front, since nothing downstream can
/// interpret their glyph data.
#[derive(Clone, Debug)]
pub struct TableDirectory {
    sfnt_version: u32,
    records: Vec<TableRecord>,
    // Whether the records are sorted and thus we can use binary search for
    // finding tables. In principle, fonts are required to have a sorted
    // table directory, but certain fonts don't seem to follow that
    // requirement.
    sorted: bool,
}

/// One entry in the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    tag: Tag,
    checksum: u32,
    offset: u32,
    length: u32,
}

impl TableDirectory {
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    pub fn table_records(&self) -> &[TableRecord] {
        &self.records
    }

    /// Returns the data for the table with the specified tag, if present.
    ///
    /// `data` must be the same font file the directory was read from;
    /// record offsets are relative to its start.
    pub fn table_data<'a>(&self, data: FontData<'a>, tag: Tag) -> Option<FontData<'a>> {
        let entry = if self.sorted {
            self.records
                .binary_search_by(|rec| rec.tag.cmp(&tag))
                .ok()
        } else {
            self.records.iter().position(|rec| rec.tag == tag)
        };
        entry
            .and_then(|idx| self.records.get(idx))
            .and_then(|record| {
                if record.offset == 0 {
                    return None;
                }
                let start = record.offset as usize;
                data.slice(start..start.checked_add(record.length as usize)?)
            })
    }
}

impl TableRecord {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn length(&self) -> u32 {
        self.length
    }
}

impl<'a> FontRead<'a> for TableDirectory {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version: u32 = cursor.read()?;
        if sfnt_version != TT_SFNT_VERSION {
            return Err(ReadError::InvalidSfnt(sfnt_version));
        }
        let num_tables: u16 = cursor.read()?;
        cursor.advance::<u16>(); // searchRange
        cursor.advance::<u16>(); // entrySelector
        cursor.advance::<u16>(); // rangeShift
        let mut records = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            records.push(TableRecord {
                tag: cursor.read()?,
                checksum: cursor.read()?,
                offset: cursor.read()?,
                length: cursor.read()?,
            });
        }
        let sorted = records.windows(2).all(|pair| pair[0].tag < pair[1].tag);
        Ok(TableDirectory {
            sfnt_version,
            records,
            sorted,
        })
    }
}
