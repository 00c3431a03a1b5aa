//! cmap test data for exercising format 4 lookups

use crate::{be_buffer, bebuffer::BeBuffer};

/// A full cmap table (index + subtable directory) with one Windows
/// format 4 subtable mapping A-Z (65..=90) to glyphs 1..=26 via idDelta.
pub fn windows_format4() -> BeBuffer {
    be_buffer! {
        0u16,                   // uint16 version
        1u16,                   // uint16 numTables
        3u16,                   // uint16 platformID, Windows
        1u16,                   // uint16 platformSpecificID, Unicode BMP
        12u32,                  // uint32 offset, subtable follows the index
        // format 4 subtable
        4u16,                   // uint16 format
        32u16,                  // uint16 length
        0u16,                   // uint16 language, unused
        4u16,                   // uint16 segCountX2, 2 * 2 segments
        0u16,                   // uint16 searchRange, unused
        0u16,                   // uint16 entrySelector, unused
        0u16,                   // uint16 rangeShift, unused

        90u16,                  // uint16 endCode[0], 'Z'
        0xFFFFu16,              // uint16 endCode[1], terminal segment

        0u16,                   // uint16 reservedPad

        65u16,                  // uint16 startCode[0], 'A'
        0xFFFFu16,              // uint16 startCode[1]

        -64i16,                 // int16 idDelta[0], 'A' maps to glyph 1
        1i16,                   // int16 idDelta[1], 0xFFFF maps to glyph 0

        0u16,                   // uint16 idRangeOffset[0]
        0u16                    // uint16 idRangeOffset[1]

        // no glyphIdArray entries
    }
}

/// A bare format 4 subtable (no cmap index) with an indirect segment.
///
/// Code points 10..=13 resolve through idRangeOffset into the trailing
/// glyphIdArray `[100, 0, 102, 103]`; the zero entry exercises the null
/// indirect value.
pub fn format4_indirect_subtable() -> BeBuffer {
    be_buffer! {
        4u16,                   // uint16 format
        40u16,                  // uint16 length
        0u16,                   // uint16 language, unused
        4u16,                   // uint16 segCountX2, 2 * 2 segments
        0u16,                   // uint16 searchRange, unused
        0u16,                   // uint16 entrySelector, unused
        0u16,                   // uint16 rangeShift, unused

        13u16,                  // uint16 endCode[0]
        0xFFFFu16,              // uint16 endCode[1], terminal segment

        0u16,                   // uint16 reservedPad

        10u16,                  // uint16 startCode[0]
        0xFFFFu16,              // uint16 startCode[1]

        0i16,                   // int16 idDelta[0]
        1i16,                   // int16 idDelta[1]

        4u16,                   // uint16 idRangeOffset[0], two words ahead
        0u16,                   // uint16 idRangeOffset[1]

        100u16,                 // uint16 glyphIdArray[0]
        0u16,                   // uint16 glyphIdArray[1], null, maps to notdef
        102u16,                 // uint16 glyphIdArray[2]
        103u16                  // uint16 glyphIdArray[3]
    }
}

/// A bare format 4 subtable with a gap between two delta segments.
///
/// Segment 0 covers 32..=64 (delta 3), segment 1 covers 128..=160
/// (delta -100); everything between and outside is unmapped.
pub fn format4_gap_subtable() -> BeBuffer {
    be_buffer! {
        4u16,                   // uint16 format
        40u16,                  // uint16 length
        0u16,                   // uint16 language, unused
        6u16,                   // uint16 segCountX2, 2 * 3 segments
        0u16,                   // uint16 searchRange, unused
        0u16,                   // uint16 entrySelector, unused
        0u16,                   // uint16 rangeShift, unused

        64u16,                  // uint16 endCode[0]
        160u16,                 // uint16 endCode[1]
        0xFFFFu16,              // uint16 endCode[2], terminal segment

        0u16,                   // uint16 reservedPad

        32u16,                  // uint16 startCode[0]
        128u16,                 // uint16 startCode[1]
        0xFFFFu16,              // uint16 startCode[2]

        3i16,                   // int16 idDelta[0]
        -100i16,                // int16 idDelta[1]
        1i16,                   // int16 idDelta[2]

        0u16,                   // uint16 idRangeOffset[0]
        0u16,                   // uint16 idRangeOffset[1]
        0u16                    // uint16 idRangeOffset[2]
    }
}

/// A cmap index whose only subtable is a Macintosh format 0 entry.
///
/// No Windows format 4 subtable is present, so building a character map
/// from this table must fail.
pub fn macintosh_only() -> BeBuffer {
    be_buffer! {
        0u16,                   // uint16 version
        1u16,                   // uint16 numTables
        1u16,                   // uint16 platformID, Macintosh
        0u16,                   // uint16 platformSpecificID
        12u32,                  // uint32 offset
        0u16,                   // uint16 format 0
        6u16,                   // uint16 length, header only (truncated table)
        0u16                    // uint16 language
    }
}
