//! complete synthetic fonts assembled from the table fixtures

use crate::{be_buffer, bebuffer::BeBuffer, cmap, glyf};
use sfnt_types::Tag;

/// Assemble a complete sfnt binary from (tag, table bytes) pairs.
///
/// Directory records are written in the order given; pass tables sorted by
/// tag to produce a well-ordered directory. Offsets and four-byte padding
/// are computed here; checksums are left zero (readers ignore them).
pub fn assemble_font(tables: &[(Tag, &[u8])]) -> BeBuffer {
    let num_tables = tables.len() as u16;
    let entry_selector = num_tables.ilog2() as u16;
    let search_range = 16 * (1u16 << entry_selector);
    let range_shift = num_tables * 16 - search_range;
    let mut buffer = be_buffer! {
        0x00010000u32,          // uint32 scaler version, TrueType outlines
        num_tables,             // uint16 numTables
        search_range,           // uint16 searchRange
        entry_selector,         // uint16 entrySelector
        range_shift             // uint16 rangeShift
    };
    let mut offset = (12 + 16 * tables.len()) as u32;
    for (tag, data) in tables {
        buffer = buffer
            .push(*tag)
            .push(0u32) // checksum
            .push(offset)
            .push(data.len() as u32);
        offset += padded_len(data.len()) as u32;
    }
    for (_, data) in tables {
        buffer = buffer.extend(data.iter().copied());
        for _ in data.len()..padded_len(data.len()) {
            buffer = buffer.push(0u8);
        }
    }
    buffer
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

/// A `head` table with the given metrics; the remaining fields hold
/// innocuous defaults.
pub fn head(units_per_em: u16, bbox: [i16; 4], index_to_loc_format: i16) -> BeBuffer {
    be_buffer! {
        1u16,                   // uint16 majorVersion
        0u16,                   // uint16 minorVersion
        0x00010000u32,          // Fixed fontRevision, 1.0
        0u32,                   // uint32 checkSumAdjustment, unused here
        0x5F0F3CF5u32,          // uint32 magicNumber
        0u16,                   // uint16 flags
        units_per_em,           // uint16 unitsPerEm
        0u32,                   // longdatetime created, high word
        0u32,                   // longdatetime created, low word
        0u32,                   // longdatetime modified, high word
        0u32,                   // longdatetime modified, low word
        bbox[0],                // int16 xMin
        bbox[1],                // int16 yMin
        bbox[2],                // int16 xMax
        bbox[3],                // int16 yMax
        0u16,                   // uint16 macStyle
        8u16,                   // uint16 lowestRecPPEM
        2i16,                   // int16 fontDirectionHint
        index_to_loc_format,    // int16 indexToLocFormat
        0i16                    // int16 glyphDataFormat
    }
}

/// A version 1.0 `maxp` table; profile fields other than the two we
/// consume are filled with plausible values.
pub fn maxp(num_glyphs: u16, max_points: u16) -> BeBuffer {
    be_buffer! {
        0x00010000u32,          // Version16Dot16, 1.0
        num_glyphs,             // uint16 numGlyphs
        max_points,             // uint16 maxPoints
        2u16,                   // uint16 maxContours
        max_points,             // uint16 maxCompositePoints
        2u16,                   // uint16 maxCompositeContours
        2u16,                   // uint16 maxZones
        0u16,                   // uint16 maxTwilightPoints
        0u16,                   // uint16 maxStorage
        0u16,                   // uint16 maxFunctionDefs
        0u16,                   // uint16 maxInstructionDefs
        0u16,                   // uint16 maxStackElements
        0u16,                   // uint16 maxSizeOfInstructions
        1u16,                   // uint16 maxComponentElements
        1u16                    // uint16 maxComponentDepth
    }
}

/// The scenario font: 64 units per em, A-Z mapped to glyphs 1..=26, and
/// four glyph records addressed through a short `loca`.
///
/// - glyph 0: simple square
/// - glyph 1: simple triangle, one contour, three on-curve points
/// - glyph 2: empty (equal consecutive loca entries)
/// - glyph 3: composite, glyph 1 translated by (16, 0)
pub fn triangle_font() -> BeBuffer {
    let glyf: Vec<u8> = [
        glyf::simple_square().to_vec(),
        glyf::simple_triangle().to_vec(),
        glyf::composite_translate_only().to_vec(),
    ]
    .concat();
    // short format: stored offsets are byte offsets divided by two
    let loca = BeBuffer::new().extend([0u16, 17, 31, 31, 40]);
    let head = head(64, [8, 8, 56, 40], 0);
    let maxp = maxp(4, 8);
    let cmap = cmap::windows_format4();
    assemble_font(&[
        (Tag::new(b"cmap"), cmap.as_slice()),
        (Tag::new(b"glyf"), &glyf),
        (Tag::new(b"head"), head.as_slice()),
        (Tag::new(b"loca"), loca.as_slice()),
        (Tag::new(b"maxp"), maxp.as_slice()),
    ])
}

/// Same glyph content as [`triangle_font`] but with a long (32-bit) loca.
pub fn triangle_font_long_loca() -> BeBuffer {
    let glyf: Vec<u8> = [
        glyf::simple_square().to_vec(),
        glyf::simple_triangle().to_vec(),
        glyf::composite_translate_only().to_vec(),
    ]
    .concat();
    let loca = BeBuffer::new().extend([0u32, 34, 62, 62, 80]);
    let head = head(64, [8, 8, 56, 40], 1);
    let maxp = maxp(4, 8);
    let cmap = cmap::windows_format4();
    assemble_font(&[
        (Tag::new(b"cmap"), cmap.as_slice()),
        (Tag::new(b"glyf"), &glyf),
        (Tag::new(b"head"), head.as_slice()),
        (Tag::new(b"loca"), loca.as_slice()),
        (Tag::new(b"maxp"), maxp.as_slice()),
    ])
}

/// A font whose two glyphs are composites referencing each other, for
/// exercising the recursion guard.
pub fn cyclic_font() -> BeBuffer {
    let component = |child: u16| {
        be_buffer! {
            -1i16,              // int16 numberOfContours, composite
            0i16,               // int16 xMin
            0i16,               // int16 yMin
            32i16,              // int16 xMax
            32i16,              // int16 yMax
            0x0003u16,          // uint16 flags, word args, xy values
            child,              // uint16 glyphIndex
            0i16,               // int16 argument1
            0i16                // int16 argument2
        }
    };
    let glyf: Vec<u8> = [component(1).to_vec(), component(0).to_vec()].concat();
    let loca = BeBuffer::new().extend([0u16, 9, 18]);
    let cmap = be_buffer! {
        0u16,                   // uint16 version
        1u16,                   // uint16 numTables
        3u16,                   // uint16 platformID, Windows
        1u16,                   // uint16 platformSpecificID
        12u32,                  // uint32 offset
        4u16,                   // uint16 format
        24u16,                  // uint16 length
        0u16,                   // uint16 language
        2u16,                   // uint16 segCountX2, one segment
        0u16,                   // uint16 searchRange, unused
        0u16,                   // uint16 entrySelector, unused
        0u16,                   // uint16 rangeShift, unused
        0xFFFFu16,              // uint16 endCode[0], terminal segment
        0u16,                   // uint16 reservedPad
        0xFFFFu16,              // uint16 startCode[0]
        1i16,                   // int16 idDelta[0]
        0u16                    // uint16 idRangeOffset[0]
    };
    let head = head(64, [0, 0, 32, 32], 0);
    let maxp = maxp(2, 8);
    assemble_font(&[
        (Tag::new(b"cmap"), cmap.as_slice()),
        (Tag::new(b"glyf"), &glyf),
        (Tag::new(b"head"), head.as_slice()),
        (Tag::new(b"loca"), loca.as_slice()),
        (Tag::new(b"maxp"), maxp.as_slice()),
    ])
}
