//! glyf test data: individual glyph records

use crate::{be_buffer, bebuffer::BeBuffer};

/// A square with corners (8, 8) and (40, 40): one contour, four on-curve
/// points, all coordinate deltas written as full 16-bit words.
pub fn simple_square() -> BeBuffer {
    be_buffer! {
        1i16,                   // int16 numberOfContours
        8i16,                   // int16 xMin
        8i16,                   // int16 yMin
        40i16,                  // int16 xMax
        40i16,                  // int16 yMax
        3u16,                   // uint16 endPtsOfContours[0]
        0u16,                   // uint16 instructionLength
        0x01u8,                 // flags[0], on curve
        0x01u8,                 // flags[1], on curve
        0x01u8,                 // flags[2], on curve
        0x01u8,                 // flags[3], on curve
        8i16,                   // int16 xCoordinates[0]
        32i16,                  // int16 xCoordinates[1]
        0i16,                   // int16 xCoordinates[2]
        -32i16,                 // int16 xCoordinates[3]
        8i16,                   // int16 yCoordinates[0]
        0i16,                   // int16 yCoordinates[1]
        32i16,                  // int16 yCoordinates[2]
        0i16                    // int16 yCoordinates[3]
    }
}

/// A triangle with vertices (8, 8), (40, 8), (24, 40): one contour, three
/// on-curve points, flags written as a repeat run.
pub fn simple_triangle() -> BeBuffer {
    be_buffer! {
        1i16,                   // int16 numberOfContours
        8i16,                   // int16 xMin
        8i16,                   // int16 yMin
        40i16,                  // int16 xMax
        40i16,                  // int16 yMax
        2u16,                   // uint16 endPtsOfContours[0]
        0u16,                   // uint16 instructionLength
        0x09u8,                 // flags[0], on curve | repeat
        0x02u8,                 // repeat count, two more points
        8i16,                   // int16 xCoordinates[0]
        32i16,                  // int16 xCoordinates[1]
        -16i16,                 // int16 xCoordinates[2]
        8i16,                   // int16 yCoordinates[0]
        0i16,                   // int16 yCoordinates[1]
        32i16                   // int16 yCoordinates[2]
    }
}

/// Two contours using short (byte) coordinates: a square outline around
/// a diamond whose alternate points are off-curve controls.
///
/// Decoded points: square (0,0) (24,0) (24,24) (0,24), then diamond
/// (12,6) (18,12) (12,18) (6,12) with points 5 and 7 off-curve.
pub fn simple_two_contours() -> BeBuffer {
    be_buffer! {
        2i16,                   // int16 numberOfContours
        0i16,                   // int16 xMin
        0i16,                   // int16 yMin
        24i16,                  // int16 xMax
        24i16,                  // int16 yMax
        3u16,                   // uint16 endPtsOfContours[0]
        7u16,                   // uint16 endPtsOfContours[1]
        0u16,                   // uint16 instructionLength
        0x37u8,                 // flags[0], on | x short + | y short +
        0x37u8,                 // flags[1]
        0x37u8,                 // flags[2]
        0x27u8,                 // flags[3], on | x short - | y short +
        0x17u8,                 // flags[4], on | x short + | y short -
        0x36u8,                 // flags[5], off | x short + | y short +
        0x27u8,                 // flags[6], on | x short - | y short +
        0x06u8,                 // flags[7], off | x short - | y short -
        // x deltas (unsigned bytes, sign carried by flag bits)
        0u8, 24u8, 0u8, 24u8,   // square: 0, +24, 0, -24
        12u8, 6u8, 6u8, 6u8,    // diamond: +12, +6, -6, -6
        // y deltas
        0u8, 0u8, 24u8, 0u8,    // square: 0, 0, +24, 0
        18u8, 6u8, 6u8, 6u8     // diamond: -18, +6, +6, -6
    }
}

/// A composite with three components covering every transform kind:
/// uniform scale, independent x/y scales, and a full 2x2 matrix.
pub fn composite_all_transforms() -> BeBuffer {
    be_buffer! {
        -1i16,                  // int16 numberOfContours, composite
        0i16,                   // int16 xMin
        0i16,                   // int16 yMin
        64i16,                  // int16 xMax
        64i16,                  // int16 yMax
        // component 0: word args, xy values, uniform scale, more follow
        0x002Bu16,              // uint16 flags
        1u16,                   // uint16 glyphIndex
        4i16,                   // int16 argument1, x offset
        5i16,                   // int16 argument2, y offset
        0x2000u16,              // F2Dot14 scale, 0.5
        // component 1: byte args, xy values, x and y scales, more follow
        0x0062u16,              // uint16 flags
        2u16,                   // uint16 glyphIndex
        -1i8,                   // int8 argument1, x offset
        2i8,                    // int8 argument2, y offset
        0x2000u16,              // F2Dot14 xScale, 0.5
        0x6000u16,              // F2Dot14 yScale, 1.5
        // component 2: word args, xy values, 2x2 matrix, last
        0x0083u16,              // uint16 flags
        3u16,                   // uint16 glyphIndex
        10i16,                  // int16 argument1, x offset
        -10i16,                 // int16 argument2, y offset
        0x4000u16,              // F2Dot14 xx, 1.0
        0x2000u16,              // F2Dot14 yx, 0.5
        0xE000u16,              // F2Dot14 xy, -0.5
        0x4000u16               // F2Dot14 yy, 1.0
    }
}

/// A composite whose arguments are point-matching indices rather than
/// an x/y offset (flag bit 0x0002 clear).
pub fn composite_point_matching() -> BeBuffer {
    be_buffer! {
        -1i16,                  // int16 numberOfContours, composite
        0i16,                   // int16 xMin
        0i16,                   // int16 yMin
        32i16,                  // int16 xMax
        32i16,                  // int16 yMax
        0x0001u16,              // uint16 flags, word args, not xy values
        1u16,                   // uint16 glyphIndex
        0i16,                   // int16 argument1, parent point index
        2i16                    // int16 argument2, child point index
    }
}

/// A composite with a single translated reference to glyph 1.
pub fn composite_translate_only() -> BeBuffer {
    be_buffer! {
        -1i16,                  // int16 numberOfContours, composite
        24i16,                  // int16 xMin
        8i16,                   // int16 yMin
        56i16,                  // int16 xMax
        40i16,                  // int16 yMax
        0x0003u16,              // uint16 flags, word args, xy values
        1u16,                   // uint16 glyphIndex
        16i16,                  // int16 argument1, x offset
        0i16                    // int16 argument2, y offset
    }
}
