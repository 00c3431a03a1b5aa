//! The [glyf](https://learn.microsoft.com/en-us/typography/opentype/spec/glyf) table

use std::ops::Range;

use types::{BoundingBox, F2Dot14, GlyphId, Point, Scalar, Tag};

use crate::font_data::{Cursor, FontData};
use crate::read::{FontRead, ReadError};
use crate::TopLevelTable;

/// The glyph data table: a bag of glyph records addressed through `loca`.
#[derive(Clone, Debug)]
pub struct Glyf {
    data: Vec<u8>,
}

impl TopLevelTable for Glyf {
    const TAG: Tag = Tag::new(b"glyf");
}

impl Glyf {
    /// The length of the table in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw bytes for one glyph record.
    pub(crate) fn data_for_range(&self, range: Range<usize>) -> Option<FontData<'_>> {
        FontData::new(&self.data).slice(range)
    }
}

impl<'a> FontRead<'a> for Glyf {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Glyf {
            data: data.as_bytes().to_vec(),
        })
    }
}

/// Flags for a point in a simple glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimpleGlyphFlags {
    bits: u8,
}

impl SimpleGlyphFlags {
    /// Bit 0: If set, the point is on the curve; otherwise, it is off the
    /// curve.
    pub const ON_CURVE_POINT: Self = Self { bits: 0x01 };

    /// Bit 1: If set, the corresponding x-coordinate is 1 byte long, and
    /// the sign is determined by the
    /// [`Self::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR`] flag.
    pub const X_SHORT_VECTOR: Self = Self { bits: 0x02 };

    /// Bit 2: If set, the corresponding y-coordinate is 1 byte long.
    pub const Y_SHORT_VECTOR: Self = Self { bits: 0x04 };

    /// Bit 3: If set, the next byte specifies the number of additional
    /// times this flag byte is to be repeated.
    pub const REPEAT_FLAG: Self = Self { bits: 0x08 };

    /// Bit 4: meaning depends on [`Self::X_SHORT_VECTOR`]: it is the sign
    /// of a short x delta, or marks a word delta as omitted (same x).
    pub const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self = Self { bits: 0x10 };

    /// Bit 5: the y-coordinate equivalent of
    /// [`Self::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR`].
    pub const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self = Self { bits: 0x20 };

    /// Bit 6: If set, contours in the glyph description may overlap.
    pub const OVERLAP_SIMPLE: Self = Self { bits: 0x40 };

    /// Returns an empty set of flags.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Returns the raw bit value.
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Convert from underlying bit representation, dropping any bits that
    /// do not correspond to flags.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self { bits: bits & 0x7f }
    }

    /// Returns `true` if all of the flags in `other` are contained within
    /// `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }
}

impl std::ops::BitOr for SimpleGlyphFlags {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }
}

impl Scalar for SimpleGlyphFlags {
    type Raw = <u8 as Scalar>::Raw;

    fn to_raw(self) -> Self::Raw {
        self.bits().to_raw()
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self::from_bits_truncate(u8::from_raw(raw))
    }
}

/// Flags used in a composite glyph component record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeGlyphFlags {
    bits: u16,
}

impl CompositeGlyphFlags {
    /// Bit 0: If set, the arguments are words; otherwise, they are bytes.
    pub const ARG_1_AND_2_ARE_WORDS: Self = Self { bits: 0x0001 };

    /// Bit 1: If set, the arguments are signed xy values; otherwise, they
    /// are unsigned point numbers.
    pub const ARGS_ARE_XY_VALUES: Self = Self { bits: 0x0002 };

    /// Bit 2: If set, round the xy values to the nearest grid line.
    pub const ROUND_XY_TO_GRID: Self = Self { bits: 0x0004 };

    /// Bit 3: A single scale follows, applied to both x and y.
    pub const WE_HAVE_A_SCALE: Self = Self { bits: 0x0008 };

    /// Bit 5: At least one more component follows this one.
    pub const MORE_COMPONENTS: Self = Self { bits: 0x0020 };

    /// Bit 6: The x direction has a different scale from the y direction.
    pub const WE_HAVE_AN_X_AND_Y_SCALE: Self = Self { bits: 0x0040 };

    /// Bit 7: A full 2 by 2 transformation matrix follows.
    pub const WE_HAVE_A_TWO_BY_TWO: Self = Self { bits: 0x0080 };

    /// Bit 8: Instructions follow the last component.
    pub const WE_HAVE_INSTRUCTIONS: Self = Self { bits: 0x0100 };

    /// Bit 9: Use the advance and sidebearings of this component for the
    /// whole composite.
    pub const USE_MY_METRICS: Self = Self { bits: 0x0200 };

    /// Bit 10: The components of this glyph overlap.
    pub const OVERLAP_COMPOUND: Self = Self { bits: 0x0400 };

    /// Bit 11: The component offset is scaled.
    pub const SCALED_COMPONENT_OFFSET: Self = Self { bits: 0x0800 };

    /// Bit 12: The component offset is not scaled.
    pub const UNSCALED_COMPONENT_OFFSET: Self = Self { bits: 0x1000 };

    /// Returns an empty set of flags.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Returns the raw bit value.
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Convert from underlying bit representation, dropping any bits that
    /// do not correspond to flags.
    pub const fn from_bits_truncate(bits: u16) -> Self {
        Self {
            bits: bits & 0x1fef,
        }
    }

    /// Returns `true` if all of the flags in `other` are contained within
    /// `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }
}

impl std::ops::BitOr for CompositeGlyphFlags {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }
}

impl Scalar for CompositeGlyphFlags {
    type Raw = <u16 as Scalar>::Raw;

    fn to_raw(self) -> Self::Raw {
        self.bits().to_raw()
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self::from_bits_truncate(u16::from_raw(raw))
    }
}

/// A simple or composite glyph record.
#[derive(Clone, Debug)]
pub enum Glyph<'a> {
    Simple(SimpleGlyph<'a>),
    Composite(CompositeGlyph<'a>),
}

macro_rules! field_getter {
    ($field:ident, $ty:ty) => {
        pub fn $field(&self) -> $ty {
            match self {
                Self::Simple(glyph) => glyph.$field(),
                Self::Composite(glyph) => glyph.$field(),
            }
        }
    };
}

impl Glyph<'_> {
    field_getter!(number_of_contours, i16);
    field_getter!(bounds, BoundingBox<i16>);
    field_getter!(x_min, i16);
    field_getter!(y_min, i16);
    field_getter!(x_max, i16);
    field_getter!(y_max, i16);
}

impl<'a> FontRead<'a> for Glyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let number_of_contours: i16 = cursor.read()?;
        let bounds = BoundingBox {
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
        };
        if number_of_contours >= 0 {
            let end_pts_of_contours = cursor.read_vec(number_of_contours as usize)?;
            let instruction_length: u16 = cursor.read()?;
            // instructions are never executed, but their length still
            // positions the point data
            cursor.advance_by(instruction_length as usize);
            let glyph_data = cursor.remaining_data().ok_or(ReadError::OutOfBounds)?;
            Ok(Glyph::Simple(SimpleGlyph {
                number_of_contours,
                bounds,
                end_pts_of_contours,
                glyph_data,
            }))
        } else {
            let component_data = cursor.remaining_data().ok_or(ReadError::OutOfBounds)?;
            Ok(Glyph::Composite(CompositeGlyph {
                number_of_contours,
                bounds,
                component_data,
            }))
        }
    }
}

/// A glyph whose outline is stored inline as contours of quadratic curve
/// points.
#[derive(Clone, Debug)]
pub struct SimpleGlyph<'a> {
    number_of_contours: i16,
    bounds: BoundingBox<i16>,
    end_pts_of_contours: Vec<u16>,
    glyph_data: FontData<'a>,
}

impl SimpleGlyph<'_> {
    pub fn number_of_contours(&self) -> i16 {
        self.number_of_contours
    }

    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }

    pub fn x_min(&self) -> i16 {
        self.bounds.x_min
    }

    pub fn y_min(&self) -> i16 {
        self.bounds.y_min
    }

    pub fn x_max(&self) -> i16 {
        self.bounds.x_max
    }

    pub fn y_max(&self) -> i16 {
        self.bounds.y_max
    }

    /// The index of the last point of each contour.
    pub fn end_pts_of_contours(&self) -> &[u16] {
        &self.end_pts_of_contours
    }

    /// The total number of points.
    pub fn num_points(&self) -> usize {
        self.end_pts_of_contours
            .last()
            .map(|last| *last as usize + 1)
            .unwrap_or(0)
    }

    /// Reads points and flags into the provided slices.
    ///
    /// Each flag slot receives the raw flag byte covering that point; the
    /// slices must have the length returned by [`Self::num_points`].
    pub fn read_points_fast(
        &self,
        points: &mut [Point<i16>],
        flags: &mut [u8],
    ) -> Result<(), ReadError> {
        let n_points = self.num_points();
        if points.len() != n_points || flags.len() != n_points {
            return Err(ReadError::InvalidArrayLen);
        }
        let mut cursor = self.glyph_data.cursor();
        let mut i = 0;
        while i < n_points {
            let flag = cursor.read::<SimpleGlyphFlags>()?;
            let flag_bits = flag.bits();
            if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                let count = (cursor.read::<u8>()? as usize + 1).min(n_points - i);
                for f in &mut flags[i..i + count] {
                    *f = flag_bits;
                }
                i += count;
            } else {
                flags[i] = flag_bits;
                i += 1;
            }
        }
        let mut x = 0i16;
        for (&flag_bits, point) in flags.iter().zip(points.iter_mut()) {
            let mut delta = 0i16;
            let flag = SimpleGlyphFlags::from_bits_truncate(flag_bits);
            if flag.contains(SimpleGlyphFlags::X_SHORT_VECTOR) {
                let value = cursor.read::<u8>()? as i16;
                if !flag.contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
                    delta = -value;
                } else {
                    delta = value;
                }
            } else if !flag.contains(SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR) {
                delta = cursor.read::<i16>()?;
            }
            x = x.wrapping_add(delta);
            point.x = x;
        }
        let mut y = 0i16;
        for (&flag_bits, point) in flags.iter().zip(points.iter_mut()) {
            let mut delta = 0i16;
            let flag = SimpleGlyphFlags::from_bits_truncate(flag_bits);
            if flag.contains(SimpleGlyphFlags::Y_SHORT_VECTOR) {
                let value = cursor.read::<u8>()? as i16;
                if !flag.contains(SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR) {
                    delta = -value;
                } else {
                    delta = value;
                }
            } else if !flag.contains(SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR) {
                delta = cursor.read::<i16>()?;
            }
            y = y.wrapping_add(delta);
            point.y = y;
        }
        Ok(())
    }
}

/// A glyph built from other glyphs, each with an offset and an optional
/// transform.
#[derive(Clone, Debug)]
pub struct CompositeGlyph<'a> {
    number_of_contours: i16,
    bounds: BoundingBox<i16>,
    component_data: FontData<'a>,
}

impl<'a> CompositeGlyph<'a> {
    pub fn number_of_contours(&self) -> i16 {
        self.number_of_contours
    }

    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }

    pub fn x_min(&self) -> i16 {
        self.bounds.x_min
    }

    pub fn y_min(&self) -> i16 {
        self.bounds.y_min
    }

    pub fn x_max(&self) -> i16 {
        self.bounds.x_max
    }

    pub fn y_max(&self) -> i16 {
        self.bounds.y_max
    }

    /// Returns an iterator over the glyph's component records.
    pub fn components(&self) -> ComponentIter<'a> {
        ComponentIter {
            cursor: self.component_data.cursor(),
            done: false,
        }
    }
}

/// A reference position for attaching a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// A translation of the component in font units.
    Offset { x: i16, y: i16 },
    /// Align a numbered point in the component with one already assembled.
    Point { base: u16, derived: u16 },
}

/// A 2x2 transform applied to a component's points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transform {
    pub xx: F2Dot14,
    pub yx: F2Dot14,
    pub xy: F2Dot14,
    pub yy: F2Dot14,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            xx: F2Dot14::ONE,
            yx: F2Dot14::ZERO,
            xy: F2Dot14::ZERO,
            yy: F2Dot14::ONE,
        }
    }
}

/// One component of a composite glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    pub glyph: GlyphId,
    pub anchor: Anchor,
    pub flags: CompositeGlyphFlags,
    pub transform: Transform,
}

/// An iterator yielding the components of a composite glyph.
///
/// Fuses after yielding an error, since a failed record leaves the
/// cursor nowhere meaningful.
pub struct ComponentIter<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl ComponentIter<'_> {
    fn read_component(&mut self) -> Result<Component, ReadError> {
        let flags: CompositeGlyphFlags = self.cursor.read()?;
        let glyph: GlyphId = self.cursor.read()?;
        let args_are_words = flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS);
        let args_are_xy_values = flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES);
        let anchor = match (args_are_xy_values, args_are_words) {
            (true, true) => Anchor::Offset {
                x: self.cursor.read()?,
                y: self.cursor.read()?,
            },
            (true, false) => Anchor::Offset {
                x: self.cursor.read::<i8>()? as i16,
                y: self.cursor.read::<i8>()? as i16,
            },
            (false, true) => Anchor::Point {
                base: self.cursor.read()?,
                derived: self.cursor.read()?,
            },
            (false, false) => Anchor::Point {
                base: self.cursor.read::<u8>()? as u16,
                derived: self.cursor.read::<u8>()? as u16,
            },
        };
        let mut transform = Transform::default();
        if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
            transform.xx = self.cursor.read()?;
            transform.yy = transform.xx;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
            transform.xx = self.cursor.read()?;
            transform.yy = self.cursor.read()?;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
            transform.xx = self.cursor.read()?;
            transform.yx = self.cursor.read()?;
            transform.xy = self.cursor.read()?;
            transform.yy = self.cursor.read()?;
        }
        self.done = !flags.contains(CompositeGlyphFlags::MORE_COMPONENTS);
        Ok(Component {
            glyph,
            anchor,
            flags,
            transform,
        })
    }
}

impl Iterator for ComponentIter<'_> {
    type Item = Result<Component, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let component = self.read_component();
        if component.is_err() {
            self.done = true;
        }
        Some(component)
    }
}
