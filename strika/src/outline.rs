//! Decoding glyph outlines into point and contour arrays

use log::trace;

use types::{BoundingBox, GlyphId, Point};

use crate::read::{FontRead, ReadError};
use crate::tables::glyf::{self, Anchor, CompositeGlyphFlags, Component, Glyf};
use crate::tables::loca::Loca;
use crate::GLYF_COMPOSITE_RECURSION_LIMIT;

/// Errors that may occur when drawing glyphs.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawError {
    /// The requested glyph was not present in the font.
    GlyphNotFound(GlyphId),
    /// Decoding would exceed the storage sized from the `maxp` profile.
    InsufficientMemory,
    /// A composite glyph chain exceeded the recursion limit.
    RecursionLimitExceeded(GlyphId),
    /// A component is anchored by matching point numbers rather than an
    /// x/y offset.
    PointMatchingUnsupported(GlyphId),
    /// Error occurred while reading font data.
    Read(ReadError),
}

impl From<ReadError> for DrawError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GlyphNotFound(gid) => write!(f, "glyph {gid} was not found in the given font"),
            Self::InsufficientMemory => write!(f, "exceeded memory limits"),
            Self::RecursionLimitExceeded(gid) => write!(
                f,
                "recursion limit ({GLYF_COMPOSITE_RECURSION_LIMIT}) exceeded when loading composite component {gid}"
            ),
            Self::PointMatchingUnsupported(gid) => {
                write!(f, "glyph {gid} uses unsupported point matching anchors")
            }
            Self::Read(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DrawError {}

/// A fully decoded glyph outline.
///
/// Composite glyphs decode to the concatenation of their transformed
/// components, so every glyph looks the same from here on: parallel
/// point and flag arrays partitioned into contours.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Glyph {
    pub(crate) number_of_contours: i16,
    pub(crate) bounds: BoundingBox<i16>,
    pub(crate) end_pts_of_contours: Vec<u16>,
    pub(crate) flags: Vec<u8>,
    pub(crate) points: Vec<Point<i16>>,
}

impl Glyph {
    /// The number of contours; zero for an empty glyph.
    pub fn number_of_contours(&self) -> i16 {
        self.number_of_contours
    }

    /// The bounding box recorded in the glyph header, in font units.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }

    /// The index of the last point of each contour, strictly increasing.
    pub fn end_pts_of_contours(&self) -> &[u16] {
        &self.end_pts_of_contours
    }

    /// The raw flag byte for each point; bit 0 marks an on-curve point.
    pub fn flags(&self) -> &[u8] {
        &self.flags
    }

    /// The decoded points, in font units.
    pub fn points(&self) -> &[Point<i16>] {
        &self.points
    }

    /// The total number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// `true` if the glyph has no outline.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The shared point allowance for all decoded glyphs.
///
/// Sized once from the `maxp` profile. Decoding that would exceed it
/// fails with [`DrawError::InsufficientMemory`] rather than growing.
#[derive(Clone, Debug)]
struct StorageBudget {
    points_remaining: usize,
}

impl StorageBudget {
    fn new(num_glyphs: u16, max_points: u16) -> Self {
        StorageBudget {
            points_remaining: num_glyphs as usize * max_points as usize,
        }
    }

    fn reserve_points(&mut self, count: usize) -> Result<(), DrawError> {
        if count > self.points_remaining {
            return Err(DrawError::InsufficientMemory);
        }
        self.points_remaining -= count;
        Ok(())
    }
}

/// Decoded glyphs, memoized by glyph id.
#[derive(Clone, Debug)]
pub(crate) struct GlyphCache {
    slots: Vec<Option<Glyph>>,
    budget: StorageBudget,
}

impl GlyphCache {
    pub(crate) fn new(num_glyphs: u16, max_points: u16) -> Self {
        GlyphCache {
            slots: vec![None; num_glyphs as usize],
            budget: StorageBudget::new(num_glyphs, max_points),
        }
    }

    pub(crate) fn get(&self, glyph_id: GlyphId) -> Option<&Glyph> {
        self.slots.get(glyph_id.to_usize())?.as_ref()
    }

    pub(crate) fn num_glyphs(&self) -> u16 {
        self.slots.len() as u16
    }
}

/// Decodes glyph records into the cache, recursively for composites.
pub(crate) struct GlyphLoader<'a> {
    glyf: &'a Glyf,
    loca: &'a Loca,
    cache: &'a mut GlyphCache,
}

impl<'a> GlyphLoader<'a> {
    pub(crate) fn new(glyf: &'a Glyf, loca: &'a Loca, cache: &'a mut GlyphCache) -> Self {
        GlyphLoader { glyf, loca, cache }
    }

    /// Decode `glyph_id` and every glyph it references into the cache.
    ///
    /// A glyph that is already present is not decoded again, so loading
    /// is idempotent and shared components are charged against the
    /// storage budget once per use, not once per decode.
    pub(crate) fn load(&mut self, glyph_id: GlyphId, recurse_depth: usize) -> Result<(), DrawError> {
        if recurse_depth > GLYF_COMPOSITE_RECURSION_LIMIT {
            return Err(DrawError::RecursionLimitExceeded(glyph_id));
        }
        let ix = glyph_id.to_usize();
        if ix >= self.cache.slots.len() {
            return Err(DrawError::GlyphNotFound(glyph_id));
        }
        if self.cache.slots[ix].is_some() {
            return Ok(());
        }
        // reborrow so record data can outlive the &mut self calls below
        let glyf = self.glyf;
        let glyph = match self.loca.glyph_range(glyph_id, glyf.len() as u32)? {
            None => Glyph::default(),
            Some(range) => {
                let data = glyf.data_for_range(range).ok_or(ReadError::OutOfBounds)?;
                match glyf::Glyph::read(data)? {
                    glyf::Glyph::Simple(simple) => self.load_simple(&simple)?,
                    glyf::Glyph::Composite(composite) => {
                        self.load_composite(glyph_id, &composite, recurse_depth)?
                    }
                }
            }
        };
        trace!(
            "loaded glyph {glyph_id}: {} contours, {} points",
            glyph.number_of_contours,
            glyph.points.len()
        );
        self.cache.slots[ix] = Some(glyph);
        Ok(())
    }

    fn load_simple(&mut self, simple: &glyf::SimpleGlyph<'_>) -> Result<Glyph, DrawError> {
        let end_pts_of_contours = simple.end_pts_of_contours().to_vec();
        if !end_pts_of_contours.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(ReadError::MalformedData("contour end points out of order").into());
        }
        let n_points = simple.num_points();
        self.cache.budget.reserve_points(n_points)?;
        let mut points = vec![Point::default(); n_points];
        let mut flags = vec![0u8; n_points];
        simple.read_points_fast(&mut points, &mut flags)?;
        Ok(Glyph {
            number_of_contours: end_pts_of_contours.len() as i16,
            bounds: simple.bounds(),
            end_pts_of_contours,
            flags,
            points,
        })
    }

    fn load_composite(
        &mut self,
        glyph_id: GlyphId,
        composite: &glyf::CompositeGlyph<'_>,
        recurse_depth: usize,
    ) -> Result<Glyph, DrawError> {
        let mut end_pts_of_contours = Vec::new();
        let mut flags = Vec::new();
        let mut points: Vec<Point<i16>> = Vec::new();
        for component in composite.components() {
            let component = component?;
            let offset = match component.anchor {
                Anchor::Offset { x, y } => Point::new(x, y),
                Anchor::Point { .. } => {
                    return Err(DrawError::PointMatchingUnsupported(glyph_id))
                }
            };
            self.load(component.glyph, recurse_depth + 1)?;
            let Some(child) = self.cache.get(component.glyph) else {
                return Err(DrawError::GlyphNotFound(component.glyph));
            };
            // the same glyph may be referenced again under a different
            // transform, so assembly works on an independent copy
            let mut child = child.clone();
            self.cache.budget.reserve_points(child.points.len())?;
            // translate first, then scale
            for point in &mut child.points {
                *point = Point::new(
                    point.x.wrapping_add(offset.x),
                    point.y.wrapping_add(offset.y),
                );
            }
            transform_component_points(&component, &mut child.points);
            let point_base = points.len() as u16;
            end_pts_of_contours.extend(
                child
                    .end_pts_of_contours
                    .iter()
                    .map(|end| end.wrapping_add(point_base)),
            );
            flags.extend_from_slice(&child.flags);
            points.extend_from_slice(&child.points);
        }
        Ok(Glyph {
            number_of_contours: end_pts_of_contours.len() as i16,
            bounds: composite.bounds(),
            end_pts_of_contours,
            flags,
            points,
        })
    }
}

/// Applies a component's transform to its (already translated) points.
///
/// All three wire encodings funnel through here so the arithmetic lives
/// in exactly one place.
fn transform_component_points(component: &Component, points: &mut [Point<i16>]) {
    let flags = component.flags;
    let transform = &component.transform;
    if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
        //NOTE: a uniform scale intentionally reads the y coordinate as the
        // source for both axes; keep any correction confined to this branch.
        let scale = transform.yy.to_f32();
        for point in points {
            let y = point.y as f32;
            *point = Point::new((y * scale) as i16, (y * scale) as i16);
        }
    } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
        let x_scale = transform.xx.to_f32();
        let y_scale = transform.yy.to_f32();
        for point in points {
            *point = Point::new(
                (point.x as f32 * x_scale) as i16,
                (point.y as f32 * y_scale) as i16,
            );
        }
    } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
        let (xx, yx, xy, yy) = (
            transform.xx.to_f32(),
            transform.yx.to_f32(),
            transform.xy.to_f32(),
            transform.yy.to_f32(),
        );
        for point in points {
            let (x, y) = (point.x as f32, point.y as f32);
            *point = Point::new((x * xx + y * xy) as i16, (x * yx + y * yy) as i16);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sfnt_test_data::{be_buffer, bebuffer::BeBuffer, glyf as test_data};
    use types::F2Dot14;

    use crate::font_data::FontData;
    use crate::tables::glyf::Transform;

    use super::*;

    fn build_tables(records: &[&[u8]]) -> (Glyf, Loca) {
        let mut loca_entries = vec![0u16];
        let mut glyf_bytes: Vec<u8> = Vec::new();
        for record in records {
            glyf_bytes.extend_from_slice(record);
            loca_entries.push((glyf_bytes.len() / 2) as u16);
        }
        let glyf = Glyf::read(FontData::new(&glyf_bytes)).unwrap();
        let loca_data = BeBuffer::new().extend(loca_entries.iter().copied());
        let loca = Loca::read_with_format(
            FontData::new(loca_data.as_slice()),
            records.len() as u16,
            false,
        )
        .unwrap();
        (glyf, loca)
    }

    fn load_one(
        glyf: &Glyf,
        loca: &Loca,
        cache: &mut GlyphCache,
        gid: u16,
    ) -> Result<Glyph, DrawError> {
        GlyphLoader::new(glyf, loca, cache).load(GlyphId::new(gid), 0)?;
        Ok(cache.get(GlyphId::new(gid)).unwrap().clone())
    }

    fn component(flags: CompositeGlyphFlags, transform: Transform) -> Component {
        Component {
            glyph: GlyphId::new(1),
            anchor: Anchor::Offset { x: 0, y: 0 },
            flags,
            transform,
        }
    }

    fn scale_transform(xx: f32, yy: f32) -> Transform {
        Transform {
            xx: F2Dot14::from_f32(xx),
            yy: F2Dot14::from_f32(yy),
            ..Default::default()
        }
    }

    #[test]
    fn uniform_scale_takes_both_axes_from_y() {
        let component = component(
            CompositeGlyphFlags::WE_HAVE_A_SCALE,
            scale_transform(0.5, 0.5),
        );
        let mut points = [Point::new(10, 20), Point::new(-8, 6)];
        transform_component_points(&component, &mut points);
        assert_eq!(points, [Point::new(10, 10), Point::new(3, 3)]);
    }

    #[test]
    fn x_and_y_scales_apply_per_axis() {
        let component = component(
            CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE,
            scale_transform(0.5, 1.5),
        );
        let mut points = [Point::new(10, 20)];
        transform_component_points(&component, &mut points);
        assert_eq!(points, [Point::new(5, 30)]);
    }

    #[test]
    fn two_by_two_matrix() {
        let transform = Transform {
            xx: F2Dot14::from_f32(1.0),
            yx: F2Dot14::from_f32(0.5),
            xy: F2Dot14::from_f32(-0.5),
            yy: F2Dot14::from_f32(1.0),
        };
        let component = component(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO, transform);
        let mut points = [Point::new(10, 20)];
        transform_component_points(&component, &mut points);
        assert_eq!(points, [Point::new(0, 25)]);
    }

    #[test]
    fn no_transform_flags_leave_points_alone() {
        let component = component(CompositeGlyphFlags::empty(), Transform::default());
        let mut points = [Point::new(10, 20)];
        transform_component_points(&component, &mut points);
        assert_eq!(points, [Point::new(10, 20)]);
    }

    #[test]
    fn budget_is_exhaustible() {
        let mut budget = StorageBudget::new(2, 4);
        assert!(budget.reserve_points(5).is_ok());
        assert_eq!(budget.reserve_points(4), Err(DrawError::InsufficientMemory));
        assert!(budget.reserve_points(3).is_ok());
    }

    #[test]
    fn loads_a_simple_glyph() {
        let triangle = test_data::simple_triangle();
        let (glyf, loca) = build_tables(&[triangle.as_slice()]);
        let mut cache = GlyphCache::new(1, 8);
        let glyph = load_one(&glyf, &loca, &mut cache, 0).unwrap();
        assert_eq!(glyph.number_of_contours(), 1);
        assert_eq!(glyph.end_pts_of_contours(), [2]);
        assert_eq!(
            glyph.points(),
            [Point::new(8, 8), Point::new(40, 8), Point::new(24, 40)]
        );
    }

    #[test]
    fn empty_glyph_decodes_to_nothing() {
        let (glyf, loca) = build_tables(&[&[]]);
        let mut cache = GlyphCache::new(1, 8);
        let glyph = load_one(&glyf, &loca, &mut cache, 0).unwrap();
        assert_eq!(glyph.number_of_contours(), 0);
        assert_eq!(glyph.num_points(), 0);
        assert!(glyph.is_empty());
    }

    #[test]
    fn composite_appends_translated_components() {
        let composite = test_data::composite_translate_only();
        let triangle = test_data::simple_triangle();
        // glyph 0 is the composite; it references glyph 1
        let (glyf, loca) = build_tables(&[composite.as_slice(), triangle.as_slice()]);
        let mut cache = GlyphCache::new(2, 8);
        let glyph = load_one(&glyf, &loca, &mut cache, 0).unwrap();
        assert_eq!(glyph.number_of_contours(), 1);
        assert_eq!(glyph.end_pts_of_contours(), [2]);
        assert_eq!(
            glyph.points(),
            [Point::new(24, 8), Point::new(56, 8), Point::new(40, 40)]
        );
        // the referenced glyph was decoded untranslated
        let child = cache.get(GlyphId::new(1)).unwrap();
        assert_eq!(child.points()[0], Point::new(8, 8));
    }

    #[test]
    fn loading_is_idempotent() {
        let triangle = test_data::simple_triangle();
        let (glyf, loca) = build_tables(&[triangle.as_slice()]);
        // enough for exactly one decode
        let mut cache = GlyphCache::new(1, 3);
        let first = load_one(&glyf, &loca, &mut cache, 0).unwrap();
        let second = load_one(&glyf, &loca, &mut cache, 0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn storage_budget_bounds_decoding() {
        let triangle = test_data::simple_triangle();
        let (glyf, loca) = build_tables(&[triangle.as_slice()]);
        let mut cache = GlyphCache::new(1, 2);
        let result = load_one(&glyf, &loca, &mut cache, 0);
        assert_eq!(result, Err(DrawError::InsufficientMemory));
    }

    #[test]
    fn cyclic_composites_hit_the_recursion_limit() {
        let record = |child: u16| {
            be_buffer! {
                -1i16,          // int16 numberOfContours, composite
                0i16,           // int16 xMin
                0i16,           // int16 yMin
                32i16,          // int16 xMax
                32i16,          // int16 yMax
                0x0003u16,      // uint16 flags, word args, xy values
                child,          // uint16 glyphIndex
                0i16,           // int16 argument1
                0i16            // int16 argument2
            }
        };
        let (first, second) = (record(1), record(0));
        let (glyf, loca) = build_tables(&[first.as_slice(), second.as_slice()]);
        let mut cache = GlyphCache::new(2, 64);
        let result = load_one(&glyf, &loca, &mut cache, 0);
        assert!(matches!(result, Err(DrawError::RecursionLimitExceeded(_))));
    }

    #[test]
    fn point_matching_anchors_are_rejected() {
        let composite = test_data::composite_point_matching();
        let triangle = test_data::simple_triangle();
        let (glyf, loca) = build_tables(&[composite.as_slice(), triangle.as_slice()]);
        let mut cache = GlyphCache::new(2, 8);
        let result = load_one(&glyf, &loca, &mut cache, 0);
        assert_eq!(
            result,
            Err(DrawError::PointMatchingUnsupported(GlyphId::new(0)))
        );
    }

    #[test]
    fn unknown_glyph_ids_are_not_found() {
        let triangle = test_data::simple_triangle();
        let (glyf, loca) = build_tables(&[triangle.as_slice()]);
        let mut cache = GlyphCache::new(1, 8);
        let result = load_one(&glyf, &loca, &mut cache, 9);
        assert_eq!(result, Err(DrawError::GlyphNotFound(GlyphId::new(9))));
    }
}
