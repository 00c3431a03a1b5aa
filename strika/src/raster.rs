//! Rendering decoded outlines into RGBA bitmaps

use log::{trace, warn};

use types::Point;

use crate::outline::Glyph;

/// Steep edges are drawn red, all others green.
const STEEP_EDGE: [u8; 4] = [255, 0, 0, 255];
const SHALLOW_EDGE: [u8; 4] = [0, 255, 0, 255];

/// An RGBA bitmap with 8 bits per channel, rows stored top to bottom.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Creates a transparent black bitmap of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Bitmap {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    /// The width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw pixel data, four bytes per pixel.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the bitmap, returning the pixel data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Sets the pixel at `(x, y)`; writes outside the bitmap are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let pixels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut self.data);
        pixels[y * self.width + x] = color;
    }
}

/// A point mapped into bitmap coordinates.
#[derive(Clone, Copy, Debug)]
struct DevicePoint {
    pos: Point<u32>,
    on_curve: bool,
}

/// Renders the outline of `glyph` into a `width` by `height` bitmap.
///
/// The glyph is scaled by `height / units_per_em` and shifted by the
/// scaled magnitude of its minimum extents; both axes are then flipped
/// so the outline reads mirrored on the raster. Quadratic curves are
/// approximated by the chord from each on-curve point to the next,
/// with implied on-curve midpoints made explicit first.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn rasterize(glyph: &Glyph, units_per_em: u16, width: usize, height: usize) -> Bitmap {
    assert!(width > 0 && height > 0, "bitmap dimensions must be nonzero");
    let mut bitmap = Bitmap::new(width, height);
    if units_per_em == 0 {
        warn!("units per em is zero; leaving the bitmap blank");
        return bitmap;
    }
    let scale = height as f32 / units_per_em as f32;
    let bounds = glyph.bounds();
    let x_shift = (scale * bounds.x_min as f32).abs();
    let y_shift = (scale * bounds.y_min as f32).abs();
    let map = |x: f32, y: f32| {
        Point::new(
            (width as f32 - (scale * x + x_shift)) as u32,
            (height as f32 - (scale * y + y_shift)) as u32,
        )
    };

    let points = glyph.points();
    let flags = glyph.flags();
    let mut device_points = Vec::with_capacity(points.len());
    let mut contour_ends = vec![0usize];
    for i in 0..points.len() {
        device_points.push(DevicePoint {
            pos: map(points[i].x as f32, points[i].y as f32),
            on_curve: flags[i] & 1 != 0,
        });
        // consecutive off-curve points imply an on-curve midpoint
        if i + 1 < points.len() && flags[i] & 1 == 0 && flags[i + 1] & 1 == 0 {
            let mid_x = (points[i].x as i32 + points[i + 1].x as i32) / 2;
            let mid_y = (points[i].y as i32 + points[i + 1].y as i32) / 2;
            device_points.push(DevicePoint {
                pos: map(mid_x as f32, mid_y as f32),
                on_curve: true,
            });
        }
        if glyph.end_pts_of_contours().iter().any(|end| *end as usize == i) {
            contour_ends.push(device_points.len());
        }
    }

    for window in contour_ends.windows(2) {
        let (start, end) = (window[0], window[1]);
        for i in start..end {
            let mut next = i + 1;
            if end <= next {
                next %= end;
                next += start;
            }
            let mut after = i + 2;
            if end <= after {
                after %= end;
                after += start;
            }
            let origin = device_points[i];
            if !origin.on_curve {
                continue;
            }
            // draw to the next on-curve point, skipping over a control
            let target = if device_points[next].on_curve {
                device_points[next]
            } else {
                device_points[after]
            };
            draw_line(&mut bitmap, origin.pos, target.pos);
        }
    }
    trace!(
        "rasterized {} points into a {width}x{height} bitmap",
        device_points.len()
    );
    bitmap
}

/// Draws an interpolated line between two device points.
fn draw_line(bitmap: &mut Bitmap, from: Point<u32>, to: Point<u32>) {
    let steep = from.x.abs_diff(to.x) < from.y.abs_diff(to.y);
    let (mut from, mut to) = if steep {
        (Point::new(from.y, from.x), Point::new(to.y, to.x))
    } else {
        (from, to)
    };
    if to.x < from.x {
        std::mem::swap(&mut from, &mut to);
    }
    for x in from.x..=to.x {
        let y = if from.y == to.y {
            from.y
        } else {
            let t = (x - from.x) as f32 / (to.x - from.x) as f32;
            (from.y as f32 * (1.0 - t) + to.y as f32 * t) as u32
        };
        if steep {
            bitmap.put_pixel(y, x, STEEP_EDGE);
        } else {
            bitmap.put_pixel(x, y, SHALLOW_EDGE);
        }
    }
}

#[cfg(test)]
mod tests {
    use types::BoundingBox;

    use super::*;

    fn pixel(bitmap: &Bitmap, x: usize, y: usize) -> [u8; 4] {
        let ix = (y * bitmap.width() + x) * 4;
        bitmap.data()[ix..ix + 4].try_into().unwrap()
    }

    fn glyph(
        bounds: BoundingBox<i16>,
        end_pts_of_contours: Vec<u16>,
        flags: Vec<u8>,
        points: Vec<Point<i16>>,
    ) -> Glyph {
        Glyph {
            number_of_contours: end_pts_of_contours.len() as i16,
            bounds,
            end_pts_of_contours,
            flags,
            points,
        }
    }

    fn triangle() -> Glyph {
        glyph(
            BoundingBox {
                x_min: 8,
                y_min: 8,
                x_max: 40,
                y_max: 40,
            },
            vec![2],
            vec![1, 1, 1],
            vec![Point::new(8, 8), Point::new(40, 8), Point::new(24, 40)],
        )
    }

    #[test]
    fn triangle_edges_land_where_expected() {
        let bitmap = rasterize(&triangle(), 64, 16, 16);
        assert_eq!(bitmap.data().len(), 16 * 16 * 4);
        // the bottom edge maps to row 12, drawn shallow
        assert_eq!(pixel(&bitmap, 8, 12), SHALLOW_EDGE);
        // both slanted edges are steep
        assert_eq!(pixel(&bitmap, 6, 8), STEEP_EDGE);
        assert_eq!(pixel(&bitmap, 10, 8), STEEP_EDGE);
        // the interior stays blank
        assert_eq!(pixel(&bitmap, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn off_curve_points_are_skipped_over() {
        let glyph = glyph(
            BoundingBox {
                x_min: 8,
                y_min: 8,
                x_max: 40,
                y_max: 24,
            },
            vec![2],
            vec![1, 0, 1],
            vec![Point::new(8, 8), Point::new(24, 24), Point::new(40, 8)],
        );
        let bitmap = rasterize(&glyph, 64, 16, 16);
        // the chord from (8, 8) to (40, 8) lands on row 12
        assert_eq!(pixel(&bitmap, 8, 12), SHALLOW_EDGE);
        // the control point itself is never drawn
        assert_eq!(pixel(&bitmap, 8, 8), [0, 0, 0, 0]);
    }

    #[test]
    fn implied_on_curve_midpoints_are_drawn() {
        let glyph = glyph(
            BoundingBox {
                x_min: 8,
                y_min: 8,
                x_max: 40,
                y_max: 40,
            },
            vec![3],
            vec![1, 0, 0, 1],
            vec![
                Point::new(8, 8),
                Point::new(8, 40),
                Point::new(40, 40),
                Point::new(40, 8),
            ],
        );
        let bitmap = rasterize(&glyph, 64, 16, 16);
        // the midpoint of the two control points maps to (8, 4) and
        // becomes an endpoint of both chords
        assert_eq!(pixel(&bitmap, 8, 4), STEEP_EDGE);
        assert_eq!(pixel(&bitmap, 10, 8), STEEP_EDGE);
    }

    #[test]
    fn empty_glyph_renders_blank() {
        let bitmap = rasterize(&Glyph::default(), 64, 4, 4);
        assert_eq!(bitmap.data(), vec![0; 4 * 4 * 4].as_slice());
    }

    #[test]
    fn zero_units_per_em_renders_blank() {
        let bitmap = rasterize(&triangle(), 0, 8, 8);
        assert_eq!(bitmap.data(), vec![0; 8 * 8 * 4].as_slice());
    }

    #[test]
    fn zero_width_bounding_boxes_still_render() {
        // a vertical bar: x_min == x_max, so the x extent is degenerate
        let glyph = glyph(
            BoundingBox {
                x_min: 10,
                y_min: 8,
                x_max: 10,
                y_max: 40,
            },
            vec![1],
            vec![1, 1],
            vec![Point::new(10, 8), Point::new(10, 40)],
        );
        let bitmap = rasterize(&glyph, 64, 16, 16);
        // the bar maps to column 11, rows 4 through 12, drawn steep
        assert_eq!(pixel(&bitmap, 11, 4), STEEP_EDGE);
        assert_eq!(pixel(&bitmap, 11, 8), STEEP_EDGE);
        assert_eq!(pixel(&bitmap, 11, 12), STEEP_EDGE);
    }

    #[test]
    fn coordinates_outside_the_bitmap_are_clipped() {
        // with zero minimums the origin maps to (width, height), one
        // pixel past the bottom right corner
        let glyph = glyph(
            BoundingBox {
                x_min: 0,
                y_min: 0,
                x_max: 32,
                y_max: 32,
            },
            vec![2],
            vec![1, 1, 1],
            vec![Point::new(0, 0), Point::new(32, 0), Point::new(16, 32)],
        );
        let bitmap = rasterize(&glyph, 64, 8, 8);
        assert_eq!(bitmap.data().len(), 8 * 8 * 4);
        // the in-bounds parts of the edges still render
        assert!(bitmap.data().iter().any(|byte| *byte != 0));
    }

    #[test]
    #[should_panic(expected = "dimensions must be nonzero")]
    fn zero_size_bitmaps_are_rejected() {
        let _ = rasterize(&triangle(), 64, 0, 16);
    }

    #[test]
    fn put_pixel_ignores_out_of_bounds_writes() {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap.put_pixel(1, 1, STEEP_EDGE);
        bitmap.put_pixel(2, 0, SHALLOW_EDGE);
        bitmap.put_pixel(0, 7, SHALLOW_EDGE);
        assert_eq!(pixel(&bitmap, 1, 1), STEEP_EDGE);
        assert_eq!(pixel(&bitmap, 0, 0), [0, 0, 0, 0]);
    }
}
