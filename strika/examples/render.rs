//! Renders one character from a font file into a PPM image.
//!
//! Usage: `render <font.ttf> <character> <size> [out.ppm]`

use std::fs;

use strika::{rasterize, Font};

fn main() {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let (Some(path), Some(text), Some(size)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: render <font.ttf> <character> <size> [out.ppm]");
        std::process::exit(1);
    };
    let out_path = args.next().unwrap_or_else(|| "glyph.ppm".into());
    let character = text.chars().next().expect("empty character argument");
    let size: usize = size.parse().expect("size must be a number of pixels");

    let font_bytes = fs::read(&path).expect("failed to read font file");
    let mut font = Font::new(&font_bytes).expect("failed to parse font");
    let units_per_em = font.units_per_em();
    let glyph_id = font.glyph_index(character);
    let glyph = font.load_glyph(glyph_id).expect("failed to load glyph");
    println!(
        "rendering {character:?} as glyph {glyph_id} ({} points)",
        glyph.num_points()
    );
    let bitmap = rasterize(glyph, units_per_em, size, size);

    // P6 carries RGB, so the alpha channel is dropped
    let mut ppm = format!("P6\n{} {}\n255\n", bitmap.width(), bitmap.height()).into_bytes();
    for pixel in bitmap.data().chunks_exact(4) {
        ppm.extend_from_slice(&pixel[..3]);
    }
    fs::write(&out_path, ppm).expect("failed to write image");
    println!("wrote {out_path}");
}
