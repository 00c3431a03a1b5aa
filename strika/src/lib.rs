//! Parsing TrueType fonts and rasterizing glyph outlines
//!
//! This crate reads the tables of a TrueType font that describe glyph
//! outlines, maps codepoints to glyph identifiers through the `cmap`
//! table, decodes simple and composite glyphs from `glyf` into flat
//! point arrays, and renders those outlines as colored edge traces into
//! RGBA bitmaps.
//!
//! Parsing is eager: [`Font::new`] decodes the five tables it needs
//! (`cmap`, `head`, `maxp`, `loca` and `glyf`) up front and owns the
//! result. Glyph outlines are decoded on demand, memoized, and charged
//! against a storage budget sized from the `maxp` profile, so a
//! malformed font cannot make the decoder allocate without bound.
//!
//! ## Structure
//!
//! The [`tables`] module contains a submodule for each supported table
//! with items for the records and flagsets described in the relevant
//! portion of the [OpenType specification][spec]. The [`outline`] and
//! [`raster`] modules hold the decoded glyph representation and the
//! renderer.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use strika::{rasterize, Font};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let mut font = Font::new(&font_bytes).expect("failed to read font data");
//! let units_per_em = font.units_per_em();
//! let glyph_id = font.glyph_index('A');
//! let glyph = font.load_glyph(glyph_id).expect("failed to load glyph");
//! let bitmap = rasterize(glyph, units_per_em, 64, 64);
//!
//! println!("rendered {} bytes of RGBA", bitmap.data().len());
//! ```
//!
//! [spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font;
mod font_data;
pub mod outline;
pub mod raster;
mod read;
mod table_directory;
pub mod tables;

pub use font::Font;
pub use font_data::FontData;
pub use outline::{DrawError, Glyph};
pub use raster::{rasterize, Bitmap};
pub use read::{FontRead, ReadError};
pub use table_directory::{TableDirectory, TableRecord};

pub use types::{GlyphId, Tag};

/// Public re-export of the sfnt-types crate.
pub extern crate sfnt_types as types;

/// An interface for accessing the table tag of any top-level font table.
pub trait TopLevelTable {
    /// The table's tag, as it appears in the table directory.
    const TAG: Tag;
}

/// The maximum number of nested composite references when loading a glyph.
pub const GLYF_COMPOSITE_RECURSION_LIMIT: usize = 32;
