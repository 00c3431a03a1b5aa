//! A parsed font, ready for codepoint lookup and glyph loading

use types::GlyphId;

use crate::font_data::FontData;
use crate::outline::{DrawError, Glyph, GlyphCache, GlyphLoader};
use crate::read::{FontRead, ReadError};
use crate::table_directory::TableDirectory;
use crate::tables::cmap::Cmap;
use crate::tables::glyf::Glyf;
use crate::tables::head::Head;
use crate::tables::loca::Loca;
use crate::tables::maxp::Maxp;
use crate::TopLevelTable;

/// A font parsed from the bytes of a TrueType file.
///
/// Parsing decodes the five tables needed for outline work up front and
/// owns the result, so a `Font` carries no reference to the input data.
/// Glyphs are decoded on demand through [`Font::load_glyph`] and kept
/// for later lookup with [`Font::glyph`].
#[derive(Clone, Debug)]
pub struct Font {
    head: Head,
    maxp: Maxp,
    cmap: Cmap,
    loca: Loca,
    glyf: Glyf,
    cache: GlyphCache,
}

fn expect_table<'a, T: TopLevelTable + FontRead<'a>>(
    directory: &TableDirectory,
    data: FontData<'a>,
) -> Result<T, ReadError> {
    directory
        .table_data(data, T::TAG)
        .ok_or(ReadError::TableIsMissing(T::TAG))
        .and_then(T::read)
}

impl Font {
    /// Parses a font from the complete bytes of a TrueType file.
    ///
    /// All five of the `cmap`, `head`, `maxp`, `loca` and `glyf` tables
    /// must be present.
    pub fn new(font_bytes: &[u8]) -> Result<Self, ReadError> {
        let data = FontData::new(font_bytes);
        let directory = TableDirectory::read(data)?;
        let head: Head = expect_table(&directory, data)?;
        let maxp: Maxp = expect_table(&directory, data)?;
        let cmap: Cmap = expect_table(&directory, data)?;
        let loca_data = directory
            .table_data(data, Loca::TAG)
            .ok_or(ReadError::TableIsMissing(Loca::TAG))?;
        let loca = Loca::read_with_format(
            loca_data,
            maxp.num_glyphs(),
            head.index_to_loc_format() != 0,
        )?;
        let glyf: Glyf = expect_table(&directory, data)?;
        let cache = GlyphCache::new(maxp.num_glyphs(), maxp.max_points());
        Ok(Font {
            head,
            maxp,
            cmap,
            loca,
            glyf,
            cache,
        })
    }

    /// The number of font units per em.
    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em()
    }

    /// The number of glyphs in the font.
    pub fn num_glyphs(&self) -> u16 {
        self.maxp.num_glyphs()
    }

    /// Maps a codepoint to a glyph identifier.
    ///
    /// Codepoints the font does not cover map to [`GlyphId::NOTDEF`].
    pub fn glyph_index(&self, codepoint: impl Into<u32>) -> GlyphId {
        self.cmap
            .map_codepoint(codepoint)
            .unwrap_or(GlyphId::NOTDEF)
    }

    /// Decodes the outline for `glyph_id`, along with any glyphs it
    /// references, and returns it.
    ///
    /// Outlines are decoded once; loading an already decoded glyph
    /// returns the cached copy.
    pub fn load_glyph(&mut self, glyph_id: GlyphId) -> Result<&Glyph, DrawError> {
        GlyphLoader::new(&self.glyf, &self.loca, &mut self.cache).load(glyph_id, 0)?;
        self.cache
            .get(glyph_id)
            .ok_or(DrawError::GlyphNotFound(glyph_id))
    }

    /// Decodes every outline in the font.
    pub fn load_all(&mut self) -> Result<(), DrawError> {
        for gid in 0..self.cache.num_glyphs() {
            self.load_glyph(GlyphId::new(gid))?;
        }
        Ok(())
    }

    /// Returns the outline for `glyph_id` if it has been loaded.
    pub fn glyph(&self, glyph_id: GlyphId) -> Option<&Glyph> {
        self.cache.get(glyph_id)
    }
}
