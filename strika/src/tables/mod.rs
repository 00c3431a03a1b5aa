//! The font tables this crate understands

pub mod cmap;
pub mod glyf;
pub mod head;
pub mod loca;
pub mod maxp;
