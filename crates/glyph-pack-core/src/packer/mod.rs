//! Single-bin rectangle packers.

pub mod maxrects;

pub use maxrects::MaxRectsBinPack;
