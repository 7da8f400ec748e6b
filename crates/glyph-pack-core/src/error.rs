use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlyphPackError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Nothing to pack")]
    Empty,
    #[error("Packing was canceled")]
    Canceled,
    #[error("Glyphs do not fit into a page of the maximum extent ({placed}/{total} placed)")]
    DoesNotFit { placed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, GlyphPackError>;
