use crate::font::{AtlasState, FontFamily};

/// Result type of fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by configuration, font and backend operations.
///
/// Degenerate geometry never produces an error: such calls draw nothing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("font family {0:?} already registered")]
    DuplicateFamily(FontFamily),

    #[error("font family {0:?} is not registered")]
    UnknownFamily(FontFamily),

    #[error("fonts of family {0:?} have not been built")]
    FontsNotBuilt(FontFamily),

    #[error("failed to parse font: {0}")]
    FontParse(String),

    #[error("font atlas is {state:?}, cannot {operation}")]
    AtlasState {
        state: AtlasState,
        operation: &'static str,
    },

    #[error("font atlas image was released")]
    ImageReleased,

    #[error("graphics backend: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
