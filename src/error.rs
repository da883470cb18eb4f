use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlideError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("board size must be between 1 and 64, got {0}")]
    InvalidSize(usize),

    #[error("tile width and height must be at least 1 cell and the board must fit on screen")]
    InvalidTileSize,

    #[error(
        "terminal too small: need {}x{}, have {}x{}",
        needed.0, needed.1, actual.0, actual.1
    )]
    TerminalTooSmall {
        needed: (u16, u16),
        actual: (u16, u16),
    },
}

pub type Result<T> = std::result::Result<T, SlideError>;
