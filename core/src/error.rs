use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell index is outside the grid")]
    InvalidCell,
    #[error("Round length must be at least one step")]
    InvalidRoundLength,
    #[error("Game already ended, start a new one first")]
    AlreadyEnded,
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
