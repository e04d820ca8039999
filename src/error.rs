use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiskError {
    #[error("Invalid character {byte:#04x} at position {position} in dense map (expected an ASCII digit)")]
    InvalidDigit { position: usize, byte: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiskError>;
