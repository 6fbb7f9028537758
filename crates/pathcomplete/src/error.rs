use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("unable to read directory {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("key byte {byte:#04x} at offset {offset} is outside the 7-bit range")]
    KeyOutOfRange { byte: u8, offset: usize },

    #[error("path is not valid UTF-8: {}", .0.display())]
    InvalidPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, CompletionError>;
