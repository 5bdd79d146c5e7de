use thiserror::Error;

/// Failures at the edges of the editor: bytes in, bytes out.
///
/// Editing itself never fails; operations that cannot apply just report that
/// nothing changed.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no image loaded")]
    NoImage,
}

pub type EditorResult<T> = Result<T, EditorError>;
