use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An input image or the configured page box has unusable dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),
    /// The input image list was empty. No document is produced for zero pages.
    #[error("no input images; refusing to build an empty document")]
    EmptyInput,
    /// A byte offset no longer fits the 10-digit cross-reference field.
    #[error("byte offset {0} exceeds the 10-digit cross-reference field")]
    OffsetOverflow(u64),
    /// An Object has the wrong type, e.g. the Object is an Array where a Name would be expected.
    #[error("object has wrong type; expected type {expected} but found type {found}")]
    ObjectType {
        expected: &'static str,
        found: &'static str,
    },
    /// Dictionary key was not found.
    #[error("missing required dictionary key \"{0}\"")]
    DictKey(String),
    /// IO error while writing to the save target.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
