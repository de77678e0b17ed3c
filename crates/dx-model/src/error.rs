use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("dictionary entry name must not be empty")]
    EmptyName,

    #[error("search term {index} of '{entry}' is empty after normalization")]
    EmptySearchTerm { entry: String, index: usize },

    #[error("duplicate dictionary entry: {name}")]
    DuplicateEntry { name: String },

    #[error("id column has {ids} values but target column has {texts}")]
    LengthMismatch { ids: usize, texts: usize },

    #[error("row index {index} is out of range for id column of length {len}")]
    RowIndexOutOfRange { index: usize, len: usize },

    #[error("invalid scan option: {message}")]
    InvalidOption { message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
