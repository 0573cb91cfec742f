use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{source_name}: required column `{column}` is missing")]
    MissingColumn {
        source_name: String,
        column: String,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
