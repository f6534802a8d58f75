//! Error types for the data provider.

use thiserror::Error;

use super::views::DataType;

/// Errors raised while wiring or dispatching provider views.
///
/// Rejected writes and failed fetches are not errors: they resolve to
/// [`UpdateInstruction::Unchanged`](super::UpdateInstruction::Unchanged) and
/// placeholder text respectively.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider '{provider}' does not declare data type '{data_type}'")]
    UndeclaredDataType {
        provider: String,
        data_type: DataType,
    },

    #[error("Data type '{data_type}' is already registered on provider '{provider}'")]
    DuplicateDataType {
        provider: String,
        data_type: DataType,
    },

    #[error("Provider '{provider}' declares data types without handlers: {missing:?}")]
    MissingHandlers {
        provider: String,
        missing: Vec<DataType>,
    },

    #[error("Provider '{provider}' has no data type '{data_type}'")]
    UnknownDataType {
        provider: String,
        data_type: DataType,
    },

    #[error("Data type '{data_type}' does not accept a {selector} selector")]
    SelectorMismatch {
        data_type: DataType,
        selector: &'static str,
    },

    #[error("Data type '{data_type}' does not accept a {value} value")]
    ValueMismatch {
        data_type: DataType,
        value: &'static str,
    },
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
