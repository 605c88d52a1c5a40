/// Configuration errors raised while evaluating a schema.
///
/// Field validation failures are never reported through this type; they are
/// collected into [`crate::ValidationErrors`].
#[derive(Debug, thiserror::Error)]
pub enum ConstraintError {
    /// A constraint names a validator that was never registered.
    #[error("unknown validator \"{name}\" referenced by attribute \"{attribute}\"")]
    UnknownValidator { name: String, attribute: String },

    /// A validator received options it cannot interpret.
    #[error("invalid options for validator \"{validator}\" on attribute \"{attribute}\": {message}")]
    InvalidOptions {
        validator: String,
        attribute: String,
        message: String,
    },

    /// The schema document does not have the expected shape.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A schema or record document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConstraintError {
    pub(crate) fn invalid_options(
        validator: &str,
        attribute: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidOptions {
            validator: validator.to_string(),
            attribute: attribute.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConstraintError>;
