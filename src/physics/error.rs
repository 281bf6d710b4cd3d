use thiserror::Error;

/// Reasons a property edit is rejected. The configuration is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("unknown property `{0}`")]
    UnknownProperty(String),

    #[error("`{value}` is not a valid value for `{name}`")]
    MalformedValue { name: String, value: String },

    #[error("`{name}` {constraint}, got `{value}`")]
    InvariantViolation {
        name: String,
        value: String,
        constraint: &'static str,
    },
}
