use common_service_sdk::errors::CommonServiceError;

/// Rejection of a parameter bag by a data-access implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("missing required parameter '{key}'")]
    Missing { key: String },

    #[error("parameter '{key}' must be {expected}")]
    InvalidType { key: String, expected: &'static str },

    #[error("parameter '{key}' is not a valid identifier: '{value}'")]
    InvalidIdentifier { key: String, value: String },

    #[error("parameter '{key}' is not a YYYY-MM-DD date: '{value}'")]
    InvalidDate { key: String, value: String },
}

impl ParamError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn invalid_type(key: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidType {
            key: key.into(),
            expected,
        }
    }

    pub fn invalid_identifier(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn invalid_date(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Whatever the DAO raised, unchanged.
    #[error(transparent)]
    Dao(#[from] anyhow::Error),
}

impl DomainError {
    /// The parameter rejection behind this error, if that is what the DAO reported.
    #[must_use]
    pub fn invalid_params(&self) -> Option<&ParamError> {
        match self {
            Self::Dao(e) => e.downcast_ref::<ParamError>(),
        }
    }
}

impl From<DomainError> for CommonServiceError {
    fn from(e: DomainError) -> Self {
        match e.invalid_params() {
            Some(param) => Self::validation(param.to_string()),
            None => Self::internal(),
        }
    }
}
