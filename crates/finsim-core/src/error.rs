use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinsimError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Non-amortizing installment: installment {installment} does not cover period interest {interest}")]
    NonAmortizingInstallment {
        installment: Decimal,
        interest: Decimal,
    },

    #[error("Numeric overflow in {context}")]
    Overflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl FinsimError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        FinsimError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        FinsimError::Overflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for FinsimError {
    fn from(e: serde_json::Error) -> Self {
        FinsimError::SerializationError(e.to_string())
    }
}
