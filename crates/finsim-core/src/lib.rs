pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "savings")]
pub mod savings;

#[cfg(feature = "retirement")]
pub mod retirement;

#[cfg(feature = "markets")]
pub mod markets;

pub use error::FinsimError;
pub use types::*;

/// Standard result type for all finsim operations
pub type FinsimResult<T> = Result<T, FinsimError>;
