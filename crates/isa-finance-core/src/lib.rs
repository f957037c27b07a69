pub mod error;
pub mod format;
pub mod time_value;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "isa")]
pub mod isa;

pub use error::IsaFinanceError;
pub use types::*;

/// Standard result type for all isa-finance operations
pub type IsaFinanceResult<T> = Result<T, IsaFinanceError>;
