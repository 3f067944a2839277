/// Ranked filtering for autocomplete suggestions.
pub mod autocomplete;
/// Decorated unit templates and the units produced from them.
pub mod embed;
/// Errors raised when a pagination request is rejected.
pub mod error;
/// Splitting long text across size-bounded units.
pub mod pagination;
/// Shared time helpers.
pub mod time;

pub use embed::{DisplayUnit, UnitField, UnitTemplate};
pub use error::PaginateError;
