//! Stable facade for splitting long text across bounded display units.

pub mod budget;
mod description;
mod fields;

pub use budget::{
    Budgets, CONTINUATION_SUFFIX, DESCRIPTION_BUDGET, FIELD_UNIT_BUDGET, FIELD_VALUE_BUDGET,
    MAX_FIELDS_PER_UNIT,
};
pub use description::{paginate_description, paginate_description_with};
pub use fields::{FieldGroup, paginate_fields, paginate_fields_with};
