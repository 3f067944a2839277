//! Size ceilings enforced by the rendering surface, and the length accounting
//! both paginators share.

use std::env;

use crate::error::PaginateError;

/// Combined description length per unit in description mode.
pub const DESCRIPTION_BUDGET: usize = 4000;
/// Combined decorative and field text per unit in field mode.
pub const FIELD_UNIT_BUDGET: usize = 5500;
/// Length of a single field value.
pub const FIELD_VALUE_BUDGET: usize = 1200;
/// Fields a single unit may hold.
pub const MAX_FIELDS_PER_UNIT: usize = 25;

/// Suffix marking a unit title or field name that continues an earlier one.
pub const CONTINUATION_SUFFIX: &str = " (Cont.)";

const DESCRIPTION_BUDGET_KEY: &str = "ICARUS_DESCRIPTION_BUDGET";
const FIELD_UNIT_BUDGET_KEY: &str = "ICARUS_FIELD_UNIT_BUDGET";
const FIELD_VALUE_BUDGET_KEY: &str = "ICARUS_FIELD_VALUE_BUDGET";
const MAX_FIELDS_KEY: &str = "ICARUS_MAX_FIELDS";

/// Ceilings the paginators must stay under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    /// Description text per unit in description mode.
    pub description: usize,
    /// Decorations plus field names and values per unit in field mode.
    pub field_unit: usize,
    /// Length of one field value.
    pub field_value: usize,
    /// Field count per unit.
    pub max_fields: usize,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            description: DESCRIPTION_BUDGET,
            field_unit: FIELD_UNIT_BUDGET,
            field_value: FIELD_VALUE_BUDGET,
            max_fields: MAX_FIELDS_PER_UNIT,
        }
    }
}

impl Budgets {
    /// Load budgets from `ICARUS_*` environment variables, keeping the
    /// default for any variable that is unset.
    pub fn from_env() -> Result<Self, PaginateError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load budgets from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PaginateError> {
        let defaults = Self::default();

        let budgets = Self {
            description: read_override(&lookup, DESCRIPTION_BUDGET_KEY, defaults.description)?,
            field_unit: read_override(&lookup, FIELD_UNIT_BUDGET_KEY, defaults.field_unit)?,
            field_value: read_override(&lookup, FIELD_VALUE_BUDGET_KEY, defaults.field_value)?,
            max_fields: read_override(&lookup, MAX_FIELDS_KEY, defaults.max_fields)?,
        };

        budgets.validate()?;
        Ok(budgets)
    }

    /// Reject ceilings that cannot hold any text.
    pub fn validate(&self) -> Result<(), PaginateError> {
        let checks = [
            ("description", self.description),
            ("field_unit", self.field_unit),
            ("field_value", self.field_value),
            ("max_fields", self.max_fields),
        ];

        for (name, value) in checks {
            if value == 0 {
                return Err(PaginateError::budget(name, "must be greater than zero"));
            }
        }

        Ok(())
    }
}

fn read_override(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: usize,
) -> Result<usize, PaginateError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    raw.trim()
        .parse::<usize>()
        .map_err(|source| PaginateError::budget(key, format!("`{raw}` is not a count: {source}")))
}

/// Length of `text` as the rendering surface counts it.
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Length a line adds once its terminating newline is appended.
pub fn line_cost(line: &str) -> usize {
    text_len(line) + 1
}

/// Append the continuation suffix to a title or field name.
pub fn continuation_of(name: &str) -> String {
    format!("{name}{CONTINUATION_SUFFIX}")
}
