//! Splits a flat run of lines across unit descriptions.

use tracing::{debug, warn};

use crate::embed::{DisplayUnit, UnitTemplate};
use crate::error::PaginateError;

use super::budget::{Budgets, line_cost, text_len};

/// Paginate `lines` into unit descriptions under the default budgets.
pub fn paginate_description<I, S>(
    template: &UnitTemplate,
    lines: I,
) -> Result<Vec<DisplayUnit>, PaginateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paginate_description_with(template, lines, &Budgets::default())
}

/// Paginate `lines` into unit descriptions.
///
/// Every unit's description is the template's base description followed by
/// as many whole lines (each terminated by `\n`) as fit under
/// `budgets.description`. A line that cannot fit even in an empty unit is
/// kept whole in a unit of its own and that unit is marked `oversized`.
///
/// Always returns at least one unit.
pub fn paginate_description_with<I, S>(
    template: &UnitTemplate,
    lines: I,
    budgets: &Budgets,
) -> Result<Vec<DisplayUnit>, PaginateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    budgets.validate()?;
    template.validate_for_description(budgets)?;

    let mut pager = DescriptionPager::new(template, budgets.description);
    for line in lines {
        pager.push_line(line.as_ref());
    }

    Ok(pager.finish())
}

struct DescriptionPager<'t> {
    template: &'t UnitTemplate,
    budget: usize,
    base_len: usize,
    units: Vec<DisplayUnit>,
    current: DisplayUnit,
    lines: String,
    lines_len: usize,
}

impl<'t> DescriptionPager<'t> {
    fn new(template: &'t UnitTemplate, budget: usize) -> Self {
        Self {
            template,
            budget,
            base_len: template.base_description().map_or(0, text_len),
            units: Vec::new(),
            current: template.open_unit(false),
            lines: String::new(),
            lines_len: 0,
        }
    }

    fn push_line(&mut self, line: &str) {
        let cost = line_cost(line);

        if !self.lines.is_empty() && self.base_len + self.lines_len + cost > self.budget {
            self.close_unit();
        }

        self.lines.push_str(line);
        self.lines.push('\n');
        self.lines_len += cost;

        let description_len = self.base_len + self.lines_len;
        if description_len > self.budget && !self.current.oversized {
            warn!(
                unit = self.units.len(),
                line_len = cost,
                budget = self.budget,
                "line exceeds the description budget, keeping it whole"
            );
            self.current.oversized = true;
        }
    }

    fn close_unit(&mut self) {
        let next = self.template.open_unit(true);
        let mut unit = std::mem::replace(&mut self.current, next);

        let mut description = self.template.base_description().unwrap_or_default().to_owned();
        description.push_str(&std::mem::take(&mut self.lines));
        unit.description = Some(description);

        debug!(
            unit = self.units.len(),
            description_len = self.base_len + self.lines_len,
            "closed description unit"
        );
        self.lines_len = 0;
        self.units.push(unit);
    }

    fn finish(mut self) -> Vec<DisplayUnit> {
        self.close_unit();
        self.units
    }
}
