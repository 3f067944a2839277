//! Splits named groups of lines across unit fields.

use tracing::{debug, trace, warn};

use crate::embed::{DisplayUnit, UnitField, UnitTemplate};
use crate::error::PaginateError;

use super::budget::{Budgets, continuation_of, line_cost, text_len};

/// A named run of lines rendered as one field, or several when it overflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGroup {
    pub name: String,
    pub lines: Vec<String>,
}

impl FieldGroup {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        lines: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Paginate `groups` into unit fields under the default budgets.
pub fn paginate_fields(
    template: &UnitTemplate,
    groups: &[FieldGroup],
    inline: bool,
) -> Result<Vec<DisplayUnit>, PaginateError> {
    paginate_fields_with(template, groups, inline, &Budgets::default())
}

/// Paginate `groups` into unit fields.
///
/// Each group yields at least one field, named after the group. When a
/// group's lines overflow `budgets.field_value`, or the group resumes in a
/// new unit, the rest continues in fields named `<name> (Cont.)`. Units are
/// closed before they would exceed `budgets.max_fields` fields or
/// `budgets.field_unit` characters of decorations, field names and values.
///
/// A single line too long for an empty field or unit is kept whole and its
/// unit is marked `oversized`. Always returns at least one unit.
pub fn paginate_fields_with(
    template: &UnitTemplate,
    groups: &[FieldGroup],
    inline: bool,
    budgets: &Budgets,
) -> Result<Vec<DisplayUnit>, PaginateError> {
    budgets.validate()?;
    template.validate_for_fields(budgets)?;

    let mut pager = FieldPager::new(template, *budgets, inline);
    for group in groups {
        pager.start_group(&group.name);
        for line in &group.lines {
            pager.push_line(line);
        }
        pager.end_group();
    }

    Ok(pager.finish())
}

struct FieldPager<'t> {
    template: &'t UnitTemplate,
    budgets: Budgets,
    inline: bool,
    units: Vec<DisplayUnit>,
    current: DisplayUnit,
    unit_len: usize,
    group_name: String,
    field_name: String,
    field_value: String,
    field_len: usize,
    // Whether the open field's name is already counted in `unit_len`.
    name_charged: bool,
}

impl<'t> FieldPager<'t> {
    fn new(template: &'t UnitTemplate, budgets: Budgets, inline: bool) -> Self {
        let current = template.open_unit(false);

        Self {
            template,
            budgets,
            inline,
            units: Vec::new(),
            unit_len: current.aggregate_len(),
            current,
            group_name: String::new(),
            field_name: String::new(),
            field_value: String::new(),
            field_len: 0,
            name_charged: false,
        }
    }

    fn start_group(&mut self, name: &str) {
        self.group_name = name.to_owned();
        self.field_name = name.to_owned();
    }

    fn push_line(&mut self, line: &str) {
        let cost = line_cost(line);

        if !self.field_value.is_empty() && self.field_len + cost > self.budgets.field_value {
            trace!(field = %self.field_name, "field value full, continuing in a new field");
            self.close_field();
            self.field_name = continuation_of(&self.group_name);
        }

        let name_cost = self.pending_name_cost();
        let over_total = self.unit_len + name_cost + cost > self.budgets.field_unit;
        let out_of_slots =
            self.field_value.is_empty() && self.current.fields.len() >= self.budgets.max_fields;

        if (over_total || out_of_slots) && self.unit_has_content() {
            if !self.field_value.is_empty() {
                self.close_field();
                self.field_name = continuation_of(&self.group_name);
            }
            self.close_unit(if over_total { "length" } else { "field count" });
        }

        self.charge_name();
        self.field_value.push_str(line);
        self.field_value.push('\n');
        self.field_len += cost;
        self.unit_len += cost;

        if self.field_len > self.budgets.field_value || self.unit_len > self.budgets.field_unit {
            self.flag_oversized(cost);
        }
    }

    fn end_group(&mut self) {
        if self.field_value.is_empty() {
            // A group without lines still gets its (empty) field.
            let over_total = self.unit_len + self.pending_name_cost() > self.budgets.field_unit;
            let out_of_slots = self.current.fields.len() >= self.budgets.max_fields;
            if (over_total || out_of_slots) && self.unit_has_content() {
                self.close_unit(if over_total { "length" } else { "field count" });
            }
            self.charge_name();
        }

        self.close_field();
    }

    fn finish(mut self) -> Vec<DisplayUnit> {
        self.close_unit("end of input");
        self.units
    }

    fn pending_name_cost(&self) -> usize {
        if self.name_charged {
            0
        } else {
            text_len(&self.field_name)
        }
    }

    fn charge_name(&mut self) {
        self.unit_len += self.pending_name_cost();
        self.name_charged = true;
    }

    fn unit_has_content(&self) -> bool {
        !self.current.fields.is_empty() || !self.field_value.is_empty()
    }

    fn close_field(&mut self) {
        self.current.fields.push(UnitField {
            name: self.field_name.clone(),
            value: std::mem::take(&mut self.field_value),
            inline: self.inline,
        });
        self.field_len = 0;
        self.name_charged = false;
    }

    fn close_unit(&mut self, reason: &'static str) {
        let next = self.template.open_unit(true);
        let unit = std::mem::replace(&mut self.current, next);

        debug!(
            unit = self.units.len(),
            fields = unit.fields.len(),
            total_len = self.unit_len,
            reason,
            "closed field unit"
        );

        self.unit_len = self.current.aggregate_len();
        self.units.push(unit);
    }

    fn flag_oversized(&mut self, line_len: usize) {
        if !self.current.oversized {
            warn!(
                unit = self.units.len(),
                field = %self.field_name,
                line_len,
                field_budget = self.budgets.field_value,
                unit_budget = self.budgets.field_unit,
                "line exceeds a field budget, keeping it whole"
            );
        }
        self.current.oversized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> UnitTemplate {
        UnitTemplate::builder().title(title).no_timestamp().build()
    }

    fn field_names(units: &[DisplayUnit]) -> Vec<&str> {
        units
            .iter()
            .flat_map(|unit| unit.fields.iter().map(|field| field.name.as_str()))
            .collect()
    }

    #[test]
    fn empty_and_single_line_groups_keep_their_order() {
        let groups = [
            FieldGroup::new("A", Vec::<String>::new()),
            FieldGroup::new("B", ["x"]),
        ];
        let units = paginate_fields(&UnitTemplate::default(), &groups, false).unwrap();

        assert_eq!(units.len(), 1);
        assert_eq!(
            units[0].fields,
            vec![
                UnitField {
                    name: "A".to_owned(),
                    value: String::new(),
                    inline: false,
                },
                UnitField {
                    name: "B".to_owned(),
                    value: "x\n".to_owned(),
                    inline: false,
                },
            ]
        );
    }

    #[test]
    fn no_groups_yields_one_empty_unit() {
        let units = paginate_fields(&titled("T"), &[], false).unwrap();

        assert_eq!(units.len(), 1);
        assert!(units[0].fields.is_empty());
        assert_eq!(units[0].title.as_deref(), Some("T"));
    }

    #[test]
    fn long_group_spills_into_continuation_fields_and_units() {
        let lines: Vec<String> = (0..400)
            .map(|index| format!("{index:04}: {:>9}", index * 37))
            .collect();
        let groups = [FieldGroup::new("Scores", lines.clone())];

        let units = paginate_fields(&titled("T"), &groups, false).unwrap();

        assert!(units.len() >= 2);
        assert_eq!(units[0].title.as_deref(), Some("T"));
        for unit in &units[1..] {
            assert_eq!(unit.title.as_deref(), Some("T (Cont.)"));
        }

        let names = field_names(&units);
        assert_eq!(names[0], "Scores");
        assert!(names[1..].iter().all(|name| *name == "Scores (Cont.)"));

        for unit in &units {
            assert!(unit.fields.len() <= 25);
            assert!(unit.total_len() <= 5500);
            assert!(!unit.oversized);
            for field in &unit.fields {
                assert!(text_len(&field.value) <= 1200);
            }
        }

        let rebuilt: String = units
            .iter()
            .flat_map(|unit| unit.fields.iter().map(|field| field.value.as_str()))
            .collect();
        let expected: String = lines.iter().map(|line| format!("{line}\n")).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn field_resumed_in_a_new_unit_is_named_as_continuation() {
        let budgets = Budgets {
            field_unit: 30,
            ..Budgets::default()
        };
        let groups = [FieldGroup::new(
            "A",
            ["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff"],
        )];

        let units =
            paginate_fields_with(&UnitTemplate::default(), &groups, false, &budgets).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].fields.len(), 1);
        assert_eq!(units[0].fields[0].name, "A");
        assert_eq!(units[0].fields[0].value, "aaaa\nbbbb\ncccc\ndddd\neeee\n");
        assert_eq!(units[1].fields[0].name, "A (Cont.)");
        assert_eq!(units[1].fields[0].value, "ffff\n");
    }

    #[test]
    fn next_group_in_a_new_unit_keeps_its_own_name() {
        let budgets = Budgets {
            field_unit: 11,
            ..Budgets::default()
        };
        let groups = [
            FieldGroup::new("A", ["aaaa"]),
            FieldGroup::new("B", ["bbbb"]),
        ];

        let units =
            paginate_fields_with(&UnitTemplate::default(), &groups, false, &budgets).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[1].fields[0].name, "B");
    }

    #[test]
    fn field_count_is_capped_per_unit() {
        let groups: Vec<FieldGroup> = (0..30)
            .map(|index| FieldGroup::new(format!("G{index}"), ["1"]))
            .collect();

        let units = paginate_fields(&titled("T"), &groups, false).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].fields.len(), 25);
        assert_eq!(units[1].fields.len(), 5);
        assert_eq!(units[1].fields[0].name, "G25");
        assert_eq!(units[1].title.as_deref(), Some("T (Cont.)"));
    }

    #[test]
    fn empty_group_after_a_full_unit_moves_to_the_next_unit() {
        let mut groups: Vec<FieldGroup> = (0..25)
            .map(|index| FieldGroup::new(format!("G{index}"), ["1"]))
            .collect();
        groups.push(FieldGroup::new("Empty", Vec::<String>::new()));

        let units = paginate_fields(&UnitTemplate::default(), &groups, false).unwrap();

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].fields.len(), 25);
        assert_eq!(units[1].fields[0].name, "Empty");
        assert_eq!(units[1].fields[0].value, "");
    }

    #[test]
    fn split_field_on_the_last_slot_never_exceeds_the_cap() {
        let budgets = Budgets {
            field_value: 10,
            max_fields: 2,
            ..Budgets::default()
        };
        let groups = [
            FieldGroup::new("A", ["1"]),
            FieldGroup::new("B", ["bbbb", "cccc", "dddd"]),
        ];

        let units =
            paginate_fields_with(&UnitTemplate::default(), &groups, false, &budgets).unwrap();

        assert!(units.iter().all(|unit| unit.fields.len() <= 2));
        assert_eq!(field_names(&units), ["A", "B", "B (Cont.)"]);
        assert_eq!(units[1].fields[0].value, "dddd\n");
    }

    #[test]
    fn inline_flag_applies_to_every_field() {
        let groups = [
            FieldGroup::new("A", ["1"]),
            FieldGroup::new("B", Vec::<String>::new()),
        ];
        let units = paginate_fields(&UnitTemplate::default(), &groups, true).unwrap();

        assert!(units[0].fields.iter().all(|field| field.inline));
    }

    #[test]
    fn overlong_line_is_kept_whole_and_flagged() {
        let long = "z".repeat(1500);
        let groups = [FieldGroup::new("A", [long.clone(), "tail".to_owned()])];

        let units = paginate_fields(&UnitTemplate::default(), &groups, false).unwrap();

        assert_eq!(units.len(), 1);
        assert!(units[0].oversized);
        assert_eq!(units[0].fields[0].value, format!("{long}\n"));
        assert_eq!(units[0].fields[1].name, "A (Cont.)");
        assert_eq!(units[0].fields[1].value, "tail\n");
    }

    #[test]
    fn decorations_count_toward_the_unit_budget() {
        let template = UnitTemplate::builder()
            .title("T")
            .footer_text("f".repeat(10))
            .no_timestamp()
            .build();
        let budgets = Budgets {
            field_unit: 40,
            ..Budgets::default()
        };
        let groups = [FieldGroup::new(
            "A",
            ["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff", "gggg"],
        )];

        let units = paginate_fields_with(&template, &groups, false, &budgets).unwrap();

        // 11 of decorations and 1 of field name leave room for five lines.
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].fields[0].value, "aaaa\nbbbb\ncccc\ndddd\neeee\n");
        assert_eq!(units[1].fields[0].value, "ffff\ngggg\n");
        assert!(units.iter().all(|unit| unit.total_len() <= 40));
    }

    #[test]
    fn base_description_is_carried_into_every_unit() {
        let template = UnitTemplate::builder()
            .base_description("Weekly totals")
            .no_timestamp()
            .build();
        let groups: Vec<FieldGroup> = (0..26)
            .map(|index| FieldGroup::new(format!("G{index}"), ["1"]))
            .collect();

        let units = paginate_fields(&template, &groups, false).unwrap();

        assert_eq!(units.len(), 2);
        assert!(
            units
                .iter()
                .all(|unit| unit.description.as_deref() == Some("Weekly totals"))
        );
    }

    #[test]
    fn oversized_decorations_are_rejected() {
        let template = UnitTemplate::builder().footer_text("f".repeat(100)).build();
        let budgets = Budgets {
            field_unit: 50,
            ..Budgets::default()
        };

        let err = paginate_fields_with(&template, &[], false, &budgets).unwrap_err();
        assert!(matches!(err, PaginateError::InvalidTemplate { .. }));
    }

    #[test]
    fn same_input_paginates_identically() {
        let groups: Vec<FieldGroup> = (0..40)
            .map(|index| FieldGroup::new(format!("G{index}"), vec!["w".repeat(90); 4]))
            .collect();
        let template = titled("T");

        let first = paginate_fields(&template, &groups, false).unwrap();
        let second = paginate_fields(&template, &groups, false).unwrap();

        assert_eq!(first, second);
    }
}
