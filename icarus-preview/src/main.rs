use std::env;
use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use icarus_utils::pagination::{
    Budgets, FieldGroup, paginate_description_with, paginate_fields_with,
};
use icarus_utils::{DisplayUnit, UnitTemplate};

const USAGE: &str = "Usage: icarus-preview <description|fields> <path> [--inline]";
const GROUP_HEADER: &str = "## ";
const DEFAULT_GROUP: &str = "General";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Description,
    Fields { inline: bool },
}

fn main() -> anyhow::Result<()> {
    // Load the .env file before reading budget overrides
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (mode, path) = parse_args(&args)?;

    let budgets = Budgets::from_env()?;
    let text = fs::read_to_string(path)?;
    let template = UnitTemplate::builder()
        .title(format!("Preview of {path}"))
        .footer_text("icarus-preview")
        .build();

    let units = match mode {
        Mode::Description => paginate_description_with(&template, text.lines(), &budgets)?,
        Mode::Fields { inline } => {
            let groups = parse_groups(&text);
            paginate_fields_with(&template, &groups, inline, &budgets)?
        }
    };

    info!(units = units.len(), ?mode, "paginated input");

    for (index, unit) in units.iter().enumerate() {
        println!("{}", summarize(index, unit));
    }

    Ok(())
}

fn parse_args(args: &[String]) -> anyhow::Result<(Mode, &str)> {
    let mut positional = args.iter().filter(|arg| !arg.starts_with("--"));
    let inline = args.iter().any(|arg| arg == "--inline");

    let mode = match positional.next().map(String::as_str) {
        Some("description") => Mode::Description,
        Some("fields") => Mode::Fields { inline },
        _ => anyhow::bail!(USAGE),
    };

    let Some(path) = positional.next() else {
        anyhow::bail!(USAGE);
    };

    Ok((mode, path.as_str()))
}

/// Group lines under the most recent `## ` header.
fn parse_groups(text: &str) -> Vec<FieldGroup> {
    let mut groups: Vec<FieldGroup> = Vec::new();

    for line in text.lines() {
        if let Some(name) = line.strip_prefix(GROUP_HEADER) {
            groups.push(FieldGroup::new(name.trim(), Vec::<String>::new()));
            continue;
        }

        match groups.last_mut() {
            Some(group) => group.lines.push(line.to_owned()),
            None => groups.push(FieldGroup::new(DEFAULT_GROUP, [line])),
        }
    }

    groups
}

fn summarize(index: usize, unit: &DisplayUnit) -> String {
    let mut out = format!(
        "#{} {} ({} chars, {} fields{})",
        index + 1,
        unit.title.as_deref().unwrap_or("<untitled>"),
        unit.total_len(),
        unit.fields.len(),
        if unit.oversized { ", oversized" } else { "" }
    );

    for field in &unit.fields {
        out.push_str(&format!(
            "\n  - {}: {} lines",
            field.name,
            field.value.lines().count()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect()
    }

    #[test]
    fn parses_modes_and_inline_flag() {
        let raw = args(&["fields", "--inline", "scores.txt"]);
        let (mode, path) = parse_args(&raw).unwrap();

        assert_eq!(mode, Mode::Fields { inline: true });
        assert_eq!(path, "scores.txt");

        let raw = args(&["description", "log.txt"]);
        assert_eq!(parse_args(&raw).unwrap().0, Mode::Description);
    }

    #[test]
    fn rejects_missing_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["fields"])).is_err());
        assert!(parse_args(&args(&["pages", "x.txt"])).is_err());
    }

    #[test]
    fn groups_follow_headers() {
        let groups = parse_groups("loose\n## Wins\n3\n4\n## Losses\n## Draws\n1");

        assert_eq!(
            groups,
            vec![
                FieldGroup::new("General", ["loose"]),
                FieldGroup::new("Wins", ["3", "4"]),
                FieldGroup::new("Losses", Vec::<String>::new()),
                FieldGroup::new("Draws", ["1"]),
            ]
        );
    }

    #[test]
    fn summary_lists_fields() {
        let template = UnitTemplate::builder().title("T").no_timestamp().build();
        let units = paginate_fields_with(
            &template,
            &[FieldGroup::new("Wins", ["3", "4"])],
            false,
            &Budgets::default(),
        )
        .unwrap();

        assert_eq!(summarize(0, &units[0]), "#1 T (9 chars, 1 fields)\n  - Wins: 2 lines");
    }
}
