use std::collections::HashMap;

use calcbook_domain::RecordId;
use once_cell::sync::Lazy;

pub mod calc;
pub mod config;
pub mod session;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(session::definitions());
    commands.extend(calc::definitions());
    commands.extend(config::definitions());
    commands
}

static SUBCOMMANDS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("calc", calc::SUBCOMMANDS),
        ("config", config::SUBCOMMANDS),
    ])
});

/// Subcommand names offered for completion after `command`.
pub(crate) fn subcommands_for(command: &str) -> &'static [&'static str] {
    SUBCOMMANDS.get(command).copied().unwrap_or(&[])
}

pub(crate) fn parse_operand(value: &str, name: &str) -> Result<f64, CommandError> {
    value.trim().parse::<f64>().map_err(|_| {
        CommandError::InvalidArguments(format!("{name} must be a number, got `{value}`"))
    })
}

pub(crate) fn parse_record_id(value: &str) -> Result<RecordId, CommandError> {
    value
        .trim()
        .parse::<RecordId>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{value}` is not a record id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_accept_signed_and_fractional_values() {
        assert_eq!(parse_operand("-2.5", "a").unwrap(), -2.5);
        assert_eq!(parse_operand(" 1e3 ", "b").unwrap(), 1000.0);
        let err = parse_operand("seven", "a").unwrap_err();
        assert!(err.to_string().contains("a must be a number"));
    }

    #[test]
    fn record_ids_must_be_uuids() {
        let id = RecordId::new();
        assert_eq!(parse_record_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_record_id("42"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn every_command_name_is_unique() {
        let definitions = all_definitions();
        let mut names: Vec<_> = definitions.iter().map(|entry| entry.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), definitions.len());
        assert!(subcommands_for("login").is_empty());
    }
}
