use crate::cli::commands::{parse_operand, parse_record_id};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::format::{expression, record_details, summary_lines};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{render_records, terminal_width};

pub(crate) const SUBCOMMANDS: &[&str] = &["add", "edit", "show", "list", "delete", "summary"];

const USAGE: &str =
    "calc [add <operation> <a> <b>|edit <id> <a> <b>|show <id>|list|delete <id>|summary]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "calc",
        "Record, browse and edit your calculations",
        USAGE,
        cmd_calc,
    )]
}

fn cmd_calc(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };

    match action.to_lowercase().as_str() {
        "add" => add(context, rest),
        "edit" => edit(context, rest),
        "show" => show(context, rest),
        "list" => list(context),
        "delete" => delete(context, rest),
        "summary" => summary(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown calc action `{other}`; expected one of: {}",
            SUBCOMMANDS.join(", ")
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [operation, a, b] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: calc add <operation> <a> <b>".into(),
        ));
    };
    let a = parse_operand(a, "a")?;
    let b = parse_operand(b, "b")?;
    let credential = context.credential()?;
    let record = context.api().add_named(credential, operation, a, b)?;
    io::print_success(format!(
        "Saved {}: {}",
        record.id,
        expression(&record, context.precision())
    ));
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id, a, b] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: calc edit <id> <a> <b>".into(),
        ));
    };
    let id = parse_record_id(id)?;
    let a = parse_operand(a, "a")?;
    let b = parse_operand(b, "b")?;
    let credential = context.credential()?;
    let record = context.api().edit(credential, id, a, b)?;
    io::print_success(format!(
        "Updated {}: {}",
        record.id,
        expression(&record, context.precision())
    ));
    Ok(())
}

fn show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments("usage: calc show <id>".into()));
    };
    let id = parse_record_id(id)?;
    let credential = context.credential()?;
    let record = context.api().read(credential, id)?;
    output_section(format!("Calculation {}", record.id));
    for line in record_details(&record, context.precision()) {
        io::print_info(line);
    }
    Ok(())
}

fn list(context: &mut ShellContext) -> CommandResult {
    let credential = context.credential()?;
    let records = context.api().browse(credential)?;
    if records.is_empty() {
        io::print_info("No calculations yet. Use `calc add` to record one.");
        return Ok(());
    }
    output_section(format!("Calculations ({})", records.len()));
    for line in render_records(&records, context.precision(), terminal_width()) {
        io::print_info(line);
    }
    Ok(())
}

fn delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments("usage: calc delete <id>".into()));
    };
    let id = parse_record_id(id)?;
    let credential = context.credential()?.clone();
    // Resolve first so a missing record is reported before any prompt.
    let record = context.api().read(&credential, id)?;
    let prompt = format!("Delete {}?", expression(&record, context.precision()));
    if !context.confirm(&prompt)? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    context.api().delete(&credential, id)?;
    io::print_success(format!("Deleted {}.", id));
    Ok(())
}

fn summary(context: &mut ShellContext) -> CommandResult {
    let credential = context.credential()?;
    let summary = context.api().summary(credential)?;
    output_section("Summary");
    for line in summary_lines(&summary) {
        io::print_info(line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use calcbook_core::CoreError;

    use crate::cli::core::{test_context, CommandError, ShellContext};
    use tempfile::{tempdir, TempDir};

    fn logged_in() -> (TempDir, ShellContext) {
        let dir = tempdir().unwrap();
        let mut context = test_context(dir.path());
        context.process_line("config grant alpha 1").unwrap();
        context.process_line("config grant beta 2").unwrap();
        context.process_line("login alpha").unwrap();
        (dir, context)
    }

    fn only_record_id(context: &ShellContext) -> String {
        let credential = context.credential().unwrap();
        let records = context.api().browse(credential).unwrap();
        assert_eq!(records.len(), 1);
        records[0].id.to_string()
    }

    #[test]
    fn add_edit_and_delete_round_trip_through_the_shell() {
        let (_dir, mut context) = logged_in();
        context.process_line("calc add divide 9 3").unwrap();
        let id = only_record_id(&context);

        context.process_line(&format!("calc edit {id} 10 4")).unwrap();
        let credential = context.credential().unwrap().clone();
        let record = context.api().browse(&credential).unwrap().remove(0);
        assert_eq!(record.result, 2.5);

        context.process_line("calc list").unwrap();
        context.process_line("calc summary").unwrap();
        context.process_line(&format!("calc delete {id}")).unwrap();
        assert!(context.api().browse(&credential).unwrap().is_empty());
    }

    #[test]
    fn division_by_zero_is_reported_and_nothing_is_stored() {
        let (_dir, mut context) = logged_in();
        let err = context.process_line("calc add / 1 0").unwrap_err();
        assert!(matches!(err, CommandError::Core(CoreError::DivisionByZero)));
        let credential = context.credential().unwrap();
        assert!(context.api().browse(credential).unwrap().is_empty());
    }

    #[test]
    fn other_owners_records_look_missing() {
        let (_dir, mut context) = logged_in();
        context.process_line("calc add add 1 2").unwrap();
        let id = only_record_id(&context);

        context.process_line("login beta").unwrap();
        for line in [
            format!("calc show {id}"),
            format!("calc edit {id} 5 5"),
            format!("calc delete {id}"),
        ] {
            let err = context.process_line(&line).unwrap_err();
            assert!(
                matches!(err, CommandError::Core(CoreError::NotFound(_))),
                "{line}: {err:?}"
            );
        }
    }

    #[test]
    fn malformed_arguments_are_usage_errors() {
        let (_dir, mut context) = logged_in();
        for line in [
            "calc",
            "calc add add 1",
            "calc add add one 2",
            "calc show not-a-uuid",
            "calc frobnicate",
        ] {
            assert!(
                matches!(
                    context.process_line(line),
                    Err(CommandError::InvalidArguments(_))
                ),
                "{line}"
            );
        }
        let err = context.process_line("calc add modulo 1 2").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Core(CoreError::InvalidOperation(_))
        ));
    }
}
