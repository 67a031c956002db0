use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "login",
            "Start a session with an access token",
            "login <token>",
            cmd_login,
        ),
        CommandEntry::new("logout", "End the current session", "logout", cmd_logout),
        CommandEntry::new(
            "whoami",
            "Show the owner of the current session",
            "whoami",
            cmd_whoami,
        ),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let token = match args {
        [token] => *token,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: login <token>".into(),
            ))
        }
    };
    let owner = context.login(token)?;
    io::print_success(format!("Logged in as owner {}.", owner));
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.logout() {
        Some(owner) => io::print_success(format!("Logged out owner {}.", owner)),
        None => io::print_info("No active session."),
    }
    Ok(())
}

fn cmd_whoami(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session().ok_or(CommandError::NotLoggedIn)?;
    io::print_info(format!("Owner {}", session.owner));
    Ok(())
}
