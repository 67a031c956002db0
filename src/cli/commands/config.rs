use calcbook_config::CONFIG_KEYS;
use calcbook_domain::OwnerId;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) const SUBCOMMANDS: &[&str] = &["show", "set", "grant", "revoke"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage preferences and access tokens",
        "config [show|set <key> <value>|grant <token> <owner_id> [label]|revoke <token>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            context.update_config(|config| config.set(&key, &value))?;
            io::print_success(format!("{} set to `{}`.", key, value.trim()));
            if matches!(key.as_str(), "store" | "data_root" | "log_filter") {
                io::print_info("This setting takes effect the next time the shell starts.");
            }
            Ok(())
        }
        "grant" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(
                    "usage: config grant <token> <owner_id> [label]".into(),
                ));
            }
            let token = args[1].trim();
            if token.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "token must not be empty".into(),
                ));
            }
            let owner = args[2].parse::<u64>().map(OwnerId).map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "owner_id must be a non-negative integer, got `{}`",
                    args[2]
                ))
            })?;
            let label = (args.len() > 3).then(|| args[3..].join(" "));
            context.grant_token(token, owner, label.as_deref())?;
            io::print_success(format!("Token granted to owner {}.", owner));
            Ok(())
        }
        "revoke" => {
            let [_, token] = args else {
                return Err(CommandError::InvalidArguments(
                    "usage: config revoke <token>".into(),
                ));
            };
            if context.revoke_token(token)? {
                io::print_success("Token revoked.");
            } else {
                io::print_warning("No grant found for that token.");
            }
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`; expected one of: {}",
            SUBCOMMANDS.join(", ")
        ))),
    }
}

fn show(context: &ShellContext) {
    let config = context.config();
    output_section("Configuration");
    io::print_info(format!("  Config file      : {}", context.config_path().display()));
    io::print_info(format!("  store            : {}", config.store));
    io::print_info(format!("  data_root        : {}", context.data_root().display()));
    io::print_info(format!("  log_filter       : {}", config.log_filter));
    io::print_info(format!("  ui_color_enabled : {}", config.ui_color_enabled));
    io::print_info(format!("  plain_output     : {}", config.plain_output));
    io::print_info(format!(
        "  display_precision: {}",
        config
            .display_precision
            .map(|digits| digits.to_string())
            .unwrap_or_else(|| "auto".into())
    ));

    if config.credentials.is_empty() {
        io::print_info("  No access tokens granted.");
        return;
    }
    output_section("Access tokens");
    for grant in &config.credentials {
        io::print_info(format!(
            "  {:<12} owner {:<6} {}",
            mask_token(&grant.token),
            grant.owner_id,
            grant.label.as_deref().unwrap_or("")
        ));
    }
}

/// Keeps the first two characters and hides the rest.
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(2).collect();
    let hidden = token.chars().count().saturating_sub(2).min(8);
    format!("{visible}{}", "*".repeat(hidden))
}
