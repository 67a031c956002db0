use std::{io, sync::Arc};

use calcbook_config::{Config, ConfigError, ConfigManager, StoreBackend};
use calcbook_core::{
    CalculationApi, CalculationService, CoreError, InMemoryRecordStore, RecordStore,
    TokenIdentityProvider,
};
use calcbook_domain::{Credential, OwnerId};
use calcbook_storage_json::JsonRecordStore;
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::info;

use crate::cli::commands;
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::shell::parse_command_line;

/// Calculation API as wired by the shell: any record store behind a box.
pub type ShellApi = CalculationApi<Box<dyn RecordStore>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// The logged-in credential and the owner it resolved to at login time.
#[derive(Debug, Clone)]
pub struct Session {
    pub credential: Credential,
    pub owner: OwnerId,
}

/// Mutable state shared by every command handler.
pub struct ShellContext {
    mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) theme: ColorfulTheme,
    api: ShellApi,
    identity: Arc<TokenIdentityProvider>,
    config_manager: ConfigManager,
    config: Config,
    session: Option<Session>,
    pub(crate) running: bool,
    pub(crate) last_command: Option<String>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        crate::init_with_filter(&config.log_filter);
        apply_output_preferences(&config);

        let identity = Arc::new(
            TokenIdentityProvider::with_grants(
                config
                    .credentials
                    .iter()
                    .map(|grant| (grant.token.clone(), OwnerId(grant.owner_id))),
            )
            .with_revoked(config.revoked.iter().cloned()),
        );
        let store = open_store(&config, &config_manager)?;
        let api = CalculationApi::new(CalculationService::new(store), identity.clone());
        info!(store = %config.store, grants = config.credentials.len(), "shell context ready");

        Ok(ShellContext {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            api,
            identity,
            config_manager,
            config,
            session: None,
            running: true,
            last_command: None,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn api(&self) -> &ShellApi {
        &self.api
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &std::path::Path {
        self.config_manager.config_path()
    }

    pub fn data_root(&self) -> std::path::PathBuf {
        self.config
            .resolve_data_root(self.config_manager.base_dir())
    }

    pub fn precision(&self) -> Option<u8> {
        self.config.display_precision
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Credential to pass into the API, or [`CommandError::NotLoggedIn`].
    pub fn credential(&self) -> Result<&Credential, CommandError> {
        self.session
            .as_ref()
            .map(|session| &session.credential)
            .ok_or(CommandError::NotLoggedIn)
    }

    pub fn login(&mut self, token: &str) -> Result<OwnerId, CommandError> {
        let credential = Credential::new(token);
        let owner = self.api.authenticate(&credential)?;
        self.session = Some(Session { credential, owner });
        info!(owner = %owner, "session started");
        Ok(owner)
    }

    pub fn logout(&mut self) -> Option<OwnerId> {
        let session = self.session.take()?;
        info!(owner = %session.owner, "session ended");
        Some(session.owner)
    }

    /// Applies `change` to the configuration and persists it. Nothing is
    /// saved when `change` fails.
    pub fn update_config<F>(&mut self, change: F) -> CommandResult
    where
        F: FnOnce(&mut Config) -> Result<(), ConfigError>,
    {
        let mut next = self.config.clone();
        change(&mut next)?;
        self.config_manager.save(&next)?;
        self.config = next;
        apply_output_preferences(&self.config);
        Ok(())
    }

    /// Grants `token` in both the persisted config and the live provider.
    pub fn grant_token(&mut self, token: &str, owner: OwnerId, label: Option<&str>) -> CommandResult {
        self.update_config(|config| {
            config.grant(token, owner.0, label);
            Ok(())
        })?;
        self.identity.grant(token, owner);
        Ok(())
    }

    /// Removes a grant and revokes the token; ends the session if it used it.
    pub fn revoke_token(&mut self, token: &str) -> Result<bool, CommandError> {
        let mut removed = false;
        self.update_config(|config| {
            removed = config.revoke(token);
            Ok(())
        })?;
        let credential = Credential::new(token.trim());
        let revoked = self.identity.revoke(&credential);
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.credential.token() == credential.token())
        {
            self.session = None;
        }
        Ok(removed || revoked)
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        match &self.session {
            Some(session) => format!("calcbook[{}]> ", session.owner),
            None => "calcbook> ".to_string(),
        }
    }

    /// Asks for confirmation in interactive mode; scripts always proceed.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let raw = &tokens[0];
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::NotLoggedIn => {
                self.print_error("Not logged in. Use `login <token>` first.");
                self.print_hint("Grant a token with `config grant <token> <owner_id>`.");
                Ok(())
            }
            CommandError::Core(CoreError::Authentication(err)) => {
                self.print_error(&format!("Authentication failed: {err}"));
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_info(message);
    }
}

fn open_store(
    config: &Config,
    manager: &ConfigManager,
) -> Result<Box<dyn RecordStore>, CliError> {
    Ok(match config.store {
        StoreBackend::Memory => Box::new(InMemoryRecordStore::new()),
        StoreBackend::Json => Box::new(JsonRecordStore::open(
            config.resolve_data_root(manager.base_dir()),
        )?),
    })
}

fn apply_output_preferences(config: &Config) {
    output::set_preferences(OutputPreferences {
        plain_output: config.plain_output,
        color_enabled: config.ui_color_enabled,
    });
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Not logged in. Use `login <token>` first.")]
    NotLoggedIn,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error("exit requested")]
    ExitRequested,
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Message(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn test_context(home: &std::path::Path) -> ShellContext {
    let manager = ConfigManager::with_base_dir(home.to_path_buf()).expect("config manager");
    ShellContext::with_config_manager(CliMode::Script, manager).expect("shell context")
}
