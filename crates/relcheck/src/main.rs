mod error;
mod logging;
mod settings;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use relcheck_core::{SystemClock, TOKEN_OPTION_KEY};
use relcheck_host::{
    ACTIVATED_AT_OPTION_KEY, InfoArgs, PLUGIN_INFORMATION_ACTION, PluginMeta, PluginUpdater,
    UpdateTransient,
};
use relcheck_platform::{AppPaths, FileStore, KeyValueStore};
use serde_json::json;

use crate::error::AppError;
use crate::settings::{AppSettings, TOKEN_ENV_VAR};

/// Checks GitHub for new releases of the plugin
#[derive(Parser)]
#[cfg_attr(debug_assertions, derive(Debug))]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
#[cfg_attr(debug_assertions, derive(Debug))]
enum Command {
    /// Checks whether a newer release is available
    Check {
        /// Version to compare against (defaults to the installed one)
        #[arg(long)]
        current: Option<String>,

        /// Print the update-manager transient as JSON
        #[arg(long)]
        json: bool,
    },
    /// Prints the release details shown in the info modal
    Info,
    /// Manages the stored GitHub token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Forgets the cached release and the last check time
    Reset,
    /// Removes all state kept for the plugin except the token
    Uninstall,
}

#[derive(Subcommand)]
#[cfg_attr(debug_assertions, derive(Debug))]
enum TokenAction {
    /// Stores a token used for authenticated requests
    Set { token: String },
    /// Removes the stored token
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("Command failed: {error}");
            eprintln!("relcheck: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let paths = AppPaths::new()?;
    paths.ensure_dirs().map_err(AppError::CreateDirs)?;

    let settings = AppSettings::load(&paths.settings_file());
    logging::init_logging(
        &paths.log_file(),
        settings.debug_logging,
        settings.max_log_size_bytes,
    );
    log::debug!("Loaded settings: {settings:?}");

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(paths.state_file()));
    let env_token = std::env::var(TOKEN_ENV_VAR).ok();

    execute(
        cli.command,
        &settings,
        store,
        env_token,
        &mut io::stdout().lock(),
    )
    .await
}

async fn execute(
    command: Command,
    settings: &AppSettings,
    store: Arc<dyn KeyValueStore>,
    env_token: Option<String>,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match command {
        Command::Token { action } => return update_token(action, store.as_ref(), out),
        Command::Check { current, json } => {
            let updater = build_updater(settings, store, env_token, current)?;
            check(&updater, json, out).await?;
        }
        Command::Info => {
            let updater = build_updater(settings, store, env_token, None)?;
            info(&updater, out).await?;
        }
        Command::Reset => {
            let updater = build_updater(settings, store, env_token, None)?;
            updater.deactivate()?;
            writeln!(out, "Cleared cached release and last check time").map_err(AppError::Output)?;
        }
        Command::Uninstall => {
            let updater = build_updater(settings, store, env_token, None)?;
            updater.uninstall()?;
            writeln!(out, "Removed stored plugin state").map_err(AppError::Output)?;
        }
    }
    Ok(())
}

fn build_updater(
    settings: &AppSettings,
    store: Arc<dyn KeyValueStore>,
    env_token: Option<String>,
    current: Option<String>,
) -> Result<PluginUpdater, AppError> {
    let mut meta = PluginMeta::default();
    if let Some(version) = current
        .or_else(|| settings.current_version.clone())
        .filter(|version| !version.trim().is_empty())
    {
        meta.version = version;
    }

    let updater = PluginUpdater::from_store(
        meta,
        settings.updater_config(),
        store.clone(),
        Arc::new(SystemClock),
        settings.static_token(env_token),
    )?;

    // Recording activation also rewrites a state file that no longer parses.
    let activated = match store.get(ACTIVATED_AT_OPTION_KEY) {
        Ok(value) => value.is_some(),
        Err(error) => {
            log::warn!("Cannot read activation state, recording it again: {error}");
            false
        }
    };
    if !activated {
        updater.activate()?;
    }
    Ok(updater)
}

async fn check(
    updater: &PluginUpdater,
    as_json: bool,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let meta = updater.meta();
    let mut transient = UpdateTransient::default();
    transient
        .checked
        .insert(meta.plugin_file.clone(), meta.version.clone());

    let transient = updater.filter_update_transient(transient).await;

    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&transient)?).map_err(AppError::Output)?;
        return Ok(());
    }

    let written = match transient.response.get(&meta.plugin_file) {
        Some(update) => writeln!(
            out,
            "Update available: {} -> {}\n{}",
            meta.version, update.new_version, update.package
        ),
        None => writeln!(out, "{} is up to date", meta.version),
    };
    written.map_err(AppError::Output)
}

async fn info(updater: &PluginUpdater, out: &mut dyn Write) -> Result<(), AppError> {
    let args = InfoArgs {
        slug: updater.meta().slug().to_string(),
    };

    let written = match updater
        .plugin_information(PLUGIN_INFORMATION_ACTION, &args)
        .await
    {
        Some(info) => writeln!(out, "{}", serde_json::to_string_pretty(&info)?),
        None => writeln!(out, "No release information available"),
    };
    written.map_err(AppError::Output)
}

fn update_token(
    action: TokenAction,
    store: &dyn KeyValueStore,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    match action {
        TokenAction::Set { token } => {
            let token = token.trim();
            if token.is_empty() {
                return Err(AppError::EmptyToken);
            }
            store.set(TOKEN_OPTION_KEY, json!(token))?;
            writeln!(out, "Stored GitHub token").map_err(AppError::Output)
        }
        TokenAction::Clear => {
            store.delete(TOKEN_OPTION_KEY)?;
            writeln!(out, "Removed GitHub token").map_err(AppError::Output)
        }
    }
}
