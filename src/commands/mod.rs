//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap
//! crate. Each resource lives in its own file with a `<resource>_command()`
//! definition and an `execute_<resource>_command()` dispatcher.

use clap::{ArgMatches, Command};

pub mod auth;
pub mod comments;
pub mod groups;
pub mod pages;
pub mod params;
pub mod search;
pub mod spaces;
pub mod users;
pub mod workspace;

use params::{config_parameter, format_parameter, url_parameter, verbose_parameter};

/// Name of the installed binary.
pub const BINARY_NAME: &str = "docmost";

/// Build the full command tree.
///
/// `--url`, `--format` and `--config` belong to the top-level command and go
/// before the subcommand; `--verbose` is accepted anywhere.
pub fn build_cli() -> Command {
    Command::new(BINARY_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(url_parameter())
        .arg(format_parameter())
        .arg(config_parameter())
        .arg(verbose_parameter())
        .subcommand(auth::login_command())
        .subcommand(auth::logout_command())
        .subcommand(spaces::spaces_command())
        .subcommand(pages::pages_command())
        .subcommand(users::users_command())
        .subcommand(workspace::workspace_command())
        .subcommand(groups::groups_command())
        .subcommand(comments::comments_command())
        .subcommand(search::search_command())
        .subcommand(search::suggest_command())
}

/// Parse the process arguments.
///
/// Exits with the usage code on invalid arguments.
pub fn create_cli_commands() -> ArgMatches {
    build_cli().get_matches()
}

/// Error for a subcommand the dispatcher does not know.
pub(crate) fn unsupported(matches: &ArgMatches) -> crate::error::CliError {
    crate::error::CliError::UnsupportedSubcommand(
        matches
            .subcommand()
            .map(|(name, _)| name.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    )
}
