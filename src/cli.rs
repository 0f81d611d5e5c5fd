//! Command dispatch.
//!
//! Routes the parsed command line to the resource handlers.

use clap::ArgMatches;
use tracing::debug;

use crate::{
    actions::{self, Context},
    commands::{
        comments::execute_comments_command,
        groups::execute_groups_command,
        pages::execute_pages_command,
        params::{
            COMMAND_COMMENTS, COMMAND_GROUPS, COMMAND_LOGIN, COMMAND_LOGOUT, COMMAND_PAGES,
            COMMAND_SEARCH, COMMAND_SPACES, COMMAND_SUGGEST, COMMAND_USERS, COMMAND_WORKSPACE,
        },
        spaces::execute_spaces_command,
        unsupported,
        users::execute_users_command,
        workspace::execute_workspace_command,
    },
    error::CliError,
};

/// Builds the context from the top-level options and runs the subcommand.
pub async fn execute_command(matches: &ArgMatches) -> Result<(), CliError> {
    let ctx = Context::from_matches(matches)?;
    dispatch(&ctx, matches).await
}

pub async fn dispatch(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    if let Some(name) = matches.subcommand_name() {
        debug!("Executing command '{}'", name);
    }

    match matches.subcommand() {
        Some((COMMAND_LOGIN, sub_matches)) => actions::auth::login(ctx, sub_matches).await,
        Some((COMMAND_LOGOUT, _)) => actions::auth::logout(ctx),
        Some((COMMAND_SPACES, sub_matches)) => execute_spaces_command(ctx, sub_matches).await,
        Some((COMMAND_PAGES, sub_matches)) => execute_pages_command(ctx, sub_matches).await,
        Some((COMMAND_USERS, sub_matches)) => execute_users_command(ctx, sub_matches).await,
        Some((COMMAND_WORKSPACE, sub_matches)) => {
            execute_workspace_command(ctx, sub_matches).await
        }
        Some((COMMAND_GROUPS, sub_matches)) => execute_groups_command(ctx, sub_matches).await,
        Some((COMMAND_COMMENTS, sub_matches)) => {
            execute_comments_command(ctx, sub_matches).await
        }
        Some((COMMAND_SEARCH, sub_matches)) => actions::search::search(ctx, sub_matches).await,
        Some((COMMAND_SUGGEST, sub_matches)) => actions::search::suggest(ctx, sub_matches).await,
        _ => Err(unsupported(matches)),
    }
}
