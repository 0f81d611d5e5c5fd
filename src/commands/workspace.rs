//! Workspace command definitions.

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::{
    actions::{workspace, Context},
    commands::params::{
        description_parameter, id_argument, limit_parameter, name_parameter, page_parameter,
        query_parameter, role_parameter, COMMAND_CREATE, COMMAND_INFO, COMMAND_INVITES,
        COMMAND_LIST, COMMAND_MEMBERS, COMMAND_REVOKE, COMMAND_UPDATE, COMMAND_WORKSPACE,
        DEFAULT_LIST_LIMIT, PARAMETER_EMAILS, PARAMETER_INVITATION_ID_ARG, PARAMETER_LOGO,
    },
    error::CliError,
};

fn invites_command() -> Command {
    Command::new(COMMAND_INVITES)
        .about("Manage workspace invitations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List pending invitations")
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_LIST_LIMIT)),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Invite users by email")
                .arg(
                    Arg::new(PARAMETER_EMAILS)
                        .short('e')
                        .long(PARAMETER_EMAILS)
                        .num_args(1..)
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Email addresses (comma-separated or repeated)"),
                )
                .arg(role_parameter(true)),
        )
        .subcommand(
            Command::new(COMMAND_REVOKE)
                .about("Revoke an invitation")
                .arg(id_argument(PARAMETER_INVITATION_ID_ARG, "Invitation ID")),
        )
}

/// Define the workspace command and its subcommands
pub fn workspace_command() -> Command {
    Command::new(COMMAND_WORKSPACE)
        .about("Manage the workspace")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(COMMAND_INFO).about("Show the workspace"))
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about("Update the workspace")
                .arg(name_parameter(false))
                .arg(description_parameter())
                .arg(
                    Arg::new(PARAMETER_LOGO)
                        .long(PARAMETER_LOGO)
                        .num_args(1)
                        .help("Logo URL"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_MEMBERS)
                .about("List workspace members")
                .arg(query_parameter())
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_LIST_LIMIT)),
        )
        .subcommand(invites_command())
}

/// Execute workspace subcommands
pub async fn execute_workspace_command(
    ctx: &Context,
    matches: &ArgMatches,
) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_INFO, _)) => workspace::workspace_info(ctx).await,
        Some((COMMAND_UPDATE, sub_matches)) => workspace::update_workspace(ctx, sub_matches).await,
        Some((COMMAND_MEMBERS, sub_matches)) => workspace::list_members(ctx, sub_matches).await,
        Some((COMMAND_INVITES, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, invite_matches)) => {
                workspace::list_invitations(ctx, invite_matches).await
            }
            Some((COMMAND_CREATE, invite_matches)) => {
                workspace::create_invitations(ctx, invite_matches).await
            }
            Some((COMMAND_REVOKE, invite_matches)) => {
                workspace::revoke_invitation(ctx, invite_matches).await
            }
            _ => Err(crate::commands::unsupported(sub_matches)),
        },
        _ => Err(crate::commands::unsupported(matches)),
    }
}
