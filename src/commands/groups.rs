//! Group command definitions.

use clap::{Arg, ArgMatches, Command};

use crate::{
    actions::{groups, Context},
    commands::params::{
        description_parameter, id_argument, limit_parameter, name_parameter, page_parameter,
        query_parameter, user_id_parameter, user_ids_parameter, yes_parameter, COMMAND_CREATE,
        COMMAND_DELETE, COMMAND_GROUPS, COMMAND_INFO, COMMAND_LIST, COMMAND_MEMBERS,
        COMMAND_MEMBERS_ADD, COMMAND_MEMBERS_REMOVE, COMMAND_UPDATE, DEFAULT_LIST_LIMIT,
        PARAMETER_GROUP_ID_ARG,
    },
    error::CliError,
};

fn group_id() -> Arg {
    id_argument(PARAMETER_GROUP_ID_ARG, "Group ID")
}

/// Define the groups command and its subcommands
pub fn groups_command() -> Command {
    Command::new(COMMAND_GROUPS)
        .about("Manage groups")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List groups")
                .alias("ls")
                .arg(query_parameter())
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_LIST_LIMIT)),
        )
        .subcommand(
            Command::new(COMMAND_INFO)
                .about("Show a group")
                .arg(group_id()),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a group")
                .arg(name_parameter(true))
                .arg(description_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about("Update a group")
                .arg(group_id())
                .arg(name_parameter(false))
                .arg(description_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a group")
                .arg(group_id())
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_MEMBERS)
                .about("List group members")
                .arg(group_id())
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_LIST_LIMIT)),
        )
        .subcommand(
            Command::new(COMMAND_MEMBERS_ADD)
                .about("Add users to a group")
                .arg(group_id())
                .arg(user_ids_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_MEMBERS_REMOVE)
                .about("Remove a user from a group")
                .arg(group_id())
                .arg(user_id_parameter().required(true)),
        )
}

/// Execute group subcommands
pub async fn execute_groups_command(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_LIST, sub_matches)) => groups::list_groups(ctx, sub_matches).await,
        Some((COMMAND_INFO, sub_matches)) => groups::group_info(ctx, sub_matches).await,
        Some((COMMAND_CREATE, sub_matches)) => groups::create_group(ctx, sub_matches).await,
        Some((COMMAND_UPDATE, sub_matches)) => groups::update_group(ctx, sub_matches).await,
        Some((COMMAND_DELETE, sub_matches)) => groups::delete_group(ctx, sub_matches).await,
        Some((COMMAND_MEMBERS, sub_matches)) => groups::list_members(ctx, sub_matches).await,
        Some((COMMAND_MEMBERS_ADD, sub_matches)) => groups::add_members(ctx, sub_matches).await,
        Some((COMMAND_MEMBERS_REMOVE, sub_matches)) => {
            groups::remove_member(ctx, sub_matches).await
        }
        _ => Err(crate::commands::unsupported(matches)),
    }
}
