//! Space command definitions.

use clap::{Arg, ArgGroup, ArgMatches, Command};

use crate::{
    actions::{spaces, Context},
    commands::params::{
        description_parameter, id_argument, limit_parameter, name_parameter, page_parameter,
        role_parameter, user_id_parameter, user_ids_parameter, yes_parameter, COMMAND_CREATE,
        COMMAND_DELETE, COMMAND_INFO, COMMAND_LIST, COMMAND_MEMBERS, COMMAND_MEMBERS_ADD,
        COMMAND_MEMBERS_CHANGE_ROLE, COMMAND_MEMBERS_REMOVE, COMMAND_SPACES, COMMAND_UPDATE,
        DEFAULT_LIST_LIMIT, PARAMETER_GROUP_ID, PARAMETER_ICON, PARAMETER_SLUG,
        PARAMETER_SPACE_ID_ARG, PARAMETER_USER_ID,
    },
    error::CliError,
};

fn space_id() -> Arg {
    id_argument(PARAMETER_SPACE_ID_ARG, "Space ID")
}

/// Define the spaces command and its subcommands
pub fn spaces_command() -> Command {
    Command::new(COMMAND_SPACES)
        .about("Manage spaces")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List spaces")
                .alias("ls")
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_LIST_LIMIT)),
        )
        .subcommand(
            Command::new(COMMAND_INFO)
                .about("Show a space")
                .arg(space_id()),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a space")
                .arg(name_parameter(true))
                .arg(
                    Arg::new(PARAMETER_SLUG)
                        .short('s')
                        .long(PARAMETER_SLUG)
                        .num_args(1)
                        .required(true)
                        .help("URL slug"),
                )
                .arg(description_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about("Update a space")
                .arg(space_id())
                .arg(name_parameter(false))
                .arg(description_parameter())
                .arg(
                    Arg::new(PARAMETER_ICON)
                        .long(PARAMETER_ICON)
                        .num_args(1)
                        .help("Space icon"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a space")
                .arg(space_id())
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_MEMBERS)
                .about("List space members")
                .arg(space_id())
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_LIST_LIMIT)),
        )
        .subcommand(
            Command::new(COMMAND_MEMBERS_ADD)
                .about("Add users to a space")
                .arg(space_id())
                .arg(user_ids_parameter())
                .arg(role_parameter(false).default_value("member")),
        )
        .subcommand(
            Command::new(COMMAND_MEMBERS_REMOVE)
                .about("Remove a user from a space")
                .arg(space_id())
                .arg(user_id_parameter().required(true)),
        )
        .subcommand(
            Command::new(COMMAND_MEMBERS_CHANGE_ROLE)
                .about("Change the role of a space member")
                .arg(space_id())
                .arg(user_id_parameter())
                .arg(
                    Arg::new(PARAMETER_GROUP_ID)
                        .short('g')
                        .long(PARAMETER_GROUP_ID)
                        .num_args(1)
                        .help("Group ID"),
                )
                .arg(role_parameter(true))
                .group(
                    ArgGroup::new("member")
                        .args([PARAMETER_USER_ID, PARAMETER_GROUP_ID])
                        .multiple(false)
                        .required(true),
                ),
        )
}

/// Execute space subcommands
pub async fn execute_spaces_command(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_LIST, sub_matches)) => spaces::list_spaces(ctx, sub_matches).await,
        Some((COMMAND_INFO, sub_matches)) => spaces::space_info(ctx, sub_matches).await,
        Some((COMMAND_CREATE, sub_matches)) => spaces::create_space(ctx, sub_matches).await,
        Some((COMMAND_UPDATE, sub_matches)) => spaces::update_space(ctx, sub_matches).await,
        Some((COMMAND_DELETE, sub_matches)) => spaces::delete_space(ctx, sub_matches).await,
        Some((COMMAND_MEMBERS, sub_matches)) => spaces::list_members(ctx, sub_matches).await,
        Some((COMMAND_MEMBERS_ADD, sub_matches)) => spaces::add_members(ctx, sub_matches).await,
        Some((COMMAND_MEMBERS_REMOVE, sub_matches)) => {
            spaces::remove_member(ctx, sub_matches).await
        }
        Some((COMMAND_MEMBERS_CHANGE_ROLE, sub_matches)) => {
            spaces::change_member_role(ctx, sub_matches).await
        }
        _ => Err(crate::commands::unsupported(matches)),
    }
}
