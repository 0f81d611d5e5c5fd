//! User command definitions.

use clap::{Arg, ArgMatches, Command};

use crate::{
    actions::{users, Context},
    commands::params::{
        id_argument, name_parameter, role_parameter, COMMAND_ME, COMMAND_UPDATE, COMMAND_USERS,
        PARAMETER_EMAIL, PARAMETER_USER_ID_ARG,
    },
    error::CliError,
};

/// Define the users command and its subcommands
pub fn users_command() -> Command {
    Command::new(COMMAND_USERS)
        .about("Manage users")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(COMMAND_ME).about("Show the current user"))
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about("Update a user")
                .arg(id_argument(PARAMETER_USER_ID_ARG, "User ID"))
                .arg(name_parameter(false))
                .arg(
                    Arg::new(PARAMETER_EMAIL)
                        .short('e')
                        .long(PARAMETER_EMAIL)
                        .num_args(1)
                        .help("Email address"),
                )
                .arg(role_parameter(false)),
        )
}

/// Execute user subcommands
pub async fn execute_users_command(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_ME, _)) => users::current_user(ctx).await,
        Some((COMMAND_UPDATE, sub_matches)) => users::update_user(ctx, sub_matches).await,
        _ => Err(crate::commands::unsupported(matches)),
    }
}
