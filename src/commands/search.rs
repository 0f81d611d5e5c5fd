//! Search command definitions.

use clap::{Arg, ArgAction, Command};

use crate::commands::params::{
    id_argument, limit_parameter, page_parameter, space_id_parameter, COMMAND_SEARCH,
    COMMAND_SUGGEST, DEFAULT_SHORT_LIST_LIMIT, PARAMETER_INCLUDE_GROUPS, PARAMETER_INCLUDE_USERS,
    PARAMETER_QUERY_ARG,
};

/// Create the full-text search command.
pub fn search_command() -> Command {
    Command::new(COMMAND_SEARCH)
        .about("Search pages")
        .arg(id_argument(PARAMETER_QUERY_ARG, "Search query"))
        .arg(space_id_parameter())
        .arg(page_parameter())
        .arg(limit_parameter(DEFAULT_SHORT_LIST_LIMIT))
}

/// Create the suggestion command.
pub fn suggest_command() -> Command {
    Command::new(COMMAND_SUGGEST)
        .about("Suggest pages, users and groups matching a prefix")
        .arg(id_argument(PARAMETER_QUERY_ARG, "Search query"))
        .arg(
            Arg::new(PARAMETER_INCLUDE_USERS)
                .long(PARAMETER_INCLUDE_USERS)
                .action(ArgAction::SetTrue)
                .help("Include users"),
        )
        .arg(
            Arg::new(PARAMETER_INCLUDE_GROUPS)
                .long(PARAMETER_INCLUDE_GROUPS)
                .action(ArgAction::SetTrue)
                .help("Include groups"),
        )
}
