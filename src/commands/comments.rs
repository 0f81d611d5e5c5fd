//! Comment command definitions.

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::{
    actions::{comments, Context},
    commands::params::{
        id_argument, limit_parameter, page_parameter, parent_id_parameter, yes_parameter,
        COMMAND_COMMENTS, COMMAND_CREATE, COMMAND_DELETE, COMMAND_LIST, COMMAND_RESOLVE,
        COMMAND_UPDATE, DEFAULT_LIST_LIMIT, PARAMETER_COMMENT_ID_ARG, PARAMETER_CONTENT,
        PARAMETER_PAGE_ID_ARG, PARAMETER_SELECTION, PARAMETER_UNRESOLVED,
    },
    error::CliError,
};

fn comment_id() -> Arg {
    id_argument(PARAMETER_COMMENT_ID_ARG, "Comment ID")
}

fn comment_content() -> Arg {
    Arg::new(PARAMETER_CONTENT)
        .short('c')
        .long(PARAMETER_CONTENT)
        .num_args(1)
        .required(true)
        .help("Comment text")
}

/// Define the comments command and its subcommands
pub fn comments_command() -> Command {
    Command::new(COMMAND_COMMENTS)
        .about("Manage page comments")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List the comments of a page")
                .arg(id_argument(PARAMETER_PAGE_ID_ARG, "Page ID"))
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_LIST_LIMIT)),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Comment on a page")
                .arg(id_argument(PARAMETER_PAGE_ID_ARG, "Page ID"))
                .arg(comment_content())
                .arg(
                    Arg::new(PARAMETER_SELECTION)
                        .short('s')
                        .long(PARAMETER_SELECTION)
                        .num_args(1)
                        .help("Text the comment refers to"),
                )
                .arg(parent_id_parameter("Parent comment ID, for replies")),
        )
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about("Edit a comment")
                .arg(comment_id())
                .arg(comment_content()),
        )
        .subcommand(
            Command::new(COMMAND_RESOLVE)
                .about("Mark a comment resolved")
                .arg(comment_id())
                .arg(
                    Arg::new(PARAMETER_UNRESOLVED)
                        .long(PARAMETER_UNRESOLVED)
                        .action(ArgAction::SetTrue)
                        .help("Reopen the comment instead"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a comment")
                .arg(comment_id())
                .arg(yes_parameter()),
        )
}

/// Execute comment subcommands
pub async fn execute_comments_command(
    ctx: &Context,
    matches: &ArgMatches,
) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_LIST, sub_matches)) => comments::list_comments(ctx, sub_matches).await,
        Some((COMMAND_CREATE, sub_matches)) => comments::create_comment(ctx, sub_matches).await,
        Some((COMMAND_UPDATE, sub_matches)) => comments::update_comment(ctx, sub_matches).await,
        Some((COMMAND_RESOLVE, sub_matches)) => comments::resolve_comment(ctx, sub_matches).await,
        Some((COMMAND_DELETE, sub_matches)) => comments::delete_comment(ctx, sub_matches).await,
        _ => Err(crate::commands::unsupported(matches)),
    }
}
