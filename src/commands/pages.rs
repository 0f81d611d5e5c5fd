//! Page command definitions.

use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

use crate::{
    actions::{pages, Context},
    commands::params::{
        content_parameter, file_parameter, id_argument, limit_parameter, page_parameter,
        parent_id_parameter, space_id_parameter, yes_parameter, COMMAND_BREADCRUMBS,
        COMMAND_CREATE, COMMAND_DELETE, COMMAND_EXPORT, COMMAND_HISTORY, COMMAND_HISTORY_INFO,
        COMMAND_INFO, COMMAND_MOVE, COMMAND_PAGES, COMMAND_RECENT, COMMAND_TREE, COMMAND_UPDATE,
        DEFAULT_SHORT_LIST_LIMIT, PARAMETER_COVER_PHOTO, PARAMETER_EXPORT_FORMAT,
        PARAMETER_HISTORY_ID_ARG, PARAMETER_ICON, PARAMETER_OUTPUT, PARAMETER_PAGE_ID_ARG,
        PARAMETER_POSITION, PARAMETER_SPACE_ID_ARG, PARAMETER_TITLE,
    },
    error::CliError,
    workflow::ExportFormat,
};

fn page_id() -> Arg {
    id_argument(PARAMETER_PAGE_ID_ARG, "Page ID")
}

fn title_parameter(required: bool) -> Arg {
    Arg::new(PARAMETER_TITLE)
        .short('t')
        .long(PARAMETER_TITLE)
        .num_args(1)
        .required(required)
        .help("Page title")
}

fn icon_parameter() -> Arg {
    Arg::new(PARAMETER_ICON)
        .short('i')
        .long(PARAMETER_ICON)
        .num_args(1)
        .help("Page icon (usually an emoji)")
}

/// Define the pages command and its subcommands
pub fn pages_command() -> Command {
    Command::new(COMMAND_PAGES)
        .about("Manage pages")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a page, optionally with markdown content")
                .arg(space_id_parameter())
                .arg(title_parameter(true))
                .arg(content_parameter())
                .arg(file_parameter())
                .arg(parent_id_parameter("Parent page ID"))
                .arg(icon_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_INFO)
                .about("Show a page")
                .arg(page_id()),
        )
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about("Update page metadata, or replace its content (the page gets a new ID)")
                .arg(page_id())
                .arg(title_parameter(false))
                .arg(content_parameter())
                .arg(file_parameter())
                .arg(icon_parameter())
                .arg(
                    Arg::new(PARAMETER_COVER_PHOTO)
                        .long(PARAMETER_COVER_PHOTO)
                        .num_args(1)
                        .help("Cover photo URL"),
                )
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a page")
                .arg(page_id())
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_MOVE)
                .about("Move a page under another parent")
                .arg(page_id())
                .arg(parent_id_parameter("New parent page ID (empty for the space root)"))
                .arg(
                    Arg::new(PARAMETER_POSITION)
                        .long(PARAMETER_POSITION)
                        .num_args(1)
                        .help("Sort key among siblings (generated when omitted)"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_TREE)
                .about("Show the page tree of a space")
                .arg(id_argument(PARAMETER_SPACE_ID_ARG, "Space ID")),
        )
        .subcommand(
            Command::new(COMMAND_RECENT)
                .about("List recently updated pages")
                .arg(space_id_parameter())
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_SHORT_LIST_LIMIT)),
        )
        .subcommand(
            Command::new(COMMAND_EXPORT)
                .about("Export a page as markdown or HTML")
                .arg(page_id())
                .arg(
                    Arg::new(PARAMETER_EXPORT_FORMAT)
                        .short('f')
                        .long("format")
                        .num_args(1)
                        .default_value(ExportFormat::default().name())
                        .value_parser(ExportFormat::NAMES)
                        .help("Export format"),
                )
                .arg(
                    Arg::new(PARAMETER_OUTPUT)
                        .short('o')
                        .long(PARAMETER_OUTPUT)
                        .num_args(1)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Write the export to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_HISTORY)
                .about("List the history of a page")
                .arg(page_id())
                .arg(page_parameter())
                .arg(limit_parameter(DEFAULT_SHORT_LIST_LIMIT)),
        )
        .subcommand(
            Command::new(COMMAND_HISTORY_INFO)
                .about("Show one history entry")
                .arg(id_argument(PARAMETER_HISTORY_ID_ARG, "History entry ID")),
        )
        .subcommand(
            Command::new(COMMAND_BREADCRUMBS)
                .about("Show the ancestors of a page")
                .arg(page_id()),
        )
}

/// Execute page subcommands
pub async fn execute_pages_command(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        Some((COMMAND_CREATE, sub_matches)) => pages::create_page(ctx, sub_matches).await,
        Some((COMMAND_INFO, sub_matches)) => pages::page_info(ctx, sub_matches).await,
        Some((COMMAND_UPDATE, sub_matches)) => pages::update_page(ctx, sub_matches).await,
        Some((COMMAND_DELETE, sub_matches)) => pages::delete_page(ctx, sub_matches).await,
        Some((COMMAND_MOVE, sub_matches)) => pages::move_page(ctx, sub_matches).await,
        Some((COMMAND_TREE, sub_matches)) => pages::page_tree(ctx, sub_matches).await,
        Some((COMMAND_RECENT, sub_matches)) => pages::recent_pages(ctx, sub_matches).await,
        Some((COMMAND_EXPORT, sub_matches)) => pages::export_page(ctx, sub_matches).await,
        Some((COMMAND_HISTORY, sub_matches)) => pages::page_history(ctx, sub_matches).await,
        Some((COMMAND_HISTORY_INFO, sub_matches)) => {
            pages::history_entry(ctx, sub_matches).await
        }
        Some((COMMAND_BREADCRUMBS, sub_matches)) => pages::breadcrumbs(ctx, sub_matches).await,
        _ => Err(crate::commands::unsupported(matches)),
    }
}
