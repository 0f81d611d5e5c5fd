//! Shared command parameters for all CLI commands.
//!
//! This module defines the command and parameter names used across the
//! resource modules, plus constructors for the arguments several commands
//! share.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction};
use std::path::PathBuf;

// Top-level commands
pub const COMMAND_LOGIN: &str = "login";
pub const COMMAND_LOGOUT: &str = "logout";
pub const COMMAND_SPACES: &str = "spaces";
pub const COMMAND_PAGES: &str = "pages";
pub const COMMAND_USERS: &str = "users";
pub const COMMAND_WORKSPACE: &str = "workspace";
pub const COMMAND_GROUPS: &str = "groups";
pub const COMMAND_COMMENTS: &str = "comments";
pub const COMMAND_SEARCH: &str = "search";
pub const COMMAND_SUGGEST: &str = "suggest";

// CRUD operations
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_INFO: &str = "info";
pub const COMMAND_CREATE: &str = "create";
pub const COMMAND_UPDATE: &str = "update";
pub const COMMAND_DELETE: &str = "delete";

// Membership
pub const COMMAND_MEMBERS: &str = "members";
pub const COMMAND_MEMBERS_ADD: &str = "members-add";
pub const COMMAND_MEMBERS_REMOVE: &str = "members-remove";
pub const COMMAND_MEMBERS_CHANGE_ROLE: &str = "members-change-role";

// Pages
pub const COMMAND_MOVE: &str = "move";
pub const COMMAND_TREE: &str = "tree";
pub const COMMAND_RECENT: &str = "recent";
pub const COMMAND_EXPORT: &str = "export";
pub const COMMAND_HISTORY: &str = "history";
pub const COMMAND_HISTORY_INFO: &str = "history-info";
pub const COMMAND_BREADCRUMBS: &str = "breadcrumbs";

// Users, workspace, comments
pub const COMMAND_ME: &str = "me";
pub const COMMAND_INVITES: &str = "invites";
pub const COMMAND_REVOKE: &str = "revoke";
pub const COMMAND_RESOLVE: &str = "resolve";

// Top-level parameters
pub const PARAMETER_URL: &str = "url";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_CONFIG: &str = "config";
pub const PARAMETER_VERBOSE: &str = "verbose";

// Positional identifiers
pub const PARAMETER_SPACE_ID_ARG: &str = "space_id";
pub const PARAMETER_PAGE_ID_ARG: &str = "page_id";
pub const PARAMETER_USER_ID_ARG: &str = "user_id";
pub const PARAMETER_GROUP_ID_ARG: &str = "group_id";
pub const PARAMETER_COMMENT_ID_ARG: &str = "comment_id";
pub const PARAMETER_HISTORY_ID_ARG: &str = "history_id";
pub const PARAMETER_INVITATION_ID_ARG: &str = "invitation_id";
pub const PARAMETER_QUERY_ARG: &str = "query_text";

// Options
pub const PARAMETER_EMAIL: &str = "email";
pub const PARAMETER_EMAILS: &str = "emails";
pub const PARAMETER_PASSWORD: &str = "password";
pub const PARAMETER_PAGE: &str = "page";
pub const PARAMETER_LIMIT: &str = "limit";
pub const PARAMETER_QUERY: &str = "query";
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_SLUG: &str = "slug";
pub const PARAMETER_DESCRIPTION: &str = "description";
pub const PARAMETER_ICON: &str = "icon";
pub const PARAMETER_LOGO: &str = "logo";
pub const PARAMETER_TITLE: &str = "title";
pub const PARAMETER_CONTENT: &str = "content";
pub const PARAMETER_FILE: &str = "file";
pub const PARAMETER_COVER_PHOTO: &str = "cover-photo";
pub const PARAMETER_SPACE_ID: &str = "space-id";
pub const PARAMETER_PARENT_ID: &str = "parent-id";
pub const PARAMETER_POSITION: &str = "position";
pub const PARAMETER_USER_ID: &str = "user-id";
pub const PARAMETER_USER_IDS: &str = "user-ids";
pub const PARAMETER_GROUP_ID: &str = "group-id";
pub const PARAMETER_ROLE: &str = "role";
pub const PARAMETER_SELECTION: &str = "selection";
pub const PARAMETER_UNRESOLVED: &str = "unresolved";
pub const PARAMETER_INCLUDE_USERS: &str = "include-users";
pub const PARAMETER_INCLUDE_GROUPS: &str = "include-groups";
pub const PARAMETER_EXPORT_FORMAT: &str = "export-format";
pub const PARAMETER_OUTPUT: &str = "output";
pub const PARAMETER_YES: &str = "yes";

pub const DEFAULT_PAGE: &str = "1";
pub const DEFAULT_LIST_LIMIT: &str = "50";
pub const DEFAULT_SHORT_LIST_LIMIT: &str = "20";

/// Create the API URL parameter.
pub fn url_parameter() -> Arg {
    Arg::new(PARAMETER_URL)
        .short('u')
        .long(PARAMETER_URL)
        .num_args(1)
        .env(crate::configuration::URL_ENV)
        .help("Docmost API URL (e.g., https://docs.example.com/api)")
}

/// Create the output format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .value_parser(OutputFormat::names())
        .help("Output format (defaults to the configured format, then table)")
}

/// Create the configuration file parameter.
pub fn config_parameter() -> Arg {
    Arg::new(PARAMETER_CONFIG)
        .short('c')
        .long(PARAMETER_CONFIG)
        .num_args(1)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Path to the configuration file")
}

/// Create the verbose parameter.
pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output for debugging")
}

/// Create a required positional identifier.
pub fn id_argument(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .required(true)
        .num_args(1)
        .value_parser(clap::value_parser!(String))
        .help(help)
}

/// Create the page number parameter.
pub fn page_parameter() -> Arg {
    Arg::new(PARAMETER_PAGE)
        .long(PARAMETER_PAGE)
        .num_args(1)
        .default_value(DEFAULT_PAGE)
        .value_parser(clap::value_parser!(u32).range(1..))
        .help("Page number")
}

/// Create the page size parameter.
pub fn limit_parameter(default: &'static str) -> Arg {
    Arg::new(PARAMETER_LIMIT)
        .long(PARAMETER_LIMIT)
        .short('l')
        .num_args(1)
        .default_value(default)
        .value_parser(clap::value_parser!(u32).range(1..))
        .help("Items per page")
}

/// Create the name parameter.
pub fn name_parameter(required: bool) -> Arg {
    Arg::new(PARAMETER_NAME)
        .short('n')
        .long(PARAMETER_NAME)
        .num_args(1)
        .required(required)
        .help("Name")
}

/// Create the description parameter.
pub fn description_parameter() -> Arg {
    Arg::new(PARAMETER_DESCRIPTION)
        .short('d')
        .long(PARAMETER_DESCRIPTION)
        .num_args(1)
        .help("Description")
}

/// Create the search query filter parameter.
pub fn query_parameter() -> Arg {
    Arg::new(PARAMETER_QUERY)
        .short('q')
        .long(PARAMETER_QUERY)
        .num_args(1)
        .help("Filter by name or email")
}

/// Create the optional space ID parameter; falls back to the default space.
pub fn space_id_parameter() -> Arg {
    Arg::new(PARAMETER_SPACE_ID)
        .short('s')
        .long(PARAMETER_SPACE_ID)
        .num_args(1)
        .help("Space ID (defaults to the configured default space)")
}

/// Create the single user ID parameter.
pub fn user_id_parameter() -> Arg {
    Arg::new(PARAMETER_USER_ID)
        .short('u')
        .long(PARAMETER_USER_ID)
        .num_args(1)
        .help("User ID")
}

/// Create the user ID list parameter (repeatable or comma-separated).
pub fn user_ids_parameter() -> Arg {
    Arg::new(PARAMETER_USER_IDS)
        .short('u')
        .long(PARAMETER_USER_IDS)
        .num_args(1..)
        .value_delimiter(',')
        .action(ArgAction::Append)
        .required(true)
        .help("User IDs to add (comma-separated or repeated)")
}

/// Create the role parameter.
pub fn role_parameter(required: bool) -> Arg {
    Arg::new(PARAMETER_ROLE)
        .short('r')
        .long(PARAMETER_ROLE)
        .num_args(1)
        .required(required)
        .help("Role")
}

/// Create the skip-confirmation parameter.
pub fn yes_parameter() -> Arg {
    Arg::new(PARAMETER_YES)
        .short('y')
        .long(PARAMETER_YES)
        .visible_alias("force")
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

/// Create the inline page content parameter.
pub fn content_parameter() -> Arg {
    Arg::new(PARAMETER_CONTENT)
        .short('c')
        .long(PARAMETER_CONTENT)
        .num_args(1)
        .conflicts_with(PARAMETER_FILE)
        .help("Page content as markdown")
}

/// Create the page content file parameter.
pub fn file_parameter() -> Arg {
    Arg::new(PARAMETER_FILE)
        .long(PARAMETER_FILE)
        .num_args(1)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Markdown file with the page content")
}

/// Create the parent page ID parameter.
pub fn parent_id_parameter(help: &'static str) -> Arg {
    Arg::new(PARAMETER_PARENT_ID)
        .short('p')
        .long(PARAMETER_PARENT_ID)
        .num_args(1)
        .help(help)
}
