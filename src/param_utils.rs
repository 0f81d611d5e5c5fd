use clap::ArgMatches;
use std::path::PathBuf;

use crate::{
    commands::params::{
        PARAMETER_CONTENT, PARAMETER_FILE, PARAMETER_LIMIT, PARAMETER_PAGE, PARAMETER_SPACE_ID,
    },
    configuration::Configuration,
    error::CliError,
    workflow::PageContent,
};

/// Value of a required string argument.
///
/// Clap enforces required arguments, so a miss here means the command
/// definition and the handler disagree.
pub fn required_string(matches: &ArgMatches, id: &str) -> Result<String, CliError> {
    matches
        .get_one::<String>(id)
        .cloned()
        .ok_or_else(|| CliError::MissingRequiredArgument(id.to_string()))
}

pub fn optional_string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

/// Values of a repeatable or comma-separated argument.
pub fn string_list(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| {
            values
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// `(page, limit)` from the pagination arguments.
pub fn pagination(matches: &ArgMatches) -> (u32, u32) {
    let page = matches.get_one::<u32>(PARAMETER_PAGE).copied().unwrap_or(1);
    let limit = matches.get_one::<u32>(PARAMETER_LIMIT).copied().unwrap_or(50);
    (page, limit)
}

/// Space ID from `--space-id`, else the configured default space.
pub fn space_id_or_default(matches: &ArgMatches, configuration: &Configuration) -> Option<String> {
    optional_string(matches, PARAMETER_SPACE_ID)
        .or_else(|| configuration.default_space().map(str::to_owned))
}

/// Page content from `--content` or `--file`, if either was given.
pub fn page_content(matches: &ArgMatches) -> Option<PageContent> {
    if let Some(content) = matches.get_one::<String>(PARAMETER_CONTENT) {
        return Some(PageContent::Inline(content.clone()));
    }
    matches
        .get_one::<PathBuf>(PARAMETER_FILE)
        .map(|path| PageContent::File(path.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::params::{
        content_parameter, file_parameter, limit_parameter, page_parameter, space_id_parameter,
        user_ids_parameter, DEFAULT_SHORT_LIST_LIMIT, PARAMETER_USER_IDS,
    };
    use clap::Command;

    fn command() -> Command {
        Command::new("test")
            .arg(page_parameter())
            .arg(limit_parameter(DEFAULT_SHORT_LIST_LIMIT))
            .arg(space_id_parameter())
            .arg(content_parameter())
            .arg(file_parameter())
            .arg(user_ids_parameter().required(false))
    }

    #[test]
    fn test_pagination_defaults() {
        let matches = command().get_matches_from(["test"]);
        assert_eq!(pagination(&matches), (1, 20));

        let matches = command().get_matches_from(["test", "--page", "3", "--limit", "5"]);
        assert_eq!(pagination(&matches), (3, 5));
    }

    #[test]
    fn test_space_id_falls_back_to_default() {
        let mut configuration = Configuration::default();
        configuration.set_default_space(Some("default-space".to_string()));

        let matches = command().get_matches_from(["test"]);
        assert_eq!(
            space_id_or_default(&matches, &configuration),
            Some("default-space".to_string())
        );

        let matches = command().get_matches_from(["test", "--space-id", "explicit"]);
        assert_eq!(
            space_id_or_default(&matches, &configuration),
            Some("explicit".to_string())
        );
    }

    #[test]
    fn test_user_ids_accept_commas_and_repeats() {
        let matches = command().get_matches_from(["test", "-u", "a,b", "-u", "c"]);
        assert_eq!(string_list(&matches, PARAMETER_USER_IDS), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_content_and_file_conflict() {
        let result = command().try_get_matches_from(["test", "--content", "x", "--file", "page.md"]);
        assert!(result.is_err());

        let matches = command().get_matches_from(["test", "--file", "page.md"]);
        assert_eq!(
            page_content(&matches),
            Some(PageContent::File(PathBuf::from("page.md")))
        );
    }
}
