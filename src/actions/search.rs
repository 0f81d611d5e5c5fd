//! Search action implementations.
//!
//! Both search endpoints take JSON bodies.

use clap::ArgMatches;

use crate::{
    actions::{paged, Context},
    commands::params::{PARAMETER_INCLUDE_GROUPS, PARAMETER_INCLUDE_USERS, PARAMETER_QUERY_ARG},
    endpoints,
    error::CliError,
    param_utils::{required_string, space_id_or_default},
    payload::Payload,
};

pub async fn search(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let payload = Payload::new()
        .with("query", required_string(matches, PARAMETER_QUERY_ARG)?)
        .with_opt("spaceId", space_id_or_default(matches, &ctx.configuration));
    ctx.list(&endpoints::SEARCH, paged(payload, matches)).await
}

pub async fn suggest(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let mut payload =
        Payload::new().with("query", required_string(matches, PARAMETER_QUERY_ARG)?);
    if matches.get_flag(PARAMETER_INCLUDE_USERS) {
        payload.insert("includeUsers", true);
    }
    if matches.get_flag(PARAMETER_INCLUDE_GROUPS) {
        payload.insert("includeGroups", true);
    }
    ctx.list(&endpoints::SEARCH_SUGGEST, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{context, leaf};
    use crate::format::OutputFormat;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_sends_json_with_numbers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/search")
                    .header("content-type", "application/json")
                    .json_body_includes(r#"{"query": "deploy", "page": 1, "limit": 20}"#);
                then.status(200).json_body(json!([
                    {"id": "p1", "title": "Deploy guide", "spaceId": "s1", "highlight": "how to <b>deploy</b>"}
                ]));
            })
            .await;

        let test = context(&server.base_url(), OutputFormat::Table, true);
        search(&test.context, &leaf(&["search", "deploy"]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(test.out.contents().contains("Deploy guide"));
    }

    #[tokio::test]
    async fn test_suggest_flags() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/search/suggest")
                    .json_body_includes(r#"{"query": "ja", "includeUsers": true}"#);
                then.status(200).json_body(json!({"users": [], "groups": [], "pages": []}));
            })
            .await;

        let test = context(&server.base_url(), OutputFormat::Json, true);
        suggest(&test.context, &leaf(&["suggest", "ja", "--include-users"]))
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
