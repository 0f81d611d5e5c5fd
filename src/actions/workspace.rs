//! Workspace action implementations.

use clap::ArgMatches;

use crate::{
    actions::{paged, Context},
    commands::params::{
        PARAMETER_DESCRIPTION, PARAMETER_EMAILS, PARAMETER_INVITATION_ID_ARG, PARAMETER_LOGO,
        PARAMETER_NAME, PARAMETER_QUERY, PARAMETER_ROLE,
    },
    endpoints,
    error::CliError,
    param_utils::{optional_string, required_string, string_list},
    payload::Payload,
};

pub async fn workspace_info(ctx: &Context) -> Result<(), CliError> {
    ctx.show(&endpoints::WORKSPACE_INFO, Payload::new()).await?;
    Ok(())
}

pub async fn update_workspace(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let payload = Payload::new()
        .with_opt("name", optional_string(matches, PARAMETER_NAME))
        .with_opt("description", optional_string(matches, PARAMETER_DESCRIPTION))
        .with_opt("logo", optional_string(matches, PARAMETER_LOGO));
    if payload.is_empty() {
        return Err(CliError::InvalidArgument(
            "Nothing to update: give --name, --description or --logo".to_string(),
        ));
    }

    let workspace = ctx.call(&endpoints::WORKSPACE_UPDATE, payload).await?;
    ctx.report("Updated workspace", &workspace)
}

pub async fn list_members(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let payload = Payload::new().with_opt("query", optional_string(matches, PARAMETER_QUERY));
    ctx.list(&endpoints::WORKSPACE_MEMBERS, paged(payload, matches))
        .await
}

pub async fn list_invitations(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    ctx.list(
        &endpoints::WORKSPACE_INVITATIONS_LIST,
        paged(Payload::new(), matches),
    )
    .await
}

pub async fn create_invitations(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let emails = string_list(matches, PARAMETER_EMAILS);
    if emails.is_empty() {
        return Err(CliError::MissingRequiredArgument(PARAMETER_EMAILS.to_string()));
    }
    let count = emails.len();
    let payload = Payload::new()
        .with("emails", emails)
        .with("role", required_string(matches, PARAMETER_ROLE)?);

    let result = ctx
        .call(&endpoints::WORKSPACE_INVITATIONS_CREATE, payload)
        .await?;
    ctx.report(&format!("Sent {} invitation(s)", count), &result)
}

pub async fn revoke_invitation(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let invitation_id = required_string(matches, PARAMETER_INVITATION_ID_ARG)?;
    let result = ctx
        .call(
            &endpoints::WORKSPACE_INVITATIONS_REVOKE,
            Payload::new().with("invitationId", invitation_id.as_str()),
        )
        .await?;
    ctx.report(&format!("Revoked invitation {}", invitation_id), &result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{context, leaf};
    use crate::format::OutputFormat;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_invites_create_sends_email_list() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/workspace/invitations/create")
                    .json_body_includes(
                        r#"{"emails": ["a@example.com", "b@example.com"], "role": "member"}"#,
                    );
                then.status(200).json_body(json!({"success": true}));
            })
            .await;

        let test = context(&server.base_url(), OutputFormat::Table, true);
        let matches = leaf(&[
            "workspace",
            "invites",
            "create",
            "-e",
            "a@example.com, b@example.com",
            "-r",
            "member",
        ]);
        create_invitations(&test.context, &matches).await.unwrap();

        mock.assert_async().await;
        assert!(test.out.contents().contains("Sent 2 invitation(s)"));
    }

    #[tokio::test]
    async fn test_members_passes_query() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/workspace/members")
                    .body_includes("query=jane")
                    .body_includes("page=2");
                then.status(200).json_body(json!({"items": [], "meta": {}}));
            })
            .await;

        let test = context(&server.base_url(), OutputFormat::Table, true);
        let matches = leaf(&["workspace", "members", "-q", "jane", "--page", "2"]);
        list_members(&test.context, &matches).await.unwrap();

        mock.assert_async().await;
        assert!(test.out.contents().contains("No results"));
    }

    #[tokio::test]
    async fn test_update_requires_a_field() {
        let test = context("http://unused", OutputFormat::Table, true);
        let error = update_workspace(&test.context, &leaf(&["workspace", "update"]))
            .await
            .unwrap_err();
        assert_eq!(error.exit_code().code(), 2);
    }
}
