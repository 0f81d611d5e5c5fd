//! Space action implementations.

use clap::ArgMatches;

use crate::{
    actions::{paged, record_id, Context},
    commands::params::{
        PARAMETER_DESCRIPTION, PARAMETER_GROUP_ID, PARAMETER_ICON, PARAMETER_NAME,
        PARAMETER_ROLE, PARAMETER_SLUG, PARAMETER_SPACE_ID_ARG, PARAMETER_USER_ID,
        PARAMETER_USER_IDS,
    },
    endpoints,
    error::CliError,
    param_utils::{optional_string, required_string, string_list},
    payload::Payload,
};

fn space_payload(matches: &ArgMatches) -> Result<(String, Payload), CliError> {
    let space_id = required_string(matches, PARAMETER_SPACE_ID_ARG)?;
    let payload = Payload::new().with("spaceId", space_id.as_str());
    Ok((space_id, payload))
}

pub async fn list_spaces(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    ctx.list(&endpoints::SPACES_LIST, paged(Payload::new(), matches))
        .await
}

pub async fn space_info(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (_, payload) = space_payload(matches)?;
    ctx.show(&endpoints::SPACES_INFO, payload).await?;
    Ok(())
}

pub async fn create_space(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let name = required_string(matches, PARAMETER_NAME)?;
    let payload = Payload::new()
        .with("name", name.as_str())
        .with("slug", required_string(matches, PARAMETER_SLUG)?)
        .with_opt("description", optional_string(matches, PARAMETER_DESCRIPTION));

    let space = ctx.call(&endpoints::SPACES_CREATE, payload).await?;
    ctx.report(
        &format!("Created space '{}' ({})", name, record_id(&space, "unknown id")),
        &space,
    )
}

pub async fn update_space(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (space_id, payload) = space_payload(matches)?;
    let payload = payload
        .with_opt("name", optional_string(matches, PARAMETER_NAME))
        .with_opt("description", optional_string(matches, PARAMETER_DESCRIPTION))
        .with_opt("icon", optional_string(matches, PARAMETER_ICON));

    let space = ctx.call(&endpoints::SPACES_UPDATE, payload).await?;
    ctx.report(&format!("Updated space {}", space_id), &space)
}

pub async fn delete_space(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (space_id, payload) = space_payload(matches)?;
    let prompt = format!("Delete space '{}' and all of its pages?", space_id);
    if !ctx.confirm(matches, &prompt)? {
        return Ok(());
    }

    let result = ctx.call(&endpoints::SPACES_DELETE, payload).await?;
    ctx.report(&format!("Deleted space {}", space_id), &result)
}

pub async fn list_members(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (_, payload) = space_payload(matches)?;
    ctx.list(&endpoints::SPACES_MEMBERS, paged(payload, matches))
        .await
}

pub async fn add_members(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (space_id, payload) = space_payload(matches)?;
    let user_ids = string_list(matches, PARAMETER_USER_IDS);
    if user_ids.is_empty() {
        return Err(CliError::MissingRequiredArgument(PARAMETER_USER_IDS.to_string()));
    }
    let count = user_ids.len();
    let payload = payload
        .with("userIds", user_ids)
        .with("role", required_string(matches, PARAMETER_ROLE)?);

    let result = ctx.call(&endpoints::SPACES_MEMBERS_ADD, payload).await?;
    ctx.report(
        &format!("Added {} member(s) to space {}", count, space_id),
        &result,
    )
}

pub async fn remove_member(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (space_id, payload) = space_payload(matches)?;
    let user_id = required_string(matches, PARAMETER_USER_ID)?;
    let payload = payload.with("userId", user_id.as_str());

    let result = ctx.call(&endpoints::SPACES_MEMBERS_REMOVE, payload).await?;
    ctx.report(
        &format!("Removed user {} from space {}", user_id, space_id),
        &result,
    )
}

pub async fn change_member_role(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (space_id, payload) = space_payload(matches)?;
    let role = required_string(matches, PARAMETER_ROLE)?;
    let user_id = optional_string(matches, PARAMETER_USER_ID);
    let group_id = optional_string(matches, PARAMETER_GROUP_ID);
    if user_id.is_none() && group_id.is_none() {
        return Err(CliError::InvalidArgument(
            "Either --user-id or --group-id is required".to_string(),
        ));
    }

    let payload = payload
        .with("role", role.as_str())
        .with_opt("userId", user_id)
        .with_opt("groupId", group_id);
    let result = ctx
        .call(&endpoints::SPACES_MEMBERS_CHANGE_ROLE, payload)
        .await?;
    ctx.report(
        &format!("Changed member role to {} in space {}", role, space_id),
        &result,
    )
}
