//! Group action implementations.

use clap::ArgMatches;

use crate::{
    actions::{paged, record_id, Context},
    commands::params::{
        PARAMETER_DESCRIPTION, PARAMETER_GROUP_ID_ARG, PARAMETER_NAME, PARAMETER_QUERY,
        PARAMETER_USER_ID, PARAMETER_USER_IDS,
    },
    endpoints,
    error::CliError,
    param_utils::{optional_string, required_string, string_list},
    payload::Payload,
};

fn group_payload(matches: &ArgMatches) -> Result<(String, Payload), CliError> {
    let group_id = required_string(matches, PARAMETER_GROUP_ID_ARG)?;
    let payload = Payload::new().with("groupId", group_id.as_str());
    Ok((group_id, payload))
}

pub async fn list_groups(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let payload = Payload::new().with_opt("query", optional_string(matches, PARAMETER_QUERY));
    ctx.list(&endpoints::GROUPS_LIST, paged(payload, matches))
        .await
}

pub async fn group_info(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (_, payload) = group_payload(matches)?;
    ctx.show(&endpoints::GROUPS_INFO, payload).await?;
    Ok(())
}

pub async fn create_group(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let name = required_string(matches, PARAMETER_NAME)?;
    let payload = Payload::new()
        .with("name", name.as_str())
        .with_opt("description", optional_string(matches, PARAMETER_DESCRIPTION));

    let group = ctx.call(&endpoints::GROUPS_CREATE, payload).await?;
    ctx.report(
        &format!("Created group '{}' ({})", name, record_id(&group, "unknown id")),
        &group,
    )
}

pub async fn update_group(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (group_id, payload) = group_payload(matches)?;
    let payload = payload
        .with_opt("name", optional_string(matches, PARAMETER_NAME))
        .with_opt("description", optional_string(matches, PARAMETER_DESCRIPTION));

    let group = ctx.call(&endpoints::GROUPS_UPDATE, payload).await?;
    ctx.report(&format!("Updated group {}", group_id), &group)
}

pub async fn delete_group(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (group_id, payload) = group_payload(matches)?;
    if !ctx.confirm(matches, &format!("Delete group '{}'?", group_id))? {
        return Ok(());
    }

    let result = ctx.call(&endpoints::GROUPS_DELETE, payload).await?;
    ctx.report(&format!("Deleted group {}", group_id), &result)
}

pub async fn list_members(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (_, payload) = group_payload(matches)?;
    ctx.list(&endpoints::GROUPS_MEMBERS, paged(payload, matches))
        .await
}

pub async fn add_members(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (group_id, payload) = group_payload(matches)?;
    let user_ids = string_list(matches, PARAMETER_USER_IDS);
    if user_ids.is_empty() {
        return Err(CliError::MissingRequiredArgument(PARAMETER_USER_IDS.to_string()));
    }
    let count = user_ids.len();

    let result = ctx
        .call(&endpoints::GROUPS_MEMBERS_ADD, payload.with("userIds", user_ids))
        .await?;
    ctx.report(
        &format!("Added {} member(s) to group {}", count, group_id),
        &result,
    )
}

pub async fn remove_member(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (group_id, payload) = group_payload(matches)?;
    let user_id = required_string(matches, PARAMETER_USER_ID)?;

    let result = ctx
        .call(
            &endpoints::GROUPS_MEMBERS_REMOVE,
            payload.with("userId", user_id.as_str()),
        )
        .await?;
    ctx.report(
        &format!("Removed user {} from group {}", user_id, group_id),
        &result,
    )
}
