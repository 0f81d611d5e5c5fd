//! Comment action implementations.

use clap::ArgMatches;

use crate::{
    actions::{paged, record_id, Context},
    commands::params::{
        PARAMETER_COMMENT_ID_ARG, PARAMETER_CONTENT, PARAMETER_PAGE_ID_ARG, PARAMETER_PARENT_ID,
        PARAMETER_SELECTION, PARAMETER_UNRESOLVED,
    },
    endpoints,
    error::CliError,
    param_utils::{optional_string, required_string},
    payload::Payload,
};

fn comment_payload(matches: &ArgMatches) -> Result<(String, Payload), CliError> {
    let comment_id = required_string(matches, PARAMETER_COMMENT_ID_ARG)?;
    let payload = Payload::new().with("commentId", comment_id.as_str());
    Ok((comment_id, payload))
}

pub async fn list_comments(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let page_id = required_string(matches, PARAMETER_PAGE_ID_ARG)?;
    ctx.list(
        &endpoints::COMMENTS_LIST,
        paged(Payload::new().with("pageId", page_id), matches),
    )
    .await
}

pub async fn create_comment(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let page_id = required_string(matches, PARAMETER_PAGE_ID_ARG)?;
    let payload = Payload::new()
        .with("pageId", page_id.as_str())
        .with("content", required_string(matches, PARAMETER_CONTENT)?)
        .with_opt("selection", optional_string(matches, PARAMETER_SELECTION))
        .with_opt("parentCommentId", optional_string(matches, PARAMETER_PARENT_ID));

    let comment = ctx.call(&endpoints::COMMENTS_CREATE, payload).await?;
    ctx.report(
        &format!(
            "Added comment {} to page {}",
            record_id(&comment, "(no id)"),
            page_id
        ),
        &comment,
    )
}

pub async fn update_comment(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (comment_id, payload) = comment_payload(matches)?;
    let payload = payload.with("content", required_string(matches, PARAMETER_CONTENT)?);

    let comment = ctx.call(&endpoints::COMMENTS_UPDATE, payload).await?;
    ctx.report(&format!("Updated comment {}", comment_id), &comment)
}

pub async fn resolve_comment(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (comment_id, payload) = comment_payload(matches)?;
    let resolved = !matches.get_flag(PARAMETER_UNRESOLVED);

    let comment = ctx
        .call(&endpoints::COMMENTS_RESOLVE, payload.with("resolved", resolved))
        .await?;
    let message = if resolved {
        format!("Resolved comment {}", comment_id)
    } else {
        format!("Reopened comment {}", comment_id)
    };
    ctx.report(&message, &comment)
}

pub async fn delete_comment(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (comment_id, payload) = comment_payload(matches)?;
    if !ctx.confirm(matches, &format!("Delete comment '{}'?", comment_id))? {
        return Ok(());
    }

    let result = ctx.call(&endpoints::COMMENTS_DELETE, payload).await?;
    ctx.report(&format!("Deleted comment {}", comment_id), &result)
}
