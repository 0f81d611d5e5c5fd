//! Page action implementations.
//!
//! Metadata operations map to a single endpoint call. Anything that carries
//! page content goes through [`PageWorkflow`], since Docmost only accepts
//! content through its import endpoint.

use clap::ArgMatches;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

use crate::{
    actions::{paged, record_id, Context, CANCELLED_MESSAGE},
    commands::params::{
        PARAMETER_COVER_PHOTO, PARAMETER_EXPORT_FORMAT, PARAMETER_HISTORY_ID_ARG, PARAMETER_ICON,
        PARAMETER_OUTPUT, PARAMETER_PAGE_ID_ARG, PARAMETER_PARENT_ID, PARAMETER_POSITION,
        PARAMETER_SPACE_ID, PARAMETER_SPACE_ID_ARG, PARAMETER_TITLE,
    },
    endpoints,
    error::CliError,
    param_utils::{optional_string, page_content, required_string, space_id_or_default},
    payload::Payload,
    position::{generate_position, is_valid_position},
    workflow::{ContentUpdate, ExportFormat, NewPage, PageWorkflow, UpdateOutcome},
};

pub const CONTENT_REPLACEMENT_WARNING: &str =
    "Replacing page content deletes the page and re-imports it; the page will get a new ID";

fn page_payload(matches: &ArgMatches) -> Result<(String, Payload), CliError> {
    let page_id = required_string(matches, PARAMETER_PAGE_ID_ARG)?;
    let payload = Payload::new().with("pageId", page_id.as_str());
    Ok((page_id, payload))
}

fn required_space(ctx: &Context, matches: &ArgMatches) -> Result<String, CliError> {
    space_id_or_default(matches, &ctx.configuration)
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_SPACE_ID.to_string()))
}

pub async fn create_page(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let space_id = required_space(ctx, matches)?;
    let title = required_string(matches, PARAMETER_TITLE)?;
    let parent_page_id = optional_string(matches, PARAMETER_PARENT_ID);
    let icon = optional_string(matches, PARAMETER_ICON);

    let page = match page_content(matches) {
        Some(content) => {
            let client = ctx.client()?;
            let new_page = NewPage {
                space_id,
                title: title.clone(),
                parent_page_id,
                content,
            };
            let page = PageWorkflow::new(&client)
                .create_with_content(&new_page)
                .await?;
            match icon {
                Some(icon) => {
                    let id = record_id(&page, "").to_string();
                    let payload = Payload::new().with("pageId", id).with("icon", icon);
                    client.call(&endpoints::PAGES_UPDATE, &payload).await?
                }
                None => page,
            }
        }
        None => {
            let payload = Payload::new()
                .with("spaceId", space_id)
                .with("title", title.as_str())
                .with_opt("parentPageId", parent_page_id)
                .with_opt("icon", icon);
            ctx.call(&endpoints::PAGES_CREATE, payload).await?
        }
    };

    ctx.report(
        &format!("Created page '{}' ({})", title, record_id(&page, "unknown id")),
        &page,
    )
}

pub async fn page_info(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (_, payload) = page_payload(matches)?;
    ctx.show(&endpoints::PAGES_INFO, payload).await?;
    Ok(())
}

pub async fn update_page(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (page_id, payload) = page_payload(matches)?;
    let title = optional_string(matches, PARAMETER_TITLE);
    let icon = optional_string(matches, PARAMETER_ICON);
    let cover_photo = optional_string(matches, PARAMETER_COVER_PHOTO);

    if let Some(content) = page_content(matches) {
        return replace_content(
            ctx,
            matches,
            ContentUpdate {
                page_id,
                content,
                title,
                icon,
                cover_photo,
            },
        )
        .await;
    }

    if title.is_none() && icon.is_none() && cover_photo.is_none() {
        return Err(CliError::InvalidArgument(
            "Nothing to update: give --title, --icon, --cover-photo, --content or --file"
                .to_string(),
        ));
    }

    let payload = payload
        .with_opt("title", title)
        .with_opt("icon", icon)
        .with_opt("coverPhoto", cover_photo);
    let page = ctx.call(&endpoints::PAGES_UPDATE, payload).await?;
    ctx.report(&format!("Updated page {}", page_id), &page)
}

async fn replace_content(
    ctx: &Context,
    matches: &ArgMatches,
    update: ContentUpdate,
) -> Result<(), CliError> {
    ctx.renderer.warning(CONTENT_REPLACEMENT_WARNING);

    let client = ctx.client()?;
    let outcome = PageWorkflow::new(&client)
        .update_with_content(&update, ctx.confirmer_for(matches))
        .await?;

    match outcome {
        UpdateOutcome::Cancelled => {
            ctx.renderer.message(CANCELLED_MESSAGE)?;
            Ok(())
        }
        UpdateOutcome::Replaced { previous_id, page } => ctx.report(
            &format!(
                "Replaced content of page {}; new page ID is {}",
                previous_id,
                record_id(&page, "unknown")
            ),
            &page,
        ),
    }
}

pub async fn delete_page(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (page_id, payload) = page_payload(matches)?;
    if !ctx.confirm(matches, &format!("Delete page '{}'?", page_id))? {
        return Ok(());
    }

    let result = ctx.call(&endpoints::PAGES_DELETE, payload).await?;
    ctx.report(&format!("Deleted page {}", page_id), &result)
}

pub async fn move_page(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (page_id, payload) = page_payload(matches)?;

    // an empty parent moves the page to the space root
    let parent = optional_string(matches, PARAMETER_PARENT_ID)
        .filter(|parent| !parent.trim().is_empty())
        .map(Value::String)
        .unwrap_or(Value::Null);

    let position = match optional_string(matches, PARAMETER_POSITION) {
        Some(position) if is_valid_position(&position) => position,
        Some(position) => {
            return Err(CliError::InvalidArgument(format!(
                "Invalid position '{}': expected 5 to 12 base-62 characters",
                position
            )))
        }
        None => generate_position(0),
    };
    debug!("Moving page {} to position {}", page_id, position);

    let payload = payload
        .with("parentPageId", parent)
        .with("position", position);
    let result = ctx.call(&endpoints::PAGES_MOVE, payload).await?;
    ctx.report(&format!("Moved page {}", page_id), &result)
}

pub async fn page_tree(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let space_id = required_string(matches, PARAMETER_SPACE_ID_ARG)?;
    ctx.list(
        &endpoints::PAGES_TREE,
        Payload::new().with("spaceId", space_id),
    )
    .await
}

pub async fn recent_pages(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let payload = Payload::new().with_opt("spaceId", space_id_or_default(matches, &ctx.configuration));
    ctx.list(&endpoints::PAGES_RECENT, paged(payload, matches))
        .await
}

pub async fn export_page(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let page_id = required_string(matches, PARAMETER_PAGE_ID_ARG)?;
    let format = optional_string(matches, PARAMETER_EXPORT_FORMAT)
        .map(|name| name.parse::<ExportFormat>())
        .transpose()
        .map_err(CliError::InvalidArgument)?
        .unwrap_or_default();

    let client = ctx.client()?;
    let document = PageWorkflow::new(&client).export(&page_id, format).await?;

    match matches.get_one::<PathBuf>(PARAMETER_OUTPUT) {
        Some(path) => {
            std::fs::write(path, document.as_bytes())?;
            ctx.renderer.success(&format!(
                "Exported page {} as {} to {}",
                page_id,
                format.name(),
                path.display()
            ))?;
        }
        None => ctx.renderer.text(&document)?,
    }
    Ok(())
}

pub async fn page_history(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (_, payload) = page_payload(matches)?;
    ctx.list(&endpoints::PAGES_HISTORY, paged(payload, matches))
        .await
}

pub async fn history_entry(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let history_id = required_string(matches, PARAMETER_HISTORY_ID_ARG)?;
    ctx.show(
        &endpoints::PAGES_HISTORY_INFO,
        Payload::new().with("historyId", history_id),
    )
    .await?;
    Ok(())
}

pub async fn breadcrumbs(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let (_, payload) = page_payload(matches)?;
    ctx.list(&endpoints::PAGES_BREADCRUMBS, payload).await
}
