//! User action implementations.

use clap::ArgMatches;

use crate::{
    actions::Context,
    commands::params::{PARAMETER_EMAIL, PARAMETER_NAME, PARAMETER_ROLE, PARAMETER_USER_ID_ARG},
    endpoints,
    error::CliError,
    param_utils::{optional_string, required_string},
    payload::Payload,
};

pub async fn current_user(ctx: &Context) -> Result<(), CliError> {
    ctx.show(&endpoints::USERS_ME, Payload::new()).await?;
    Ok(())
}

pub async fn update_user(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let user_id = required_string(matches, PARAMETER_USER_ID_ARG)?;
    let name = optional_string(matches, PARAMETER_NAME);
    let email = optional_string(matches, PARAMETER_EMAIL);
    let role = optional_string(matches, PARAMETER_ROLE);
    if name.is_none() && email.is_none() && role.is_none() {
        return Err(CliError::InvalidArgument(
            "Nothing to update: give --name, --email or --role".to_string(),
        ));
    }

    let payload = Payload::new()
        .with("userId", user_id.as_str())
        .with_opt("name", name)
        .with_opt("email", email)
        .with_opt("role", role);
    let user = ctx.call(&endpoints::USERS_UPDATE, payload).await?;
    ctx.report(&format!("Updated user {}", user_id), &user)
}
