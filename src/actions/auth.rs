//! Login and logout.

use clap::ArgMatches;
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::{debug, info};

use crate::{
    actions::Context,
    auth::{normalize_api_url, LoginClient},
    commands::params::{PARAMETER_EMAIL, PARAMETER_PASSWORD, PARAMETER_URL},
    configuration::Configuration,
    error::CliError,
    param_utils::optional_string,
};

pub const LOGGED_OUT_MESSAGE: &str = "Logged out successfully";
pub const NOT_LOGGED_IN_MESSAGE: &str = "Not currently logged in";

/// Login URL from `--url`, then the configured URL, then a prompt.
fn login_url(ctx: &Context, matches: &ArgMatches) -> Result<String, CliError> {
    if let Some(url) = optional_string(matches, PARAMETER_URL) {
        return Ok(url);
    }
    if let Some(url) = ctx.configuration.url() {
        return Ok(url.to_string());
    }
    Ok(Text::new("Docmost URL:").prompt()?)
}

pub async fn login(ctx: &Context, matches: &ArgMatches) -> Result<(), CliError> {
    let url = login_url(ctx, matches)?;
    let api_url = normalize_api_url(&url)?;

    let email = match optional_string(matches, PARAMETER_EMAIL) {
        Some(email) => email,
        None => Text::new("Email:").prompt()?,
    };
    let password = match optional_string(matches, PARAMETER_PASSWORD) {
        Some(password) => password,
        None => Password::new("Password:")
            .with_display_mode(PasswordDisplayMode::Hidden)
            .without_confirmation()
            .prompt()?,
    };

    debug!("Logging in to {} as {}", api_url, email);
    let token = LoginClient::new(api_url.as_str())
        .login(&email, &password)
        .await?;
    login_succeeded(ctx, &api_url, &token)
}

/// Persists the token and the API URL after a successful exchange.
fn login_succeeded(ctx: &Context, api_url: &str, token: &str) -> Result<(), CliError> {
    ctx.tokens.save(token)?;

    let mut configuration = Configuration::load_from_file(&ctx.configuration_path)?;
    configuration.set_url(Some(api_url.to_string()));
    configuration.save(&ctx.configuration_path)?;
    info!("Saved API URL to {}", ctx.configuration_path.display());

    ctx.renderer.success(&format!("Logged in to {}", api_url))?;
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<(), CliError> {
    if ctx.tokens.delete()? {
        ctx.renderer.success(LOGGED_OUT_MESSAGE)?;
    } else {
        ctx.renderer.message(NOT_LOGGED_IN_MESSAGE)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{context, leaf};
    use crate::format::OutputFormat;
    use httpmock::MockServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_saves_token_and_url() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/api/auth/login")
                    .body_includes("email=jane%40example.com");
                then.status(200)
                    .header("set-cookie", "authToken=fresh-token; Path=/; HttpOnly")
                    .json_body(json!({"success": true}));
            })
            .await;

        let test = context("http://unused", OutputFormat::Table, true);
        let url = server.base_url();
        let matches = leaf(&[
            "login",
            "--url",
            url.as_str(),
            "--email",
            "jane@example.com",
            "--password",
            "secret",
        ]);

        login(&test.context, &matches).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            test.context.tokens.stored().unwrap().as_deref(),
            Some("fresh-token")
        );
        let saved = Configuration::load_from_file(&test.context.configuration_path).unwrap();
        assert_eq!(saved.url(), Some(format!("{}/api", server.base_url()).as_str()));
        assert!(test.out.contents().contains("Logged in to"));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_keeps_old_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/auth/login");
                then.status(401).json_body(json!({"message": "Unauthorized"}));
            })
            .await;

        let test = context("http://unused", OutputFormat::Table, true);
        let url = format!("{}/api/", server.base_url());
        let matches = leaf(&[
            "login",
            "-u",
            url.as_str(),
            "-e",
            "jane@example.com",
            "-p",
            "wrong",
        ]);

        let error = login(&test.context, &matches).await.unwrap_err();
        assert_eq!(error.to_string(), "Invalid email or password");
        assert_eq!(
            test.context.tokens.stored().unwrap().as_deref(),
            Some("test-token")
        );
    }

    #[test]
    fn test_logout_removes_token() {
        let test = context("http://unused", OutputFormat::Table, true);
        logout(&test.context).unwrap();
        assert!(test.out.contents().contains(LOGGED_OUT_MESSAGE));

        logout(&test.context).unwrap();
        assert!(test.out.contents().contains(NOT_LOGGED_IN_MESSAGE));
    }
}
