//! Command handlers.
//!
//! Each handler reads its arguments from the matched subcommand, issues one
//! call (or one workflow) through the [`Context`], and renders the result.

use clap::ArgMatches;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::{
    client::DocmostClient,
    commands::params::{PARAMETER_CONFIG, PARAMETER_FORMAT, PARAMETER_URL, PARAMETER_YES},
    configuration::Configuration,
    confirm::{Confirmer, InquireConfirmer, ASSUME_YES},
    credentials::TokenStore,
    endpoints::Endpoint,
    error::CliError,
    format::{OutputFormat, Renderer},
    payload::Payload,
};

pub mod auth;
pub mod comments;
pub mod groups;
pub mod pages;
pub mod search;
pub mod spaces;
pub mod users;
pub mod workspace;

pub const CANCELLED_MESSAGE: &str = "Cancelled";

/// Everything a handler needs besides its own arguments.
pub struct Context {
    /// File settings merged with environment and command-line overrides.
    pub configuration: Configuration,
    /// Where `login` persists the URL.
    pub configuration_path: PathBuf,
    pub tokens: TokenStore,
    pub renderer: Renderer,
    pub confirmer: Box<dyn Confirmer>,
}

impl Context {
    pub fn new(
        configuration: Configuration,
        configuration_path: PathBuf,
        tokens: TokenStore,
        renderer: Renderer,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        Self {
            configuration,
            configuration_path,
            tokens,
            renderer,
            confirmer,
        }
    }

    /// Builds the context from the top-level matches.
    ///
    /// Precedence for each setting is command line, then environment, then
    /// the configuration file.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, CliError> {
        let configuration_path = match matches.get_one::<PathBuf>(PARAMETER_CONFIG) {
            Some(path) => path.clone(),
            None => Configuration::get_default_configuration_file_path()?,
        };

        let mut configuration = Configuration::load_from_file(&configuration_path)?.with_environment();
        if let Some(url) = matches.get_one::<String>(PARAMETER_URL) {
            configuration.set_url(Some(url.clone()));
        }
        if let Some(format) = matches.get_one::<String>(PARAMETER_FORMAT) {
            configuration.set_default_format(Some(format.clone()));
        }

        let format = configuration
            .default_format()
            .parse::<OutputFormat>()
            .unwrap_or_else(|e| {
                warn!("{}, falling back to {}", e, OutputFormat::default());
                OutputFormat::default()
            });
        debug!("Output format: {}", format);

        let tokens = match configuration_path.parent() {
            Some(directory) if !directory.as_os_str().is_empty() => TokenStore::in_dir(directory),
            _ => TokenStore::default_location()?,
        };

        Ok(Self::new(
            configuration,
            configuration_path,
            tokens,
            Renderer::new(format),
            Box::new(InquireConfirmer),
        ))
    }

    /// API client for the resolved URL and token.
    pub fn client(&self) -> Result<DocmostClient, CliError> {
        Ok(DocmostClient::resolve(None, None, &self.configuration, &self.tokens)?)
    }

    /// Confirmer honouring the `--yes` flag of `matches`.
    pub fn confirmer_for(&self, matches: &ArgMatches) -> &dyn Confirmer {
        let assume_yes = matches
            .try_get_one::<bool>(PARAMETER_YES)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false);
        if assume_yes {
            &ASSUME_YES
        } else {
            self.confirmer.as_ref()
        }
    }

    /// Asks before a destructive call. Prints "Cancelled" when declined.
    pub fn confirm(&self, matches: &ArgMatches, prompt: &str) -> Result<bool, CliError> {
        let confirmed = self.confirmer_for(matches).confirm(prompt);
        if !confirmed {
            self.renderer.message(CANCELLED_MESSAGE)?;
        }
        Ok(confirmed)
    }

    /// Calls `endpoint` and returns the unwrapped result.
    pub async fn call(&self, endpoint: &Endpoint, payload: Payload) -> Result<Value, CliError> {
        let client = self.client()?;
        Ok(client.call(endpoint, &payload).await?)
    }

    /// Calls a listing endpoint and renders its rows.
    pub async fn list(&self, endpoint: &Endpoint, payload: Payload) -> Result<(), CliError> {
        let result = self.call(endpoint, payload).await?;
        self.renderer.output_listing(&result, endpoint)?;
        Ok(())
    }

    /// Calls `endpoint` and renders the single record it returns.
    pub async fn show(&self, endpoint: &Endpoint, payload: Payload) -> Result<Value, CliError> {
        let result = self.call(endpoint, payload).await?;
        self.renderer.output(&result, None)?;
        Ok(result)
    }

    /// Reports a completed change: the response in JSON mode, `message` otherwise.
    pub fn report(&self, message: &str, result: &Value) -> Result<(), CliError> {
        if self.renderer.format() == OutputFormat::Json {
            self.renderer.output(result, None)?;
        } else {
            self.renderer.success(message)?;
        }
        Ok(())
    }
}

/// `id` of a returned record, or `fallback` when the server omitted it.
pub(crate) fn record_id<'a>(record: &'a Value, fallback: &'a str) -> &'a str {
    record.get("id").and_then(Value::as_str).unwrap_or(fallback)
}

/// Pagination fields shared by listing endpoints.
pub(crate) fn paged(payload: Payload, matches: &ArgMatches) -> Payload {
    let (page, limit) = crate::param_utils::pagination(matches);
    payload.with("page", page).with("limit", limit)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::confirm::AssumeAnswer;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub struct TestContext {
        pub context: Context,
        pub out: SharedBuffer,
        pub err: SharedBuffer,
        pub dir: tempfile::TempDir,
    }

    /// Context against `url` with a stored token, capturing output.
    pub fn context(url: &str, format: OutputFormat, answer: bool) -> TestContext {
        let dir = tempfile::tempdir().unwrap();
        let tokens = TokenStore::in_dir(dir.path());
        tokens.save("test-token").unwrap();

        let mut configuration = Configuration::default();
        configuration.set_url(Some(url.to_string()));

        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let renderer = Renderer::with_writers(format, Box::new(out.clone()), Box::new(err.clone()));

        let context = Context::new(
            configuration,
            dir.path().join("config.yaml"),
            tokens,
            renderer,
            Box::new(AssumeAnswer(answer)),
        );
        TestContext {
            context,
            out,
            err,
            dir,
        }
    }

    /// Matches for `args` under the full command tree, minus the binary name.
    pub fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["docmost"];
        argv.extend_from_slice(args);
        crate::commands::build_cli().get_matches_from(argv)
    }

    /// Matches of the innermost subcommand named by `args`.
    pub fn leaf(args: &[&str]) -> ArgMatches {
        let mut current = matches(args);
        while let Some((_, sub)) = current.subcommand() {
            let sub = sub.clone();
            current = sub;
        }
        current
    }
}
