//! Authentication command definitions.
//!
//! This module defines the `login` and `logout` commands.

use crate::commands::params::{
    COMMAND_LOGIN, COMMAND_LOGOUT, PARAMETER_EMAIL, PARAMETER_PASSWORD, PARAMETER_URL,
};
use clap::{Arg, Command};

/// Create the login command.
pub fn login_command() -> Command {
    Command::new(COMMAND_LOGIN)
        .about("Log in with email and password and store the access token")
        .arg(
            Arg::new(PARAMETER_URL)
                .short('u')
                .long(PARAMETER_URL)
                .num_args(1)
                .help("Docmost URL; /api is appended when missing (prompted if omitted)"),
        )
        .arg(
            Arg::new(PARAMETER_EMAIL)
                .short('e')
                .long(PARAMETER_EMAIL)
                .num_args(1)
                .help("Account email (prompted if omitted)"),
        )
        .arg(
            Arg::new(PARAMETER_PASSWORD)
                .short('p')
                .long(PARAMETER_PASSWORD)
                .num_args(1)
                .help("Account password (prompted without echo if omitted)"),
        )
}

/// Create the logout command.
pub fn logout_command() -> Command {
    Command::new(COMMAND_LOGOUT).about("Remove the stored access token")
}
