//! The Docmost CLI client library.
//!
//! This crate provides the core functionality for the Docmost CLI client,
//! including the HTTP request/response contract, the page import/export
//! workflow, local configuration and credentials, output rendering, and
//! command execution.
//!
//! # Modules
//!
//! - `actions`: Command handler implementations
//! - `auth`: Login exchange and token extraction
//! - `cli`: Top-level command dispatch
//! - `client`: Docmost API client and the classified error family
//! - `commands`: CLI command definitions and argument parsing
//! - `configuration`: Configuration file and environment overrides
//! - `confirm`: Interactive confirmation of destructive operations
//! - `credentials`: Bearer token storage
//! - `endpoints`: Per-endpoint encoding and listing metadata
//! - `envelope`: Response envelope unwrapping and collection extraction
//! - `format`: Output rendering as table, plain text or JSON
//! - `payload`: Request field collections
//! - `position`: Sort key generation for page moves
//! - `workflow`: Page content import, replacement and export

pub mod actions;
pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod confirm;
pub mod credentials;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod param_utils;
pub mod payload;
pub mod position;
pub mod workflow;
