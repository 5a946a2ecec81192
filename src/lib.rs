//! ibmctl - Manage IBM Cloud App Configuration and CIS firewall access rules
//!
//! A CLI and client library for two IBM Cloud admin APIs.
//!
//! # Features
//!
//! - Environments, collections, features, properties, segments and git configs
//!   through one set of generic operations
//! - Offset pager over App Configuration list endpoints
//! - CIS zone access rules with parallel page fetching
//! - IAM API key authentication with token caching
//! - Multiple output formats (table, CSV, JSON, YAML)
//!
//! # Example
//!
//! ```bash
//! # Store the instance to work with
//! ibmctl config set-context prod --region us-south --guid <GUID>
//!
//! # List feature flags of an environment
//! ibmctl get features --env dev
//!
//! # Turn a flag on
//! ibmctl toggle dark-mode --env dev --on
//!
//! # Block a country in a CIS zone
//! ibmctl rule create --mode block --target country --value XX --crn <CRN> --zone <ZONE>
//! ```

pub mod access_rules;
pub mod app_config;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod service;
pub mod ui;

pub use access_rules::{AccessRule, ZoneFirewallClient};
pub use app_config::{AppConfigClient, AppConfigResource, ListOptions, Pager, Scope};
pub use cli::{Cli, Command, OutputFormat};
pub use context::{Context, ContextStore};
pub use error::{IbmError, Result};
pub use service::{ApiKeyResolver, Authenticator, ServiceClient};
