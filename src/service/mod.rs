//! Base service layer shared by the product clients
//!
//! Holds the HTTP plumbing every IBM Cloud API call goes through:
//! authentication, default headers, retries and error mapping.

pub mod auth;
mod client;
mod credentials;
pub mod query;
pub mod traits;

pub use auth::{Authenticator, IamAuthenticator};
pub use client::{RetryPolicy, ServiceClient};
pub use credentials::ApiKeyResolver;
pub use traits::{PaginatedResponse, Resource, Validate};
