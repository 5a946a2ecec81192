//! IBM Cloud App Configuration administration
//!
//! Environments, collections, features, properties, segments and git
//! configs of one service instance. All resource types go through the same
//! generic operations on [`AppConfigClient`], driven by [`AppConfigResource`].

mod client;
pub mod commands;
pub mod models;
pub mod options;
pub mod page;
pub mod pager;
pub mod resource;

pub use client::AppConfigClient;
pub use options::{GetOptions, ListOptions};
pub use page::{ListPage, PageLinks};
pub use pager::{
    CollectionsPager, EnvironmentsPager, FeaturesPager, GitConfigsPager, Pager, PropertiesPager,
    SegmentsPager,
};
pub use resource::{AppConfigResource, Scope};
