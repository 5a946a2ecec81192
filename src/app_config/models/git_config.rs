//! Git configuration data models

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::common::{CollectionRef, EnvironmentRef};
use crate::app_config::resource::AppConfigResource;
use crate::error::{IbmError, Result};
use crate::service::{Resource, Validate};

/// Link between a collection/environment pair and a file in a git repository
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GitConfig {
    pub git_config_name: String,
    pub git_config_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl GitConfig {
    pub fn collection_id(&self) -> &str {
        self.collection
            .as_ref()
            .map(|c| c.collection_id.as_str())
            .unwrap_or("")
    }

    pub fn environment_id(&self) -> &str {
        self.environment
            .as_ref()
            .map(|e| e.environment_id.as_str())
            .unwrap_or("")
    }
}

impl Resource for GitConfig {
    fn id(&self) -> &str {
        &self.git_config_id
    }

    fn name(&self) -> &str {
        &self.git_config_name
    }
}

/// Create/update body for a git config
///
/// Every field is optional so the same type serves PATCH updates.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct GitConfigPrototype {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_config_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_config_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_token: Option<String>,
}

impl Validate for GitConfigPrototype {
    fn validate(&self) -> Result<()> {
        let Some(git_url) = self.git_url.as_deref() else {
            return Ok(());
        };
        match Url::parse(git_url) {
            Ok(url) if url.scheme() == "https" && url.host_str().is_some() => Ok(()),
            _ => Err(IbmError::Validation(format!(
                "git_url must be an https:// URL with a host, got '{}'",
                git_url
            ))),
        }
    }
}

impl AppConfigResource for GitConfig {
    type Prototype = GitConfigPrototype;
    const KIND: &'static str = "git config";
    const COLLECTION: &'static str = "gitconfigs";
    const LIST_KEY: &'static str = "gitconfigs";
    const UPDATE_WITH_PATCH: bool = true;
}

/// Result of promoting a configuration to git
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GitSyncResult {
    pub git_commit_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_commit_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_time: Option<String>,
}
