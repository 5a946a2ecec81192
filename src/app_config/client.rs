//! App Configuration API client

use log::{debug, info};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::models::{Feature, GitConfig, GitSyncResult};
use super::options::{GetOptions, ListOptions};
use super::page::ListPage;
use super::pager::Pager;
use super::resource::{AppConfigResource, Scope};
use crate::config::api;
use crate::error::{IbmError, Result};
use crate::service::query::{append_query, encode_segment};
use crate::service::{Authenticator, ServiceClient, Validate};

const COMPONENT: &str = "app_config";

/// Client for one App Configuration service instance
#[derive(Clone)]
pub struct AppConfigClient {
    service: ServiceClient,
    guid: String,
}

#[derive(Serialize)]
struct ToggleRequest {
    enabled: bool,
}

impl AppConfigClient {
    /// Client for the instance `guid` in `region` (e.g. `us-south`)
    pub fn new(region: &str, guid: &str, authenticator: Authenticator) -> Self {
        let service = ServiceClient::new(Self::service_url_for(region, guid), authenticator);
        Self::with_service(service, guid)
    }

    /// Public endpoint of an instance
    pub fn service_url_for(region: &str, guid: &str) -> String {
        format!(
            "https://{}.{}{}/{}",
            region,
            api::APP_CONFIG_HOST_SUFFIX,
            api::APP_CONFIG_BASE_PATH,
            encode_segment(guid)
        )
    }

    /// Wrap an already configured service client whose URL points at the instance
    pub fn with_service(service: ServiceClient, guid: &str) -> Self {
        Self {
            service,
            guid: guid.to_string(),
        }
    }

    pub fn service(&self) -> &ServiceClient {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut ServiceClient {
        &mut self.service
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Fetch one page of a collection
    pub async fn list_page<R: AppConfigResource>(
        &self,
        scope: &Scope,
        options: &ListOptions,
    ) -> Result<ListPage<R>> {
        self.fetch_page(scope, options, options.offset).await
    }

    pub(crate) async fn fetch_page<R: AppConfigResource>(
        &self,
        scope: &Scope,
        options: &ListOptions,
        offset: Option<u32>,
    ) -> Result<ListPage<R>> {
        let operation = format!("list {}", R::COLLECTION);
        let path = append_query(&R::collection_path(scope)?, &options.query_pairs(offset));
        let url = self.service.url(&path);
        debug!("Fetching {} at offset {}: {}", R::COLLECTION, offset.unwrap_or(0), url);

        let builder = self.service.request(Method::GET, &url, &options.headers);
        let value: Value = self
            .service
            .execute(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation.clone()))?;

        ListPage::from_value(value, R::LIST_KEY).map_err(|e| e.tagged(COMPONENT, operation))
    }

    /// Pager over a collection
    pub fn pager<R: AppConfigResource>(
        &self,
        scope: Scope,
        options: ListOptions,
    ) -> Result<Pager<'_, R>> {
        Pager::new(self, scope, options)
    }

    /// Fetch every item of a collection
    pub async fn list_all<R: AppConfigResource>(
        &self,
        scope: &Scope,
        options: &ListOptions,
    ) -> Result<Vec<R>> {
        let mut options = options.clone();
        options.offset = None;
        let items = self.pager::<R>(scope.clone(), options)?.get_all().await?;
        info!("Fetched {} {}", items.len(), R::COLLECTION);
        Ok(items)
    }

    /// Get a resource by ID
    ///
    /// Returns `None` when the API answers 404. The raw JSON is returned
    /// alongside the typed value for lossless output.
    pub async fn get<R: AppConfigResource>(
        &self,
        scope: &Scope,
        id: &str,
        options: &GetOptions,
    ) -> Result<Option<(R, Value)>> {
        let operation = format!("get {} '{}'", R::KIND, id);
        let path = append_query(&R::item_path(scope, id)?, &options.query_pairs());
        let url = self.service.url(&path);
        debug!("Fetching {}: {}", R::KIND, url);

        let builder = self.service.request(Method::GET, &url, &options.headers);
        let raw = self
            .service
            .fetch_optional(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation.clone()))?;

        match raw {
            Some(raw) => {
                let item: R = serde_json::from_value(raw.clone()).map_err(|e| {
                    IbmError::Json(format!("Failed to parse {}: {}", R::KIND, e))
                        .tagged(COMPONENT, operation)
                })?;
                Ok(Some((item, raw)))
            }
            None => Ok(None),
        }
    }

    /// Find a resource by ID, falling back to a name match over the full listing
    pub async fn resolve<R: AppConfigResource>(
        &self,
        scope: &Scope,
        id_or_name: &str,
    ) -> Result<Option<R>> {
        if let Some((item, _)) = self.get::<R>(scope, id_or_name, &GetOptions::new()).await? {
            return Ok(Some(item));
        }
        debug!("No {} with ID '{}', matching by name", R::KIND, id_or_name);
        let all = self.list_all::<R>(scope, &ListOptions::new()).await?;
        Ok(all.into_iter().find(|item| item.matches(id_or_name)))
    }

    /// Create a resource
    pub async fn create<R: AppConfigResource>(
        &self,
        scope: &Scope,
        body: &R::Prototype,
    ) -> Result<R> {
        let operation = format!("create {}", R::KIND);
        body.validate()
            .map_err(|e| e.tagged(COMPONENT, operation.clone()))?;

        let url = self.service.url(&R::collection_path(scope)?);
        debug!("Creating {}: {}", R::KIND, url);
        let builder = self.service.request(Method::POST, &url, &[]).json(body);
        self.service
            .execute(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation))
    }

    /// Update a resource (PUT, or PATCH for git configs)
    pub async fn update<R: AppConfigResource>(
        &self,
        scope: &Scope,
        id: &str,
        body: &R::Prototype,
    ) -> Result<R> {
        let operation = format!("update {} '{}'", R::KIND, id);
        body.validate()
            .map_err(|e| e.tagged(COMPONENT, operation.clone()))?;

        let method = if R::UPDATE_WITH_PATCH {
            Method::PATCH
        } else {
            Method::PUT
        };
        let url = self.service.url(&R::item_path(scope, id)?);
        debug!("Updating {} with {}: {}", R::KIND, method, url);
        let builder = self.service.request(method, &url, &[]).json(body);
        self.service
            .execute(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation))
    }

    /// Delete a resource
    pub async fn delete<R: AppConfigResource>(&self, scope: &Scope, id: &str) -> Result<()> {
        let operation = format!("delete {} '{}'", R::KIND, id);
        let url = self.service.url(&R::item_path(scope, id)?);
        debug!("Deleting {}: {}", R::KIND, url);
        let builder = self.service.request(Method::DELETE, &url, &[]);
        self.service
            .execute_empty(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation))?;
        info!("Deleted {} '{}'", R::KIND, id);
        Ok(())
    }

    /// Turn a feature flag on or off in an environment
    pub async fn toggle_feature(
        &self,
        environment_id: &str,
        feature_id: &str,
        enabled: bool,
    ) -> Result<Feature> {
        let operation = format!("toggle feature '{}'", feature_id);
        let path = format!(
            "{}/toggle",
            Feature::item_path(&Scope::environment(environment_id), feature_id)?
        );
        let url = self.service.url(&path);
        debug!("Toggling feature to {}: {}", enabled, url);
        let builder = self
            .service
            .request(Method::PUT, &url, &[])
            .json(&ToggleRequest { enabled });
        self.service
            .execute(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation))
    }

    /// Push the instance configuration to the git repository of a git config
    pub async fn promote_git_config(&self, git_config_id: &str) -> Result<GitSyncResult> {
        let operation = format!("promote git config '{}'", git_config_id);
        let path = format!("{}/promote", GitConfig::item_path(&Scope::Instance, git_config_id)?);
        let url = self.service.url(&path);
        debug!("Promoting git config: {}", url);
        let builder = self.service.request(Method::PUT, &url, &[]);
        self.service
            .execute(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation))
    }

    /// Fetch the configuration stored in git for a git config
    pub async fn restore_git_config(&self, git_config_id: &str) -> Result<Value> {
        let operation = format!("restore git config '{}'", git_config_id);
        let path = format!("{}/restore", GitConfig::item_path(&Scope::Instance, git_config_id)?);
        let url = self.service.url(&path);
        debug!("Restoring git config: {}", url);
        let builder = self.service.request(Method::GET, &url, &[]);
        self.service
            .execute(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::models::{
        ConfigValue, Environment, GitConfigPrototype, Property, Segment, ValueType,
    };
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> AppConfigClient {
        AppConfigClient::with_service(ServiceClient::test_client(&server.uri()), "guid")
    }

    fn feature_json(enabled: bool) -> serde_json::Value {
        serde_json::json!({
            "name": "Dark Mode",
            "feature_id": "dark-mode",
            "type": "BOOLEAN",
            "enabled_value": true,
            "disabled_value": false,
            "enabled": enabled
        })
    }

    #[test]
    fn test_service_url_for() {
        assert_eq!(
            AppConfigClient::service_url_for("eu-gb", "abc-123"),
            "https://eu-gb.apprapp.cloud.ibm.com/apprapp/feature/v1/instances/abc-123"
        );
    }

    #[tokio::test]
    async fn test_list_page_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/environments/dev/properties"))
            .and(query_param("limit", "5"))
            .and(query_param("offset", "10"))
            .and(query_param("tags", "db"))
            .and(header("X-Correlation-Id", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": [{
                    "name": "Port", "property_id": "port", "type": "NUMERIC", "value": 8080
                }],
                "total_count": 11
            })))
            .expect(1)
            .mount(&server)
            .await;

        let opts = ListOptions::new()
            .limit(5)
            .offset(10)
            .tags("db")
            .header("X-Correlation-Id", "abc");
        let page = client(&server)
            .list_page::<Property>(&Scope::environment("dev"), &opts)
            .await
            .unwrap();
        assert_eq!(page.items[0].property_id, "port");
        assert_eq!(page.total_count(), Some(11));
    }

    #[tokio::test]
    async fn test_get_returns_typed_and_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/environments/dev/features/dark-mode"))
            .and(query_param("include", "collections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feature_json(true)))
            .mount(&server)
            .await;

        let (feature, raw) = client(&server)
            .get::<Feature>(
                &Scope::environment("dev"),
                "dark-mode",
                &GetOptions::new().include("collections"),
            )
            .await
            .unwrap()
            .unwrap();
        assert!(feature.is_enabled());
        assert_eq!(raw["type"], "BOOLEAN");
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/segments/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server)
            .get::<Segment>(&Scope::Instance, "missing", &GetOptions::new())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_resolve_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/environments/Production"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/environments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "environments": [
                    {"name": "Development", "environment_id": "dev"},
                    {"name": "Production", "environment_id": "prod"}
                ]
            })))
            .mount(&server)
            .await;

        let env = client(&server)
            .resolve::<Environment>(&Scope::Instance, "Production")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(env.environment_id, "prod");
    }

    #[tokio::test]
    async fn test_create_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/environments"))
            .and(body_json(serde_json::json!({"name": "QA", "environment_id": "qa"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "name": "QA", "environment_id": "qa", "created_time": "2024-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created: Environment = client(&server)
            .create::<Environment>(&Scope::Instance, &Environment::new("QA", "qa"))
            .await
            .unwrap();
        assert!(created.created_time.is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_body_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let property = Property::new("Port", "port", ValueType::Numeric, ConfigValue::from("x"));
        let err = client(&server)
            .create::<Property>(&Scope::environment("dev"), &property)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("[app_config] create property"));
    }

    #[tokio::test]
    async fn test_update_git_config_uses_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/gitconfigs/web"))
            .and(body_json(serde_json::json!({"git_branch": "release"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "git_config_name": "Web", "git_config_id": "web", "git_branch": "release"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let patch = GitConfigPrototype {
            git_branch: Some("release".to_string()),
            ..Default::default()
        };
        let updated = client(&server)
            .update::<GitConfig>(&Scope::Instance, "web", &patch)
            .await
            .unwrap();
        assert_eq!(updated.git_branch.as_deref(), Some("release"));
    }

    #[tokio::test]
    async fn test_update_environment_uses_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/environments/dev"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "Dev 2", "environment_id": "dev"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let updated = client(&server)
            .update::<Environment>(&Scope::Instance, "dev", &Environment::new("Dev 2", "dev"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Dev 2");
    }

    #[tokio::test]
    async fn test_delete_error_is_tagged() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/collections/web"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "errors": [{"code": "conflict", "message": "Collection is in use"}]
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .delete::<crate::app_config::models::Collection>(&Scope::Instance, "web")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(
            err.to_string(),
            "[app_config] delete collection 'web': API error (status 409): Collection is in use"
        );
    }

    #[tokio::test]
    async fn test_toggle_feature() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/environments/dev/features/dark-mode/toggle"))
            .and(body_json(serde_json::json!({"enabled": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(feature_json(false)))
            .expect(1)
            .mount(&server)
            .await;

        let feature = client(&server)
            .toggle_feature("dev", "dark-mode", false)
            .await
            .unwrap();
        assert!(!feature.is_enabled());
    }

    #[tokio::test]
    async fn test_promote_and_restore_git_config() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/gitconfigs/web/promote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "git_commit_id": "a1b2c3",
                "git_commit_message": "promote",
                "last_sync_time": "2024-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/gitconfigs/web/restore"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "environments": [{"environment_id": "dev", "features": [], "properties": []}]
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let sync = client.promote_git_config("web").await.unwrap();
        assert_eq!(sync.git_commit_id, "a1b2c3");

        let restored = client.restore_git_config("web").await.unwrap();
        assert_eq!(restored["environments"][0]["environment_id"], "dev");
    }
}
