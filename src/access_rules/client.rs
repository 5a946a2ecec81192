//! CIS zone firewall access rules client

use futures::stream::{self, StreamExt};
use log::{debug, info};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{AccessRule, CisPage, CisResponse, DeletedRule};
use super::options::{CreateAccessRuleOptions, ListAccessRulesOptions, UpdateAccessRuleOptions};
use crate::config::api;
use crate::error::{IbmError, Result};
use crate::service::query::{append_query, encode_segment};
use crate::service::{Authenticator, PaginatedResponse, ServiceClient, Validate};

const COMPONENT: &str = "cis";

/// Client for the access rules of one zone in a CIS instance
#[derive(Clone)]
pub struct ZoneFirewallClient {
    service: ServiceClient,
    crn: String,
    zone_identifier: String,
}

impl ZoneFirewallClient {
    pub fn new(crn: &str, zone_identifier: &str, authenticator: Authenticator) -> Self {
        Self::with_service(
            ServiceClient::new(api::CIS_URL, authenticator),
            crn,
            zone_identifier,
        )
    }

    pub fn with_service(service: ServiceClient, crn: &str, zone_identifier: &str) -> Self {
        Self {
            service,
            crn: crn.to_string(),
            zone_identifier: zone_identifier.to_string(),
        }
    }

    pub fn service(&self) -> &ServiceClient {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut ServiceClient {
        &mut self.service
    }

    pub fn crn(&self) -> &str {
        &self.crn
    }

    pub fn zone_identifier(&self) -> &str {
        &self.zone_identifier
    }

    fn rules_path(&self) -> String {
        format!(
            "/v1/{}/zones/{}/firewall/access_rules/rules",
            encode_segment(&self.crn),
            encode_segment(&self.zone_identifier)
        )
    }

    fn rule_path(&self, rule_id: &str) -> String {
        format!("{}/{}", self.rules_path(), encode_segment(rule_id))
    }

    /// Send a request and unwrap the CIS envelope
    async fn call<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<T> {
        let envelope: CisResponse<T> = self
            .service
            .execute(builder, operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation))?;
        envelope
            .into_result()
            .map_err(|e| e.tagged(COMPONENT, operation))
    }

    /// List one page of access rules
    pub async fn list_access_rules(
        &self,
        options: &ListAccessRulesOptions,
    ) -> Result<CisPage<AccessRule>> {
        let (_, page) = self.fetch_page(options, options.page, "list access rules").await?;
        Ok(page)
    }

    async fn fetch_page(
        &self,
        options: &ListAccessRulesOptions,
        page: Option<u32>,
        operation: &str,
    ) -> Result<(u32, CisPage<AccessRule>)> {
        let page_num = page.unwrap_or(1);
        let path = append_query(&self.rules_path(), &options.query_pairs(page));
        let url = self.service.url(&path);
        debug!("Fetching page {} from: {}", page_num, url);

        let page_context = format!("{} (page {})", operation, page_num);
        let builder = self.service.request(Method::GET, &url, &options.headers);
        let envelope: CisResponse<Vec<AccessRule>> = self
            .service
            .execute(builder, &page_context)
            .await
            .map_err(|e| e.tagged(COMPONENT, page_context.clone()))?;

        envelope
            .ensure_success()
            .map_err(|e| e.tagged(COMPONENT, page_context))?;

        let result_info = envelope.result_info;
        let total = envelope.total_count().unwrap_or_default();
        let items = envelope.into_data();
        debug!(
            "Page {} returned {} of {} rules",
            page_num,
            items.len(),
            total
        );
        Ok((page_num, CisPage { items, result_info }))
    }

    /// List every access rule, fetching pages after the first in parallel
    pub async fn list_all_access_rules(
        &self,
        options: &ListAccessRulesOptions,
    ) -> Result<Vec<AccessRule>> {
        let operation = "list all access rules";
        let (_, first) = self.fetch_page(options, Some(1), operation).await?;
        let mut all_items = first.items;

        let total_pages = match first.result_info {
            Some(info) => info.total_pages(),
            None => return Ok(all_items),
        };
        debug!("Page 1/{}, {} rules so far", total_pages, all_items.len());

        if total_pages <= 1 {
            return Ok(all_items);
        }

        debug!(
            "Fetching {} remaining pages in parallel (max {} concurrent)",
            total_pages - 1,
            api::MAX_CONCURRENT_PAGE_REQUESTS
        );

        let page_futures =
            (2..=total_pages).map(|page_num| self.fetch_page(options, Some(page_num), operation));

        let results: Vec<Result<(u32, CisPage<AccessRule>)>> = stream::iter(page_futures)
            .buffer_unordered(api::MAX_CONCURRENT_PAGE_REQUESTS)
            .collect()
            .await;

        let mut pages = results.into_iter().collect::<Result<Vec<_>>>()?;
        pages.sort_by_key(|(page_num, _)| *page_num);
        for (_, page) in pages {
            all_items.extend(page.items);
        }

        info!("Fetched {} access rules", all_items.len());
        Ok(all_items)
    }

    /// Get a rule by ID; `None` on 404
    pub async fn get_access_rule(&self, rule_id: &str) -> Result<Option<(AccessRule, Value)>> {
        let operation = format!("get access rule '{}'", rule_id);
        let url = self.service.url(&self.rule_path(rule_id));
        debug!("Fetching access rule: {}", url);

        let builder = self.service.request(Method::GET, &url, &[]);
        let Some(raw) = self
            .service
            .fetch_optional(builder, &operation)
            .await
            .map_err(|e| e.tagged(COMPONENT, operation.clone()))?
        else {
            return Ok(None);
        };

        let envelope: CisResponse<Value> = serde_json::from_value(raw)
            .map_err(|e| IbmError::from(e).tagged(COMPONENT, operation.clone()))?;
        let result = envelope
            .into_result()
            .map_err(|e| e.tagged(COMPONENT, operation.clone()))?;
        let rule: AccessRule = serde_json::from_value(result.clone()).map_err(|e| {
            IbmError::Json(format!("Failed to parse access rule: {}", e)).tagged(COMPONENT, operation)
        })?;
        Ok(Some((rule, result)))
    }

    pub async fn create_access_rule(&self, options: &CreateAccessRuleOptions) -> Result<AccessRule> {
        let operation = "create access rule";
        options
            .validate()
            .map_err(|e| e.tagged(COMPONENT, operation))?;

        let url = self.service.url(&self.rules_path());
        debug!("Creating {} rule for {}", options.mode, options.configuration.value());
        let builder = self
            .service
            .request(Method::POST, &url, &options.headers)
            .json(options);
        let rule: AccessRule = self.call(builder, operation).await?;
        info!("Created access rule {}", rule.id);
        Ok(rule)
    }

    /// Change the mode or notes of a rule
    pub async fn update_access_rule(
        &self,
        rule_id: &str,
        options: &UpdateAccessRuleOptions,
    ) -> Result<AccessRule> {
        let operation = format!("update access rule '{}'", rule_id);
        options
            .validate()
            .map_err(|e| e.tagged(COMPONENT, operation.clone()))?;

        let url = self.service.url(&self.rule_path(rule_id));
        debug!("Updating access rule: {}", url);
        let builder = self
            .service
            .request(Method::PATCH, &url, &options.headers)
            .json(options);
        self.call(builder, &operation).await
    }

    /// Delete a rule, returning the deleted ID
    pub async fn delete_access_rule(&self, rule_id: &str) -> Result<String> {
        let operation = format!("delete access rule '{}'", rule_id);
        let url = self.service.url(&self.rule_path(rule_id));
        debug!("Deleting access rule: {}", url);
        let builder = self.service.request(Method::DELETE, &url, &[]);
        let deleted: DeletedRule = self.call(builder, &operation).await?;
        info!("Deleted access rule {}", deleted.id);
        Ok(deleted.id)
    }
}
