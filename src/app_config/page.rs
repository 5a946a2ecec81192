//! One page of an App Configuration list response

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{IbmError, Result};

/// Resolves relative `href` values so their query can be read
const LINK_BASE: &str = "http://localhost/";

/// A navigation link of a list response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageHref {
    pub href: String,
}

/// Pagination metadata shared by every list response
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PageLinks {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u32>,
    #[serde(default)]
    pub first: Option<PageHref>,
    #[serde(default)]
    pub previous: Option<PageHref>,
    #[serde(default)]
    pub next: Option<PageHref>,
    #[serde(default)]
    pub last: Option<PageHref>,
}

/// Items of one page plus its links
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub links: PageLinks,
}

impl<T: DeserializeOwned> ListPage<T> {
    /// Split a list response into the items under `list_key` and the links
    pub fn from_value(mut value: Value, list_key: &str) -> Result<Self> {
        let raw_items = value
            .get_mut(list_key)
            .map(Value::take)
            .ok_or_else(|| IbmError::Json(format!("list response has no '{}' array", list_key)))?;

        let items: Vec<T> = serde_json::from_value(raw_items)
            .map_err(|e| IbmError::Json(format!("Failed to parse {}: {}", list_key, e)))?;
        let links: PageLinks = serde_json::from_value(value)
            .map_err(|e| IbmError::Json(format!("Failed to parse pagination links: {}", e)))?;

        Ok(Self { items, links })
    }
}

impl<T> ListPage<T> {
    /// Offset of the following page, `None` when this is the last page
    pub fn next_offset(&self) -> Result<Option<u32>> {
        match &self.links.next {
            Some(next) => offset_from_href(&next.href),
            None => Ok(None),
        }
    }

    pub fn total_count(&self) -> Option<u32> {
        self.links.total_count
    }
}

/// Read the `offset` query parameter from an absolute or relative link
///
/// A link without an offset yields `None`; a non-integer offset is an error.
pub fn offset_from_href(href: &str) -> Result<Option<u32>> {
    let url = Url::parse(href)
        .or_else(|_| Url::parse(LINK_BASE).and_then(|base| base.join(href)))
        .map_err(|e| IbmError::Pagination(format!("unparseable next link '{}': {}", href, e)))?;

    let Some((_, offset)) = url.query_pairs().find(|(key, _)| key == "offset") else {
        return Ok(None);
    };
    offset.trim().parse::<u32>().map(Some).map_err(|_| {
        IbmError::Pagination(format!(
            "offset '{}' in next link is not a non-negative integer",
            offset
        ))
    })
}
