//! Request options for App Configuration list and get calls

use crate::config::api;

/// Options for listing a collection
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    pub limit: u32,
    /// Starting offset; must be unset when the options drive a pager
    pub offset: Option<u32>,
    pub sort: Option<String>,
    pub tags: Option<String>,
    pub expand: Option<bool>,
    pub include: Vec<String>,
    pub search: Option<String>,
    /// Resource filters such as `collections`, `segments` or `features`
    pub filters: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: api::DEFAULT_PAGE_SIZE,
            offset: None,
            sort: None,
            tags: None,
            expand: None,
            include: Vec::new(),
            search: None,
            filters: Vec::new(),
            headers: Vec::new(),
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = Some(expand);
        self
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include.push(include.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filter by a related resource, e.g. `filter("collections", "web-app,mobile")`
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((name.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Query parameters for a request starting at `offset`
    pub(crate) fn query_pairs(&self, offset: Option<u32>) -> Vec<(String, String)> {
        let mut pairs = vec![("limit".to_string(), self.limit.to_string())];
        if let Some(offset) = offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(tags) = &self.tags {
            pairs.push(("tags".to_string(), tags.clone()));
        }
        if let Some(expand) = self.expand {
            pairs.push(("expand".to_string(), expand.to_string()));
        }
        if !self.include.is_empty() {
            pairs.push(("include".to_string(), self.include.join(",")));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

/// Options for fetching a single resource
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetOptions {
    pub include: Vec<String>,
    pub expand: Option<bool>,
    pub headers: Vec<(String, String)>,
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include.push(include.into());
        self
    }

    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = Some(expand);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.include.is_empty() {
            pairs.push(("include".to_string(), self.include.join(",")));
        }
        if let Some(expand) = self.expand {
            pairs.push(("expand".to_string(), expand.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_options() {
        let opts = ListOptions::default();
        assert_eq!(opts.limit, api::DEFAULT_PAGE_SIZE);
        assert_eq!(
            opts.query_pairs(None),
            vec![("limit".to_string(), "100".to_string())]
        );
    }

    #[test]
    fn test_list_query_pairs_order() {
        let opts = ListOptions::new()
            .limit(10)
            .sort("created_time")
            .tags("beta")
            .expand(true)
            .include("collections")
            .include("rules")
            .search("dark")
            .filter("segments", "beta-users");

        let pairs = opts.query_pairs(Some(20));
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["limit", "offset", "sort", "tags", "expand", "include", "search", "segments"]
        );
        assert_eq!(pairs[5].1, "collections,rules");
        assert_eq!(pairs[1].1, "20");
    }

    #[test]
    fn test_get_query_pairs() {
        assert!(GetOptions::new().query_pairs().is_empty());
        let opts = GetOptions::new().include("rules").expand(false);
        assert_eq!(
            opts.query_pairs(),
            vec![
                ("include".to_string(), "rules".to_string()),
                ("expand".to_string(), "false".to_string())
            ]
        );
    }
}
