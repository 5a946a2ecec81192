//! Common traits for API resources

/// Common identification interface for all resources
pub trait Resource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or ID
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }

    /// Case-insensitive substring match on the name
    fn name_contains(&self, filter: &str) -> bool {
        self.name().to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Trait for API responses that carry page-numbered data
///
/// Implement this for a response type to use it with parallel page fetching.
pub trait PaginatedResponse<T> {
    /// Consume self and return the data items
    fn into_data(self) -> Vec<T>;
    /// Total number of items across all pages, if reported
    fn total_count(&self) -> Option<u32>;
}

/// Validation run on a request body before it is sent
pub trait Validate {
    fn validate(&self) -> crate::error::Result<()> {
        Ok(())
    }
}
