//! Offset pager over App Configuration list endpoints

use std::marker::PhantomData;

use futures::stream::{self, Stream, TryStreamExt};
use log::debug;

use super::client::AppConfigClient;
use super::models::{Collection, Environment, Feature, GitConfig, Property, Segment};
use super::options::ListOptions;
use super::resource::{AppConfigResource, Scope};
use crate::error::{IbmError, Result};

/// Walks a list endpoint page by page, following the offset in each `next` link
pub struct Pager<'c, R> {
    client: &'c AppConfigClient,
    scope: Scope,
    options: ListOptions,
    offset: Option<u32>,
    has_next: bool,
    _resource: PhantomData<R>,
}

pub type EnvironmentsPager<'c> = Pager<'c, Environment>;
pub type CollectionsPager<'c> = Pager<'c, Collection>;
pub type FeaturesPager<'c> = Pager<'c, Feature>;
pub type PropertiesPager<'c> = Pager<'c, Property>;
pub type SegmentsPager<'c> = Pager<'c, Segment>;
pub type GitConfigsPager<'c> = Pager<'c, GitConfig>;

impl<'c, R: AppConfigResource> Pager<'c, R> {
    /// Create a pager; the starting offset is owned by the pager and may not be preset
    pub fn new(client: &'c AppConfigClient, scope: Scope, options: ListOptions) -> Result<Self> {
        if options.offset.is_some() {
            return Err(IbmError::Pagination(
                "the offset option may not be set when using a pager".to_string(),
            ));
        }
        // Surface a missing environment before the first request
        R::collection_path(&scope)?;

        Ok(Self {
            client,
            scope,
            options,
            offset: None,
            has_next: true,
            _resource: PhantomData,
        })
    }

    /// Whether another page can be requested
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Fetch the next page of items
    pub async fn get_next(&mut self) -> Result<Vec<R>> {
        if !self.has_next {
            return Err(IbmError::Pagination("no more results available".to_string()));
        }

        let page = self
            .client
            .fetch_page::<R>(&self.scope, &self.options, self.offset)
            .await?;

        match page.next_offset()? {
            Some(next) => {
                let current = self.offset.unwrap_or(0);
                if next <= current {
                    return Err(IbmError::Pagination(format!(
                        "next link offset {} does not advance past {}",
                        next, current
                    )));
                }
                debug!("{} page done, next offset {}", R::COLLECTION, next);
                self.offset = Some(next);
            }
            None => {
                debug!("{} last page reached", R::COLLECTION);
                self.has_next = false;
            }
        }

        Ok(page.items)
    }

    /// Fetch every remaining page and concatenate the items
    pub async fn get_all(&mut self) -> Result<Vec<R>> {
        let mut all = Vec::new();
        while self.has_next {
            all.extend(self.get_next().await?);
        }
        Ok(all)
    }

    /// Yield items lazily, requesting pages as the stream is polled
    pub fn into_stream(self) -> impl Stream<Item = Result<R>> + 'c
    where
        R: 'c,
    {
        stream::try_unfold(self, |mut pager| async move {
            if !pager.has_next() {
                return Ok::<_, IbmError>(None);
            }
            let items = pager.get_next().await?;
            let page = stream::iter(items.into_iter().map(Ok::<R, IbmError>));
            Ok(Some((page, pager)))
        })
        .try_flatten()
    }
}
