//! Object-store content source.
//!
//! Each fileset is a key prefix `<fileset>/` inside one bucket. The store
//! itself is a collaborator behind [`ObjectStore`]; this module only shapes
//! its listings and bodies into the [`ContentSource`] contract.

use std::collections::BTreeMap;

use glob::Pattern;

use super::{ContentSource, discard_header, is_ignored};
use crate::config::OBJECT_STORE_SCHEME;
use crate::error::{ContentReadError, ObjectStoreError, SourceIssue, SourceIssueKind};

/// Minimal object-store client: bounded prefix listing and whole-object GET.
pub trait ObjectStore {
    /// List at most `max_keys` full keys in `bucket` starting with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket does not exist or the request fails.
    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        max_keys: usize,
    ) -> Result<Vec<String>, ObjectStoreError>;

    /// Fetch the full body of one object.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectStoreError::NoSuchKey`] if the object does not exist.
    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;
}

/// In-memory object store, keyed by bucket then key.
///
/// Used for fixtures and tests; listings come back in key order like a real
/// `ListObjectsV2` response.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    buckets: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bucket (putting an object creates it implicitly).
    pub fn create_bucket(&mut self, bucket: &str) {
        self.buckets.entry(bucket.to_owned()).or_default();
    }

    pub fn put_object(&mut self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        self.buckets
            .entry(bucket.to_owned())
            .or_default()
            .insert(key.to_owned(), body.into());
    }
}

impl ObjectStore for MemoryObjectStore {
    fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        max_keys: usize,
    ) -> Result<Vec<String>, ObjectStoreError> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| ObjectStoreError::NoSuchBucket(bucket.to_owned()))?;
        Ok(objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .take(max_keys)
            .cloned()
            .collect())
    }

    fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| ObjectStoreError::NoSuchBucket(bucket.to_owned()))?;
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| ObjectStoreError::NoSuchKey {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
            })
    }
}

/// Content stored as `<bucket>/<fileset>/<file>` in an object store.
pub struct BucketSource<'a> {
    store: &'a dyn ObjectStore,
    bucket: String,
    ignore: Vec<Pattern>,
    max_keys: usize,
}

impl<'a> BucketSource<'a> {
    #[must_use]
    pub fn new(
        store: &'a dyn ObjectStore,
        bucket: String,
        ignore: Vec<Pattern>,
        max_keys: usize,
    ) -> Self {
        Self {
            store,
            bucket,
            ignore,
            max_keys,
        }
    }
}

impl ContentSource for BucketSource<'_> {
    fn list_content(&self, fileset_path: &str) -> Result<Vec<String>, SourceIssue> {
        let prefix = format!("{fileset_path}/");
        let location = format!("{}/{prefix}", self.bucket);
        let keys = self
            .store
            .list_objects(&self.bucket, &prefix, self.max_keys)
            .map_err(|e| {
                SourceIssue::new(
                    location.clone(),
                    SourceIssueKind::StoreUnavailable,
                    format!("Unable to list bucket {} prefix {prefix}: {e}", self.bucket),
                )
            })?;

        let names: Vec<String> = keys
            .iter()
            .filter_map(|key| key.get(prefix.len()..))
            .filter(|name| !name.is_empty() && !is_ignored(name, &self.ignore))
            .map(str::to_owned)
            .collect();

        if names.is_empty() {
            return Err(SourceIssue::new(
                location,
                SourceIssueKind::EmptyListing,
                format!("Invalid bucket {} or prefix {prefix}", self.bucket),
            ));
        }

        tracing::debug!(bucket = %self.bucket, %prefix, objects = names.len(), "Listed bucket fileset");
        Ok(names)
    }

    fn read_content(
        &self,
        fileset_path: &str,
        name: &str,
    ) -> Result<Vec<String>, ContentReadError> {
        let key = format!("{fileset_path}/{name}");
        let body = self
            .store
            .get_object(&self.bucket, &key)
            .map_err(|source| match source {
                ObjectStoreError::NoSuchKey { .. } => {
                    ContentReadError::NotFound(format!("{}/{key}", self.bucket))
                }
                other => ContentReadError::Store {
                    path: format!("{}/{key}", self.bucket),
                    source: other,
                },
            })?;
        let content = String::from_utf8(body)
            .map_err(|_| ContentReadError::InvalidEncoding(format!("{}/{key}", self.bucket)))?;
        Ok(discard_header(&content))
    }

    fn describe(&self) -> String {
        format!("{OBJECT_STORE_SCHEME}{}", self.bucket)
    }
}
