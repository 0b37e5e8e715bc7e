//! Per-listing engine configuration.

use std::num::NonZeroUsize;

use crate::error::Error;
use crate::types::FieldPath;

/// Default rows per page across the admin console.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration of one listing: which REST resource backs it, how records
/// are identified, which fields the search box tests, and the page size.
///
/// Each page instance owns one `ResourceSpec`; the engine is generic over
/// it rather than over the entity schema.
#[derive(Debug, Clone)]
pub struct ResourceSpec {
    path: String,
    envelope: String,
    id_field: String,
    filter_fields: Vec<FieldPath>,
    page_size: NonZeroUsize,
}

impl ResourceSpec {
    /// Create a spec for the REST resource at `path`, whose list responses
    /// arrive under the `envelope` key and whose records are identified by
    /// `id_field`.
    ///
    /// # Errors
    ///
    /// Empty path, envelope, or identifier field are precondition errors.
    pub fn new(
        path: impl Into<String>,
        envelope: impl Into<String>,
        id_field: impl Into<String>,
    ) -> Result<Self, Error> {
        let path = path.into();
        let envelope = envelope.into();
        let id_field = id_field.into();

        if path.is_empty() || path.starts_with('/') {
            return Err(Error::precondition(format!(
                "resource path '{path}' must be a non-empty relative segment"
            )));
        }
        if envelope.is_empty() {
            return Err(Error::precondition("response envelope key must not be empty"));
        }
        if id_field.is_empty() {
            return Err(Error::precondition("identifier field must not be empty"));
        }

        Ok(Self {
            path,
            envelope,
            id_field,
            filter_fields: Vec::new(),
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).expect("default page size is non-zero"),
        })
    }

    /// Set the field paths the search box tests.
    pub fn with_filter_fields<I>(mut self, fields: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.filter_fields = fields
            .into_iter()
            .map(|f| FieldPath::new(f.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Override the page size.
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// REST path segment, e.g. `"user"`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Key under which list responses carry the records, e.g. `"users"`.
    pub fn envelope(&self) -> &str {
        &self.envelope
    }

    /// Field holding the stable identifier, e.g. `"_id"`.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn filter_fields(&self) -> &[FieldPath] {
        &self.filter_fields
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }
}
