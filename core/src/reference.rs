//! Addressing quotations and transactions by numeric id or external id.

use std::fmt;

use crate::error::ApiError;
use crate::http::encode_segment;

/// A quotation or transaction, either by the id the API assigned or by the
/// external id the caller chose at creation time.
///
/// Renders as the path segment the API expects: `42` or `ext-<external id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceRef {
    Id(i64),
    External(String),
}

impl ResourceRef {
    /// Picks the reference from an optional pair. The numeric id wins when
    /// both are given; having neither is an `InvalidArgument` error.
    pub fn resolve(id: Option<i64>, external_id: Option<&str>) -> Result<Self, ApiError> {
        match (id, external_id) {
            (Some(id), _) => Ok(ResourceRef::Id(id)),
            (None, Some(external_id)) => Ok(ResourceRef::External(external_id.to_string())),
            (None, None) => Err(ApiError::InvalidArgument(
                "either the id or the external id must be supplied".to_string(),
            )),
        }
    }

    pub fn external(external_id: &str) -> Self {
        ResourceRef::External(external_id.to_string())
    }

    /// The rendered reference, percent-encoded for use as one URL path
    /// segment.
    pub fn path_segment(&self) -> String {
        encode_segment(&self.to_string())
    }
}

impl From<i64> for ResourceRef {
    fn from(id: i64) -> Self {
        ResourceRef::Id(id)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::Id(id) => write!(f, "{id}"),
            ResourceRef::External(external_id) => write!(f, "ext-{external_id}"),
        }
    }
}
