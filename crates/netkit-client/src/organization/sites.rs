//! Site listings and creation against the NetBox DCIM API

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;

use crate::auth::Auth;
use crate::error::NetkitError;
use crate::request::netbox_request;

/// Lazily fetched collection of the sites registered in NetBox.
///
/// Listing behaves like [`Regions`](crate::Regions): one memoized fetch per
/// collection instance, first page of results only, no invalidation. Sites
/// additionally support creation, which never touches the listing cache.
#[derive(Debug)]
pub struct Sites<'a> {
    auth: &'a Auth,
    sites: OnceCell<Vec<Value>>,
}

impl<'a> Sites<'a> {
    /// Create a site collection over the given auth context
    pub fn new(auth: &'a Auth) -> Self {
        Self {
            auth,
            sites: OnceCell::new(),
        }
    }

    /// The auth context used to reach the instance
    pub fn auth(&self) -> &Auth {
        self.auth
    }

    fn fetch(&self) -> Result<&[Value], NetkitError> {
        self.sites
            .get_or_try_init(|| {
                debug!("Fetching site records from NetBox");
                let response = netbox_request(self.auth, "/api/dcim/sites", None, Method::GET)?;
                let body: Value = response.json().map_err(NetkitError::api)?;
                Ok(match body.get("results").and_then(Value::as_array) {
                    Some(results) => results.clone(),
                    None => Vec::new(),
                })
            })
            .map(Vec::as_slice)
    }

    /// The sites registered in NetBox, as typed read-only views.
    ///
    /// The first call fetches and caches the raw records; later calls
    /// rebuild the views from the cache without another request.
    ///
    /// # Errors
    ///
    /// Propagates the request helper's uniform error when the fetch fails.
    pub fn list_sites(&self) -> Result<Vec<SiteInfo>, NetkitError> {
        Ok(self.fetch()?.iter().cloned().map(SiteInfo::new).collect())
    }

    /// Create a new site from the supplied field mapping.
    ///
    /// The fields are posted as-is; see the NetBox API examples for the
    /// accepted payload shape. On success the created record is returned as
    /// a [`SiteInfo`] view.
    ///
    /// # Errors
    ///
    /// Every failure, including remote validation errors, is re-raised as
    /// [`NetkitError::Operation`] carrying the underlying message.
    pub fn create_site(&self, fields: &Value) -> Result<SiteInfo, NetkitError> {
        debug!("Creating site in NetBox");
        let record = netbox_request(self.auth, "/api/dcim/sites/", Some(fields), Method::POST)
            .and_then(|response| response.json::<Value>().map_err(NetkitError::api))
            .map_err(|error| NetkitError::operation(error.to_string()))?;
        Ok(SiteInfo::new(record))
    }
}

/// Read-only view over one raw site record.
///
/// Accessors look fields up by exact name and default absent keys and JSON
/// nulls to `None`. The `created`, `last_updated` and `time_zone` fields
/// are the only ones that transform their raw value; everything else is a
/// direct passthrough.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    attributes: Value,
}

impl SiteInfo {
    /// Wrap a raw site record
    pub fn new(attributes: Value) -> Self {
        Self { attributes }
    }

    fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|value| !value.is_null())
    }

    fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(Value::as_str)
    }

    fn attr_i64(&self, key: &str) -> Option<i64> {
        self.attr(key).and_then(Value::as_i64)
    }

    /// The ID of the registered site
    pub fn id(&self) -> Option<i64> {
        self.attr_i64("id")
    }

    /// The name of the registered site
    pub fn name(&self) -> Option<&str> {
        self.attr_str("name")
    }

    /// The slug associated with the registered site
    pub fn slug(&self) -> Option<&str> {
        self.attr_str("slug")
    }

    /// The status of the site, as the API's value/label pair
    pub fn status(&self) -> Option<&Value> {
        self.attr("status")
    }

    /// The region the site resides in, as the embedded sub-object.
    ///
    /// This is not a resolved join; callers wanting the full region fetch
    /// it separately and match ids themselves.
    pub fn region(&self) -> Option<&Value> {
        self.attr("region")
    }

    /// The tenant the site belongs to, as the embedded sub-object
    pub fn tenant(&self) -> Option<&Value> {
        self.attr("tenant")
    }

    /// The facility the site resides in
    pub fn facility(&self) -> Option<&str> {
        self.attr_str("facility")
    }

    /// The autonomous system number associated with the site
    pub fn asn(&self) -> Option<i64> {
        self.attr_i64("asn")
    }

    /// The time zone of the site, resolved into an IANA zone.
    ///
    /// # Errors
    ///
    /// A present but unrecognized zone name is a [`NetkitError::Parse`]
    /// error; absent or empty yields `Ok(None)`.
    pub fn time_zone(&self) -> Result<Option<Tz>, NetkitError> {
        match self.attr_str("time_zone") {
            Some(name) if !name.is_empty() => name
                .parse::<Tz>()
                .map(Some)
                .map_err(|error| NetkitError::Parse(error.to_string())),
            _ => Ok(None),
        }
    }

    /// The description for the site
    pub fn description(&self) -> Option<&str> {
        self.attr_str("description")
    }

    /// The physical address of the site
    pub fn physical_address(&self) -> Option<&str> {
        self.attr_str("physical_address")
    }

    /// The shipping address for the site
    pub fn shipping_address(&self) -> Option<&str> {
        self.attr_str("shipping_address")
    }

    /// The latitude of the site
    pub fn latitude(&self) -> Option<f64> {
        self.attr("latitude").and_then(Value::as_f64)
    }

    /// The longitude of the site
    pub fn longitude(&self) -> Option<f64> {
        self.attr("longitude").and_then(Value::as_f64)
    }

    /// The contact name for the site
    pub fn contact_name(&self) -> Option<&str> {
        self.attr_str("contact_name")
    }

    /// The contact phone number for the site
    pub fn contact_phone(&self) -> Option<&str> {
        self.attr_str("contact_phone")
    }

    /// The email address of the site contact
    pub fn contact_email(&self) -> Option<&str> {
        self.attr_str("contact_email")
    }

    /// Comments related to the site
    pub fn comments(&self) -> Option<&str> {
        self.attr_str("comments")
    }

    /// Any tags related to the site
    pub fn tags(&self) -> Option<&Vec<Value>> {
        self.attr("tags").and_then(Value::as_array)
    }

    /// Any custom fields related to the site
    pub fn custom_fields(&self) -> Option<&Map<String, Value>> {
        self.attr("custom_fields").and_then(Value::as_object)
    }

    /// The date the site was created.
    ///
    /// # Errors
    ///
    /// Strict `%Y-%m-%d` parse; a missing or malformed value is an error,
    /// propagated unwrapped.
    pub fn created(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(self.attr_str("created").unwrap_or_default(), "%Y-%m-%d")
    }

    /// The date and time the site was last updated.
    ///
    /// # Errors
    ///
    /// Strict parse of the API's fractional-seconds UTC timestamp; a
    /// missing or malformed value is an error, propagated unwrapped.
    pub fn last_updated(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(
            self.attr_str("last_updated").unwrap_or_default(),
            "%Y-%m-%dT%H:%M:%S%.fZ",
        )
    }

    /// The circuit count for the site
    pub fn circuit_count(&self) -> Option<i64> {
        self.attr_i64("circuit_count")
    }

    /// The device count for the site
    pub fn device_count(&self) -> Option<i64> {
        self.attr_i64("device_count")
    }

    /// The prefix count for the site
    pub fn prefix_count(&self) -> Option<i64> {
        self.attr_i64("prefix_count")
    }

    /// The rack count for the site
    pub fn rack_count(&self) -> Option<i64> {
        self.attr_i64("rack_count")
    }

    /// The virtual machine count for the site
    pub fn virtualmachine_count(&self) -> Option<i64> {
        self.attr_i64("virtualmachine_count")
    }

    /// The VLAN count for the site
    pub fn vlan_count(&self) -> Option<i64> {
        self.attr_i64("vlan_count")
    }
}
