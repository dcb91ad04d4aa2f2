//! NetBox organization API client
//!
//! A Rust client library for the organization resources of the NetBox REST
//! API (regions and sites). The model is deliberately simple and fully
//! synchronous: build an [`Auth`] context, hand it to a collection, and the
//! collection issues one blocking HTTP call on first use, caches the raw
//! records, and exposes them through typed read-only views.
//!
//! # Example
//!
//! ```no_run
//! use netkit_client::{Auth, Sites};
//!
//! fn main() -> Result<(), netkit_client::NetkitError> {
//!     let auth = Auth::new("your-api-token", "https://netbox.example.com")?;
//!
//!     let sites = Sites::new(&auth);
//!     for site in sites.list_sites()? {
//!         println!("{:?} {:?}", site.id(), site.name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Collections memoize their fetch for their own lifetime. There is no
//! invalidation; construct a new collection when fresh data is needed.

pub mod auth;
pub mod error;
pub mod organization;
pub mod request;

pub use auth::Auth;
pub use error::NetkitError;
pub use organization::regions::{RegionInfo, Regions};
pub use organization::sites::{SiteInfo, Sites};
pub use request::netbox_request;
