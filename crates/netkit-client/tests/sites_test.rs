//! Site collection, record views, and creation against a mock NetBox instance

use chrono::NaiveDate;
use mockito::Server;
use netkit_client::{Auth, NetkitError, Sites};
use serde_json::{Value, json};

fn site_record() -> Value {
    // circuit_count and vlan_count are deliberately unset.
    json!({
        "id": 1,
        "name": "Netkit Lab",
        "slug": "netkit-lab",
        "status": {"value": 1, "label": "Active"},
        "region": null,
        "tenant": null,
        "facility": "Homelab",
        "asn": 12200,
        "time_zone": "Europe/London",
        "description": "",
        "physical_address": "",
        "shipping_address": "",
        "latitude": null,
        "longitude": null,
        "contact_name": "",
        "contact_phone": "",
        "contact_email": "",
        "comments": "",
        "tags": [],
        "custom_fields": {},
        "created": "2021-01-01",
        "last_updated": "2021-01-01T12:00:00.000000Z",
        "device_count": 3,
        "prefix_count": 2,
        "rack_count": 1,
        "virtualmachine_count": 0
    })
}

fn sites_body() -> String {
    json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [site_record()]
    })
    .to_string()
}

#[test]
fn site_records_expose_their_fields() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/dcim/sites")
        .match_header("authorization", "Token foo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(sites_body())
        .create();

    let auth = Auth::new("foo", server.url()).expect("client should build");
    let sites = Sites::new(&auth);
    let listing = sites.list_sites().expect("listing should succeed");
    assert_eq!(listing.len(), 1);

    let site = &listing[0];
    assert_eq!(site.id(), Some(1));
    assert_eq!(site.name(), Some("Netkit Lab"));
    assert_eq!(site.slug(), Some("netkit-lab"));
    assert_eq!(site.status(), Some(&json!({"value": 1, "label": "Active"})));
    assert!(site.region().is_none());
    assert!(site.tenant().is_none());
    assert_eq!(site.facility(), Some("Homelab"));
    assert_eq!(site.asn(), Some(12200));
    assert!(site.latitude().is_none());
    assert!(site.longitude().is_none());
    assert!(site.tags().is_some_and(Vec::is_empty));
    assert_eq!(site.device_count(), Some(3));
    assert_eq!(site.circuit_count(), None);
    assert_eq!(site.vlan_count(), None);

    let created = site.created().expect("created date should parse");
    assert_eq!(created, NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date"));

    let updated = site.last_updated().expect("last_updated should parse");
    let expected = NaiveDate::from_ymd_opt(2021, 1, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid timestamp");
    assert_eq!(updated, expected);

    assert_eq!(
        site.time_zone().expect("zone should resolve"),
        Some(chrono_tz::Europe::London)
    );
    mock.assert();
}

#[test]
fn the_fetch_is_memoized_across_listing_reads() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/dcim/sites")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(sites_body())
        .expect(1)
        .create();

    let auth = Auth::new("foo", server.url()).expect("client should build");
    let sites = Sites::new(&auth);
    sites.list_sites().expect("listing should succeed");
    sites.list_sites().expect("listing should succeed");
    mock.assert();
}

#[test]
fn create_site_returns_the_created_record() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/dcim/sites/")
        .match_header("authorization", "Token foo")
        .match_body(mockito::Matcher::Json(json!({
            "name": "Netkit Lab",
            "slug": "netkit-lab",
            "status": 1
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(site_record().to_string())
        .create();

    let auth = Auth::new("foo", server.url()).expect("client should build");
    let sites = Sites::new(&auth);
    let created = sites
        .create_site(&json!({
            "name": "Netkit Lab",
            "slug": "netkit-lab",
            "status": 1
        }))
        .expect("creation should succeed");

    assert_eq!(created.id(), Some(1));
    assert_eq!(created.name(), Some("Netkit Lab"));
    mock.assert();
}

#[test]
fn create_site_failure_surfaces_as_the_library_error() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/dcim/sites/")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name": ["This field is required."]}"#)
        .create();

    let auth = Auth::new("foo", server.url()).expect("client should build");
    let sites = Sites::new(&auth);
    let error = sites
        .create_site(&json!({"slug": "netkit-lab"}))
        .expect_err("a validation failure must surface");

    assert!(matches!(error, NetkitError::Operation(_)));
    assert!(!error.message().is_empty());
    mock.assert();
}

#[test]
fn creation_does_not_populate_the_listing_cache() {
    let mut server = Server::new();
    let create_mock = server
        .mock("POST", "/api/dcim/sites/")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(site_record().to_string())
        .create();
    let list_mock = server
        .mock("GET", "/api/dcim/sites")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(sites_body())
        .expect(1)
        .create();

    let auth = Auth::new("foo", server.url()).expect("client should build");
    let sites = Sites::new(&auth);
    sites
        .create_site(&json!({"name": "Netkit Lab", "slug": "netkit-lab"}))
        .expect("creation should succeed");
    sites.list_sites().expect("listing should succeed");

    create_mock.assert();
    list_mock.assert();
}
