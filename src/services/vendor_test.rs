use gateway::Method;
use serde_json::json;

use super::*;
use crate::services::test_helpers::{only_request, replying, url};

const VENDOR: &str = r#"{"id":4,"name":"Cisco","description":"","vendor_id":9}"#;

#[tokio::test]
async fn list_sends_page_params() {
    let (transport, gw) = replying(200, r#"{"count":1,"next":null,"previous":null,"results":[{"id":4,"name":"Cisco","vendor_id":9}]}"#);

    let page = VendorService::new(&gw).list(PageParams::new(2, 5)).await.unwrap();
    assert_eq!(page.results[0].vendor_id, 9);

    let request = only_request(&transport);
    assert_eq!(request.url, url("/nas/vendors"));
    assert!(request.query.contains(&("page".to_owned(), "2".to_owned())));
    assert!(request.query.contains(&("page_size".to_owned(), "5".to_owned())));
}

#[tokio::test]
async fn update_is_put_and_partial_update_is_patch() {
    let (transport, gw) = replying(200, VENDOR);
    let service = VendorService::new(&gw);
    let input = VendorInput { name: Some("Cisco".into()), ..VendorInput::default() };

    service.update(4, &input).await.unwrap();
    service.partial_update(4, &input).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::PUT);
    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(requests[1].url, url("/nas/vendors/4/"));
    assert_eq!(requests[1].body, Some(json!({ "name": "Cisco" })));
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let (transport, gw) = replying(204, "");
    VendorService::new(&gw).delete(4).await.unwrap();
    assert_eq!(only_request(&transport).method, Method::DELETE);
}

#[tokio::test]
async fn not_found_surfaces_status() {
    let (_, gw) = replying(404, r#"{"detail":"Not found."}"#);
    let err = VendorService::new(&gw).get(77).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Gateway(ref e) if e.status() == Some(404)));
}
