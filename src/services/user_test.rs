use gateway::ApiResponse;
use serde_json::json;

use super::*;
use crate::services::test_helpers::{only_request, replying, signed_in, url};
use crate::tree::parent_candidates;

#[tokio::test]
async fn user_with_identifiers_decodes() {
    let body = json!({
        "id": 5,
        "email": "sub@example.net",
        "full_name": "Sub Scriber",
        "groups": [{"id": 1, "name": "Residential", "allow_any_nas": true}],
        "identifiers": [{
            "id": 8,
            "identifier_type": {"id": 1, "name": "Password", "code": "PWD"},
            "value": "sub01",
            "is_enabled": true,
            "auth_attribute_group": {"id": 2, "name": "100M", "is_system": false},
            "expiration_date": null
        }],
        "last_login": null
    });
    let (transport, gw) = signed_in(move |_| ApiResponse::new(200, body.to_string()));

    let user = UserService::new(&gw).get(5).await.unwrap();
    assert_eq!(user.identifiers[0].identifier_type.code, "PWD");
    assert_eq!(user.identifiers[0].auth_attribute_group.as_ref().map(|g| g.name.as_str()), Some("100M"));
    assert!(user.groups[0].allow_any_nas);
    assert_eq!(only_request(&transport).url, url("/users/users/5/"));
}

#[tokio::test]
async fn group_list_all_hits_unpaged_route() {
    let (transport, gw) = replying(200, r#"[{"id":1,"name":"Residential"}]"#);
    let groups = UserGroupService::new(&gw).list_all().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(only_request(&transport).url, url("/users/groups/list_all/"));
}

#[tokio::test]
async fn flattened_tree_feeds_parent_picker() {
    let tree = json!([
        {"id": 1, "name": "All", "children": [
            {"id": 2, "name": "Business", "children": [{"id": 3, "name": "SMB"}]},
            {"id": 4, "name": "Residential"}
        ]}
    ]);
    let (_, gw) = signed_in(move |_| ApiResponse::new(200, tree.to_string()));

    let flat = UserGroupService::new(&gw).flattened_tree().await.unwrap();
    let names: Vec<&str> = flat.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["All", "Business", "SMB", "Residential"]);

    let candidates: Vec<i64> = parent_candidates(&flat, 2).iter().map(|g| g.id).collect();
    assert_eq!(candidates, vec![1, 4]);
}

#[tokio::test]
async fn identifier_types_come_from_list_all() {
    let (transport, gw) = replying(
        200,
        r#"[{"id":1,"name":"Password","code":"PWD","description":""},{"id":2,"name":"MAC address","code":"MAC"}]"#,
    );

    let types = UserIdentifierTypeService::new(&gw).list_all().await.unwrap();
    let codes: Vec<&str> = types.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, vec!["PWD", "MAC"]);
    assert_eq!(only_request(&transport).url, url("/users/identifier-types/list_all/"));
}
