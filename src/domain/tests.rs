use std::net::Ipv4Addr;

use serde_json::{Value as JsonValue, json};

use crate::domain::*;

#[test]
fn test_domain_deserializing() {
    let body = r#"{
        "id": 1119443,
        "name": "example.com",
        "created": 1416355200000,
        "updated": 1416434633044,
        "gtdEnabled": false,
        "folderId": 1890,
        "pendingActionId": 0,
        "processMulti": false,
        "activeThirdParties": [],
        "delegateNameServers": ["ns0.dnsmadeeasy.com.", "ns1.dnsmadeeasy.com."],
        "nameServers": [
            {"fqdn": "ns0.dnsmadeeasy.com", "ipv4": "208.94.148.2", "ipv6": "2600:1800:0::1"},
            {"fqdn": "ns1.dnsmadeeasy.com", "ipv4": "", "ipv6": ""},
            {"fqdn": "ns2.dnsmadeeasy.com"}
        ]
    }"#;

    let domain: Domain = serde_json::from_str(body).unwrap();
    assert_eq!(domain.id, Some(1119443));
    assert_eq!(domain.name, "example.com");
    assert_eq!(domain.created, 1416355200000);
    assert_eq!(domain.updated, 1416434633044);
    assert_eq!(domain.folder_id, 1890);
    assert_eq!(domain.delegate_name_servers.len(), 2);

    assert_eq!(domain.name_servers.len(), 3);
    assert_eq!(
        domain.name_servers[0].ipv4,
        Some(Ipv4Addr::new(208, 94, 148, 2))
    );
    assert_eq!(
        domain.name_servers[0].ipv6,
        Some("2600:1800:0::1".parse().unwrap())
    );
    assert_eq!(domain.name_servers[1].ipv4, None);
    assert_eq!(domain.name_servers[1].ipv6, None);
    assert_eq!(domain.name_servers[2].fqdn, "ns2.dnsmadeeasy.com");
    assert_eq!(domain.name_servers[2].ipv4, None);
}

#[test]
fn test_domain_defaults() {
    let domain: Domain = serde_json::from_str(r#"{"name": "example.com"}"#).unwrap();
    assert_eq!(domain.id, None);
    assert_eq!(domain.name, "example.com");
    assert!(domain.name_servers.is_empty());
    assert!(!domain.gtd_enabled);

    let serialized = serde_json::to_value(&domain).unwrap();
    assert!(serialized.get("id").is_none());
}

#[test]
fn test_domain_null_fields_default() {
    let domain: Domain = serde_json::from_value(json!({
        "id": 1119443,
        "name": "example.com",
        "created": null,
        "updated": null,
        "gtdEnabled": null,
        "nameServers": null,
        "delegateNameServers": null,
        "activeThirdParties": null,
        "pendingActionId": null,
        "processMulti": null,
        "folderId": null
    }))
    .unwrap();

    assert_eq!(
        domain,
        Domain {
            id: Some(1119443),
            name: "example.com".to_string(),
            ..Default::default()
        }
    );
}

#[test]
fn test_domain_list_deserializing() {
    let body = r#"{
        "totalRecords": 2,
        "totalPages": 1,
        "page": 0,
        "data": [
            {"id": 1, "name": "a.com"},
            {"id": 2, "name": "b.com", "gtdEnabled": true}
        ]
    }"#;

    let list: DomainList = serde_json::from_str(body).unwrap();
    assert_eq!(list.total_records, 2);
    assert_eq!(list.total_pages, 1);
    assert_eq!(list.page, 0);
    assert_eq!(list.domains.len(), 2);
    assert_eq!(list.domains[0].name, "a.com");
    assert!(list.domains[1].gtd_enabled);
}

#[test]
fn test_domain_update_payload() {
    let update = DomainUpdate::new()
        .gtd_enabled(false)
        .folder_id(12)
        .transfer_acl_id(5);

    assert_eq!(
        JsonValue::from(update.to_payload(&[10, 11])),
        json!({"ids": [10, 11], "gtdEnabled": false, "folderId": 12, "transferAclId": 5})
    );
}

#[test]
fn test_domain_update_extra_fields() {
    let update = DomainUpdate::new()
        .soa_id(3)
        .field("soaId", 99)
        .field("ids", json!([1]))
        .field("newSetting", "on");

    assert_eq!(
        JsonValue::from(update.to_payload(&[42])),
        json!({"ids": [42], "soaId": 3, "newSetting": "on"})
    );
}

#[test]
fn test_domain_update_is_empty() {
    assert!(DomainUpdate::new().is_empty());
    assert!(!DomainUpdate::new().vanity_id(1).is_empty());
    assert!(!DomainUpdate::new().field("x", 1).is_empty());
    assert_eq!(
        JsonValue::from(DomainUpdate::new().to_payload(&[])),
        json!({"ids": []})
    );
}
