//! Integration tests for create/update/delete lifecycle rules.

mod helpers;

use bson::doc;

use sales_platform::{ErrorKind, ListQuery, ServiceProps, catalog};

#[tokio::test]
async fn test_round_trip_adds_only_system_fields() {
    let app = helpers::TestApp::new().await;
    let service = app
        .service(catalog::BRAND, ServiceProps::business("biz1").with_actor("alice"))
        .await;

    let input = doc! { "brand_id": "acme", "brand_name": "Acme", "tags": ["a", "b"] };
    let created = service.create(input.clone()).await.unwrap();
    let fetched = service.get("acme").await.unwrap();
    assert_eq!(created, fetched);

    for (key, value) in &input {
        assert_eq!(fetched.get(key), Some(value), "field {key}");
    }
    assert_eq!(fetched.get_str("business_id").unwrap(), "biz1");
    assert!(!fetched.get_bool("is_deleted").unwrap());
    assert_eq!(fetched.get_str("created_by").unwrap(), "alice");
    assert!(fetched.get_datetime("created_at").is_ok());
    assert!(fetched.get_datetime("updated_at").is_ok());
    assert!(fetched.get("_id").is_none());

    let stored = app.raw_matching("sales_brands", "brand_id", "acme");
    assert!(stored[0].get_object_id("_id").is_ok());
}

#[tokio::test]
async fn test_client_audit_fields_are_replaced() {
    let app = helpers::TestApp::new().await;
    let service = app.service(catalog::BRAND, ServiceProps::business("biz1")).await;

    let created = service
        .create(doc! { "brand_id": "acme", "created_by": "mallory", "is_deleted": true })
        .await
        .unwrap();
    assert!(created.get("created_by").is_none());
    assert!(!created.get_bool("is_deleted").unwrap());
}

#[tokio::test]
async fn test_caller_ids_are_lowercased_and_generated_ids_prefixed() {
    let app = helpers::TestApp::new().await;
    let service = app.service(catalog::POLICY, ServiceProps::business("biz1")).await;

    let named = service.create(doc! { "policy_id": "X" }).await.unwrap();
    assert_eq!(named.get_str("policy_id").unwrap(), "x");

    let first = service.create(doc! {}).await.unwrap();
    let second = service.create(doc! {}).await.unwrap();
    let first_id = first.get_str("policy_id").unwrap();
    let second_id = second.get_str("policy_id").unwrap();
    assert!(first_id.starts_with("pol_"));
    assert!(second_id.starts_with("pol_"));
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn test_duplicate_id_in_scope_is_rejected() {
    let app = helpers::TestApp::new().await;
    let service = app.service(catalog::DEALER, ServiceProps::business("biz1")).await;
    service.create(doc! { "dealer_id": "d1" }).await.unwrap();

    let err = service.create(doc! { "dealer_id": "D1" }).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateKey);
    assert_eq!(app.raw("sales_dealer").len(), 1);
}

#[tokio::test]
async fn test_update_keeps_immutable_fields() {
    let app = helpers::TestApp::new().await;
    let service = app.service(catalog::CATEGORY, ServiceProps::business("biz1")).await;
    service
        .create(doc! { "category_id": "shoes", "category_name": "Shoes" })
        .await
        .unwrap();

    let updated = service
        .update(
            "shoes",
            doc! { "business_id": "biz2", "category_id": "boots", "category_name": "Footwear" },
        )
        .await
        .unwrap();
    assert_eq!(updated.get_str("business_id").unwrap(), "biz1");
    assert_eq!(updated.get_str("category_id").unwrap(), "shoes");
    assert_eq!(updated.get_str("category_name").unwrap(), "Footwear");

    let stored = app.raw("sales_category");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].get_str("business_id").unwrap(), "biz1");
    assert_eq!(stored[0].get_str("category_id").unwrap(), "shoes");
}

#[tokio::test]
async fn test_update_of_missing_record_is_not_found() {
    let app = helpers::TestApp::new().await;
    let service = app.service(catalog::CATEGORY, ServiceProps::business("biz1")).await;
    let err = service
        .update("ghost", doc! { "category_name": "x" })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_soft_delete_hides_but_keeps_document() {
    let app = helpers::TestApp::new().await;
    let service = app.service(catalog::MEDIA, ServiceProps::business("biz1")).await;
    service.create(doc! { "media_id": "m1" }).await.unwrap();

    service.delete("m1", false).await.unwrap();

    assert_eq!(service.get("m1").await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(service.list(&ListQuery::all()).await.unwrap().summary.total, 0);

    let stored = app.raw_matching("sales_media", "media_id", "m1");
    assert_eq!(stored.len(), 1);
    assert!(stored[0].get_bool("is_deleted").unwrap());

    let with_deleted = service.list_deleted(&ListQuery::all()).await.unwrap();
    assert_eq!(with_deleted.summary.total, 1);
    assert_eq!(with_deleted.results[0].get_str("media_id").unwrap(), "m1");
}

#[tokio::test]
async fn test_permanent_delete_removes_document() {
    let app = helpers::TestApp::new().await;
    let service = app.service(catalog::MEDIA, ServiceProps::business("biz1")).await;
    service.create(doc! { "media_id": "m1" }).await.unwrap();

    assert_eq!(service.delete("M1", true).await.unwrap(), 1);
    assert_eq!(service.get("m1").await.unwrap_err().kind, ErrorKind::NotFound);
    assert!(app.raw_matching("sales_media", "media_id", "m1").is_empty());
}

#[tokio::test]
async fn test_closed_service_rejects_calls_and_releases_session() {
    let app = helpers::TestApp::new().await;
    let service = app.service(catalog::BANNER, ServiceProps::business("biz1")).await;
    assert_eq!(app.store.open_session_count(), 1);

    service.close().await;
    assert_eq!(app.store.open_session_count(), 0);
    assert_eq!(service.get("b1").await.unwrap_err().kind, ErrorKind::ClosedService);
    assert_eq!(
        service.delete("b1", true).await.unwrap_err().kind,
        ErrorKind::ClosedService
    );
}
