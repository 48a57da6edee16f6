//! Integration tests for list pagination and filter handling.

mod helpers;

use bson::doc;

use sales_platform::{AppConfig, ErrorKind, ListQuery, ListSummary, ServiceProps, catalog};

async fn seeded_products(app: &helpers::TestApp) -> sales_platform::EntityService {
    let service = app.service(catalog::PRODUCT, ServiceProps::business("biz1")).await;
    for n in 1..=10 {
        let color = if n % 3 == 0 { "red" } else { "blue" };
        service
            .create(doc! { "product_id": format!("p{n:02}"), "price": n * 10, "color": color })
            .await
            .unwrap();
    }
    service
}

#[tokio::test]
async fn test_counts_without_paging() {
    let app = helpers::TestApp::new().await;
    let service = seeded_products(&app).await;

    let listed = service
        .list(&ListQuery::new(r#"{"color": "red"}"#, "", 0, 0))
        .await
        .unwrap();
    assert_eq!(
        listed.summary,
        ListSummary {
            total: 10,
            filtered: 3,
            result: 3
        }
    );
}

#[tokio::test]
async fn test_counts_with_paging() {
    let app = helpers::TestApp::new().await;
    let service = seeded_products(&app).await;
    let filter = r#"{"color": "blue"}"#;

    for (skip, limit, expected) in [(0, 3, 3), (5, 3, 2), (7, 3, 0), (2, 0, 5)] {
        let listed = service
            .list(&ListQuery::new(filter, r#"{"price": 1}"#, skip, limit))
            .await
            .unwrap();
        assert_eq!(listed.summary.total, 10);
        assert_eq!(listed.summary.filtered, 7);
        assert_eq!(listed.summary.result, expected, "skip={skip} limit={limit}");
    }
}

#[tokio::test]
async fn test_sort_and_typed_filters() {
    let app = helpers::TestApp::new().await;
    let service = seeded_products(&app).await;

    let listed = service
        .list(&ListQuery::new(
            r#"{"price": {"$gte": 50}}"#,
            r#"{"price": -1}"#,
            0,
            2,
        ))
        .await
        .unwrap();
    assert_eq!(listed.summary.filtered, 6);
    let ids: Vec<&str> = listed
        .results
        .iter()
        .map(|r| r.get_str("product_id").unwrap())
        .collect();
    assert_eq!(ids, vec!["p10", "p09"]);
}

#[tokio::test]
async fn test_soft_deleted_records_leave_counts() {
    let app = helpers::TestApp::new().await;
    let service = seeded_products(&app).await;
    service.delete("p03", false).await.unwrap();

    let listed = service
        .list(&ListQuery::new(r#"{"color": "red"}"#, "", 0, 0))
        .await
        .unwrap();
    assert_eq!(listed.summary.total, 9);
    assert_eq!(listed.summary.filtered, 2);
}

#[tokio::test]
async fn test_malformed_filter_is_lenient_by_default() {
    let app = helpers::TestApp::new().await;
    let service = seeded_products(&app).await;

    let listed = service
        .list(&ListQuery::new("{color: red", "not a sort", 0, 0))
        .await
        .unwrap();
    assert_eq!(listed.summary.filtered, 10);
}

#[tokio::test]
async fn test_find_with_malformed_filter_is_lenient_by_default() {
    let app = helpers::TestApp::new().await;
    let service = seeded_products(&app).await;
    let other = app.service(catalog::PRODUCT, ServiceProps::business("biz2")).await;
    other.create(doc! { "product_id": "elsewhere" }).await.unwrap();
    service.delete("p01", false).await.unwrap();

    let found = service.find("{oops").await.unwrap();
    assert_eq!(found.get_str("business_id").unwrap(), "biz1");
    assert_ne!(found.get_str("product_id").unwrap(), "p01");
    assert!(!found.get_bool("is_deleted").unwrap());
}

#[tokio::test]
async fn test_malformed_filter_fails_when_strict() {
    let mut config = AppConfig::default();
    config.repository.strict_filters = true;
    let app = helpers::TestApp::with_config(config).await;
    let service = app.service(catalog::PRODUCT, ServiceProps::business("biz1")).await;

    let err = service
        .list(&ListQuery::new("{color: red", "", 0, 0))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedFilter);

    let err = service.find("[]").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedFilter);
}

#[tokio::test]
async fn test_response_json_shape() {
    let app = helpers::TestApp::new().await;
    let service = seeded_products(&app).await;

    let listed = service
        .list(&ListQuery::new(r#"{"product_id": "p01"}"#, "", 0, 0))
        .await
        .unwrap();
    let json = listed.to_json();
    assert_eq!(json["summary"]["total"], 10);
    assert_eq!(json["summary"]["filtered"], 1);
    assert_eq!(json["summary"]["result"], 1);
    assert_eq!(json["results"][0]["product_id"], "p01");
    assert_eq!(json["results"][0]["price"], 10);
}
