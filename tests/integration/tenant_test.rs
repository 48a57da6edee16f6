//! Integration tests for tenant and customer isolation.

mod helpers;

use bson::doc;

use sales_platform::{ErrorKind, ListQuery, ServiceProps, catalog};

#[tokio::test]
async fn test_same_id_in_two_tenants_stays_isolated() {
    let app = helpers::TestApp::new().await;
    let biz1 = app.service(catalog::BRAND, ServiceProps::business("biz1")).await;
    let biz2 = app.service(catalog::BRAND, ServiceProps::business("biz2")).await;

    biz1.create(doc! { "brand_id": "acme", "brand_name": "Acme One" }).await.unwrap();
    biz2.create(doc! { "brand_id": "acme", "brand_name": "Acme Two" }).await.unwrap();

    let one = biz1.get("acme").await.unwrap();
    assert_eq!(one.get_str("brand_name").unwrap(), "Acme One");

    let listed = biz1.list(&ListQuery::all()).await.unwrap();
    assert_eq!(listed.summary.total, 1);
    assert!(
        listed
            .results
            .iter()
            .all(|r| r.get_str("business_id").unwrap() == "biz1")
    );
}

#[tokio::test]
async fn test_writes_cannot_reach_another_tenant() {
    let app = helpers::TestApp::new().await;
    let biz1 = app.service(catalog::PRODUCT, ServiceProps::business("biz1")).await;
    let biz2 = app.service(catalog::PRODUCT, ServiceProps::business("biz2")).await;
    biz1.create(doc! { "product_id": "p1", "product_name": "Widget" }).await.unwrap();

    let err = biz2
        .update("p1", doc! { "product_name": "Hijacked" })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(biz2.delete("p1", true).await.unwrap(), 0);
    assert_eq!(biz2.delete("p1", false).await.unwrap_err().kind, ErrorKind::NotFound);

    let untouched = biz1.get("p1").await.unwrap();
    assert_eq!(untouched.get_str("product_name").unwrap(), "Widget");
}

#[tokio::test]
async fn test_filter_cannot_widen_scope() {
    let app = helpers::TestApp::new().await;
    let biz1 = app.service(catalog::BRAND, ServiceProps::business("biz1")).await;
    let biz2 = app.service(catalog::BRAND, ServiceProps::business("biz2")).await;
    biz2.create(doc! { "brand_id": "other" }).await.unwrap();

    let query = ListQuery::new(r#"{"$or": [{"business_id": "biz2"}, {"is_deleted": true}]}"#, "", 0, 0);
    let listed = biz1.list(&query).await.unwrap();
    assert_eq!(listed.summary.filtered, 0);

    let err = biz1.find(r#"{"business_id": "biz2"}"#).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_customer_carts_are_private() {
    let app = helpers::TestApp::new().await;
    let cust1 = app
        .service(catalog::CART, ServiceProps::customer("biz1", "cust1"))
        .await;
    let cust2 = app
        .service(catalog::CART, ServiceProps::customer("biz1", "cust2"))
        .await;

    let line = cust1.create(doc! { "product_id": "p1", "qty": 2 }).await.unwrap();
    let cart_id = line.get_str("cart_id").unwrap().to_string();
    assert!(cart_id.starts_with("crt_"));
    assert_eq!(line.get_str("customer_id").unwrap(), "cust1");

    assert_eq!(cust2.get(&cart_id).await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(cust2.list(&ListQuery::all()).await.unwrap().summary.total, 0);
}

#[tokio::test]
async fn test_unknown_tenant_and_customer_are_rejected() {
    let app = helpers::TestApp::new().await;
    let ctx = app.platform.context();

    let err = sales_platform::EntityService::products(ctx, ServiceProps::business("nope"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTenant);
    assert_eq!(err.message, "Invalid business_id");

    let err = sales_platform::EntityService::customer_wishlists(
        ctx,
        ServiceProps::customer("biz2", "cust1"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidCustomer);
    assert_eq!(app.store.open_session_count(), 0);
}
