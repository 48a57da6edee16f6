//! End-to-end walk through a product's life in one tenant.

mod helpers;

use bson::doc;

use sales_platform::{EntityService, ErrorKind, ListQuery, ListSummary, ServiceProps};

#[tokio::test]
async fn test_product_lifecycle_in_one_business() {
    let app = helpers::TestApp::new().await;
    let products = EntityService::products(app.platform.context(), ServiceProps::business("biz1"))
        .await
        .unwrap();

    let empty = products.list(&ListQuery::all()).await.unwrap();
    assert_eq!(empty.summary.total, 0);

    let created = products
        .create(doc! { "product_name": "Widget" })
        .await
        .unwrap();
    let id = created.get_str("product_id").unwrap().to_string();
    assert!(id.starts_with("prod_"));
    assert_eq!(created.get_str("business_id").unwrap(), "biz1");
    assert_eq!(created.get_str("product_name").unwrap(), "Widget");
    assert!(!created.get_bool("is_deleted").unwrap());

    let listed = products.list(&ListQuery::all()).await.unwrap();
    assert_eq!(
        listed.summary,
        ListSummary {
            total: 1,
            filtered: 1,
            result: 1
        }
    );
    assert_eq!(listed.results[0], created);

    let found = products.find(r#"{"product_name": "Widget"}"#).await.unwrap();
    assert_eq!(found.get_str("product_id").unwrap(), id);

    let renamed = products
        .update(&id, doc! { "product_name": "Widget Pro" })
        .await
        .unwrap();
    assert_eq!(renamed.get_str("product_name").unwrap(), "Widget Pro");

    products.delete(&id, false).await.unwrap();
    assert_eq!(products.get(&id).await.unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(app.raw_matching("sales_products", "product_id", &id).len(), 1);

    assert_eq!(products.delete(&id, true).await.unwrap(), 1);
    assert!(app.raw_matching("sales_products", "product_id", &id).is_empty());

    products.close().await;
    assert_eq!(app.store.open_session_count(), 0);
}

#[tokio::test]
async fn test_typed_reads_of_a_customer_cart() {
    #[derive(Debug, serde::Deserialize)]
    struct Cart {
        cart_id: String,
        customer_id: String,
        quantity: i32,
    }

    let app = helpers::TestApp::new().await;
    let carts = app
        .service(
            sales_platform::catalog::CUSTOMER_CART,
            ServiceProps::customer("biz1", "cust1"),
        )
        .await;
    carts
        .create(doc! { "cart_id": "c1", "quantity": 3 })
        .await
        .unwrap();

    let cart: Cart = carts.get_as("c1").await.unwrap();
    assert_eq!(cart.cart_id, "c1");
    assert_eq!(cart.customer_id, "cust1");
    assert_eq!(cart.quantity, 3);

    let by_filter: Cart = carts.find_as(r#"{"quantity": 3}"#).await.unwrap();
    assert_eq!(by_filter.cart_id, "c1");
}
