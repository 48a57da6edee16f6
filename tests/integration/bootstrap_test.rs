//! Process bootstrap from configuration.

use sales_platform::{AppConfig, DocumentStore, EntityService, ErrorKind, ServiceProps};

#[tokio::test]
async fn test_bootstrap_memory_platform() {
    let config = AppConfig::from_toml(
        r#"
        [database]
        provider = "memory"
        collection_prefix = "boot_"

        [logging]
        level = "warn"
        format = "json"
        "#,
    )
    .unwrap();

    let platform = sales_platform::bootstrap(&config).await.unwrap();
    assert_eq!(platform.store().name(), "memory");
    assert!(platform.health_check().await.unwrap());

    // Nothing is seeded, so no business can be served.
    let err = EntityService::brands(platform.context(), ServiceProps::business("biz1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTenant);

    let err = sales_platform::bootstrap(&config).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);

    platform.shutdown().await;
}
