//! Calls against the PostNL sandbox. Needs `POSTNL_API_KEY` in `tests/.env`.

mod common;

use postnl_rs::entity::{Address, Shipment};
use postnl_rs::{ApiMode, PostNL};

fn sandbox_client(mode: ApiMode) -> PostNL {
    dotenvy::from_filename("tests/.env").ok();

    PostNL::builder()
        .customer(common::customer())
        .api_key(std::env::var("POSTNL_API_KEY").unwrap().as_str())
        .sandbox(true)
        .mode(mode)
        .build()
}

#[tokio::test]
#[ignore = "needs sandbox credentials"]
async fn test_sandbox_label() {
    let _guard = init_tracing_opentelemetry::TracingConfig::testing()
        .init_subscriber()
        .unwrap();

    for mode in [ApiMode::Rest, ApiMode::Soap] {
        let client = sandbox_client(mode);
        let barcode = client.generate_barcode("3S", None, None, false).await.unwrap();
        assert!(barcode.starts_with("3SDEVC"));

        let labels = client
            .generate_label(
                Shipment::builder()
                    .addresses(vec![Address::builder()
                        .address_type("01")
                        .city("Utrecht")
                        .countrycode("NL")
                        .first_name("Peter")
                        .house_nr("9")
                        .name("de Ruijter")
                        .street("Bilderdijkstraat")
                        .zipcode("3521VA")
                        .build()])
                    .barcode(barcode.as_str())
                    .delivery_address("01")
                    .product_code_delivery("3085")
                    .build(),
                None,
                false,
            )
            .await
            .unwrap();
        let shipments = labels.response_shipments.unwrap();
        assert_eq!(shipments[0].barcode.as_deref(), Some(barcode.as_str()));
    }
}

#[tokio::test]
#[ignore = "needs sandbox credentials"]
async fn test_sandbox_status() {
    let client = sandbox_client(ApiMode::Rest);
    let result = client.current_status_by_barcode("3SDEVC201611210").await;
    assert!(result.is_ok() || matches!(result, Err(postnl_rs::PostNLError::NotFound(_))));
}
