#![allow(dead_code)]

use std::sync::Arc;

use postnl_rs::entity::{Address, Customer};
use postnl_rs::{CacheStore, HttpClient, MockClient, PostNL};

pub fn customer() -> Customer {
    Customer::builder()
        .collection_location("123456")
        .customer_code("DEVC")
        .customer_number("11223344")
        .contact_person("Test")
        .address(
            Address::builder()
                .address_type("02")
                .city("Hoofddorp")
                .company_name("PostNL")
                .countrycode("NL")
                .house_nr("42")
                .street("Siriusdreef")
                .zipcode("2132WT")
                .build(),
        )
        .global_pack_customer_code("1234")
        .global_pack_barcode_type("AB")
        .build()
}

pub fn client(mock: &Arc<MockClient>) -> PostNL {
    let http_client: Arc<dyn HttpClient> = mock.clone();
    PostNL::builder()
        .customer(customer())
        .api_key("test-api-key")
        .sandbox(true)
        .http_client(http_client)
        .build()
}

pub fn cached_client(mock: &Arc<MockClient>, cache: Arc<dyn CacheStore>) -> PostNL {
    let http_client: Arc<dyn HttpClient> = mock.clone();
    PostNL::builder()
        .customer(customer())
        .api_key("test-api-key")
        .sandbox(true)
        .http_client(http_client)
        .cache(cache)
        .build()
}
