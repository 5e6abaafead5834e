mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use postnl_rs::async_trait;
use postnl_rs::entity::{GetLocation, GetNearestLocations, Location, Message};
use postnl_rs::{
    ApiMode, CacheStore, HttpResponse, LocationService, MemoryCache, MockClient, PostNLError,
    PostNLResult, ServiceConfig,
};

const NEAREST_LOCATIONS: &str = r#"{
  "GetLocationsResult": {
    "ResponseLocation": {
      "Address": {"City": "Hoofddorp", "Countrycode": "NL", "HouseNr": "9", "Street": "Kruisweg", "Zipcode": "2132 NA"},
      "DeliveryOptions": {"string": ["DO", "PG"]},
      "Distance": "240",
      "LocationCode": "161503",
      "Name": "C1000 Hoofddorp",
      "RetailNetworkID": "PNPNL-01"
    }
  }
}"#;

/// Returns garbage for every lookup and fails every save.
#[derive(Default)]
struct BrokenCache {
    saves: AtomicUsize,
}

#[async_trait]
impl CacheStore for BrokenCache {
    async fn get(&self, _key: &str) -> PostNLResult<Option<String>> {
        Ok(Some("not an http message".to_string()))
    }

    async fn save(&self, _key: &str, _value: String, _ttl: Option<Duration>) -> PostNLResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Err(PostNLError::Cache("disk full".to_string()))
    }

    async fn save_deferred(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> PostNLResult<()> {
        self.save(key, value, ttl).await
    }

    async fn commit(&self) -> PostNLResult<()> {
        Ok(())
    }
}

fn nearest_request() -> GetNearestLocations {
    GetNearestLocations::builder()
        .countrycode("NL")
        .location(
            Location::builder()
                .postalcode("2132WT")
                .delivery_options(vec!["PG".to_string()])
                .build(),
        )
        .message(Message::new())
        .build()
}

fn service(mock: &Arc<MockClient>, cache: Arc<dyn CacheStore>) -> LocationService {
    LocationService::new(
        ServiceConfig::builder()
            .api_key("test-api-key")
            .sandbox(true)
            .http_client(mock.clone())
            .cache(cache)
            .ttl(Duration::from_secs(600))
            .build(),
    )
}

#[tokio::test]
async fn cached_responses_are_decoded_like_fresh_ones() {
    let _guard = init_tracing_opentelemetry::TracingConfig::testing()
        .init_subscriber()
        .ok();

    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        NEAREST_LOCATIONS,
    )));
    let service = service(&mock, Arc::new(MemoryCache::new()));

    let fresh = service.get_nearest_locations(&nearest_request()).await.unwrap();
    let cached = service.get_nearest_locations(&nearest_request()).await.unwrap();
    assert_eq!(fresh, cached);
    assert_eq!(mock.request_count(), 1);

    let locations = fresh.get_locations_result.unwrap().response_location.unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].location_code.as_deref(), Some("161503"));
    assert_eq!(
        locations[0].delivery_options,
        Some(vec!["DO".to_string(), "PG".to_string()])
    );

    let request = &mock.requests()[0];
    assert_eq!(request.url.path(), "/shipment/v2_1/locations/nearest");
}

#[tokio::test]
async fn broken_caches_never_fail_an_operation() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        200,
        NEAREST_LOCATIONS,
    )));
    let cache = Arc::new(BrokenCache::default());
    let service = service(&mock, cache.clone());

    service.get_nearest_locations(&nearest_request()).await.unwrap();
    service.get_nearest_locations(&nearest_request()).await.unwrap();

    assert_eq!(mock.request_count(), 2);
    assert_eq!(cache.saves.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_responses_are_not_cached() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        500,
        r#"{"fault":{"faultstring":"Internal error"}}"#,
    )));
    let cache = Arc::new(MemoryCache::new());
    let service = service(&mock, cache.clone());
    let request = GetLocation::builder()
        .location_code("161503")
        .retail_network_id("PNPNL-01")
        .build();

    match service.get_location(&request).await {
        Err(PostNLError::Response { message, status }) => {
            assert_eq!(message, "Internal error");
            assert_eq!(status, Some(500));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn modes_switch_per_service() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(200, "{}")));
    let mut service = service(&mock, Arc::new(MemoryCache::new()));
    assert_eq!(service.api_mode(), ApiMode::Rest);

    service.set_api_mode(ApiMode::Soap);
    let request = service
        .adapter()
        .build_get_nearest_locations_request(&nearest_request())
        .unwrap();
    assert_eq!(
        request.header_value("SOAPAction"),
        Some("\"http://postnl.nl/cif/services/LocationWebService/ILocationWebService/GetNearestLocations\"")
    );
}
