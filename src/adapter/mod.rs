//! Protocol adapters.
//!
//! Every service has one adapter trait with a REST and a SOAP implementation. Adapters only
//! translate between entities and [`HttpRequest`]/[`HttpResponse`]; dispatching, caching and
//! failure mapping are left to [`crate::service`].

use url::Url;

use crate::credentials::ApiKey;
use crate::entity::{
    CompleteStatus, CompleteStatusResponse, Confirming, ConfirmingResponseShipment, Customer,
    CurrentStatus, CurrentStatusResponse, GenerateBarcode, GenerateBarcodeResponse, GenerateLabel,
    GenerateLabelResponse, GetDeliveryDate, GetDeliveryDateResponse, GetLocation,
    GetLocationsInArea, GetLocationsInAreaResponse, GetNearestLocations,
    GetNearestLocationsResponse, GetSentDateRequest, GetSentDateResponse, GetSignature,
    GetSignatureResponseSignature, GetTimeframes, ResponseTimeframes, UpdatedShipmentsResponse,
};
use crate::http::{HttpRequest, HttpResponse};
use crate::wire::Service;
use crate::PostNLResult;

/// Module containing the REST adapters.
pub mod rest;
/// Module containing the SOAP adapters.
pub mod soap;

/// Base URL of the production API.
pub const LIVE_BASE_URL: &str = "https://api.postnl.nl";
/// Base URL of the sandbox API.
pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.postnl.nl";

/// The wire protocol used to talk to a service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiMode {
    /// JSON over REST.
    #[default]
    Rest,
    /// XML over SOAP.
    Soap,
}

/// Settings shared by every adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    /// The API key.
    pub api_key: ApiKey,
    /// Whether requests go to the sandbox.
    pub sandbox: bool,
    /// API version substituted for `${VERSION}` in endpoint paths.
    pub version: String,
}

impl AdapterSettings {
    /// Resolves an endpoint path such as `/shipment/${VERSION}/barcode`.
    pub fn endpoint(&self, path: &str) -> PostNLResult<Url> {
        let base = if self.sandbox {
            SANDBOX_BASE_URL
        } else {
            LIVE_BASE_URL
        };
        Ok(Url::parse(&format!(
            "{base}{}",
            path.replace("${VERSION}", &self.version)
        ))?)
    }
}

/// The API version used when none is configured.
pub fn default_version(service: Service) -> &'static str {
    match service {
        Service::Barcode => "v1_1",
        Service::Confirming => "v2",
        Service::Labelling => "v2_2",
        Service::DeliveryDate => "v2_2",
        Service::Location => "v2_1",
        Service::Timeframe => "v2_1",
        Service::ShippingStatus => "v2",
    }
}

/// Adapter of the barcode service.
pub trait BarcodeAdapter: Send + Sync {
    /// Builds the request generating one barcode.
    fn build_generate_barcode_request(&self, request: &GenerateBarcode) -> PostNLResult<HttpRequest>;
    /// Decodes a generated barcode.
    fn process_generate_barcode_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GenerateBarcodeResponse>;
}

/// Adapter of the confirming service.
pub trait ConfirmingAdapter: Send + Sync {
    /// Builds the request confirming shipments.
    fn build_confirm_request(&self, request: &Confirming) -> PostNLResult<HttpRequest>;
    /// Decodes a confirmation.
    fn process_confirm_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<ConfirmingResponseShipment>;
}

/// Adapter of the labelling service.
pub trait LabellingAdapter: Send + Sync {
    /// Builds the request generating labels, optionally confirming the shipments.
    fn build_generate_label_request(
        &self,
        request: &GenerateLabel,
        confirm: bool,
    ) -> PostNLResult<HttpRequest>;
    /// Decodes generated labels.
    fn process_generate_label_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GenerateLabelResponse>;
}

/// Adapter of the delivery date service.
pub trait DeliveryDateAdapter: Send + Sync {
    /// Builds the delivery date calculation.
    fn build_get_delivery_date_request(&self, request: &GetDeliveryDate)
        -> PostNLResult<HttpRequest>;
    /// Decodes a delivery date.
    fn process_get_delivery_date_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetDeliveryDateResponse>;
    /// Builds the sent date calculation.
    fn build_get_sent_date_request(&self, request: &GetSentDateRequest)
        -> PostNLResult<HttpRequest>;
    /// Decodes a sent date.
    fn process_get_sent_date_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetSentDateResponse>;
}

/// Adapter of the location service.
pub trait LocationAdapter: Send + Sync {
    /// Builds the lookup of the locations nearest to an address.
    fn build_get_nearest_locations_request(
        &self,
        request: &GetNearestLocations,
    ) -> PostNLResult<HttpRequest>;
    /// Decodes the nearest locations.
    fn process_get_nearest_locations_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetNearestLocationsResponse>;
    /// Builds the lookup of the locations inside an area.
    fn build_get_locations_in_area_request(
        &self,
        request: &GetLocationsInArea,
    ) -> PostNLResult<HttpRequest>;
    /// Decodes the locations inside an area.
    fn process_get_locations_in_area_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetLocationsInAreaResponse>;
    /// Builds the lookup of a single location.
    fn build_get_location_request(&self, request: &GetLocation) -> PostNLResult<HttpRequest>;
    /// Decodes a single location.
    fn process_get_location_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetLocationsInAreaResponse>;
}

/// Adapter of the timeframe service.
pub trait TimeframeAdapter: Send + Sync {
    /// Builds the timeframe calculation.
    fn build_get_timeframes_request(&self, request: &GetTimeframes) -> PostNLResult<HttpRequest>;
    /// Decodes timeframes.
    fn process_get_timeframes_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<ResponseTimeframes>;
}

/// Adapter of the shipping status service.
pub trait ShippingStatusAdapter: Send + Sync {
    /// Builds the current status lookup.
    fn build_current_status_request(&self, request: &CurrentStatus) -> PostNLResult<HttpRequest>;
    /// Decodes a current status.
    fn process_current_status_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<CurrentStatusResponse>;
    /// Builds the complete status lookup.
    fn build_complete_status_request(&self, request: &CompleteStatus)
        -> PostNLResult<HttpRequest>;
    /// Decodes a complete status.
    fn process_complete_status_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<CompleteStatusResponse>;
    /// Builds the signature lookup.
    fn build_get_signature_request(&self, request: &GetSignature) -> PostNLResult<HttpRequest>;
    /// Decodes a signature.
    fn process_get_signature_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetSignatureResponseSignature>;
    /// Builds the lookup of shipments updated within a period.
    fn build_get_updated_shipments_request(
        &self,
        customer: &Customer,
        period: Option<(chrono::NaiveDateTime, chrono::NaiveDateTime)>,
    ) -> PostNLResult<HttpRequest>;
    /// Decodes updated shipments.
    fn process_get_updated_shipments_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<Vec<UpdatedShipmentsResponse>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_versioned_per_environment() {
        let mut settings = AdapterSettings {
            api_key: ApiKey::new("test"),
            sandbox: false,
            version: default_version(Service::Labelling).to_string(),
        };
        assert_eq!(
            settings.endpoint("/shipment/${VERSION}/label").unwrap().as_str(),
            "https://api.postnl.nl/shipment/v2_2/label"
        );

        settings.sandbox = true;
        settings.version = "v2_1".to_string();
        assert_eq!(
            settings.endpoint("/shipment/${VERSION}/label").unwrap().as_str(),
            "https://api-sandbox.postnl.nl/shipment/v2_1/label"
        );
    }
}
