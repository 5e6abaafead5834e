use super::Contract;
use crate::adapter::{AdapterSettings, LocationAdapter};
use crate::entity::{
    GetLocation, GetLocationsInArea, GetLocationsInAreaResponse, GetNearestLocations,
    GetNearestLocationsResponse,
};
use crate::http::{HttpRequest, HttpResponse};
use crate::wire::{NamespaceMap, Service};
use crate::PostNLResult;

const CONTRACT: Contract = Contract {
    service: Service::Location,
    path: "/shipment/${VERSION}/locations",
    namespaces: NamespaceMap {
        services: "http://postnl.nl/cif/services/LocationWebService/",
        domain: "http://postnl.nl/cif/domain/LocationWebService/",
    },
    interface: "http://postnl.nl/cif/services/LocationWebService/ILocationWebService",
};

/// Looks up pickup locations through the CIF SOAP API.
#[derive(Debug, Clone)]
pub struct LocationSoapAdapter {
    settings: AdapterSettings,
}

impl LocationSoapAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        LocationSoapAdapter { settings }
    }
}

impl LocationAdapter for LocationSoapAdapter {
    fn build_get_nearest_locations_request(
        &self,
        request: &GetNearestLocations,
    ) -> PostNLResult<HttpRequest> {
        super::build_request(
            &self.settings,
            &CONTRACT,
            "GetNearestLocations",
            "GetNearestLocations",
            request,
        )
    }

    fn process_get_nearest_locations_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetNearestLocationsResponse> {
        super::decode_response(&CONTRACT, response)
    }

    fn build_get_locations_in_area_request(
        &self,
        request: &GetLocationsInArea,
    ) -> PostNLResult<HttpRequest> {
        super::build_request(
            &self.settings,
            &CONTRACT,
            "GetLocationsInArea",
            "GetLocationsInArea",
            request,
        )
    }

    fn process_get_locations_in_area_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetLocationsInAreaResponse> {
        super::decode_response(&CONTRACT, response)
    }

    fn build_get_location_request(&self, request: &GetLocation) -> PostNLResult<HttpRequest> {
        super::build_request(&self.settings, &CONTRACT, "GetLocation", "GetLocation", request)
    }

    fn process_get_location_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetLocationsInAreaResponse> {
        super::decode_response(&CONTRACT, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ApiKey;

    #[test]
    fn repeated_locations_decode_in_order() {
        let adapter = LocationSoapAdapter::new(AdapterSettings {
            api_key: ApiKey::new("test"),
            sandbox: true,
            version: "v2_1".to_string(),
        });
        let response = HttpResponse::new(
            200,
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
              <s:Body>
                <GetNearestLocationsResponse xmlns="http://postnl.nl/cif/services/LocationWebService/"
                    xmlns:a="http://postnl.nl/cif/domain/LocationWebService/">
                  <a:GetLocationsResult>
                    <a:ResponseLocation><a:LocationCode>161503</a:LocationCode></a:ResponseLocation>
                    <a:ResponseLocation><a:LocationCode>171837</a:LocationCode></a:ResponseLocation>
                  </a:GetLocationsResult>
                </GetNearestLocationsResponse>
              </s:Body>
            </s:Envelope>"#,
        );

        let decoded = adapter.process_get_nearest_locations_response(&response).unwrap();
        let codes = decoded
            .get_locations_result
            .and_then(|result| result.response_location)
            .unwrap()
            .into_iter()
            .filter_map(|location| location.location_code)
            .collect::<Vec<_>>();
        assert_eq!(codes, ["161503", "171837"]);
    }
}
