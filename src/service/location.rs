use super::{cache_key, dual_mode_service, ServiceConfig};
use crate::adapter::rest::LocationRestAdapter;
use crate::adapter::soap::LocationSoapAdapter;
use crate::adapter::{ApiMode, LocationAdapter};
use crate::entity::{
    GetLocation, GetLocationsInArea, GetLocationsInAreaResponse, GetNearestLocations,
    GetNearestLocationsResponse,
};
use crate::wire::Service;
use crate::PostNLResult;

/// Looks up pickup locations.
#[derive(Debug, Clone)]
pub struct LocationService {
    config: ServiceConfig,
    mode: ApiMode,
    rest: LocationRestAdapter,
    soap: LocationSoapAdapter,
}

dual_mode_service!(
    LocationService,
    Service::Location,
    LocationAdapter,
    LocationRestAdapter,
    LocationSoapAdapter
);

impl LocationService {
    /// Finds the locations nearest to an address or coordinate.
    #[tracing::instrument(skip_all)]
    pub async fn get_nearest_locations(
        &self,
        request: &GetNearestLocations,
    ) -> PostNLResult<GetNearestLocationsResponse> {
        let adapter = self.adapter();
        let key = cache_key("nearest_locations", Service::Location, request, None, self.mode, "");
        self.config
            .call(
                "get_nearest_locations",
                Some(key),
                || adapter.build_get_nearest_locations_request(request),
                |response| adapter.process_get_nearest_locations_response(response),
            )
            .await
    }

    /// Finds the locations inside a rectangle of coordinates.
    #[tracing::instrument(skip_all)]
    pub async fn get_locations_in_area(
        &self,
        request: &GetLocationsInArea,
    ) -> PostNLResult<GetLocationsInAreaResponse> {
        let adapter = self.adapter();
        let key = cache_key("locations_in_area", Service::Location, request, None, self.mode, "");
        self.config
            .call(
                "get_locations_in_area",
                Some(key),
                || adapter.build_get_locations_in_area_request(request),
                |response| adapter.process_get_locations_in_area_response(response),
            )
            .await
    }

    /// Looks up a single location by its code.
    #[tracing::instrument(skip_all)]
    pub async fn get_location(
        &self,
        request: &GetLocation,
    ) -> PostNLResult<GetLocationsInAreaResponse> {
        let adapter = self.adapter();
        let key = cache_key("location", Service::Location, request, None, self.mode, "");
        self.config
            .call(
                "get_location",
                Some(key),
                || adapter.build_get_location_request(request),
                |response| adapter.process_get_location_response(response),
            )
            .await
    }
}
