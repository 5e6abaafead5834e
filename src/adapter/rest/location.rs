use chrono::NaiveTime;

use crate::adapter::{AdapterSettings, LocationAdapter};
use crate::entity::{
    Coordinates, GetLocation, GetLocationsInArea, GetLocationsInAreaResponse, GetNearestLocations,
    GetNearestLocationsResponse, Location,
};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Parameters;
use crate::wire::format_date;
use crate::{PostNLError, PostNLResult};

const NEAREST_ENDPOINT: &str = "/shipment/${VERSION}/locations/nearest";
const AREA_ENDPOINT: &str = "/shipment/${VERSION}/locations/area";
const LOOKUP_ENDPOINT: &str = "/shipment/${VERSION}/locations/lookup";

/// Looks up pickup locations through the REST API.
#[derive(Debug, Clone)]
pub struct LocationRestAdapter {
    settings: AdapterSettings,
}

impl LocationRestAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        LocationRestAdapter { settings }
    }
}

/// `PG` followed by the other requested delivery options.
fn delivery_options(location: &Location) -> String {
    std::iter::once("PG")
        .chain(
            location
                .delivery_options
                .iter()
                .flatten()
                .map(String::as_str)
                .filter(|option| !option.eq_ignore_ascii_case("PG") && !option.is_empty()),
        )
        .collect::<Vec<_>>()
        .join(",")
}

fn opening_time(location: &Location) -> PostNLResult<Option<String>> {
    let Some(time) = location.opening_time.as_deref().filter(|time| !time.is_empty()) else {
        return Ok(None);
    };
    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map(|parsed| Some(parsed.format("%H:%M:00").to_string()))
        .map_err(|_| PostNLError::InvalidArgument(format!("invalid opening time `{time}`")))
}

fn with_schedule(params: Parameters, location: &Location) -> PostNLResult<Parameters> {
    Ok(params
        .param_opt("DeliveryDate", location.delivery_date.as_ref().map(format_date))
        .param_opt("OpeningTime", opening_time(location)?)
        .param("DeliveryOptions", delivery_options(location)))
}

fn corner<'a>(corner: Option<&'a Coordinates>, name: &str) -> PostNLResult<(&'a str, &'a str)> {
    corner
        .and_then(|coordinates| {
            Some((
                coordinates.latitude.as_deref()?,
                coordinates.longitude.as_deref()?,
            ))
        })
        .ok_or_else(|| PostNLError::InvalidArgument(format!("{name} coordinates are required")))
}

impl LocationAdapter for LocationRestAdapter {
    fn build_get_nearest_locations_request(
        &self,
        request: &GetNearestLocations,
    ) -> PostNLResult<HttpRequest> {
        let location = request
            .location
            .as_ref()
            .ok_or_else(|| PostNLError::InvalidArgument("a location is required".into()))?;
        let params = Parameters::new()
            .param_opt("CountryCode", request.countrycode.as_deref())
            .param_opt("PostalCode", location.postalcode.as_deref())
            .param_opt("City", location.city.as_deref())
            .param_opt("Street", location.street.as_deref())
            .param_opt("HouseNumber", location.house_nr.as_deref());
        let params = with_schedule(params, location)?;

        super::get(&self.settings, NEAREST_ENDPOINT, &params)
    }

    fn process_get_nearest_locations_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetNearestLocationsResponse> {
        super::decode_unwrapped(response)
    }

    fn build_get_locations_in_area_request(
        &self,
        request: &GetLocationsInArea,
    ) -> PostNLResult<HttpRequest> {
        let location = request
            .location
            .as_ref()
            .ok_or_else(|| PostNLError::InvalidArgument("a location is required".into()))?;
        let (north, west) = corner(location.coordinates_north_west.as_ref(), "north-west")?;
        let (south, east) = corner(location.coordinates_south_east.as_ref(), "south-east")?;
        let params = Parameters::new()
            .param("LatitudeNorth", north)
            .param("LongitudeWest", west)
            .param("LatitudeSouth", south)
            .param("LongitudeEast", east)
            .param_opt("CountryCode", request.countrycode.as_deref());
        let params = with_schedule(params, location)?;

        super::get(&self.settings, AREA_ENDPOINT, &params)
    }

    fn process_get_locations_in_area_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetLocationsInAreaResponse> {
        super::decode_unwrapped(response)
    }

    fn build_get_location_request(&self, request: &GetLocation) -> PostNLResult<HttpRequest> {
        let code = request
            .location_code
            .as_deref()
            .ok_or_else(|| PostNLError::InvalidArgument("a location code is required".into()))?;
        let params = Parameters::new()
            .param("LocationCode", code)
            .param_opt("RetailNetworkID", request.retail_network_id.as_deref());

        super::get(&self.settings, LOOKUP_ENDPOINT, &params)
    }

    fn process_get_location_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetLocationsInAreaResponse> {
        super::decode_unwrapped(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ApiKey;

    fn adapter() -> LocationRestAdapter {
        LocationRestAdapter::new(AdapterSettings {
            api_key: ApiKey::new("test"),
            sandbox: true,
            version: "v2_1".to_string(),
        })
    }

    #[test]
    fn nearest_locations_query() {
        let request = GetNearestLocations::builder()
            .countrycode("NL")
            .location(
                Location::builder()
                    .postalcode("2132WT")
                    .house_nr("42")
                    .opening_time("09:00")
                    .delivery_options(vec!["PG".to_string(), "PGE".to_string()])
                    .build(),
            )
            .build();

        let built = adapter().build_get_nearest_locations_request(&request).unwrap();
        assert_eq!(built.url.path(), "/shipment/v2_1/locations/nearest");
        assert_eq!(
            built.url.query(),
            Some("CountryCode=NL&PostalCode=2132WT&HouseNumber=42&OpeningTime=09%3A00%3A00&DeliveryOptions=PG%2CPGE")
        );
    }

    #[test]
    fn area_requires_both_corners() {
        let request = GetLocationsInArea::builder()
            .countrycode("NL")
            .location(
                Location::builder()
                    .coordinates_north_west(
                        Coordinates::builder()
                            .latitude("52.156439")
                            .longitude("5.015643")
                            .build(),
                    )
                    .build(),
            )
            .build();
        assert!(matches!(
            adapter().build_get_locations_in_area_request(&request),
            Err(PostNLError::InvalidArgument(_))
        ));
    }

    #[test]
    fn decodes_a_single_location_as_a_list() {
        let response = HttpResponse::new(
            200,
            r#"{"GetLocationsResult":{"ResponseLocation":{"LocationCode":"161503","Name":"C1000"}}}"#,
        );
        let decoded = adapter().process_get_location_response(&response).unwrap();
        let locations = decoded
            .get_locations_result
            .and_then(|result| result.response_location)
            .unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].location_code.as_deref(), Some("161503"));
    }
}
