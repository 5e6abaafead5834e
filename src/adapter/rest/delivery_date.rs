use chrono::NaiveTime;

use crate::adapter::{AdapterSettings, DeliveryDateAdapter};
use crate::entity::{
    CutOffTime, GetDeliveryDate, GetDeliveryDateResponse, GetSentDateRequest, GetSentDateResponse,
};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Parameters;
use crate::wire::{format_date, format_date_time};
use crate::{PostNLError, PostNLResult};

const DELIVERY_ENDPOINT: &str = "/shipment/${VERSION}/calculate/date/delivery";
const SHIPPING_ENDPOINT: &str = "/shipment/${VERSION}/calculate/date/shipping";

const DEFAULT_CUT_OFF_TIME: &str = "15:30:00";
const WEEKDAYS: [(&str, &str); 7] = [
    ("01", "Monday"),
    ("02", "Tuesday"),
    ("03", "Wednesday"),
    ("04", "Thursday"),
    ("05", "Friday"),
    ("06", "Saturday"),
    ("07", "Sunday"),
];

/// Calculates delivery and sent dates through the REST API.
#[derive(Debug, Clone)]
pub struct DeliveryDateRestAdapter {
    settings: AdapterSettings,
}

impl DeliveryDateRestAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        DeliveryDateRestAdapter { settings }
    }
}

/// Normalizes `15:30` and `15:30:00` to `15:30:00`.
fn cut_off_time(time: Option<&str>) -> PostNLResult<String> {
    let Some(time) = time.map(str::trim).filter(|time| !time.is_empty()) else {
        return Ok(DEFAULT_CUT_OFF_TIME.to_string());
    };
    NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map(|parsed| parsed.format("%H:%M:%S").to_string())
        .map_err(|_| PostNLError::InvalidArgument(format!("invalid cut-off time `{time}`")))
}

fn find_day<'a>(times: &'a [CutOffTime], day: &str) -> Option<&'a CutOffTime> {
    times.iter().find(|time| time.day.as_deref() == Some(day))
}

/// `Daytime` followed by every option except `PG`.
fn options(extra: Option<&Vec<String>>) -> String {
    std::iter::once("Daytime")
        .chain(
            extra
                .into_iter()
                .flatten()
                .map(String::as_str)
                .filter(|option| !option.eq_ignore_ascii_case("PG") && !option.is_empty()),
        )
        .collect::<Vec<_>>()
        .join(",")
}

impl DeliveryDateAdapter for DeliveryDateRestAdapter {
    fn build_get_delivery_date_request(
        &self,
        request: &GetDeliveryDate,
    ) -> PostNLResult<HttpRequest> {
        let query = request
            .get_delivery_date
            .as_ref()
            .ok_or_else(|| PostNLError::InvalidArgument("no delivery date query given".into()))?;
        let shipping_date = query
            .shipping_date
            .as_ref()
            .ok_or_else(|| PostNLError::InvalidArgument("a shipping date is required".into()))?;
        let times = query.cut_off_times.as_deref().unwrap_or_default();

        let mut params = Parameters::new()
            .param("ShippingDate", format_date_time(shipping_date))
            .param_opt("ShippingDuration", query.shipping_duration.as_deref())
            .param(
                "CutOffTime",
                cut_off_time(find_day(times, "00").and_then(|time| time.time.as_deref()))?,
            );

        // Per-day cut-off times only override the default when more than one is given.
        if times.len() > 1 {
            for (day, name) in WEEKDAYS {
                params = match find_day(times, day) {
                    Some(time) => params
                        .param(format!("CutOffTime{name}"), cut_off_time(time.time.as_deref())?)
                        .flag(format!("Available{name}"), time.available.unwrap_or(true)),
                    None => params
                        .param(format!("CutOffTime{name}"), "00:00:00")
                        .flag(format!("Available{name}"), false),
                };
            }
        }

        let params = params
            .param_opt("PostalCode", query.postal_code.as_deref())
            .param_opt("CountryCode", query.country_code.as_deref())
            .param_opt("OriginCountryCode", query.origin_country_code.as_deref())
            .param_opt("City", query.city.as_deref())
            .param_opt("Street", query.street.as_deref())
            .param_opt("HouseNumber", query.house_nr.as_deref())
            .param_opt("HouseNrExt", query.house_nr_ext.as_deref())
            .param("Options", options(query.options.as_ref()));

        super::get(&self.settings, DELIVERY_ENDPOINT, &params)
    }

    fn process_get_delivery_date_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetDeliveryDateResponse> {
        super::decode_unwrapped(response)
    }

    fn build_get_sent_date_request(
        &self,
        request: &GetSentDateRequest,
    ) -> PostNLResult<HttpRequest> {
        let query = request
            .get_sent_date
            .as_ref()
            .ok_or_else(|| PostNLError::InvalidArgument("no sent date query given".into()))?;
        let delivery_date = query
            .delivery_date
            .as_ref()
            .ok_or_else(|| PostNLError::InvalidArgument("a delivery date is required".into()))?;

        let params = Parameters::new()
            .flag(
                "AllowSundaySorting",
                query.allow_sunday_sorting.unwrap_or(false),
            )
            .param("DeliveryDate", format_date(delivery_date))
            .param_opt("ShippingDuration", query.shipping_duration.as_deref())
            .param_opt("PostalCode", query.postal_code.as_deref())
            .param_opt("CountryCode", query.country_code.as_deref())
            .param_opt("City", query.city.as_deref())
            .param_opt("Street", query.street.as_deref())
            .param_opt("HouseNumber", query.house_nr.as_deref())
            .param_opt("HouseNrExt", query.house_nr_ext.as_deref())
            .param("Options", options(query.options.as_ref()));

        super::get(&self.settings, SHIPPING_ENDPOINT, &params)
    }

    fn process_get_sent_date_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetSentDateResponse> {
        super::decode_unwrapped(response)
    }
}
