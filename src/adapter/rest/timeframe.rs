use crate::adapter::{AdapterSettings, TimeframeAdapter};
use crate::entity::{GetTimeframes, ResponseTimeframes};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Parameters;
use crate::wire::format_date;
use crate::{PostNLError, PostNLResult};

const ENDPOINT: &str = "/shipment/${VERSION}/calculate/timeframes";

/// Calculates delivery timeframes through the REST API.
#[derive(Debug, Clone)]
pub struct TimeframeRestAdapter {
    settings: AdapterSettings,
}

impl TimeframeRestAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        TimeframeRestAdapter { settings }
    }
}

impl TimeframeAdapter for TimeframeRestAdapter {
    fn build_get_timeframes_request(&self, request: &GetTimeframes) -> PostNLResult<HttpRequest> {
        let timeframe = request
            .timeframe
            .as_ref()
            .and_then(|timeframes| timeframes.first())
            .ok_or_else(|| PostNLError::InvalidArgument("a timeframe is required".into()))?;
        let start_date = timeframe
            .start_date
            .as_ref()
            .ok_or_else(|| PostNLError::InvalidArgument("a start date is required".into()))?;
        let end_date = timeframe
            .end_date
            .as_ref()
            .ok_or_else(|| PostNLError::InvalidArgument("an end date is required".into()))?;

        let params = Parameters::new()
            .flag("AllowSundaySorting", timeframe.sunday_sorting.unwrap_or(false))
            .param("StartDate", format_date(start_date))
            .param("EndDate", format_date(end_date))
            .param_opt("PostalCode", timeframe.postal_code.as_deref())
            .param_opt("HouseNumber", timeframe.house_nr.as_deref())
            .param_opt("CountryCode", timeframe.country_code.as_deref())
            .joined(
                "Options",
                timeframe.options.iter().flatten(),
                "Daytime",
            )
            .param_opt("Interval", timeframe.interval.as_deref())
            .param_opt("HouseNrExt", timeframe.house_nr_ext.as_deref())
            .param_opt("TimeframeRange", timeframe.timeframe_range.as_deref())
            .param_opt("Street", timeframe.street.as_deref())
            .param_opt("City", timeframe.city.as_deref());

        super::get(&self.settings, ENDPOINT, &params)
    }

    fn process_get_timeframes_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<ResponseTimeframes> {
        super::decode_unwrapped(response)
    }
}
