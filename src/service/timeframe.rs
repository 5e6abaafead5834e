use super::{cache_key, dual_mode_service, ServiceConfig};
use crate::adapter::rest::TimeframeRestAdapter;
use crate::adapter::soap::TimeframeSoapAdapter;
use crate::adapter::{ApiMode, TimeframeAdapter};
use crate::entity::{GetTimeframes, ResponseTimeframes};
use crate::wire::Service;
use crate::PostNLResult;

/// Calculates delivery timeframes.
#[derive(Debug, Clone)]
pub struct TimeframeService {
    config: ServiceConfig,
    mode: ApiMode,
    rest: TimeframeRestAdapter,
    soap: TimeframeSoapAdapter,
}

dual_mode_service!(
    TimeframeService,
    Service::Timeframe,
    TimeframeAdapter,
    TimeframeRestAdapter,
    TimeframeSoapAdapter
);

impl TimeframeService {
    /// Calculates the timeframes of the first requested timeframe.
    #[tracing::instrument(skip_all)]
    pub async fn get_timeframes(&self, request: &GetTimeframes) -> PostNLResult<ResponseTimeframes> {
        let adapter = self.adapter();
        let key = cache_key("timeframes", Service::Timeframe, request, None, self.mode, "");
        self.config
            .call(
                "get_timeframes",
                Some(key),
                || adapter.build_get_timeframes_request(request),
                |response| adapter.process_get_timeframes_response(response),
            )
            .await
    }
}
