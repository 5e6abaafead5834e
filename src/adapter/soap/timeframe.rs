use super::Contract;
use crate::adapter::{AdapterSettings, TimeframeAdapter};
use crate::entity::{GetTimeframes, ResponseTimeframes};
use crate::http::{HttpRequest, HttpResponse};
use crate::wire::{NamespaceMap, Service};
use crate::PostNLResult;

const CONTRACT: Contract = Contract {
    service: Service::Timeframe,
    path: "/shipment/${VERSION}/calculate/timeframes",
    namespaces: NamespaceMap {
        services: "http://postnl.nl/cif/services/TimeframeWebService/",
        domain: "http://postnl.nl/cif/domain/TimeframeWebService/",
    },
    interface: "http://postnl.nl/cif/services/TimeframeWebService/ITimeframeWebService",
};

/// Calculates delivery timeframes through the CIF SOAP API.
#[derive(Debug, Clone)]
pub struct TimeframeSoapAdapter {
    settings: AdapterSettings,
}

impl TimeframeSoapAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        TimeframeSoapAdapter { settings }
    }
}

impl TimeframeAdapter for TimeframeSoapAdapter {
    fn build_get_timeframes_request(&self, request: &GetTimeframes) -> PostNLResult<HttpRequest> {
        super::build_request(&self.settings, &CONTRACT, "GetTimeframes", "GetTimeframes", request)
    }

    fn process_get_timeframes_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<ResponseTimeframes> {
        super::decode_response(&CONTRACT, response)
    }
}
