use super::{cache_key, dual_mode_service, ServiceConfig};
use crate::adapter::rest::DeliveryDateRestAdapter;
use crate::adapter::soap::DeliveryDateSoapAdapter;
use crate::adapter::{ApiMode, DeliveryDateAdapter};
use crate::entity::{
    GetDeliveryDate, GetDeliveryDateResponse, GetSentDateRequest, GetSentDateResponse,
};
use crate::wire::Service;
use crate::PostNLResult;

/// Calculates delivery and sent dates.
#[derive(Debug, Clone)]
pub struct DeliveryDateService {
    config: ServiceConfig,
    mode: ApiMode,
    rest: DeliveryDateRestAdapter,
    soap: DeliveryDateSoapAdapter,
}

dual_mode_service!(
    DeliveryDateService,
    Service::DeliveryDate,
    DeliveryDateAdapter,
    DeliveryDateRestAdapter,
    DeliveryDateSoapAdapter
);

impl DeliveryDateService {
    /// Calculates the expected delivery date.
    #[tracing::instrument(skip_all)]
    pub async fn get_delivery_date(
        &self,
        request: &GetDeliveryDate,
    ) -> PostNLResult<GetDeliveryDateResponse> {
        let adapter = self.adapter();
        let key = cache_key("delivery_date", Service::DeliveryDate, request, None, self.mode, "");
        self.config
            .call(
                "get_delivery_date",
                Some(key),
                || adapter.build_get_delivery_date_request(request),
                |response| adapter.process_get_delivery_date_response(response),
            )
            .await
    }

    /// Calculates the date a shipment has to be sent.
    #[tracing::instrument(skip_all)]
    pub async fn get_sent_date(
        &self,
        request: &GetSentDateRequest,
    ) -> PostNLResult<GetSentDateResponse> {
        let adapter = self.adapter();
        let key = cache_key("sent_date", Service::DeliveryDate, request, None, self.mode, "");
        self.config
            .call(
                "get_sent_date",
                Some(key),
                || adapter.build_get_sent_date_request(request),
                |response| adapter.process_get_sent_date_response(response),
            )
            .await
    }
}
