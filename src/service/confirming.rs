use std::collections::BTreeMap;

use super::{batch_id, cache_key, dual_mode_service, ServiceConfig};
use crate::adapter::rest::ConfirmingRestAdapter;
use crate::adapter::soap::ConfirmingSoapAdapter;
use crate::adapter::{ApiMode, ConfirmingAdapter};
use crate::entity::{Confirming, ConfirmingResponseShipment};
use crate::wire::Service;
use crate::PostNLResult;

/// Confirms shipments.
#[derive(Debug, Clone)]
pub struct ConfirmingService {
    config: ServiceConfig,
    mode: ApiMode,
    rest: ConfirmingRestAdapter,
    soap: ConfirmingSoapAdapter,
}

dual_mode_service!(
    ConfirmingService,
    Service::Confirming,
    ConfirmingAdapter,
    ConfirmingRestAdapter,
    ConfirmingSoapAdapter
);

impl ConfirmingService {
    fn cache_key(&self, request: &Confirming) -> String {
        cache_key(
            "confirm",
            Service::Confirming,
            request,
            request.id.as_deref(),
            self.mode,
            "",
        )
    }

    /// Confirms the shipments of `request`.
    #[tracing::instrument(skip_all)]
    pub async fn confirm_shipment(
        &self,
        request: &Confirming,
    ) -> PostNLResult<ConfirmingResponseShipment> {
        let adapter = self.adapter();
        self.config
            .call(
                "confirm_shipment",
                Some(self.cache_key(request)),
                || adapter.build_confirm_request(request),
                |response| adapter.process_confirm_response(response),
            )
            .await
    }

    /// Confirms every request concurrently, keyed by the request id or `#<position>`.
    #[tracing::instrument(skip_all, fields(count = requests.len()))]
    pub async fn confirm_shipments(
        &self,
        requests: &[Confirming],
    ) -> BTreeMap<String, PostNLResult<ConfirmingResponseShipment>> {
        let adapter = self.adapter();
        let entries = requests
            .iter()
            .enumerate()
            .map(|(index, request)| {
                (
                    batch_id(request.id.as_deref(), index),
                    Some(self.cache_key(request)),
                    request,
                )
            })
            .collect();
        self.config
            .batch(
                "confirm_shipment",
                entries,
                |request| adapter.build_confirm_request(request),
                |response| adapter.process_confirm_response(response),
            )
            .await
    }
}
