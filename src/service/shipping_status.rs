use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::{batch_id, cache_key, ServiceConfig};
use crate::adapter::rest::ShippingStatusRestAdapter;
use crate::adapter::{ApiMode, ShippingStatusAdapter};
use crate::entity::{
    CompleteStatus, CompleteStatusResponse, CurrentStatus, CurrentStatusResponse, Customer,
    GetSignature, GetSignatureResponseSignature, UpdatedShipmentsResponse,
};
use crate::wire::Service;
use crate::PostNLResult;

/// Tracks shipments.
///
/// The status API only speaks REST; the API mode is recorded but does not change the requests.
#[derive(Debug, Clone)]
pub struct ShippingStatusService {
    config: ServiceConfig,
    mode: ApiMode,
    rest: ShippingStatusRestAdapter,
}

impl ShippingStatusService {
    /// Creates the service from a shared configuration.
    pub fn new(config: ServiceConfig) -> Self {
        ShippingStatusService {
            mode: config.mode,
            rest: ShippingStatusRestAdapter::new(config.settings(Service::ShippingStatus)),
            config,
        }
    }

    /// The configured wire protocol.
    pub fn api_mode(&self) -> ApiMode {
        self.mode
    }

    /// Records the wire protocol. Requests keep using REST.
    pub fn set_api_mode(&mut self, mode: ApiMode) {
        if mode == ApiMode::Soap {
            tracing::debug!("shipping status has no SOAP API, staying on REST");
        }
        self.mode = mode;
    }

    /// The request builder.
    pub fn adapter(&self) -> &dyn ShippingStatusAdapter {
        &self.rest
    }

    /// Looks up the current status of a shipment.
    #[tracing::instrument(skip_all)]
    pub async fn current_status(
        &self,
        request: &CurrentStatus,
    ) -> PostNLResult<CurrentStatusResponse> {
        let key = current_key(request);
        self.config
            .call(
                "get_current_status",
                Some(key),
                || self.rest.build_current_status_request(request),
                |response| self.rest.process_current_status_response(response),
            )
            .await
    }

    /// Looks up current statuses concurrently, keyed by the request id or its position.
    #[tracing::instrument(skip_all, fields(count = requests.len()))]
    pub async fn current_statuses(
        &self,
        requests: &[CurrentStatus],
    ) -> BTreeMap<String, PostNLResult<CurrentStatusResponse>> {
        let entries = requests
            .iter()
            .enumerate()
            .map(|(index, request)| {
                (batch_id(request.id.as_deref(), index), Some(current_key(request)), request)
            })
            .collect();
        self.config
            .batch(
                "get_current_status",
                entries,
                |request| self.rest.build_current_status_request(request),
                |response| self.rest.process_current_status_response(response),
            )
            .await
    }

    /// Looks up the complete status history of a shipment.
    #[tracing::instrument(skip_all)]
    pub async fn complete_status(
        &self,
        request: &CompleteStatus,
    ) -> PostNLResult<CompleteStatusResponse> {
        let key = complete_key(request);
        self.config
            .call(
                "get_complete_status",
                Some(key),
                || self.rest.build_complete_status_request(request),
                |response| self.rest.process_complete_status_response(response),
            )
            .await
    }

    /// Looks up complete statuses concurrently, keyed by the request id or its position.
    #[tracing::instrument(skip_all, fields(count = requests.len()))]
    pub async fn complete_statuses(
        &self,
        requests: &[CompleteStatus],
    ) -> BTreeMap<String, PostNLResult<CompleteStatusResponse>> {
        let entries = requests
            .iter()
            .enumerate()
            .map(|(index, request)| {
                (batch_id(request.id.as_deref(), index), Some(complete_key(request)), request)
            })
            .collect();
        self.config
            .batch(
                "get_complete_status",
                entries,
                |request| self.rest.build_complete_status_request(request),
                |response| self.rest.process_complete_status_response(response),
            )
            .await
    }

    /// Looks up the delivery signature of a shipment.
    #[tracing::instrument(skip_all)]
    pub async fn get_signature(
        &self,
        request: &GetSignature,
    ) -> PostNLResult<GetSignatureResponseSignature> {
        let key = signature_key(request);
        self.config
            .call(
                "get_signature",
                Some(key),
                || self.rest.build_get_signature_request(request),
                |response| self.rest.process_get_signature_response(response),
            )
            .await
    }

    /// Looks up signatures concurrently, keyed by the request id or its position.
    #[tracing::instrument(skip_all, fields(count = requests.len()))]
    pub async fn get_signatures(
        &self,
        requests: &[GetSignature],
    ) -> BTreeMap<String, PostNLResult<GetSignatureResponseSignature>> {
        let entries = requests
            .iter()
            .enumerate()
            .map(|(index, request)| {
                (batch_id(request.id.as_deref(), index), Some(signature_key(request)), request)
            })
            .collect();
        self.config
            .batch(
                "get_signature",
                entries,
                |request| self.rest.build_get_signature_request(request),
                |response| self.rest.process_get_signature_response(response),
            )
            .await
    }

    /// Lists the shipments of `customer` updated within `period`, or recently when absent.
    ///
    /// The answer changes over time and is never cached.
    #[tracing::instrument(skip_all)]
    pub async fn get_updated_shipments(
        &self,
        customer: &Customer,
        period: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> PostNLResult<Vec<UpdatedShipmentsResponse>> {
        self.config
            .call(
                "get_updated_shipments",
                None,
                || self.rest.build_get_updated_shipments_request(customer, period),
                |response| self.rest.process_get_updated_shipments_response(response),
            )
            .await
    }
}

fn current_key(request: &CurrentStatus) -> String {
    cache_key(
        "current_status",
        Service::ShippingStatus,
        request,
        request.id.as_deref(),
        ApiMode::Rest,
        "",
    )
}

fn complete_key(request: &CompleteStatus) -> String {
    cache_key(
        "complete_status",
        Service::ShippingStatus,
        request,
        request.id.as_deref(),
        ApiMode::Rest,
        "",
    )
}

fn signature_key(request: &GetSignature) -> String {
    cache_key(
        "signature",
        Service::ShippingStatus,
        request,
        request.id.as_deref(),
        ApiMode::Rest,
        "",
    )
}
