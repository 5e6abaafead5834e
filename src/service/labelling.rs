use std::collections::BTreeMap;

use super::{batch_id, cache_key, dual_mode_service, ServiceConfig};
use crate::adapter::rest::LabellingRestAdapter;
use crate::adapter::soap::LabellingSoapAdapter;
use crate::adapter::{ApiMode, LabellingAdapter};
use crate::entity::{GenerateLabel, GenerateLabelResponse};
use crate::wire::Service;
use crate::PostNLResult;

/// Generates shipping labels.
#[derive(Debug, Clone)]
pub struct LabellingService {
    config: ServiceConfig,
    mode: ApiMode,
    rest: LabellingRestAdapter,
    soap: LabellingSoapAdapter,
}

dual_mode_service!(
    LabellingService,
    Service::Labelling,
    LabellingAdapter,
    LabellingRestAdapter,
    LabellingSoapAdapter
);

impl LabellingService {
    fn cache_key(&self, request: &GenerateLabel, confirm: bool) -> String {
        cache_key(
            "generate_label",
            Service::Labelling,
            request,
            request.id.as_deref(),
            self.mode,
            if confirm { "confirm" } else { "" },
        )
    }

    /// Generates labels, confirming the shipments when `confirm` is set.
    #[tracing::instrument(skip_all, fields(confirm = confirm))]
    pub async fn generate_label(
        &self,
        request: &GenerateLabel,
        confirm: bool,
    ) -> PostNLResult<GenerateLabelResponse> {
        let adapter = self.adapter();
        self.config
            .call(
                "generate_label",
                Some(self.cache_key(request, confirm)),
                || adapter.build_generate_label_request(request, confirm),
                |response| adapter.process_generate_label_response(response),
            )
            .await
    }

    /// Generates labels for every request concurrently, keyed by the request id or `#<position>`.
    ///
    /// A failing request never affects the others.
    #[tracing::instrument(skip_all, fields(count = requests.len(), confirm = confirm))]
    pub async fn generate_labels(
        &self,
        requests: &[GenerateLabel],
        confirm: bool,
    ) -> BTreeMap<String, PostNLResult<GenerateLabelResponse>> {
        let adapter = self.adapter();
        let entries = requests
            .iter()
            .enumerate()
            .map(|(index, request)| {
                (
                    batch_id(request.id.as_deref(), index),
                    Some(self.cache_key(request, confirm)),
                    request,
                )
            })
            .collect();
        self.config
            .batch(
                "generate_label",
                entries,
                |request| adapter.build_generate_label_request(request, confirm),
                |response| adapter.process_generate_label_response(response),
            )
            .await
    }
}
