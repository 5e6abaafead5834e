use std::collections::BTreeMap;

use super::{batch_id, dual_mode_service, ServiceConfig};
use crate::adapter::rest::BarcodeRestAdapter;
use crate::adapter::soap::BarcodeSoapAdapter;
use crate::adapter::{ApiMode, BarcodeAdapter};
use crate::entity::{GenerateBarcode, GenerateBarcodeResponse};
use crate::wire::Service;
use crate::PostNLResult;

/// Generates barcodes. Barcodes are unique, so nothing is cached.
#[derive(Debug, Clone)]
pub struct BarcodeService {
    config: ServiceConfig,
    mode: ApiMode,
    rest: BarcodeRestAdapter,
    soap: BarcodeSoapAdapter,
}

dual_mode_service!(
    BarcodeService,
    Service::Barcode,
    BarcodeAdapter,
    BarcodeRestAdapter,
    BarcodeSoapAdapter
);

impl BarcodeService {
    /// Generates a single barcode.
    #[tracing::instrument(skip_all)]
    pub async fn generate_barcode(
        &self,
        request: &GenerateBarcode,
    ) -> PostNLResult<GenerateBarcodeResponse> {
        let adapter = self.adapter();
        self.config
            .call(
                "generate_barcode",
                None,
                || adapter.build_generate_barcode_request(request),
                |response| adapter.process_generate_barcode_response(response),
            )
            .await
    }

    /// Generates one barcode per request, keyed by the request id or `#<position>`.
    #[tracing::instrument(skip_all, fields(count = requests.len()))]
    pub async fn generate_barcodes(
        &self,
        requests: &[GenerateBarcode],
    ) -> BTreeMap<String, PostNLResult<GenerateBarcodeResponse>> {
        let adapter = self.adapter();
        let entries = requests
            .iter()
            .enumerate()
            .map(|(index, request)| (batch_id(request.id.as_deref(), index), None, request))
            .collect();
        self.config
            .batch(
                "generate_barcode",
                entries,
                |request| adapter.build_generate_barcode_request(request),
                |response| adapter.process_generate_barcode_response(response),
            )
            .await
    }
}
