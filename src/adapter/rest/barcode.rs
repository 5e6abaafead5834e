use crate::adapter::{AdapterSettings, BarcodeAdapter};
use crate::entity::{GenerateBarcode, GenerateBarcodeResponse};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Parameters;
use crate::{PostNLError, PostNLResult};

const ENDPOINT: &str = "/shipment/${VERSION}/barcode";

/// Generates barcodes through the REST API.
#[derive(Debug, Clone)]
pub struct BarcodeRestAdapter {
    settings: AdapterSettings,
}

impl BarcodeRestAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        BarcodeRestAdapter { settings }
    }
}

impl BarcodeAdapter for BarcodeRestAdapter {
    fn build_generate_barcode_request(&self, request: &GenerateBarcode) -> PostNLResult<HttpRequest> {
        let customer = request.customer.as_ref();
        let barcode = request.barcode.as_ref();
        let params = Parameters::new()
            .param_opt("CustomerCode", customer.and_then(|c| c.customer_code.as_deref()))
            .param_opt("CustomerNumber", customer.and_then(|c| c.customer_number.as_deref()))
            .param_opt("Type", barcode.and_then(|b| b.r#type.as_deref()))
            .param_opt("Serie", barcode.and_then(|b| b.serie.as_deref()))
            .param_opt("Range", barcode.and_then(|b| b.range.as_deref()));

        super::get(&self.settings, ENDPOINT, &params)
    }

    fn process_generate_barcode_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GenerateBarcodeResponse> {
        let decoded: GenerateBarcodeResponse = super::decode_unwrapped(response)?;
        match decoded.barcode {
            Some(_) => Ok(decoded),
            None => Err(PostNLError::EntityNotFound("Barcode".to_string())),
        }
    }
}
