use serde_json::Value;

use crate::adapter::{AdapterSettings, LabellingAdapter};
use crate::entity::{GenerateLabel, GenerateLabelResponse};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Parameters;
use crate::wire::{to_wire_json, Service};
use crate::PostNLResult;

const ENDPOINT: &str = "/shipment/${VERSION}/label";

/// Generates labels through the REST API.
#[derive(Debug, Clone)]
pub struct LabellingRestAdapter {
    settings: AdapterSettings,
}

impl LabellingRestAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        LabellingRestAdapter { settings }
    }
}

impl LabellingAdapter for LabellingRestAdapter {
    fn build_generate_label_request(
        &self,
        request: &GenerateLabel,
        confirm: bool,
    ) -> PostNLResult<HttpRequest> {
        let mut body = to_wire_json(request, Service::Labelling);
        // The REST endpoint takes a single shipment object.
        if let Some(Value::Array(shipments)) = body.get_mut("Shipments") {
            let first = shipments.drain(..).next().unwrap_or(Value::Null);
            body.insert("Shipments".to_string(), first);
        }

        let params = Parameters::new().flag("confirm", confirm);
        super::post_json(&self.settings, ENDPOINT, &params, body)
    }

    fn process_generate_label_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GenerateLabelResponse> {
        super::decode_unwrapped(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ApiKey;
    use crate::entity::{Customer, Message, Shipment};

    fn adapter() -> LabellingRestAdapter {
        LabellingRestAdapter::new(AdapterSettings {
            api_key: ApiKey::new("test"),
            sandbox: true,
            version: "v2_2".to_string(),
        })
    }

    #[test]
    fn sends_only_the_first_shipment() {
        let request = GenerateLabel::builder()
            .customer(Customer::builder().customer_code("DEVC").build())
            .message(Message::labelling(None))
            .shipments(vec![
                Shipment::builder().barcode("3SDEVC201611210").build(),
                Shipment::builder().barcode("3SDEVC201611211").build(),
            ])
            .build();

        let built = adapter().build_generate_label_request(&request, false).unwrap();
        assert_eq!(
            built.url.as_str(),
            "https://api-sandbox.postnl.nl/shipment/v2_2/label?confirm=false"
        );

        let body: Value = serde_json::from_str(built.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["Shipments"]["Barcode"], "3SDEVC201611210");
        assert_eq!(body["Message"]["Printertype"], "GraphicFile|PDF");
    }

    #[test]
    fn decodes_labels() {
        let response = HttpResponse::new(
            200,
            r#"{
                "MergedLabels": [],
                "ResponseShipments": [{
                    "Barcode": "3SDEVC201611210",
                    "Labels": [{"Content": "JVBERi0xLjQ=", "Labeltype": "Label"}],
                    "ProductCodeDelivery": "3085"
                }]
            }"#,
        );
        let decoded = adapter().process_generate_label_response(&response).unwrap();
        let shipments = decoded.response_shipments.unwrap();
        assert_eq!(shipments.len(), 1);
        assert_eq!(shipments[0].barcode.as_deref(), Some("3SDEVC201611210"));
        assert_eq!(shipments[0].labels.as_ref().map(Vec::len), Some(1));
    }
}
