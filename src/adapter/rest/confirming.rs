use serde_json::Value;

use crate::adapter::{AdapterSettings, ConfirmingAdapter};
use crate::entity::{Confirming, ConfirmingResponseShipment};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Parameters;
use crate::wire::{from_json_fields, to_wire_json, Service};
use crate::{PostNLError, PostNLResult};

const ENDPOINT: &str = "/shipment/${VERSION}/confirm";

/// Confirms shipments through the REST API.
#[derive(Debug, Clone)]
pub struct ConfirmingRestAdapter {
    settings: AdapterSettings,
}

impl ConfirmingRestAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        ConfirmingRestAdapter { settings }
    }
}

impl ConfirmingAdapter for ConfirmingRestAdapter {
    fn build_confirm_request(&self, request: &Confirming) -> PostNLResult<HttpRequest> {
        let body = to_wire_json(request, Service::Confirming);
        super::post_json(&self.settings, ENDPOINT, &Parameters::new(), body)
    }

    fn process_confirm_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<ConfirmingResponseShipment> {
        let mut body = super::decode_body(response)?;
        let shipment = match body.get_mut("ResponseShipments").map(Value::take) {
            Some(Value::Array(mut shipments)) if !shipments.is_empty() => shipments.swap_remove(0),
            Some(shipment @ Value::Object(_)) => shipment,
            _ => {
                return Err(PostNLError::EntityNotFound(
                    "ConfirmingResponseShipment".to_string(),
                ))
            }
        };
        from_json_fields(shipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ApiKey;
    use crate::entity::{Customer, Message, Shipment};

    fn adapter() -> ConfirmingRestAdapter {
        ConfirmingRestAdapter::new(AdapterSettings {
            api_key: ApiKey::new("test"),
            sandbox: false,
            version: "v2".to_string(),
        })
    }

    #[test]
    fn posts_the_wire_form() {
        let request = Confirming::builder()
            .customer(Customer::builder().customer_code("DEVC").build())
            .message(Message::new())
            .shipments(vec![Shipment::builder().barcode("3SDEVC201611210").build()])
            .build();

        let built = adapter().build_confirm_request(&request).unwrap();
        assert_eq!(built.method, reqwest::Method::POST);
        assert_eq!(built.url.as_str(), "https://api.postnl.nl/shipment/v2/confirm");
        assert_eq!(
            built.header_value("Content-Type"),
            Some("application/json;charset=UTF-8")
        );

        let body: Value = serde_json::from_str(built.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["Customer"]["CustomerCode"], "DEVC");
        assert_eq!(body["Shipments"][0]["Barcode"], "3SDEVC201611210");
    }

    #[test]
    fn takes_the_first_response_shipment() {
        let response = HttpResponse::new(
            200,
            r#"{"ResponseShipments":[{"Barcode":"3SDEVC201611210","Warnings":null}]}"#,
        );
        let decoded = adapter().process_confirm_response(&response).unwrap();
        assert_eq!(decoded.barcode.as_deref(), Some("3SDEVC201611210"));

        let empty = HttpResponse::new(200, r#"{"ResponseShipments":[]}"#);
        assert!(matches!(
            adapter().process_confirm_response(&empty),
            Err(PostNLError::EntityNotFound(_))
        ));
    }
}
