use super::Contract;
use crate::adapter::{AdapterSettings, BarcodeAdapter};
use crate::entity::{GenerateBarcode, GenerateBarcodeResponse};
use crate::http::{HttpRequest, HttpResponse};
use crate::wire::{NamespaceMap, Service};
use crate::{PostNLError, PostNLResult};

const CONTRACT: Contract = Contract {
    service: Service::Barcode,
    path: "/shipment/${VERSION}/barcode",
    namespaces: NamespaceMap {
        services: "http://postnl.nl/cif/services/BarcodeWebService/",
        domain: "http://postnl.nl/cif/domain/BarcodeWebService/",
    },
    interface: "http://postnl.nl/cif/services/BarcodeWebService/IBarcodeWebService",
};

/// Generates barcodes through the CIF SOAP API.
#[derive(Debug, Clone)]
pub struct BarcodeSoapAdapter {
    settings: AdapterSettings,
}

impl BarcodeSoapAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        BarcodeSoapAdapter { settings }
    }
}

impl BarcodeAdapter for BarcodeSoapAdapter {
    fn build_generate_barcode_request(&self, request: &GenerateBarcode) -> PostNLResult<HttpRequest> {
        super::build_request(
            &self.settings,
            &CONTRACT,
            "GenerateBarcode",
            "GenerateBarcode",
            request,
        )
    }

    fn process_generate_barcode_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GenerateBarcodeResponse> {
        let decoded: GenerateBarcodeResponse = super::decode_response(&CONTRACT, response)?;
        match decoded.barcode {
            Some(_) => Ok(decoded),
            None => Err(PostNLError::EntityNotFound("Barcode".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ApiKey;
    use crate::entity::{Barcode, Customer, Message};
    use crate::wire::parse_document;

    fn adapter() -> BarcodeSoapAdapter {
        BarcodeSoapAdapter::new(AdapterSettings {
            api_key: ApiKey::new("test"),
            sandbox: true,
            version: "v1_1".to_string(),
        })
    }

    #[test]
    fn body_is_qualified_per_namespace() {
        let request = GenerateBarcode::builder()
            .message(Message::new())
            .customer(
                Customer::builder()
                    .customer_code("DEVC")
                    .customer_number("11223344")
                    .build(),
            )
            .barcode(Barcode::builder().range("DEVC").build())
            .build();

        let built = adapter().build_generate_barcode_request(&request).unwrap();
        assert_eq!(
            built.url.as_str(),
            "https://api-sandbox.postnl.nl/shipment/v1_1/barcode"
        );
        let body = built.body.unwrap();
        assert!(body.contains("<services:GenerateBarcode>"));
        assert!(body.contains("<domain:Range>DEVC</domain:Range>"));

        let document = parse_document(&body).unwrap();
        let range = document.find("Range").unwrap();
        assert_eq!(
            range.namespace.as_deref(),
            Some("http://postnl.nl/cif/domain/BarcodeWebService/")
        );
    }

    #[test]
    fn decodes_the_barcode() {
        let response = HttpResponse::new(
            200,
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
              <s:Body>
                <GenerateBarcodeResponse xmlns="http://postnl.nl/cif/services/BarcodeWebService/">
                  <Barcode>3SDEVC816223392</Barcode>
                </GenerateBarcodeResponse>
              </s:Body>
            </s:Envelope>"#,
        );
        let decoded = adapter().process_generate_barcode_response(&response).unwrap();
        assert_eq!(decoded.barcode.as_deref(), Some("3SDEVC816223392"));
    }
}
