use super::Contract;
use crate::adapter::{AdapterSettings, LabellingAdapter};
use crate::entity::{GenerateLabel, GenerateLabelResponse};
use crate::http::{HttpRequest, HttpResponse};
use crate::wire::{NamespaceMap, Service};
use crate::PostNLResult;

const CONTRACT: Contract = Contract {
    service: Service::Labelling,
    path: "/shipment/${VERSION}/label",
    namespaces: NamespaceMap {
        services: "http://postnl.nl/cif/services/LabellingWebService/",
        domain: "http://postnl.nl/cif/domain/LabellingWebService/",
    },
    interface: "http://postnl.nl/cif/services/LabellingWebService/ILabellingWebService",
};

/// Generates labels through the CIF SOAP API.
#[derive(Debug, Clone)]
pub struct LabellingSoapAdapter {
    settings: AdapterSettings,
}

impl LabellingSoapAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        LabellingSoapAdapter { settings }
    }
}

impl LabellingAdapter for LabellingSoapAdapter {
    /// Unconfirmed labels keep the `GenerateLabel` body but use the
    /// `GenerateLabelWithoutConfirm` action.
    fn build_generate_label_request(
        &self,
        request: &GenerateLabel,
        confirm: bool,
    ) -> PostNLResult<HttpRequest> {
        let action = if confirm {
            "GenerateLabel"
        } else {
            "GenerateLabelWithoutConfirm"
        };
        super::build_request(&self.settings, &CONTRACT, "GenerateLabel", action, request)
    }

    fn process_generate_label_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GenerateLabelResponse> {
        super::decode_response(&CONTRACT, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ApiKey;
    use crate::entity::{Message, Shipment};

    fn adapter() -> LabellingSoapAdapter {
        LabellingSoapAdapter::new(AdapterSettings {
            api_key: ApiKey::new("test"),
            sandbox: true,
            version: "v2_2".to_string(),
        })
    }

    #[test]
    fn unconfirmed_labels_use_their_own_action() {
        let request = GenerateLabel::builder()
            .message(Message::labelling(Some("GraphicFile|PDF")))
            .shipments(vec![
                Shipment::builder().barcode("3SDEVC201611210").build(),
                Shipment::builder().barcode("3SDEVC201611211").build(),
            ])
            .build();

        let built = adapter().build_generate_label_request(&request, false).unwrap();
        assert_eq!(
            built.header_value("SOAPAction"),
            Some("\"http://postnl.nl/cif/services/LabellingWebService/ILabellingWebService/GenerateLabelWithoutConfirm\"")
        );
        let body = built.body.unwrap();
        assert!(body.contains("<services:GenerateLabel>"));
        assert!(body.contains("<domain:Printertype>GraphicFile|PDF</domain:Printertype>"));
        assert_eq!(body.matches("<domain:Shipment>").count(), 2);
    }

    #[test]
    fn decodes_wrapped_label_lists() {
        let response = HttpResponse::new(
            200,
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
              <s:Body>
                <GenerateLabelResponse xmlns="http://postnl.nl/cif/domain/LabellingWebService/">
                  <MergedLabels/>
                  <ResponseShipments>
                    <ResponseShipment>
                      <Barcode>3SDEVC201611210</Barcode>
                      <Labels>
                        <Label><Content>JVBERi0xLjQ=</Content><Labeltype>Label</Labeltype></Label>
                      </Labels>
                    </ResponseShipment>
                  </ResponseShipments>
                </GenerateLabelResponse>
              </s:Body>
            </s:Envelope>"#,
        );

        let decoded = adapter().process_generate_label_response(&response).unwrap();
        assert_eq!(decoded.merged_labels, Some(Vec::new()));
        let shipments = decoded.response_shipments.unwrap();
        assert_eq!(shipments[0].barcode.as_deref(), Some("3SDEVC201611210"));
        let labels = shipments[0].labels.as_ref().unwrap();
        assert_eq!(labels[0].labeltype.as_deref(), Some("Label"));
    }
}
