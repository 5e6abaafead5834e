use super::Contract;
use crate::adapter::{AdapterSettings, DeliveryDateAdapter};
use crate::entity::{
    GetDeliveryDate, GetDeliveryDateResponse, GetSentDateRequest, GetSentDateResponse,
};
use crate::http::{HttpRequest, HttpResponse};
use crate::wire::{NamespaceMap, Service};
use crate::PostNLResult;

const CONTRACT: Contract = Contract {
    service: Service::DeliveryDate,
    path: "/shipment/${VERSION}/calculate/date",
    namespaces: NamespaceMap {
        services: "http://postnl.nl/cif/services/DeliveryDateWebService/",
        domain: "http://postnl.nl/cif/domain/DeliveryDateWebService/",
    },
    interface: "http://postnl.nl/cif/services/DeliveryDateWebService/IDeliveryDateWebService",
};

/// Calculates delivery and sent dates through the CIF SOAP API.
#[derive(Debug, Clone)]
pub struct DeliveryDateSoapAdapter {
    settings: AdapterSettings,
}

impl DeliveryDateSoapAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        DeliveryDateSoapAdapter { settings }
    }
}

impl DeliveryDateAdapter for DeliveryDateSoapAdapter {
    fn build_get_delivery_date_request(
        &self,
        request: &GetDeliveryDate,
    ) -> PostNLResult<HttpRequest> {
        super::build_request(
            &self.settings,
            &CONTRACT,
            "GetDeliveryDate",
            "GetDeliveryDate",
            request,
        )
    }

    fn process_get_delivery_date_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetDeliveryDateResponse> {
        super::decode_response(&CONTRACT, response)
    }

    fn build_get_sent_date_request(
        &self,
        request: &GetSentDateRequest,
    ) -> PostNLResult<HttpRequest> {
        super::build_request(&self.settings, &CONTRACT, "GetSentDate", "GetSentDate", request)
    }

    fn process_get_sent_date_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetSentDateResponse> {
        super::decode_response(&CONTRACT, response)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::credentials::ApiKey;
    use crate::entity::{CutOffTime, DeliveryDateQuery};

    fn adapter() -> DeliveryDateSoapAdapter {
        DeliveryDateSoapAdapter::new(AdapterSettings {
            api_key: ApiKey::new("test"),
            sandbox: true,
            version: "v2_2".to_string(),
        })
    }

    #[test]
    fn query_nests_under_the_operation() {
        let request = GetDeliveryDate::builder()
            .get_delivery_date(
                DeliveryDateQuery::builder()
                    .options(vec!["Daytime".to_string()])
                    .cut_off_times(vec![CutOffTime::builder()
                        .day("00")
                        .time("14:00:00")
                        .available(true)
                        .build()])
                    .build(),
            )
            .build();

        let body = adapter()
            .build_get_delivery_date_request(&request)
            .unwrap()
            .body
            .unwrap();
        assert!(body.contains("<services:GetDeliveryDate><domain:GetDeliveryDate>"));
        assert!(body.contains("<domain:Options><arr:string>Daytime</arr:string></domain:Options>"));
        assert!(body.contains("<domain:Available>true</domain:Available>"));
    }

    #[test]
    fn decodes_string_arrays() {
        let response = HttpResponse::new(
            200,
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
              <s:Body>
                <GetDeliveryDateResponse xmlns="http://postnl.nl/cif/services/DeliveryDateWebService/"
                    xmlns:a="http://postnl.nl/cif/domain/DeliveryDateWebService/"
                    xmlns:b="http://schemas.microsoft.com/2003/10/Serialization/Arrays">
                  <a:DeliveryDate>30-06-2016</a:DeliveryDate>
                  <a:Options><b:string>Daytime</b:string><b:string>Evening</b:string></a:Options>
                </GetDeliveryDateResponse>
              </s:Body>
            </s:Envelope>"#,
        );
        let decoded = adapter().process_get_delivery_date_response(&response).unwrap();
        assert_eq!(decoded.delivery_date, NaiveDate::from_ymd_opt(2016, 6, 30));
        assert_eq!(
            decoded.options,
            Some(vec!["Daytime".to_string(), "Evening".to_string()])
        );
    }
}
