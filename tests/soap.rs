mod common;

use std::sync::Arc;

use postnl_rs::entity::Shipment;
use postnl_rs::{ApiMode, HttpResponse, MockClient, PostNLError};

const LABEL_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <GenerateLabelResponse xmlns="http://postnl.nl/cif/services/LabellingWebService/"
        xmlns:a="http://postnl.nl/cif/domain/LabellingWebService/">
      <a:MergedLabels/>
      <a:ResponseShipments>
        <a:ResponseShipment>
          <a:Barcode>3SDEVC201611210</a:Barcode>
          <a:Labels>
            <a:Label>
              <a:Content>JVBERi0xLjQ=</a:Content>
              <a:Labeltype>Label</a:Labeltype>
            </a:Label>
          </a:Labels>
          <a:ProductCodeDelivery>3085</a:ProductCodeDelivery>
        </a:ResponseShipment>
      </a:ResponseShipments>
    </GenerateLabelResponse>
  </s:Body>
</s:Envelope>"#;

#[tokio::test]
async fn labels_over_soap() {
    let _guard = init_tracing_opentelemetry::TracingConfig::testing()
        .init_subscriber()
        .ok();

    let mock = Arc::new(MockClient::with_response(
        HttpResponse::new(200, LABEL_RESPONSE).header("Content-Type", "text/xml; charset=utf-8"),
    ));
    let mut client = common::client(&mock);
    client.set_api_mode(ApiMode::Soap);

    let labels = client
        .generate_label(
            Shipment::builder().barcode("3SDEVC201611210").build(),
            None,
            true,
        )
        .await
        .unwrap();

    let shipments = labels.response_shipments.unwrap();
    assert_eq!(shipments[0].barcode.as_deref(), Some("3SDEVC201611210"));
    assert_eq!(
        shipments[0].labels.as_ref().unwrap()[0].content.as_deref(),
        Some("JVBERi0xLjQ=")
    );

    let request = &mock.requests()[0];
    assert_eq!(request.method, postnl_rs::Method::POST);
    assert_eq!(request.url.path(), "/shipment/v2_2/label");
    assert_eq!(
        request.header_value("SOAPAction"),
        Some("\"http://postnl.nl/cif/services/LabellingWebService/ILabellingWebService/GenerateLabel\"")
    );
    let body = request.body.as_deref().unwrap();
    assert!(body.contains("<wsse:Password>test-api-key</wsse:Password>"));
    assert!(body.contains("<domain:CustomerCode>DEVC</domain:CustomerCode>"));
    assert!(body.contains("<domain:Barcode>3SDEVC201611210</domain:Barcode>"));
}

#[tokio::test]
async fn cif_exceptions_are_reported() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        500,
        include_str!("fixtures/cif_fault.xml"),
    )));
    let mut client = common::client(&mock);
    client.set_api_mode(ApiMode::Soap);

    let result = client
        .confirm_shipment(Shipment::builder().build())
        .await;

    match result {
        Err(PostNLError::Cif(errors)) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].code, Some(13));
            assert_eq!(
                errors[0].message.as_deref(),
                Some("Shipments: Barcode is mandatory.")
            );
            assert_eq!(errors[1].code, Some(14));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn plain_faults_mean_the_backend_is_down() {
    let mock = Arc::new(MockClient::with_response(HttpResponse::new(
        500,
        r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
          <s:Body>
            <s:Fault>
              <faultcode>s:Server</faultcode>
              <faultstring>The server was unable to process the request</faultstring>
            </s:Fault>
          </s:Body>
        </s:Envelope>"#,
    )));
    let mut client = common::client(&mock);
    client.set_api_mode(ApiMode::Soap);

    match client.generate_barcode("3S", None, None, false).await {
        Err(PostNLError::CifDown(message)) => {
            assert_eq!(message, "The server was unable to process the request")
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
