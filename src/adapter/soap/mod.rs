use reqwest::Method;

use super::AdapterSettings;
use crate::error::CifError;
use crate::http::{HttpRequest, HttpResponse};
use crate::impl_entity;
use crate::wire::{
    from_wire_xml, parse_document, to_wire_xml, write_document, Entity, Namespace, NamespaceMap,
    Serializable, Service, XmlContext, XmlElement, COMMON_URI,
};
use crate::{PostNLError, PostNLResult};

mod barcode;
mod confirming;
mod delivery_date;
mod labelling;
mod location;
mod timeframe;

pub use barcode::BarcodeSoapAdapter;
pub use confirming::ConfirmingSoapAdapter;
pub use delivery_date::DeliveryDateSoapAdapter;
pub use labelling::LabellingSoapAdapter;
pub use location::LocationSoapAdapter;
pub use timeframe::TimeframeSoapAdapter;

/// The WS-Security header block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Security {
    /// The token carrying the API key.
    pub username_token: Option<UsernameToken>,
}

impl_entity!(Security as "Security" {
    username_token: entity<UsernameToken> = "UsernameToken";
});

/// A WS-Security username token. The API key is sent as the password.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsernameToken {
    /// The user name; not required by PostNL.
    pub username: Option<String>,
    /// The API key.
    pub password: Option<String>,
}

impl_entity!(UsernameToken as "UsernameToken" {
    username: text = "Username";
    password: text = "Password";
});

/// Endpoint, namespaces and SOAP action prefix of one CIF web service.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Contract {
    pub service: Service,
    pub path: &'static str,
    pub namespaces: NamespaceMap,
    /// `http://postnl.nl/cif/services/<Name>WebService/I<Name>WebService`
    pub interface: &'static str,
}

impl Contract {
    pub fn context(&self) -> XmlContext {
        XmlContext {
            service: self.service,
            namespaces: self.namespaces,
        }
    }
}

/// Builds an enveloped SOAP request with `body` serialized under `{services}operation`.
pub(crate) fn build_request(
    settings: &AdapterSettings,
    contract: &Contract,
    operation: &str,
    action: &str,
    body: &dyn Serializable,
) -> PostNLResult<HttpRequest> {
    let namespaces = &contract.namespaces;
    let envelope_uri = namespaces.uri(Namespace::Envelope);
    let security = Security {
        username_token: Some(UsernameToken {
            username: None,
            password: Some(settings.api_key.expose().to_string()),
        }),
    };

    let envelope = XmlElement::new(Some(envelope_uri), "Envelope")
        .with_child(
            XmlElement::new(Some(envelope_uri), "Header").with_child(
                XmlElement::new(Some(namespaces.uri(Namespace::Security)), "Security")
                    .with_children(to_wire_xml(&security, contract.service, namespaces)?),
            ),
        )
        .with_child(
            XmlElement::new(Some(envelope_uri), "Body").with_child(
                XmlElement::new(Some(namespaces.services), operation)
                    .with_children(to_wire_xml(body, contract.service, namespaces)?),
            ),
        );
    let document = write_document(&envelope, &namespaces.declarations())?;

    Ok(
        HttpRequest::new(Method::POST, settings.endpoint(contract.path)?)
            .header("SOAPAction", &format!("\"{}/{action}\"", contract.interface))
            .header("Accept", "text/xml")
            .header("Content-Type", "text/xml;charset=UTF-8")
            .body(document),
    )
}

/// Parses a SOAP response and rejects CIF faults before anything is decoded.
pub(crate) fn parse_response(response: &HttpResponse) -> PostNLResult<XmlElement> {
    let document = parse_document(&response.body).map_err(|error| match error {
        PostNLError::Response { message, .. } => PostNLError::Response {
            message,
            status: Some(response.status),
        },
        other => other,
    })?;
    validate_cif(&document)?;
    Ok(document)
}

/// Maps a `CifException` to [`PostNLError::Cif`] and any other fault to
/// [`PostNLError::CifDown`].
pub(crate) fn validate_cif(document: &XmlElement) -> PostNLResult<()> {
    if let Some(exception) = document.find("CifException") {
        let mut errors = Vec::new();
        collect_exception_data(exception, &mut errors);
        if errors.is_empty() {
            errors.push(CifError {
                code: None,
                description: None,
                message: exception.text.clone(),
            });
        }
        return Err(PostNLError::Cif(errors));
    }

    if let Some(fault) = document.find("Fault") {
        let message = fault
            .child_text("faultstring")
            .or_else(|| fault.find("Text").and_then(|text| text.text.as_deref()))
            .unwrap_or("SOAP fault without a reason");
        return Err(PostNLError::CifDown(message.to_string()));
    }

    if let Some(error) = bare_error(document) {
        return Err(PostNLError::CifDown(
            error.text.clone().unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    Ok(())
}

/// An `ErrorMsg` in the CIF common namespace, or one standing in for the whole body.
fn bare_error(document: &XmlElement) -> Option<&XmlElement> {
    if document.name == "ErrorMsg" {
        return Some(document);
    }
    document
        .child("Body")
        .and_then(|body| body.child("ErrorMsg"))
        .or_else(|| find_common_error(document))
}

fn find_common_error(element: &XmlElement) -> Option<&XmlElement> {
    if element.name == "ErrorMsg" && element.namespace.as_deref() == Some(COMMON_URI) {
        return Some(element);
    }
    element.children.iter().find_map(find_common_error)
}

fn collect_exception_data(element: &XmlElement, errors: &mut Vec<CifError>) {
    if element.name == "ExceptionData" {
        errors.push(CifError {
            code: element
                .child_text("ErrorNumber")
                .and_then(|code| code.trim().parse().ok()),
            description: element.child_text("Description").map(str::to_string),
            message: element.child_text("ErrorMsg").map(str::to_string),
        });
        return;
    }
    for child in &element.children {
        collect_exception_data(child, errors);
    }
}

/// The first child of `Envelope/Body`: the operation response.
pub(crate) fn operation_response(document: &XmlElement) -> PostNLResult<&XmlElement> {
    document
        .child("Body")
        .and_then(|body| body.children.first())
        .ok_or_else(|| PostNLError::response("SOAP body is empty"))
}

/// Decodes the operation response of `response` into `E`.
pub(crate) fn decode_response<E: Entity>(
    contract: &Contract,
    response: &HttpResponse,
) -> PostNLResult<E> {
    let document = parse_response(response)?;
    from_wire_xml(operation_response(&document)?, &contract.context())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ApiKey;

    const CONTRACT: Contract = Contract {
        service: Service::Barcode,
        path: "/shipment/${VERSION}/barcode",
        namespaces: NamespaceMap {
            services: "http://postnl.nl/cif/services/BarcodeWebService/",
            domain: "http://postnl.nl/cif/domain/BarcodeWebService/",
        },
        interface: "http://postnl.nl/cif/services/BarcodeWebService/IBarcodeWebService",
    };

    #[test]
    fn envelope_carries_the_api_key() {
        let settings = AdapterSettings {
            api_key: ApiKey::new("secret"),
            sandbox: true,
            version: "v1_1".to_string(),
        };
        let request = build_request(
            &settings,
            &CONTRACT,
            "GenerateBarcode",
            "GenerateBarcode",
            &crate::entity::GenerateBarcode::default(),
        )
        .unwrap();

        assert_eq!(
            request.header_value("SOAPAction"),
            Some("\"http://postnl.nl/cif/services/BarcodeWebService/IBarcodeWebService/GenerateBarcode\"")
        );
        let body = request.body.unwrap();
        let document = parse_document(&body).unwrap();
        let token = document.find("UsernameToken").unwrap();
        assert_eq!(token.child_text("Password"), Some("secret"));
        assert_eq!(
            operation_response(&document).unwrap().name,
            "GenerateBarcode"
        );
    }

    #[test]
    fn cif_exceptions_are_collected() {
        let document = parse_document(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
                <s:Body><s:Fault><faultcode>s:Client</faultcode><faultstring>Check CIFException in the detail section</faultstring>
                <detail><CifException xmlns="http://postnl.nl/cif/services/common/">
                  <Errors>
                    <ExceptionData><Description>Invalid zipcode</Description><ErrorMsg>Zipcode invalid</ErrorMsg><ErrorNumber>3</ErrorNumber></ExceptionData>
                    <ExceptionData><ErrorMsg>Street missing</ErrorMsg><ErrorNumber>4</ErrorNumber></ExceptionData>
                  </Errors>
                </CifException></detail></s:Fault></s:Body>
            </s:Envelope>"#,
        )
        .unwrap();

        match validate_cif(&document) {
            Err(PostNLError::Cif(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].code, Some(3));
                assert_eq!(errors[0].message.as_deref(), Some("Zipcode invalid"));
                assert_eq!(errors[1].description, None);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn error_messages_inside_results_are_data() {
        let document = parse_document(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
                <s:Body><GenerateLabelResponse xmlns="http://postnl.nl/cif/domain/LabellingWebService/">
                  <ResponseShipments><ResponseShipment><Warnings><Warning>
                    <Code>2</Code><ErrorMsg>Label has been printed before</ErrorMsg>
                  </Warning></Warnings></ResponseShipment></ResponseShipments>
                </GenerateLabelResponse></s:Body>
            </s:Envelope>"#,
        )
        .unwrap();
        assert!(validate_cif(&document).is_ok());

        let common = parse_document(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
                <s:Body><Response><ErrorMsg xmlns="http://postnl.nl/cif/services/common/">CIF unavailable</ErrorMsg></Response></s:Body>
            </s:Envelope>"#,
        )
        .unwrap();
        assert!(matches!(validate_cif(&common), Err(PostNLError::CifDown(message)) if message == "CIF unavailable"));

        let bare = parse_document(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
                <s:Body><ErrorMsg>Maintenance</ErrorMsg></s:Body>
            </s:Envelope>"#,
        )
        .unwrap();
        assert!(matches!(validate_cif(&bare), Err(PostNLError::CifDown(message)) if message == "Maintenance"));
    }

    #[test]
    fn plain_faults_mean_the_backend_is_down() {
        let document = parse_document(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
                <s:Body><s:Fault><faultcode>s:Server</faultcode><faultstring>Service unavailable</faultstring></s:Fault></s:Body>
            </s:Envelope>"#,
        )
        .unwrap();
        match validate_cif(&document) {
            Err(PostNLError::CifDown(message)) => assert_eq!(message, "Service unavailable"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
