use super::Contract;
use crate::adapter::{AdapterSettings, ConfirmingAdapter};
use crate::entity::{Confirming, ConfirmingResponseShipment};
use crate::http::{HttpRequest, HttpResponse};
use crate::wire::{from_wire_xml, NamespaceMap, Service};
use crate::{PostNLError, PostNLResult};

const CONTRACT: Contract = Contract {
    service: Service::Confirming,
    path: "/shipment/${VERSION}/confirm",
    namespaces: NamespaceMap {
        services: "http://postnl.nl/cif/services/ConfirmingWebService/",
        domain: "http://postnl.nl/cif/domain/ConfirmingWebService/",
    },
    interface: "http://postnl.nl/cif/services/ConfirmingWebService/IConfirmingWebService",
};

/// Confirms shipments through the CIF SOAP API.
#[derive(Debug, Clone)]
pub struct ConfirmingSoapAdapter {
    settings: AdapterSettings,
}

impl ConfirmingSoapAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        ConfirmingSoapAdapter { settings }
    }
}

impl ConfirmingAdapter for ConfirmingSoapAdapter {
    fn build_confirm_request(&self, request: &Confirming) -> PostNLResult<HttpRequest> {
        super::build_request(&self.settings, &CONTRACT, "Confirming", "Confirming", request)
    }

    /// The shipment sits two levels below the operation response:
    /// `ConfirmingResponse/ConfirmingResponseShipments/ConfirmingResponseShipment`.
    fn process_confirm_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<ConfirmingResponseShipment> {
        let document = super::parse_response(response)?;
        let shipment = super::operation_response(&document)?
            .find("ConfirmingResponseShipment")
            .ok_or_else(|| PostNLError::EntityNotFound("ConfirmingResponseShipment".to_string()))?;
        from_wire_xml(shipment, &CONTRACT.context())
    }
}
