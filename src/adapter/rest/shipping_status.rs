use chrono::NaiveDateTime;
use serde_json::Value;
use url::Url;

use super::get_url;
use crate::adapter::{AdapterSettings, ShippingStatusAdapter};
use crate::entity::{
    CompleteStatus, CompleteStatusResponse, CurrentStatus, CurrentStatusResponse, Customer,
    GetSignature, GetSignatureResponseSignature, StatusLookup, UpdatedShipmentsResponse,
};
use crate::http::{HttpRequest, HttpResponse};
use crate::params::Parameters;
use crate::wire::from_json_fields;
use crate::{PostNLError, PostNLResult};

const ENDPOINT: &str = "/shipment/${VERSION}/status";
const PERIOD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Tracks shipments through the REST API. There is no SOAP counterpart.
#[derive(Debug, Clone)]
pub struct ShippingStatusRestAdapter {
    settings: AdapterSettings,
}

impl ShippingStatusRestAdapter {
    /// Creates a new adapter.
    pub fn new(settings: AdapterSettings) -> Self {
        ShippingStatusRestAdapter { settings }
    }

    fn endpoint(&self, segments: &[&str]) -> PostNLResult<Url> {
        let mut url = self.settings.endpoint(ENDPOINT)?;
        url.path_segments_mut()
            .map_err(|_| PostNLError::InvalidArgument("status endpoint has no path".into()))?
            .extend(segments);
        Ok(url)
    }

    /// Barcode lookups go to `/status/barcode/{barcode}`, reference lookups to
    /// `/status/reference/{reference}` qualified by the customer.
    fn lookup_request(&self, lookup: &dyn StatusLookup, detail: bool) -> PostNLResult<HttpRequest> {
        let mut params = Parameters::new();
        let url = match (lookup.barcode(), lookup.reference()) {
            (Some(barcode), _) => self.endpoint(&["barcode", barcode])?,
            (None, Some(reference)) => {
                let customer = lookup.customer();
                params = params
                    .param_opt(
                        "customerCode",
                        customer.and_then(|customer| customer.customer_code.as_deref()),
                    )
                    .param_opt(
                        "customerNumber",
                        customer.and_then(|customer| customer.customer_number.as_deref()),
                    );
                self.endpoint(&["reference", reference])?
            }
            (None, None) => {
                return Err(PostNLError::InvalidArgument(
                    "a barcode or a reference is required".into(),
                ))
            }
        };
        if detail {
            params = params.flag("detail", true);
        }
        Ok(get_url(&self.settings, url, &params))
    }
}

impl ShippingStatusAdapter for ShippingStatusRestAdapter {
    fn build_current_status_request(&self, request: &CurrentStatus) -> PostNLResult<HttpRequest> {
        self.lookup_request(request, false)
    }

    fn process_current_status_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<CurrentStatusResponse> {
        super::decode_wrapped(response, "CurrentStatus")
    }

    fn build_complete_status_request(
        &self,
        request: &CompleteStatus,
    ) -> PostNLResult<HttpRequest> {
        self.lookup_request(request, true)
    }

    fn process_complete_status_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<CompleteStatusResponse> {
        super::decode_wrapped(response, "CompleteStatus")
    }

    fn build_get_signature_request(&self, request: &GetSignature) -> PostNLResult<HttpRequest> {
        let barcode = request
            .barcode()
            .ok_or_else(|| PostNLError::InvalidArgument("a barcode is required".into()))?;
        Ok(get_url(
            &self.settings,
            self.endpoint(&["signature", barcode])?,
            &Parameters::new(),
        ))
    }

    fn process_get_signature_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<GetSignatureResponseSignature> {
        super::decode_wrapped(response, "Signature")
    }

    fn build_get_updated_shipments_request(
        &self,
        customer: &Customer,
        period: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> PostNLResult<HttpRequest> {
        let number = customer
            .customer_number
            .as_deref()
            .ok_or_else(|| PostNLError::InvalidArgument("a customer number is required".into()))?;
        let params = match period {
            Some((from, to)) => Parameters::new()
                .append("period", from.format(PERIOD_FORMAT).to_string())
                .append("period", to.format(PERIOD_FORMAT).to_string()),
            None => Parameters::new(),
        };
        Ok(get_url(
            &self.settings,
            self.endpoint(&[number, "updatedshipments"])?,
            &params,
        ))
    }

    fn process_get_updated_shipments_response(
        &self,
        response: &HttpResponse,
    ) -> PostNLResult<Vec<UpdatedShipmentsResponse>> {
        match super::decode_body(response)? {
            Value::Array(items) => items.into_iter().map(from_json_fields).collect(),
            Value::Null => Ok(Vec::new()),
            _ => Err(PostNLError::EntityNotFound(
                "UpdatedShipmentsResponse".to_string(),
            )),
        }
    }
}
