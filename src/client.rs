use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use typed_builder::TypedBuilder;

use crate::adapter::ApiMode;
use crate::cache::CacheStore;
use crate::credentials::ApiKey;
use crate::entity::{
    Barcode, CompleteStatus, CompleteStatusResponse, Confirming, ConfirmingResponseShipment,
    CurrentStatus, CurrentStatusResponse, Customer, GenerateBarcode, GenerateLabel,
    GenerateLabelResponse, GetSignature, GetSignatureResponseSignature, Message, Shipment,
    UpdatedShipmentsResponse,
};
use crate::service::{
    BarcodeService, ConfirmingService, DeliveryDateService, LabellingService, LocationService,
    ServiceConfig, ShippingStatusService, TimeframeService,
};
use crate::transport::{HttpClient, ReqwestClient};
use crate::{PostNLError, PostNLResult};

/// The internal builder for constructing a `PostNL` client
#[derive(TypedBuilder)]
#[builder(build_method(into = PostNL))]
pub struct InternalPostNL {
    /// The customer on whose behalf requests are sent
    customer: Customer,
    /// The API key
    #[builder(setter(transform = |api_key: &str| ApiKey::new(api_key)))]
    api_key: ApiKey,
    /// Send requests to the sandbox
    #[builder(default = false)]
    sandbox: bool,
    /// Initial wire protocol of every service
    #[builder(default)]
    mode: ApiMode,
    /// The HTTP collaborator
    #[builder(default = Arc::new(ReqwestClient::default()))]
    http_client: Arc<dyn HttpClient>,
    /// Store for raw responses
    #[builder(default, setter(strip_option))]
    cache: Option<Arc<dyn CacheStore>>,
    /// Lifetime of cached responses
    #[builder(default, setter(strip_option))]
    ttl: Option<Duration>,
}

/// The PostNL client.
///
/// Holds one facade per service and offers shortcuts that fill in the configured customer and
/// a fresh message.
///
/// ## Example
///
/// ```rust,no_run
/// use postnl_rs::entity::{Address, Customer};
/// use postnl_rs::PostNL;
///
/// #[tokio::main]
/// async fn main() {
///     let client = PostNL::builder()
///         .customer(
///             Customer::builder()
///                 .customer_code("DEVC")
///                 .customer_number("11223344")
///                 .address(Address::builder().address_type("02").zipcode("2132WT").build())
///                 .build(),
///         )
///         .api_key("my-api-key")
///         .sandbox(true)
///         .build();
///     let barcode = client.generate_barcode("3S", None, None, false).await;
///     println!("{:?}", barcode);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PostNL {
    customer: Customer,
    barcode: BarcodeService,
    confirming: ConfirmingService,
    labelling: LabellingService,
    delivery_date: DeliveryDateService,
    location: LocationService,
    timeframe: TimeframeService,
    shipping_status: ShippingStatusService,
}

impl From<InternalPostNL> for PostNL {
    fn from(client: InternalPostNL) -> Self {
        let config = ServiceConfig {
            api_key: client.api_key,
            sandbox: client.sandbox,
            mode: client.mode,
            http_client: client.http_client,
            cache: client.cache,
            ttl: client.ttl,
            version: None,
        };

        PostNL {
            customer: client.customer,
            barcode: BarcodeService::new(config.clone()),
            confirming: ConfirmingService::new(config.clone()),
            labelling: LabellingService::new(config.clone()),
            delivery_date: DeliveryDateService::new(config.clone()),
            location: LocationService::new(config.clone()),
            timeframe: TimeframeService::new(config.clone()),
            shipping_status: ShippingStatusService::new(config),
        }
    }
}

impl PostNL {
    /// Creates a builder for the client
    pub fn builder() -> InternalPostNLBuilder {
        InternalPostNL::builder()
    }

    /// The configured customer.
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Switches the wire protocol of every service.
    pub fn set_api_mode(&mut self, mode: ApiMode) {
        self.barcode.set_api_mode(mode);
        self.confirming.set_api_mode(mode);
        self.labelling.set_api_mode(mode);
        self.delivery_date.set_api_mode(mode);
        self.location.set_api_mode(mode);
        self.timeframe.set_api_mode(mode);
        self.shipping_status.set_api_mode(mode);
    }

    /// The barcode service.
    pub fn barcode_service(&self) -> &BarcodeService {
        &self.barcode
    }

    /// The confirming service.
    pub fn confirming_service(&self) -> &ConfirmingService {
        &self.confirming
    }

    /// The labelling service.
    pub fn labelling_service(&self) -> &LabellingService {
        &self.labelling
    }

    /// The delivery date service.
    pub fn delivery_date_service(&self) -> &DeliveryDateService {
        &self.delivery_date
    }

    /// The location service.
    pub fn location_service(&self) -> &LocationService {
        &self.location
    }

    /// The timeframe service.
    pub fn timeframe_service(&self) -> &TimeframeService {
        &self.timeframe
    }

    /// The shipping status service.
    pub fn shipping_status_service(&self) -> &ShippingStatusService {
        &self.shipping_status
    }

    /// Generates a barcode of `barcode_type` (`2S`, `3S` or a GlobalPack type).
    ///
    /// Without a `range` the customer code is used, or the GlobalPack customer code for
    /// GlobalPack types. Without a `serie` one is derived from the type and range; `eps`
    /// selects the series of European parcels.
    pub async fn generate_barcode(
        &self,
        barcode_type: &str,
        range: Option<&str>,
        serie: Option<&str>,
        eps: bool,
    ) -> PostNLResult<String> {
        let range = match range {
            Some(range) => range.to_string(),
            None => self.default_range(barcode_type)?,
        };
        let serie = match serie {
            Some(serie) => serie.to_string(),
            None => barcode_serie(barcode_type, &range, eps)?.to_string(),
        };

        let request = GenerateBarcode::builder()
            .message(Message::new())
            .customer(self.customer.clone())
            .barcode(
                Barcode::builder()
                    .r#type(barcode_type)
                    .range(range)
                    .serie(serie)
                    .build(),
            )
            .build();
        self.barcode
            .generate_barcode(&request)
            .await?
            .barcode
            .ok_or_else(|| PostNLError::EntityNotFound("Barcode".into()))
    }

    fn default_range(&self, barcode_type: &str) -> PostNLResult<String> {
        let range = if matches!(barcode_type, "2S" | "3S") {
            self.customer.customer_code.as_ref()
        } else {
            self.customer.global_pack_customer_code.as_ref()
        };
        range.cloned().ok_or_else(|| {
            PostNLError::InvalidBarcode(format!("no range configured for type {barcode_type}"))
        })
    }

    /// Generates the label of a single shipment.
    ///
    /// `printer_type` defaults to `GraphicFile|PDF`.
    pub async fn generate_label(
        &self,
        shipment: Shipment,
        printer_type: Option<&str>,
        confirm: bool,
    ) -> PostNLResult<GenerateLabelResponse> {
        let request = self.label_request(shipment, printer_type, None);
        self.labelling.generate_label(&request, confirm).await
    }

    /// Generates labels for many shipments at once, keyed like `shipments`.
    pub async fn generate_labels(
        &self,
        shipments: impl IntoIterator<Item = (String, Shipment)>,
        printer_type: Option<&str>,
        confirm: bool,
    ) -> BTreeMap<String, PostNLResult<GenerateLabelResponse>> {
        let requests = shipments
            .into_iter()
            .map(|(id, shipment)| self.label_request(shipment, printer_type, Some(id)))
            .collect::<Vec<_>>();
        self.labelling.generate_labels(&requests, confirm).await
    }

    fn label_request(
        &self,
        shipment: Shipment,
        printer_type: Option<&str>,
        id: Option<String>,
    ) -> GenerateLabel {
        GenerateLabel {
            customer: Some(self.customer.clone()),
            message: Some(Message::labelling(printer_type)),
            shipments: Some(vec![shipment]),
            label_signature: None,
            id,
        }
    }

    /// Confirms a single shipment.
    pub async fn confirm_shipment(
        &self,
        shipment: Shipment,
    ) -> PostNLResult<ConfirmingResponseShipment> {
        let request = Confirming::builder()
            .customer(self.customer.clone())
            .message(Message::new())
            .shipments(vec![shipment])
            .build();
        self.confirming.confirm_shipment(&request).await
    }

    /// Current status of the shipment with `barcode`.
    pub async fn current_status_by_barcode(
        &self,
        barcode: &str,
    ) -> PostNLResult<CurrentStatusResponse> {
        let request = CurrentStatus::builder()
            .message(Message::new())
            .shipment(Shipment::builder().barcode(barcode).build())
            .build();
        self.shipping_status.current_status(&request).await
    }

    /// Current status of the shipment with the customer `reference`.
    pub async fn current_status_by_reference(
        &self,
        reference: &str,
    ) -> PostNLResult<CurrentStatusResponse> {
        let request = CurrentStatus::builder()
            .customer(self.customer.clone())
            .message(Message::new())
            .shipment(Shipment::builder().reference(reference).build())
            .build();
        self.shipping_status.current_status(&request).await
    }

    /// Complete status history of the shipment with `barcode`.
    pub async fn complete_status_by_barcode(
        &self,
        barcode: &str,
    ) -> PostNLResult<CompleteStatusResponse> {
        let request = CompleteStatus::builder()
            .message(Message::new())
            .shipment(Shipment::builder().barcode(barcode).build())
            .build();
        self.shipping_status.complete_status(&request).await
    }

    /// Delivery signature of the shipment with `barcode`.
    pub async fn get_signature(&self, barcode: &str) -> PostNLResult<GetSignatureResponseSignature> {
        let request = GetSignature::builder()
            .message(Message::new())
            .shipment(Shipment::builder().barcode(barcode).build())
            .build();
        self.shipping_status.get_signature(&request).await
    }

    /// Shipments of the configured customer updated within `period`.
    pub async fn get_updated_shipments(
        &self,
        period: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> PostNLResult<Vec<UpdatedShipmentsResponse>> {
        self.shipping_status
            .get_updated_shipments(&self.customer, period)
            .await
    }
}

/// The serie of barcode numbers to draw from.
///
/// `2S` always uses `0000000-9999999`. Domestic `3S` barcodes use `987000000-987600000` for
/// four character ranges; European `3S` barcodes are chosen by range length. Every other type
/// is a GlobalPack type and uses `0000-9999`.
pub fn barcode_serie(barcode_type: &str, range: &str, eps: bool) -> PostNLResult<&'static str> {
    match barcode_type {
        "2S" => Ok("0000000-9999999"),
        "3S" if eps => match range.len() {
            4 => Ok("0000000-9999999"),
            3 => Ok("10000000-20000000"),
            1 => Ok("5200000000-5299999999"),
            _ => Err(PostNLError::InvalidBarcode(format!(
                "no EPS serie for range {range}"
            ))),
        },
        "3S" if range.len() == 4 => Ok("987000000-987600000"),
        "3S" => Ok("0000000-9999999"),
        _ => Ok("0000-9999"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_follow_type_and_range() {
        assert_eq!(barcode_serie("2S", "DEVC", false).unwrap(), "0000000-9999999");
        assert_eq!(barcode_serie("3S", "DEVC", false).unwrap(), "987000000-987600000");
        assert_eq!(barcode_serie("3S", "DEV", false).unwrap(), "0000000-9999999");
        assert_eq!(barcode_serie("3S", "DEVC", true).unwrap(), "0000000-9999999");
        assert_eq!(barcode_serie("3S", "DEV", true).unwrap(), "10000000-20000000");
        assert_eq!(barcode_serie("3S", "D", true).unwrap(), "5200000000-5299999999");
        assert_eq!(barcode_serie("CD", "1234", false).unwrap(), "0000-9999");
        assert!(matches!(
            barcode_serie("3S", "DE", true),
            Err(PostNLError::InvalidBarcode(_))
        ));
    }
}
