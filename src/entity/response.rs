use chrono::{NaiveDate, NaiveDateTime};
use typed_builder::TypedBuilder;

use super::{
    Amount, CompleteStatusResponseEvent, CompleteStatusResponseOldStatus, Customer, Dimension,
    Expectation, GetLocationsResult, Group, MergedLabel, ProductOption, ReasonNoTimeframe,
    ResponseShipment, Status, StatusAddress, Timeframe, Warning,
};
use crate::impl_entity;
use crate::wire::{Normalization, Sequence};

/// A generated barcode.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GenerateBarcodeResponse {
    pub barcode: Option<String>,
}

impl_entity!(GenerateBarcodeResponse as "GenerateBarcodeResponse" {
    barcode: text = "Barcode";
});

/// Outcome of confirming a single shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct ConfirmingResponseShipment {
    pub barcode: Option<String>,
    pub warnings: Option<Vec<Warning>>,
}

impl_entity!(ConfirmingResponseShipment as "ConfirmingResponseShipment", rules = [
    Normalization::Unwrap { field: "Warnings", item: "Warning" },
] {
    barcode: text = "Barcode";
    warnings: list<Warning>(Sequence::Wrapped("Warning")) = "Warnings";
});

/// Generated labels.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GenerateLabelResponse {
    pub merged_labels: Option<Vec<MergedLabel>>,
    pub response_shipments: Option<Vec<ResponseShipment>>,
}

impl_entity!(GenerateLabelResponse as "GenerateLabelResponse", rules = [
    Normalization::Unwrap { field: "MergedLabels", item: "MergedLabel" },
    Normalization::Unwrap { field: "ResponseShipments", item: "ResponseShipment" },
] {
    merged_labels: list<MergedLabel>(Sequence::Wrapped("MergedLabel")) = "MergedLabels";
    response_shipments: list<ResponseShipment>(Sequence::Wrapped("ResponseShipment")) = "ResponseShipments";
});

/// A calculated delivery date.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetDeliveryDateResponse {
    pub delivery_date: Option<NaiveDate>,
    pub options: Option<Vec<String>>,
}

impl_entity!(GetDeliveryDateResponse as "GetDeliveryDateResponse", rules = [
    Normalization::Unwrap { field: "Options", item: "string" },
] {
    delivery_date: date = "DeliveryDate";
    options: strings = "Options";
});

/// A calculated sent date.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetSentDateResponse {
    pub sent_date: Option<NaiveDate>,
    pub options: Option<Vec<String>>,
}

impl_entity!(GetSentDateResponse as "GetSentDateResponse", rules = [
    Normalization::Unwrap { field: "Options", item: "string" },
] {
    sent_date: date = "SentDate";
    options: strings = "Options";
});

/// Locations nearest to an address.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetNearestLocationsResponse {
    pub get_locations_result: Option<GetLocationsResult>,
}

impl_entity!(GetNearestLocationsResponse as "GetNearestLocationsResponse" {
    get_locations_result: entity<GetLocationsResult> = "GetLocationsResult";
});

/// Locations inside an area, or the single location of a code lookup.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetLocationsInAreaResponse {
    pub get_locations_result: Option<GetLocationsResult>,
}

impl_entity!(GetLocationsInAreaResponse as "GetLocationsInAreaResponse" {
    get_locations_result: entity<GetLocationsResult> = "GetLocationsResult";
});

/// Available timeframes and the reasons some days have none.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct ResponseTimeframes {
    pub reason_no_timeframes: Option<Vec<ReasonNoTimeframe>>,
    pub timeframes: Option<Vec<Timeframe>>,
}

impl_entity!(ResponseTimeframes as "ResponseTimeframes", rules = [
    Normalization::Unwrap { field: "ReasonNoTimeframes", item: "ReasonNoTimeframe" },
    Normalization::EmptyIfAbsent("ReasonNoTimeframes"),
    Normalization::Unwrap { field: "Timeframes", item: "Timeframe" },
    Normalization::EmptyIfAbsent("Timeframes"),
] {
    reason_no_timeframes: list<ReasonNoTimeframe>(Sequence::Wrapped("ReasonNoTimeframe")) = "ReasonNoTimeframes";
    timeframes: list<Timeframe>(Sequence::Wrapped("Timeframe")) = "Timeframes";
});

/// Current status of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CurrentStatusResponseShipment {
    pub addresses: Option<Vec<StatusAddress>>,
    pub amounts: Option<Vec<Amount>>,
    pub barcode: Option<String>,
    pub delivery_date: Option<NaiveDateTime>,
    pub dimension: Option<Dimension>,
    pub expectation: Option<Expectation>,
    pub groups: Option<Vec<Group>>,
    pub main_barcode: Option<String>,
    pub product_code: Option<String>,
    pub product_description: Option<String>,
    pub product_options: Option<Vec<ProductOption>>,
    pub reference: Option<String>,
    pub shipment_amount: Option<String>,
    pub shipment_counter: Option<String>,
    pub status: Option<Status>,
    pub warnings: Option<Vec<Warning>>,
}

impl_entity!(CurrentStatusResponseShipment as "CurrentStatusResponseShipment", rules = [
    Normalization::Alias { from: "Address", to: "Addresses" },
    Normalization::CoerceArray("Addresses"),
    Normalization::Alias { from: "Amount", to: "Amounts" },
    Normalization::CoerceArray("Amounts"),
    Normalization::Alias { from: "Group", to: "Groups" },
    Normalization::CoerceArray("Groups"),
    Normalization::Alias { from: "ProductOption", to: "ProductOptions" },
    Normalization::CoerceArray("ProductOptions"),
    Normalization::CoerceArray("Warnings"),
] {
    addresses: list<StatusAddress>(Sequence::Wrapped("StatusAddress")) = "Addresses";
    amounts: list<Amount>(Sequence::Wrapped("Amount")) = "Amounts";
    barcode: text = "Barcode";
    delivery_date: date_time = "DeliveryDate";
    dimension: entity<Dimension> = "Dimension";
    expectation: entity<Expectation> = "Expectation";
    groups: list<Group>(Sequence::Wrapped("Group")) = "Groups";
    main_barcode: text = "MainBarcode";
    product_code: text = "ProductCode";
    product_description: text = "ProductDescription";
    product_options: list<ProductOption>(Sequence::Wrapped("ProductOption")) = "ProductOptions";
    reference: text = "Reference";
    shipment_amount: text = "ShipmentAmount";
    shipment_counter: text = "ShipmentCounter";
    status: entity<Status> = "Status";
    warnings: list<Warning>(Sequence::Wrapped("Warning")) = "Warnings";
});

/// Current status of every shipment matching a barcode or reference.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CurrentStatusResponse {
    pub shipments: Option<Vec<CurrentStatusResponseShipment>>,
    pub warnings: Option<Vec<Warning>>,
}

impl_entity!(CurrentStatusResponse as "CurrentStatusResponse", rules = [
    Normalization::Alias { from: "Shipment", to: "Shipments" },
    Normalization::CoerceArray("Shipments"),
    Normalization::Alias { from: "Warning", to: "Warnings" },
    Normalization::CoerceArray("Warnings"),
] {
    shipments: list<CurrentStatusResponseShipment>(Sequence::Wrapped("CurrentStatusResponseShipment")) = "Shipments";
    warnings: list<Warning>(Sequence::Wrapped("Warning")) = "Warnings";
});

/// Complete status history of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CompleteStatusResponseShipment {
    pub addresses: Option<Vec<StatusAddress>>,
    pub amounts: Option<Vec<Amount>>,
    pub barcode: Option<String>,
    pub customer: Option<Customer>,
    pub delivery_date: Option<NaiveDateTime>,
    pub dimension: Option<Dimension>,
    pub events: Option<Vec<CompleteStatusResponseEvent>>,
    pub expectation: Option<Expectation>,
    pub groups: Option<Vec<Group>>,
    pub main_barcode: Option<String>,
    pub old_statuses: Option<Vec<CompleteStatusResponseOldStatus>>,
    pub product_code: Option<String>,
    pub product_description: Option<String>,
    pub product_options: Option<Vec<ProductOption>>,
    pub reference: Option<String>,
    pub shipment_amount: Option<String>,
    pub shipment_counter: Option<String>,
    pub status: Option<Status>,
    pub warnings: Option<Vec<Warning>>,
}

impl_entity!(CompleteStatusResponseShipment as "CompleteStatusResponseShipment", strict = true, rules = [
    Normalization::Alias { from: "Address", to: "Addresses" },
    Normalization::CoerceArray("Addresses"),
    Normalization::Alias { from: "Event", to: "Events" },
    Normalization::CoerceArray("Events"),
    Normalization::Alias { from: "OldStatus", to: "OldStatuses" },
    Normalization::CoerceArray("OldStatuses"),
    Normalization::EmptyIfAbsent("OldStatuses"),
    Normalization::CoerceArray("Amounts"),
    Normalization::CoerceArray("Groups"),
    Normalization::CoerceArray("ProductOptions"),
    Normalization::CoerceArray("Warnings"),
] {
    addresses: list<StatusAddress>(Sequence::Wrapped("StatusAddress")) = "Addresses";
    amounts: list<Amount>(Sequence::Wrapped("Amount")) = "Amounts";
    barcode: text = "Barcode";
    customer: entity<Customer> = "Customer";
    delivery_date: date_time = "DeliveryDate";
    dimension: entity<Dimension> = "Dimension";
    events: list<CompleteStatusResponseEvent>(Sequence::Wrapped("CompleteStatusResponseEvent")) = "Events";
    expectation: entity<Expectation> = "Expectation";
    groups: list<Group>(Sequence::Wrapped("Group")) = "Groups";
    main_barcode: text = "MainBarcode";
    old_statuses: list<CompleteStatusResponseOldStatus>(Sequence::Wrapped("CompleteStatusResponseOldStatus")) = "OldStatuses";
    product_code: text = "ProductCode";
    product_description: text = "ProductDescription";
    product_options: list<ProductOption>(Sequence::Wrapped("ProductOptions")) = "ProductOptions";
    reference: text = "Reference";
    shipment_amount: text = "ShipmentAmount";
    shipment_counter: text = "ShipmentCounter";
    status: entity<Status> = "Status";
    warnings: list<Warning>(Sequence::Wrapped("Warning")) = "Warnings";
});

/// Complete status history of every shipment matching a barcode or reference.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CompleteStatusResponse {
    pub shipments: Option<Vec<CompleteStatusResponseShipment>>,
    pub warnings: Option<Vec<Warning>>,
}

impl_entity!(CompleteStatusResponse as "CompleteStatusResponse", strict = true, rules = [
    Normalization::Alias { from: "Shipment", to: "Shipments" },
    Normalization::CoerceArray("Shipments"),
    Normalization::Alias { from: "Warning", to: "Warnings" },
    Normalization::CoerceArray("Warnings"),
] {
    shipments: list<CompleteStatusResponseShipment>(Sequence::Wrapped("Shipment")) = "Shipments";
    warnings: list<Warning>(Sequence::Wrapped("Warning")) = "Warnings";
});

/// The delivery signature of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetSignatureResponseSignature {
    pub barcode: Option<String>,
    /// Kept as sent, e.g. `2018-03-07T13:52:45.000+01:00`.
    pub signature_date: Option<String>,
    /// Base64 encoded image.
    pub signature_image: Option<String>,
}

impl_entity!(GetSignatureResponseSignature as "GetSignatureResponseSignature" {
    barcode: text = "Barcode";
    signature_date: text = "SignatureDate";
    signature_image: text = "SignatureImage";
});

/// A shipment whose status changed within a period.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct UpdatedShipmentsResponse {
    pub barcode: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
    pub customer_number: Option<String>,
    pub customer_code: Option<String>,
    pub status: Option<Status>,
}

impl_entity!(UpdatedShipmentsResponse as "UpdatedShipmentsResponse" {
    barcode: text = "Barcode";
    creation_date: date_time = "CreationDate";
    customer_number: text = "CustomerNumber";
    customer_code: text = "CustomerCode";
    status: entity<Status> = "Status";
});
