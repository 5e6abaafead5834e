use chrono::{Local, NaiveDateTime};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::impl_entity;
use crate::wire::{Normalization, Sequence};

/// Uppercases a zipcode and strips its spaces.
pub fn normalize_zipcode(zipcode: String) -> String {
    zipcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Left-pads an address type to two characters with `0`.
pub fn normalize_address_type(address_type: String) -> String {
    format!("{address_type:0>2}")
}

/// A postal address.
///
/// `AddressType` `01` is the receiver, `02` the sender; see the PostNL documentation for the
/// remaining codes.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
pub struct Address {
    #[builder(default, setter(transform = |address_type: &str| Some(normalize_address_type(address_type.to_string()))))]
    pub address_type: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub area: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub buildingname: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub city: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub company_name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub countrycode: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub department: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub doorcode: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub first_name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub floor: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub house_nr: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub house_nr_ext: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub street_house_nr_ext: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub region: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub remark: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub street: Option<String>,
    #[builder(default, setter(transform = |zipcode: &str| Some(normalize_zipcode(zipcode.to_string()))))]
    pub zipcode: Option<String>,
}

impl_entity!(Address as "Address" {
    address_type: text = "AddressType" => normalize_address_type;
    area: text = "Area";
    buildingname: text = "Buildingname";
    city: text = "City";
    company_name: text = "CompanyName";
    countrycode: text = "Countrycode";
    department: text = "Department";
    doorcode: text = "Doorcode";
    first_name: text = "FirstName";
    floor: text = "Floor";
    house_nr: text = "HouseNr";
    house_nr_ext: text = "HouseNrExt";
    street_house_nr_ext: text = "StreetHouseNrExt";
    name: text = "Name";
    region: text = "Region";
    remark: text = "Remark";
    street: text = "Street";
    zipcode: text = "Zipcode" => normalize_zipcode;
});

/// The customer on whose behalf requests are sent.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Customer {
    pub address: Option<Address>,
    pub collection_location: Option<String>,
    pub contact_person: Option<String>,
    pub customer_code: Option<String>,
    pub customer_number: Option<String>,
    pub global_pack_customer_code: Option<String>,
    pub global_pack_barcode_type: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl_entity!(Customer as "Customer" {
    address: entity<Address> = "Address";
    collection_location: text = "CollectionLocation";
    contact_person: text = "ContactPerson";
    customer_code: text = "CustomerCode";
    customer_number: text = "CustomerNumber";
    global_pack_customer_code: text = "GlobalPackCustomerCode";
    global_pack_barcode_type: text = "GlobalPackBarcodeType";
    email: text = "Email";
    name: text = "Name";
});

/// Printer type requested when none is given.
pub const DEFAULT_PRINTER_TYPE: &str = "GraphicFile|PDF";

/// Message header identifying a request.
///
/// `Printertype` is only sent to the labelling service.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(setter(strip_option, into)))]
pub struct Message {
    #[builder(default = Some(new_message_id()))]
    pub message_id: Option<String>,
    #[builder(default = Some(Local::now().naive_local()))]
    pub message_time_stamp: Option<NaiveDateTime>,
    #[builder(default)]
    pub printertype: Option<String>,
}

impl Message {
    /// A message with a fresh identifier and the current time.
    pub fn new() -> Self {
        Message::builder().build()
    }

    /// A labelling message requesting `printer_type`, or [`DEFAULT_PRINTER_TYPE`].
    pub fn labelling(printer_type: Option<&str>) -> Self {
        Message::builder()
            .printertype(printer_type.unwrap_or(DEFAULT_PRINTER_TYPE))
            .build()
    }
}

/// 12 hex characters taken from a random UUID.
fn new_message_id() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

impl_entity!(Message as "Message" {
    message_id: text = "MessageID";
    message_time_stamp: date_time = "MessageTimeStamp";
    printertype: text = "Printertype";
});

/// A warning attached to a response.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Warning {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl_entity!(Warning as "Warning" {
    code: text = "Code";
    description: text = "Description";
});

/// An amount of money attached to a shipment (COD, insurance).
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Amount {
    pub account_name: Option<String>,
    pub amount_type: Option<String>,
    pub bic: Option<String>,
    pub currency: Option<String>,
    pub iban: Option<String>,
    pub reference: Option<String>,
    pub transaction_number: Option<String>,
    pub value: Option<String>,
}

impl_entity!(Amount as "Amount" {
    account_name: text = "AccountName";
    amount_type: text = "AmountType";
    bic: text = "BIC";
    currency: text = "Currency";
    iban: text = "IBAN";
    reference: text = "Reference";
    transaction_number: text = "TransactionNumber";
    value: text = "Value";
});

/// Contact details of the receiver.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Contact {
    pub contact_type: Option<String>,
    pub email: Option<String>,
    pub sms_nr: Option<String>,
    pub tel_nr: Option<String>,
}

impl_entity!(Contact as "Contact" {
    contact_type: text = "ContactType";
    email: text = "Email";
    sms_nr: text = "SMSNr";
    tel_nr: text = "TelNr";
});

/// A line of a customs declaration.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Content {
    pub country_of_origin: Option<String>,
    pub description: Option<String>,
    pub hs_tariff_nr: Option<String>,
    pub quantity: Option<String>,
    pub value: Option<String>,
    pub weight: Option<String>,
    pub content: Option<Vec<Content>>,
}

impl_entity!(Content as "Content" {
    country_of_origin: text = "CountryOfOrigin";
    description: text = "Description";
    hs_tariff_nr: text = "HSTariffNr";
    quantity: text = "Quantity";
    value: text = "Value";
    weight: text = "Weight";
    content: list<Content>(Sequence::Wrapped("Content")) = "Content";
});

/// Customs declaration of a shipment outside the EU.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Customs {
    pub certificate: Option<String>,
    pub certificate_nr: Option<String>,
    pub license: Option<String>,
    pub license_nr: Option<String>,
    pub invoice: Option<String>,
    pub invoice_nr: Option<String>,
    pub handle_as_non_deliverable: Option<String>,
    pub currency: Option<String>,
    pub shipment_type: Option<String>,
    pub trusted_shipper_id: Option<String>,
    pub importer_reference_code: Option<String>,
    pub transaction_code: Option<String>,
    pub transaction_description: Option<String>,
    pub content: Option<Vec<Content>>,
}

impl_entity!(Customs as "Customs" {
    certificate: text = "Certificate";
    certificate_nr: text = "CertificateNr";
    license: text = "License";
    license_nr: text = "LicenseNr";
    invoice: text = "Invoice";
    invoice_nr: text = "InvoiceNr";
    handle_as_non_deliverable: text = "HandleAsNonDeliverable";
    currency: text = "Currency";
    shipment_type: text = "ShipmentType";
    trusted_shipper_id: text = "TrustedShipperID";
    importer_reference_code: text = "ImporterReferenceCode";
    transaction_code: text = "TransactionCode";
    transaction_description: text = "TransactionDescription";
    content: list<Content>(Sequence::Wrapped("Content")) = "Content";
});

/// Weight (grams) and measurements (millimetres) of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Dimension {
    pub height: Option<String>,
    pub length: Option<String>,
    pub volume: Option<String>,
    pub weight: Option<String>,
    pub width: Option<String>,
}

impl_entity!(Dimension as "Dimension" {
    height: text = "Height";
    length: text = "Length";
    volume: text = "Volume";
    weight: text = "Weight";
    width: text = "Width";
});

/// Multi-collo grouping of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Group {
    pub group_count: Option<String>,
    pub group_sequence: Option<String>,
    pub group_type: Option<String>,
    pub main_barcode: Option<String>,
}

impl_entity!(Group as "Group" {
    group_count: text = "GroupCount";
    group_sequence: text = "GroupSequence";
    group_type: text = "GroupType";
    main_barcode: text = "MainBarcode";
});

/// An additional product option (characteristic and option code).
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct ProductOption {
    pub characteristic: Option<String>,
    pub option: Option<String>,
}

impl_entity!(ProductOption as "ProductOption" {
    characteristic: text = "Characteristic";
    option: text = "Option";
});

/// Product codes that carry insurance.
pub const INSURED_PRODUCT_CODES: [u32; 4] = [3534, 3544, 3087, 3094];

/// A shipment to label, confirm or track.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Shipment {
    pub addresses: Option<Vec<Address>>,
    pub amounts: Option<Vec<Amount>>,
    pub barcode: Option<String>,
    pub coding_text: Option<String>,
    pub collection_time_stamp_start: Option<String>,
    pub collection_time_stamp_end: Option<String>,
    pub contacts: Option<Vec<Contact>>,
    pub content: Option<String>,
    pub cost_center: Option<String>,
    pub customer_order_number: Option<String>,
    pub customer: Option<Customer>,
    pub customs: Option<Customs>,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<NaiveDateTime>,
    pub delivery_time_stamp_start: Option<String>,
    pub delivery_time_stamp_end: Option<String>,
    pub dimension: Option<Dimension>,
    pub down_partner_barcode: Option<String>,
    pub down_partner_id: Option<String>,
    pub down_partner_location: Option<String>,
    pub groups: Option<Vec<Group>>,
    pub id_expiration: Option<String>,
    pub id_number: Option<String>,
    pub id_type: Option<String>,
    pub product_code_collect: Option<String>,
    pub product_code_delivery: Option<String>,
    pub product_options: Option<Vec<ProductOption>>,
    pub receiver_date_of_birth: Option<String>,
    pub reference: Option<String>,
    pub reference_collect: Option<String>,
    pub remark: Option<String>,
    pub return_barcode: Option<String>,
    pub return_reference: Option<String>,
    pub date_from: Option<NaiveDateTime>,
    pub date_to: Option<NaiveDateTime>,
    pub phase_code: Option<String>,
    pub status_code: Option<String>,
}

impl Shipment {
    /// Whether the delivery product code is one of [`INSURED_PRODUCT_CODES`].
    pub fn is_insured_product(&self) -> bool {
        self.product_code_delivery
            .as_deref()
            .and_then(|code| code.trim().parse::<u32>().ok())
            .is_some_and(|code| INSURED_PRODUCT_CODES.contains(&code))
    }
}

impl_entity!(Shipment as "Shipment" {
    addresses: list<Address>(Sequence::Wrapped("Address")) = "Addresses";
    amounts: list<Amount>(Sequence::Wrapped("Amount")) = "Amounts";
    barcode: text = "Barcode";
    coding_text: text = "CodingText";
    collection_time_stamp_start: text = "CollectionTimeStampStart";
    collection_time_stamp_end: text = "CollectionTimeStampEnd";
    contacts: list<Contact>(Sequence::Wrapped("Contact")) = "Contacts";
    content: text = "Content";
    cost_center: text = "CostCenter";
    customer_order_number: text = "CustomerOrderNumber";
    customer: entity<Customer> = "Customer";
    customs: entity<Customs> = "Customs";
    delivery_address: text = "DeliveryAddress";
    delivery_date: date_time = "DeliveryDate";
    delivery_time_stamp_start: text = "DeliveryTimeStampStart";
    delivery_time_stamp_end: text = "DeliveryTimeStampEnd";
    dimension: entity<Dimension> = "Dimension";
    down_partner_barcode: text = "DownPartnerBarcode";
    down_partner_id: text = "DownPartnerID";
    down_partner_location: text = "DownPartnerLocation";
    groups: list<Group>(Sequence::Wrapped("Group")) = "Groups";
    id_expiration: text = "IDExpiration";
    id_number: text = "IDNumber";
    id_type: text = "IDType";
    product_code_collect: text = "ProductCodeCollect";
    product_code_delivery: text = "ProductCodeDelivery";
    product_options: list<ProductOption>(Sequence::Wrapped("ProductOption")) = "ProductOptions";
    receiver_date_of_birth: text = "ReceiverDateOfBirth";
    reference: text = "Reference";
    reference_collect: text = "ReferenceCollect";
    remark: text = "Remark";
    return_barcode: text = "ReturnBarcode";
    return_reference: text = "ReturnReference";
    date_from: date_time = "DateFrom";
    date_to: date_time = "DateTo";
    phase_code: text = "PhaseCode";
    status_code: text = "StatusCode";
});

/// Barcode type, range and serie.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Barcode {
    #[builder(default = Some("3S".to_string()))]
    pub r#type: Option<String>,
    pub range: Option<String>,
    #[builder(default = Some("000000000-999999999".to_string()))]
    pub serie: Option<String>,
}

impl_entity!(Barcode as "Barcode" {
    r#type: text = "Type";
    range: text = "Range";
    serie: text = "Serie";
});

/// Cut-off time for one day of the week.
///
/// `Day` runs from `01` (Monday) to `07` (Sunday); `00` applies to every day.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CutOffTime {
    pub day: Option<String>,
    pub time: Option<String>,
    pub available: Option<bool>,
}

impl_entity!(CutOffTime as "CutOffTime" {
    day: text = "Day";
    time: text = "Time";
    available: flag_str = "Available";
});

/// A geographic coordinate.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Coordinates {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl_entity!(Coordinates as "Coordinates" {
    latitude: text = "Latitude";
    longitude: text = "Longitude";
});

/// Criteria of a location lookup.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Location {
    pub allow_sunday_sorting: Option<bool>,
    pub delivery_date: Option<chrono::NaiveDate>,
    pub delivery_options: Option<Vec<String>>,
    pub opening_time: Option<String>,
    pub options: Option<Vec<String>>,
    pub city: Option<String>,
    pub house_nr: Option<String>,
    pub house_nr_ext: Option<String>,
    pub postalcode: Option<String>,
    pub street: Option<String>,
    pub coordinates_north_west: Option<Coordinates>,
    pub coordinates_south_east: Option<Coordinates>,
    pub location_code: Option<String>,
    pub saleschannel: Option<String>,
    pub terminal_type: Option<Vec<String>>,
    pub retail_network_id: Option<String>,
}

impl_entity!(Location as "Location" {
    allow_sunday_sorting: flag = "AllowSundaySorting";
    delivery_date: date = "DeliveryDate";
    delivery_options: strings = "DeliveryOptions";
    opening_time: text = "OpeningTime";
    options: strings = "Options";
    city: text = "City";
    house_nr: text = "HouseNr";
    house_nr_ext: text = "HouseNrExt";
    postalcode: text = "Postalcode";
    street: text = "Street";
    coordinates_north_west: entity<Coordinates> = "CoordinatesNorthWest";
    coordinates_south_east: entity<Coordinates> = "CoordinatesSouthEast";
    location_code: text = "LocationCode";
    saleschannel: text = "Saleschannel";
    terminal_type: strings = "TerminalType";
    retail_network_id: text = "RetailNetworkID";
});

/// Criteria of a timeframe calculation, also used for each returned day.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Timeframe {
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub house_nr: Option<String>,
    pub house_nr_ext: Option<String>,
    pub interval: Option<String>,
    pub options: Option<Vec<String>>,
    pub postal_code: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub street: Option<String>,
    pub sunday_sorting: Option<bool>,
    pub timeframe_range: Option<String>,
    pub timeframes: Option<Vec<TimeframeTimeFrame>>,
}

impl_entity!(Timeframe as "Timeframe", rules = [
    Normalization::Unwrap { field: "Timeframes", item: "TimeframeTimeFrame" },
    Normalization::Unwrap { field: "Options", item: "string" },
] {
    city: text = "City";
    country_code: text = "CountryCode";
    date: date = "Date";
    end_date: date = "EndDate";
    house_nr: text = "HouseNr";
    house_nr_ext: text = "HouseNrExt";
    interval: text = "Interval";
    options: strings = "Options";
    postal_code: text = "PostalCode";
    start_date: date = "StartDate";
    street: text = "Street";
    sunday_sorting: flag = "SundaySorting";
    timeframe_range: text = "TimeframeRange";
    timeframes: list<TimeframeTimeFrame>(Sequence::Wrapped("TimeframeTimeFrame")) = "Timeframes";
});

/// A single delivery window within a day.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct TimeframeTimeFrame {
    pub from: Option<String>,
    pub options: Option<Vec<String>>,
    pub to: Option<String>,
}

impl_entity!(TimeframeTimeFrame as "TimeframeTimeFrame", rules = [
    Normalization::Unwrap { field: "Options", item: "string" },
] {
    from: text = "From";
    options: strings = "Options";
    to: text = "To";
});

/// Why no timeframe is available on a date.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct ReasonNoTimeframe {
    pub code: Option<String>,
    pub date: Option<chrono::NaiveDate>,
    pub description: Option<String>,
    pub options: Option<Vec<String>>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl_entity!(ReasonNoTimeframe as "ReasonNoTimeframe", rules = [
    Normalization::Unwrap { field: "Options", item: "string" },
] {
    code: text = "Code";
    date: date = "Date";
    description: text = "Description";
    options: strings = "Options";
    from: text = "From";
    to: text = "To";
});

/// The current status of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Status {
    pub current_phase_code: Option<String>,
    pub current_phase_description: Option<String>,
    pub current_status_code: Option<String>,
    pub current_status_description: Option<String>,
    pub current_status_time_stamp: Option<String>,
}

impl_entity!(Status as "Status" {
    current_phase_code: text = "CurrentPhaseCode";
    current_phase_description: text = "CurrentPhaseDescription";
    current_status_code: text = "CurrentStatusCode";
    current_status_description: text = "CurrentStatusDescription";
    current_status_time_stamp: text = "CurrentStatusTimeStamp";
});

/// Expected delivery window of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Expectation {
    pub eta_from: Option<String>,
    pub eta_to: Option<String>,
}

impl_entity!(Expectation as "Expectation" {
    eta_from: text = "ETAFrom";
    eta_to: text = "ETATo";
});

/// An address as reported by the status service.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct StatusAddress {
    pub address_type: Option<String>,
    pub building: Option<String>,
    pub city: Option<String>,
    pub company_name: Option<String>,
    pub country_code: Option<String>,
    pub department_name: Option<String>,
    pub district: Option<String>,
    pub first_name: Option<String>,
    pub floor: Option<String>,
    pub house_number: Option<String>,
    pub house_number_suffix: Option<String>,
    pub last_name: Option<String>,
    pub region: Option<String>,
    pub registration_date: Option<String>,
    pub remark: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
}

impl_entity!(StatusAddress as "StatusAddress" {
    address_type: text = "AddressType" => normalize_address_type;
    building: text = "Building";
    city: text = "City";
    company_name: text = "CompanyName";
    country_code: text = "CountryCode";
    department_name: text = "DepartmentName";
    district: text = "District";
    first_name: text = "FirstName";
    floor: text = "Floor";
    house_number: text = "HouseNumber";
    house_number_suffix: text = "HouseNumberSuffix";
    last_name: text = "LastName";
    region: text = "Region";
    registration_date: text = "RegistrationDate";
    remark: text = "Remark";
    street: text = "Street";
    zipcode: text = "Zipcode" => normalize_zipcode;
});

/// A scan event in the history of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CompleteStatusResponseEvent {
    pub code: Option<String>,
    pub description: Option<String>,
    pub destination_location_code: Option<String>,
    pub location_code: Option<String>,
    pub route_code: Option<String>,
    pub route_name: Option<String>,
    pub time_stamp: Option<String>,
}

impl_entity!(CompleteStatusResponseEvent as "CompleteStatusResponseEvent" {
    code: text = "Code";
    description: text = "Description";
    destination_location_code: text = "DestinationLocationCode";
    location_code: text = "LocationCode";
    route_code: text = "RouteCode";
    route_name: text = "RouteName";
    time_stamp: text = "TimeStamp";
});

/// A previous status of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CompleteStatusResponseOldStatus {
    pub status_code: Option<String>,
    pub status_description: Option<String>,
    pub phase_code: Option<String>,
    pub phase_description: Option<String>,
    pub time_stamp: Option<String>,
}

impl_entity!(CompleteStatusResponseOldStatus as "CompleteStatusResponseOldStatus" {
    status_code: text = "StatusCode";
    status_description: text = "StatusDescription";
    phase_code: text = "PhaseCode";
    phase_description: text = "PhaseDescription";
    time_stamp: text = "TimeStamp";
});

/// A generated label.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Label {
    /// Base64 encoded label document.
    pub content: Option<String>,
    pub contenttype: Option<String>,
    pub labeltype: Option<String>,
}

impl_entity!(Label as "Label" {
    content: text = "Content";
    contenttype: text = "Contenttype";
    labeltype: text = "Labeltype";
});

/// Labels of several shipments merged into one document.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct MergedLabel {
    pub barcodes: Option<Vec<String>>,
    pub labels: Option<Vec<Label>>,
}

impl_entity!(MergedLabel as "MergedLabel", rules = [
    Normalization::Unwrap { field: "Barcodes", item: "string" },
    Normalization::Unwrap { field: "Labels", item: "Label" },
] {
    barcodes: strings = "Barcodes";
    labels: list<Label>(Sequence::Wrapped("Label")) = "Labels";
});

/// A labelled shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct ResponseShipment {
    pub barcode: Option<String>,
    pub down_partner_barcode: Option<String>,
    pub down_partner_id: Option<String>,
    pub down_partner_location: Option<String>,
    pub labels: Option<Vec<Label>>,
    pub product_code_delivery: Option<String>,
    pub warnings: Option<Vec<Warning>>,
}

impl_entity!(ResponseShipment as "ResponseShipment", rules = [
    Normalization::Unwrap { field: "Labels", item: "Label" },
    Normalization::Unwrap { field: "Warnings", item: "Warning" },
] {
    barcode: text = "Barcode";
    down_partner_barcode: text = "DownPartnerBarcode";
    down_partner_id: text = "DownPartnerID";
    down_partner_location: text = "DownPartnerLocation";
    labels: list<Label>(Sequence::Wrapped("Label")) = "Labels";
    product_code_delivery: text = "ProductCodeDelivery";
    warnings: list<Warning>(Sequence::Wrapped("Warning")) = "Warnings";
});

/// Opening hours per weekday, e.g. `["08:00-18:00"]`.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct OpeningHours {
    pub monday: Option<Vec<String>>,
    pub tuesday: Option<Vec<String>>,
    pub wednesday: Option<Vec<String>>,
    pub thursday: Option<Vec<String>>,
    pub friday: Option<Vec<String>>,
    pub saturday: Option<Vec<String>>,
    pub sunday: Option<Vec<String>>,
}

impl_entity!(OpeningHours as "OpeningHours", rules = [
    Normalization::Unwrap { field: "Monday", item: "string" },
    Normalization::Unwrap { field: "Tuesday", item: "string" },
    Normalization::Unwrap { field: "Wednesday", item: "string" },
    Normalization::Unwrap { field: "Thursday", item: "string" },
    Normalization::Unwrap { field: "Friday", item: "string" },
    Normalization::Unwrap { field: "Saturday", item: "string" },
    Normalization::Unwrap { field: "Sunday", item: "string" },
] {
    monday: strings = "Monday";
    tuesday: strings = "Tuesday";
    wednesday: strings = "Wednesday";
    thursday: strings = "Thursday";
    friday: strings = "Friday";
    saturday: strings = "Saturday";
    sunday: strings = "Sunday";
});

/// A pickup location returned by the location service.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct ResponseLocation {
    pub address: Option<Address>,
    pub delivery_options: Option<Vec<String>>,
    pub distance: Option<String>,
    pub latitude: Option<String>,
    pub location_code: Option<String>,
    pub longitude: Option<String>,
    pub name: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub partner_name: Option<String>,
    pub phone_number: Option<String>,
    pub retail_network_id: Option<String>,
    pub saleschannel: Option<String>,
    pub terminal_type: Option<String>,
    pub warnings: Option<Vec<Warning>>,
}

impl_entity!(ResponseLocation as "ResponseLocation", rules = [
    Normalization::Unwrap { field: "DeliveryOptions", item: "string" },
    Normalization::Unwrap { field: "Warnings", item: "Warning" },
] {
    address: entity<Address> = "Address";
    delivery_options: strings = "DeliveryOptions";
    distance: text = "Distance";
    latitude: text = "Latitude";
    location_code: text = "LocationCode";
    longitude: text = "Longitude";
    name: text = "Name";
    opening_hours: entity<OpeningHours> = "OpeningHours";
    partner_name: text = "PartnerName";
    phone_number: text = "PhoneNumber";
    retail_network_id: text = "RetailNetworkID";
    saleschannel: text = "Saleschannel";
    terminal_type: text = "TerminalType";
    warnings: list<Warning>(Sequence::Wrapped("Warning")) = "Warnings";
});

/// The locations matching a lookup.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetLocationsResult {
    pub response_location: Option<Vec<ResponseLocation>>,
}

impl_entity!(GetLocationsResult as "GetLocationsResult", rules = [
    Normalization::CoerceArray("ResponseLocation"),
] {
    response_location: list<ResponseLocation>(Sequence::Inline) = "ResponseLocation";
});
