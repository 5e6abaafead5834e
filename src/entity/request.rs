use chrono::{NaiveDate, NaiveDateTime};
use typed_builder::TypedBuilder;

use super::{Barcode, Customer, CutOffTime, Location, Message, Shipment, Timeframe};
use crate::impl_entity;
use crate::wire::Sequence;

/// Request for a new barcode.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GenerateBarcode {
    pub message: Option<Message>,
    pub customer: Option<Customer>,
    pub barcode: Option<Barcode>,
    /// Key of the request within a batch; not sent.
    pub id: Option<String>,
}

impl_entity!(GenerateBarcode as "GenerateBarcode" {
    message: entity<Message> = "Message";
    customer: entity<Customer> = "Customer";
    barcode: entity<Barcode> = "Barcode";
});

/// Request to confirm shipments.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct Confirming {
    pub customer: Option<Customer>,
    pub message: Option<Message>,
    pub shipments: Option<Vec<Shipment>>,
    /// Caller-supplied identity used for the cache key and the batch key; not sent.
    pub id: Option<String>,
}

impl_entity!(Confirming as "Confirming" {
    customer: entity<Customer> = "Customer";
    message: entity<Message> = "Message";
    shipments: list<Shipment>(Sequence::Wrapped("Shipment")) = "Shipments";
});

/// Request to generate labels.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GenerateLabel {
    pub customer: Option<Customer>,
    pub message: Option<Message>,
    pub shipments: Option<Vec<Shipment>>,
    pub label_signature: Option<String>,
    /// Caller-supplied identity used for the cache key and the batch key; not sent.
    pub id: Option<String>,
}

impl_entity!(GenerateLabel as "GenerateLabel" {
    customer: entity<Customer> = "Customer";
    message: entity<Message> = "Message";
    shipments: list<Shipment>(Sequence::Wrapped("Shipment")) = "Shipments";
    label_signature: text = "LabelSignature";
});

/// Criteria of a delivery date calculation.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct DeliveryDateQuery {
    pub allow_sunday_sorting: Option<bool>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub cut_off_times: Option<Vec<CutOffTime>>,
    pub house_nr: Option<String>,
    pub house_nr_ext: Option<String>,
    pub options: Option<Vec<String>>,
    pub origin_country_code: Option<String>,
    pub postal_code: Option<String>,
    pub shipping_date: Option<NaiveDateTime>,
    pub shipping_duration: Option<String>,
    pub street: Option<String>,
}

impl_entity!(DeliveryDateQuery as "DeliveryDateQuery" {
    allow_sunday_sorting: flag = "AllowSundaySorting";
    city: text = "City";
    country_code: text = "CountryCode";
    cut_off_times: list<CutOffTime>(Sequence::Wrapped("CutOffTime")) = "CutOffTimes";
    house_nr: text = "HouseNr";
    house_nr_ext: text = "HouseNrExt";
    options: strings = "Options";
    origin_country_code: text = "OriginCountryCode";
    postal_code: text = "PostalCode";
    shipping_date: date_time = "ShippingDate";
    shipping_duration: text = "ShippingDuration";
    street: text = "Street";
});

/// Request for the expected delivery date of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetDeliveryDate {
    pub get_delivery_date: Option<DeliveryDateQuery>,
    pub message: Option<Message>,
}

impl_entity!(GetDeliveryDate as "GetDeliveryDate" {
    get_delivery_date: entity<DeliveryDateQuery> = "GetDeliveryDate";
    message: entity<Message> = "Message";
});

/// Criteria of a sent date calculation.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct SentDateQuery {
    pub allow_sunday_sorting: Option<bool>,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub house_nr: Option<String>,
    pub house_nr_ext: Option<String>,
    pub options: Option<Vec<String>>,
    pub postal_code: Option<String>,
    pub shipping_duration: Option<String>,
    pub street: Option<String>,
}

impl_entity!(SentDateQuery as "SentDateQuery" {
    allow_sunday_sorting: flag = "AllowSundaySorting";
    city: text = "City";
    country_code: text = "CountryCode";
    delivery_date: date = "DeliveryDate";
    house_nr: text = "HouseNr";
    house_nr_ext: text = "HouseNrExt";
    options: strings = "Options";
    postal_code: text = "PostalCode";
    shipping_duration: text = "ShippingDuration";
    street: text = "Street";
});

/// Request for the date a shipment has to be sent to arrive on a delivery date.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetSentDateRequest {
    pub get_sent_date: Option<SentDateQuery>,
    pub message: Option<Message>,
}

impl_entity!(GetSentDateRequest as "GetSentDateRequest" {
    get_sent_date: entity<SentDateQuery> = "GetSentDate";
    message: entity<Message> = "Message";
});

/// Request for the locations nearest to an address.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetNearestLocations {
    pub countrycode: Option<String>,
    pub location: Option<Location>,
    pub message: Option<Message>,
}

impl_entity!(GetNearestLocations as "GetNearestLocations" {
    countrycode: text = "Countrycode";
    location: entity<Location> = "Location";
    message: entity<Message> = "Message";
});

/// Request for the locations inside a rectangle of coordinates.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetLocationsInArea {
    pub countrycode: Option<String>,
    pub location: Option<Location>,
    pub message: Option<Message>,
}

impl_entity!(GetLocationsInArea as "GetLocationsInArea" {
    countrycode: text = "Countrycode";
    location: entity<Location> = "Location";
    message: entity<Message> = "Message";
});

/// Request for a single location by its code.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetLocation {
    pub location_code: Option<String>,
    pub message: Option<Message>,
    pub retail_network_id: Option<String>,
}

impl_entity!(GetLocation as "GetLocation" {
    location_code: text = "LocationCode";
    message: entity<Message> = "Message";
    retail_network_id: text = "RetailNetworkID";
});

/// Request for delivery timeframes.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetTimeframes {
    pub message: Option<Message>,
    pub timeframe: Option<Vec<Timeframe>>,
}

impl_entity!(GetTimeframes as "GetTimeframes" {
    message: entity<Message> = "Message";
    timeframe: list<Timeframe>(Sequence::Inline) = "Timeframe";
});

/// Request for the current status of a shipment, by barcode or by reference.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CurrentStatus {
    /// Supplies `customerCode`/`customerNumber` for reference lookups.
    pub customer: Option<Customer>,
    pub message: Option<Message>,
    pub shipment: Option<Shipment>,
    /// Key of the request within a batch; not sent.
    pub id: Option<String>,
}

impl_entity!(CurrentStatus as "CurrentStatus" {
    customer: entity<Customer> = "Customer";
    message: entity<Message> = "Message";
    shipment: entity<Shipment> = "Shipment";
});

/// Request for the complete status history of a shipment, by barcode or by reference.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct CompleteStatus {
    pub customer: Option<Customer>,
    pub message: Option<Message>,
    pub shipment: Option<Shipment>,
    /// Key of the request within a batch; not sent.
    pub id: Option<String>,
}

impl_entity!(CompleteStatus as "CompleteStatus" {
    customer: entity<Customer> = "Customer";
    message: entity<Message> = "Message";
    shipment: entity<Shipment> = "Shipment";
});

/// Request for the delivery signature of a shipment.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct GetSignature {
    pub customer: Option<Customer>,
    pub message: Option<Message>,
    pub shipment: Option<Shipment>,
    /// Key of the request within a batch; not sent.
    pub id: Option<String>,
}

impl_entity!(GetSignature as "GetSignature" {
    customer: entity<Customer> = "Customer";
    message: entity<Message> = "Message";
    shipment: entity<Shipment> = "Shipment";
});

/// Accessors shared by the status requests.
pub trait StatusLookup {
    /// Barcode of the shipment, if set.
    fn barcode(&self) -> Option<&str>;
    /// Reference of the shipment, if set.
    fn reference(&self) -> Option<&str>;
    /// Caller-supplied batch key, if set.
    fn id(&self) -> Option<&str>;
    /// Customer used for reference lookups, if set.
    fn customer(&self) -> Option<&Customer>;
}

macro_rules! status_lookup {
    ($($ty:ident),*) => {
        $(
            impl StatusLookup for $ty {
                fn barcode(&self) -> Option<&str> {
                    self.shipment.as_ref().and_then(|shipment| shipment.barcode.as_deref())
                }

                fn reference(&self) -> Option<&str> {
                    self.shipment.as_ref().and_then(|shipment| shipment.reference.as_deref())
                }

                fn id(&self) -> Option<&str> {
                    self.id.as_deref()
                }

                fn customer(&self) -> Option<&Customer> {
                    self.customer.as_ref()
                }
            }
        )*
    };
}

status_lookup!(CurrentStatus, CompleteStatus, GetSignature);
