use std::collections::HashMap;
use std::sync::OnceLock;

use super::{Namespace, Service};

/// A serializable field of an entity for one service context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Name of the field on the wire.
    pub name: &'static str,
    /// Namespace qualifying the XML tag, if any.
    pub namespace: Option<Namespace>,
}

struct Entry {
    entity: &'static str,
    services: &'static [Service],
    namespace: Namespace,
    fields: &'static [&'static str],
}

const fn entry(
    entity: &'static str,
    services: &'static [Service],
    fields: &'static [&'static str],
) -> Entry {
    Entry {
        entity,
        services,
        namespace: Namespace::Domain,
        fields,
    }
}

const fn entry_in(
    entity: &'static str,
    services: &'static [Service],
    namespace: Namespace,
    fields: &'static [&'static str],
) -> Entry {
    Entry {
        entity,
        services,
        namespace,
        fields,
    }
}

use Service::{
    Barcode as BARCODE, Confirming as CONFIRMING, DeliveryDate as DELIVERY_DATE,
    Labelling as LABELLING, Location as LOCATION, ShippingStatus as SHIPPING_STATUS,
    Timeframe as TIMEFRAME,
};

const ALL: &[Service] = &Service::ALL;
const SHIPMENTS: &[Service] = &[CONFIRMING, LABELLING];
const SHIPMENTS_AND_STATUS: &[Service] = &[CONFIRMING, LABELLING, SHIPPING_STATUS];

// Multiple entries for the same entity and service append in order.
const ENTRIES: &[Entry] = &[
    // SOAP header
    entry_in("Security", ALL, Namespace::Security, &["UsernameToken"]),
    entry_in("UsernameToken", ALL, Namespace::Security, &["Username", "Password"]),
    // Shared entities
    entry(
        "Address",
        ALL,
        &[
            "AddressType",
            "Area",
            "Buildingname",
            "City",
            "CompanyName",
            "Countrycode",
            "Department",
            "Doorcode",
            "FirstName",
            "Floor",
            "HouseNr",
            "HouseNrExt",
            "StreetHouseNrExt",
            "Name",
            "Region",
            "Remark",
            "Street",
            "Zipcode",
        ],
    ),
    entry(
        "Customer",
        ALL,
        &[
            "Address",
            "CollectionLocation",
            "ContactPerson",
            "CustomerCode",
            "CustomerNumber",
        ],
    ),
    entry(
        "Customer",
        &[BARCODE, CONFIRMING, LABELLING],
        &["GlobalPackCustomerCode", "GlobalPackBarcodeType"],
    ),
    entry("Customer", ALL, &["Email", "Name"]),
    entry("Message", ALL, &["MessageID", "MessageTimeStamp"]),
    entry("Message", &[LABELLING], &["Printertype"]),
    entry("Warning", ALL, &["Code", "Description"]),
    entry(
        "Amount",
        SHIPMENTS_AND_STATUS,
        &[
            "AccountName",
            "AmountType",
            "BIC",
            "Currency",
            "IBAN",
            "Reference",
            "TransactionNumber",
            "Value",
        ],
    ),
    entry("Contact", SHIPMENTS, &["ContactType", "Email", "SMSNr", "TelNr"]),
    entry(
        "Content",
        SHIPMENTS,
        &[
            "CountryOfOrigin",
            "Description",
            "HSTariffNr",
            "Quantity",
            "Value",
            "Weight",
            "Content",
        ],
    ),
    entry(
        "Customs",
        SHIPMENTS,
        &[
            "Certificate",
            "CertificateNr",
            "License",
            "LicenseNr",
            "Invoice",
            "InvoiceNr",
            "HandleAsNonDeliverable",
            "Currency",
            "ShipmentType",
            "TrustedShipperID",
            "ImporterReferenceCode",
            "TransactionCode",
            "TransactionDescription",
            "Content",
        ],
    ),
    entry(
        "Dimension",
        SHIPMENTS_AND_STATUS,
        &["Height", "Length", "Volume", "Weight", "Width"],
    ),
    entry(
        "Group",
        SHIPMENTS_AND_STATUS,
        &["GroupCount", "GroupSequence", "GroupType", "MainBarcode"],
    ),
    entry(
        "ProductOption",
        SHIPMENTS_AND_STATUS,
        &["Characteristic", "Option"],
    ),
    entry(
        "Shipment",
        SHIPMENTS,
        &[
            "Addresses",
            "Amounts",
            "Barcode",
            "CodingText",
            "CollectionTimeStampStart",
            "CollectionTimeStampEnd",
            "Contacts",
            "Content",
            "CostCenter",
            "CustomerOrderNumber",
            "Customer",
            "Customs",
            "DeliveryAddress",
            "DeliveryDate",
            "DeliveryTimeStampStart",
            "DeliveryTimeStampEnd",
            "Dimension",
            "DownPartnerBarcode",
            "DownPartnerID",
            "DownPartnerLocation",
            "Groups",
            "IDExpiration",
            "IDNumber",
            "IDType",
            "ProductCodeCollect",
            "ProductCodeDelivery",
            "ProductOptions",
            "ReceiverDateOfBirth",
            "Reference",
            "ReferenceCollect",
            "Remark",
            "ReturnBarcode",
            "ReturnReference",
        ],
    ),
    entry(
        "Shipment",
        &[SHIPPING_STATUS],
        &[
            "Barcode",
            "DateFrom",
            "DateTo",
            "PhaseCode",
            "Reference",
            "StatusCode",
        ],
    ),
    // Barcode
    entry("Barcode", &[BARCODE], &["Type", "Range", "Serie"]),
    entry("GenerateBarcode", &[BARCODE], &["Message", "Customer", "Barcode"]),
    entry("GenerateBarcodeResponse", &[BARCODE], &["Barcode"]),
    // Confirming
    entry("Confirming", &[CONFIRMING], &["Customer", "Message", "Shipments"]),
    entry(
        "ConfirmingResponseShipment",
        &[CONFIRMING],
        &["Barcode", "Warnings"],
    ),
    // Labelling
    entry(
        "GenerateLabel",
        &[LABELLING],
        &["Customer", "Message", "Shipments", "LabelSignature"],
    ),
    entry(
        "GenerateLabelResponse",
        &[LABELLING],
        &["MergedLabels", "ResponseShipments"],
    ),
    entry("MergedLabel", &[LABELLING], &["Barcodes", "Labels"]),
    entry(
        "ResponseShipment",
        &[LABELLING],
        &[
            "Barcode",
            "DownPartnerBarcode",
            "DownPartnerID",
            "DownPartnerLocation",
            "Labels",
            "ProductCodeDelivery",
            "Warnings",
        ],
    ),
    entry("Label", &[LABELLING], &["Content", "Contenttype", "Labeltype"]),
    // DeliveryDate
    entry("CutOffTime", &[DELIVERY_DATE], &["Day", "Time", "Available"]),
    entry(
        "GetDeliveryDate",
        &[DELIVERY_DATE],
        &["GetDeliveryDate", "Message"],
    ),
    entry(
        "DeliveryDateQuery",
        &[DELIVERY_DATE],
        &[
            "AllowSundaySorting",
            "City",
            "CountryCode",
            "CutOffTimes",
            "HouseNr",
            "HouseNrExt",
            "Options",
            "OriginCountryCode",
            "PostalCode",
            "ShippingDate",
            "ShippingDuration",
            "Street",
        ],
    ),
    entry(
        "GetDeliveryDateResponse",
        &[DELIVERY_DATE],
        &["DeliveryDate", "Options"],
    ),
    entry(
        "GetSentDateRequest",
        &[DELIVERY_DATE],
        &["GetSentDate", "Message"],
    ),
    entry(
        "SentDateQuery",
        &[DELIVERY_DATE],
        &[
            "AllowSundaySorting",
            "City",
            "CountryCode",
            "DeliveryDate",
            "HouseNr",
            "HouseNrExt",
            "Options",
            "PostalCode",
            "ShippingDuration",
            "Street",
        ],
    ),
    entry("GetSentDateResponse", &[DELIVERY_DATE], &["SentDate", "Options"]),
    // Location
    entry("Coordinates", &[LOCATION], &["Latitude", "Longitude"]),
    entry(
        "Location",
        &[LOCATION],
        &[
            "AllowSundaySorting",
            "DeliveryDate",
            "DeliveryOptions",
            "OpeningTime",
            "Options",
            "City",
            "HouseNr",
            "HouseNrExt",
            "Postalcode",
            "Street",
            "CoordinatesNorthWest",
            "CoordinatesSouthEast",
            "LocationCode",
            "Saleschannel",
            "TerminalType",
            "RetailNetworkID",
        ],
    ),
    entry(
        "GetNearestLocations",
        &[LOCATION],
        &["Countrycode", "Location", "Message"],
    ),
    entry(
        "GetLocationsInArea",
        &[LOCATION],
        &["Countrycode", "Location", "Message"],
    ),
    entry(
        "GetLocation",
        &[LOCATION],
        &["LocationCode", "Message", "RetailNetworkID"],
    ),
    entry(
        "GetNearestLocationsResponse",
        &[LOCATION],
        &["GetLocationsResult"],
    ),
    entry(
        "GetLocationsInAreaResponse",
        &[LOCATION],
        &["GetLocationsResult"],
    ),
    entry("GetLocationsResult", &[LOCATION], &["ResponseLocation"]),
    entry(
        "ResponseLocation",
        &[LOCATION],
        &[
            "Address",
            "DeliveryOptions",
            "Distance",
            "Latitude",
            "LocationCode",
            "Longitude",
            "Name",
            "OpeningHours",
            "PartnerName",
            "PhoneNumber",
            "RetailNetworkID",
            "Saleschannel",
            "TerminalType",
            "Warnings",
        ],
    ),
    entry(
        "OpeningHours",
        &[LOCATION],
        &[
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ],
    ),
    // Timeframe
    entry("GetTimeframes", &[TIMEFRAME], &["Message", "Timeframe"]),
    entry(
        "Timeframe",
        &[TIMEFRAME],
        &[
            "City",
            "CountryCode",
            "Date",
            "EndDate",
            "HouseNr",
            "HouseNrExt",
            "Interval",
            "Options",
            "PostalCode",
            "StartDate",
            "Street",
            "SundaySorting",
            "TimeframeRange",
            "Timeframes",
        ],
    ),
    entry("TimeframeTimeFrame", &[TIMEFRAME], &["From", "Options", "To"]),
    entry(
        "ReasonNoTimeframe",
        &[TIMEFRAME],
        &["Code", "Date", "Description", "Options", "From", "To"],
    ),
    entry(
        "ResponseTimeframes",
        &[TIMEFRAME],
        &["ReasonNoTimeframes", "Timeframes"],
    ),
    // ShippingStatus
    entry(
        "CurrentStatus",
        &[SHIPPING_STATUS],
        &["Customer", "Message", "Shipment"],
    ),
    entry(
        "CompleteStatus",
        &[SHIPPING_STATUS],
        &["Customer", "Message", "Shipment"],
    ),
    entry(
        "GetSignature",
        &[SHIPPING_STATUS],
        &["Customer", "Message", "Shipment"],
    ),
    entry(
        "Status",
        &[SHIPPING_STATUS],
        &[
            "CurrentPhaseCode",
            "CurrentPhaseDescription",
            "CurrentStatusCode",
            "CurrentStatusDescription",
            "CurrentStatusTimeStamp",
        ],
    ),
    entry("Expectation", &[SHIPPING_STATUS], &["ETAFrom", "ETATo"]),
    entry(
        "StatusAddress",
        &[SHIPPING_STATUS],
        &[
            "AddressType",
            "Building",
            "City",
            "CompanyName",
            "CountryCode",
            "DepartmentName",
            "District",
            "FirstName",
            "Floor",
            "HouseNumber",
            "HouseNumberSuffix",
            "LastName",
            "Region",
            "RegistrationDate",
            "Remark",
            "Street",
            "Zipcode",
        ],
    ),
    entry(
        "CompleteStatusResponseEvent",
        &[SHIPPING_STATUS],
        &[
            "Code",
            "Description",
            "DestinationLocationCode",
            "LocationCode",
            "RouteCode",
            "RouteName",
            "TimeStamp",
        ],
    ),
    entry(
        "CompleteStatusResponseOldStatus",
        &[SHIPPING_STATUS],
        &[
            "StatusCode",
            "StatusDescription",
            "PhaseCode",
            "PhaseDescription",
            "TimeStamp",
        ],
    ),
    entry(
        "CurrentStatusResponseShipment",
        &[SHIPPING_STATUS],
        &[
            "Addresses",
            "Amounts",
            "Barcode",
            "DeliveryDate",
            "Dimension",
            "Expectation",
            "Groups",
            "MainBarcode",
            "ProductCode",
            "ProductDescription",
            "ProductOptions",
            "Reference",
            "ShipmentAmount",
            "ShipmentCounter",
            "Status",
            "Warnings",
        ],
    ),
    entry(
        "CurrentStatusResponse",
        &[SHIPPING_STATUS],
        &["Shipments", "Warnings"],
    ),
    entry(
        "CompleteStatusResponseShipment",
        &[SHIPPING_STATUS],
        &[
            "Addresses",
            "Amounts",
            "Barcode",
            "Customer",
            "DeliveryDate",
            "Dimension",
            "Events",
            "Expectation",
            "Groups",
            "MainBarcode",
            "OldStatuses",
            "ProductCode",
            "ProductDescription",
            "ProductOptions",
            "Reference",
            "ShipmentAmount",
            "ShipmentCounter",
            "Status",
            "Warnings",
        ],
    ),
    entry(
        "CompleteStatusResponse",
        &[SHIPPING_STATUS],
        &["Shipments", "Warnings"],
    ),
    entry(
        "GetSignatureResponseSignature",
        &[SHIPPING_STATUS],
        &["Barcode", "SignatureDate", "SignatureImage"],
    ),
    entry(
        "UpdatedShipmentsResponse",
        &[SHIPPING_STATUS],
        &[
            "Barcode",
            "CreationDate",
            "CustomerNumber",
            "CustomerCode",
            "Status",
        ],
    ),
];

type Table = HashMap<Service, HashMap<&'static str, Vec<Field>>>;

fn table() -> &'static Table {
    static TABLE: OnceLock<Table> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: Table = HashMap::new();
        for entry in ENTRIES {
            for service in entry.services {
                table
                    .entry(*service)
                    .or_default()
                    .entry(entry.entity)
                    .or_default()
                    .extend(entry.fields.iter().map(|name| Field {
                        name,
                        namespace: Some(entry.namespace),
                    }));
            }
        }
        table
    })
}

/// Returns the ordered serializable fields of `entity` for `service`.
///
/// `None` means the service context is unresolved for this entity.
pub fn fields(entity: &str, service: Service) -> Option<&'static [Field]> {
    table()
        .get(&service)?
        .get(entity)
        .map(Vec::as_slice)
}

/// Returns the declaration of a single field.
pub fn field(entity: &str, service: Service, name: &str) -> Option<&'static Field> {
    fields(entity, service)?
        .iter()
        .find(|field| field.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_entries_keep_declaration_order() {
        let names = fields("Customer", Service::Labelling)
            .unwrap()
            .iter()
            .map(|field| field.name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "Address",
                "CollectionLocation",
                "ContactPerson",
                "CustomerCode",
                "CustomerNumber",
                "GlobalPackCustomerCode",
                "GlobalPackBarcodeType",
                "Email",
                "Name"
            ]
        );
    }

    #[test]
    fn fields_are_scoped_per_service() {
        assert!(field("Message", Service::Labelling, "Printertype").is_some());
        assert!(field("Message", Service::Confirming, "Printertype").is_none());
        assert!(field("Customer", Service::ShippingStatus, "GlobalPackBarcodeType").is_none());
        assert!(fields("GenerateLabel", Service::Barcode).is_none());
        assert!(fields("Unknown", Service::Barcode).is_none());
    }

    #[test]
    fn header_entities_use_the_security_namespace() {
        let password = field("UsernameToken", Service::Timeframe, "Password").unwrap();
        assert_eq!(password.namespace, Some(Namespace::Security));
        let zipcode = field("Address", Service::Timeframe, "Zipcode").unwrap();
        assert_eq!(zipcode.namespace, Some(Namespace::Domain));
    }
}
