use chrono::NaiveDate;
use postnl_rs::entity::{Address, Customer, Dimension, Message, Shipment};
use postnl_rs::wire::{
    from_json_fields, from_wire_xml, parse_document, to_wire_json, to_wire_xml, write_document,
    NamespaceMap, Service, XmlContext, XmlElement,
};
use postnl_rs::Value;

const LABELLING: NamespaceMap = NamespaceMap {
    services: "http://postnl.nl/cif/services/LabellingWebService/",
    domain: "http://postnl.nl/cif/domain/LabellingWebService/",
};

fn shipment() -> Shipment {
    Shipment::builder()
        .addresses(vec![Address::builder()
            .address_type("1")
            .city("Utrecht")
            .countrycode("NL")
            .house_nr("9")
            .street("Bilderdijkstraat")
            .zipcode("3521 va")
            .build()])
        .barcode("3SDEVC201611210")
        .customer(Customer::builder().customer_code("DEVC").build())
        .delivery_date(
            NaiveDate::from_ymd_opt(2016, 6, 30)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
        .dimension(Dimension::builder().weight("4300").build())
        .product_code_delivery("3085")
        .phase_code("4")
        .build()
}

/// The shipment as seen by the labelling service.
fn labelling_subset() -> Shipment {
    let mut expected = shipment();
    expected.phase_code = None;
    if let Some(addresses) = expected.addresses.as_mut() {
        addresses[0].address_type = Some("01".to_string());
        addresses[0].zipcode = Some("3521VA".to_string());
    }
    expected
}

#[test]
fn json_keeps_the_declared_fields() {
    let wire = to_wire_json(&shipment(), Service::Labelling);
    assert_eq!(wire["DeliveryDate"], "30-06-2016 12:00:00");
    assert!(!wire.contains_key("PhaseCode"));

    let decoded: Shipment = from_json_fields(Value::Object(wire)).unwrap();
    assert_eq!(decoded, labelling_subset());
}

#[test]
fn json_drops_fields_of_other_services() {
    let wire = to_wire_json(&shipment(), Service::ShippingStatus);
    assert_eq!(wire["PhaseCode"], "4");
    assert_eq!(wire["Barcode"], "3SDEVC201611210");
    assert!(!wire.contains_key("Addresses"));
    assert!(!wire.contains_key("ProductCodeDelivery"));

    let message = to_wire_json(&Message::labelling(None), Service::Barcode);
    assert!(!message.contains_key("Printertype"));
}

#[test]
fn xml_keeps_the_declared_fields() {
    let children = to_wire_xml(&shipment(), Service::Labelling, &LABELLING).unwrap();
    let root = XmlElement::new(Some(LABELLING.domain), "Shipment").with_children(children);
    let text = write_document(&root, &LABELLING.declarations()).unwrap();
    assert!(text.contains("<domain:Barcode>3SDEVC201611210</domain:Barcode>"));
    assert!(!text.contains("PhaseCode"));

    let document = parse_document(&text).unwrap();
    let context = XmlContext {
        service: Service::Labelling,
        namespaces: LABELLING,
    };
    let decoded: Shipment = from_wire_xml(&document, &context).unwrap();
    assert_eq!(decoded, labelling_subset());
}
