//! End-to-end wire flows over the catalogue.

use proptest::prelude::*;
use rust_decimal::Decimal;

use codec::{deserialize, serialize, Envelope, Registry, WireError};
use messages::scalar::{DtMovto, Hist, Ispb, NumCtrl, Valor};
use messages::sel::Sel1052;
use messages::str::{Str0005, Str0008, Str0008Lanc};

fn sample_envelope() -> Envelope {
    Envelope::new("11111111", "00038166", "SPB01", "202608050000001")
}

fn sample_str0005() -> Str0005 {
    Str0005 {
        num_ctrl_str: NumCtrl::new("STR20260805000000001").unwrap(),
        ispb_if_debtd: Ispb::new("11111111").unwrap(),
        ispb_if_credtd: Ispb::new("00038166").unwrap(),
        vlr_lanc: Valor::from_wire("1050.33").unwrap(),
        dt_movto: DtMovto::from_wire("2026-08-05").unwrap(),
        hist: Some(Hist::new("reserve transfer").unwrap()),
    }
}

#[test]
fn typed_envelope_flow_survives_the_wire() {
    let xml = sample_envelope().to_xml(&sample_str0005()).unwrap();

    let (envelope, payload): (Envelope, Str0005) = Envelope::from_xml(&xml).unwrap();
    assert_eq!(envelope, sample_envelope());
    assert_eq!(payload, sample_str0005());
}

#[test_log::test]
fn dynamic_dispatch_loads_the_module_from_the_code_in_the_document() {
    let registry = Registry::new();
    registry.install_hook(messages::load_hook);

    let xml = sample_envelope().to_xml(&sample_str0005()).unwrap();
    let (envelope, payload) = Envelope::decode_xml(&xml, &registry).unwrap();

    assert_eq!(envelope.domain, "SPB01");
    let payload = payload.as_any().downcast_ref::<Str0005>().unwrap();
    assert_eq!(*payload, sample_str0005());
}

#[test]
fn documents_without_a_code_cannot_be_dispatched() {
    let registry = Registry::new();
    registry.install_hook(messages::load_hook);

    let xml = r#"<DOC><BCMSG><IdentdEmissor>11111111</IdentdEmissor><IdentdDestinatario>00038166</IdentdDestinatario><DomSist>SPB01</DomSist><NUOp>1</NUOp></BCMSG><SISMSG/></DOC>"#;
    assert_eq!(
        Envelope::decode_xml(xml, &registry).unwrap_err(),
        WireError::CodeNotFound
    );
}

#[test]
fn default_version_resolution_is_first_registration_wins() {
    let registry = Registry::new();
    registry.install_hook(messages::load_hook);

    // STR0004 ships 10.1 and 10.2, registered in that order.
    assert_eq!(registry.resolve("STR0004", None).unwrap().version, "10.1");
    assert_eq!(
        registry.resolve("STR0004", Some("10.2")).unwrap().version,
        "10.2"
    );
    // Re-resolving the default is stable after both are registered.
    assert_eq!(registry.resolve("STR0004", None).unwrap().version, "10.1");
}

#[test]
fn namespaced_input_documents_are_accepted() {
    let doc = sample_envelope()
        .to_document_with_namespace(&sample_str0005(), Some("http://www.bcb.gov.br/SPB"))
        .unwrap();
    let xml = doc.to_xml_document().unwrap();

    let (_, payload): (Envelope, Str0005) = Envelope::from_xml(&xml).unwrap();
    assert_eq!(payload, sample_str0005());
}

proptest! {
    #[test]
    fn str0008_batches_round_trip_in_order(
        launches in prop::collection::vec(("[0-9]{8}", 1u64..100_000_000), 0..6),
        hist in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let lanc: Vec<Str0008Lanc> = launches
            .into_iter()
            .map(|(ispb, cents)| Str0008Lanc {
                ispb_if_credtd: Ispb::new(ispb).unwrap(),
                vlr_lanc: Valor::new(Decimal::new(cents as i64, 2)).unwrap(),
                hist: if hist.is_empty() { None } else { Some(Hist::new(hist.clone()).unwrap()) },
            })
            .collect();
        let record = Str0008 {
            num_ctrl_str: NumCtrl::new("STR20260805000000003").unwrap(),
            ispb_if_debtd: Ispb::new("11111111").unwrap(),
            dt_movto: DtMovto::from_wire("2026-08-05").unwrap(),
            lanc,
        };

        // Tree-level round trip.
        let tree = serialize(&record).unwrap();
        prop_assert_eq!(&deserialize::<Str0008>(&tree).unwrap(), &record);

        // Full wire-text round trip through the envelope.
        let xml = sample_envelope().to_xml(&record).unwrap();
        let (_, back): (Envelope, Str0008) = Envelope::from_xml(&xml).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn sel1052_amounts_round_trip(cents in 0u64..1_000_000_000) {
        let record = Sel1052 {
            num_ctrl_sel: NumCtrl::new("SEL20260805000000001").unwrap(),
            tp_lanc: "D".to_string(),
            vlr_lanc: Valor::new(Decimal::new(cents as i64, 2)).unwrap(),
            dt_movto: DtMovto::from_wire("2026-08-05").unwrap(),
        };
        let tree = serialize(&record).unwrap();
        prop_assert_eq!(deserialize::<Sel1052>(&tree).unwrap(), record);
    }
}
