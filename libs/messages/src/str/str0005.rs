//! STR0005 — reserve-to-reserve funds transfer order.
//!
//! The debited institution instructs a transfer from its reserve account to
//! the credited institution's, settling on the given movement date.

use std::any::Any;

use once_cell::sync::Lazy;
use serde::Serialize;

use codec::{
    decode_boxed, ConstraintViolation, Descriptor, FieldValue, FromTree, Message, MessageSpec,
    RawRecord, Registry, Shape, WireResult,
};

use crate::scalar::{DtMovto, Hist, Ispb, NumCtrl, Valor};

pub const CODE: &str = "STR0005";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Str0005 {
    pub num_ctrl_str: NumCtrl,
    pub ispb_if_debtd: Ispb,
    pub ispb_if_credtd: Ispb,
    pub vlr_lanc: Valor,
    pub dt_movto: DtMovto,
    pub hist: Option<Hist>,
}

static DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| {
    Descriptor::build(
        "Str0005",
        &[
            ("cod_msg", "STR0005/CodMsg/text()", Shape::Scalar),
            ("num_ctrl_str", "STR0005/NumCtrlSTR/text()", Shape::Scalar),
            ("ispb_if_debtd", "STR0005/ISPBIFDebtd/text()", Shape::Scalar),
            ("ispb_if_credtd", "STR0005/ISPBIFCredtd/text()", Shape::Scalar),
            ("vlr_lanc", "STR0005/VlrLanc/text()", Shape::Scalar),
            ("dt_movto", "STR0005/DtMovto/text()", Shape::Scalar),
            ("hist", "STR0005/Hist/text()", Shape::Scalar),
        ],
    )
    .expect("STR0005 field table")
});

fn descriptor() -> &'static Descriptor {
    &DESCRIPTOR
}

impl Message for Str0005 {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "cod_msg" => FieldValue::Scalar(Some(CODE.to_string())),
            "num_ctrl_str" => FieldValue::Scalar(Some(self.num_ctrl_str.to_wire())),
            "ispb_if_debtd" => FieldValue::Scalar(Some(self.ispb_if_debtd.to_wire())),
            "ispb_if_credtd" => FieldValue::Scalar(Some(self.ispb_if_credtd.to_wire())),
            "vlr_lanc" => FieldValue::Scalar(Some(self.vlr_lanc.to_wire())),
            "dt_movto" => FieldValue::Scalar(Some(self.dt_movto.to_wire())),
            "hist" => FieldValue::Scalar(self.hist.as_ref().map(Hist::to_wire)),
            _ => FieldValue::Scalar(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromTree for Str0005 {
    fn descriptor() -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn from_raw(raw: RawRecord<'_>) -> WireResult<Self> {
        let cod_msg = raw.require_text("cod_msg")?;
        if cod_msg != CODE {
            return Err(ConstraintViolation::new(
                "CodMsg",
                format!("expected {CODE}, got {cod_msg:?}"),
            )
            .into());
        }
        Ok(Self {
            num_ctrl_str: NumCtrl::from_wire(raw.require_text("num_ctrl_str")?)?,
            ispb_if_debtd: Ispb::from_wire(raw.require_text("ispb_if_debtd")?)?,
            ispb_if_credtd: Ispb::from_wire(raw.require_text("ispb_if_credtd")?)?,
            vlr_lanc: Valor::from_wire(raw.require_text("vlr_lanc")?)?,
            dt_movto: DtMovto::from_wire(raw.require_text("dt_movto")?)?,
            hist: raw.text("hist").map(Hist::from_wire).transpose()?,
        })
    }
}

pub static SPEC: MessageSpec = MessageSpec {
    code: CODE,
    version: "10.2",
    descriptor,
    decode: decode_boxed::<Str0005>,
};

pub fn register(registry: &Registry) {
    registry.register(&SPEC);
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{deserialize, serialize};
    use rust_decimal_macros::dec;

    fn sample() -> Str0005 {
        Str0005 {
            num_ctrl_str: NumCtrl::new("STR20260805000000001").unwrap(),
            ispb_if_debtd: Ispb::new("11111111").unwrap(),
            ispb_if_credtd: Ispb::new("22222222").unwrap(),
            vlr_lanc: Valor::new(dec!(1050.33)).unwrap(),
            dt_movto: DtMovto::from_wire("2026-08-05").unwrap(),
            hist: Some(Hist::new("liquidity transfer").unwrap()),
        }
    }

    #[test]
    fn field_table_is_well_formed() {
        DESCRIPTOR.validate().unwrap();
        assert_eq!(DESCRIPTOR.base_tag().unwrap(), CODE);
    }

    #[test]
    fn round_trips_with_and_without_optional_history() {
        for hist in [Some(Hist::new("x").unwrap()), None] {
            let record = Str0005 { hist, ..sample() };
            let tree = serialize(&record).unwrap();
            assert_eq!(deserialize::<Str0005>(&tree).unwrap(), record);
        }
    }

    #[test]
    fn serialized_tree_carries_the_message_code() {
        let tree = serialize(&sample()).unwrap();
        assert_eq!(tree.child("CodMsg").unwrap().text(), Some(CODE));
        assert_eq!(tree.child("VlrLanc").unwrap().text(), Some("1050.33"));
    }

    #[test]
    fn foreign_message_code_is_a_constraint_violation() {
        let mut tree = serialize(&sample()).unwrap();
        tree.child_or_insert("CodMsg").set_text("STR0008");
        assert!(matches!(
            deserialize::<Str0005>(&tree).unwrap_err(),
            codec::WireError::Constraint(_)
        ));
    }

    #[test]
    fn missing_required_field_is_reported() {
        let record = sample();
        let mut tree = serialize(&record).unwrap();
        // Rebuild without the amount element.
        let mut stripped = xmldoc::Element::new(CODE);
        for child in tree.children() {
            if child.tag() != "VlrLanc" {
                stripped.push_child(child.clone());
            }
        }
        tree = stripped;
        assert!(matches!(
            deserialize::<Str0005>(&tree).unwrap_err(),
            codec::WireError::MissingField {
                field: "vlr_lanc",
                ..
            }
        ));
    }
}
