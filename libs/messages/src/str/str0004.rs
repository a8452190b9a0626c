//! STR0004 — reserve account balance inquiry.
//!
//! Registered in two catalogue revisions; the payload is unchanged between
//! them, so both versions decode into the same record.

use std::any::Any;

use once_cell::sync::Lazy;
use serde::Serialize;

use codec::{
    decode_boxed, ConstraintViolation, Descriptor, FieldValue, FromTree, Message, MessageSpec,
    RawRecord, Registry, Shape, WireResult,
};

use crate::scalar::{DtMovto, Ispb, NumCtrl};

pub const CODE: &str = "STR0004";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Str0004 {
    pub num_ctrl_str: NumCtrl,
    pub ispb_if: Ispb,
    pub dt_movto: Option<DtMovto>,
}

static DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| {
    Descriptor::build(
        "Str0004",
        &[
            ("cod_msg", "STR0004/CodMsg/text()", Shape::Scalar),
            ("num_ctrl_str", "STR0004/NumCtrlSTR/text()", Shape::Scalar),
            ("ispb_if", "STR0004/ISPBIF/text()", Shape::Scalar),
            ("dt_movto", "STR0004/DtMovto/text()", Shape::Scalar),
        ],
    )
    .expect("STR0004 field table")
});

fn descriptor() -> &'static Descriptor {
    &DESCRIPTOR
}

impl Message for Str0004 {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "cod_msg" => FieldValue::Scalar(Some(CODE.to_string())),
            "num_ctrl_str" => FieldValue::Scalar(Some(self.num_ctrl_str.to_wire())),
            "ispb_if" => FieldValue::Scalar(Some(self.ispb_if.to_wire())),
            "dt_movto" => FieldValue::Scalar(self.dt_movto.as_ref().map(DtMovto::to_wire)),
            _ => FieldValue::Scalar(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromTree for Str0004 {
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
            ispb_if: Ispb::from_wire(raw.require_text("ispb_if")?)?,
            dt_movto: raw.text("dt_movto").map(DtMovto::from_wire).transpose()?,
        })
    }
}

pub static SPEC_V101: MessageSpec = MessageSpec {
    code: CODE,
    version: "10.1",
    descriptor,
    decode: decode_boxed::<Str0004>,
};

pub static SPEC_V102: MessageSpec = MessageSpec {
    code: CODE,
    version: "10.2",
    descriptor,
    decode: decode_boxed::<Str0004>,
};

/// Registration order matters: 10.1 comes first and stays the default.
pub fn register(registry: &Registry) {
    registry.register(&SPEC_V101);
    registry.register(&SPEC_V102);
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::{deserialize, serialize};

    fn sample() -> Str0004 {
        Str0004 {
            num_ctrl_str: NumCtrl::new("STR20260805000000002").unwrap(),
            ispb_if: Ispb::new("33333333").unwrap(),
            dt_movto: None,
        }
    }

    #[test]
    fn field_table_is_well_formed() {
        DESCRIPTOR.validate().unwrap();
        assert_eq!(DESCRIPTOR.base_tag().unwrap(), CODE);
    }

    #[test]
    fn round_trips_with_optional_date_absent_and_present() {
        for dt_movto in [None, Some(DtMovto::from_wire("2026-08-05").unwrap())] {
            let record = Str0004 { dt_movto, ..sample() };
            let tree = serialize(&record).unwrap();
            assert_eq!(deserialize::<Str0004>(&tree).unwrap(), record);
        }
    }

    #[test]
    fn both_catalogue_versions_resolve_with_the_first_as_default() {
        let registry = Registry::new();
        register(&registry);

        assert_eq!(registry.resolve(CODE, None).unwrap().version, "10.1");
        assert_eq!(registry.resolve(CODE, Some("10.2")).unwrap().version, "10.2");
    }
}
