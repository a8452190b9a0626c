//! STR0005R1 — settlement result for a reserve transfer order.

use std::any::Any;

use once_cell::sync::Lazy;
use serde::Serialize;

use codec::{
    decode_boxed, ConstraintViolation, Descriptor, FieldValue, FromTree, Message, MessageSpec,
    RawRecord, Registry, Shape, WireResult,
};

use crate::scalar::{DtHrBC, DtMovto, NumCtrl, SitLancStr};

pub const CODE: &str = "STR0005R1";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Str0005R1 {
    pub num_ctrl_str: NumCtrl,
    pub sit_lanc_str: SitLancStr,
    pub dt_hr_bc: DtHrBC,
    pub dt_movto: DtMovto,
}

static DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| {
    Descriptor::build(
        "Str0005R1",
        &[
            ("cod_msg", "STR0005R1/CodMsg/text()", Shape::Scalar),
            ("num_ctrl_str", "STR0005R1/NumCtrlSTR/text()", Shape::Scalar),
            ("sit_lanc_str", "STR0005R1/SitLancSTR/text()", Shape::Scalar),
            ("dt_hr_bc", "STR0005R1/DtHrBC/text()", Shape::Scalar),
            ("dt_movto", "STR0005R1/DtMovto/text()", Shape::Scalar),
        ],
    )
    .expect("STR0005R1 field table")
});

fn descriptor() -> &'static Descriptor {
    &DESCRIPTOR
}

impl Message for Str0005R1 {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "cod_msg" => FieldValue::Scalar(Some(CODE.to_string())),
            "num_ctrl_str" => FieldValue::Scalar(Some(self.num_ctrl_str.to_wire())),
            "sit_lanc_str" => FieldValue::Scalar(Some(self.sit_lanc_str.to_wire())),
            "dt_hr_bc" => FieldValue::Scalar(Some(self.dt_hr_bc.to_wire())),
            "dt_movto" => FieldValue::Scalar(Some(self.dt_movto.to_wire())),
            _ => FieldValue::Scalar(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromTree for Str0005R1 {
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
            sit_lanc_str: SitLancStr::from_wire(raw.require_text("sit_lanc_str")?)?,
            dt_hr_bc: DtHrBC::from_wire(raw.require_text("dt_hr_bc")?)?,
            dt_movto: DtMovto::from_wire(raw.require_text("dt_movto")?)?,
        })
    }
}

pub static SPEC: MessageSpec = MessageSpec {
    code: CODE,
    version: "10.2",
    descriptor,
    decode: decode_boxed::<Str0005R1>,
};

pub fn register(registry: &Registry) {
    registry.register(&SPEC);
}
