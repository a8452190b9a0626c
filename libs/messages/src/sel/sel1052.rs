//! SEL1052 — securities settlement launch notice.
//!
//! The launch type travels as an attribute of the `Lanc` element while the
//! amount is that element's own text child, so both fields populate one
//! shared node.

use std::any::Any;

use once_cell::sync::Lazy;
use serde::Serialize;

use codec::{
    decode_boxed, ConstraintViolation, Descriptor, FieldValue, FromTree, Message, MessageSpec,
    RawRecord, Registry, Shape, WireResult,
};

use crate::scalar::{DtMovto, NumCtrl, Valor};

pub const CODE: &str = "SEL1052";

/// Credit/debit marker carried by the `TpLanc` attribute.
const LAUNCH_TYPES: [&str; 2] = ["C", "D"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sel1052 {
    pub num_ctrl_sel: NumCtrl,
    pub tp_lanc: String,
    pub vlr_lanc: Valor,
    pub dt_movto: DtMovto,
}

static DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| {
    Descriptor::build(
        "Sel1052",
        &[
            ("cod_msg", "SEL1052/CodMsg/text()", Shape::Scalar),
            ("num_ctrl_sel", "SEL1052/NumCtrlSEL/text()", Shape::Scalar),
            ("tp_lanc", "SEL1052/Lanc/@TpLanc", Shape::Scalar),
            ("vlr_lanc", "SEL1052/Lanc/VlrLanc/text()", Shape::Scalar),
            ("dt_movto", "SEL1052/DtMovto/text()", Shape::Scalar),
        ],
    )
    .expect("SEL1052 field table")
});

fn descriptor() -> &'static Descriptor {
    &DESCRIPTOR
}

impl Message for Sel1052 {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "cod_msg" => FieldValue::Scalar(Some(CODE.to_string())),
            "num_ctrl_sel" => FieldValue::Scalar(Some(self.num_ctrl_sel.to_wire())),
            "tp_lanc" => FieldValue::Scalar(Some(self.tp_lanc.clone())),
            "vlr_lanc" => FieldValue::Scalar(Some(self.vlr_lanc.to_wire())),
            "dt_movto" => FieldValue::Scalar(Some(self.dt_movto.to_wire())),
            _ => FieldValue::Scalar(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromTree for Sel1052 {
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
        let tp_lanc = raw.require_text("tp_lanc")?;
        if !LAUNCH_TYPES.contains(&tp_lanc) {
            return Err(ConstraintViolation::new(
                "TpLanc",
                format!("must be C or D, got {tp_lanc:?}"),
            )
            .into());
        }
        Ok(Self {
            num_ctrl_sel: NumCtrl::from_wire(raw.require_text("num_ctrl_sel")?)?,
            tp_lanc: tp_lanc.to_string(),
            vlr_lanc: Valor::from_wire(raw.require_text("vlr_lanc")?)?,
            dt_movto: DtMovto::from_wire(raw.require_text("dt_movto")?)?,
        })
    }
}

pub static SPEC: MessageSpec = MessageSpec {
    code: CODE,
    version: "4.1",
    descriptor,
    decode: decode_boxed::<Sel1052>,
};

pub fn register(registry: &Registry) {
    registry.register(&SPEC);
}
