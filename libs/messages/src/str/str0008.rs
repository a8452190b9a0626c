//! STR0008 — batched reserve transfer with one launch per credited party.
//!
//! The repeated `Grupo_STR0008_Lanc` block carries the individual launches;
//! group order on the wire follows input order and is preserved on decode.

use std::any::Any;

use once_cell::sync::Lazy;
use serde::Serialize;

use codec::{
    decode_boxed, deserialize, ConstraintViolation, Descriptor, FieldValue, FromTree, Message,
    MessageSpec, RawRecord, Registry, Shape, WireResult,
};

use crate::scalar::{DtMovto, Hist, Ispb, NumCtrl, Valor};

pub const CODE: &str = "STR0008";

/// One launch of the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Str0008Lanc {
    pub ispb_if_credtd: Ispb,
    pub vlr_lanc: Valor,
    pub hist: Option<Hist>,
}

static GROUP_DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| {
    Descriptor::build(
        "Str0008Lanc",
        &[
            (
                "ispb_if_credtd",
                "Grupo_STR0008_Lanc/ISPBIFCredtd/text()",
                Shape::Scalar,
            ),
            ("vlr_lanc", "Grupo_STR0008_Lanc/VlrLanc/text()", Shape::Scalar),
            ("hist", "Grupo_STR0008_Lanc/Hist/text()", Shape::Scalar),
        ],
    )
    .expect("STR0008 launch group field table")
});

impl Message for Str0008Lanc {
    fn descriptor(&self) -> &'static Descriptor {
        &GROUP_DESCRIPTOR
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "ispb_if_credtd" => FieldValue::Scalar(Some(self.ispb_if_credtd.to_wire())),
            "vlr_lanc" => FieldValue::Scalar(Some(self.vlr_lanc.to_wire())),
            "hist" => FieldValue::Scalar(self.hist.as_ref().map(Hist::to_wire)),
            _ => FieldValue::Scalar(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromTree for Str0008Lanc {
    fn descriptor() -> &'static Descriptor {
        &GROUP_DESCRIPTOR
    }

    fn from_raw(raw: RawRecord<'_>) -> WireResult<Self> {
        Ok(Self {
            ispb_if_credtd: Ispb::from_wire(raw.require_text("ispb_if_credtd")?)?,
            vlr_lanc: Valor::from_wire(raw.require_text("vlr_lanc")?)?,
            hist: raw.text("hist").map(Hist::from_wire).transpose()?,
        })
    }
}

/// The batch order itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Str0008 {
    pub num_ctrl_str: NumCtrl,
    pub ispb_if_debtd: Ispb,
    pub dt_movto: DtMovto,
    pub lanc: Vec<Str0008Lanc>,
}

static DESCRIPTOR: Lazy<Descriptor> = Lazy::new(|| {
    Descriptor::build(
        "Str0008",
        &[
            ("cod_msg", "STR0008/CodMsg/text()", Shape::Scalar),
            ("num_ctrl_str", "STR0008/NumCtrlSTR/text()", Shape::Scalar),
            ("ispb_if_debtd", "STR0008/ISPBIFDebtd/text()", Shape::Scalar),
            ("dt_movto", "STR0008/DtMovto/text()", Shape::Scalar),
            ("lanc", "STR0008/Grupo_STR0008_Lanc", Shape::List),
        ],
    )
    .expect("STR0008 field table")
});

fn descriptor() -> &'static Descriptor {
    &DESCRIPTOR
}

impl Message for Str0008 {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "cod_msg" => FieldValue::Scalar(Some(CODE.to_string())),
            "num_ctrl_str" => FieldValue::Scalar(Some(self.num_ctrl_str.to_wire())),
            "ispb_if_debtd" => FieldValue::Scalar(Some(self.ispb_if_debtd.to_wire())),
            "dt_movto" => FieldValue::Scalar(Some(self.dt_movto.to_wire())),
            "lanc" => FieldValue::List(self.lanc.iter().map(|l| l as &dyn Message).collect()),
            _ => FieldValue::Scalar(None),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromTree for Str0008 {
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
        let lanc = raw
            .nodes("lanc")
            .iter()
            .map(|node| deserialize::<Str0008Lanc>(node))
            .collect::<WireResult<Vec<_>>>()?;
        Ok(Self {
            num_ctrl_str: NumCtrl::from_wire(raw.require_text("num_ctrl_str")?)?,
            ispb_if_debtd: Ispb::from_wire(raw.require_text("ispb_if_debtd")?)?,
            dt_movto: DtMovto::from_wire(raw.require_text("dt_movto")?)?,
            lanc,
        })
    }
}

pub static SPEC: MessageSpec = MessageSpec {
    code: CODE,
    version: "10.1",
    descriptor,
    decode: decode_boxed::<Str0008>,
};

pub fn register(registry: &Registry) {
    registry.register(&SPEC);
}
