//! Scalar wire types.
//!
//! Every scalar field of the catalogue crosses the wire as text; the types
//! here own the rendering and parsing rules. Constructors and `from_wire`
//! reject out-of-format input with a `ConstraintViolation`, which the
//! mapper carries through unchanged.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use codec::ConstraintViolation;

type ScalarResult<T> = Result<T, ConstraintViolation>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Institution identifier: exactly eight digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Ispb(String);

static ISPB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8}$").unwrap());

impl Ispb {
    pub fn new(value: impl Into<String>) -> ScalarResult<Self> {
        let value = value.into();
        if !ISPB_RE.is_match(&value) {
            return Err(ConstraintViolation::new(
                "ISPB",
                format!("must be exactly 8 digits, got {value:?}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn from_wire(raw: &str) -> ScalarResult<Self> {
        Self::new(raw)
    }

    pub fn to_wire(&self) -> String {
        self.0.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ispb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sender-assigned control number: upper-case alphanumeric, at most 20
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NumCtrl(String);

static NUM_CTRL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9]{1,20}$").unwrap());

impl NumCtrl {
    pub fn new(value: impl Into<String>) -> ScalarResult<Self> {
        let value = value.into();
        if !NUM_CTRL_RE.is_match(&value) {
            return Err(ConstraintViolation::new(
                "NumCtrl",
                format!("must be 1-20 upper-case alphanumerics, got {value:?}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn from_wire(raw: &str) -> ScalarResult<Self> {
        Self::new(raw)
    }

    pub fn to_wire(&self) -> String {
        self.0.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NumCtrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monetary amount: non-negative, at most two decimal places, rendered
/// with exactly two on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Valor(Decimal);

impl Valor {
    pub fn new(value: Decimal) -> ScalarResult<Self> {
        if value.is_sign_negative() {
            return Err(ConstraintViolation::new(
                "Vlr",
                format!("must not be negative, got {value}"),
            ));
        }
        if value.normalize().scale() > 2 {
            return Err(ConstraintViolation::new(
                "Vlr",
                format!("at most two decimal places, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    pub fn from_wire(raw: &str) -> ScalarResult<Self> {
        let value: Decimal = raw
            .trim()
            .parse()
            .map_err(|_| ConstraintViolation::new("Vlr", format!("not a decimal amount: {raw:?}")))?;
        Self::new(value)
    }

    pub fn to_wire(&self) -> String {
        format!("{:.2}", self.0)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Valor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Settlement date, ISO `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DtMovto(NaiveDate);

impl DtMovto {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_wire(raw: &str) -> ScalarResult<Self> {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ConstraintViolation::new("DtMovto", format!("not a YYYY-MM-DD date: {raw:?}")))
    }

    pub fn to_wire(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Central-bank timestamp, ISO `YYYY-MM-DDTHH:MM:SS` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DtHrBC(NaiveDateTime);

impl DtHrBC {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    pub fn from_wire(raw: &str) -> ScalarResult<Self> {
        NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT)
            .map(Self)
            .map_err(|_| {
                ConstraintViolation::new("DtHrBC", format!("not an ISO timestamp: {raw:?}"))
            })
    }

    pub fn to_wire(&self) -> String {
        self.0.format(DATETIME_FORMAT).to_string()
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

/// Free-text history/description, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hist(String);

impl Hist {
    pub fn new(value: impl Into<String>) -> ScalarResult<Self> {
        let value = value.into();
        if value.chars().count() > 200 {
            return Err(ConstraintViolation::new(
                "Hist",
                format!("must not exceed 200 characters, got {}", value.chars().count()),
            ));
        }
        Ok(Self(value))
    }

    pub fn from_wire(raw: &str) -> ScalarResult<Self> {
        Self::new(raw)
    }

    pub fn to_wire(&self) -> String {
        self.0.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Settlement situation of a reserve-transfer launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SitLancStr {
    Agendado,
    Efetivado,
    Rejeitado,
}

static BY_VALUE: Lazy<HashMap<&'static str, SitLancStr>> = Lazy::new(|| {
    SitLancStr::ALL
        .iter()
        .map(|variant| (variant.wire_value(), *variant))
        .collect()
});

static BY_NAME: Lazy<HashMap<&'static str, SitLancStr>> = Lazy::new(|| {
    SitLancStr::ALL
        .iter()
        .map(|variant| (variant.name(), *variant))
        .collect()
});

impl SitLancStr {
    pub const ALL: [SitLancStr; 3] = [
        SitLancStr::Agendado,
        SitLancStr::Efetivado,
        SitLancStr::Rejeitado,
    ];

    pub fn wire_value(&self) -> &'static str {
        match self {
            SitLancStr::Agendado => "AGD",
            SitLancStr::Efetivado => "EFT",
            SitLancStr::Rejeitado => "REJ",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SitLancStr::Agendado => "Agendado",
            SitLancStr::Efetivado => "Efetivado",
            SitLancStr::Rejeitado => "Rejeitado",
        }
    }

    /// Coerce wire input through a fixed lookup chain: exact wire value,
    /// case-insensitive wire value, exact variant name, case-insensitive
    /// variant name. The chain order is part of the parsing contract.
    pub fn from_wire(raw: &str) -> ScalarResult<Self> {
        if let Some(variant) = BY_VALUE.get(raw) {
            return Ok(*variant);
        }
        if let Some(variant) = BY_VALUE
            .iter()
            .find_map(|(value, variant)| value.eq_ignore_ascii_case(raw).then_some(*variant))
        {
            return Ok(variant);
        }
        if let Some(variant) = BY_NAME.get(raw) {
            return Ok(*variant);
        }
        if let Some(variant) = BY_NAME
            .iter()
            .find_map(|(name, variant)| name.eq_ignore_ascii_case(raw).then_some(*variant))
        {
            return Ok(variant);
        }
        Err(ConstraintViolation::new(
            "SitLancSTR",
            format!("no such variant: {raw:?}"),
        ))
    }

    pub fn to_wire(&self) -> String {
        self.wire_value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ispb_requires_exactly_eight_digits() {
        assert!(Ispb::new("00038166").is_ok());
        assert!(Ispb::new("0003816").is_err());
        assert!(Ispb::new("000381667").is_err());
        assert!(Ispb::new("0003816X").is_err());
    }

    #[test]
    fn num_ctrl_rejects_lower_case_and_overlength() {
        assert!(NumCtrl::new("STR20260805000000001").is_ok());
        assert!(NumCtrl::new("str123").is_err());
        assert!(NumCtrl::new("A".repeat(21)).is_err());
        assert!(NumCtrl::new("").is_err());
    }

    #[test]
    fn valor_renders_two_decimal_places() {
        let valor = Valor::new(dec!(10.5)).unwrap();
        assert_eq!(valor.to_wire(), "10.50");
        assert_eq!(Valor::from_wire("10.50").unwrap(), valor);
    }

    #[test]
    fn valor_rejects_negative_and_fine_grained_amounts() {
        assert!(Valor::new(dec!(-0.01)).is_err());
        assert!(Valor::new(dec!(1.001)).is_err());
        assert!(Valor::from_wire("abc").is_err());
    }

    #[test]
    fn dates_and_timestamps_round_trip() {
        let date = DtMovto::from_wire("2026-08-05").unwrap();
        assert_eq!(date.to_wire(), "2026-08-05");
        assert!(DtMovto::from_wire("05/08/2026").is_err());

        let ts = DtHrBC::from_wire("2026-08-05T14:30:00").unwrap();
        assert_eq!(ts.to_wire(), "2026-08-05T14:30:00");
        assert!(DtHrBC::from_wire("2026-08-05 14:30").is_err());
    }

    #[test]
    fn hist_caps_at_two_hundred_characters() {
        assert!(Hist::new("a".repeat(200)).is_ok());
        assert!(Hist::new("a".repeat(201)).is_err());
    }

    #[test]
    fn sit_lanc_coercion_walks_the_chain_in_order() {
        // Tier 1: exact wire value.
        assert_eq!(SitLancStr::from_wire("EFT").unwrap(), SitLancStr::Efetivado);
        // Tier 2: case-insensitive wire value.
        assert_eq!(SitLancStr::from_wire("eft").unwrap(), SitLancStr::Efetivado);
        // Tier 3: exact variant name.
        assert_eq!(
            SitLancStr::from_wire("Rejeitado").unwrap(),
            SitLancStr::Rejeitado
        );
        // Tier 4: case-insensitive variant name.
        assert_eq!(
            SitLancStr::from_wire("AGENDADO").unwrap(),
            SitLancStr::Agendado
        );
        assert!(SitLancStr::from_wire("???").is_err());
    }
}
