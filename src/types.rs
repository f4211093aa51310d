use rust_decimal::Decimal;
use serde::Serialize;

// ── Normalized date interval ───────────────────────────────────────

/// A normalized `(start_year, end_year)` interval for a catalog record.
///
/// Years are signed; negative values are BCE. Both fields `None` means
/// the source text could not be parsed — the one soft failure mode of
/// the normalizers. When both are `Some`, `start_year <= end_year`
/// holds, with one documented exception: a BCE range keeps its textual
/// endpoint order after sign application (公元前475-221 → (-475, -221)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateInterval {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl DateInterval {
    /// The "unparseable" interval.
    pub fn unknown() -> Self {
        Self {
            start_year: None,
            end_year: None,
        }
    }

    /// A single-year interval.
    pub fn year(y: i32) -> Self {
        Self::span(y, y)
    }

    pub fn span(start: i32, end: i32) -> Self {
        Self {
            start_year: Some(start),
            end_year: Some(end),
        }
    }

    /// Whether both endpoints were resolved.
    pub fn is_known(&self) -> bool {
        self.start_year.is_some() && self.end_year.is_some()
    }
}

// ── Extracted measurement ──────────────────────────────────────────

/// One labeled measurement extracted from a free-text size description,
/// e.g. 高12.5厘米 → { 高, 12.5, 厘米 }.
///
/// Values are exact decimals, never binary floats: measurement data
/// like 2.7 must round-trip without artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionMeasurement {
    pub type_label: String,
    pub value: Decimal,
    pub unit: String,
}

impl DimensionMeasurement {
    pub fn new(type_label: impl Into<String>, value: Decimal, unit: impl Into<String>) -> Self {
        Self {
            type_label: type_label.into(),
            value,
            unit: unit.into(),
        }
    }
}
