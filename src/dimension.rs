//! Dimension-string parser for catalog "size" fields.
//!
//! Two input shapes occur in the data, handled by two independent
//! strategies tried in order:
//!
//!   Bracketed triple:  整体 (2.7 x 10.3 x 7.1 厘米)
//!   Prefixed tokens:   通高20.5公分　口径6.3公分
//!
//! Values are exact decimals throughout; a malformed numeric token is
//! skipped, never a failure.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::types::DimensionMeasurement;

// ── Regex patterns ─────────────────────────────────────────────────

/// Parenthesized "H x W x D <unit>" with a centimeter unit marker.
static RE_BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([\d\.]+) x ([\d\.]+) x ([\d\.]+)\s*(?:厘米|cm)\)").unwrap()
});

/// Word-prefix + decimal + unit token, no separators required.
/// The prefix and unit are letter runs (CJK included); keeping digits
/// out of the prefix stops stray numerics from posing as labels. The
/// unit is capped at two letters — every unit in the data (厘米, 公分,
/// 毫米, 米, cm, mm) fits, and the cap keeps a run-on token's prefix
/// ("...厘米宽18.2...") out of the preceding unit.
static RE_PREFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{L}+?)(\d+\.?\d*)\s*(\p{L}{1,2})").unwrap());

// ── Strategies ─────────────────────────────────────────────────────

/// Try the bracketed "(H x W x D 厘米)" form.
///
/// A match yields exactly three measurements in fixed order. Returns
/// `None` when the pattern is absent or a captured number does not
/// parse as a decimal.
fn parse_bracketed_triple(text: &str) -> Option<Vec<DimensionMeasurement>> {
    let caps = RE_BRACKETED.captures(text)?;

    let h = Decimal::from_str(&caps[1]).ok()?;
    let w = Decimal::from_str(&caps[2]).ok()?;
    let d = Decimal::from_str(&caps[3]).ok()?;

    Some(vec![
        DimensionMeasurement::new("Height/Length", h, "cm"),
        DimensionMeasurement::new("Width", w, "cm"),
        DimensionMeasurement::new("Depth/Thick", d, "cm"),
    ])
}

/// Try the repeated "<prefix><number><unit>" form.
///
/// Each prefix is normalized to a small fixed vocabulary; unrecognized
/// prefixes pass through verbatim. Returns `None` when nothing in the
/// text matches.
fn parse_prefixed_tokens(text: &str) -> Option<Vec<DimensionMeasurement>> {
    let mut results = Vec::new();

    for caps in RE_PREFIXED.captures_iter(text) {
        // A token that fails decimal conversion just doesn't match;
        // the rest of the string still parses.
        let value = match Decimal::from_str(&caps[2]) {
            Ok(v) => v,
            Err(_) => continue,
        };

        let label = normalize_prefix(&caps[1]);
        results.push(DimensionMeasurement::new(label, value, &caps[3]));
    }

    if results.is_empty() { None } else { Some(results) }
}

/// Normalize a measurement prefix to the standard vocabulary.
/// First matching rule wins: 径长/口径/直径 all mean diameter.
fn normalize_prefix(raw: &str) -> String {
    if raw.contains('径') {
        "直径".to_string()
    } else if raw.contains('高') {
        "高".to_string()
    } else if raw.contains('长') {
        "长".to_string()
    } else if raw.contains('宽') {
        "宽".to_string()
    } else {
        raw.to_string()
    }
}

// ── Composition ────────────────────────────────────────────────────

/// Extract all labeled measurements from a size description.
///
/// The bracketed-triple form is tried first (it is the more specific
/// shape), then the prefixed-token form. Empty input or no match
/// yields an empty vector, never an error.
pub fn parse_dimensions(text: &str) -> Vec<DimensionMeasurement> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if let Some(dims) = parse_bracketed_triple(text) {
        return dims;
    }
    if let Some(dims) = parse_prefixed_tokens(text) {
        return dims;
    }
    Vec::new()
}
