//! Static dictionary of Chinese dynasties (朝代) and their year ranges.
//!
//! This module maps dynasty/era names found in catalog "date" fields to
//! fixed historical year intervals. BCE years are negative. The table
//! is the disambiguation surface for names like 西周 vs 周: matching is
//! by containment, so specific names must outrank their generic
//! parents. Rather than relying on declaration order, the table is
//! sorted by descending name length once at construction.

use chrono::Datelike;
use regex::Regex;
use std::sync::LazyLock;

use crate::types::DateInterval;

// ── Dynasty table ────────────────────────────────────────────────────

/// A single dynasty with its fixed year range.
pub struct DynastyEntry {
    pub name: &'static str,
    pub start: i32,
    pub end: i32,
}

/// Master table of dynasties, declared chronologically, re-sorted by
/// descending name length at construction so that 西周/东周/北宋 are
/// always checked before 周/宋.
///
/// The open-ended 民国 entry resolves its end year from the wall clock
/// once per process — a documented quirk of the source data model, kept
/// as-is.
pub static DYNASTY_TABLE: LazyLock<Vec<DynastyEntry>> = LazyLock::new(|| {
    let current_year = chrono::Utc::now().year();

    let mut entries = vec![
        DynastyEntry { name: "夏", start: -2070, end: -1600 },
        DynastyEntry { name: "商", start: -1600, end: -1046 },
        DynastyEntry { name: "周", start: -1046, end: -256 },
        DynastyEntry { name: "西周", start: -1046, end: -771 },
        DynastyEntry { name: "东周", start: -770, end: -256 },
        DynastyEntry { name: "春秋", start: -770, end: -476 },
        DynastyEntry { name: "战国", start: -475, end: -221 },
        DynastyEntry { name: "秦", start: -221, end: -207 },
        DynastyEntry { name: "汉", start: -202, end: 220 },
        DynastyEntry { name: "西汉", start: -202, end: 9 },
        DynastyEntry { name: "东汉", start: 25, end: 220 },
        DynastyEntry { name: "三国", start: 220, end: 280 },
        DynastyEntry { name: "魏", start: 220, end: 266 },
        DynastyEntry { name: "蜀", start: 221, end: 263 },
        DynastyEntry { name: "吴", start: 229, end: 280 },
        DynastyEntry { name: "晋", start: 265, end: 420 },
        DynastyEntry { name: "隋", start: 581, end: 618 },
        DynastyEntry { name: "唐", start: 618, end: 907 },
        DynastyEntry { name: "宋", start: 960, end: 1279 },
        DynastyEntry { name: "北宋", start: 960, end: 1127 },
        DynastyEntry { name: "南宋", start: 1127, end: 1279 },
        DynastyEntry { name: "辽", start: 907, end: 1125 },
        DynastyEntry { name: "金", start: 1115, end: 1234 },
        DynastyEntry { name: "元", start: 1271, end: 1368 },
        DynastyEntry { name: "明", start: 1368, end: 1644 },
        DynastyEntry { name: "清", start: 1644, end: 1912 },
        DynastyEntry { name: "民国", start: 1912, end: current_year },
    ];

    // Longer (more specific) names first; the sort is stable, so ties
    // keep chronological declaration order.
    entries.sort_by_key(|e| std::cmp::Reverse(e.name.chars().count()));
    entries
});

// ── Lookup ───────────────────────────────────────────────────────────

/// An explicit "公元618年" / "公元-221年" annotation embedded in the
/// text. An exact year always wins over dynasty inference.
static RE_EXPLICIT_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"公元(-?\d{3,4})年").unwrap());

/// Suffix noise words stripped before containment matching.
const NOISE_TOKENS: &[&str] = &["时期", "代", "朝"];

/// Map a dynasty/era name to its year range.
///
/// Containment matching handles both directions: a table name nested
/// inside an annotated text ("清·咸丰" contains 清) and an abbreviated
/// text nested inside a longer table name. Name-in-text matches are
/// tried first across the whole table, so an exact generic name (宋)
/// resolves to its own entry and is never captured by a longer name
/// that merely contains it (北宋).
///
/// No match is a normal outcome for free-text noise, reported as the
/// unknown interval — never an error.
pub fn lookup_dynasty(text: &str) -> DateInterval {
    let text = text.trim();
    if text.is_empty() {
        return DateInterval::unknown();
    }

    if let Some(caps) = RE_EXPLICIT_YEAR.captures(text) {
        if let Ok(y) = caps[1].parse::<i32>() {
            return DateInterval::year(y);
        }
    }

    let mut clean = text.to_string();
    for tok in NOISE_TOKENS {
        clean = clean.replace(tok, "");
    }
    // An empty cleaned string is a substring of every name; bail out
    // instead of matching the whole table.
    if clean.is_empty() {
        return DateInterval::unknown();
    }

    for e in DYNASTY_TABLE.iter() {
        if clean.contains(e.name) {
            return DateInterval::span(e.start, e.end);
        }
    }
    for e in DYNASTY_TABLE.iter() {
        if e.name.contains(clean.as_str()) {
            return DateInterval::span(e.start, e.end);
        }
    }

    DateInterval::unknown()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_dynasty() {
        assert_eq!(lookup_dynasty("北宋"), DateInterval::span(960, 1127));
        assert_eq!(lookup_dynasty("唐"), DateInterval::span(618, 907));
    }

    #[test]
    fn test_specific_outranks_generic() {
        // 西周 must resolve to Western Zhou, never the generic 周
        assert_eq!(lookup_dynasty("西周"), DateInterval::span(-1046, -771));
        assert_eq!(lookup_dynasty("东汉"), DateInterval::span(25, 220));
    }

    #[test]
    fn test_generic_name_is_not_captured_by_specific() {
        // Bare 宋 is the full Song range, not 北宋
        assert_eq!(lookup_dynasty("宋"), DateInterval::span(960, 1279));
        assert_eq!(lookup_dynasty("周"), DateInterval::span(-1046, -256));
    }

    #[test]
    fn test_annotated_text_contains_name() {
        // Era annotation nested around the dynasty name
        assert_eq!(lookup_dynasty("清·咸丰"), DateInterval::span(1644, 1912));
    }

    #[test]
    fn test_suffix_noise_stripped() {
        assert_eq!(lookup_dynasty("清朝"), DateInterval::span(1644, 1912));
        assert_eq!(lookup_dynasty("明代"), DateInterval::span(1368, 1644));
        assert_eq!(lookup_dynasty("战国时期"), DateInterval::span(-475, -221));
    }

    #[test]
    fn test_explicit_year_wins() {
        assert_eq!(lookup_dynasty("唐 公元618年"), DateInterval::year(618));
        assert_eq!(lookup_dynasty("公元-221年"), DateInterval::year(-221));
    }

    #[test]
    fn test_no_match_is_unknown() {
        assert_eq!(lookup_dynasty(""), DateInterval::unknown());
        assert_eq!(lookup_dynasty("佚名"), DateInterval::unknown());
        // All-noise input must not match the whole table
        assert_eq!(lookup_dynasty("时期"), DateInterval::unknown());
    }

    #[test]
    fn test_republic_entry_is_open_ended() {
        let iv = lookup_dynasty("民国");
        assert_eq!(iv.start_year, Some(1912));
        assert!(iv.end_year.unwrap() >= 2025);
    }
}
