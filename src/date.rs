//! Free-form date parser for catalog "date" fields.
//!
//! Real data examples:
//!   9世纪
//!   公元前1世纪
//!   1890-1896
//!   1775-79
//!   约1600年
//!   公元前475至221年
//!   日期为伊斯兰历1119年/西元 1707 年

use regex::Regex;
use std::sync::LazyLock;

use crate::types::DateInterval;

// ── Regex patterns ─────────────────────────────────────────────────

/// A single Chinese digit immediately preceding the century marker.
/// The substitution is scoped to this position only — a global numeral
/// scan would corrupt unrelated digits elsewhere in the string.
static RE_CN_CENTURY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([一二三四五六七八九十])世纪").unwrap());

/// Maximal runs of decimal digits.
static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

fn cn_digit_value(cn: &str) -> Option<u32> {
    match cn {
        "一" => Some(1),
        "二" => Some(2),
        "三" => Some(3),
        "四" => Some(4),
        "五" => Some(5),
        "六" => Some(6),
        "七" => Some(7),
        "八" => Some(8),
        "九" => Some(9),
        "十" => Some(10),
        _ => None,
    }
}

// ── Numeric transforms ─────────────────────────────────────────────

/// Convert a century number to its CE year span.
/// Century 9 → (800, 899); century 1 → (0, 99). `None` when the
/// century number is too large to denote a year — an absurd digit run
/// in the text must degrade to unknown, not overflow.
fn century_span(century: i32) -> Option<(i32, i32)> {
    let start = century.checked_sub(1)?.checked_mul(100)?;
    Some((start, start.checked_add(99)?))
}

/// Flip a CE span to BCE, swapping endpoints so start <= end still
/// holds. (800, 899) → (-899, -800); century 1's (0, 99) → (-99, 0).
/// Inputs come from `century_span`, whose checked math never yields
/// `i32::MIN`, so the negations cannot overflow.
fn flip_bce(span: (i32, i32)) -> (i32, i32) {
    (-span.1, -span.0)
}

/// Expand an abbreviated range end-year sharing the first year's
/// century: (1775, 79) → 1779. Applies only when y2 looks like a
/// 2-digit suffix of a 4-digit y1. An expansion that would overflow
/// leaves y2 as-is (the clamp in the range case then takes over).
fn expand_abbreviated_end(y1: i32, y2: i32) -> i32 {
    if y2 < 100 && y1 > 100 {
        ((y1 / 100) * 100).checked_add(y2).unwrap_or(y2)
    } else {
        y2
    }
}

// ── Parser ─────────────────────────────────────────────────────────

/// Parse a free-form date string into a year interval.
///
/// Never fails: malformed input degrades to `DateInterval::unknown()`
/// or a best-effort partial parse. Pure — same input, same output.
pub fn parse_date(text: &str) -> DateInterval {
    let text = text.trim();
    if text.is_empty() {
        return DateInterval::unknown();
    }

    // 1. Chinese numeral substitution, scoped to "<数>世纪" only
    let text = RE_CN_CENTURY.replace_all(text, |caps: &regex::Captures| {
        match cn_digit_value(&caps[1]) {
            Some(n) => format!("{n}世纪"),
            None => caps[0].to_string(),
        }
    });

    // 2. Era sign
    let sign: i32 = if text.contains("公元前") || text.contains("B.C.") {
        -1
    } else {
        1
    };

    // 3. Calendar-conversion override: "伊斯兰历.../西元 1707 年" — the
    // Western-calendar value after the marker is authoritative. On
    // extraction failure, fall through to the general cases.
    if let Some(idx) = text.find("/西元") {
        let after = &text[idx + "/西元".len()..];
        if let Some(y) = RE_DIGITS
            .find(after)
            .and_then(|m| m.as_str().parse::<i32>().ok())
        {
            return DateInterval::year(y);
        }
    }

    // 4. Extract every digit run, left to right. A run that overflows
    // i32 is treated as a non-matching token, not a failure.
    let numbers: Vec<i32> = RE_DIGITS
        .find_iter(&text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .collect();

    if numbers.is_empty() {
        return DateInterval::unknown();
    }

    // 5. Century case: "9世纪", "公元前1世纪"
    if text.contains("世纪") {
        return match century_span(numbers[0]) {
            Some(span) => {
                let (start, end) = if sign == -1 { flip_bce(span) } else { span };
                DateInterval::span(start, end)
            }
            None => DateInterval::unknown(),
        };
    }

    // 6. Range case: "1890-1896", "1775-79", "公元前475至221年"
    if (text.contains('-') || text.contains('至')) && numbers.len() >= 2 {
        let y1 = numbers[0];
        let mut y2 = expand_abbreviated_end(y1, numbers[1]);

        // Defensive clamp for malformed non-BCE ranges: better a
        // degenerate interval than an inverted one.
        if sign == 1 && y2 < y1 {
            y2 = y1;
        }

        return DateInterval::span(y1 * sign, y2 * sign);
    }

    // 7. Single-year fallback: "1864", "约1600年"
    DateInterval::span(numbers[0] * sign, numbers[0] * sign)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── century_span / flip_bce ──────────────────────────────────────

    #[test]
    fn test_century_span_basic() {
        assert_eq!(century_span(9), Some((800, 899)));
        assert_eq!(century_span(20), Some((1900, 1999)));
    }

    #[test]
    fn test_century_span_first_century() {
        // Century 1 starts at year 0 under this scheme
        assert_eq!(century_span(1), Some((0, 99)));
    }

    #[test]
    fn test_century_span_overflow_is_none() {
        assert_eq!(century_span(99999999), None);
        assert_eq!(century_span(i32::MAX), None);
    }

    #[test]
    fn test_flip_bce_swaps_endpoints() {
        assert_eq!(flip_bce((800, 899)), (-899, -800));
        assert_eq!(flip_bce((0, 99)), (-99, 0));
    }

    // ── expand_abbreviated_end ───────────────────────────────────────

    #[test]
    fn test_expand_abbreviated_end() {
        assert_eq!(expand_abbreviated_end(1775, 79), 1779);
        assert_eq!(expand_abbreviated_end(1890, 96), 1896);
    }

    #[test]
    fn test_expand_leaves_full_years_alone() {
        assert_eq!(expand_abbreviated_end(1890, 1896), 1896);
        // Both endpoints small: not an abbreviation
        assert_eq!(expand_abbreviated_end(25, 80), 80);
    }

    #[test]
    fn test_expand_overflow_keeps_end_year() {
        // (i32::MAX / 100) * 100 + 99 would overflow; y2 stays as-is
        assert_eq!(expand_abbreviated_end(i32::MAX, 99), 99);
    }

    // ── parse_date: degenerate input ─────────────────────────────────

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_date(""), DateInterval::unknown());
        assert_eq!(parse_date("   "), DateInterval::unknown());
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(parse_date("年代不详"), DateInterval::unknown());
        assert_eq!(parse_date("唐代风格"), DateInterval::unknown());
    }

    // ── parse_date: century ──────────────────────────────────────────

    #[test]
    fn test_arabic_century() {
        assert_eq!(parse_date("9世纪"), DateInterval::span(800, 899));
        assert_eq!(parse_date("约17世纪"), DateInterval::span(1600, 1699));
    }

    #[test]
    fn test_chinese_numeral_century() {
        assert_eq!(parse_date("九世纪"), DateInterval::span(800, 899));
        assert_eq!(parse_date("十世纪"), DateInterval::span(900, 999));
    }

    #[test]
    fn test_bce_century() {
        assert_eq!(parse_date("公元前1世纪"), DateInterval::span(-99, 0));
        assert_eq!(parse_date("公元前九世纪"), DateInterval::span(-899, -800));
    }

    #[test]
    fn test_numeral_substitution_is_scoped() {
        // The 十 in 十月 must not be rewritten — only the numeral
        // directly in front of 世纪 is substituted.
        assert_eq!(parse_date("九世纪十月"), DateInterval::span(800, 899));
    }

    // ── parse_date: ranges ───────────────────────────────────────────

    #[test]
    fn test_full_range() {
        assert_eq!(parse_date("1890-1896"), DateInterval::span(1890, 1896));
        assert_eq!(parse_date("1368年至1644年"), DateInterval::span(1368, 1644));
    }

    #[test]
    fn test_abbreviated_range() {
        assert_eq!(parse_date("1775-79"), DateInterval::span(1775, 1779));
    }

    #[test]
    fn test_inverted_range_clamps() {
        // Malformed non-BCE range: end clamped to start, never inverted
        assert_eq!(parse_date("1890-1630"), DateInterval::span(1890, 1890));
    }

    #[test]
    fn test_bce_range_keeps_textual_order() {
        // Documented asymmetry: sign applied to both endpoints as-is
        assert_eq!(parse_date("公元前475至221年"), DateInterval::span(-475, -221));
    }

    // ── parse_date: single year ──────────────────────────────────────

    #[test]
    fn test_single_year() {
        assert_eq!(parse_date("1864"), DateInterval::year(1864));
        assert_eq!(parse_date("约1600年"), DateInterval::year(1600));
    }

    #[test]
    fn test_bce_single_year() {
        assert_eq!(parse_date("公元前221年"), DateInterval::year(-221));
        assert_eq!(parse_date("770 B.C."), DateInterval::year(-770));
    }

    // ── parse_date: calendar-conversion override ─────────────────────

    #[test]
    fn test_western_calendar_override() {
        assert_eq!(
            parse_date("日期为伊斯兰历1119年/西元 1707 年"),
            DateInterval::year(1707)
        );
    }

    #[test]
    fn test_western_calendar_override_without_digits_falls_through() {
        // No digits after the marker: the general cases still apply
        assert_eq!(parse_date("1119年/西元不详"), DateInterval::year(1119));
    }

    // ── pathological numeric input ───────────────────────────────────

    #[test]
    fn test_huge_century_degrades_to_unknown() {
        // A century number no i32 year can express must not panic
        assert_eq!(parse_date("99999999世纪"), DateInterval::unknown());
        assert_eq!(parse_date("公元前99999999世纪"), DateInterval::unknown());
    }

    #[test]
    fn test_huge_digit_runs_never_panic() {
        // An 11-digit run exceeds i32 and is treated as a non-matching
        // token; the remaining year still parses
        assert_eq!(parse_date("99999999999-1896"), DateInterval::year(1896));
        assert_eq!(parse_date("99999999999"), DateInterval::unknown());
    }

    #[test]
    fn test_abbreviated_expansion_near_i32_max_clamps() {
        // Expansion would overflow; the defensive clamp takes over
        assert_eq!(
            parse_date("2147483647-99"),
            DateInterval::span(2147483647, 2147483647)
        );
    }

    // ── purity ───────────────────────────────────────────────────────

    #[test]
    fn test_idempotent() {
        let inputs = ["9世纪", "公元前1世纪", "1775-79", "约1600年", "乱码"];
        for s in inputs {
            assert_eq!(parse_date(s), parse_date(s));
        }
    }
}
