//! # Chinese Numerals
//!
//! Reads numerals such as `十一`, `二十`, `一百零一` used in `第X季` / `第X集`
//! markers. Magnitudes above 万 are not supported.

const DIGITS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

const UNITS: [(char, u32); 4] = [('十', 10), ('百', 100), ('千', 1_000), ('万', 10_000)];

/// Character class matching a run of Chinese numeral characters, for use in patterns.
pub const NUMERAL_CLASS: &str = "[零一二三四五六七八九十百千万]";

fn digit_value(c: char) -> Option<u32> {
    DIGITS.iter().position(|&d| d == c).map(|i| i as u32)
}

fn unit_value(c: char) -> Option<u32> {
    UNITS.iter().find(|(u, _)| *u == c).map(|(_, v)| *v)
}

/// Parses a plain decimal or Chinese numeral into an integer.
///
/// Returns `None` for empty input, for any character outside
/// `零一二三四五六七八九十百千万`, and on overflow.
///
/// ```
/// use nazuke_core::analyzer::numeral::parse_chinese_numeral;
///
/// assert_eq!(parse_chinese_numeral("十一"), Some(11));
/// assert_eq!(parse_chinese_numeral("一百零一"), Some(101));
/// assert_eq!(parse_chinese_numeral("12"), Some(12));
/// assert_eq!(parse_chinese_numeral("abc"), None);
/// ```
#[must_use]
pub fn parse_chinese_numeral(text: &str) -> Option<u32> {
    let raw = text.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse().ok();
    }

    let mut total: u32 = 0;
    let mut segment: u32 = 0;
    for c in raw.chars() {
        if let Some(d) = digit_value(c) {
            // 零 only separates magnitudes
            segment = d;
        } else if let Some(unit) = unit_value(c) {
            total = total.checked_add(segment.max(1).checked_mul(unit)?)?;
            segment = 0;
        } else {
            return None;
        }
    }
    total.checked_add(segment)
}

/// Renders `n` as a standard Chinese numeral (`0..=99_999`).
///
/// Tens in the leading position drop the `一` (`十一`, not `一十一`) and a
/// single `零` marks each gap between non-zero places.
#[must_use]
pub fn render_chinese_numeral(n: u32) -> Option<String> {
    if n > 99_999 {
        return None;
    }
    if n == 0 {
        return Some(DIGITS[0].to_string());
    }

    let places: [(u32, Option<char>); 5] = [
        (10_000, Some('万')),
        (1_000, Some('千')),
        (100, Some('百')),
        (10, Some('十')),
        (1, None),
    ];

    let mut out = String::new();
    let mut started = false;
    let mut pending_zero = false;
    for (value, unit) in places {
        let d = (n / value) % 10;
        if d == 0 {
            pending_zero |= started;
            continue;
        }
        if pending_zero {
            out.push(DIGITS[0]);
            pending_zero = false;
        }
        if !(d == 1 && value == 10 && !started) {
            out.push(DIGITS[d as usize]);
        }
        if let Some(u) = unit {
            out.push(u);
        }
        started = true;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digits() {
        assert_eq!(parse_chinese_numeral("零"), Some(0));
        assert_eq!(parse_chinese_numeral("一"), Some(1));
        assert_eq!(parse_chinese_numeral("九"), Some(9));
    }

    #[test]
    fn elided_leading_one() {
        assert_eq!(parse_chinese_numeral("十"), Some(10));
        assert_eq!(parse_chinese_numeral("十一"), Some(11));
        assert_eq!(parse_chinese_numeral("百"), Some(100));
    }

    #[test]
    fn multiples_and_internal_zero() {
        assert_eq!(parse_chinese_numeral("二十"), Some(20));
        assert_eq!(parse_chinese_numeral("九十九"), Some(99));
        assert_eq!(parse_chinese_numeral("一百零一"), Some(101));
        assert_eq!(parse_chinese_numeral("一千二百"), Some(1200));
        assert_eq!(parse_chinese_numeral("一千零一十"), Some(1010));
        assert_eq!(parse_chinese_numeral("一万"), Some(10_000));
        assert_eq!(parse_chinese_numeral("一万二千三百四十五"), Some(12_345));
    }

    #[test]
    fn decimal_passthrough() {
        assert_eq!(parse_chinese_numeral("12"), Some(12));
        assert_eq!(parse_chinese_numeral(" 03 "), Some(3));
    }

    #[test]
    fn rejects_foreign_characters() {
        assert_eq!(parse_chinese_numeral("abc"), None);
        assert_eq!(parse_chinese_numeral("十a"), None);
        assert_eq!(parse_chinese_numeral("第二"), None);
        assert_eq!(parse_chinese_numeral(""), None);
        assert_eq!(parse_chinese_numeral("   "), None);
    }

    #[test]
    fn overflow_is_not_found() {
        let huge = "九万".repeat(50_000);
        assert_eq!(parse_chinese_numeral(&huge), None);
    }

    #[test]
    fn render_examples() {
        assert_eq!(render_chinese_numeral(0).as_deref(), Some("零"));
        assert_eq!(render_chinese_numeral(10).as_deref(), Some("十"));
        assert_eq!(render_chinese_numeral(11).as_deref(), Some("十一"));
        assert_eq!(render_chinese_numeral(20).as_deref(), Some("二十"));
        assert_eq!(render_chinese_numeral(101).as_deref(), Some("一百零一"));
        assert_eq!(render_chinese_numeral(110).as_deref(), Some("一百一十"));
        assert_eq!(render_chinese_numeral(1001).as_deref(), Some("一千零一"));
        assert_eq!(render_chinese_numeral(10_001).as_deref(), Some("一万零一"));
        assert_eq!(render_chinese_numeral(100_000), None);
    }

    #[test]
    fn round_trip_below_ten_thousand() {
        for n in 0..=9_999 {
            let rendered = render_chinese_numeral(n).unwrap();
            assert_eq!(parse_chinese_numeral(&rendered), Some(n), "failed for {rendered}");
        }
    }

    #[test]
    fn round_trip_up_to_wan_range() {
        for n in (10_000..=99_999).step_by(97) {
            let rendered = render_chinese_numeral(n).unwrap();
            assert_eq!(parse_chinese_numeral(&rendered), Some(n), "failed for {rendered}");
        }
    }
}
