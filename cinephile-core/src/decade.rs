//! Decade buckets derived from free-text release years.
//!
//! # Examples
//! ```
//! use cinephile_core::decade_of;
//!
//! assert_eq!(decade_of("1994"), "1990s");
//! assert_eq!(decade_of("abc"), "Unknown");
//! ```

/// Bucket used when a year cannot be parsed.
pub const UNKNOWN_DECADE: &str = "Unknown";

/// Return the decade label for a release year.
///
/// The leading integer of `year` is parsed the way a lenient `parseInt`
/// would: leading whitespace and a sign are accepted and trailing text is
/// ignored, so `"2004 (re-release)"` still lands in `"2000s"`.
pub fn decade_of(year: &str) -> String {
    parse_year(year).map_or_else(
        || UNKNOWN_DECADE.to_owned(),
        |value| format!("{}s", value.div_euclid(10) * 10),
    )
}

/// Parse the leading integer of a free-text year.
pub(crate) fn parse_year(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = trimmed.strip_prefix('-').map_or_else(
        || (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        |rest| (true, rest),
    );
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let magnitude: i64 = unsigned.get(..end)?.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
