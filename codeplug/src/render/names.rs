//! Name tokens and value encodings used in rendered configs.

use crate::model::MAX_NAME_LENGTH;

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Reduce a display name to a config token.
///
/// Whitespace runs become single underscores, any character outside
/// `[A-Za-z0-9_-]` becomes an underscore, underscore runs collapse and
/// leading or trailing underscores are dropped. The result is at most
/// [`MAX_NAME_LENGTH`] characters; an empty result is replaced by
/// `fallback`. Sanitizing a sanitized name returns it unchanged.
///
/// # Examples
///
/// ```
/// use codeplug::render::sanitize_name;
///
/// assert_eq!(sanitize_name("GB3CD CROOK FM", "CH1"), "GB3CD_CROOK_FM");
/// assert_eq!(sanitize_name("  N.IRE / ANL  ", "ZONE1"), "N_IRE_ANL");
/// assert_eq!(sanitize_name("***", "TG4"), "TG4");
/// ```
#[must_use]
pub fn sanitize_name(value: &str, fallback: &str) -> String {
    let joined = value.split_whitespace().collect::<Vec<_>>().join("_");

    let mut token = String::with_capacity(joined.len());
    for c in joined.chars() {
        let c = if is_token_char(c) { c } else { '_' };
        if c == '_' && token.ends_with('_') {
            continue;
        }
        token.push(c);
    }

    let token: String = token.trim_matches('_').chars().take(MAX_NAME_LENGTH).collect();
    let token = token.trim_end_matches('_');
    if token.is_empty() {
        fallback.chars().take(MAX_NAME_LENGTH).collect()
    } else {
        token.to_string()
    }
}

/// Case and whitespace insensitive lookup key.
#[must_use]
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compress channel or contact numbers into `1-3,5,9` form.
///
/// Duplicates are ignored and order does not matter. An empty set renders
/// as `-`.
///
/// # Examples
///
/// ```
/// use codeplug::render::compress_ranges;
///
/// assert_eq!(compress_ranges(&[9, 1, 2, 3, 5, 2]), "1-3,5,9");
/// assert_eq!(compress_ranges(&[]), "-");
/// ```
#[must_use]
pub fn compress_ranges(numbers: &[usize]) -> String {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let Some((&first, rest)) = sorted.split_first() else {
        return "-".to_string();
    };

    let mut parts = Vec::new();
    let mut push = |start: usize, end: usize| {
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{end}"));
        }
    };

    let (mut start, mut end) = (first, first);
    for &n in rest {
        if n == end + 1 {
            end = n;
        } else {
            push(start, end);
            start = n;
            end = n;
        }
    }
    push(start, end);

    parts.join(",")
}

/// Trim a frequency to at most five decimals without trailing zeros.
///
/// Returns `None` when the value is not a number.
#[must_use]
pub fn format_frequency(value: &str) -> Option<String> {
    let mhz: f64 = value.trim().parse().ok()?;
    let text = format!("{mhz:.5}");
    Some(text.trim_end_matches('0').trim_end_matches('.').to_string())
}

/// `+` for full power settings, `-` otherwise.
#[must_use]
pub fn power_symbol(value: &str) -> &'static str {
    match value.trim().to_lowercase().as_str() {
        "turbo" | "high" => "+",
        _ => "-",
    }
}

/// A tone value, or `-` when unset.
#[must_use]
pub fn tone_value(value: &str) -> &str {
    let tone = value.trim();
    if tone.is_empty() || tone.eq_ignore_ascii_case("off") {
        "-"
    } else {
        tone
    }
}

/// `+` for receive-only channels.
#[must_use]
pub fn receive_only_symbol(value: &str) -> &'static str {
    if value.trim().eq_ignore_ascii_case("on") {
        "+"
    } else {
        "-"
    }
}

/// Analog width in kHz without its unit suffix.
#[must_use]
pub fn analog_width(value: &str) -> &str {
    let width = value.trim().trim_end_matches(['K', 'k']);
    if width.is_empty() {
        "12.5"
    } else {
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Local", "TG1"), "Local");
        assert_eq!(sanitize_name("UK Wide", "TG1"), "UK_Wide");
        assert_eq!(sanitize_name("a  b\tc", "X"), "a_b_c");
        assert_eq!(sanitize_name("__a__b__", "X"), "a_b");
        assert_eq!(sanitize_name("Zürich-1", "X"), "Z_rich-1");
        assert_eq!(sanitize_name("", "CH7"), "CH7");
        assert_eq!(sanitize_name(" !! ", "CH7"), "CH7");
    }

    #[test]
    fn test_sanitize_truncates_without_trailing_underscore() {
        assert_eq!(sanitize_name("ABCDEFGHIJKLMNO PQR", "X"), "ABCDEFGHIJKLMNO");
        assert_eq!(sanitize_name("WOLVERHAMPTON CITY", "X"), "WOLVERHAMPTON_CI");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Local  "), "local");
        assert_eq!(normalize("UK   Wide"), "uk wide");
    }

    #[test]
    fn test_compress_ranges() {
        assert_eq!(compress_ranges(&[1, 2, 3, 5, 9]), "1-3,5,9");
        assert_eq!(compress_ranges(&[4]), "4");
        assert_eq!(compress_ranges(&[2, 1]), "1-2");
        assert_eq!(compress_ranges(&[]), "-");
    }

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency("145.68750").as_deref(), Some("145.6875"));
        assert_eq!(format_frequency("434.00000").as_deref(), Some("434"));
        assert_eq!(format_frequency("446.00625").as_deref(), Some("446.00625"));
        assert_eq!(format_frequency(" 145.5 ").as_deref(), Some("145.5"));
        assert_eq!(format_frequency("abc"), None);
    }

    #[test]
    fn test_value_symbols() {
        assert_eq!(power_symbol("High"), "+");
        assert_eq!(power_symbol("TURBO"), "+");
        assert_eq!(power_symbol("Low"), "-");
        assert_eq!(tone_value("Off"), "-");
        assert_eq!(tone_value(""), "-");
        assert_eq!(tone_value(" 118.8 "), "118.8");
        assert_eq!(receive_only_symbol("On"), "+");
        assert_eq!(receive_only_symbol("Off"), "-");
        assert_eq!(analog_width("25K"), "25");
        assert_eq!(analog_width("12.5k"), "12.5");
        assert_eq!(analog_width("K"), "12.5");
    }
}
