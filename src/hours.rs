//! Hour parsing and formatting for availability times.
//!
//! Availability is entered by doctors as free text ("9:00 AM", "09 AM",
//! "17:00"). Only the hour is modeled since every slot is one hour long.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn from_suffix(text: &str) -> Option<Self> {
        let suffix_start = text
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_alphabetic())
            .last()
            .map(|(i, _)| i)?;

        match text[suffix_start..].to_lowercase().as_str() {
            "am" => Some(Meridiem::Am),
            "pm" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

/// Parse the leading integer of `token`, ignoring anything after the digits.
///
/// Returns `None` when no digits follow the optional sign.
fn leading_int(token: &str) -> Option<i32> {
    let token = token.trim_start();
    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, token.strip_prefix('+').unwrap_or(token)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate instead of overflowing on absurd inputs like "99999999999".
    let value = digits[..end]
        .parse::<i64>()
        .unwrap_or(i64::MAX)
        .min(i32::MAX as i64) as i32;

    Some(sign * value)
}

/// Convert a 12-hour time string into a 24-hour hour.
///
/// The hour is the text before the first whitespace or colon. A trailing
/// `am`/`pm` marker (any case) adjusts it; without a marker the hour is
/// taken as already 24-hour. Out-of-range hours are passed through.
///
/// Returns `None` when the hour token is not numeric.
pub fn parse_hour(time: &str) -> Option<i32> {
    let trimmed = time.trim();
    let hour_token = trimmed
        .split(|c: char| c.is_whitespace() || c == ':')
        .next()
        .unwrap_or_default();

    let hour = leading_int(hour_token)?;

    let resolved = match Meridiem::from_suffix(trimmed) {
        Some(Meridiem::Pm) if hour < 12 => hour + 12,
        Some(Meridiem::Am) if hour == 12 => 0,
        _ => hour,
    };

    Some(resolved)
}

/// Render a 24-hour hour as a 12-hour label such as `"9:00 AM"`.
///
/// Both 0 and 24 are midnight.
pub fn format_hour(hour: i32) -> String {
    match hour {
        0 | 24 => "12:00 AM".to_string(),
        12 => "12:00 PM".to_string(),
        h if h < 12 => format!("{}:00 AM", h),
        h => format!("{}:00 PM", h - 12),
    }
}
