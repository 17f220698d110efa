/// Naive English pluralization: `inflect("address", 3)` is "addresses".
pub fn inflect(word: &str, count: usize) -> String {
    if count == 1 {
        return word.to_string();
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }
    format!("{word}s")
}

/// 12-hour clock label for an hour of the day, e.g. `15` is "3 PM".
pub fn format_hour(hour: u8) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}

/// Replaces `%{name}` placeholders. Unknown placeholders are left as they are.
pub fn interpolate(template: &str, args: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("%{{{name}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflects_common_nouns() {
        assert_eq!(inflect("address", 1), "address");
        assert_eq!(inflect("address", 3), "addresses");
        assert_eq!(inflect("address", 0), "addresses");
        assert_eq!(inflect("recipient", 2), "recipients");
        assert_eq!(inflect("query", 2), "queries");
        assert_eq!(inflect("day", 2), "days");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_hour(0), "12 AM");
        assert_eq!(format_hour(8), "8 AM");
        assert_eq!(format_hour(12), "12 PM");
        assert_eq!(format_hour(23), "11 PM");
    }

    #[test]
    fn interpolates_named_args() {
        let text = interpolate(
            "%{prefix} daily at %{time}",
            &[("prefix", "Check".to_string()), ("time", "8 AM".to_string())],
        );
        assert_eq!(text, "Check daily at 8 AM");
        assert_eq!(interpolate("%{missing}", &[]), "%{missing}");
    }
}
