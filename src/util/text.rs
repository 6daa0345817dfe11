use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Fit `s` into `max_width` terminal columns, ending with `…` when cut.
///
/// Width is measured with `unicode-width`, so wide CJK characters count as
/// two columns. Returns the input unchanged when it already fits.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if UnicodeWidthStr::width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Drop control characters (including ESC) so catalog text cannot drive the terminal.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !c.is_control()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_is_borrowed() {
        assert!(matches!(truncate_to_width("Artist A", 8), Cow::Borrowed("Artist A")));
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(truncate_to_width("Artist Name", 7), "Artist…");
    }

    #[test]
    fn test_wide_characters() {
        // Each CJK character is two columns; "坂本龍一" is eight.
        assert_eq!(truncate_to_width("坂本龍一", 5), "坂本…");
        assert_eq!(truncate_to_width("坂本龍一", 8), "坂本龍一");
    }

    #[test]
    fn test_zero_and_one_column() {
        assert_eq!(truncate_to_width("Artist", 0), "");
        assert_eq!(truncate_to_width("Artist", 1), "…");
    }

    #[test]
    fn test_sanitize_drops_control_chars() {
        assert_eq!(sanitize("Bad\x1b[31mName\x07"), "Bad[31mName");
        assert!(matches!(sanitize("Clean"), Cow::Borrowed("Clean")));
    }
}
