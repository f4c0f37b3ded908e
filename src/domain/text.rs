//! Fixed-width text helpers used by the receipt and chart layouts.
//!
//! All widths are measured in `char`s. None of the helpers consult the
//! `std::fmt` width machinery, so the layout never depends on formatter
//! flags.

/// Center `s` in a field of `width`, padding with `fill`.
/// When the padding is odd the extra fill character goes on the right.
/// Strings at least `width` long are returned unchanged.
pub fn center(s: &str, width: usize, fill: char) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(s);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// Pad `s` on the right with spaces up to `width`.
pub fn ljust(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut out = s.to_string();
    if len < width {
        out.extend(std::iter::repeat_n(' ', width - len));
    }
    out
}

/// Pad `s` on the left with spaces up to `width`.
pub fn rjust(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let mut out: String = std::iter::repeat_n(' ', width - len).collect();
    out.push_str(s);
    out
}

/// Keep the first `max` characters of `s`.
pub fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_even_padding() {
        assert_eq!(center("Food", 30, '*'), "*************Food*************");
    }

    #[test]
    fn test_center_odd_padding_goes_right() {
        assert_eq!(center("Auto", 9, '*'), "**Auto***");
        assert_eq!(center("Clothing", 30, '*').len(), 30);
        assert_eq!(center("abc", 30, '*'), "*************abc**************");
    }

    #[test]
    fn test_center_wider_than_field() {
        assert_eq!(center("Entertainment", 5, '*'), "Entertainment");
        assert_eq!(center("", 4, '-'), "----");
    }

    #[test]
    fn test_justify() {
        assert_eq!(ljust("groceries", 12), "groceries   ");
        assert_eq!(rjust("-10.15", 7), " -10.15");
        assert_eq!(rjust("1000.00", 7), "1000.00");
        assert_eq!(ljust("toolong", 3), "toolong");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("restaurant and more food for dessert", 23), "restaurant and more foo");
        assert_eq!(truncate("short", 23), "short");
        assert_eq!(truncate("café au lait", 4), "café");
        assert_eq!(truncate("abc", 0), "");
    }
}
