//! Property-based tests for text field sanitization.

use proptest::prelude::*;

use super::sanitize::sanitize_text_field;

proptest! {
    /// Output never carries line breaks, tabs or other control characters.
    #[test]
    fn prop_no_control_characters(input in ".*") {
        let out = sanitize_text_field(&input);
        prop_assert!(!out.chars().any(char::is_control));
    }

    /// Output is trimmed and never holds two consecutive spaces.
    #[test]
    fn prop_trimmed_and_single_spaced(input in "[ a-z<>%0-9\t\r\n]*") {
        let out = sanitize_text_field(&input);
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("  "));
    }

    /// Every surviving `<` is followed by a space, so no tag can remain.
    #[test]
    fn prop_no_tag_survives(input in "[a-z<>/ =\"']*") {
        let out = sanitize_text_field(&input);
        let bytes = out.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if *b == b'<' {
                prop_assert!(i + 1 == bytes.len() || bytes[i + 1] == b' ');
            }
        }
    }

    /// Script payloads in front of a date never leak into the result.
    #[test]
    fn prop_script_prefix_is_removed(
        payload in "[a-z0-9();]*",
        date in "20[0-9]{2}-[01][0-9]-[0-3][0-9]",
    ) {
        let out = sanitize_text_field(&format!("<script>{payload}</script>{date}"));
        prop_assert_eq!(out, date);
    }

    /// No percent-encoded octet remains.
    #[test]
    fn prop_no_percent_octets(input in "[%0-9a-fA-Fg ]*") {
        let out = sanitize_text_field(&input);
        let bytes = out.as_bytes();
        let has_octet = bytes.windows(3).any(|w| {
            w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit()
        });
        prop_assert!(!has_octet);
    }

    /// Plain date-like values pass through untouched.
    #[test]
    fn prop_plain_values_unchanged(value in "[A-Za-z0-9_-]{0,32}") {
        prop_assert_eq!(sanitize_text_field(&value), value);
    }
}
