//! Utility functions and types.

use std::fmt::Debug;

/// Formats a secret with everything but its ends hidden.
///
/// Values shorter than 12 characters are masked entirely. Longer values keep
/// their first and last three characters, enough to tell two keys apart in
/// logs without leaking either.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.0;
        match value.len() {
            0 => f.write_str("EMPTY"),
            n if n < 12 => f.write_str("***"),
            n => write!(f, "{}***{}", &value[..3], &value[n - 3..]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("", "EMPTY"),
            ("secret", "***"),
            ("elevenchars", "***"),
            ("averylongaccesskeyid", "ave***yid"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact(input)),
                expected,
                "Failed on input: {}",
                input
            );
        }
    }
}
