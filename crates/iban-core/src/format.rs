//! # Formatting
//!
//! Conversions between the electronic form of an IBAN (no separators,
//! uppercase) and the grouped print form (`GB82 WEST 1234 5698 7654 32`).

/// Width of a print-format group.
const GROUP_WIDTH: usize = 4;

/// Strip everything outside `[A-Za-z0-9]` and uppercase the rest.
pub fn electronic_format(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Electronic form split into groups of four joined by `separator`.
pub fn print_format(input: &str, separator: &str) -> String {
    let electronic = electronic_format(input);
    electronic
        .as_bytes()
        .chunks(GROUP_WIDTH)
        .map(|group| String::from_utf8_lossy(group))
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn electronic_strips_and_uppercases() {
        assert_eq!(
            electronic_format(" gb82-west 1234.5698 7654 32\n"),
            "GB82WEST12345698765432"
        );
        assert_eq!(electronic_format("é-ß"), "");
    }

    #[test]
    fn print_groups_by_four() {
        assert_eq!(
            print_format("GB82WEST12345698765432", " "),
            "GB82 WEST 1234 5698 7654 32"
        );
        assert_eq!(
            print_format("be68 5390 0754 7034", "-"),
            "BE68-5390-0754-7034"
        );
        assert_eq!(print_format("", " "), "");
    }

    #[test]
    fn print_is_idempotent() {
        let once = print_format("NL91ABNA0417164300", " ");
        assert_eq!(print_format(&once, " "), once);
    }
}
