//! EAN-13 barcode validation.

/// Check whether a string is a valid EAN-13 barcode.
///
/// The code is left-padded with zeros to 13 digits before checking, so
/// shorter all-digit strings are accepted when their checksum holds.
pub fn is_valid_ean13(code: &str) -> bool {
    if code.is_empty() || code.len() > 13 {
        return false;
    }
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let padded = format!("{:0>13}", code);
    let digits: Vec<u32> = padded.bytes().map(|b| (b - b'0') as u32).collect();

    check_digit(&digits[..12]) == digits[12]
}

/// Compute the EAN-13 check digit for the first 12 digits.
///
/// Odd positions (1st, 3rd, ...) weigh 1, even positions weigh 3.
fn check_digit(digits: &[u32]) -> u32 {
    let total: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    (10 - total % 10) % 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_barcodes() {
        assert!(is_valid_ean13("4006381333931"));
        assert!(is_valid_ean13("7891000100103"));
        assert!(is_valid_ean13("0000000000000"));
    }

    #[test]
    fn test_short_code_is_zero_padded() {
        // "96385074" pads to "0000096385074", a valid EAN-8 embedded in EAN-13.
        assert!(is_valid_ean13("96385074"));
    }

    #[test]
    fn test_bad_check_digit() {
        assert!(!is_valid_ean13("4006381333930"));
    }

    #[test]
    fn test_non_digit_rejected() {
        assert!(!is_valid_ean13("40063813339a1"));
        assert!(!is_valid_ean13(""));
    }

    #[test]
    fn test_too_long_rejected() {
        assert!(!is_valid_ean13("40063813339311"));
    }
}
