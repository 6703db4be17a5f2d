//! Rupee formatting with Indian digit grouping (`7,50,000`)

/// Rupee sign
pub const RUPEE: &str = "₹";

/// Group an unsigned digit string the Indian way: last three, then pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format a number with Indian grouping and a fixed number of decimals
pub fn format_indian(value: f64, fraction_digits: usize) -> String {
    let formatted = format!("{:.*}", fraction_digits, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (formatted.as_str(), None),
    };

    // "-0" and "-0.00" print without the sign
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, group_indian(int_part), frac),
        None => format!("{}{}", sign, group_indian(int_part)),
    }
}

/// Format an optional rupee amount, e.g. `₹ 7,50,000`
///
/// An unavailable or non-finite value renders as a zero placeholder.
pub fn format_inr(value: Option<f64>, fraction_digits: usize) -> String {
    let amount = value.filter(|v| v.is_finite()).unwrap_or(0.0);
    format!("{} {}", RUPEE, format_indian(amount, fraction_digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("0"), "0");
        assert_eq!(group_indian("999"), "999");
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("750000"), "7,50,000");
        assert_eq!(group_indian("12345678"), "1,23,45,678");
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(Some(750_000.0), 0), "₹ 7,50,000");
        assert_eq!(format_inr(Some(11_800.0), 2), "₹ 11,800.00");
        assert_eq!(format_inr(Some(24_554.0378), 0), "₹ 24,554");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(format_inr(None, 0), "₹ 0");
        assert_eq!(format_inr(None, 2), "₹ 0.00");
        assert_eq!(format_inr(Some(f64::NAN), 2), "₹ 0.00");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_indian(-1_500.5, 2), "-1,500.50");
        assert_eq!(format_indian(-0.001, 2), "0.00");
    }
}
