//! Card-number masking applied before a payment method is persisted.

const MASK: &str = "************";

/// Keeps the last four digits of `number` and replaces the rest with a fixed
/// mask. Separators are ignored; inputs with four digits or fewer are masked
/// entirely.
pub fn mask_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().filter(char::is_ascii_digit).collect();
    if digits.len() <= 4 {
        return MASK.to_string();
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("{}{}", MASK, tail)
}
