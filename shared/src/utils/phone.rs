//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Country prefix every registered number must carry
pub const INDONESIA_PREFIX: &str = "+62";

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Check if a phone number is in E.164 format
pub fn is_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Check if a phone number is a valid E.164 Indonesian number (`+62...`)
pub fn is_valid_indonesian_phone(phone: &str) -> bool {
    is_e164(phone) && phone.starts_with(INDONESIA_PREFIX)
}

/// Mask a phone number for logs (e.g., +62****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}
