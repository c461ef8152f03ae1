//! Password and display-name rules applied at the request boundary

/// Characters accepted as the "special" class of a password
const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>/?\\|`~";

/// bcrypt reads at most this many bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Whether the whole password, in UTF-8 bytes, is consumed by bcrypt
pub fn fits_hash_input(password: &str) -> bool {
    password.len() <= MAX_PASSWORD_BYTES
}

/// A password must contain an uppercase letter, a digit and a special character
pub fn is_strong_password(password: &str) -> bool {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

    has_upper && has_digit && has_special
}

/// Names are restricted to ASCII letters
pub fn is_alpha_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}
