use serde::{Deserialize, Serialize};

use super::CheckoutError;

/// Delivery form fields as entered by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub full_name: String,
    pub phone: String,
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
}

impl CustomerDetails {
    /// Checks fields in form order and reports the first problem.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.full_name.trim().is_empty() {
            return Err(CheckoutError::MissingName);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(CheckoutError::MissingPhone);
        }
        if !is_bd_mobile(phone) {
            return Err(CheckoutError::InvalidPhone);
        }

        if self.street.trim().is_empty() {
            return Err(CheckoutError::MissingAddress);
        }
        Ok(())
    }

    /// `"street, city zip"`, dropping the dangling comma when city and zip
    /// are both blank.
    pub fn delivery_address(&self) -> String {
        let joined = format!(
            "{}, {} {}",
            self.street.trim(),
            self.city.trim(),
            self.zip.trim()
        );
        let trimmed = joined.trim_end();
        match trimmed.strip_suffix(',') {
            Some(head) if trimmed.len() < joined.len() => head.to_string(),
            _ => joined,
        }
    }
}

/// Bangladeshi mobile number: optional `+88`/`88` country prefix, then
/// `01`, an operator digit 3-9 and eight more digits. Spaces and dashes are
/// ignored.
pub fn is_bd_mobile(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    let local = |s: &str| {
        let bytes = s.as_bytes();
        bytes.len() == 11
            && bytes.iter().all(u8::is_ascii_digit)
            && bytes.starts_with(b"01")
            && (b'3'..=b'9').contains(&bytes[2])
    };

    let valid = [
        Some(digits.as_str()),
        digits.strip_prefix("+88"),
        digits.strip_prefix("88"),
    ]
    .into_iter()
    .flatten()
    .any(local);
    valid
}
