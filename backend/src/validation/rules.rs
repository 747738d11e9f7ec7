//! Common validation rules shared across request payloads.

use std::net::IpAddr;
use validator::ValidationError;

const SERIAL_NUMBER_MAX_LEN: usize = 100;

/// Rejects values made only of whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Validates serial number format.
///
/// Requirements:
/// - At most 100 characters after trimming
/// - Letters, digits and `- _ . / :` only
///
/// A blank value is accepted and stored as no serial number.
pub fn validate_serial_number(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.len() > SERIAL_NUMBER_MAX_LEN {
        return Err(ValidationError::new("serial_number_too_long"));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':'))
    {
        return Err(ValidationError::new("serial_number_invalid_characters"));
    }
    Ok(())
}

/// Accepts IPv4 or IPv6 addresses. Blank is treated as absent.
pub fn validate_ip_address(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.parse::<IpAddr>().is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("ip_address_invalid"))
}

/// Accepts `aa:bb:cc:dd:ee:ff` or `aa-bb-cc-dd-ee-ff`, any case.
pub fn validate_mac_address(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let separator = if value.contains('-') { '-' } else { ':' };
    let octets: Vec<&str> = value.split(separator).collect();
    let valid = octets.len() == 6
        && octets
            .iter()
            .all(|octet| octet.len() == 2 && octet.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("mac_address_invalid"))
    }
}

/// Accepts `address/prefix` with a prefix that fits the address family.
pub fn validate_cidr(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    let Some((address, prefix)) = value.split_once('/') else {
        return Err(ValidationError::new("subnet_missing_prefix"));
    };
    let address: IpAddr = address
        .parse()
        .map_err(|_| ValidationError::new("subnet_invalid_address"))?;
    let prefix: u8 = prefix
        .parse()
        .map_err(|_| ValidationError::new("subnet_invalid_prefix"))?;
    let max = if address.is_ipv4() { 32 } else { 128 };
    if prefix > max {
        return Err(ValidationError::new("subnet_invalid_prefix"));
    }
    Ok(())
}
