use crate::error::{Error, Result};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Keystroke-level sanitation for the mobile field: strip everything that is
/// not a digit and cap at 10 characters, so free-form text never reaches
/// validation.
pub fn sanitize_mobile(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(10).collect()
}

pub fn validate_mobile(mobile: &str) -> Result<()> {
    if mobile.trim().is_empty() {
        return Err(Error::validation("Mobile number is required"));
    }
    if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation("Mobile number must be 10 digits"));
    }
    // Indian mobile numbers start with 6-9.
    if !matches!(mobile.as_bytes()[0], b'6'..=b'9') {
        return Err(Error::validation("Enter a valid mobile number"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::validation("Password is required"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::validation(
            "Password must be at least 6 characters long",
        ));
    }
    Ok(())
}

pub fn validate_confirm(password: &str, confirm: &str) -> Result<()> {
    if password != confirm {
        return Err(Error::validation("Passwords do not match"));
    }
    Ok(())
}

pub fn validate_required(value: &str, label: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{label} is required")));
    }
    Ok(())
}
