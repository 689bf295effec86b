//! Input validation
//!
//! Everything here runs before any network call. The submission check is
//! ordered: the first failing rule halts and reports, and callers can rely
//! on zero requests having been issued when it fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ClientError;

/// Claim numbers are fixed-width identifiers.
pub const CLAIM_NUMBER_LEN: usize = 10;

/// Accepted payroll export extensions (case-insensitive).
pub const UPLOAD_EXTENSIONS: &[&str] = &[".html", ".htm"];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}(?:\.[A-Za-z]{2,})*$")
        .expect("email regex is valid")
});

static DATE_MDY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])/(\d{4})$").expect("date regex is valid")
});

static RETRY_AFTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*seconds").expect("retry-after regex is valid"));

/// Canonical email form used for validation, the wire, and the session store.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Standard address shape: local part, domain, TLD of 2+ letters, optional
/// further labels. `a@b` fails, `a@b.co` and `a@b.co.uk` pass.
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw.trim())
}

pub fn is_upload_extension(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    UPLOAD_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Strict `MM/DD/YYYY`, and the date must exist on the calendar
/// (`02/30/2024` is out, `02/29/2024` is a real leap day).
pub fn is_valid_date_mdy(raw: &str) -> bool {
    let Some(caps) = DATE_MDY_RE.captures(raw) else {
        return false;
    };
    let month: u32 = caps[1].parse().expect("regex guarantees digits");
    let day: u32 = caps[2].parse().expect("regex guarantees digits");
    let year: i32 = caps[3].parse().expect("regex guarantees digits");
    chrono::NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Pull the retry delay out of a 429 body's message ("Try again in N
/// seconds"). Callers fall back to the fixed cooldown when absent.
pub fn parse_retry_after_secs(message: &str) -> Option<u32> {
    RETRY_AFTER_RE
        .captures(message)
        .and_then(|caps| caps[1].parse().ok())
}

/// Ordered pre-submit checks for the upload workflow. First failure wins.
pub fn validate_submission(
    file_name: Option<&str>,
    claim_number: Option<&str>,
    date_of_loss: Option<&str>,
) -> Result<(), ClientError> {
    let Some(file_name) = file_name else {
        return Err(ClientError::Validation(
            "Please select a file before submitting.".into(),
        ));
    };
    if !is_upload_extension(file_name) {
        return Err(ClientError::Validation(
            "File must be a .html or .htm payroll export.".into(),
        ));
    }
    if let Some(claim) = claim_number {
        if !claim.is_empty() && claim.chars().count() != CLAIM_NUMBER_LEN {
            return Err(ClientError::Validation(
                "Claim number must be exactly 10 characters.".into(),
            ));
        }
    }
    if let Some(date) = date_of_loss {
        if !date.is_empty() && !is_valid_date_mdy(date) {
            return Err(ClientError::Validation(
                "Date must be a real date in MM/DD/YYYY.".into(),
            ));
        }
    }
    Ok(())
}
