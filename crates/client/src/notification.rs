//! Push notification alert checks.

use anews_core::ValidationError;

/// Alerts longer than this are truncated by the service.
pub const ALERT_MAX_CHARS: usize = 500;

/// Alerts longer than this may be cut off on some devices.
pub const ALERT_RECOMMENDED_CHARS: usize = 130;

/// Check an alert body's length in characters.
pub fn validate_alert_body(alert_body: &str) -> Result<(), ValidationError> {
    let length = alert_body.chars().count();
    if length > ALERT_MAX_CHARS {
        return Err(ValidationError::AlertTooLong { length });
    }
    if length > ALERT_RECOMMENDED_CHARS {
        return Err(ValidationError::AlertAboveRecommended { length });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_thresholds() {
        assert!(validate_alert_body("Breaking news").is_ok());
        assert!(validate_alert_body(&"a".repeat(130)).is_ok());
        assert_eq!(
            validate_alert_body(&"a".repeat(131)),
            Err(ValidationError::AlertAboveRecommended { length: 131 })
        );
        assert_eq!(
            validate_alert_body(&"a".repeat(501)),
            Err(ValidationError::AlertTooLong { length: 501 })
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 130 three-byte characters
        let alert = "€".repeat(130);
        assert_eq!(alert.len(), 390);
        assert!(validate_alert_body(&alert).is_ok());
    }
}
