//! Transient credential payloads
//!
//! Used once per login/register call, never persisted. Validation
//! happens here, before any network traffic.

use serde::Serialize;

use crate::error::SessionError;
use crate::Result;

const MIN_PASSWORD_LEN: usize = 6;

/// Login payload.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Optional push-notification registration identifier, passed
    /// through opaquely.
    #[serde(rename = "deviceToken", skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            device_token: None,
        }
    }

    pub fn with_device_token(mut self, device_token: Option<String>) -> Self {
        self.device_token = device_token;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Registration payload: credentials plus a display name.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(rename = "deviceToken", skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
}

impl Registration {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            device_token: None,
        }
    }

    pub fn with_device_token(mut self, device_token: Option<String>) -> Self {
        self.device_token = device_token;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if self.name.trim().is_empty() {
            return Err(SessionError::Validation("Name is required".to_string()));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(SessionError::Validation("Email is required".to_string()));
    }
    // Not an RFC check; the remote has the final word.
    if !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
        return Err(SessionError::Validation(format!(
            "Invalid email address: {trimmed}"
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(SessionError::Validation("Password is required".to_string()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(SessionError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        assert!(Credentials::new("a@b.com", "secret1").validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_email() {
        for email in ["", "   ", "no-at-sign", "@leading", "trailing@"] {
            let result = Credentials::new(email, "secret1").validate();
            assert!(result.is_err(), "accepted {email:?}");
            assert!(matches!(result, Err(SessionError::Validation(_))));
        }
    }

    #[test]
    fn test_rejects_short_password() {
        let result = Credentials::new("a@b.com", "short").validate();
        assert!(matches!(result, Err(SessionError::Validation(_))));
    }

    #[test]
    fn test_registration_requires_name() {
        let result = Registration::new("a@b.com", "secret1", "  ").validate();
        assert!(matches!(result, Err(SessionError::Validation(_))));

        assert!(Registration::new("a@b.com", "secret1", "A")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_device_token_omitted_from_wire_when_absent() {
        let json = serde_json::to_string(&Credentials::new("a@b.com", "secret1")).unwrap();
        assert!(!json.contains("deviceToken"));

        let json = serde_json::to_string(
            &Credentials::new("a@b.com", "secret1").with_device_token(Some("dev1".to_string())),
        )
        .unwrap();
        assert!(json.contains(r#""deviceToken":"dev1""#));
    }
}
