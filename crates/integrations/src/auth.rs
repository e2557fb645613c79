//! Shared-secret webhook authentication.
//!
//! Senders present the pre-shared secret either in the `x-webhook-secret`
//! header or as a `?token=` query parameter; the header wins when both are
//! present. Validation is an exact string match against the stored
//! integration settings. There is no HMAC signature, replay protection, or
//! rate limiting: any party holding the static secret can forge events.

/// Header carrying the pre-shared webhook secret.
pub const SECRET_HEADER: &str = "x-webhook-secret";

/// Query parameter carrying the pre-shared webhook secret.
pub const SECRET_QUERY_PARAM: &str = "token";

/// Authentication failure for an inbound webhook request.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WebhookAuthError {
    /// No secret is configured for this integration, so no request can be
    /// authenticated.
    #[error("integration is not configured for inbound webhooks")]
    NotConfigured,

    /// The request carried no secret in header or query string.
    #[error("missing webhook secret")]
    MissingSecret,

    /// The presented secret did not match the configured value.
    #[error("invalid webhook secret")]
    InvalidSecret,
}

/// Validate a presented secret against the configured one.
///
/// `header_secret` and `query_token` are whatever the request carried in
/// [`SECRET_HEADER`] and [`SECRET_QUERY_PARAM`] respectively.
pub fn verify_shared_secret(
    configured: Option<&str>,
    header_secret: Option<&str>,
    query_token: Option<&str>,
) -> Result<(), WebhookAuthError> {
    let expected = match configured {
        Some(s) if !s.is_empty() => s,
        _ => return Err(WebhookAuthError::NotConfigured),
    };

    let presented = header_secret
        .or(query_token)
        .ok_or(WebhookAuthError::MissingSecret)?;

    if presented == expected {
        Ok(())
    } else {
        Err(WebhookAuthError::InvalidSecret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_secret_is_accepted() {
        assert_eq!(
            verify_shared_secret(Some("s3cret"), Some("s3cret"), None),
            Ok(())
        );
        assert_eq!(
            verify_shared_secret(Some("s3cret"), None, Some("s3cret")),
            Ok(())
        );
    }

    #[test]
    fn header_takes_precedence_over_query() {
        assert_eq!(
            verify_shared_secret(Some("s3cret"), Some("wrong"), Some("s3cret")),
            Err(WebhookAuthError::InvalidSecret)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        assert_eq!(
            verify_shared_secret(Some("s3cret"), Some("other"), None),
            Err(WebhookAuthError::InvalidSecret)
        );
    }

    #[test]
    fn missing_secret_is_rejected() {
        assert_eq!(
            verify_shared_secret(Some("s3cret"), None, None),
            Err(WebhookAuthError::MissingSecret)
        );
    }

    #[test]
    fn unconfigured_integration_rejects_everything() {
        assert_eq!(
            verify_shared_secret(None, Some("anything"), None),
            Err(WebhookAuthError::NotConfigured)
        );
        assert_eq!(
            verify_shared_secret(Some(""), Some(""), None),
            Err(WebhookAuthError::NotConfigured)
        );
    }
}
