//! Field-level rules shared by the write payloads. The derive-based rules
//! live on the request types next to their handlers; this module holds the
//! custom checks.

use validator::ValidationError;

/// Basic `local@domain.tld` shape. Intentionally loose; this is not an
/// RFC 5322 validator.
pub fn email_shape(value: &str) -> Result<(), ValidationError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        let mut error = ValidationError::new("email");
        error.message = Some("must be a valid email address".into());
        Err(error)
    }
}

/// Listing limit is applied only when positive; zero or negative values
/// leave the result unbounded, matching a store-level `limit(0)` no-op.
pub fn effective_limit(limit: Option<i64>) -> Option<i64> {
    limit.filter(|n| *n > 0)
}
