use std::fmt::{Debug, Formatter};

use crate::utils::Redact;

/// Credential that holds the access key pair a signature is derived from.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id, sent in clear inside the `Authorization` header.
    pub access_key_id: String,
    /// Access key secret, never sent on the wire.
    pub access_key_secret: String,
}

impl Credential {
    /// Create a credential from an access key pair.
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }

    /// Check whether both halves of the key pair are present.
    pub fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.access_key_secret.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("ak", "sk").is_valid());
        assert!(!Credential::new("", "sk").is_valid());
        assert!(!Credential::new("ak", "").is_valid());
        assert!(!Credential::default().is_valid());
    }

    #[test]
    fn test_debug_is_redacted() {
        let cred = Credential::new("averylongaccesskeyid", "averylongaccesssecret");
        let repr = format!("{cred:?}");
        assert!(!repr.contains("averylongaccesskeyid"));
        assert!(!repr.contains("averylongaccesssecret"));
        assert!(repr.contains("ave***yid"));
    }
}
