//! Email normalization and the single-domain registration rule.

use crate::domain::{DomainError, DomainResult};

/// Accepts only addresses on one configured domain.
#[derive(Debug, Clone)]
pub struct EmailDomainPolicy {
    domain: String,
}

impl EmailDomainPolicy {
    /// `domain` is a bare domain such as `gmail.com`.
    pub fn new(domain: impl AsRef<str>) -> Self {
        Self {
            domain: domain.as_ref().trim().to_ascii_lowercase(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Lower-cases the domain part and keeps the local part as sent.
    pub fn normalize(email: &str) -> String {
        let email = email.trim();
        match email.rsplit_once('@') {
            Some((local, domain)) => format!("{}@{}", local, domain.to_ascii_lowercase()),
            None => email.to_string(),
        }
    }

    /// `email` must already be normalized.
    pub fn check(&self, email: &str) -> DomainResult<()> {
        let accepted = email
            .rsplit_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain == self.domain);

        if accepted {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "Email must be @{}",
                self.domain
            )))
        }
    }
}

impl Default for EmailDomainPolicy {
    fn default() -> Self {
        Self::new("gmail.com")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_configured_domain() {
        let policy = EmailDomainPolicy::default();
        assert!(policy.check("a@gmail.com").is_ok());
    }

    #[test]
    fn rejects_other_domains() {
        let policy = EmailDomainPolicy::default();
        let err = policy.check("b@yahoo.com").unwrap_err();
        assert_eq!(err.to_string(), "Email must be @gmail.com");
    }

    #[test]
    fn rejects_lookalike_domains() {
        let policy = EmailDomainPolicy::default();
        assert!(policy.check("c@notgmail.com").is_err());
        assert!(policy.check("c@gmail.com.evil.io").is_err());
        assert!(policy.check("@gmail.com").is_err());
    }

    #[test]
    fn normalize_lowercases_only_the_domain() {
        assert_eq!(
            EmailDomainPolicy::normalize(" Alice.Smith@GMAIL.Com "),
            "Alice.Smith@gmail.com"
        );
        assert_eq!(EmailDomainPolicy::normalize("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn normalized_uppercase_domain_passes() {
        let policy = EmailDomainPolicy::new("Example.ORG");
        assert_eq!(policy.domain(), "example.org");
        let email = EmailDomainPolicy::normalize("bob@EXAMPLE.org");
        assert!(policy.check(&email).is_ok());
    }
}
