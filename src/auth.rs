use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::config::AuthConfiguration;

#[derive(serde::Serialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password is required")]
    MissingSecret,
    #[error("invalid password")]
    InvalidCredential,
}

/// Stateless shared-secret check. Every request re-authenticates; no
/// sessions or tokens are issued.
#[derive(Clone, Debug)]
pub struct AccessGate {
    user_secret: String,
    admin_secret: String,
}

impl AccessGate {
    pub fn new(cfg: &AuthConfiguration) -> Self {
        Self {
            user_secret: cfg.user_password.clone(),
            admin_secret: cfg.admin_password.clone(),
        }
    }

    pub fn authenticate(&self, secret: &str) -> Result<Role, AuthError> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        // both comparisons always run, the admin check never
        // short-circuits the user check
        let is_admin = secrets_match(secret, &self.admin_secret);
        let is_user = secrets_match(secret, &self.user_secret);
        if is_admin {
            Ok(Role::Admin)
        } else if is_user {
            Ok(Role::User)
        } else {
            Err(AuthError::InvalidCredential)
        }
    }
}

/// Constant-time comparison to prevent timing side-channel attacks.
fn secrets_match(submitted: &str, expected: &str) -> bool {
    submitted.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new(&AuthConfiguration {
            user_password: "user-secret".to_string(),
            admin_password: "admin-secret".to_string(),
        })
    }

    #[test]
    fn user_secret_grants_user_role() {
        assert_eq!(gate().authenticate("user-secret").unwrap(), Role::User);
    }

    #[test]
    fn admin_secret_grants_admin_role() {
        assert_eq!(gate().authenticate("admin-secret").unwrap(), Role::Admin);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(gate().authenticate("  user-secret \n").unwrap(), Role::User);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        assert!(matches!(
            gate().authenticate("wrong").unwrap_err(),
            AuthError::InvalidCredential
        ));
        // a prefix of a real secret is still wrong
        assert!(matches!(
            gate().authenticate("user-secre").unwrap_err(),
            AuthError::InvalidCredential
        ));
    }

    #[test]
    fn empty_secret_is_missing() {
        assert!(matches!(gate().authenticate("").unwrap_err(), AuthError::MissingSecret));
        assert!(matches!(gate().authenticate("   ").unwrap_err(), AuthError::MissingSecret));
    }
}
