//! Admin session: the stored bearer token, the admin user record, and the
//! access gate every order screen goes through.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::DeskError;

pub const ADMIN_ROLE: &str = "admin";

/// JWT claims the panel cares about. The signature is never checked here,
/// the API does that on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Claims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// Admin user as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub admin_token: Option<String>,
    #[serde(default)]
    pub admin_user: Option<AdminUser>,
}

/// Decode JWT claims without verifying the signature. Returns `None` for
/// opaque (non-JWT) tokens.
pub fn peek_claims(token: &str) -> Option<Claims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            debug!("Token is not a readable JWT: {e}");
            None
        }
    }
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<AdminUser>) -> Self {
        Self {
            admin_token: Some(token.into()),
            admin_user: user,
        }
    }

    /// Missing file means a signed-out session.
    pub fn load(path: &Path) -> Result<Self, DeskError> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DeskError> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        info!("Session stored in {}", path.display());
        Ok(())
    }

    /// Logout: drop both the token and the user record.
    pub fn clear(path: &Path) -> Result<(), DeskError> {
        match fs::remove_file(path) {
            Ok(()) => {
                info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn token(&self) -> Option<&str> {
        self.admin_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn claims(&self) -> Option<Claims> {
        self.token().and_then(peek_claims)
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(chrono::Utc::now().timestamp())
    }

    pub fn is_authenticated_at(&self, now: i64) -> bool {
        let Some(token) = self.token() else {
            return false;
        };
        match peek_claims(token) {
            Some(claims) if claims.is_expired_at(now) => {
                warn!("Stored admin token has expired");
                false
            }
            _ => true,
        }
    }

    /// Role from the stored user record, falling back to the token's claim.
    pub fn is_admin(&self) -> bool {
        match &self.admin_user {
            Some(user) => user.role == ADMIN_ROLE,
            None => self
                .claims()
                .and_then(|c| c.role)
                .is_some_and(|role| role == ADMIN_ROLE),
        }
    }

    /// Gate for read-only screens.
    pub fn require_authenticated(&self) -> Result<(), DeskError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(DeskError::NotAuthenticated)
        }
    }

    /// Gate for mutations; yields the bearer token to send.
    pub fn require_admin(&self) -> Result<&str, DeskError> {
        self.require_authenticated()?;
        if !self.is_admin() {
            warn!("Session user is not an admin");
            return Err(DeskError::Unauthorized);
        }
        self.token().ok_or(DeskError::NotAuthenticated)
    }
}
