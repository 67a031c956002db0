//! Credential resolution.

use std::{
    collections::{HashMap, HashSet},
    sync::RwLock,
};

use calcbook_domain::{Credential, OwnerId};
use tracing::debug;

use crate::AuthError;

/// Resolves the identity behind a request credential.
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, credential: &Credential) -> Result<OwnerId, AuthError>;
}

/// Token table identity provider.
///
/// Tokens are granted up front (typically from configuration). Revoked
/// tokens stay remembered so they report [`AuthError::Revoked`] instead of
/// looking merely unknown.
#[derive(Debug, Default)]
pub struct TokenIdentityProvider {
    grants: RwLock<HashMap<String, OwnerId>>,
    revoked: RwLock<HashSet<String>>,
}

impl TokenIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grants<I, T>(grants: I) -> Self
    where
        I: IntoIterator<Item = (T, OwnerId)>,
        T: Into<String>,
    {
        let provider = Self::new();
        for (token, owner) in grants {
            provider.grant(token, owner);
        }
        provider
    }

    /// Marks tokens as revoked up front, e.g. revocations persisted by an
    /// earlier run. Grants for these tokens are dropped.
    pub fn with_revoked<I, T>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        {
            let mut grants = self
                .grants
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let mut revoked = self
                .revoked
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for token in tokens {
                let token = token.into().trim().to_string();
                grants.remove(&token);
                revoked.insert(token);
            }
        }
        self
    }

    /// Maps `token` to `owner`, clearing any earlier revocation of it.
    pub fn grant(&self, token: impl Into<String>, owner: OwnerId) {
        let token = token.into().trim().to_string();
        self.revoked
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&token);
        self.grants
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(token, owner);
    }

    /// Revokes a credential. Returns `false` when the token was never granted.
    pub fn revoke(&self, credential: &Credential) -> bool {
        let token = credential.token().trim();
        let removed = self
            .grants
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(token)
            .is_some();
        if removed {
            self.revoked
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .insert(token.to_string());
            debug!("credential revoked");
        }
        removed
    }
}

impl IdentityProvider for TokenIdentityProvider {
    fn resolve(&self, credential: &Credential) -> Result<OwnerId, AuthError> {
        let token = credential.token().trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        if self
            .revoked
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(token)
        {
            return Err(AuthError::Revoked);
        }
        self.grants
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(token)
            .copied()
            .ok_or(AuthError::InvalidToken)
    }
}

impl<P: IdentityProvider + ?Sized> IdentityProvider for std::sync::Arc<P> {
    fn resolve(&self, credential: &Credential) -> Result<OwnerId, AuthError> {
        (**self).resolve(credential)
    }
}
