//! Credential verification service
//!
//! Hashes and verifies passwords (SHA-256, Base64-encoded for storage) and
//! records the authenticated role in an explicit [`Session`] value.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sha2::{Digest, Sha256};

use crate::{
    config::BootstrapConfig,
    error::{AppError, AppResult},
    models::{Credential, Role, Session},
    repository::CredentialStore,
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    bootstrap: BootstrapConfig,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>, bootstrap: BootstrapConfig) -> Self {
        Self { store, bootstrap }
    }

    /// Hash a plaintext password: SHA-256 digest, Base64-encoded.
    ///
    /// Deterministic, so stored hashes can be compared by recomputation.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let digest = Sha256::digest(password.as_bytes());
        Ok(BASE64.encode(digest))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// The comparison is constant-time.
    pub fn verify_password(&self, plaintext: &str, stored_hash: &str) -> bool {
        match self.hash_password(plaintext) {
            Ok(computed) => constant_time_eq(computed.as_bytes(), stored_hash.as_bytes()),
            Err(_) => false,
        }
    }

    /// Authenticate a user and record the role in the session.
    ///
    /// Failure is uniform: an unknown username and a wrong password produce
    /// the same error, and the session keeps whatever role it had before.
    pub async fn authenticate(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> AppResult<Role> {
        let credential = self
            .store
            .get_by_username(username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.verify_password(password, &credential.password_hash) {
            return Err(invalid_credentials());
        }

        session.set_role(credential.role);
        Ok(credential.role)
    }

    /// Create a new credential.
    ///
    /// Returns `Conflict` when the username is already taken, both from the
    /// defensive pre-check and from the storage unique constraint.
    pub async fn create_credential(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> AppResult<Credential> {
        if username.trim().is_empty() {
            return Err(AppError::Validation(
                "Username must not be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(AppError::Validation(
                "Password must not be empty".to_string(),
            ));
        }
        if self.store.username_exists(username).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let credential = Credential {
            username: username.to_string(),
            password_hash: self.hash_password(password)?,
            role,
        };
        self.store.insert(&credential).await?;

        Ok(credential)
    }

    /// Clear the session role. Idempotent.
    pub fn logout(&self, session: &mut Session) {
        session.clear();
    }

    /// First-run admin seeding.
    ///
    /// When no credential exists for the configured admin username, one is
    /// created with the configured default password and role ADMIN. The
    /// password is returned exactly once so the caller can surface it to
    /// the operator; it must be rotated before real use.
    pub async fn ensure_bootstrap_admin(&self) -> AppResult<Option<String>> {
        if self
            .store
            .username_exists(&self.bootstrap.admin_username)
            .await?
        {
            return Ok(None);
        }

        self.create_credential(
            &self.bootstrap.admin_username,
            &self.bootstrap.admin_password,
            Role::Admin,
        )
        .await?;

        tracing::warn!(
            "Created bootstrap admin '{}' with the default password; rotate it after first login",
            self.bootstrap.admin_username
        );

        Ok(Some(self.bootstrap.admin_password.clone()))
    }
}

fn invalid_credentials() -> AppError {
    AppError::Authentication("Invalid username or password".to_string())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()), BootstrapConfig::default())
    }

    #[test]
    fn hash_is_deterministic() {
        let auth = service();
        assert_eq!(
            auth.hash_password("hunter2").unwrap(),
            auth.hash_password("hunter2").unwrap()
        );
    }

    #[test]
    fn distinct_passwords_hash_differently() {
        let auth = service();
        assert_ne!(
            auth.hash_password("hunter2").unwrap(),
            auth.hash_password("hunter3").unwrap()
        );
    }

    #[test]
    fn verify_accepts_matching_password() {
        let auth = service();
        let hash = auth.hash_password("hunter2").unwrap();
        assert!(auth.verify_password("hunter2", &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let auth = service();
        let hash = auth.hash_password("hunter2").unwrap();
        assert!(!auth.verify_password("hunter3", &hash));
    }

    #[test]
    fn constant_time_eq_handles_length_mismatch() {
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
    }

    #[tokio::test]
    async fn failed_login_keeps_previous_session_role() {
        let auth = service();
        auth.create_credential("reader", "secret", Role::User)
            .await
            .unwrap();

        let mut session = Session::new();
        auth.authenticate(&mut session, "reader", "secret")
            .await
            .unwrap();
        assert_eq!(session.role(), Some(Role::User));

        let err = auth
            .authenticate(&mut session, "reader", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
        assert_eq!(session.role(), Some(Role::User));
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_fail_alike() {
        let auth = service();
        auth.create_credential("reader", "secret", Role::User)
            .await
            .unwrap();

        let mut session = Session::new();
        let missing = auth
            .authenticate(&mut session, "ghost", "secret")
            .await
            .unwrap_err();
        let wrong = auth
            .authenticate(&mut session, "reader", "bad")
            .await
            .unwrap_err();

        assert_eq!(missing.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let auth = service();
        auth.create_credential("reader", "secret", Role::User)
            .await
            .unwrap();

        let err = auth
            .create_credential("reader", "other", Role::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let auth = service();
        auth.create_credential("reader", "secret", Role::User)
            .await
            .unwrap();

        let mut session = Session::new();
        auth.authenticate(&mut session, "reader", "secret")
            .await
            .unwrap();

        auth.logout(&mut session);
        assert!(!session.is_authenticated());
        auth.logout(&mut session);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn bootstrap_admin_is_seeded_once() {
        let auth = service();

        let first = auth.ensure_bootstrap_admin().await.unwrap();
        assert_eq!(first.as_deref(), Some("adminpassword"));

        let second = auth.ensure_bootstrap_admin().await.unwrap();
        assert!(second.is_none());

        let mut session = Session::new();
        let role = auth
            .authenticate(&mut session, "admin", "adminpassword")
            .await
            .unwrap();
        assert_eq!(role, Role::Admin);
    }
}
