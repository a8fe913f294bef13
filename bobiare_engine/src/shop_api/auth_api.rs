//! # Customer authentication
//!
//! An [`AuthSession`] holds the identity of one browser session: the email of the logged-in customer, or nothing.
//! [`AuthApi`] checks credentials through an [`Authenticator`] and updates the session.
//!
//! Two authenticators exist:
//! * [`SimulatedAuthenticator`] waits a moment and then accepts anything. It is a stand-in until real logins are
//!   switched on, and it says so in the logs.
//! * [`BackendAuthenticator`] checks the password against the hash the backend stored at sign-up.
//!
//! There are no tokens and no expiry. A session stays logged in until it logs out or the server restarts.
use std::{fmt::Debug, time::Duration};

use bobiare_common::Secret;
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    shop_api::errors::AuthApiError,
    traits::{AccountError, AccountManagement, NewUserAccount},
};

pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

//--------------------------------------      AuthSession      ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    user: Option<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn set_user<S: Into<String>>(&mut self, email: S) {
        self.user = Some(email.into());
    }

    pub fn logout(&mut self) {
        self.user = None;
    }
}

//--------------------------------------     Authenticator     ---------------------------------------------------------
/// Checks a set of credentials and returns the email the session should be logged in as.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    async fn authenticate(&self, email: &str, password: &Secret<String>) -> Result<String, AuthApiError>;
}

/// Accepts every login after a fixed delay. This is a stub: no credential is checked.
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl Default for SimulatedAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_DELAY)
    }
}

impl SimulatedAuthenticator {
    pub fn new(delay: Duration) -> Self {
        warn!("🔐️ Simulated logins are enabled. Any email and password will be accepted.");
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Authenticator for SimulatedAuthenticator {
    async fn authenticate(&self, email: &str, _password: &Secret<String>) -> Result<String, AuthApiError> {
        warn!("🔐️ Simulating login for {email}. Credentials are NOT checked.");
        tokio::time::sleep(self.delay).await;
        Ok(email.trim().to_string())
    }
}

pub struct BackendAuthenticator<'a, B> {
    db: &'a B,
}

impl<'a, B> BackendAuthenticator<'a, B> {
    pub fn new(db: &'a B) -> Self {
        Self { db }
    }
}

impl<'a, B> Authenticator for BackendAuthenticator<'a, B>
where B: AccountManagement
{
    async fn authenticate(&self, email: &str, password: &Secret<String>) -> Result<String, AuthApiError> {
        match self.db.verify_credentials(email, password).await {
            Ok(account) => Ok(account.email),
            Err(AccountError::InvalidCredentials) => {
                debug!("🔐️ Login rejected for {email}");
                Err(AuthApiError::LoginFailed)
            },
            Err(e) => {
                error!("🔐️ Could not check the credentials of {email}. {e}");
                Err(AuthApiError::LoginFailed)
            },
        }
    }
}

//--------------------------------------       LoginMode       ---------------------------------------------------------
#[derive(Debug, Clone)]
pub enum LoginMode {
    Simulated(SimulatedAuthenticator),
    Backend,
}

//--------------------------------------        AuthApi        ---------------------------------------------------------
pub struct AuthApi<B> {
    db: B,
    mode: LoginMode,
}

impl<B> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.mode)
    }
}

impl<B> AuthApi<B> {
    pub fn new(db: B, mode: LoginMode) -> Self {
        Self { db, mode }
    }

    pub fn mode(&self) -> &LoginMode {
        &self.mode
    }

    pub fn logout(&self, session: &mut AuthSession) {
        if let Some(user) = session.user() {
            debug!("🔐️ {user} logged out");
        }
        session.logout();
    }
}

impl<B> AuthApi<B>
where B: AccountManagement
{
    /// Checks the credentials with the configured authenticator, without touching any session. Servers that keep
    /// sessions behind a lock call this first and then record the result with [`AuthSession::set_user`].
    pub async fn authenticate(&self, email: &str, password: &Secret<String>) -> Result<String, AuthApiError> {
        match &self.mode {
            LoginMode::Simulated(auth) => auth.authenticate(email, password).await,
            LoginMode::Backend => BackendAuthenticator::new(&self.db).authenticate(email, password).await,
        }
    }

    pub async fn login(
        &self,
        session: &mut AuthSession,
        email: &str,
        password: &Secret<String>,
    ) -> Result<(), AuthApiError> {
        let user = self.authenticate(email, password).await?;
        info!("🔐️ {user} logged in");
        session.set_user(user);
        Ok(())
    }

    /// Creates an account, then logs in with the same credentials. Any failure along the way is reported as
    /// [`AuthApiError::SignUpFailed`]. Returns the email to record in the session.
    pub async fn sign_up(&self, email: &str, password: &Secret<String>) -> Result<String, AuthApiError> {
        let account = NewUserAccount::new(email, password.clone());
        let created = self.db.create_account(account).await.map_err(|e| {
            warn!("🔐️ Sign-up failed for {email}. {e}");
            AuthApiError::SignUpFailed(e.to_string())
        })?;
        info!("🔐️ Account #{} created for {}", created.id, created.email);
        self.authenticate(&created.email, password).await.map_err(|e| {
            warn!("🔐️ Account {} was created, but logging in failed. {e}", created.email);
            AuthApiError::SignUpFailed(e.to_string())
        })
    }

    /// Creates the admin account if it does not exist yet. An existing account with that email is left alone.
    pub async fn ensure_admin_account(&self, email: &str, password: &Secret<String>) -> Result<(), AuthApiError> {
        match self.db.create_account(NewUserAccount::admin(email, password.clone())).await {
            Ok(account) => {
                info!("🔐️ Admin account {} created", account.email);
                Ok(())
            },
            Err(AccountError::AccountExists(email)) => {
                debug!("🔐️ Admin account {email} already exists");
                Ok(())
            },
            Err(e) => Err(AuthApiError::AdminSetupFailed(e.to_string())),
        }
    }
}
