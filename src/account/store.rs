//! Account storage and management

use tracing::{info, warn};

use super::auth::{hash_password, verify_password};
use super::backend::{CredentialStore, JsonStore, TextStore};
use super::session::Session;
use super::types::{validate_username, Account, AccountError};
use crate::config::StoreConfig;

/// Account table persisted to a text file and a JSON mirror.
///
/// The text file is authoritative for credentials: `authenticate` reads only
/// it. Every mutation writes the text file first and the JSON file second.
#[derive(Debug, Clone)]
pub struct AccountStore {
    text: TextStore,
    json: JsonStore,
}

impl AccountStore {
    pub fn new(text: TextStore, json: JsonStore) -> Self {
        Self { text, json }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            TextStore::new(&config.text_path),
            JsonStore::new(&config.json_path),
        )
    }

    pub fn text_store(&self) -> &TextStore {
        &self.text
    }

    pub fn json_store(&self) -> &JsonStore {
        &self.json
    }

    /// True if either file knows the username.
    pub fn exists(&self, username: &str) -> Result<bool, AccountError> {
        Ok(self.text.contains(username)? || self.json.contains(username)?)
    }

    /// Create a new account
    pub fn register(&self, username: &str, password: &str) -> Result<Account, AccountError> {
        validate_username(username)?;
        if self.exists(username)? {
            return Err(AccountError::AlreadyExists(username.to_string()));
        }

        let account = Account {
            username: username.to_string(),
            password_hash: hash_password(password),
        };
        self.text.insert(&account)?;
        self.json.insert(&account)?;

        info!(user = %username, "account registered");
        Ok(account)
    }

    /// Check credentials against the text file and start a session on success
    pub fn authenticate(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), AccountError> {
        let matched = self
            .text
            .accounts()?
            .iter()
            .any(|a| a.username == username && verify_password(password, &a.password_hash));

        if !matched {
            warn!(user = %username, "failed login");
            return Err(AccountError::InvalidCredentials);
        }

        session.login(username);
        info!(user = %username, "logged in");
        Ok(())
    }

    /// End the session. `None` means nobody was logged in.
    pub fn logout(&self, session: &mut Session) -> Option<String> {
        let user = session.logout();
        if let Some(name) = &user {
            info!(user = %name, "logged out");
        }
        user
    }

    /// Replace the password hash of an existing account
    pub fn edit_password(&self, username: &str, new_password: &str) -> Result<(), AccountError> {
        if !self.exists(username)? {
            return Err(AccountError::NotFound(username.to_string()));
        }

        let account = Account {
            username: username.to_string(),
            password_hash: hash_password(new_password),
        };
        if !self.text.update(&account)? {
            warn!(user = %username, "account missing from text store, only the JSON store was updated");
        }
        // JSON mirror is upserted, not just updated
        self.json.insert(&account)?;

        info!(user = %username, "password changed");
        Ok(())
    }

    /// Remove an account. Logs the session out if it belonged to `username`.
    pub fn delete_account(&self, session: &mut Session, username: &str) -> Result<(), AccountError> {
        if !self.exists(username)? {
            return Err(AccountError::NotFound(username.to_string()));
        }

        self.text.remove(username)?;
        self.json.remove(username)?;

        if session.is_user(username) {
            session.logout();
            info!(user = %username, "deleted account was logged in, session closed");
        }
        info!(user = %username, "account deleted");
        Ok(())
    }
}
