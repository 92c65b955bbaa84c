//! File backends for the account table.
//!
//! `TextStore` keeps one `username,hash` line per account. `JsonStore` keeps a
//! single JSON object mapping usernames to hashes. Both treat a missing file
//! as an empty table and rewrite the whole file on every change.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{Account, AccountError};

/// One persisted representation of the account table.
pub trait CredentialStore {
    /// All records, in file order.
    fn accounts(&self) -> Result<Vec<Account>, AccountError>;

    /// Add a record for a username that is not stored yet.
    fn insert(&self, account: &Account) -> Result<(), AccountError>;

    /// Replace the hash of an existing record. Returns false if none matched.
    fn update(&self, account: &Account) -> Result<bool, AccountError>;

    /// Drop a record. Returns false if none matched.
    fn remove(&self, username: &str) -> Result<bool, AccountError>;

    fn lookup(&self, username: &str) -> Result<Option<String>, AccountError> {
        Ok(self
            .accounts()?
            .into_iter()
            .find(|a| a.username == username)
            .map(|a| a.password_hash))
    }

    fn contains(&self, username: &str) -> Result<bool, AccountError> {
        Ok(self.lookup(username)?.is_some())
    }
}

fn read_or_empty(path: &Path) -> Result<String, AccountError> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(s),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// Line-oriented `username,hash` file.
#[derive(Debug, Clone)]
pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the file line by line. `edit` gets each parsed record and returns
    /// `None` to keep the original bytes, `Some(replacement)` otherwise (an
    /// empty replacement drops the line). Returns whether any line was edited.
    fn rewrite<F>(&self, mut edit: F) -> Result<bool, AccountError>
    where
        F: FnMut(&Account) -> Option<String>,
    {
        let raw = read_or_empty(&self.path)?;
        let mut out = String::with_capacity(raw.len());
        let mut changed = false;

        for (idx, line) in raw.split_inclusive('\n').enumerate() {
            if line.trim().is_empty() {
                out.push_str(line);
                continue;
            }
            let account = Account::from_line(line, idx + 1)?;
            match edit(&account) {
                Some(replacement) => {
                    out.push_str(&replacement);
                    changed = true;
                }
                None => out.push_str(line),
            }
        }

        if changed {
            fs::write(&self.path, out)?;
            debug!(path = %self.path.display(), "text store rewritten");
        }
        Ok(changed)
    }
}

impl CredentialStore for TextStore {
    fn accounts(&self) -> Result<Vec<Account>, AccountError> {
        let raw = read_or_empty(&self.path)?;
        raw.split_inclusive('\n')
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| Account::from_line(line, idx + 1))
            .collect()
    }

    fn insert(&self, account: &Account) -> Result<(), AccountError> {
        let needs_newline = match fs::read(&self.path) {
            Ok(bytes) => bytes.last().is_some_and(|b| *b != b'\n'),
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if needs_newline {
            file.write_all(b"\n")?;
        }
        file.write_all(account.to_line().as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn update(&self, account: &Account) -> Result<bool, AccountError> {
        self.rewrite(|existing| {
            (existing.username == account.username).then(|| account.to_line())
        })
    }

    fn remove(&self, username: &str) -> Result<bool, AccountError> {
        self.rewrite(|existing| (existing.username == username).then(String::new))
    }
}

/// JSON object `{ "username": "hash", ... }`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<BTreeMap<String, String>, AccountError> {
        let raw = read_or_empty(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, accounts: &BTreeMap<String, String>) -> Result<(), AccountError> {
        let json = serde_json::to_string(accounts)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), records = accounts.len(), "json store rewritten");
        Ok(())
    }

    /// Insert or replace, always rewriting the file.
    pub fn upsert(&self, account: &Account) -> Result<(), AccountError> {
        let mut accounts = self.load()?;
        accounts.insert(account.username.clone(), account.password_hash.clone());
        self.save(&accounts)
    }
}

impl CredentialStore for JsonStore {
    fn accounts(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self
            .load()?
            .into_iter()
            .map(|(username, password_hash)| Account { username, password_hash })
            .collect())
    }

    fn lookup(&self, username: &str) -> Result<Option<String>, AccountError> {
        Ok(self.load()?.remove(username))
    }

    fn insert(&self, account: &Account) -> Result<(), AccountError> {
        self.upsert(account)
    }

    fn update(&self, account: &Account) -> Result<bool, AccountError> {
        let mut accounts = self.load()?;
        match accounts.get_mut(&account.username) {
            Some(hash) => {
                hash.clone_from(&account.password_hash);
                self.save(&accounts)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, username: &str) -> Result<bool, AccountError> {
        let mut accounts = self.load()?;
        if accounts.remove(username).is_none() {
            return Ok(false);
        }
        self.save(&accounts)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn account(name: &str, hash: &str) -> Account {
        Account {
            username: name.to_string(),
            password_hash: hash.to_string(),
        }
    }

    #[test]
    fn test_text_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = TextStore::new(tmp.path().join("users.txt"));
        assert!(store.accounts().unwrap().is_empty());
        assert!(!store.contains("ana").unwrap());
    }

    #[test]
    fn test_text_update_keeps_other_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.txt");
        fs::write(&path, "ana,aaa\n\nluis,bbb\nsofia,ccc\n").unwrap();
        let store = TextStore::new(&path);

        assert!(store.update(&account("luis", "zzz")).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "ana,aaa\n\nluis,zzz\nsofia,ccc\n");

        assert!(!store.update(&account("nadie", "zzz")).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "ana,aaa\n\nluis,zzz\nsofia,ccc\n");
    }

    #[test]
    fn test_text_remove() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.txt");
        fs::write(&path, "ana,aaa\nluis,bbb\n").unwrap();
        let store = TextStore::new(&path);

        assert!(store.remove("ana").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "luis,bbb\n");
        assert!(!store.remove("ana").unwrap());
    }

    #[test]
    fn test_text_insert_after_unterminated_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.txt");
        fs::write(&path, "ana,aaa").unwrap();
        let store = TextStore::new(&path);

        store.insert(&account("luis", "bbb")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ana,aaa\nluis,bbb\n");
    }

    #[test]
    fn test_text_malformed_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.txt");
        fs::write(&path, "ana,aaa\nbroken\n").unwrap();
        let store = TextStore::new(&path);

        assert!(matches!(
            store.accounts(),
            Err(AccountError::MalformedRecord { line: 2 })
        ));
    }

    #[test]
    fn test_json_round_trip_and_remove() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.json");
        let store = JsonStore::new(&path);

        store.insert(&account("ana", "aaa")).unwrap();
        store.insert(&account("luis", "bbb")).unwrap();
        assert_eq!(store.lookup("luis").unwrap().as_deref(), Some("bbb"));

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "ana": "aaa", "luis": "bbb" }));

        assert!(store.remove("ana").unwrap());
        assert!(!store.remove("ana").unwrap());
        assert!(!store.contains("ana").unwrap());
    }

    #[test]
    fn test_json_update_only_existing() {
        let tmp = TempDir::new().unwrap();
        let store = JsonStore::new(tmp.path().join("users.json"));

        assert!(!store.update(&account("ana", "aaa")).unwrap());
        assert!(store.accounts().unwrap().is_empty());

        store.insert(&account("ana", "aaa")).unwrap();
        assert!(store.update(&account("ana", "bbb")).unwrap());
        assert_eq!(store.lookup("ana").unwrap().as_deref(), Some("bbb"));
    }

    #[test]
    fn test_json_reads_spaced_layout() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.json");
        fs::write(&path, r#"{"ana": "aaa", "luis": "bbb"}"#).unwrap();

        let store = JsonStore::new(&path);
        assert_eq!(store.accounts().unwrap().len(), 2);
    }
}
