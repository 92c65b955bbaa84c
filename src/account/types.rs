//! Account type definitions

use thiserror::Error;

/// One row of the account table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password_hash: String, // SHA-256, lowercase hex
}

impl Account {
    /// Render as a text-store line, newline included.
    pub fn to_line(&self) -> String {
        format!("{},{}\n", self.username, self.password_hash)
    }

    /// Parse one text-store line, ignoring surrounding whitespace. `line_no` is
    /// 1-based and only used for the error.
    pub fn from_line(line: &str, line_no: usize) -> Result<Self, AccountError> {
        let line = line.trim();
        let (username, password_hash) = line
            .split_once(',')
            .ok_or(AccountError::MalformedRecord { line: line_no })?;
        Ok(Account {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }
}

/// Usernames end up as the first field of a trimmed, comma-separated line.
pub fn validate_username(username: &str) -> Result<(), AccountError> {
    if username.trim() != username || username.is_empty() || username.contains([',', '\n', '\r']) {
        return Err(AccountError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("user '{0}' already exists, choose another username")]
    AlreadyExists(String),
    #[error("user '{0}' does not exist")]
    NotFound(String),
    #[error("incorrect username or password")]
    InvalidCredentials,
    #[error("invalid username '{0}': must be non-empty, without commas, line breaks or surrounding spaces")]
    InvalidUsername(String),
    #[error("malformed record on line {line} of the account file")]
    MalformedRecord { line: usize },
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON store error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AccountError {
    /// Validation failures are reported to the user; the rest are storage faults.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists(_) | Self::NotFound(_) | Self::InvalidCredentials | Self::InvalidUsername(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let account = Account {
            username: "ana".to_string(),
            password_hash: "ab12".to_string(),
        };
        assert_eq!(account.to_line(), "ana,ab12\n");
        assert_eq!(Account::from_line("ana,ab12\n", 1).unwrap(), account);
        assert_eq!(Account::from_line("ana,ab12\r\n", 1).unwrap(), account);
        // Hand-edited lines may carry stray spaces at either end
        assert_eq!(Account::from_line("  ana,ab12 \n", 1).unwrap(), account);
    }

    #[test]
    fn test_malformed_line() {
        assert!(matches!(
            Account::from_line("no-separator\n", 4),
            Err(AccountError::MalformedRecord { line: 4 })
        ));
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("ana").is_ok());
        assert!(validate_username("ana maria").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("a,b").is_err());
        assert!(validate_username("a\nb").is_err());
        assert!(validate_username(" ana").is_err());
        assert!(validate_username("ana ").is_err());
    }
}
