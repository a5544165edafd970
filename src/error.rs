use crate::kv::KvError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Storage read failed: {0}")]
    StorageRead(#[source] KvError),

    #[error("Storage write failed: {0}")]
    StorageWrite(#[source] KvError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message() {
        assert_eq!(
            StoreError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }

    #[test]
    fn duplicate_username_message() {
        assert_eq!(
            StoreError::DuplicateUsername.to_string(),
            "Username already exists"
        );
    }

    #[test]
    fn write_error_carries_backend_message() {
        let err = StoreError::StorageWrite(KvError::Backend("disk full".into()));
        assert!(err.to_string().contains("Storage write failed"));
    }

    #[test]
    fn read_error_carries_backend_message() {
        let err = StoreError::StorageRead(KvError::Backend("io".into()));
        assert!(err.to_string().contains("Storage read failed"));
    }
}
