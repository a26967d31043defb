use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    StorageUnavailable(String),
    PersistenceUnavailable(String),
    SerializationError(String),
    ListenerRegistration(String),
    InvalidStorageKey(String),
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {msg}"),
            BridgeError::PersistenceUnavailable(msg) => {
                write!(f, "Persistence unavailable: {msg}")
            }
            BridgeError::SerializationError(msg) => write!(f, "Serialization Error: {msg}"),
            BridgeError::ListenerRegistration(msg) => {
                write!(f, "Failed to register storage listener: {msg}")
            }
            BridgeError::InvalidStorageKey(msg) => write!(f, "Invalid storage key: {msg}"),
            BridgeError::InvalidTransition { from, action } => {
                write!(f, "Cannot {action} while bridge is {from}")
            }
        }
    }
}

impl std::error::Error for BridgeError {}

impl BridgeError {
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        BridgeError::StorageUnavailable(message.into())
    }

    pub fn persistence_unavailable(message: impl Into<String>) -> Self {
        BridgeError::PersistenceUnavailable(message.into())
    }

    pub fn serialization_error(message: impl Into<String>) -> Self {
        BridgeError::SerializationError(message.into())
    }

    pub fn listener_registration(message: impl Into<String>) -> Self {
        BridgeError::ListenerRegistration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BridgeError::persistence_unavailable("quota exceeded").to_string(),
            "Persistence unavailable: quota exceeded"
        );
        assert_eq!(
            BridgeError::InvalidTransition {
                from: "Active",
                action: "bootstrap",
            }
            .to_string(),
            "Cannot bootstrap while bridge is Active"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let error: Box<dyn std::error::Error> =
            Box::new(BridgeError::storage_unavailable("disabled"));
        assert!(error.to_string().contains("disabled"));
    }
}
