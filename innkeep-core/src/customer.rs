use serde::{Deserialize, Serialize};

use crate::ValidationError;
use innkeep_shared::messages::CustomerEvent;

/// A persisted customer row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Customer {
    /// Snapshot published to the customer queue once the row exists.
    pub fn as_event(&self) -> CustomerEvent {
        CustomerEvent {
            customer_id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Validated insert payload, produced by [`CreateCustomerRequest::validate`].
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}

/// Incoming create payload.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreateCustomerRequest {
    /// Checks both required fields are present and non-blank.
    pub fn validate(self) -> Result<NewCustomer, ValidationError> {
        match (self.name, self.email) {
            (Some(name), Some(email))
                if !name.trim().is_empty() && !email.trim().is_empty() =>
            {
                Ok(NewCustomer { name, email })
            }
            _ => Err(ValidationError("name and email are required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_passes() {
        let req = CreateCustomerRequest {
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
        };

        let customer = req.validate().unwrap();
        assert_eq!(customer.name, "Alice");
        assert_eq!(customer.email, "alice@example.com");
    }

    #[test]
    fn test_missing_email_rejected() {
        let req = CreateCustomerRequest {
            name: Some("Alice".to_string()),
            email: None,
        };

        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "name and email are required");
    }

    #[test]
    fn test_blank_name_rejected() {
        let req = CreateCustomerRequest {
            name: Some("".to_string()),
            email: Some("alice@example.com".to_string()),
        };

        assert!(req.validate().is_err());
    }
}
