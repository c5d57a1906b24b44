use serde::{Deserialize, Serialize};

use super::field::Field;

/// A contact record. The email is the primary key.
///
/// Emails are compared as literal strings after trimming, so
/// `a@example.com` and `A@example.com` are different customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub email: String,
    pub name: String,
    pub phone: String,
}

/// Request body for creating or updating a customer.
///
/// Supplying a different `email` on update re-keys the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInput {
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub email: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub phone: Field<String>,
}

impl CustomerInput {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            email: Field::Value(email.into()),
            name: Field::Value(name.into()),
            phone: Field::Value(phone.into()),
        }
    }
}
