use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use regex::Regex;

use crate::error::{ResourceKind, ServiceError};
use crate::models::*;

use super::repository::{lock, Repository};

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 100;
const EMAIL_EXISTS_ERROR: &str = "Email already exists";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("valid phone pattern"));

/// Owns the customer records, keyed by email.
#[derive(Clone, Default)]
pub struct CustomerDirectory {
    customers: Arc<Mutex<Repository<Customer>>>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Repository<Customer>> {
        lock(&self.customers)
    }

    pub fn create(&self, input: CustomerInput) -> Result<Customer, ValidationErrors> {
        tracing::info!(email = input.email.as_value().map(String::as_str), "Creating customer");
        let mut customers = self.lock();

        let draft = CustomerDraft {
            email: input.email.into_option(),
            name: input.name.into_option(),
            phone: input.phone.into_option(),
        };
        let customer = validate(&draft, &customers, None)
            .inspect_err(|errors| tracing::warn!(%errors, "Customer validation failed"))?;

        customers.insert(customer.email.clone(), customer.clone());

        tracing::info!(email = %customer.email, "Customer created");
        Ok(customer)
    }

    pub fn list(&self) -> Vec<Customer> {
        let customers = self.lock().values();
        tracing::debug!(count = customers.len(), "Listed customers");
        customers
    }

    pub fn get_by_email(&self, email: &str) -> Option<Customer> {
        let customer = self.lock().get(email).cloned();
        if customer.is_none() {
            tracing::warn!(email, "Customer not found");
        }
        customer
    }

    /// Merge `input` over the stored customer.
    ///
    /// A changed email re-keys the record: the old key is removed and the
    /// new one must not belong to another customer.
    pub fn update(&self, email: &str, input: CustomerInput) -> Result<Customer, ServiceError> {
        tracing::info!(email, "Updating customer");
        let mut customers = self.lock();

        let Some(existing) = customers.get(email).cloned() else {
            tracing::warn!(email, "Customer not found for update");
            return Err(ServiceError::NotFound(ResourceKind::Customer));
        };

        let draft = CustomerDraft {
            email: input.email.merge(existing.email),
            name: input.name.merge(existing.name),
            phone: input.phone.merge(existing.phone),
        };
        let customer = validate(&draft, &customers, Some(email)).inspect_err(|errors| {
            tracing::warn!(email, %errors, "Customer validation failed on update")
        })?;

        if customer.email == email {
            customers.insert(customer.email.clone(), customer.clone());
        } else {
            customers.rekey(email, customer.email.clone(), customer.clone());
            tracing::info!(from = email, to = %customer.email, "Customer re-keyed");
        }

        tracing::info!(email = %customer.email, "Customer updated");
        Ok(customer)
    }

    pub fn delete(&self, email: &str) -> bool {
        let deleted = self.lock().remove(email).is_some();
        if deleted {
            tracing::info!(email, "Customer deleted");
        } else {
            tracing::warn!(email, "Customer not found for deletion");
        }
        deleted
    }
}

struct CustomerDraft {
    email: Option<String>,
    name: Option<String>,
    phone: Option<String>,
}

/// Validate a draft. `current_email` is the key of the record being updated,
/// which may keep its own email without colliding with itself.
fn validate(
    draft: &CustomerDraft,
    customers: &Repository<Customer>,
    current_email: Option<&str>,
) -> Result<Customer, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let email = match draft.email.as_deref() {
        None => None,
        Some(raw) => non_blank(raw).map(|trimmed| (raw, trimmed)),
    };
    let email = match email {
        None => {
            errors.push("email", "Email is required");
            None
        }
        Some((raw, trimmed)) if !EMAIL_RE.is_match(trimmed) || raw.contains("@@") => {
            errors.push("email", "Invalid email format");
            None
        }
        Some((_, trimmed)) if current_email != Some(trimmed) && customers.contains(trimmed) => {
            errors.push("email", EMAIL_EXISTS_ERROR);
            None
        }
        Some((_, trimmed)) => Some(trimmed.to_string()),
    };

    let name = match draft.name.as_deref().and_then(non_blank) {
        None => {
            errors.push("name", "Name is required");
            None
        }
        Some(n) if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&n.chars().count()) => {
            Some(n.to_string())
        }
        Some(_) => {
            errors.push(
                "name",
                format!(
                    "Name must be between {} and {} characters",
                    MIN_NAME_LENGTH, MAX_NAME_LENGTH
                ),
            );
            None
        }
    };

    let phone = match draft.phone.as_deref().and_then(non_blank) {
        None => {
            errors.push("phone", "Phone is required");
            None
        }
        Some(p) if PHONE_RE.is_match(p) => Some(p.to_string()),
        Some(_) => {
            errors.push("phone", "Invalid phone format");
            None
        }
    };

    match (email, name, phone) {
        (Some(email), Some(name), Some(phone)) => Ok(Customer { email, name, phone }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(email: &str, name: &str, phone: &str) -> CustomerDraft {
        CustomerDraft {
            email: Some(email.to_string()),
            name: Some(name.to_string()),
            phone: Some(phone.to_string()),
        }
    }

    fn existing(emails: &[&str]) -> Repository<Customer> {
        let mut repo = Repository::new();
        for email in emails {
            repo.insert(
                email.to_string(),
                Customer {
                    email: email.to_string(),
                    name: "Existing".to_string(),
                    phone: "555-0100".to_string(),
                },
            );
        }
        repo
    }

    fn first_message(result: Result<Customer, ValidationErrors>) -> String {
        result.err().unwrap().errors()[0].message.clone()
    }

    #[test]
    fn trims_every_stored_field() {
        let customer = validate(
            &draft(" ada@example.com ", "  Ada Lovelace ", " +44 (20) 7946-0958 "),
            &existing(&[]),
            None,
        )
        .unwrap();
        assert_eq!(customer.email, "ada@example.com");
        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(customer.phone, "+44 (20) 7946-0958");
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["plain", "a@b", "a@@example.com", "a@example.c", "@example.com"] {
            let result = validate(&draft(bad, "Ada", "555"), &existing(&[]), None);
            assert_eq!(first_message(result), "Invalid email format", "{}", bad);
        }
    }

    #[test]
    fn duplicate_email_on_create_already_exists() {
        let result = validate(
            &draft("ada@example.com", "Ada", "555"),
            &existing(&["ada@example.com"]),
            None,
        );
        assert_eq!(first_message(result), EMAIL_EXISTS_ERROR);
    }

    #[test]
    fn unchanged_email_on_update_is_not_a_collision() {
        let result = validate(
            &draft("ada@example.com", "Ada", "555"),
            &existing(&["ada@example.com"]),
            Some("ada@example.com"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn emails_are_case_sensitive_keys() {
        let result = validate(
            &draft("Ada@example.com", "Ada", "555"),
            &existing(&["ada@example.com"]),
            None,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn name_length_is_bounded() {
        let result = validate(&draft("a@example.com", " A ", "555"), &existing(&[]), None);
        assert_eq!(
            first_message(result),
            "Name must be between 2 and 100 characters"
        );

        let long = "x".repeat(101);
        assert!(validate(&draft("a@example.com", &long, "555"), &existing(&[]), None).is_err());
        let max = "x".repeat(100);
        assert!(validate(&draft("a@example.com", &max, "555"), &existing(&[]), None).is_ok());
    }

    #[test]
    fn phone_must_look_like_a_number() {
        let result = validate(&draft("a@example.com", "Ada", "call me"), &existing(&[]), None);
        assert_eq!(first_message(result), "Invalid phone format");

        for non_ascii in ["٠١٢٣٤٥٦", "１２３４"] {
            let result = validate(&draft("a@example.com", "Ada", non_ascii), &existing(&[]), None);
            assert_eq!(first_message(result), "Invalid phone format", "{}", non_ascii);
        }
    }

    #[test]
    fn blank_fields_are_required() {
        let errors = validate(&draft("  ", " ", ""), &existing(&[]), None)
            .err()
            .unwrap();
        let messages: Vec<_> = errors.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Email is required", "Name is required", "Phone is required"]
        );
    }
}
