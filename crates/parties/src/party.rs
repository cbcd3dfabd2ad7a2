use serde::{Deserialize, Serialize};

use stockroom_core::{CustomerId, Draft, DomainError, DomainResult, Record, SupplierId};

const NAME_MAX: usize = 100;
const PHONE_MAX: usize = 20;

/// Contact information for a party.
///
/// Phone and email are unique server-side when present, so blank form fields
/// must travel as `null`, never as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ContactInfo {
    /// Trims every field and turns blanks into `None`.
    pub fn normalized(&self) -> Self {
        fn clean(v: &Option<String>) -> Option<String> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        }

        Self {
            phone: clean(&self.phone),
            email: clean(&self.email),
            address: clean(&self.address),
        }
    }

    fn validate(&self) -> DomainResult<()> {
        let contact = self.normalized();
        if let Some(phone) = &contact.phone {
            if phone.chars().count() > PHONE_MAX {
                return Err(DomainError::validation(format!(
                    "phone cannot exceed {PHONE_MAX} characters"
                )));
            }
        }
        if let Some(email) = &contact.email {
            let valid = email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if !valid {
                return Err(DomainError::validation(format!("invalid email: {email}")));
            }
        }
        Ok(())
    }
}

/// Form payload for creating or updating a customer or supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDraft {
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

impl PartyDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: ContactInfo::default(),
        }
    }

    pub fn with_contact(mut self, contact: ContactInfo) -> Self {
        self.contact = contact;
        self
    }
}

impl Draft for PartyDraft {
    fn validate(&self) -> DomainResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.chars().count() > NAME_MAX {
            return Err(DomainError::validation(format!(
                "name cannot exceed {NAME_MAX} characters"
            )));
        }
        self.contact.validate()
    }

    /// Trimmed name, blank contact fields dropped.
    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            contact: self.contact.normalized(),
        }
    }
}

/// Customer row as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

/// Supplier row as listed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

impl Record for Customer {
    type Id = CustomerId;
    type Draft = PartyDraft;

    const LABEL: &'static str = "customer";
    const PLURAL: &'static str = "customers";

    fn id(&self) -> CustomerId {
        self.id
    }

    fn to_draft(&self) -> PartyDraft {
        PartyDraft {
            name: self.name.clone(),
            contact: self.contact.clone(),
        }
    }
}

impl Record for Supplier {
    type Id = SupplierId;
    type Draft = PartyDraft;

    const LABEL: &'static str = "supplier";
    const PLURAL: &'static str = "suppliers";

    fn id(&self) -> SupplierId {
        self.id
    }

    fn to_draft(&self) -> PartyDraft {
        PartyDraft {
            name: self.name.clone(),
            contact: self.contact.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_decodes_api_row_with_null_contact_fields() {
        let row = json!({
            "id": 3,
            "name": "Acme Traders",
            "phone": null,
            "email": "ops@acme.test",
            "address": null,
        });

        let customer: Customer = serde_json::from_value(row).unwrap();
        assert_eq!(customer.id, CustomerId::new(3));
        assert_eq!(customer.contact.email.as_deref(), Some("ops@acme.test"));
        assert!(customer.contact.phone.is_none());
    }

    #[test]
    fn supplier_decodes_row_without_optional_fields() {
        let supplier: Supplier =
            serde_json::from_value(json!({ "id": 1, "name": "Northwind" })).unwrap();
        assert_eq!(supplier.contact, ContactInfo::default());
    }

    #[test]
    fn draft_payload_is_flat() {
        let draft = PartyDraft::new("Acme").with_contact(ContactInfo {
            phone: Some("555-0100".into()),
            email: None,
            address: Some("1 Main St".into()),
        });

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Acme",
                "phone": "555-0100",
                "email": null,
                "address": "1 Main St",
            })
        );
    }

    #[test]
    fn normalized_draft_drops_blank_contact_fields() {
        let draft = PartyDraft::new("  Acme ").with_contact(ContactInfo {
            phone: Some("   ".into()),
            email: Some("".into()),
            address: Some(" Dock 4 ".into()),
        });

        let clean = draft.normalized();
        assert_eq!(clean.name, "Acme");
        assert_eq!(clean.contact.phone, None);
        assert_eq!(clean.contact.email, None);
        assert_eq!(clean.contact.address.as_deref(), Some("Dock 4"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = PartyDraft::new("   ").validate().unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("name cannot be empty") => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        let draft = PartyDraft::new("Acme").with_contact(ContactInfo {
            email: Some("not-an-email".into()),
            ..ContactInfo::default()
        });
        assert!(draft.validate().is_err());
    }

    #[test]
    fn overlong_phone_is_rejected() {
        let draft = PartyDraft::new("Acme").with_contact(ContactInfo {
            phone: Some("0".repeat(PHONE_MAX + 1)),
            ..ContactInfo::default()
        });
        assert!(draft.validate().is_err());
    }

    #[test]
    fn to_draft_prefills_edit_form() {
        let customer = Customer {
            id: CustomerId::new(8),
            name: "Bob".into(),
            contact: ContactInfo {
                phone: Some("123".into()),
                ..ContactInfo::default()
            },
        };
        let draft = customer.to_draft();
        assert_eq!(draft.name, "Bob");
        assert_eq!(draft.contact.phone.as_deref(), Some("123"));
        assert!(draft.validate().is_ok());
    }
}
