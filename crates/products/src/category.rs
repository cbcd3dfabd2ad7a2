use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, Draft, DomainError, DomainResult, Record};

const NAME_MAX: usize = 100;

/// Product category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Number of products filed under this category (server-computed).
    #[serde(default)]
    pub product_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Draft for CategoryDraft {
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
        Ok(())
    }

    fn normalized(&self) -> Self {
        Self::new(self.name.trim())
    }
}

impl Record for Category {
    type Id = CategoryId;
    type Draft = CategoryDraft;

    const LABEL: &'static str = "category";
    const PLURAL: &'static str = "categories";

    fn id(&self) -> CategoryId {
        self.id
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft::new(self.name.clone())
    }
}
