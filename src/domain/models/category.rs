use serde::Serialize;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::AppError;

pub const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Serialize, FromRow, Clone)]
pub struct Category {
    pub id: i64,
    #[serde(skip_serializing)]
    pub tenant_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// Writable fields of a category. The owning tenant is supplied separately by the caller.
#[derive(Debug, Clone)]
pub struct CategoryFields {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryFields {
    pub fn validate(&self) -> Result<(), AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("nome: this field may not be blank".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "nome: ensure this field has no more than {} characters", MAX_NAME_LEN
            )));
        }
        Ok(())
    }
}

impl From<&Category> for CategoryFields {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }
}
