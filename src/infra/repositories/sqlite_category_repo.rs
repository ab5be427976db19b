use crate::domain::{
    models::{category::{Category, CategoryFields}, tenant::TenantScope},
    ports::CategoryRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteCategoryRepo {
    pool: SqlitePool,
}

impl SqliteCategoryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepo {
    async fn create(&self, scope: TenantScope, fields: &CategoryFields) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (tenant_id, name, description, created_at) VALUES (?, ?, ?, ?) RETURNING *"
        )
            .bind(scope.id())
            .bind(fields.name.trim())
            .bind(&fields.description)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, scope: TenantScope, id: i64) -> Result<Option<Category>, AppError> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(scope.id())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, scope: TenantScope) -> Result<Vec<Category>, AppError> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE tenant_id = ? ORDER BY name ASC, id ASC"
        )
            .bind(scope.id())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, scope: TenantScope, id: i64, fields: &CategoryFields) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = ?, description = ? WHERE id = ? AND tenant_id = ? RETURNING *"
        )
            .bind(fields.name.trim())
            .bind(&fields.description)
            .bind(id)
            .bind(scope.id())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Category"))
    }

    async fn delete(&self, scope: TenantScope, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(scope.id())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category"));
        }
        Ok(())
    }
}
