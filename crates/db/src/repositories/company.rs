//! Company repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use africanut_core::ledger::Company;

use crate::entities::companies;

/// Fields for a new company.
#[derive(Debug, Clone)]
pub struct CreateCompanyInput {
    /// Unique URL-safe handle.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Business sector.
    pub sector: Option<String>,
    /// Short description.
    pub tagline: Option<String>,
}

/// Company repository.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a company by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<companies::Model>, DbErr> {
        companies::Entity::find()
            .filter(companies::Column::Slug.eq(slug))
            .one(&self.db)
            .await
    }

    /// Lists all companies by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<companies::Model>, DbErr> {
        companies::Entity::find()
            .order_by_asc(companies::Column::Name)
            .all(&self.db)
            .await
    }

    /// Number of companies.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        companies::Entity::find().count(&self.db).await
    }

    /// Creates a company.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, e.g. on a duplicate slug.
    pub async fn create(&self, input: CreateCompanyInput) -> Result<companies::Model, DbErr> {
        let now = chrono::Utc::now().into();
        companies::ActiveModel {
            id: Set(Uuid::now_v7()),
            slug: Set(input.slug),
            name: Set(input.name),
            sector: Set(input.sector),
            tagline: Set(input.tagline),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }
}

impl From<companies::Model> for Company {
    fn from(model: companies::Model) -> Self {
        Self {
            id: model.id.into(),
            slug: model.slug,
            name: model.name,
            sector: model.sector,
            tagline: model.tagline,
        }
    }
}
