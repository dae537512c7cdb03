//! Cost center repository for database operations.
//!
//! Rows hold a parent pointer only; tree assembly and all traversals are
//! delegated to `hesab_core::costcenter` over the loaded node set. Re-parent
//! validation runs inside the mutating transaction against a fresh snapshot
//! of the hierarchy.

use hesab_core::costcenter::{self, CostCenter, CostCenterTreeNode, HierarchyError};
use hesab_shared::error::AppError;
use hesab_shared::types::{CostCenterId, PageRequest, PageResponse, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::cost_centers;

/// Error types for cost center operations.
#[derive(Debug, thiserror::Error)]
pub enum CostCenterError {
    /// Hierarchy rule violated (self-parent, cycle, corrupt data).
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    /// A cost center with this code already exists.
    #[error("Cost center code already exists: {0}")]
    DuplicateCode(String),

    /// Cost center not found.
    #[error("Cost center not found: {0}")]
    NotFound(CostCenterId),

    /// Proposed parent not found.
    #[error("Parent cost center not found: {0}")]
    ParentNotFound(CostCenterId),

    /// Cost center still has children and cannot be deleted.
    #[error("Cost center {0} has children and cannot be deleted")]
    HasChildren(CostCenterId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CostCenterError> for AppError {
    fn from(err: CostCenterError) -> Self {
        match err {
            CostCenterError::Hierarchy(HierarchyError::CorruptHierarchy(_)) => {
                Self::Internal(err.to_string())
            }
            CostCenterError::Hierarchy(HierarchyError::NodeNotFound(_)) => {
                Self::NotFound(err.to_string())
            }
            CostCenterError::Hierarchy(_) => Self::InvalidInput(err.to_string()),
            CostCenterError::DuplicateCode(_) => Self::Conflict(err.to_string()),
            CostCenterError::NotFound(_) | CostCenterError::ParentNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            CostCenterError::HasChildren(_) => Self::InvalidState(err.to_string()),
            CostCenterError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a cost center.
#[derive(Debug, Clone)]
pub struct CreateCostCenterInput {
    /// Unique cost center code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent cost center; `None` creates a root.
    pub parent_id: Option<CostCenterId>,
    /// Creating user.
    pub created_by: UserId,
}

/// Input for updating a cost center. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCostCenterInput {
    /// New display name.
    pub name: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New parent; `Some(None)` detaches the node to a root.
    pub parent_id: Option<Option<CostCenterId>>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Cost center repository.
#[derive(Debug, Clone)]
pub struct CostCenterRepository {
    db: DatabaseConnection,
}

impl CostCenterRepository {
    /// Creates a new cost center repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a cost center.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the code is already taken
    /// - the named parent does not exist
    /// - the database operation fails
    pub async fn create(
        &self,
        input: CreateCostCenterInput,
    ) -> Result<CostCenter, CostCenterError> {
        let existing = cost_centers::Entity::find()
            .filter(cost_centers::Column::Code.eq(input.code.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(CostCenterError::DuplicateCode(input.code));
        }

        if let Some(parent_id) = input.parent_id {
            let parent = cost_centers::Entity::find_by_id(parent_id.into_inner())
                .one(&self.db)
                .await?;
            if parent.is_none() {
                return Err(CostCenterError::ParentNotFound(parent_id));
            }
        }

        let now = chrono::Utc::now().into();
        let model = cost_centers::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            parent_id: Set(input.parent_id.map(CostCenterId::into_inner)),
            is_active: Set(true),
            created_by: Set(input.created_by.into_inner()),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&self.db).await?;

        tracing::info!(code = %created.code, "created cost center");
        Ok(created.into())
    }

    /// Updates a cost center.
    ///
    /// Re-parenting loads the full node set inside the transaction and runs
    /// the cycle check against that snapshot, so a concurrent relink cannot
    /// close a cycle between the check and the write.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the cost center does not exist
    /// - the new parent does not exist, is the node itself, or descends
    ///   from it
    /// - the database operation fails
    pub async fn update(
        &self,
        id: CostCenterId,
        input: UpdateCostCenterInput,
        updated_by: UserId,
    ) -> Result<CostCenter, CostCenterError> {
        let txn = self.db.begin().await?;

        let model = cost_centers::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(CostCenterError::NotFound(id))?;

        if let Some(new_parent) = input.parent_id {
            if let Some(parent_id) = new_parent {
                let nodes: Vec<CostCenter> = cost_centers::Entity::find()
                    .all(&txn)
                    .await?
                    .into_iter()
                    .map(Into::into)
                    .collect();
                costcenter::validate_new_parent(&nodes, id, parent_id)?;
            }
        }

        let mut active: cost_centers::ActiveModel = model.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(parent_id) = input.parent_id {
            active.parent_id = Set(parent_id.map(CostCenterId::into_inner));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_by = Set(Some(updated_by.into_inner()));
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(code = %updated.code, "updated cost center");
        Ok(updated.into())
    }

    /// Deletes a cost center. Only childless nodes may be deleted; subtrees
    /// must be dismantled leaf-first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the cost center does not exist
    /// - the cost center still has children
    /// - the database operation fails
    pub async fn remove(&self, id: CostCenterId) -> Result<(), CostCenterError> {
        let txn = self.db.begin().await?;

        let model = cost_centers::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(CostCenterError::NotFound(id))?;

        let child_count = cost_centers::Entity::find()
            .filter(cost_centers::Column::ParentId.eq(id.into_inner()))
            .count(&txn)
            .await?;
        if child_count > 0 {
            return Err(CostCenterError::HasChildren(id));
        }

        let code = model.code.clone();
        model.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(code = %code, "deleted cost center");
        Ok(())
    }

    /// Finds a cost center by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: CostCenterId,
    ) -> Result<Option<CostCenter>, CostCenterError> {
        let model = cost_centers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    /// Lists cost centers ordered by code, paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<CostCenter>, CostCenterError> {
        let total = cost_centers::Entity::find().count(&self.db).await?;

        let models = cost_centers::Entity::find()
            .order_by_asc(cost_centers::Column::Code)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            models.into_iter().map(Into::into).collect(),
            page.page,
            page.per_page,
            total,
        ))
    }

    /// Loads the active hierarchy as a forest of trees, siblings ordered by
    /// code. Children of an inactive parent surface as roots.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_tree(&self) -> Result<Vec<CostCenterTreeNode>, CostCenterError> {
        let models = cost_centers::Entity::find()
            .filter(cost_centers::Column::IsActive.eq(true))
            .order_by_asc(cost_centers::Column::Code)
            .all(&self.db)
            .await?;
        let nodes: Vec<CostCenter> = models.into_iter().map(Into::into).collect();
        Ok(costcenter::build_tree(&nodes))
    }

    /// Returns the ancestor chain of a cost center, nearest parent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not exist, the stored hierarchy is
    /// corrupt, or the database query fails.
    pub async fn ancestors(&self, id: CostCenterId) -> Result<Vec<CostCenter>, CostCenterError> {
        let nodes = self.load_all().await?;
        Ok(costcenter::ancestors(&nodes, id)?)
    }

    /// Returns every descendant of a cost center, depth-first in code order.
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not exist, the stored hierarchy is
    /// corrupt, or the database query fails.
    pub async fn descendants(&self, id: CostCenterId) -> Result<Vec<CostCenter>, CostCenterError> {
        let nodes = self.load_all().await?;
        Ok(costcenter::descendants(&nodes, id)?)
    }

    async fn load_all(&self) -> Result<Vec<CostCenter>, CostCenterError> {
        let models = cost_centers::Entity::find()
            .order_by_asc(cost_centers::Column::Code)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[path = "cost_center_tests.rs"]
mod tests;
