//! Fiscal year and period repository for database operations.
//!
//! Calendar generation and close/reopen sequencing live in
//! `hesab_core::fiscal`; this repository loads the rows, re-runs the
//! sequencing checks inside the mutating transaction, and persists the
//! outcome. The year-level closed flag is never set directly by callers;
//! it follows from the period states.

use chrono::{NaiveDate, Utc};
use hesab_core::fiscal::{
    self, FiscalPeriod, FiscalYear, PeriodState, PERIODS_PER_YEAR,
};
use hesab_shared::error::AppError;
use hesab_shared::types::{FiscalPeriodId, FiscalYearId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{fiscal_periods, fiscal_years};

/// Error types for fiscal repository operations.
#[derive(Debug, thiserror::Error)]
pub enum FiscalError {
    /// Calendar or sequencing rule violated.
    #[error(transparent)]
    Domain(#[from] fiscal::FiscalError),

    /// A fiscal year for this starting year already exists.
    #[error("Fiscal year {0} already exists")]
    DuplicateYear(i32),

    /// Fiscal year not found.
    #[error("Fiscal year not found: {0}")]
    YearNotFound(FiscalYearId),

    /// Fiscal period not found.
    #[error("Fiscal period not found: {0}")]
    PeriodNotFound(FiscalPeriodId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<FiscalError> for AppError {
    fn from(err: FiscalError) -> Self {
        match err {
            FiscalError::Domain(domain) => {
                if domain.is_sequence_violation() {
                    Self::SequenceViolation(domain.to_string())
                } else {
                    match domain {
                        fiscal::FiscalError::AlreadyClosed { .. }
                        | fiscal::FiscalError::NotClosed { .. } => {
                            Self::InvalidState(domain.to_string())
                        }
                        fiscal::FiscalError::PeriodMissing { .. } => {
                            Self::Internal(domain.to_string())
                        }
                        _ => Self::InvalidInput(domain.to_string()),
                    }
                }
            }
            FiscalError::DuplicateYear(_) => Self::Conflict(err.to_string()),
            FiscalError::YearNotFound(_) | FiscalError::PeriodNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            FiscalError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Fiscal year with nested periods, ordered by period number.
#[derive(Debug, Clone)]
pub struct FiscalYearWithPeriods {
    /// The fiscal year record.
    pub fiscal_year: FiscalYear,
    /// The twelve monthly periods within this year.
    pub periods: Vec<FiscalPeriod>,
}

/// Input for creating a fiscal year.
#[derive(Debug, Clone)]
pub struct CreateFiscalYearInput {
    /// Starting calendar year (e.g., 2025 for July 2025 - June 2026).
    pub year: i32,
    /// Start date; must be July 1 of `year`.
    pub start_date: NaiveDate,
    /// End date; must be June 30 of `year + 1`.
    pub end_date: NaiveDate,
}

/// Fiscal year and period repository.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a fiscal year with its 12 auto-generated monthly periods.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the boundary dates are not July 1 / June 30 of the right years
    /// - a fiscal year with the same starting year already exists
    /// - the database operation fails
    pub async fn create_fiscal_year(
        &self,
        input: CreateFiscalYearInput,
    ) -> Result<FiscalYearWithPeriods, FiscalError> {
        fiscal::validate_year_boundaries(input.year, input.start_date, input.end_date)?;

        let existing = fiscal_years::Entity::find()
            .filter(fiscal_years::Column::Year.eq(input.year))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(FiscalError::DuplicateYear(input.year));
        }

        let txn = self.db.begin().await?;
        let now = Utc::now().into();
        let fiscal_year_id = Uuid::now_v7();

        let fiscal_year = fiscal_years::ActiveModel {
            id: Set(fiscal_year_id),
            year: Set(input.year),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_closed: Set(false),
            closed_by: Set(None),
            closed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let fiscal_year = fiscal_year.insert(&txn).await?;

        let specs = fiscal::generate_monthly_periods(input.year)?;
        let mut inserted = Vec::with_capacity(specs.len());
        for spec in specs {
            let period = fiscal_periods::ActiveModel {
                id: Set(Uuid::now_v7()),
                fiscal_year_id: Set(fiscal_year_id),
                period_number: Set(spec.period_number),
                name: Set(spec.name),
                start_date: Set(spec.start_date),
                end_date: Set(spec.end_date),
                is_closed: Set(false),
                closed_by: Set(None),
                closed_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            inserted.push(period.insert(&txn).await?);
        }

        txn.commit().await?;

        tracing::info!(year = input.year, "created fiscal year with {PERIODS_PER_YEAR} periods");

        Ok(FiscalYearWithPeriods {
            fiscal_year: fiscal_year.into(),
            periods: inserted.into_iter().map(Into::into).collect(),
        })
    }

    /// Lists all fiscal years with their periods, newest year first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_fiscal_years(&self) -> Result<Vec<FiscalYearWithPeriods>, FiscalError> {
        let years = fiscal_years::Entity::find()
            .order_by_desc(fiscal_years::Column::Year)
            .all(&self.db)
            .await?;

        let mut results = Vec::with_capacity(years.len());
        for year in years {
            let periods = self.load_periods(year.id).await?;
            results.push(FiscalYearWithPeriods {
                fiscal_year: year.into(),
                periods,
            });
        }

        Ok(results)
    }

    /// Finds a fiscal year by id with its periods.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_year_by_id(
        &self,
        id: FiscalYearId,
    ) -> Result<Option<FiscalYearWithPeriods>, FiscalError> {
        let Some(year) = fiscal_years::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let periods = self.load_periods(year.id).await?;
        Ok(Some(FiscalYearWithPeriods {
            fiscal_year: year.into(),
            periods,
        }))
    }

    /// Finds a fiscal period by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_period_by_id(
        &self,
        id: FiscalPeriodId,
    ) -> Result<Option<FiscalPeriod>, FiscalError> {
        let period = fiscal_periods::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(period.map(Into::into))
    }

    /// Finds the fiscal period containing `date`.
    ///
    /// Periods partition each fiscal year and years never overlap, so at
    /// most one row matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_period_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<FiscalPeriod>, FiscalError> {
        let period = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::StartDate.lte(date))
            .filter(fiscal_periods::Column::EndDate.gte(date))
            .one(&self.db)
            .await?;
        Ok(period.map(Into::into))
    }

    /// Finds the fiscal period containing today's date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn current_period(&self) -> Result<Option<FiscalPeriod>, FiscalError> {
        self.find_period_for_date(Utc::now().date_naive()).await
    }

    /// Closes a fiscal period.
    ///
    /// Sibling states are re-read inside the transaction so a concurrent
    /// close or reopen cannot slip a gap past the sequence check. Closing
    /// period 12 when periods 1-11 are already closed also closes the year,
    /// stamped with the same actor and timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the period does not exist
    /// - the period is already closed
    /// - an earlier period is still open
    /// - the database operation fails
    pub async fn close_period(
        &self,
        period_id: FiscalPeriodId,
        closed_by: UserId,
    ) -> Result<FiscalPeriod, FiscalError> {
        let txn = self.db.begin().await?;

        let (period, siblings) = Self::load_period_with_siblings(&txn, period_id).await?;
        let states: Vec<PeriodState> = siblings.iter().map(Into::into).collect();
        fiscal::validate_close(period.period_number, &states)?;

        let now = Utc::now();
        let actor = closed_by.into_inner();
        let year_closes = fiscal::closes_year(period.period_number, &states);
        let fiscal_year_id = period.fiscal_year_id;
        let period_number = period.period_number;

        let mut active: fiscal_periods::ActiveModel = period.into();
        active.is_closed = Set(true);
        active.closed_by = Set(Some(actor));
        active.closed_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        let updated = active.update(&txn).await?;

        if year_closes {
            Self::set_year_closed(&txn, fiscal_year_id, Some((actor, now))).await?;
        }

        txn.commit().await?;

        tracing::info!(
            period_number,
            year_closed = year_closes,
            "closed fiscal period"
        );
        Ok(updated.into())
    }

    /// Reopens a fiscal period.
    ///
    /// Mirror of [`Self::close_period`]: the validation runs against sibling
    /// states read in the same transaction, and reopening any period of a
    /// fully closed year clears the year-level closed flag.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the period does not exist
    /// - the period is not closed
    /// - a later period is still closed
    /// - the database operation fails
    pub async fn reopen_period(
        &self,
        period_id: FiscalPeriodId,
    ) -> Result<FiscalPeriod, FiscalError> {
        let txn = self.db.begin().await?;

        let (period, siblings) = Self::load_period_with_siblings(&txn, period_id).await?;
        let states: Vec<PeriodState> = siblings.iter().map(Into::into).collect();
        fiscal::validate_reopen(period.period_number, &states)?;

        let now = Utc::now();
        let year_was_closed = fiscal::year_is_closed(&states);
        let fiscal_year_id = period.fiscal_year_id;
        let period_number = period.period_number;

        let mut active: fiscal_periods::ActiveModel = period.into();
        active.is_closed = Set(false);
        active.closed_by = Set(None);
        active.closed_at = Set(None);
        active.updated_at = Set(now.into());
        let updated = active.update(&txn).await?;

        if year_was_closed {
            Self::set_year_closed(&txn, fiscal_year_id, None).await?;
        }

        txn.commit().await?;

        tracing::info!(
            period_number,
            year_reopened = year_was_closed,
            "reopened fiscal period"
        );
        Ok(updated.into())
    }

    async fn load_periods(&self, year_id: Uuid) -> Result<Vec<FiscalPeriod>, FiscalError> {
        let periods = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::FiscalYearId.eq(year_id))
            .order_by_asc(fiscal_periods::Column::PeriodNumber)
            .all(&self.db)
            .await?;
        Ok(periods.into_iter().map(Into::into).collect())
    }

    /// Loads the target period plus every sibling of its fiscal year inside
    /// the given transaction.
    ///
    /// The sibling read takes `FOR UPDATE` row locks on the whole year, so
    /// two transactions mutating periods of the same year serialize here and
    /// each validates against the other's committed state.
    async fn load_period_with_siblings(
        txn: &DatabaseTransaction,
        period_id: FiscalPeriodId,
    ) -> Result<(fiscal_periods::Model, Vec<fiscal_periods::Model>), FiscalError> {
        let period = fiscal_periods::Entity::find_by_id(period_id.into_inner())
            .one(txn)
            .await?
            .ok_or(FiscalError::PeriodNotFound(period_id))?;

        let siblings = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::FiscalYearId.eq(period.fiscal_year_id))
            .order_by_asc(fiscal_periods::Column::PeriodNumber)
            .lock_exclusive()
            .all(txn)
            .await?;

        Ok((period, siblings))
    }

    async fn set_year_closed(
        txn: &DatabaseTransaction,
        year_id: Uuid,
        closed: Option<(Uuid, chrono::DateTime<Utc>)>,
    ) -> Result<(), FiscalError> {
        let year = fiscal_years::Entity::find_by_id(year_id)
            .one(txn)
            .await?
            .ok_or_else(|| FiscalError::YearNotFound(FiscalYearId::from_uuid(year_id)))?;

        let mut active: fiscal_years::ActiveModel = year.into();
        match closed {
            Some((actor, at)) => {
                active.is_closed = Set(true);
                active.closed_by = Set(Some(actor));
                active.closed_at = Set(Some(at.into()));
                active.updated_at = Set(at.into());
            }
            None => {
                active.is_closed = Set(false);
                active.closed_by = Set(None);
                active.closed_at = Set(None);
                active.updated_at = Set(Utc::now().into());
            }
        }
        active.update(txn).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "fiscal_tests.rs"]
mod tests;
