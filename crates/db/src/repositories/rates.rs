//! Billing and tax rate repository for database operations.
//!
//! Rate resolution and billing arithmetic live in `hesab_core::billing`;
//! this repository loads candidate rows and delegates. Resolution results
//! are never cached, since effective windows shift and scoped rows compete
//! with defaults.

use chrono::NaiveDate;
use hesab_core::billing::{
    self, BillingBreakdown, BillingError, BillingRate, BillingService, RateType,
    StorageBillingInput, TaxComputation, TaxRate, TaxType, DEFAULT_GST_RATE, DEFAULT_WHT_RATE,
};
use hesab_shared::error::AppError;
use hesab_shared::types::{CustomerId, PageRequest, PageResponse, ProductCategoryId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{
    billing_rates,
    sea_orm_active_enums::{DbRateType, DbTaxType},
    tax_rates,
};

/// Error types for rate and billing operations.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    /// Billing rule violated or no rate resolved.
    #[error(transparent)]
    Domain(#[from] BillingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::Domain(domain) => match domain {
                BillingError::RateNotFound { .. } | BillingError::TaxRateNotFound { .. } => {
                    Self::NotFound(domain.to_string())
                }
                _ => Self::InvalidInput(domain.to_string()),
            },
            RateError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

/// Input for creating a billing rate.
#[derive(Debug, Clone)]
pub struct CreateBillingRateInput {
    /// Kind of rate.
    pub rate_type: RateType,
    /// The rate value (strictly positive).
    pub rate_value: Decimal,
    /// Customer scope, if any.
    pub customer_id: Option<CustomerId>,
    /// Product category scope, if any.
    pub product_category_id: Option<ProductCategoryId>,
    /// First date the rate applies.
    pub effective_from: NaiveDate,
    /// Last date the rate applies; `None` means open-ended.
    pub effective_to: Option<NaiveDate>,
}

/// Input for creating a tax rate.
#[derive(Debug, Clone)]
pub struct CreateTaxRateInput {
    /// Kind of tax.
    pub tax_type: TaxType,
    /// Percentage rate.
    pub rate: Decimal,
    /// Free-form applicability note.
    pub applicability: Option<String>,
    /// First date the rate applies.
    pub effective_from: NaiveDate,
    /// Marks the row as the fallback when no dated row matches.
    pub is_default: bool,
    /// Marks resolved amounts as exempt regardless of rate.
    pub is_exempt: bool,
}

/// A storage billing request before rate and tax resolution.
#[derive(Debug, Clone)]
pub struct StorageBillingRequest {
    /// Stored weight in kilograms.
    pub weight_kg: Decimal,
    /// Date goods entered storage.
    pub date_in: NaiveDate,
    /// Date goods left storage; also the tax point.
    pub date_out: NaiveDate,
    /// Explicit storage rate; `None` resolves the configured daily rate.
    pub rate_per_kg_per_day: Option<Decimal>,
    /// Labour charge on the way in.
    pub labour_in: Decimal,
    /// Labour charge on the way out.
    pub labour_out: Decimal,
    /// Loading/unloading charges.
    pub loading_charges: Decimal,
    /// Any other charges.
    pub other_charges: Decimal,
    /// Whether to add GST on the subtotal.
    pub apply_gst: bool,
    /// Whether to withhold tax from the subtotal.
    pub apply_wht: bool,
    /// Customer the billing is for, used for rate scoping.
    pub customer_id: Option<CustomerId>,
    /// Product category of the stored goods, used for rate scoping.
    pub product_category_id: Option<ProductCategoryId>,
}

/// Billing and tax rate repository.
#[derive(Debug, Clone)]
pub struct RateRepository {
    db: DatabaseConnection,
}

impl RateRepository {
    /// Creates a new rate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a billing rate row.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate value is not positive, the effective
    /// window is inverted, or the database operation fails.
    pub async fn create_billing_rate(
        &self,
        input: CreateBillingRateInput,
    ) -> Result<BillingRate, RateError> {
        let rate = BillingRate {
            id: hesab_shared::types::BillingRateId::new(),
            rate_type: input.rate_type,
            rate_value: input.rate_value,
            customer_id: input.customer_id,
            product_category_id: input.product_category_id,
            effective_from: input.effective_from,
            effective_to: input.effective_to,
            is_active: true,
        };
        billing::validate_rate_row(&rate)?;

        let now = chrono::Utc::now().into();
        let active = billing_rates::ActiveModel {
            id: Set(rate.id.into_inner()),
            rate_type: Set(rate.rate_type.into()),
            rate_value: Set(rate.rate_value),
            customer_id: Set(rate.customer_id.map(CustomerId::into_inner)),
            product_category_id: Set(rate.product_category_id.map(ProductCategoryId::into_inner)),
            effective_from: Set(rate.effective_from),
            effective_to: Set(rate.effective_to),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = active.insert(&self.db).await?;

        tracing::info!(rate_type = %rate.rate_type, "created billing rate");
        Ok(created.into())
    }

    /// Lists billing rates, newest effective date first, paginated.
    /// Optionally filtered to one rate type.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_billing_rates(
        &self,
        rate_type: Option<RateType>,
        page: &PageRequest,
    ) -> Result<PageResponse<BillingRate>, RateError> {
        let mut query = billing_rates::Entity::find();
        if let Some(rate_type) = rate_type {
            query = query.filter(billing_rates::Column::RateType.eq(DbRateType::from(rate_type)));
        }

        let total = query.clone().count(&self.db).await?;
        let models = query
            .order_by_desc(billing_rates::Column::EffectiveFrom)
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

    /// Resolves the billing rate applicable to a request.
    ///
    /// Loads the active rows for the rate type and delegates the
    /// specificity-then-recency tie-break to the billing core.
    ///
    /// # Errors
    ///
    /// Returns an error if no rate matches or the database query fails.
    pub async fn resolve_billing_rate(
        &self,
        rate_type: RateType,
        date: NaiveDate,
        customer_id: Option<CustomerId>,
        product_category_id: Option<ProductCategoryId>,
    ) -> Result<BillingRate, RateError> {
        let candidates = self.load_billing_rates(rate_type).await?;
        let resolved = billing::resolve_billing_rate(
            &candidates,
            rate_type,
            date,
            customer_id,
            product_category_id,
        )?;
        Ok(resolved.clone())
    }

    /// Creates a tax rate row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create_tax_rate(&self, input: CreateTaxRateInput) -> Result<TaxRate, RateError> {
        let now = chrono::Utc::now().into();
        let model = tax_rates::ActiveModel {
            id: Set(Uuid::now_v7()),
            tax_type: Set(input.tax_type.into()),
            rate: Set(input.rate),
            applicability: Set(input.applicability),
            effective_from: Set(input.effective_from),
            is_active: Set(true),
            is_default: Set(input.is_default),
            is_exempt: Set(input.is_exempt),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = model.insert(&self.db).await?;
        let rate: TaxRate = created.into();

        tracing::info!(tax_type = %rate.tax_type, "created tax rate");
        Ok(rate)
    }

    /// Lists all tax rates, newest effective date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_tax_rates(&self) -> Result<Vec<TaxRate>, RateError> {
        let models = tax_rates::Entity::find()
            .order_by_desc(tax_rates::Column::EffectiveFrom)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Computes the tax on `amount` for `tax_type` as of `as_of`.
    ///
    /// # Errors
    ///
    /// Returns an error if no tax rate resolves or the database query
    /// fails.
    pub async fn calculate_tax(
        &self,
        amount: Decimal,
        tax_type: TaxType,
        as_of: NaiveDate,
    ) -> Result<TaxComputation, RateError> {
        let rates = self.load_tax_rates(tax_type).await?;
        Ok(billing::calculate_tax(amount, tax_type, &rates, as_of)?)
    }

    /// Calculates a full storage billing breakdown for a request.
    ///
    /// The daily storage rate is resolved against the goods-in date unless
    /// the request carries an explicit rate. GST and withholding rates are
    /// resolved against the goods-out date; when no tax rows are configured
    /// the statutory defaults apply rather than failing the invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no daily rate resolves and none was supplied
    /// - a monetary input is negative
    /// - the database query fails
    pub async fn calculate_storage_billing(
        &self,
        request: &StorageBillingRequest,
    ) -> Result<BillingBreakdown, RateError> {
        let rate_per_kg_per_day = match request.rate_per_kg_per_day {
            Some(rate) => rate,
            None => {
                self.resolve_billing_rate(
                    RateType::Daily,
                    request.date_in,
                    request.customer_id,
                    request.product_category_id,
                )
                .await?
                .rate_value
            }
        };

        let gst_rate = self
            .resolve_tax_percentage(TaxType::Gst, request.date_out, DEFAULT_GST_RATE)
            .await?;
        let wht_rate = self
            .resolve_tax_percentage(TaxType::Withholding, request.date_out, DEFAULT_WHT_RATE)
            .await?;

        let input = StorageBillingInput {
            weight_kg: request.weight_kg,
            date_in: request.date_in,
            date_out: request.date_out,
            rate_per_kg_per_day,
            labour_in: request.labour_in,
            labour_out: request.labour_out,
            loading_charges: request.loading_charges,
            other_charges: request.other_charges,
            apply_gst: request.apply_gst,
            apply_wht: request.apply_wht,
            gst_rate,
            wht_rate,
        };

        let breakdown = BillingService::calculate_storage_billing(&input)?;
        tracing::debug!(
            days = breakdown.days_stored,
            total = %breakdown.total_amount,
            "calculated storage billing"
        );
        Ok(breakdown)
    }

    /// Resolves the effective percentage for a tax type, treating exempt
    /// rows as zero and missing configuration as the statutory default.
    async fn resolve_tax_percentage(
        &self,
        tax_type: TaxType,
        as_of: NaiveDate,
        default: Decimal,
    ) -> Result<Decimal, RateError> {
        let rates = self.load_tax_rates(tax_type).await?;
        match billing::resolve_tax_rate(&rates, tax_type, as_of) {
            Ok(rate) if rate.is_exempt => Ok(Decimal::ZERO),
            Ok(rate) => Ok(rate.rate),
            Err(BillingError::TaxRateNotFound { .. }) => Ok(default),
            Err(other) => Err(other.into()),
        }
    }

    async fn load_billing_rates(
        &self,
        rate_type: RateType,
    ) -> Result<Vec<BillingRate>, RateError> {
        let models = billing_rates::Entity::find()
            .filter(billing_rates::Column::RateType.eq(DbRateType::from(rate_type)))
            .filter(billing_rates::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn load_tax_rates(&self, tax_type: TaxType) -> Result<Vec<TaxRate>, RateError> {
        let models = tax_rates::Entity::find()
            .filter(tax_rates::Column::TaxType.eq(DbTaxType::from(tax_type)))
            .filter(tax_rates::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
