//! Initial database migration.
//!
//! Creates the fiscal calendar, cost center hierarchy, and rate
//! configuration tables along with their enums, indexes, and the
//! updated_at trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(FISCAL_YEARS_SQL).await?;
        db.execute_unprepared(FISCAL_PERIODS_SQL).await?;
        db.execute_unprepared(COST_CENTERS_SQL).await?;
        db.execute_unprepared(BILLING_RATES_SQL).await?;
        db.execute_unprepared(TAX_RATES_SQL).await?;
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Billing rate kinds
CREATE TYPE rate_type AS ENUM ('daily', 'seasonal', 'monthly', 'loading');

-- Tax kinds
CREATE TYPE tax_type AS ENUM ('gst', 'withholding');
";

const FISCAL_YEARS_SQL: &str = r"
CREATE TABLE fiscal_years (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    year INTEGER NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    is_closed BOOLEAN NOT NULL DEFAULT false,
    closed_by UUID,
    closed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_fiscal_year_dates CHECK (end_date > start_date),
    UNIQUE (year)
);
";

const FISCAL_PERIODS_SQL: &str = r"
CREATE TABLE fiscal_periods (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    fiscal_year_id UUID NOT NULL REFERENCES fiscal_years(id) ON DELETE CASCADE,
    period_number SMALLINT NOT NULL,
    name VARCHAR(50) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    is_closed BOOLEAN NOT NULL DEFAULT false,
    closed_by UUID,
    closed_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_period_dates CHECK (end_date >= start_date),
    CONSTRAINT chk_period_number CHECK (period_number BETWEEN 1 AND 12),
    UNIQUE (fiscal_year_id, period_number)
);

CREATE INDEX idx_fiscal_periods_dates ON fiscal_periods(start_date, end_date);
CREATE INDEX idx_fiscal_periods_open ON fiscal_periods(fiscal_year_id) WHERE is_closed = false;
";

const COST_CENTERS_SQL: &str = r"
CREATE TABLE cost_centers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(50) NOT NULL,
    name VARCHAR(100) NOT NULL,
    description TEXT,
    parent_id UUID REFERENCES cost_centers(id),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_by UUID NOT NULL,
    updated_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (code)
);

CREATE INDEX idx_cost_centers_parent ON cost_centers(parent_id);
CREATE INDEX idx_cost_centers_active ON cost_centers(code) WHERE is_active = true;
";

const BILLING_RATES_SQL: &str = r"
CREATE TABLE billing_rates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    rate_type rate_type NOT NULL,
    rate_value NUMERIC(19, 4) NOT NULL,
    customer_id UUID,
    product_category_id UUID,
    effective_from DATE NOT NULL,
    effective_to DATE,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_rate_value CHECK (rate_value > 0),
    CONSTRAINT chk_effective_window CHECK (effective_to IS NULL OR effective_to >= effective_from)
);

CREATE INDEX idx_billing_rates_lookup ON billing_rates(rate_type, effective_from) WHERE is_active = true;
";

const TAX_RATES_SQL: &str = r"
CREATE TABLE tax_rates (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    tax_type tax_type NOT NULL,
    rate NUMERIC(7, 4) NOT NULL,
    applicability TEXT,
    effective_from DATE NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_default BOOLEAN NOT NULL DEFAULT false,
    is_exempt BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_tax_rate CHECK (rate >= 0)
);

CREATE INDEX idx_tax_rates_lookup ON tax_rates(tax_type, effective_from) WHERE is_active = true;
";

const TRIGGERS_SQL: &str = r"
-- ============================================================
-- FUNCTION: set_updated_at
-- Stamps updated_at on every row update
-- ============================================================
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_fiscal_years_updated_at
BEFORE UPDATE ON fiscal_years
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_fiscal_periods_updated_at
BEFORE UPDATE ON fiscal_periods
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_cost_centers_updated_at
BEFORE UPDATE ON cost_centers
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_billing_rates_updated_at
BEFORE UPDATE ON billing_rates
FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_tax_rates_updated_at
BEFORE UPDATE ON tax_rates
FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
-- Drop triggers
DROP TRIGGER IF EXISTS trg_tax_rates_updated_at ON tax_rates;
DROP TRIGGER IF EXISTS trg_billing_rates_updated_at ON billing_rates;
DROP TRIGGER IF EXISTS trg_cost_centers_updated_at ON cost_centers;
DROP TRIGGER IF EXISTS trg_fiscal_periods_updated_at ON fiscal_periods;
DROP TRIGGER IF EXISTS trg_fiscal_years_updated_at ON fiscal_years;

-- Drop functions
DROP FUNCTION IF EXISTS set_updated_at();

-- Drop tables (reverse order of creation)
DROP TABLE IF EXISTS tax_rates CASCADE;
DROP TABLE IF EXISTS billing_rates CASCADE;
DROP TABLE IF EXISTS cost_centers CASCADE;
DROP TABLE IF EXISTS fiscal_periods CASCADE;
DROP TABLE IF EXISTS fiscal_years CASCADE;

-- Drop enums
DROP TYPE IF EXISTS tax_type;
DROP TYPE IF EXISTS rate_type;
";
