//! Invoice models for dashboard-service.

use crate::utils::currency::{cents_to_major, format_currency};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

/// A stored status outside the two-value enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown invoice status: {0}")]
pub struct UnknownInvoiceStatus(pub String);

impl FromStr for InvoiceStatus {
    type Err = UnknownInvoiceStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownInvoiceStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice record. `amount` is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

// -----------------------------------------------------------------------------
// Latest invoices
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct LatestInvoiceRow {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: i32,
}

/// Dashboard "latest invoices" entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: String,
}

impl From<LatestInvoiceRow> for LatestInvoice {
    fn from(row: LatestInvoiceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            email: row.email,
            amount: format_currency(row.amount.into()),
        }
    }
}

// -----------------------------------------------------------------------------
// Invoice table
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct InvoicesTableRow {
    pub id: Uuid,
    pub amount: i32,
    pub date: NaiveDate,
    pub status: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Invoice table entry joined with its customer. `amount` stays in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoicesTable {
    pub id: Uuid,
    pub amount: i32,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl TryFrom<InvoicesTableRow> for InvoicesTable {
    type Error = UnknownInvoiceStatus;

    fn try_from(row: InvoicesTableRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            amount: row.amount,
            date: row.date,
            status: row.status.parse()?,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
        })
    }
}

// -----------------------------------------------------------------------------
// Invoice edit form
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct InvoiceFormRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

/// Invoice as shown in the edit form, with `amount` in major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceForm {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl TryFrom<InvoiceFormRow> for InvoiceForm {
    type Error = UnknownInvoiceStatus;

    fn try_from(row: InvoiceFormRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            customer_id: row.customer_id,
            amount: cents_to_major(row.amount.into()),
            status: row.status.parse()?,
            date: row.date,
        })
    }
}

// -----------------------------------------------------------------------------
// Card data
// -----------------------------------------------------------------------------

/// One `GROUP BY status` result.
#[derive(Debug, Clone, FromRow)]
pub struct StatusTotalRow {
    pub status: String,
    pub total: i64,
}

/// Paid and pending sums in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub paid: i64,
    pub pending: i64,
}

impl StatusTotals {
    /// Look each status up by name; a status with no group counts as zero.
    pub fn from_rows(rows: &[StatusTotalRow]) -> Self {
        let total_for = |status: InvoiceStatus| {
            rows.iter()
                .filter(|row| row.status == status.as_str())
                .map(|row| row.total)
                .sum::<i64>()
        };

        Self {
            paid: total_for(InvoiceStatus::Paid),
            pending: total_for(InvoiceStatus::Pending),
        }
    }
}

/// Summary cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardData {
    pub number_of_customers: i64,
    pub number_of_invoices: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

impl CardData {
    pub fn new(number_of_invoices: i64, number_of_customers: i64, totals: StatusTotals) -> Self {
        Self {
            number_of_customers,
            number_of_invoices,
            total_paid_invoices: format_currency(totals.paid),
            total_pending_invoices: format_currency(totals.pending),
        }
    }
}
