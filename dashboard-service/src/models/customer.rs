//! Customer models for dashboard-service.

use crate::utils::currency::format_currency;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Customer option for invoice forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

/// Customer with invoice aggregates, amounts still in cents.
#[derive(Debug, Clone, FromRow)]
pub struct CustomersTableRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Customer table entry with formatted totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedCustomersTable {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

impl From<CustomersTableRow> for FormattedCustomersTable {
    fn from(row: CustomersTableRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: format_currency(row.total_pending),
            total_paid: format_currency(row.total_paid),
        }
    }
}
