//! Errors returned by dashboard queries.

use thiserror::Error;

/// Failure of a dashboard query.
///
/// Each variant names the query that failed. The underlying store error is
/// logged where it happens and is not carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataFetchError {
    #[error("Failed to fetch revenue data.")]
    Revenue,

    #[error("Failed to fetch the latest invoices.")]
    LatestInvoices,

    #[error("Failed to fetch card data.")]
    CardData,

    #[error("Failed to fetch invoices.")]
    Invoices,

    #[error("Failed to fetch total number of invoices.")]
    InvoicePages,

    #[error("Failed to fetch invoice.")]
    Invoice,

    #[error("Failed to fetch all customers.")]
    Customers,

    #[error("Failed to fetch customer table.")]
    CustomerTable,
}

impl DataFetchError {
    /// Metric and log label for the failing query.
    pub fn operation(&self) -> &'static str {
        match self {
            DataFetchError::Revenue => "fetch_revenue",
            DataFetchError::LatestInvoices => "fetch_latest_invoices",
            DataFetchError::CardData => "fetch_card_data",
            DataFetchError::Invoices => "fetch_filtered_invoices",
            DataFetchError::InvoicePages => "fetch_invoices_pages",
            DataFetchError::Invoice => "fetch_invoice_by_id",
            DataFetchError::Customers => "fetch_customers",
            DataFetchError::CustomerTable => "fetch_filtered_customers",
        }
    }
}

/// What went wrong inside a single store round trip.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("query timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error(transparent)]
    UnknownStatus(#[from] crate::models::UnknownInvoiceStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failed_query() {
        assert_eq!(
            DataFetchError::Revenue.to_string(),
            "Failed to fetch revenue data."
        );
        assert_eq!(
            DataFetchError::InvoicePages.to_string(),
            "Failed to fetch total number of invoices."
        );
        assert_eq!(
            DataFetchError::CustomerTable.to_string(),
            "Failed to fetch customer table."
        );
    }

    #[test]
    fn operations_are_distinct() {
        let all = [
            DataFetchError::Revenue,
            DataFetchError::LatestInvoices,
            DataFetchError::CardData,
            DataFetchError::Invoices,
            DataFetchError::InvoicePages,
            DataFetchError::Invoice,
            DataFetchError::Customers,
            DataFetchError::CustomerTable,
        ];
        let mut labels: Vec<_> = all.iter().map(DataFetchError::operation).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), all.len());
    }
}
