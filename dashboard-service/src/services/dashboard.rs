//! Read-only dashboard queries.
//!
//! Every query returns display-ready values. Store failures are logged here
//! with full detail and surface to callers only as a [`DataFetchError`].

use crate::error::{DataFetchError, StoreError};
use crate::models::{
    CardData, CustomerField, CustomersTableRow, FormattedCustomersTable, InvoiceForm,
    InvoiceFormRow, InvoiceStatus, InvoicesTable, InvoicesTableRow, LatestInvoice,
    LatestInvoiceRow, Revenue, StatusTotalRow, StatusTotals,
};
use crate::services::database::Database;
use crate::services::metrics::DATA_FETCH_ERRORS_TOTAL;
use crate::utils::search::{
    contains_pattern, page_count, page_offset, InvoiceSearch, ITEMS_PER_PAGE,
};
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Number of invoices on the dashboard's "latest" card.
pub const LATEST_INVOICES_LIMIT: i64 = 5;

/// Shared `FROM ... WHERE` of the invoice search and its page count.
/// `$1` is the `ILIKE` pattern, `$2` the amount, `$3` the date.
macro_rules! invoice_search_from {
    () => {
        r#"
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE customers.name ILIKE $1
           OR customers.email ILIKE $1
           OR invoices.status ILIKE $1
           OR invoices.amount = $2
           OR invoices.date = $3
        "#
    };
}

fn fail(kind: DataFetchError, source: StoreError) -> DataFetchError {
    DATA_FETCH_ERRORS_TOTAL
        .with_label_values(&[kind.operation()])
        .inc();
    error!(
        operation = kind.operation(),
        error = %source,
        detail = ?source,
        "Database Error"
    );
    kind
}

impl Database {
    /// All revenue rows in storage order.
    #[instrument(skip(self))]
    pub async fn fetch_revenue(&self) -> Result<Vec<Revenue>, DataFetchError> {
        debug!("Fetching revenue data");

        self.timed(
            "fetch_revenue",
            sqlx::query_as::<_, Revenue>("SELECT month, revenue FROM revenue")
                .fetch_all(self.pool()),
        )
        .await
        .map_err(|e| fail(DataFetchError::Revenue, e))
    }

    /// The five most recent invoices with their customer.
    #[instrument(skip(self))]
    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, DataFetchError> {
        let rows = self
            .timed(
                "fetch_latest_invoices",
                sqlx::query_as::<_, LatestInvoiceRow>(
                    r#"
                    SELECT invoices.id, customers.name, customers.image_url, customers.email, invoices.amount
                    FROM invoices
                    JOIN customers ON invoices.customer_id = customers.id
                    ORDER BY invoices.date DESC, invoices.id
                    LIMIT $1
                    "#,
                )
                .bind(LATEST_INVOICES_LIMIT)
                .fetch_all(self.pool()),
            )
            .await
            .map_err(|e| fail(DataFetchError::LatestInvoices, e))?;

        Ok(rows.into_iter().map(LatestInvoice::from).collect())
    }

    /// Invoice and customer counts plus paid/pending totals.
    ///
    /// The three queries run concurrently; the first failure fails the call.
    #[instrument(skip(self))]
    pub async fn fetch_card_data(&self) -> Result<CardData, DataFetchError> {
        let statuses: Vec<&str> = InvoiceStatus::ALL.iter().map(|s| s.as_str()).collect();

        let invoice_count = self.timed(
            "count_invoices",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invoices").fetch_one(self.pool()),
        );
        let customer_count = self.timed(
            "count_customers",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers").fetch_one(self.pool()),
        );
        let status_totals = self.timed(
            "sum_invoices_by_status",
            sqlx::query_as::<_, StatusTotalRow>(
                r#"
                SELECT status, SUM(amount)::BIGINT AS total
                FROM invoices
                WHERE status = ANY($1)
                GROUP BY status
                "#,
            )
            .bind(&statuses)
            .fetch_all(self.pool()),
        );

        let (number_of_invoices, number_of_customers, totals) =
            tokio::try_join!(invoice_count, customer_count, status_totals)
                .map_err(|e| fail(DataFetchError::CardData, e))?;

        Ok(CardData::new(
            number_of_invoices,
            number_of_customers,
            StatusTotals::from_rows(&totals),
        ))
    }

    /// One page of invoices matching `query`, newest first.
    #[instrument(skip(self))]
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: i64,
    ) -> Result<Vec<InvoicesTable>, DataFetchError> {
        let search = InvoiceSearch::new(query);

        let rows = self
            .timed(
                "fetch_filtered_invoices",
                sqlx::query_as::<_, InvoicesTableRow>(concat!(
                    r#"
                    SELECT invoices.id, invoices.amount, invoices.date, invoices.status,
                        customers.name, customers.email, customers.image_url
                    "#,
                    invoice_search_from!(),
                    r#"
                    ORDER BY invoices.date DESC, invoices.id
                    LIMIT $4 OFFSET $5
                    "#,
                ))
                .bind(&search.pattern)
                .bind(search.amount)
                .bind(search.date)
                .bind(ITEMS_PER_PAGE)
                .bind(page_offset(current_page))
                .fetch_all(self.pool()),
            )
            .await
            .map_err(|e| fail(DataFetchError::Invoices, e))?;

        rows.into_iter()
            .map(InvoicesTable::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| fail(DataFetchError::Invoices, e.into()))
    }

    /// Number of invoice pages matching `query`.
    #[instrument(skip(self))]
    pub async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, DataFetchError> {
        let search = InvoiceSearch::new(query);

        let count = self
            .timed(
                "fetch_invoices_pages",
                sqlx::query_scalar::<_, i64>(concat!("SELECT COUNT(*)", invoice_search_from!()))
                    .bind(&search.pattern)
                    .bind(search.amount)
                    .bind(search.date)
                    .fetch_one(self.pool()),
            )
            .await
            .map_err(|e| fail(DataFetchError::InvoicePages, e))?;

        debug!(count, "Matching invoices counted");

        Ok(page_count(count))
    }

    /// Invoice for the edit form, amount in major units.
    ///
    /// Returns `Ok(None)` when `id` is not a UUID or no invoice has it.
    #[instrument(skip(self))]
    pub async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>, DataFetchError> {
        let Ok(invoice_id) = Uuid::parse_str(id) else {
            debug!("Invoice id is not a UUID");
            return Ok(None);
        };

        let row = self
            .timed(
                "fetch_invoice_by_id",
                sqlx::query_as::<_, InvoiceFormRow>(
                    r#"
                    SELECT id, customer_id, amount, status, date
                    FROM invoices
                    WHERE id = $1
                    "#,
                )
                .bind(invoice_id)
                .fetch_optional(self.pool()),
            )
            .await
            .map_err(|e| fail(DataFetchError::Invoice, e))?;

        row.map(InvoiceForm::try_from)
            .transpose()
            .map_err(|e| fail(DataFetchError::Invoice, e.into()))
    }

    /// Every customer, alphabetically.
    #[instrument(skip(self))]
    pub async fn fetch_customers(&self) -> Result<Vec<CustomerField>, DataFetchError> {
        self.timed(
            "fetch_customers",
            sqlx::query_as::<_, CustomerField>(
                r#"
                SELECT id, name
                FROM customers
                ORDER BY name ASC
                "#,
            )
            .fetch_all(self.pool()),
        )
        .await
        .map_err(|e| fail(DataFetchError::Customers, e))
    }

    /// Customers whose name or email contains `query`, with invoice totals.
    #[instrument(skip(self))]
    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
    ) -> Result<Vec<FormattedCustomersTable>, DataFetchError> {
        let rows = self
            .timed(
                "fetch_filtered_customers",
                sqlx::query_as::<_, CustomersTableRow>(
                    r#"
                    SELECT
                        customers.id,
                        customers.name,
                        customers.email,
                        customers.image_url,
                        COUNT(invoices.id) AS total_invoices,
                        COALESCE(SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END), 0)::BIGINT AS total_pending,
                        COALESCE(SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END), 0)::BIGINT AS total_paid
                    FROM customers
                    LEFT JOIN invoices ON customers.id = invoices.customer_id
                    WHERE customers.name ILIKE $1
                       OR customers.email ILIKE $1
                    GROUP BY customers.id, customers.name, customers.email, customers.image_url
                    ORDER BY customers.name ASC
                    "#,
                )
                .bind(contains_pattern(query))
                .fetch_all(self.pool()),
            )
            .await
            .map_err(|e| fail(DataFetchError::CustomerTable, e))?;

        Ok(rows.into_iter().map(FormattedCustomersTable::from).collect())
    }
}
