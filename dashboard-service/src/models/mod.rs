//! Domain models for dashboard-service.

mod customer;
mod invoice;
mod revenue;
mod user;

pub use customer::{Customer, CustomerField, CustomersTableRow, FormattedCustomersTable};
pub use invoice::{
    CardData, Invoice, InvoiceForm, InvoiceFormRow, InvoiceStatus, InvoicesTable,
    InvoicesTableRow, LatestInvoice, LatestInvoiceRow, StatusTotalRow, StatusTotals,
    UnknownInvoiceStatus,
};
pub use revenue::Revenue;
pub use user::User;
