//! Sample dataset and the idempotent seed loader.
//!
//! Each table is written with one bulk `INSERT ... ON CONFLICT DO NOTHING`,
//! so rows that already exist are skipped and never updated. Tables are
//! written in dependency order: users, customers, invoices, revenue.

use crate::models::{Customer, Invoice, InvoiceStatus, Revenue};
use crate::services::database::Database;
use crate::services::metrics::SEED_ROWS_INSERTED;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use chrono::NaiveDate;
use service_core::error::AppError;
use sqlx::{Postgres, QueryBuilder};
use tracing::{info, instrument};
use uuid::{uuid, Uuid};

/// A user to seed. The password is hashed before it is stored.
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Rows written by [`Database::seed`].
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<SeedUser>,
    pub customers: Vec<Customer>,
    pub invoices: Vec<Invoice>,
    pub revenue: Vec<Revenue>,
}

/// Rows actually inserted per table; the rest already existed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users: u64,
    pub customers: u64,
    pub invoices: u64,
    pub revenue: u64,
}

impl SeedReport {
    pub fn total(&self) -> u64 {
        self.users + self.customers + self.invoices + self.revenue
    }
}

pub const EVIL_RABBIT_ID: Uuid = uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa");
pub const DELBA_DE_OLIVEIRA_ID: Uuid = uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a");
pub const LEE_ROBINSON_ID: Uuid = uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a");
pub const MICHAEL_NOVOTNY_ID: Uuid = uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2");
pub const AMY_BURNS_ID: Uuid = uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9");
pub const BALAZS_ORBAN_ID: Uuid = uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb");

/// Evil Rabbit's $157.95 pending invoice from 2022-12-06.
pub const EVIL_RABBIT_DECEMBER_INVOICE_ID: Uuid = uuid!("5f0b3c4e-1a2d-4c6e-9b8a-7d1e2f3a4b01");

fn customer(id: Uuid, name: &str, email: &str, image_url: &str) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        email: email.to_string(),
        image_url: image_url.to_string(),
    }
}

fn invoice(id: Uuid, customer_id: Uuid, amount: i32, status: InvoiceStatus, date: &str) -> Invoice {
    Invoice {
        id,
        customer_id,
        amount,
        status,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_default(),
    }
}

impl SeedData {
    /// The fixed dashboard sample dataset.
    pub fn sample() -> Self {
        use InvoiceStatus::{Paid, Pending};

        let users = vec![SeedUser {
            id: uuid!("410544b2-4001-4271-9855-fec4b6a6442a"),
            name: "User".to_string(),
            email: "user@nextmail.com".to_string(),
            password: "123456".to_string(),
        }];

        let customers = vec![
            customer(
                EVIL_RABBIT_ID,
                "Evil Rabbit",
                "evil@rabbit.com",
                "/customers/evil-rabbit.png",
            ),
            customer(
                DELBA_DE_OLIVEIRA_ID,
                "Delba de Oliveira",
                "delba@oliveira.com",
                "/customers/delba-de-oliveira.png",
            ),
            customer(
                LEE_ROBINSON_ID,
                "Lee Robinson",
                "lee@robinson.com",
                "/customers/lee-robinson.png",
            ),
            customer(
                MICHAEL_NOVOTNY_ID,
                "Michael Novotny",
                "michael@novotny.com",
                "/customers/michael-novotny.png",
            ),
            customer(
                AMY_BURNS_ID,
                "Amy Burns",
                "amy@burns.com",
                "/customers/amy-burns.png",
            ),
            customer(
                BALAZS_ORBAN_ID,
                "Balazs Orban",
                "balazs@orban.com",
                "/customers/balazs-orban.png",
            ),
        ];

        let invoices = vec![
            invoice(EVIL_RABBIT_DECEMBER_INVOICE_ID, EVIL_RABBIT_ID, 15795, Pending, "2022-12-06"),
            invoice(uuid!("5f0b3c4e-1a2d-4c6e-9b8a-7d1e2f3a4b02"), DELBA_DE_OLIVEIRA_ID, 20348, Pending, "2022-11-14"),
            invoice(uuid!("5f0b3c4e-1a2d-4c6e-9b8a-7d1e2f3a4b03"), AMY_BURNS_ID, 3040, Paid, "2022-10-29"),
            invoice(uuid!("5f0b3c4e-1a2d-4c6e-9b8a-7d1e2f3a4b04"), MICHAEL_NOVOTNY_ID, 44800, Paid, "2023-09-10"),
            invoice(uuid!("5f0b3c4e-1a2d-4c6e-9b8a-7d1e2f3a4b05"), BALAZS_ORBAN_ID, 34577, Pending, "2023-08-05"),
            invoice(uuid!("5f0b3c4e-1a2d-4c6e-9b8a-7d1e2f3a4b06"), LEE_ROBINSON_ID, 54246, Pending, "2023-07-16"),
            invoice(uuid!("5f0b3c4e-1a2d-4c6e-9b8a-7d1e2f3a4b07"), EVIL_RABBIT_ID, 666, Pending, "2023-06-27"),
            invoice(uuid!("5f0b3c4e-1a2d-4c6e-9b8a-7d1e2f3a4b08"), MICHAEL_NOVOTNY_ID, 32545, Paid, "2023-06-09"),
        ];

        let revenue = [
            ("Jan", 2000),
            ("Feb", 1800),
            ("Mar", 2200),
            ("Apr", 2500),
            ("May", 2300),
            ("Jun", 3200),
            ("Jul", 3500),
            ("Aug", 3700),
            ("Sep", 2500),
            ("Oct", 2800),
            ("Nov", 3000),
            ("Dec", 4800),
        ]
        .into_iter()
        .map(|(month, revenue)| Revenue {
            month: month.to_string(),
            revenue,
        })
        .collect();

        Self {
            users,
            customers,
            invoices,
            revenue,
        }
    }
}

/// Hash a password with Argon2id and a random salt.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to hash password: {}", e)))
}

impl Database {
    /// Insert `data`, skipping rows whose key already exists.
    #[instrument(skip(self, data))]
    pub async fn seed(&self, data: &SeedData) -> Result<SeedReport, AppError> {
        let report = SeedReport {
            users: self.seed_users(&data.users).await?,
            customers: self.seed_customers(&data.customers).await?,
            invoices: self.seed_invoices(&data.invoices).await?,
            revenue: self.seed_revenue(&data.revenue).await?,
        };

        info!(
            users = report.users,
            customers = report.customers,
            invoices = report.invoices,
            revenue = report.revenue,
            "Seed data written"
        );

        Ok(report)
    }

    async fn seed_users(&self, users: &[SeedUser]) -> Result<u64, AppError> {
        if users.is_empty() {
            return Ok(0);
        }

        let hashed = users
            .iter()
            .map(|user| hash_password(&user.password).map(|hash| (user, hash)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO users (id, name, email, password) ");
        builder.push_values(&hashed, |mut row, (user, hash)| {
            row.push_bind(user.id)
                .push_bind(&user.name)
                .push_bind(&user.email)
                .push_bind(hash);
        });
        builder.push(" ON CONFLICT DO NOTHING");

        self.execute_seed("users", users.len(), builder).await
    }

    async fn seed_customers(&self, customers: &[Customer]) -> Result<u64, AppError> {
        if customers.is_empty() {
            return Ok(0);
        }

        let mut builder =
            QueryBuilder::<Postgres>::new("INSERT INTO customers (id, name, email, image_url) ");
        builder.push_values(customers, |mut row, customer| {
            row.push_bind(customer.id)
                .push_bind(&customer.name)
                .push_bind(&customer.email)
                .push_bind(&customer.image_url);
        });
        builder.push(" ON CONFLICT DO NOTHING");

        self.execute_seed("customers", customers.len(), builder).await
    }

    async fn seed_invoices(&self, invoices: &[Invoice]) -> Result<u64, AppError> {
        if invoices.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Postgres>::new(
            "INSERT INTO invoices (id, customer_id, amount, status, date) ",
        );
        builder.push_values(invoices, |mut row, invoice| {
            row.push_bind(invoice.id)
                .push_bind(invoice.customer_id)
                .push_bind(invoice.amount)
                .push_bind(invoice.status.as_str())
                .push_bind(invoice.date);
        });
        builder.push(" ON CONFLICT DO NOTHING");

        self.execute_seed("invoices", invoices.len(), builder).await
    }

    async fn seed_revenue(&self, revenue: &[Revenue]) -> Result<u64, AppError> {
        if revenue.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO revenue (month, revenue) ");
        builder.push_values(revenue, |mut row, month| {
            row.push_bind(&month.month).push_bind(month.revenue);
        });
        builder.push(" ON CONFLICT DO NOTHING");

        self.execute_seed("revenue", revenue.len(), builder).await
    }

    async fn execute_seed(
        &self,
        table: &'static str,
        offered: usize,
        mut builder: QueryBuilder<'_, Postgres>,
    ) -> Result<u64, AppError> {
        let result = self
            .timed(table, builder.build().execute(self.pool()))
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to seed {}: {}", table, e))
            })?;

        let inserted = result.rows_affected();
        SEED_ROWS_INSERTED
            .with_label_values(&[table])
            .inc_by(inserted as f64);

        info!(
            table,
            inserted,
            skipped = (offered as u64).saturating_sub(inserted),
            "Seeded table"
        );

        Ok(inserted)
    }
}
