//! Seed loader integration tests for dashboard-service.

mod common;

use chrono::NaiveDate;
use common::{fresh_database, row_count};
use dashboard_service::models::{Customer, Invoice, InvoiceStatus, Revenue, User};
use dashboard_service::services::seed::EVIL_RABBIT_ID;
use dashboard_service::services::{SeedData, SeedReport};
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn seeding_inserts_every_sample_row() {
    let Some(db) = fresh_database().await else {
        return;
    };

    let report = db.seed(&SeedData::sample()).await.expect("Seeding failed");

    assert_eq!(
        report,
        SeedReport {
            users: 1,
            customers: 6,
            invoices: 8,
            revenue: 12,
        }
    );
    assert_eq!(row_count(&db, "users").await, 1);
    assert_eq!(row_count(&db, "customers").await, 6);
    assert_eq!(row_count(&db, "invoices").await, 8);
    assert_eq!(row_count(&db, "revenue").await, 12);

    db.close().await;
}

#[tokio::test]
#[serial]
async fn seeding_twice_skips_existing_rows() {
    let Some(db) = fresh_database().await else {
        return;
    };

    let first = db.seed(&SeedData::sample()).await.expect("First seed failed");
    let second = db.seed(&SeedData::sample()).await.expect("Second seed failed");

    assert_eq!(first.total(), 27);
    assert_eq!(second, SeedReport::default());
    assert_eq!(row_count(&db, "users").await, 1);
    assert_eq!(row_count(&db, "customers").await, 6);
    assert_eq!(row_count(&db, "invoices").await, 8);
    assert_eq!(row_count(&db, "revenue").await, 12);

    db.close().await;
}

#[tokio::test]
#[serial]
async fn seeding_never_updates_existing_rows() {
    let Some(db) = fresh_database().await else {
        return;
    };
    db.seed(&SeedData::sample()).await.expect("Seeding failed");

    let mut changed = SeedData::sample();
    changed.customers[0].name = "Renamed Rabbit".to_string();
    changed.revenue[0].revenue = 1;

    let report = db.seed(&changed).await.expect("Reseeding failed");
    assert_eq!(report.total(), 0);

    let name: String = sqlx::query_scalar("SELECT name FROM customers WHERE id = $1")
        .bind(EVIL_RABBIT_ID)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(name, "Evil Rabbit");

    let january: i32 = sqlx::query_scalar("SELECT revenue FROM revenue WHERE month = 'Jan'")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(january, 2000);

    db.close().await;
}

#[tokio::test]
#[serial]
async fn seeded_password_is_hashed() {
    let Some(db) = fresh_database().await else {
        return;
    };
    db.seed(&SeedData::sample()).await.expect("Seeding failed");

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password FROM users WHERE email = 'user@nextmail.com'",
    )
    .fetch_one(db.pool())
    .await
    .unwrap();

    assert_eq!(user.name, "User");
    assert!(user.password.starts_with("$argon2id$"));
    assert_ne!(user.password, "123456");

    db.close().await;
}

#[tokio::test]
#[serial]
async fn invoice_for_unknown_customer_fails_seeding() {
    let Some(db) = fresh_database().await else {
        return;
    };

    let data = SeedData {
        users: Vec::new(),
        customers: vec![Customer {
            id: Uuid::new_v4(),
            name: "Known Customer".to_string(),
            email: "known@example.com".to_string(),
            image_url: "/customers/known.png".to_string(),
        }],
        invoices: vec![Invoice {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            amount: 100,
            status: InvoiceStatus::Paid,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }],
        revenue: vec![Revenue {
            month: "Jan".to_string(),
            revenue: 10,
        }],
    };

    let result = db.seed(&data).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to seed invoices"));
    // Tables before the failing one were written; later ones were not reached.
    assert_eq!(row_count(&db, "customers").await, 1);
    assert_eq!(row_count(&db, "revenue").await, 0);

    db.close().await;
}
