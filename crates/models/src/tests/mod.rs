//! Database-backed tests for the `product` table helpers.
//! They need a reachable Postgres (`DATABASE_URL`); set `SKIP_DB_TESTS` to skip.

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use crate::db::connect;
use crate::product::{self, Product};

async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

fn sample(name: &str) -> Product {
    Product { id: None, name: name.to_string(), quantity: 10, price: 19.9, observation: Some("db test".into()) }
}

#[tokio::test]
async fn test_product_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let created = product::save(&db, sample("crud widget")).await?;
    let id = created.id.expect("sequence assigns an id");

    let found = product::find_by_id(&db, id).await?;
    assert_eq!(found.as_ref().map(|p| p.name.as_str()), Some("crud widget"));

    let mut changed = created.clone();
    changed.quantity = 42;
    let updated = product::save(&db, changed).await?;
    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.quantity, 42);

    assert!(product::find_all(&db).await?.iter().any(|p| p.id == Some(id)));

    assert!(product::delete_by_id(&db, id).await?);
    assert!(!product::delete_by_id(&db, id).await?);
    assert!(product::find_by_id(&db, id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_ids_are_distinct() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let a = product::save(&db, sample("first")).await?;
    let b = product::save(&db, sample("second")).await?;
    assert_ne!(a.id, b.id);

    for p in [a, b] {
        if let Some(id) = p.id {
            product::delete_by_id(&db, id).await?;
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_explicit_id_insert_advances_sequence() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let max = product::find_all(&db).await?.iter().filter_map(|p| p.id).max().unwrap_or(0);
    let explicit = product::save(&db, Product { id: Some(max + 5), ..sample("explicit id") }).await?;
    assert_eq!(explicit.id, Some(max + 5));

    let generated = product::save(&db, sample("after explicit id")).await?;
    let generated_id = generated.id.expect("sequence assigns an id");
    assert!(generated_id > max + 5, "generated id {generated_id} must be past {}", max + 5);

    product::delete_by_id(&db, max + 5).await?;
    product::delete_by_id(&db, generated_id).await?;
    Ok(())
}
