use sea_orm::{
    entity::prelude::*, ActiveValue::{NotSet, Set}, ConnectionTrait, DatabaseConnection, IntoActiveModel,
    QueryOrder, Statement,
};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};

/// Row shape of the `product` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub observation: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Persisted product entity.
///
/// `id` is assigned by the store and stays `None` until the first save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i32>,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub observation: Option<String>,
}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name,
            quantity: m.quantity,
            price: m.price,
            observation: m.observation,
        }
    }
}

impl IntoActiveModel<ActiveModel> for Product {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: self.id.map_or(NotSet, Set),
            name: Set(self.name),
            quantity: Set(self.quantity),
            price: Set(self.price),
            observation: Set(self.observation),
        }
    }
}

fn db_err(e: DbErr) -> ModelError {
    errors::ModelError::Db(e.to_string())
}

/// All products in id order.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Product>, ModelError> {
    let rows = Entity::find().order_by_asc(Column::Id).all(db).await.map_err(db_err)?;
    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Product>, ModelError> {
    let row = Entity::find_by_id(id).one(db).await.map_err(db_err)?;
    Ok(row.map(Product::from))
}

/// Moves the `id` sequence past every stored id. Never moves it backwards, so
/// ids of deleted rows are not handed out again.
const SYNC_ID_SEQUENCE: &str = "SELECT setval(s.seq::regclass, \
    GREATEST((SELECT MAX(id) FROM product), pg_sequence_last_value(s.seq::regclass), 1)) \
    FROM (SELECT pg_get_serial_sequence('product', 'id') AS seq) s";

/// Insert-or-update. Without an id the database sequence assigns one; with an
/// id the row is updated when present and inserted under that id otherwise.
/// An insert under an explicit id advances the sequence so later inserts
/// without an id do not collide with it.
pub async fn save(db: &DatabaseConnection, product: Product) -> Result<Product, ModelError> {
    let explicit_id = product.id;
    let existing = match explicit_id {
        Some(id) => Entity::find_by_id(id).one(db).await.map_err(db_err)?,
        None => None,
    };
    let am = product.into_active_model();
    let saved = match existing {
        Some(_) => am.update(db).await.map_err(db_err)?,
        None => {
            let row = am.insert(db).await.map_err(db_err)?;
            if explicit_id.is_some() {
                sync_id_sequence(db).await?;
            }
            row
        }
    };
    Ok(saved.into())
}

async fn sync_id_sequence(db: &DatabaseConnection) -> Result<(), ModelError> {
    let stmt = Statement::from_string(db.get_database_backend(), SYNC_ID_SEQUENCE);
    db.execute(stmt).await.map_err(db_err)?;
    Ok(())
}

/// Returns whether a row was removed.
pub async fn delete_by_id(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(res.rows_affected > 0)
}
