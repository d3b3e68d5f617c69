use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    entity::{product, product_image},
    error::{ProductError, ProductResult},
    models::Product,
    repository::ProductRepository,
};

/// PostgreSQL adapter. Every multi-statement write runs in its own transaction.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Load the images of `models` in one query and attach them in position order
    async fn with_images<C: ConnectionTrait>(
        conn: &C,
        models: Vec<product::Model>,
    ) -> Result<Vec<Product>, DbErr> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut images: HashMap<Uuid, Vec<product_image::Model>> = HashMap::new();
        for image in product_image::Entity::find()
            .filter(product_image::Column::ProductId.is_in(ids))
            .order_by_asc(product_image::Column::Position)
            .all(conn)
            .await?
        {
            images.entry(image.product_id).or_default().push(image);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let owned = images.remove(&model.id).unwrap_or_default();
                model.into_product(owned)
            })
            .collect())
    }

    /// Roll back after a failed statement. The statement's error is returned
    /// even when the rollback fails too.
    async fn abort(txn: DatabaseTransaction, err: DbErr) -> DbErr {
        if let Err(rollback_err) = txn.rollback().await {
            tracing::error!(error = %rollback_err, cause = %err, "Transaction rollback failed");
        }
        err
    }

    async fn one_with_images(&self, model: Option<product::Model>) -> ProductResult<Option<Product>> {
        match model {
            Some(model) => Ok(Self::with_images(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        let txn = self.db.begin().await?;

        let inserted = product::ActiveModel::from(&product).insert(&txn).await;
        let model = match inserted {
            Ok(model) => model,
            Err(e) => return Err(Self::abort(txn, e).await.into()),
        };

        if !product.images.is_empty() {
            let images = product.images.iter().map(product_image::ActiveModel::from);
            if let Err(e) = product_image::Entity::insert_many(images).exec(&txn).await {
                return Err(Self::abort(txn, e).await.into());
            }
        }

        txn.commit().await?;

        tracing::info!(product_id = %model.id, images = product.images.len(), "Created product");
        Ok(Product {
            images: product.images,
            ..model.into_product(Vec::new())
        })
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        self.one_with_images(model).await
    }

    async fn get_by_title_or_slug(&self, term: &str) -> ProductResult<Option<Product>> {
        let model = product::Entity::find()
            .filter(Expr::cust_with_values(
                r#"LOWER("products"."title") = LOWER($1) OR LOWER("products"."slug") = LOWER($2)"#,
                [term, term],
            ))
            .order_by_asc(product::Column::Id)
            .one(&self.db)
            .await?;

        self.one_with_images(model).await
    }

    async fn list_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok(Self::with_images(&self.db, models).await?)
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let txn = self.db.begin().await?;

        match product::ActiveModel::from(&product).update(&txn).await {
            Ok(model) => {
                txn.commit().await?;
                tracing::info!(product_id = %model.id, "Updated product");
                Ok(Product {
                    images: product.images,
                    ..model.into_product(Vec::new())
                })
            }
            Err(e) => {
                let e = Self::abort(txn, e).await;
                tracing::warn!(product_id = %product.id, error = %e, "Rolled back product update");
                match e {
                    DbErr::RecordNotUpdated => Err(ProductError::not_found_id(product.id)),
                    other => Err(other.into()),
                }
            }
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> ProductResult<u64> {
        let txn = self.db.begin().await?;

        let result = async {
            product_image::Entity::delete_many()
                .filter(product_image::Column::ProductId.eq(id))
                .exec(&txn)
                .await?;
            product::Entity::delete_by_id(id).exec(&txn).await
        }
        .await;

        match result {
            Ok(deleted) => {
                txn.commit().await?;
                if deleted.rows_affected > 0 {
                    tracing::info!(product_id = %id, "Deleted product");
                }
                Ok(deleted.rows_affected)
            }
            Err(e) => Err(Self::abort(txn, e).await.into()),
        }
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let txn = self.db.begin().await?;

        let result = async {
            product_image::Entity::delete_many().exec(&txn).await?;
            product::Entity::delete_many().exec(&txn).await
        }
        .await;

        match result {
            Ok(deleted) => {
                txn.commit().await?;
                tracing::info!(count = deleted.rows_affected, "Deleted all products");
                Ok(deleted.rows_affected)
            }
            Err(e) => Err(Self::abort(txn, e).await.into()),
        }
    }
}
