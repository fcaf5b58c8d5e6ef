use crate::db;
use crate::models::{self, Creator, NewProduct, ProductChanges, ProductImage, ProductRecord};
use crate::services::query::{contains_pattern, ProductFilter, Window};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use std::collections::HashMap;
use tracing::Instrument;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = r#"
    p.id, p.name, p.description, p.price, p.category, p.brand, p.stock,
    p.creator_id, p.created_at, p.updated_at
"#;

#[derive(sqlx::FromRow)]
struct ProductRow {
    #[sqlx(flatten)]
    product: models::Product,
    creator_name: Option<String>,
}

impl ProductRow {
    fn into_record(self, images: Vec<ProductImage>) -> ProductRecord {
        let creator = match (&self.product.creator_id, self.creator_name) {
            (Some(id), Some(name)) => Some(Creator { id: id.clone(), name }),
            _ => None,
        };

        ProductRecord {
            product: self.product,
            images,
            creator,
        }
    }
}

/// Appends the WHERE clause for `filter`. Count and page queries both go
/// through here.
fn push_predicate(builder: &mut QueryBuilder<'static, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE TRUE");

    if let Some(category) = &filter.category {
        builder.push(" AND p.category = ").push_bind(category.clone());
    }

    if let Some(brand) = &filter.brand {
        builder
            .push(" AND p.brand ILIKE ")
            .push_bind(contains_pattern(brand));
    }

    if let Some(range) = &filter.price {
        if let Some(min) = range.min {
            builder.push(" AND p.price >= ").push_bind(min);
        }
        if let Some(max) = range.max {
            builder.push(" AND p.price <= ").push_bind(max);
        }
    }

    if let Some(term) = &filter.search {
        let pattern = contains_pattern(term);
        builder
            .push(" AND (p.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR p.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn select_with_creator() -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!(
        "SELECT {PRODUCT_COLUMNS}, u.name AS creator_name \
         FROM products p LEFT JOIN users u ON u.id = p.creator_id"
    ))
}

pub async fn count(pool: &PgPool, filter: &ProductFilter) -> Result<i64, sqlx::Error> {
    let query_span = tracing::info_span!("Count products.", ?filter);
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products p");
    push_predicate(&mut builder, filter);

    builder
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count products: {:?}", err);
            err
        })
}

pub async fn fetch_page(
    pool: &PgPool,
    filter: &ProductFilter,
    window: Window,
) -> Result<Vec<ProductRecord>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetch products page.", ?filter, skip = window.skip, take = window.take);
    let mut builder = select_with_creator();
    push_predicate(&mut builder, filter);
    builder
        .push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
        .push_bind(window.take)
        .push(" OFFSET ")
        .push_bind(window.skip);

    let rows = builder
        .build_query_as::<ProductRow>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch products: {:?}", err);
            err
        })?;

    let ids: Vec<Uuid> = rows.iter().map(|row| row.product.id).collect();
    let mut images: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
    for image in db::image::fetch_by_products(pool, &ids).await? {
        images.entry(image.product_id).or_default().push(image);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let product_images = images.remove(&row.product.id).unwrap_or_default();
            row.into_record(product_images)
        })
        .collect())
}

pub async fn fetch(pool: &PgPool, id: Uuid) -> Result<Option<ProductRecord>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetch product.", product_id = %id);
    let mut builder = select_with_creator();
    builder.push(" WHERE p.id = ").push_bind(id);

    let row = builder
        .build_query_as::<ProductRow>()
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product: {:?}", err);
            err
        })?;

    match row {
        Some(row) => {
            let images = db::image::fetch_by_product(pool, id).await?;
            Ok(Some(row.into_record(images)))
        }
        None => Ok(None),
    }
}

pub async fn insert(pool: &PgPool, new_product: NewProduct) -> Result<ProductRecord, sqlx::Error> {
    let mut tx = pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {:?}", err);
        err
    })?;

    let id = insert_in(&mut tx, &new_product).await?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {:?}", err);
        err
    })?;
    tracing::info!("New product {} has been saved to database", id);

    fetch(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Inserts every product in a single transaction. Nothing is kept if one fails.
pub async fn insert_many(pool: &PgPool, products: &[NewProduct]) -> Result<Vec<Uuid>, sqlx::Error> {
    let mut tx = pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {:?}", err);
        err
    })?;

    let mut ids = Vec::with_capacity(products.len());
    for new_product in products {
        ids.push(insert_in(&mut tx, new_product).await?);
    }

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {:?}", err);
        err
    })?;
    tracing::info!("{} products have been saved to database", ids.len());

    Ok(ids)
}

// clock_timestamp() keeps rows from one transaction in insertion order
async fn insert_in(
    tx: &mut Transaction<'_, Postgres>,
    new_product: &NewProduct,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let query_span = tracing::info_span!("Saving new product into the database.", product_id = %id);

    sqlx::query(
        r#"
        INSERT INTO products (id, name, description, price, category, brand, stock, creator_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, clock_timestamp(), clock_timestamp())
        "#,
    )
    .bind(id)
    .bind(&new_product.name)
    .bind(&new_product.description)
    .bind(new_product.price)
    .bind(&new_product.category)
    .bind(&new_product.brand)
    .bind(new_product.stock)
    .bind(&new_product.creator_id)
    .execute(&mut **tx)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to insert product: {:?}", err);
        err
    })?;

    db::image::insert_all(tx, id, &new_product.name, &new_product.images).await?;

    Ok(id)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    changes: ProductChanges,
) -> Result<Option<ProductRecord>, sqlx::Error> {
    let query_span = tracing::info_span!("Updating product.", product_id = %id);

    let mut tx = pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {:?}", err);
        err
    })?;

    let current = sqlx::query_as::<_, models::Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .instrument(query_span.clone())
    .await?;

    let mut product = match current {
        Some(product) => product,
        None => {
            tx.rollback().await?;
            return Ok(None);
        }
    };
    changes.apply(&mut product);

    sqlx::query(
        r#"
        UPDATE products
        SET
            name=$2,
            description=$3,
            price=$4,
            category=$5,
            brand=$6,
            stock=$7,
            updated_at=NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(&product.category)
    .bind(&product.brand)
    .bind(product.stock)
    .execute(&mut *tx)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to update product: {:?}", err);
        err
    })?;

    // replace, never merge: the old set must not survive next to the new one
    if let Some(images) = &changes.images {
        db::image::delete_by_product(&mut tx, id).await?;
        db::image::insert_all(&mut tx, id, &product.name, images).await?;
    }

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {:?}", err);
        err
    })?;
    tracing::info!("Product {} has been updated", id);

    fetch(pool, id).await
}

#[tracing::instrument(name = "Delete product.", skip(pool))]
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    // product_images rows go through ON DELETE CASCADE
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete product: {:?}", err);
            err
        })
}

#[tracing::instrument(name = "Delete all products.", skip(pool))]
pub async fn delete_all(pool: &PgPool) -> Result<(u64, u64), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let images = sqlx::query("DELETE FROM product_images")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let products = sqlx::query("DELETE FROM products")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok((products, images))
}

pub async fn distinct_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetch distinct categories.");
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT category FROM products
        WHERE category IS NOT NULL AND category <> ''
        ORDER BY category
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch categories: {:?}", err);
        err
    })
}

pub async fn distinct_brands(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    let query_span = tracing::info_span!("Fetch distinct brands.");
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT brand FROM products
        WHERE brand IS NOT NULL AND brand <> ''
        ORDER BY brand
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch brands: {:?}", err);
        err
    })
}
