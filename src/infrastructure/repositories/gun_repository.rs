//! Gun Repository Implementation
//!
//! PostgreSQL implementation of the gun inventory. The list query is
//! assembled with `sqlx::QueryBuilder`: filter values are always bound as
//! parameters and the sort column comes from a fixed whitelist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::value_objects::escape_like;
use crate::domain::{
    Gun, GunChanges, GunFilter, GunListQuery, GunRepository, GunSortField, NewGun, Page,
};
use crate::shared::error::AppError;

const GUN_COLUMNS: &str = "id, name, manufacturer, price, damage, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct GunRow {
    id: i64,
    name: String,
    manufacturer: String,
    price: f64,
    damage: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GunRow {
    fn into_gun(self) -> Gun {
        Gun {
            id: self.id,
            name: self.name,
            manufacturer: self.manufacturer,
            price: self.price,
            damage: self.damage,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL gun repository implementation.
#[derive(Clone)]
pub struct PgGunRepository {
    pool: PgPool,
}

impl PgGunRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, first: &mut bool) {
    builder.push(if *first { " WHERE " } else { " AND " });
    *first = false;
}

/// Append the WHERE clause for `filter`. Shared by the page and count queries
/// so both always see the same rows.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &GunFilter) {
    let mut first = true;

    if let Some(name) = &filter.name {
        push_condition(builder, &mut first);
        builder
            .push("name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
    }
    if let Some(manufacturer) = &filter.manufacturer {
        push_condition(builder, &mut first);
        builder
            .push("manufacturer ILIKE ")
            .push_bind(format!("%{}%", escape_like(manufacturer)));
    }
    if let Some(min_price) = filter.min_price {
        push_condition(builder, &mut first);
        builder.push("price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        push_condition(builder, &mut first);
        builder.push("price <= ").push_bind(max_price);
    }
    if let Some(min_damage) = filter.min_damage {
        push_condition(builder, &mut first);
        builder.push("damage >= ").push_bind(min_damage);
    }
    if let Some(max_damage) = filter.max_damage {
        push_condition(builder, &mut first);
        builder.push("damage <= ").push_bind(max_damage);
    }
}

/// SELECT for one page of guns.
fn build_page_query(query: &GunListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {GUN_COLUMNS} FROM guns"));
    push_filters(&mut builder, &query.filter);

    let direction = query.order.as_sql();
    builder
        .push(" ORDER BY ")
        .push(query.sort.column())
        .push(" ")
        .push(direction);
    // id breaks ties so rows never move between pages
    if query.sort != GunSortField::Id {
        builder.push(", id ").push(direction);
    }

    builder
        .push(" LIMIT ")
        .push_bind(query.pagination.limit())
        .push(" OFFSET ")
        .push_bind(query.pagination.offset());
    builder
}

/// SELECT COUNT(*) over the same filter as the page query.
fn build_count_query(filter: &GunFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM guns");
    push_filters(&mut builder, filter);
    builder
}

#[async_trait]
impl GunRepository for PgGunRepository {
    async fn list(&self, query: &GunListQuery) -> Result<Page<Gun>, AppError> {
        let rows = build_page_query(query)
            .build_query_as::<GunRow>()
            .fetch_all(&self.pool)
            .await?;

        let total = build_count_query(&query.filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(GunRow::into_gun).collect(),
            total,
            query.pagination,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Gun>, AppError> {
        let row = sqlx::query_as::<_, GunRow>(&format!(
            "SELECT {GUN_COLUMNS} FROM guns WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GunRow::into_gun))
    }

    async fn create(&self, gun: &NewGun) -> Result<Gun, AppError> {
        let row = sqlx::query_as::<_, GunRow>(&format!(
            r#"
            INSERT INTO guns (name, manufacturer, price, damage)
            VALUES ($1, $2, $3, $4)
            RETURNING {GUN_COLUMNS}
            "#
        ))
        .bind(&gun.name)
        .bind(&gun.manufacturer)
        .bind(gun.price)
        .bind(gun.damage)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_gun())
    }

    async fn update(&self, id: i64, changes: &GunChanges) -> Result<Option<Gun>, AppError> {
        let row = sqlx::query_as::<_, GunRow>(&format!(
            r#"
            UPDATE guns
            SET name = COALESCE($2, name),
                manufacturer = COALESCE($3, manufacturer),
                price = COALESCE($4, price),
                damage = COALESCE($5, damage),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {GUN_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.manufacturer)
        .bind(changes.price)
        .bind(changes.damage)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GunRow::into_gun))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM guns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
