// src/infrastructure/repositories/catalog/postgres.rs
use super::columns::{LinkTable, PgCatalogFields};
use crate::domain::catalog::{
    CatalogEntry, CatalogId, CatalogKind, CatalogReferenceChecker, CatalogRepository,
    NewCatalogEntry,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::Slug;
use crate::infrastructure::repositories::{map_sqlx, map_sqlx_for_slug};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use std::marker::PhantomData;
use uuid::Uuid;

const BASE_COLUMNS: &str = "id, slug, created_at, modified_at";

/// Lookup columns are limited to the slug and the table's own columns.
fn lookup_column(
    table: &str,
    columns: &'static [&'static str],
    field: &str,
) -> DomainResult<&'static str> {
    if field == "slug" {
        return Ok("slug");
    }
    columns
        .iter()
        .copied()
        .find(|column| *column == field)
        .ok_or_else(|| {
            DomainError::Configuration(format!(
                "{table} has no field '{field}' to look slugs up by"
            ))
        })
}

/// One catalog table, selected by the field type.
pub struct PostgresCatalogRepository<F> {
    pool: PgPool,
    _fields: PhantomData<fn() -> F>,
}

impl<F> Clone for PostgresCatalogRepository<F> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _fields: PhantomData,
        }
    }
}

impl<F: PgCatalogFields> PostgresCatalogRepository<F> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _fields: PhantomData,
        }
    }

    fn table() -> &'static str {
        F::KIND.table()
    }

    fn select() -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(BASE_COLUMNS);
        for column in F::COLUMNS {
            builder.push(", ");
            builder.push(*column);
        }
        for link in F::LINKS {
            builder.push(format!(
                ", ARRAY(SELECT l.{target} FROM {table} l WHERE l.{owner} = t.id \
                 ORDER BY l.position) AS {field}",
                target = link.target_column,
                table = link.table,
                owner = link.owner_column,
                field = link.field,
            ));
        }
        builder.push(" FROM ");
        builder.push(Self::table());
        builder.push(" t");
        builder
    }

    fn entry_from_row(row: &PgRow) -> DomainResult<CatalogEntry<F>> {
        let id: Uuid = row.try_get("id").map_err(map_sqlx)?;
        let slug: String = row.try_get("slug").map_err(map_sqlx)?;
        Ok(CatalogEntry {
            id: CatalogId(id),
            slug: Slug::new(slug)?,
            created_at: row.try_get("created_at").map_err(map_sqlx)?,
            modified_at: row.try_get("modified_at").map_err(map_sqlx)?,
            fields: F::from_row(row)?,
        })
    }

    async fn fetch_by_id(conn: &mut PgConnection, id: Uuid) -> DomainResult<CatalogEntry<F>> {
        let mut builder = Self::select();
        builder.push(" WHERE t.id = ");
        builder.push_bind(id);

        let row = builder
            .build()
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx)?;
        Self::entry_from_row(&row)
    }

    /// Replaces the join table rows of `owner` with `fields`' reference lists.
    async fn write_links(conn: &mut PgConnection, owner: Uuid, fields: &F) -> DomainResult<()> {
        for (link, ids) in F::LINKS.iter().zip(fields.link_ids()) {
            Self::replace_link(conn, link, owner, ids).await?;
        }
        Ok(())
    }

    async fn replace_link(
        conn: &mut PgConnection,
        link: &LinkTable,
        owner: Uuid,
        ids: Vec<Uuid>,
    ) -> DomainResult<()> {
        let mut delete: QueryBuilder<Postgres> = QueryBuilder::new("DELETE FROM ");
        delete.push(link.table);
        delete.push(" WHERE ");
        delete.push(link.owner_column);
        delete.push(" = ");
        delete.push_bind(owner);
        delete
            .build()
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx)?;

        if ids.is_empty() {
            return Ok(());
        }

        let mut insert: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO ");
        insert.push(link.table);
        insert.push(format!(
            " ({}, {}, position) SELECT ",
            link.owner_column, link.target_column
        ));
        insert.push_bind(owner);
        insert.push(", u.target, u.ord::int FROM UNNEST(");
        insert.push_bind(ids);
        insert.push("::uuid[]) WITH ORDINALITY AS u(target, ord)");
        insert
            .build()
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}

#[async_trait]
impl<F: PgCatalogFields> CatalogRepository<F> for PostgresCatalogRepository<F> {
    async fn insert(&self, entry: NewCatalogEntry<F>) -> DomainResult<CatalogEntry<F>> {
        let NewCatalogEntry {
            id,
            slug,
            created_at,
            fields,
        } = entry;
        let id = Uuid::from(id);

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO ");
        builder.push(Self::table());
        builder.push(" (");
        builder.push(BASE_COLUMNS);
        for column in F::COLUMNS {
            builder.push(", ");
            builder.push(*column);
        }
        builder.push(") VALUES (");
        {
            let mut values = builder.separated(", ");
            values.push_bind(id);
            values.push_bind(slug.as_str().to_string());
            values.push_bind(created_at);
            values.push_bind(created_at);
        }
        for value in fields.to_columns() {
            builder.push(", ");
            value.push_bind(&mut builder);
        }
        builder.push(")");

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_for_slug(slug.as_str()))?;
        Self::write_links(&mut tx, id, &fields).await?;
        let stored = Self::fetch_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(stored)
    }

    async fn update(
        &self,
        entry: CatalogEntry<F>,
        original_modified_at: DateTime<Utc>,
    ) -> DomainResult<CatalogEntry<F>> {
        let CatalogEntry {
            id,
            slug,
            modified_at,
            fields,
            ..
        } = entry;
        let id = Uuid::from(id);

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE ");
        builder.push(Self::table());
        builder.push(" SET modified_at = ");
        builder.push_bind(modified_at);
        builder.push(", slug = ");
        builder.push_bind(slug.as_str().to_string());
        for (column, value) in F::COLUMNS.iter().zip(fields.to_columns()) {
            builder.push(", ");
            builder.push(*column);
            builder.push(" = ");
            value.push_bind(&mut builder);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" AND modified_at = ");
        builder.push_bind(original_modified_at);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let result = builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_for_slug(slug.as_str()))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::Conflict(format!(
                "{} was modified concurrently, please retry",
                F::KIND
            )));
        }
        Self::write_links(&mut tx, id, &fields).await?;
        let stored = Self::fetch_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(map_sqlx)?;

        Ok(stored)
    }

    async fn delete(&self, id: CatalogId) -> DomainResult<()> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("DELETE FROM ");
        builder.push(Self::table());
        builder.push(" WHERE id = ");
        builder.push_bind(Uuid::from(id));

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("{} not found", F::KIND)));
        }
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<CatalogEntry<F>>> {
        let mut builder = Self::select();
        builder.push(" WHERE t.slug = ");
        builder.push_bind(slug.as_str().to_string());

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.as_ref().map(Self::entry_from_row).transpose()
    }

    async fn list_page(&self, limit: u32, offset: u64) -> DomainResult<Vec<CatalogEntry<F>>> {
        let offset = i64::try_from(offset)
            .map_err(|_| DomainError::Validation("cursor offset out of range".into()))?;

        let mut builder = Self::select();
        builder.push(" ORDER BY ");
        builder.push(F::ORDER_BY);
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.iter().map(Self::entry_from_row).collect()
    }

    async fn find_id_by_field(
        &self,
        field: &str,
        value: &str,
    ) -> DomainResult<Option<CatalogId>> {
        let column = lookup_column(Self::table(), F::COLUMNS, field)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT id FROM ");
        builder.push(Self::table());
        builder.push(" WHERE ");
        builder.push(column);
        builder.push("::text = ");
        builder.push_bind(value.to_string());
        builder.push(" LIMIT 1");

        let id = builder
            .build_query_scalar::<Uuid>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(id.map(CatalogId))
    }
}

/// Existence checks over every catalog table.
#[derive(Clone)]
pub struct PostgresCatalogReferences {
    pool: PgPool,
}

impl PostgresCatalogReferences {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogReferenceChecker for PostgresCatalogReferences {
    async fn missing(&self, kind: CatalogKind, ids: &[CatalogId]) -> DomainResult<Vec<CatalogId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let wanted: Vec<Uuid> = ids.iter().map(|id| id.0).collect();

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT id FROM ");
        builder.push(kind.table());
        builder.push(" WHERE id = ANY(");
        builder.push_bind(wanted);
        builder.push(")");

        let found = builder
            .build_query_scalar::<Uuid>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(ids
            .iter()
            .copied()
            .filter(|id| !found.contains(&id.0))
            .collect())
    }
}
