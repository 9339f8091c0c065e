//! Many-to-many edge tables and replace-set reconciliation.

use sqlx::{PgPool, Postgres};
use studio_core::relations::{diff_ids, positions, SetDiff};
use studio_core::types::DbId;

/// Description of one join table.
///
/// Table and column names are compile-time literals and safe to interpolate
/// into SQL.
#[derive(Debug, Clone, Copy)]
pub struct EdgeTable {
    pub table: &'static str,
    pub parent_col: &'static str,
    pub child_col: &'static str,
    /// Whether the edge carries a display `position`.
    pub positioned: bool,
}

pub const FILM_GALLERY: EdgeTable = EdgeTable {
    table: "film_gallery",
    parent_col: "film_id",
    child_col: "media_asset_id",
    positioned: true,
};

pub const PRESS_ITEM_GALLERY: EdgeTable = EdgeTable {
    table: "press_item_gallery",
    parent_col: "press_item_id",
    child_col: "media_asset_id",
    positioned: true,
};

pub const PRESS_ITEM_FILMS: EdgeTable = EdgeTable {
    table: "press_item_films",
    parent_col: "press_item_id",
    child_col: "film_id",
    positioned: false,
};

pub const HOME_FEATURED_FILMS: EdgeTable = EdgeTable {
    table: "home_featured_films",
    parent_col: "home_page_id",
    child_col: "film_id",
    positioned: true,
};

pub const HOME_FEATURED_PRESS: EdgeTable = EdgeTable {
    table: "home_featured_press",
    parent_col: "home_page_id",
    child_col: "press_item_id",
    positioned: true,
};

/// Key type of an edge's parent: `BIGINT` ids, or the `TEXT` singleton key.
pub trait EdgeParent:
    for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Copy + Send + Sync + 'static
{
}

impl EdgeParent for DbId {}
impl EdgeParent for &'static str {}

/// Reads and replace-set writes over [`EdgeTable`]s.
pub struct RelationGraph;

impl RelationGraph {
    /// Child ids of `parent`, in display order.
    pub async fn child_ids<P: EdgeParent>(
        pool: &PgPool,
        edge: &EdgeTable,
        parent: P,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(&Self::select_children_sql(edge))
            .bind(parent)
            .fetch_all(pool)
            .await
    }

    /// Make the stored edge set of `parent` equal `desired`.
    ///
    /// Removed edges are deleted, added edges inserted, and positions of all
    /// remaining edges rewritten to their index in `desired`. Must run inside
    /// the caller's transaction.
    pub async fn sync_inner<P: EdgeParent>(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        edge: &EdgeTable,
        parent: P,
        desired: &[DbId],
    ) -> Result<SetDiff, sqlx::Error> {
        let current = sqlx::query_scalar::<_, DbId>(&Self::select_children_sql(edge))
            .bind(parent)
            .fetch_all(&mut **tx)
            .await?;
        let diff = diff_ids(&current, desired);

        if !diff.removed.is_empty() {
            let query = format!(
                "DELETE FROM {} WHERE {} = $1 AND {} = ANY($2)",
                edge.table, edge.parent_col, edge.child_col
            );
            sqlx::query(&query)
                .bind(parent)
                .bind(&diff.removed)
                .execute(&mut **tx)
                .await?;
        }

        if edge.positioned {
            let query = format!(
                "INSERT INTO {t} ({p}, {c}, position) VALUES ($1, $2, $3) \
                 ON CONFLICT ({p}, {c}) DO UPDATE SET position = EXCLUDED.position",
                t = edge.table,
                p = edge.parent_col,
                c = edge.child_col
            );
            for (child_id, position) in positions(desired) {
                sqlx::query(&query)
                    .bind(parent)
                    .bind(child_id)
                    .bind(position)
                    .execute(&mut **tx)
                    .await?;
            }
        } else {
            let query = format!(
                "INSERT INTO {} ({}, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
                edge.table, edge.parent_col, edge.child_col
            );
            for &child_id in &diff.added {
                sqlx::query(&query)
                    .bind(parent)
                    .bind(child_id)
                    .execute(&mut **tx)
                    .await?;
            }
        }

        Ok(diff)
    }

    /// Append one child at the end of a positioned edge list. Idempotent.
    pub async fn append_inner<P: EdgeParent>(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        edge: &EdgeTable,
        parent: P,
        child_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO {t} ({p}, {c}, position) \
             SELECT $1, $2, COALESCE(MAX(position) + 1, 0) FROM {t} WHERE {p} = $1 \
             ON CONFLICT ({p}, {c}) DO NOTHING",
            t = edge.table,
            p = edge.parent_col,
            c = edge.child_col
        );
        sqlx::query(&query)
            .bind(parent)
            .bind(child_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Remove a single edge. Returns `true` if it existed.
    pub async fn remove<P: EdgeParent>(
        pool: &PgPool,
        edge: &EdgeTable,
        parent: P,
        child_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE {} = $1 AND {} = $2",
            edge.table, edge.parent_col, edge.child_col
        );
        let result = sqlx::query(&query)
            .bind(parent)
            .bind(child_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn select_children_sql(edge: &EdgeTable) -> String {
        let order = if edge.positioned {
            format!("position, {}", edge.child_col)
        } else {
            edge.child_col.to_string()
        };
        format!(
            "SELECT {} FROM {} WHERE {} = $1 ORDER BY {order}",
            edge.child_col, edge.table, edge.parent_col
        )
    }
}
