//! Bulk re-ranking of orderable collections.

use sqlx::PgPool;
use studio_core::content::OrderableKind;
use studio_core::ordering::validate_full_permutation;
use studio_core::types::DbId;

use crate::error::RepoError;

pub struct ReorderRepo;

impl ReorderRepo {
    /// Set `sort_order` of every row of `kind` to its index in `ordered_ids`.
    ///
    /// `ordered_ids` must list every row exactly once. The rows are locked
    /// before validation so a concurrent insert cannot slip in between the
    /// check and the write.
    pub async fn reorder(
        pool: &PgPool,
        kind: OrderableKind,
        ordered_ids: &[DbId],
    ) -> Result<(), RepoError> {
        let table = kind.table();
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_scalar::<_, DbId>(&format!(
            "SELECT id FROM {table} ORDER BY id FOR UPDATE"
        ))
        .fetch_all(&mut *tx)
        .await?;
        validate_full_permutation(&existing, ordered_ids)?;

        sqlx::query(&format!(
            "UPDATE {table} t SET sort_order = o.idx - 1, updated_at = NOW() \
             FROM unnest($1::bigint[]) WITH ORDINALITY AS o(id, idx) \
             WHERE t.id = o.id"
        ))
        .bind(ordered_ids)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(kind = %kind.content_kind(), count = ordered_ids.len(), "Collection reordered");
        Ok(())
    }
}
