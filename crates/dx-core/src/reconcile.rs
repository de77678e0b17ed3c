//! Rewrites positional provenance into external record ids.

use dx_model::{MatchRecord, ModelError, ScanHit};

/// Resolves one hit against the id column.
///
/// # Errors
///
/// [`ModelError::RowIndexOutOfRange`] when `row_index` is past the end of
/// `ids`.
pub fn resolve_hit<S: AsRef<str>>(hit: ScanHit, ids: &[S]) -> Result<MatchRecord, ModelError> {
    let Some(id) = ids.get(hit.row_index) else {
        return Err(ModelError::RowIndexOutOfRange {
            index: hit.row_index,
            len: ids.len(),
        });
    };
    Ok(hit.into_record(id.as_ref()))
}

/// Resolves every hit, stopping at the first out-of-range index.
pub fn resolve<I, S>(hits: I, ids: &[S]) -> Result<Vec<MatchRecord>, ModelError>
where
    I: IntoIterator<Item = ScanHit>,
    S: AsRef<str>,
{
    hits.into_iter().map(|hit| resolve_hit(hit, ids)).collect()
}
