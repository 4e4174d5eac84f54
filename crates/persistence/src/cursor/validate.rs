//! Binding of a decoded cursor to the request that presents it.

use super::payload::CursorOf;
use super::{ListRequest, Paginated};
use crate::error::{CursorRejection, CursorResult};

/// Checks that a decoded cursor was minted for this exact request context.
///
/// Checks run in order: owner, then sort field and order, then the filter
/// snapshot (structural equality). The first mismatch rejects the cursor.
pub fn validate<R: Paginated>(cursor: &CursorOf<R>, request: &ListRequest<R>) -> CursorResult<()> {
    if &cursor.owner_id != request.owner() {
        return Err(CursorRejection::OwnerMismatch.into());
    }

    if cursor.sort() != request.sort() {
        return Err(CursorRejection::SortMismatch.into());
    }

    if cursor.filters_snapshot.as_ref() != request.filters_snapshot() {
        return Err(CursorRejection::FilterMismatch.into());
    }

    Ok(())
}
