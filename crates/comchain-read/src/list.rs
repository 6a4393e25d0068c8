//! Paginated list reads
//!
//! A list lives on the lists contract as three entry points: a per-caller
//! count, an index-to-entry map and an entry-to-amount lookup. Entries can
//! only be reached one index at a time, so a window is read by walking the
//! indices from the top of the window down to its floor.

use comchain_primitives::{Address, Word, U256};
use std::collections::VecDeque;

use crate::abi::decode_uint;
use crate::reader::ComChainReader;
use crate::registry::ListKind;
use crate::types::{ListDescriptor, ListElement};
use crate::ReadError;

/// Clamp negative or missing bounds to zero
pub(crate) fn sanitize_bound(bound: Option<i64>) -> u64 {
    match bound {
        Some(b) if b > 0 => b as u64,
        _ => 0,
    }
}

/// Highest index to read: `min(count - 1, index_max)`, or `None` when the
/// window is empty
pub(crate) fn start_index(count: U256, index_min: u64, index_max: u64) -> Option<u64> {
    if count.is_zero() {
        return None;
    }
    let last = count - U256::one();
    let start = if last < U256::from(index_max) {
        last.as_u64()
    } else {
        index_max
    };
    (start >= index_min).then_some(start)
}

impl ComChainReader {
    /// Read entries `[index_min, index_max]` of a list for `caller`.
    ///
    /// Bounds that are negative or absent count as zero; `index_max` is
    /// capped at the last existing index. Entries come back in ascending
    /// index order. The first failed read aborts the walk with
    /// [`ReadError::RemoteReadFailed`] and nothing read so far is returned.
    pub async fn fetch_window(
        &self,
        descriptor: &ListDescriptor,
        caller: &Address,
        index_min: Option<i64>,
        index_max: Option<i64>,
    ) -> Result<Vec<ListElement>, ReadError> {
        let index_min = sanitize_bound(index_min);
        let index_max = sanitize_bound(index_max);
        let contract = self.contracts().lists;
        let caller_word = Word::from(caller);

        let data = self
            .read_at_default(&contract, descriptor.count, &[caller_word])
            .await
            .map_err(|e| e.into_traversal(None))?;
        let count = decode_uint(&data)?.unwrap_or_default();

        let Some(start) = start_index(count, index_min, index_max) else {
            tracing::debug!(
                "List {} empty window: count={} min={} max={}",
                descriptor.count,
                count,
                index_min,
                index_max
            );
            return Ok(Vec::new());
        };

        tracing::debug!(
            "List {} reading indices {}..={} of {}",
            descriptor.count,
            index_min,
            start,
            count
        );

        let mut elements = VecDeque::new();
        for index in (index_min..=start).rev() {
            let element = self
                .read_element(&contract, descriptor, caller, index)
                .await?;
            tracing::trace!("List {} index {} -> {}", descriptor.count, index, element.address);
            elements.push_front(element);
        }

        Ok(elements.into())
    }

    /// Read one entry: map lookup, then the amount of the mapped entry
    async fn read_element(
        &self,
        contract: &Address,
        descriptor: &ListDescriptor,
        caller: &Address,
        index: u64,
    ) -> Result<ListElement, ReadError> {
        let data = self
            .read_at_default(contract, descriptor.map, &[Word::from(caller), Word::from(index)])
            .await
            .map_err(|e| e.into_traversal(Some(index)))?;
        let entry = Word::left_padded_hex(&data)?;

        let amount = self
            .amount_for_element(contract, descriptor.amount, caller, &entry)
            .await
            .map_err(|e| e.into_traversal(Some(index)))?;

        Ok(ListElement {
            address: Address::from_word(&entry),
            amount,
        })
    }

    /// Read a window of one of the known lists, using the configured
    /// descriptor
    pub async fn list(
        &self,
        kind: ListKind,
        caller: &Address,
        index_min: Option<i64>,
        index_max: Option<i64>,
    ) -> Result<Vec<ListElement>, ReadError> {
        let descriptor = self.registry().descriptor(kind)?;
        self.fetch_window(&descriptor, caller, index_min, index_max)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_bound() {
        assert_eq!(sanitize_bound(None), 0);
        assert_eq!(sanitize_bound(Some(-5)), 0);
        assert_eq!(sanitize_bound(Some(0)), 0);
        assert_eq!(sanitize_bound(Some(7)), 7);
    }

    #[test]
    fn test_start_index_caps_at_last() {
        assert_eq!(start_index(U256::from(3), 0, 10), Some(2));
        assert_eq!(start_index(U256::from(10), 2, 4), Some(4));
    }

    #[test]
    fn test_start_index_empty() {
        assert_eq!(start_index(U256::zero(), 0, 0), None);
        assert_eq!(start_index(U256::from(3), 5, 10), None);
        assert_eq!(start_index(U256::from(10), 4, 2), None);
    }

    #[test]
    fn test_start_index_huge_count() {
        assert_eq!(start_index(U256::MAX, 0, 9), Some(9));
    }
}
