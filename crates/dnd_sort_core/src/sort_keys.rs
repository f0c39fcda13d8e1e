//! Turning a reorder into updated sequence numbers for persistence.

/// A row whose stored sequence number has to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceUpdate<K> {
    pub key: K,
    pub sequence: i64,
}

/// Assign `index * step` to every row in its new order and return the rows that changed.
///
/// `rows` holds each row's key and currently stored sequence, already in the new order.
pub fn resequence<K: Clone>(rows: &[(K, i64)], step: i64) -> Vec<SequenceUpdate<K>> {
    let step = step.max(1);
    rows.iter()
        .enumerate()
        .filter_map(|(ix, (key, stored))| {
            let sequence = ix as i64 * step;
            (sequence != *stored).then(|| SequenceUpdate {
                key: key.clone(),
                sequence,
            })
        })
        .collect()
}
