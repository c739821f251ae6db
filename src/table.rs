//! Exact-membership table of soft-deleted elements.
//!
//! A Bloom filter cannot clear bits without risking false negatives for other
//! members sharing them, so deletion is recorded out-of-band: every removed
//! string goes into this separate-chaining hash table, and presence here means
//! "treated as absent from the filter regardless of bit-array state".
//!
//! # Structure
//!
//! A fixed array of `q` buckets, each an owned singly-linked list of raw
//! strings in front-insert order. `q` is chosen by the filter as the first
//! prime after a tenth of the expected element count (the assumed ~10%
//! deletion rate); the table itself accepts any positive bucket count. The
//! bucket for a string is `encode(s) mod q`.
//!
//! No resizing: chains grow unbounded under adversarial removal patterns,
//! which is acceptable under the deletion-rate assumption.

use crate::encode::encode;
use crate::error::{Result, SoftBloomError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One link in a bucket chain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Node {
    value: String,
    next: Option<Box<Node>>,
}

/// Separate-chaining hash table of removed strings.
///
/// Invariant: a string appears in at most one bucket, at most once.
///
/// # Examples
///
/// ```
/// use softbloom::table::RemovalTable;
///
/// let mut table = RemovalTable::new(13).unwrap();
/// table.insert("gone");
/// assert!(table.contains("gone"));
///
/// table.remove("gone");
/// assert!(!table.contains("gone"));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RemovalTable {
    /// Bucket heads; `None` marks an empty chain.
    buckets: Vec<Option<Box<Node>>>,
    /// Number of buckets (`q`), fixed at construction.
    bucket_count: u64,
    /// Number of strings currently recorded.
    len: usize,
}

impl RemovalTable {
    /// Create a table with `bucket_count` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`SoftBloomError::InvalidFilterSize`] if `bucket_count` is 0.
    pub fn new(bucket_count: u64) -> Result<Self> {
        if bucket_count == 0 {
            return Err(SoftBloomError::invalid_filter_size(0));
        }

        Ok(Self {
            buckets: (0..bucket_count).map(|_| None).collect(),
            bucket_count,
            len: 0,
        })
    }

    /// Bucket index for `element`: `encode(element) mod q`.
    #[inline]
    fn bucket_index(&self, element: &str) -> usize {
        (encode(element) % self.bucket_count) as usize
    }

    /// Record `element` as removed.
    ///
    /// No-op if already present, preserving the at-most-once invariant.
    /// Otherwise prepends a node to the bucket's chain. O(chain) for the
    /// presence check, O(1) for the link.
    pub fn insert(&mut self, element: &str) {
        if self.contains(element) {
            return;
        }

        let index = self.bucket_index(element);
        let head = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Node {
            value: element.to_owned(),
            next: head,
        }));
        self.len += 1;
    }

    /// Forget that `element` was removed.
    ///
    /// Unlinks the matching node if present; silent no-op otherwise.
    pub fn remove(&mut self, element: &str) {
        let index = self.bucket_index(element);
        if unlink(&mut self.buckets[index], element) {
            self.len -= 1;
        }
    }

    /// Whether `element` is currently recorded as removed.
    ///
    /// Linear scan of the bucket's chain for an exact match.
    #[must_use]
    pub fn contains(&self, element: &str) -> bool {
        let mut cursor = self.buckets[self.bucket_index(element)].as_deref();
        while let Some(node) = cursor {
            if node.value == element {
                return true;
            }
            cursor = node.next.as_deref();
        }
        false
    }

    /// Number of strings recorded.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no strings are recorded.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets (`q`).
    #[must_use]
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.bucket_count as usize
    }

    /// Length of the longest chain.
    #[must_use]
    pub fn max_chain_length(&self) -> usize {
        self.buckets.iter().map(chain_length).max().unwrap_or(0)
    }

    /// Average entries per non-empty bucket.
    #[must_use]
    pub fn avg_chain_length(&self) -> f64 {
        let non_empty = self.buckets.iter().filter(|b| b.is_some()).count();
        if non_empty == 0 {
            return 0.0;
        }
        self.len as f64 / non_empty as f64
    }

    /// Fraction of buckets with at least one entry, in `[0, 1]`.
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        let non_empty = self.buckets.iter().filter(|b| b.is_some()).count();
        non_empty as f64 / self.bucket_count as f64
    }

    /// Approximate heap usage in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        let slots = self.buckets.len() * std::mem::size_of::<Option<Box<Node>>>();
        let nodes: usize = self
            .buckets
            .iter()
            .map(|b| {
                let mut bytes = 0;
                let mut cursor = b.as_deref();
                while let Some(node) = cursor {
                    bytes += std::mem::size_of::<Node>() + node.value.capacity();
                    cursor = node.next.as_deref();
                }
                bytes
            })
            .sum();
        slots + nodes
    }
}

impl Drop for RemovalTable {
    /// Pop chains node by node; the default recursive drop of a boxed list
    /// would consume one stack frame per link.
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut cursor = bucket.take();
            while let Some(mut node) = cursor {
                cursor = node.next.take();
            }
        }
    }
}

/// Unlink the first node matching `element` from a chain.
///
/// Returns `true` if a node was removed. Iterative: chains may grow long
/// under heavy removal traffic, and recursion depth would track the target's
/// position.
fn unlink(link: &mut Option<Box<Node>>, element: &str) -> bool {
    let mut cursor = link;
    loop {
        match cursor {
            None => return false,
            Some(node) if node.value == element => {
                *cursor = node.next.take();
                return true;
            }
            Some(node) => cursor = &mut node.next,
        }
    }
}

fn chain_length(head: &Option<Box<Node>>) -> usize {
    let mut count = 0;
    let mut cursor = head.as_deref();
    while let Some(node) = cursor {
        count += 1;
        cursor = node.next.as_deref();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_empty() {
        let table = RemovalTable::new(7).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.bucket_count(), 7);
    }

    #[test]
    fn test_new_rejects_zero_buckets() {
        assert_eq!(
            RemovalTable::new(0).unwrap_err(),
            SoftBloomError::invalid_filter_size(0)
        );
    }

    #[test]
    fn test_insert_and_contains() {
        let mut table = RemovalTable::new(11).unwrap();
        table.insert("alpha");
        table.insert("beta");

        assert!(table.contains("alpha"));
        assert!(table.contains("beta"));
        assert!(!table.contains("gamma"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_insert_no_duplicates() {
        let mut table = RemovalTable::new(11).unwrap();
        table.insert("dup");
        table.insert("dup");
        table.insert("dup");
        assert_eq!(table.len(), 1);

        // One remove fully clears it
        table.remove("dup");
        assert!(!table.contains("dup"));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_remove_head_of_chain() {
        // Single bucket forces every entry into one chain.
        let mut table = RemovalTable::new(1).unwrap();
        table.insert("a");
        table.insert("b");
        table.insert("c"); // chain head (front-insert)

        table.remove("c");
        assert!(!table.contains("c"));
        assert!(table.contains("a"));
        assert!(table.contains("b"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_remove_middle_and_tail_of_chain() {
        let mut table = RemovalTable::new(1).unwrap();
        table.insert("a");
        table.insert("b");
        table.insert("c");

        table.remove("b"); // middle
        assert!(!table.contains("b"));
        assert!(table.contains("a"));
        assert!(table.contains("c"));

        table.remove("a"); // tail
        assert!(!table.contains("a"));
        assert!(table.contains("c"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut table = RemovalTable::new(5).unwrap();
        table.insert("present");
        table.remove("absent");
        assert_eq!(table.len(), 1);
        assert!(table.contains("present"));
    }

    #[test]
    fn test_empty_string() {
        let mut table = RemovalTable::new(5).unwrap();
        table.insert("");
        assert!(table.contains(""));
        table.remove("");
        assert!(!table.contains(""));
    }

    #[test]
    fn test_fifty_insert_ten_remove() {
        let mut table = RemovalTable::new(7).unwrap();
        let items: Vec<String> = (0..50).map(|i| format!("item-{i}")).collect();
        for item in &items {
            table.insert(item);
        }
        assert_eq!(table.len(), 50);

        for item in items.iter().take(10) {
            table.remove(item);
        }
        assert_eq!(table.len(), 40);

        for (i, item) in items.iter().enumerate() {
            assert_eq!(table.contains(item), i >= 10, "item {i}");
        }
    }

    #[test]
    fn test_chain_diagnostics() {
        let mut table = RemovalTable::new(1).unwrap();
        assert_eq!(table.max_chain_length(), 0);
        assert_eq!(table.avg_chain_length(), 0.0);
        assert_eq!(table.load_factor(), 0.0);

        table.insert("x");
        table.insert("y");
        table.insert("z");

        assert_eq!(table.max_chain_length(), 3);
        assert!((table.avg_chain_length() - 3.0).abs() < f64::EPSILON);
        assert!((table.load_factor() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deep_chain_remove_and_drop() {
        // One bucket forces a single chain far deeper than any recursive
        // unlink or drop could walk on a test thread's stack.
        let mut table = RemovalTable::new(1).unwrap();
        for i in 0..10_000 {
            table.insert(&format!("entry-{i}"));
        }
        assert_eq!(table.max_chain_length(), 10_000);

        // Front-insert puts the first entry at the chain's tail.
        table.remove("entry-0");
        assert!(!table.contains("entry-0"));
        assert_eq!(table.len(), 9_999);

        drop(table);
    }

    #[test]
    fn test_memory_usage_grows() {
        let mut table = RemovalTable::new(13).unwrap();
        let empty = table.memory_usage();
        table.insert("some reasonably long element value");
        assert!(table.memory_usage() > empty);
    }
}
