//! Lock-sharded accumulator used by the parallel scorer.
//!
//! A plain `Mutex<HashMap>` serialises every worker on one lock; sharding
//! by `id % shard_count` keeps workers touching different documents on
//! different locks. Correctness only needs each document's updates
//! serialised, and a document always hashes to the same shard.

use std::sync::Mutex;

use ahash::AHashMap;

use crate::models::DocumentId;

type HashMap<K, V> = AHashMap<K, V>;

/// Fixed-width array of mutex-protected sub-maps keyed by document id.
///
/// The map is a transient resource: one parallel query builds it up,
/// erases minus matches through it, then drains it with [`into_map`].
///
/// [`into_map`]: ShardedMap::into_map
#[derive(Debug)]
pub struct ShardedMap<V> {
    shards: Vec<Mutex<HashMap<DocumentId, V>>>,
}

impl<V: Default> ShardedMap<V> {
    /// Creates a map with `shard_count` buckets. `shard_count` must be at
    /// least 1.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard_count must be at least 1");
        ShardedMap {
            shards: (0..shard_count).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    /// Applies `op` to the entry for `id`, inserting a default value first
    /// if the id is new. The shard lock is held only for the update.
    pub fn update(&self, id: DocumentId, op: impl FnOnce(&mut V)) {
        let mut shard = self.shard_for(id).lock().expect("shard lock poisoned");
        op(shard.entry(id).or_default());
    }

    /// Removes the entry for `id`, if present.
    pub fn remove(&self, id: DocumentId) {
        let mut shard = self.shard_for(id).lock().expect("shard lock poisoned");
        shard.remove(&id);
    }

    /// Consumes the shards into one ordinary map. Exclusive ownership means
    /// no locking; `Mutex::into_inner` hands the buckets over directly.
    pub fn into_map(self) -> HashMap<DocumentId, V> {
        let mut merged = HashMap::new();
        for shard in self.shards {
            let bucket = shard.into_inner().expect("shard lock poisoned");
            merged.extend(bucket);
        }
        merged
    }

    fn shard_for(&self, id: DocumentId) -> &Mutex<HashMap<DocumentId, V>> {
        let bucket = (id as u64 % self.shards.len() as u64) as usize;
        &self.shards[bucket]
    }
}
