use league_types::{Record, RecordId};

/// Local copy of one remote collection, as shown by a list view.
///
/// The cache is never the source of truth. It is replaced wholesale by a
/// fetch, grows by append-if-absent after a successful create, and flags
/// itself stale when a background refetch disagrees with what is shown.
#[derive(Clone, Debug, PartialEq)]
pub struct ListCache<T> {
    items: Vec<T>,
    loaded: bool,
    pending: Option<Vec<T>>,
}

impl<T> Default for ListCache<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            pending: None,
        }
    }
}

impl<T: Record> ListCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records in store order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any fetch has completed since construction.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// A refetch returned something other than what is displayed.
    pub fn is_stale(&self) -> bool {
        self.pending.is_some()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Replace the contents with a fresh fetch, dropping any pending refetch.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
        self.pending = None;
    }

    /// Append `item` unless a record with the same identity is already cached.
    /// Returns whether the item was appended.
    pub fn append_if_absent(&mut self, item: T) -> bool {
        if self.contains(item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Compare a background refetch with the displayed list.
    ///
    /// Identical results are applied silently. A result that differs in
    /// ids, order or field values is held back and the cache reports stale
    /// until [`ListCache::apply_pending`]. Returns whether the fetch diverged.
    pub fn reconcile(&mut self, fresh: Vec<T>) -> bool {
        if !self.loaded {
            self.replace(fresh);
            return false;
        }
        if fresh == self.items {
            self.pending = None;
            return false;
        }
        self.pending = Some(fresh);
        true
    }

    /// Swap in a held-back refetch. Returns false when nothing was pending.
    pub fn apply_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(fresh) => {
                self.items = fresh;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use league_types::Team;

    use super::*;

    fn team(id: &str, name: &str) -> Team {
        Team {
            id: RecordId::new(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn append_if_absent_by_identity() {
        let mut cache = ListCache::new();
        cache.replace(vec![team("t1", "Red")]);

        assert!(cache.append_if_absent(team("t2", "Blue")));
        assert!(!cache.append_if_absent(team("t2", "Blue again")));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.items()[1].name, "Blue");
    }

    #[test]
    fn replace_keeps_store_order() {
        let mut cache = ListCache::new();
        assert!(!cache.is_loaded());
        cache.replace(vec![team("t3", "C"), team("t1", "A"), team("t2", "B")]);
        let ids: Vec<_> = cache.items().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["t3", "t1", "t2"]);
        assert!(cache.is_loaded());
    }

    #[test]
    fn reconcile_flags_divergence() {
        let mut cache = ListCache::new();
        cache.replace(vec![team("t1", "Red")]);

        assert!(!cache.reconcile(vec![team("t1", "Red")]));
        assert!(!cache.is_stale());

        assert!(cache.reconcile(vec![team("t1", "Red"), team("t9", "Other client")]));
        assert!(cache.is_stale());
        assert_eq!(cache.len(), 1);

        assert!(cache.apply_pending());
        assert!(!cache.is_stale());
        assert_eq!(cache.len(), 2);
        assert!(!cache.apply_pending());
    }

    #[test]
    fn reconcile_flags_edited_record() {
        let mut cache = ListCache::new();
        cache.replace(vec![team("t1", "Red")]);

        assert!(cache.reconcile(vec![team("t1", "Red Devils")]));
        assert_eq!(cache.items()[0].name, "Red");
        assert!(cache.apply_pending());
        assert_eq!(cache.items()[0].name, "Red Devils");
    }

    #[test]
    fn append_survives_matching_refetch() {
        let mut cache = ListCache::new();
        cache.replace(vec![team("t1", "Red")]);
        cache.append_if_absent(team("t2", "Blue"));

        assert!(!cache.reconcile(vec![team("t1", "Red"), team("t2", "Blue")]));
        assert_eq!(cache.len(), 2);
        assert!(!cache.is_stale());
    }

    #[test]
    fn reconcile_before_first_load_replaces() {
        let mut cache = ListCache::new();
        assert!(!cache.reconcile(vec![team("t1", "Red")]));
        assert!(cache.is_loaded());
        assert!(!cache.is_stale());
    }
}
