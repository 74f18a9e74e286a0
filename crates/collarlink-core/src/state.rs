// ── Observable entity state ──
//
// One slot per store, replaced on every publish. Observers that need
// strict ordering must wait for a terminal state before issuing the
// next intent; the stores themselves are last-publish-wins.

/// Lifecycle of a store's most recent operation.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityState<T> {
    /// Nothing has happened yet (store construction).
    Idle,
    /// An intent is in flight. Published synchronously with the call
    /// being issued, so an observer never misses a pending operation.
    Loading,
    /// The full owned collection, as last fetched.
    Loaded(Vec<T>),
    /// A mutation succeeded. Transient: a successful mutation is always
    /// followed by a reload, so observers typically see `Loading` and
    /// then `Loaded` next.
    Mutated {
        kind: MutationKind,
        /// The mutated entity when the backend returned one; deletes
        /// with an empty response body carry `None`.
        entity: Option<T>,
    },
    /// The operation failed; the message is rendered for display.
    Failed(String),
}

impl<T> EntityState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded collection, if that is the current state.
    pub fn loaded(&self) -> Option<&[T]> {
        match self {
            Self::Loaded(items) => Some(items),
            _ => None,
        }
    }

    /// The failure message, if the last operation failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Which kind of write produced a [`EntityState::Mutated`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

impl MutationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variants() {
        let loaded: EntityState<i64> = EntityState::Loaded(vec![1, 2]);
        assert_eq!(loaded.loaded(), Some(&[1, 2][..]));
        assert!(loaded.failure().is_none());

        let failed: EntityState<i64> = EntityState::Failed("not signed in".into());
        assert_eq!(failed.failure(), Some("not signed in"));
        assert!(failed.loaded().is_none());

        assert!(EntityState::<i64>::Loading.is_loading());
    }

    #[test]
    fn mutation_labels() {
        assert_eq!(MutationKind::Created.label(), "created");
        assert_eq!(MutationKind::Updated.label(), "updated");
        assert_eq!(MutationKind::Deleted.label(), "deleted");
    }
}
