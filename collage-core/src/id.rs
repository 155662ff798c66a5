//! # IDs
//!
//! Two kinds of identifier live here:
//!
//! * [`UniqueID<T>`] is unique within this execution of the program, namespaced by the type T. Assets use it,
//!   since two sprites are "the same image" only if they share an asset, never because their pixels match.
//! * [`SpriteID`] is a small dense number issued while replaying the action log. It is only meaningful relative
//!   to the sprite set it was issued in.

use std::{any::TypeId, collections::BTreeMap, num::NonZeroU64};

// Next value to hand out, per namespace.
static ID_SERVER: parking_lot::Mutex<BTreeMap<TypeId, u64>> =
    parking_lot::const_mutex(BTreeMap::new());

/// ID that is guaranteed unique within this execution of the program.
/// IDs with different namespaces may share a value but should not be considered equal.
pub struct UniqueID<T: std::any::Any> {
    id: NonZeroU64,
    // `fn() -> T` keeps the ID Send + Sync regardless of T.
    _phantom: std::marker::PhantomData<fn() -> T>,
}
impl<T: std::any::Any> Clone for UniqueID<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: std::any::Any> Copy for UniqueID<T> {}
impl<T: std::any::Any> PartialEq for UniqueID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<T: std::any::Any> Eq for UniqueID<T> {}
impl<T: std::any::Any> std::hash::Hash for UniqueID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl<T: std::any::Any> UniqueID<T> {
    /// Get the raw numeric value of this ID.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.id.get()
    }
}
impl<T: std::any::Any> Default for UniqueID<T> {
    /// Allocate a fresh ID in the namespace of T.
    fn default() -> Self {
        let mut server = ID_SERVER.lock();
        let last = server.entry(TypeId::of::<T>()).or_insert(0);
        let Some(id) = last.checked_add(1).and_then(NonZeroU64::new) else {
            // Handing out a duplicate would silently merge two assets. Nothing sane to do.
            log::error!("{} ID overflow! Aborting!", std::any::type_name::<T>());
            log::logger().flush();
            std::process::abort();
        };
        *last = id.get();

        Self {
            id,
            _phantom: std::marker::PhantomData,
        }
    }
}
impl<T: std::any::Any> std::fmt::Display for UniqueID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = std::any::type_name::<T>();
        write!(f, "{}#{}", name.rsplit("::").next().unwrap_or(name), self.id)
    }
}
impl<T: std::any::Any> std::fmt::Debug for UniqueID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

/// Identifies a sprite within one projection of the action log.
///
/// Issued densely: a new sprite gets one more than the largest live id, or zero if there are no live sprites.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SpriteID(pub u64);
impl SpriteID {
    /// The id to issue next, given the ids of every live sprite.
    #[must_use]
    pub fn next_after(live: impl IntoIterator<Item = SpriteID>) -> Self {
        live.into_iter()
            .max()
            .map_or(Self(0), |max| Self(max.0.saturating_add(1)))
    }
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}
impl std::fmt::Display for SpriteID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sprite#{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::{SpriteID, UniqueID};

    // Tests share one process and thus the ID server. Each uses its own namespace.

    #[test]
    fn unique_ids_differ() {
        struct Namespace;
        type TestID = UniqueID<Namespace>;

        let mut ids: Vec<_> = (0..256).map(|_| TestID::default().get()).collect();
        let length_before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(length_before, ids.len(), "had duplicate ids");
    }
    #[test]
    fn namespaces_are_independent() {
        struct A;
        struct B;
        // Not a stable guarantee, just how the server counts.
        assert_eq!(UniqueID::<A>::default().get(), 1);
        assert_eq!(UniqueID::<B>::default().get(), 1);
        assert_eq!(UniqueID::<A>::default().get(), 2);
    }
    #[test]
    fn display_names_namespace() {
        struct Thing;
        let id = UniqueID::<Thing>::default();
        assert_eq!(id.to_string(), format!("Thing#{}", id.get()));
    }
    #[test]
    fn next_sprite_id() {
        assert_eq!(SpriteID::next_after([]), SpriteID(0));
        assert_eq!(SpriteID::next_after([SpriteID(0)]), SpriteID(1));
        // Gaps are never filled, only the maximum matters.
        assert_eq!(
            SpriteID::next_after([SpriteID(4), SpriteID(0), SpriteID(2)]),
            SpriteID(5)
        );
    }
}
