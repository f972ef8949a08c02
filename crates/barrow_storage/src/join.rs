//! The join engine.
//!
//! A join intersects the key sets of two or more component stores and
//! yields, for every entity present in all of them, the tuple of its
//! components in the order the stores were passed.
//!
//! There is exactly one intersection routine, [`intersect`]: it walks the
//! keys of the smallest participating store and probes the others. Every
//! read path in the engine and the renderer goes through it, so it is the
//! hottest query in the system. [`join`], [`join_values`] and
//! [`join_where`] are thin wrappers over it.
//!
//! Output order is unspecified. Callers that need a stable order must sort.

use std::any::{Any, TypeId, type_name};

use barrow_foundation::{EntityId, Error, Result};

use crate::component::{Component, ComponentStore};

/// Membership view of a store, as seen by [`intersect`].
pub trait KeySet {
    /// Number of keys.
    fn key_count(&self) -> usize;

    /// Whether `id` is a key.
    fn has_key(&self, id: EntityId) -> bool;

    /// Calls `f` once per key.
    fn for_each_key(&self, f: &mut dyn FnMut(EntityId));
}

impl<T: Component> KeySet for ComponentStore<T> {
    fn key_count(&self) -> usize {
        self.len()
    }

    fn has_key(&self, id: EntityId) -> bool {
        self.contains(id)
    }

    fn for_each_key(&self, f: &mut dyn FnMut(EntityId)) {
        for id in self.ids() {
            f(*id);
        }
    }
}

/// Intersects key sets, iterating the smallest and probing the rest.
#[must_use]
pub fn intersect(sets: &[&dyn KeySet]) -> Vec<EntityId> {
    let Some((pivot, smallest)) = sets
        .iter()
        .enumerate()
        .min_by_key(|(_, set)| set.key_count())
    else {
        return Vec::new();
    };

    let mut matched = Vec::with_capacity(smallest.key_count());
    smallest.for_each_key(&mut |id| {
        let in_all = sets
            .iter()
            .enumerate()
            .all(|(i, set)| i == pivot || set.has_key(id));
        if in_all {
            matched.push(id);
        }
    });
    matched
}

/// A tuple of two to five store references that can be joined.
pub trait Join<'a>: Copy {
    /// The tuple of component references yielded per entity.
    type Row;

    /// Number of joined stores.
    const ARITY: usize;

    /// The stores as key sets, in argument order.
    fn key_sets(&self) -> Vec<&'a dyn KeySet>;

    /// Fetches the row for an entity, if it is present in every store.
    fn fetch(&self, id: EntityId) -> Option<Self::Row>;

    /// Type identity and name of the component in column `index`.
    fn column_type(index: usize) -> Option<(TypeId, &'static str)>;

    /// The component in column `index` of a row.
    fn column<'r>(row: &'r Self::Row, index: usize) -> Option<&'r dyn Any>;
}

macro_rules! impl_join {
    ($arity:expr; $($T:ident : $idx:tt),+) => {
        impl<'a, $($T: Component),+> Join<'a> for ($(&'a ComponentStore<$T>,)+) {
            type Row = ($(&'a $T,)+);

            const ARITY: usize = $arity;

            fn key_sets(&self) -> Vec<&'a dyn KeySet> {
                vec![$(self.$idx as &'a dyn KeySet),+]
            }

            fn fetch(&self, id: EntityId) -> Option<Self::Row> {
                Some(($({
                    let store: &'a ComponentStore<$T> = self.$idx;
                    store.find(id)?
                },)+))
            }

            fn column_type(index: usize) -> Option<(TypeId, &'static str)> {
                match index {
                    $($idx => Some((TypeId::of::<$T>(), type_name::<$T>())),)+
                    _ => None,
                }
            }

            fn column<'r>(row: &'r Self::Row, index: usize) -> Option<&'r dyn Any> {
                match index {
                    $($idx => Some(row.$idx as &dyn Any),)+
                    _ => None,
                }
            }
        }
    };
}

impl_join!(2; A: 0, B: 1);
impl_join!(3; A: 0, B: 1, C: 2);
impl_join!(4; A: 0, B: 1, C: 2, D: 3);
impl_join!(5; A: 0, B: 1, C: 2, D: 3, E: 4);

/// Joins stores, yielding `(id, (&a, &b, ...))` for every shared entity.
///
/// ```ignore
/// for (id, (pos, hp)) in join((&c.positions, &c.healths)) { ... }
/// ```
pub fn join<'a, J: Join<'a>>(stores: J) -> impl Iterator<Item = (EntityId, J::Row)> {
    let ids = intersect(&stores.key_sets());
    ids.into_iter()
        .filter_map(move |id| stores.fetch(id).map(|row| (id, row)))
}

/// Joins stores, yielding only the component tuples.
pub fn join_values<'a, J: Join<'a>>(stores: J) -> impl Iterator<Item = J::Row> {
    join(stores).map(|(_, row)| row)
}

/// A filter applied to one column of a conditional join.
pub struct Predicate<'p> {
    index: usize,
    type_id: TypeId,
    type_name: &'static str,
    test: Box<dyn Fn(&dyn Any) -> bool + 'p>,
}

impl<'p> Predicate<'p> {
    /// A predicate over column `index`, which must hold components of type `T`.
    pub fn on<T: Component>(index: usize, test: impl Fn(&T) -> bool + 'p) -> Self {
        Self {
            index,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            test: Box::new(move |value: &dyn Any| value.downcast_ref::<T>().is_some_and(&test)),
        }
    }

    /// The column this predicate reads.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Debug for Predicate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("index", &self.index)
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Conditional join: yields a row only if every predicate holds for its
/// indexed column. An empty predicate list behaves like [`join`].
///
/// # Errors
///
/// Returns a `MalformedJoin` fault if a predicate indexes a column that does
/// not exist or expects a different component type than the column holds.
pub fn join_where<'a, J: Join<'a>>(
    stores: J,
    predicates: &[Predicate<'_>],
) -> Result<Vec<(EntityId, J::Row)>> {
    for predicate in predicates {
        let Some((type_id, column_name)) = J::column_type(predicate.index) else {
            return Err(Error::malformed_join(format!(
                "predicate index {} out of range for a {}-way join",
                predicate.index,
                J::ARITY
            )));
        };
        if type_id != predicate.type_id {
            return Err(Error::malformed_join(format!(
                "predicate on column {} expects {}, column holds {}",
                predicate.index, predicate.type_name, column_name
            )));
        }
    }

    Ok(join(stores)
        .filter(|(_, row)| {
            predicates.iter().all(|predicate| {
                J::column(row, predicate.index).is_some_and(|value| (predicate.test)(value))
            })
        })
        .collect())
}
