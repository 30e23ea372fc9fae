use std::collections::BTreeSet;

use crate::StateId;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition groups states into pairwise disjoint blocks. The blocks are kept sorted by
/// their smallest element, which makes the numbering of blocks deterministic and ensures that
/// the block containing state `0` (if any) always comes first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Partition(Vec<BTreeSet<StateId>>);

impl std::ops::Deref for Partition {
    type Target = Vec<BTreeSet<StateId>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a BTreeSet<StateId>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<StateId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Partition {
    /// Builds a new partition from an iterator that yields iterators over the elements of
    /// each block. Empty blocks are discarded.
    pub fn new<X: IntoIterator<Item = StateId>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        let mut blocks: Vec<BTreeSet<StateId>> = iter
            .into_iter()
            .map(|it| it.into_iter().collect::<BTreeSet<_>>())
            .filter(|block| !block.is_empty())
            .collect();
        blocks.sort_by_key(|block| block.first().copied());
        Self(blocks)
    }

    /// Returns the size of the partition, i.e. the number of blocks.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Computes a lookup table that maps each of the states `0..total` to the index of the
    /// block it belongs to. States that are not covered by any block map to `None`.
    pub fn block_lookup(&self, total: usize) -> Vec<Option<usize>> {
        let mut lookup = vec![None; total];
        for (index, block) in self.0.iter().enumerate() {
            for &state in block {
                if let Some(entry) = lookup.get_mut(state) {
                    *entry = Some(index);
                }
            }
        }
        lookup
    }
}
