use derive_more::Deref;
use sorted_iter::{assume::AssumeSortedByItemExt, SortedIterator};
use sorted_vec::SortedSet;
use std::fmt::{self, Display};

/// Sorted set of mode or qubit indices.
#[must_use]
#[derive(PartialEq, Eq, Clone, Debug, Hash, Deref)]
pub struct IndexSet {
    indexes: SortedSet<usize>,
}

impl IndexSet {
    pub fn new() -> IndexSet {
        IndexSet {
            indexes: SortedSet::new(),
        }
    }

    pub fn singleton(value: usize) -> Self {
        IndexSet {
            indexes: SortedSet::from_unsorted(vec![value]),
        }
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indexes.binary_search(&index).is_ok()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        self.indexes.as_slice()
    }

    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.indexes.last().copied()
    }

    #[must_use]
    pub fn min(&self) -> Option<usize> {
        self.indexes.first().copied()
    }

    pub fn union(&self, other: &IndexSet) -> IndexSet {
        self.sorted().union(other.sorted()).collect()
    }

    pub fn difference(&self, other: &IndexSet) -> IndexSet {
        self.sorted().difference(other.sorted()).collect()
    }

    pub fn symmetric_difference(&self, other: &IndexSet) -> IndexSet {
        self.sorted().symmetric_difference(other.sorted()).collect()
    }

    #[must_use]
    pub fn is_subset(&self, other: &IndexSet) -> bool {
        self.sorted().is_subset(other.sorted())
    }

    /// Elements outside `range`, in increasing order.
    pub fn outside(&self, range: std::ops::Range<usize>) -> IndexSet {
        self.iter().copied().filter(|index| !range.contains(index)).collect()
    }

    fn sorted(&self) -> impl SortedIterator<Item = usize> + '_ {
        self.indexes.iter().copied().assume_sorted_by_item()
    }
}

impl Default for IndexSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<usize> for IndexSet {
    fn from_iter<Iterator: IntoIterator<Item = usize>>(iterator: Iterator) -> Self {
        let indexes = SortedSet::from_unsorted(iterator.into_iter().collect());
        IndexSet { indexes }
    }
}

impl<const LENGTH: usize> From<[usize; LENGTH]> for IndexSet {
    fn from(values: [usize; LENGTH]) -> Self {
        values.into_iter().collect()
    }
}

impl IntoIterator for IndexSet {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.indexes.into_iter()
    }
}

impl<'life> IntoIterator for &'life IndexSet {
    type Item = &'life usize;
    type IntoIter = std::slice::Iter<'life, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indexes.iter()
    }
}

impl Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, index) in self.indexes.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{index}")?;
        }
        f.write_str("}")
    }
}
