use std::iter::FusedIterator;

use crate::{error::LabelOutOfRange, Label};

/// The position of a node in an ordered tree, as the sequence of labels
/// walked from the root. The empty sequence is the root itself.
///
/// A HierarchyId is immutable: navigation methods such as [`parent`] and
/// [`child`] build new values.
///
/// `Ord` is pre-order by label: labels compare left to right and a path sorts
/// before every one of its descendants. The binary encoding produced by
/// [`encode`](crate::encode) sorts byte-wise in exactly the same order.
///
/// [`parent`]: HierarchyId::parent
/// [`child`]: HierarchyId::child
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HierarchyId {
    labels: Vec<Label>,
}

impl HierarchyId {
    /// The root node, `/`
    pub const fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Construct from already validated labels.
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Construct from raw integers, rejecting the first one that is not a
    /// valid [`Label`].
    pub fn from_labels<I, T>(labels: I) -> Result<Self, LabelOutOfRange>
    where
        I: IntoIterator<Item = T>,
        Label: TryFrom<T, Error = LabelOutOfRange>,
    {
        labels
            .into_iter()
            .map(Label::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// The labels from the root down
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of labels, 0 for the root. Also known as the level of the node.
    pub fn depth(&self) -> usize {
        self.labels.len()
    }

    /// Is this the root node?
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// The label of this node among its siblings, `None` for the root.
    pub fn last_label(&self) -> Option<Label> {
        self.labels.last().copied()
    }

    /// The immediate ancestor, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.get_ancestor(1)
    }

    /// A new id one level below this one.
    pub fn child(&self, label: Label) -> Self {
        let mut labels = Vec::with_capacity(self.labels.len() + 1);
        labels.extend_from_slice(&self.labels);
        labels.push(label);
        Self { labels }
    }

    /// The ancestor `n` levels up. `get_ancestor(0)` is a copy of this id;
    /// asking for more levels than the depth gives `None`.
    pub fn get_ancestor(&self, n: usize) -> Option<Self> {
        let depth = self.depth().checked_sub(n)?;
        Some(self.truncated(depth))
    }

    /// True if `self` is a strict prefix of `other`.
    pub fn is_ancestor_of(&self, other: &HierarchyId) -> bool {
        self.depth() < other.depth() && other.labels.starts_with(&self.labels)
    }

    /// True if `other` is a strict prefix of `self`.
    pub fn is_descendant_of(&self, other: &HierarchyId) -> bool {
        other.is_ancestor_of(self)
    }

    /// Every ancestor from the root down, not including this id.
    pub fn ancestors(&self) -> Vec<HierarchyId> {
        self.ancestors_iter().collect()
    }

    /// Lazy form of [`ancestors`](HierarchyId::ancestors).
    pub fn ancestors_iter(&self) -> Ancestors<'_> {
        Ancestors {
            labels: &self.labels,
            front: 0,
            back: self.labels.len(),
        }
    }

    fn truncated(&self, depth: usize) -> Self {
        Self {
            labels: self.labels[..depth].to_vec(),
        }
    }
}

impl From<Vec<Label>> for HierarchyId {
    fn from(labels: Vec<Label>) -> Self {
        Self::new(labels)
    }
}

impl From<HierarchyId> for Vec<Label> {
    fn from(id: HierarchyId) -> Self {
        id.labels
    }
}

impl AsRef<[Label]> for HierarchyId {
    fn as_ref(&self) -> &[Label] {
        &self.labels
    }
}

/// Every ancestor of a [`HierarchyId`], root first.
///
/// Yields `depth` items. Cloning restarts from the clone's current position.
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    labels: &'a [Label],
    front: usize,
    back: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = HierarchyId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let id = HierarchyId::new(self.labels[..self.front].to_vec());
        self.front += 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<'a> DoubleEndedIterator for Ancestors<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(HierarchyId::new(self.labels[..self.back].to_vec()))
    }
}

impl<'a> ExactSizeIterator for Ancestors<'a> {}

impl<'a> FusedIterator for Ancestors<'a> {}

/// Every ancestor of `id`, root first, not including `id`.
pub fn ancestors(id: &HierarchyId) -> Vec<HierarchyId> {
    id.ancestors()
}

#[cfg(any(test, feature = "fuzzing"))]
impl proptest::arbitrary::Arbitrary for HierarchyId {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<HierarchyId>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        use proptest::prelude::*;
        proptest::collection::vec(any::<Label>(), 0..12)
            .prop_map(HierarchyId::new)
            .boxed()
    }
}
