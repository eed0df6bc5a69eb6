use ahash::RandomState;
use bimap::BiHashMap;
use std::collections::HashMap;
use std::hash::Hash;

/// Where the nodes of a derived graph come from.
///
/// * `N`: node IDs of the derived graph.
/// * `P`: node IDs of its immediate parent.
/// * `L`: labels of the label-addressed graph at the root of the chain.
///
/// Mappings to root labels are composed eagerly whenever a graph is derived,
/// so every lookup is a single hash lookup however deep the chain is.
/// Root labels are absent when the chain starts at a compact-indexed graph.
#[derive(Clone)]
pub struct Provenance<N, P, L>
where
    N: Hash + Eq,
    L: Hash + Eq,
{
    local_to_parent: HashMap<N, P, RandomState>,
    root_labels: Option<BiHashMap<N, L, RandomState, RandomState>>,
}

impl<N, P, L> Provenance<N, P, L>
where
    N: Hash + Eq + Clone,
    L: Hash + Eq,
{
    /// Builds both mappings at once from `(local, parent, root label)` entries.
    ///
    /// If any entry lacks a root label, the record has no root labels at all.
    pub(crate) fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P, Option<L>)>,
    {
        let mut local_to_parent = HashMap::with_hasher(RandomState::new());
        let mut root_labels = Some(BiHashMap::with_hashers(
            RandomState::new(),
            RandomState::new(),
        ));
        for (local, parent, root) in entries.into_iter() {
            match root {
                Some(root) => {
                    if let Some(labels) = root_labels.as_mut() {
                        labels.insert(local.clone(), root);
                    }
                }
                None => root_labels = None,
            }
            local_to_parent.insert(local, parent);
        }
        Self {
            local_to_parent,
            root_labels,
        }
    }

    pub fn len(&self) -> usize {
        self.local_to_parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local_to_parent.is_empty()
    }

    pub fn parent_of(&self, n: &N) -> Option<&P> {
        self.local_to_parent.get(n)
    }

    pub fn has_root_labels(&self) -> bool {
        self.root_labels.is_some()
    }

    pub fn root_label_of(&self, n: &N) -> Option<&L> {
        self.root_labels.as_ref()?.get_by_left(n)
    }

    pub fn local_of_root_label(&self, label: &L) -> Option<&N> {
        self.root_labels.as_ref()?.get_by_right(label)
    }
}

impl<N, P, L> std::fmt::Debug for Provenance<N, P, L>
where
    N: Hash + Eq + std::fmt::Debug,
    P: std::fmt::Debug,
    L: Hash + Eq + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (local, parent) in self.local_to_parent.iter() {
            write!(f, "{:?} -> {:?}", local, parent)?;
            if let Some(root) = self.root_labels.as_ref().and_then(|r| r.get_by_left(local)) {
                write!(f, " (root {:?})", root)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
