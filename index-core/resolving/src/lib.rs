//! The source index database: a trie of [`IndexEntry`] values keyed by
//! their hierarchy, most specific segment first.
//!
//! Lookups take a PQN segment stack in the same order. Segments are
//! followed while the PQN lasts; afterwards the trie is descended for as
//! long as every node has a single child.

mod error;

pub use error::{InsertError, LookupError};

use indexing::IndexEntry;
use indexmap::IndexMap;
use la_arena::{Arena, Idx};
use rustc_hash::FxBuildHasher;
use smol_str::{SmolStr, ToSmolStr};

pub type EntryId = Idx<IndexEntry>;

type Branch = IndexMap<SmolStr, Node, FxBuildHasher>;

#[derive(Debug)]
enum Node {
    Leaf(EntryId),
    Branch(Branch),
}

#[derive(Debug, Default)]
pub struct SourceIndexDatabase {
    entries: Arena<IndexEntry>,
    root: Branch,
}

impl SourceIndexDatabase {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// Inserts `entry` under its hierarchy.
    ///
    /// The segments from the most specific down to the second form the
    /// path of branches; the first segment, the repository, is the key of
    /// the leaf. An insertion that creates no new branch is a duplicate.
    /// A failed insertion leaves the database unchanged.
    pub fn insert(&mut self, entry: IndexEntry) -> Result<EntryId, InsertError> {
        if let Err(error) = self.check_insert(&entry) {
            tracing::debug!(%entry, %error, "Rejected insertion");
            return Err(error);
        }

        let Some((key, path)) = entry.hierarchy.split_first() else {
            return Err(InsertError::Duplicate { entry: entry.to_smolstr() });
        };
        let key = key.clone();
        let path = path.to_vec();

        let mut branch = &mut self.root;
        for segment in path.into_iter().rev() {
            let node = branch.entry(segment).or_insert_with(|| Node::Branch(Branch::default()));
            match node {
                Node::Branch(next) => branch = next,
                Node::Leaf(_) => return Err(InsertError::Collision { entry: entry.to_smolstr() }),
            }
        }

        let id = self.entries.alloc(entry);
        branch.insert(key, Node::Leaf(id));

        Ok(id)
    }

    fn check_insert(&self, entry: &IndexEntry) -> Result<(), InsertError> {
        let path = entry.hierarchy.get(1..).unwrap_or_default();

        let mut branch = &self.root;
        for segment in path.iter().rev() {
            match branch.get(segment) {
                Some(Node::Branch(next)) => branch = next,
                Some(Node::Leaf(_)) => {
                    return Err(InsertError::Collision { entry: entry.to_smolstr() });
                }
                None => return Ok(()),
            }
        }

        Err(InsertError::Duplicate { entry: entry.to_smolstr() })
    }

    /// Adds every entry of `other`, stopping at the first rejected one.
    pub fn extend_from(&mut self, other: &SourceIndexDatabase) -> Result<(), InsertError> {
        for entry in other.entries() {
            self.insert(entry.clone())?;
        }
        Ok(())
    }

    /// Resolves a PQN segment stack, most specific segment first.
    pub fn get_entry<S: AsRef<str>>(&self, pqn: &[S]) -> Result<&IndexEntry, LookupError> {
        let result = self.lookup(pqn).map(|id| &self.entries[id]);
        if tracing::enabled!(tracing::Level::TRACE) {
            let pqn: Vec<&str> = pqn.iter().map(AsRef::as_ref).collect();
            match &result {
                Ok(entry) => tracing::trace!(?pqn, %entry, "Resolved"),
                Err(error) => tracing::trace!(?pqn, %error, "Unresolved"),
            }
        }
        result
    }

    fn lookup<S: AsRef<str>>(&self, pqn: &[S]) -> Result<EntryId, LookupError> {
        let mut branch = match self.descend(pqn)? {
            Descent::Leaf(id) => return Ok(id),
            Descent::Branch(branch) => branch,
        };

        loop {
            let mut children = branch.values();
            match (children.next(), children.next()) {
                (None, _) => return Err(LookupError::NotInIndex),
                (Some(_), Some(_)) => return Err(LookupError::Ambiguous),
                (Some(Node::Leaf(id)), None) => return Ok(*id),
                (Some(Node::Branch(next)), None) => branch = next,
            }
        }
    }

    /// Follows the PQN segments from the root, stopping early at a leaf.
    fn descend<S: AsRef<str>>(&self, pqn: &[S]) -> Result<Descent<'_>, LookupError> {
        let mut branch = &self.root;
        for segment in pqn {
            match branch.get(segment.as_ref()) {
                Some(Node::Leaf(id)) => return Ok(Descent::Leaf(*id)),
                Some(Node::Branch(next)) => branch = next,
                None => return Err(LookupError::NotInIndex),
            }
        }
        Ok(Descent::Branch(branch))
    }

    /// Every entry a PQN could still refer to, in insertion order.
    ///
    /// Empty when the PQN leaves the trie; a single entry when it resolves.
    pub fn candidates<S: AsRef<str>>(&self, pqn: &[S]) -> Vec<&IndexEntry> {
        let mut ids = vec![];
        match self.descend(pqn) {
            Err(_) => (),
            Ok(Descent::Leaf(id)) => ids.push(id),
            Ok(Descent::Branch(branch)) => {
                let mut stack = vec![branch];
                while let Some(branch) = stack.pop() {
                    for node in branch.values() {
                        match node {
                            Node::Leaf(id) => ids.push(*id),
                            Node::Branch(next) => stack.push(next),
                        }
                    }
                }
            }
        }
        ids.sort_unstable_by_key(|id| u32::from(id.into_raw()));
        ids.into_iter().map(|id| &self.entries[id]).collect()
    }
}

enum Descent<'a> {
    Leaf(EntryId),
    Branch(&'a Branch),
}
