//! Account hierarchy materialization.

use crate::store::{AccountId, LedgerStore};
use anyhow::{bail, Result};
use recount_core::{leaf_name, path_prefixes};

/// Resolve an account path to its node, creating missing ancestors.
///
/// Returns the existing node when the exact path is already present.
/// Otherwise walks the path's prefixes left to right; each missing prefix
/// becomes a new node whose parent is the previous prefix's node. Calling
/// twice with the same path never creates duplicates.
pub fn resolve_account<S: LedgerStore + ?Sized>(store: &mut S, full_path: &str) -> Result<AccountId> {
    if let Some(existing) = store.find_account_by_path(full_path)? {
        return Ok(existing);
    }

    let mut parent: Option<AccountId> = None;
    for prefix in path_prefixes(full_path) {
        let node = match store.find_account_by_path(prefix)? {
            Some(id) => id,
            None => store.create_account(leaf_name(prefix), prefix, parent)?,
        };
        parent = Some(node);
    }

    match parent {
        Some(id) => Ok(id),
        None => bail!("empty account path"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_creates_each_prefix_once() {
        let mut store = MemoryStore::new();
        let checking = resolve_account(&mut store, "Assets:Banking:Checking").unwrap();

        assert_eq!(store.account_rows().len(), 3);

        let assets = store.account_by_path("Assets").unwrap();
        let banking = store.account_by_path("Assets:Banking").unwrap();
        let leaf = store.account_by_path("Assets:Banking:Checking").unwrap();

        assert_eq!(assets.parent, None);
        assert_eq!(banking.parent, Some(assets.id));
        assert_eq!(leaf.parent, Some(banking.id));
        assert_eq!(leaf.id, checking);
        assert_eq!(leaf.name, "Checking");
    }

    #[test]
    fn test_idempotent() {
        let mut store = MemoryStore::new();
        let first = resolve_account(&mut store, "Assets:Banking:Checking").unwrap();
        let second = resolve_account(&mut store, "Assets:Banking:Checking").unwrap();

        assert_eq!(first, second);
        // Three rows, not six
        assert_eq!(store.account_rows().len(), 3);
    }

    #[test]
    fn test_shared_prefix_reused() {
        let mut store = MemoryStore::new();
        resolve_account(&mut store, "Assets:Banking:Checking").unwrap();
        resolve_account(&mut store, "Assets:Banking:Savings").unwrap();

        // Assets, Assets:Banking, and the two leaves
        assert_eq!(store.account_rows().len(), 4);

        let banking = store.account_by_path("Assets:Banking").unwrap();
        assert_eq!(store.children(banking.id).len(), 2);
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut store = MemoryStore::new();
        assert!(resolve_account(&mut store, "").is_err());
    }
}
