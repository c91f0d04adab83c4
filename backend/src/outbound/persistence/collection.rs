//! Generic insertion-ordered document collection.

use std::collections::HashSet;
use std::hash::Hash;

use tokio::sync::RwLock;

use crate::domain::ports::RepositoryError;
use crate::domain::{Adoption, AdoptionId, Pet, PetId, User, UserId};

/// A document addressable by a copyable id.
pub trait Document: Clone + Send + Sync {
    /// Identifier type.
    type Id: Copy + Eq + Hash + Send + Sync + std::fmt::Display;

    /// The document's id.
    fn id(&self) -> Self::Id;
}

impl Document for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

impl Document for Pet {
    type Id = PetId;

    fn id(&self) -> PetId {
        self.id
    }
}

impl Document for Adoption {
    type Id = AdoptionId;

    fn id(&self) -> AdoptionId {
        self.id
    }
}

/// Documents of one kind, in insertion order.
#[derive(Debug)]
pub struct Collection<T> {
    documents: RwLock<Vec<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Document> Collection<T> {
    /// Clone every document.
    pub async fn all(&self) -> Vec<T> {
        self.documents.read().await.clone()
    }

    /// First document matching `predicate`.
    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.documents
            .read()
            .await
            .iter()
            .find(|doc| predicate(doc))
            .cloned()
    }

    /// Document with the given id.
    pub async fn get(&self, id: T::Id) -> Option<T> {
        self.find(|doc| doc.id() == id).await
    }

    /// Append documents, rejecting the whole batch when an id or a
    /// `unique_key` is already stored or repeated within the batch.
    ///
    /// # Errors
    /// [`RepositoryError::Duplicate`] naming the first colliding key.
    pub async fn insert_all<K>(&self, batch: &[T], unique_key: K) -> Result<(), RepositoryError>
    where
        K: Fn(&T) -> Option<String>,
    {
        let mut documents = self.documents.write().await;
        let mut ids: HashSet<T::Id> = documents.iter().map(Document::id).collect();
        let mut keys: HashSet<String> = documents.iter().filter_map(&unique_key).collect();
        for candidate in batch {
            if !ids.insert(candidate.id()) {
                return Err(RepositoryError::duplicate(format!("_id:{}", candidate.id())));
            }
            if let Some(key) = unique_key(candidate) {
                if keys.contains(&key) {
                    return Err(RepositoryError::duplicate(key));
                }
                keys.insert(key);
            }
        }
        documents.extend(batch.iter().cloned());
        Ok(())
    }

    /// Replace the document sharing `document`'s id, rejecting the write
    /// when its `unique_key` belongs to another document.
    ///
    /// Returns `false` when no document has that id.
    ///
    /// # Errors
    /// [`RepositoryError::Duplicate`] naming the taken key.
    pub async fn replace<K>(&self, document: &T, unique_key: K) -> Result<bool, RepositoryError>
    where
        K: Fn(&T) -> Option<String>,
    {
        let mut documents = self.documents.write().await;
        let id = document.id();
        if let Some(key) = unique_key(document) {
            let taken = documents
                .iter()
                .any(|existing| existing.id() != id && unique_key(existing).as_ref() == Some(&key));
            if taken {
                return Err(RepositoryError::duplicate(key));
            }
        }
        match documents.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = document.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply `change` to the document with `id` while holding the write
    /// lock, so read-check-write sequences cannot interleave.
    ///
    /// `change` must not alter unique keys. Returns `None` when absent.
    pub async fn modify<R, F>(&self, id: T::Id, change: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut documents = self.documents.write().await;
        documents
            .iter_mut()
            .find(|existing| existing.id() == id)
            .map(change)
    }

    /// Remove the document with `id`; `false` when absent.
    pub async fn remove(&self, id: T::Id) -> bool {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|doc| doc.id() != id);
        documents.len() != before
    }
}

/// Unique-key function for documents keyed by id alone.
pub(crate) const fn no_unique_key<T>(_: &T) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn pet(name: &str) -> Pet {
        Pet::list(
            name.to_owned(),
            "dog".to_owned(),
            NaiveDate::from_ymd_opt(2022, 3, 4).expect("date"),
            None,
        )
    }

    fn name_key(pet: &Pet) -> Option<String> {
        Some(format!("name:{}", pet.name))
    }

    #[tokio::test]
    async fn keeps_insertion_order() {
        let collection = Collection::default();
        let batch = [pet("a"), pet("b"), pet("c")];
        collection.insert_all(&batch, no_unique_key).await.expect("insert");
        let names: Vec<_> = collection.all().await.into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn rejects_batches_with_internal_conflicts_atomically() {
        let collection = Collection::default();
        let err = collection
            .insert_all(&[pet("a"), pet("a")], name_key)
            .await
            .expect_err("conflict");
        assert_eq!(err, RepositoryError::duplicate("name:a"));
        assert!(collection.all().await.is_empty());
    }

    #[tokio::test]
    async fn replace_and_remove_by_id() {
        let collection = Collection::default();
        let mut stored = pet("a");
        collection
            .insert_all(std::slice::from_ref(&stored), no_unique_key)
            .await
            .expect("insert");

        stored.name = "renamed".to_owned();
        assert!(collection.replace(&stored, no_unique_key).await.expect("replace"));
        assert_eq!(collection.get(stored.id).await.map(|p| p.name), Some("renamed".to_owned()));

        assert!(collection.remove(stored.id).await);
        assert!(!collection.remove(stored.id).await);
        assert!(!collection.replace(&stored, no_unique_key).await.expect("replace"));
    }

    #[tokio::test]
    async fn rejects_keys_already_stored() {
        let collection = Collection::default();
        collection.insert_all(&[pet("a")], name_key).await.expect("insert");
        let err = collection
            .insert_all(&[pet("b"), pet("a")], name_key)
            .await
            .expect_err("conflict");
        assert_eq!(err, RepositoryError::duplicate("name:a"));
        assert_eq!(collection.all().await.len(), 1);

        let mut renamed = pet("b");
        collection
            .insert_all(std::slice::from_ref(&renamed), name_key)
            .await
            .expect("insert");
        renamed.name = "a".to_owned();
        assert!(collection.replace(&renamed, name_key).await.is_err());
    }

    #[tokio::test]
    async fn modify_runs_under_one_write() {
        let collection = Collection::default();
        let stored = pet("a");
        collection
            .insert_all(std::slice::from_ref(&stored), no_unique_key)
            .await
            .expect("insert");

        let claim = |p: &mut Pet| !std::mem::replace(&mut p.adopted, true);
        assert_eq!(collection.modify(stored.id, claim).await, Some(true));
        assert_eq!(collection.modify(stored.id, claim).await, Some(false));
        assert_eq!(collection.modify(PetId::generate(), claim).await, None);
    }
}
