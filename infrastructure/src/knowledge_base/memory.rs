//! In-process knowledge base.

use super::snapshot::LibrarySnapshot;
use async_trait::async_trait;
use scholar_application::ports::backend::BackendError;
use scholar_application::ports::knowledge_base::{ItemQuery, KnowledgeBasePort};
use scholar_domain::{Collection, LibraryItem, Membership, Note, NoteDraft};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;
use tracing::debug;

const FALLBACK_LIBRARY: &str = "default";

#[derive(Debug, Default)]
struct State {
    items: BTreeMap<String, LibraryItem>,
    collections: BTreeMap<String, Collection>,
    notes: BTreeMap<String, Note>,
    pages: BTreeMap<String, Vec<String>>,
    next_id: u64,
}

impl State {
    /// Allocate an id like `C0007` that is not used by any entity yet.
    fn allocate(&mut self, prefix: &str) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{}{:04}", prefix, self.next_id);
            if !self.items.contains_key(&id)
                && !self.collections.contains_key(&id)
                && !self.notes.contains_key(&id)
            {
                return id;
            }
        }
    }

    fn item(&self, item_id: &str) -> Result<&LibraryItem, BackendError> {
        self.items
            .get(item_id)
            .ok_or_else(|| BackendError::not_found("item", item_id))
    }

    fn collection(&self, collection_id: &str) -> Result<&Collection, BackendError> {
        self.collections
            .get(collection_id)
            .ok_or_else(|| BackendError::not_found("collection", collection_id))
    }

    fn collection_mut(&mut self, collection_id: &str) -> Result<&mut Collection, BackendError> {
        self.collections
            .get_mut(collection_id)
            .ok_or_else(|| BackendError::not_found("collection", collection_id))
    }

    fn same_library(&self, item: &LibraryItem, collection_id: &str) -> Result<(), BackendError> {
        let collection = self.collection(collection_id)?;
        if item.library_id != collection.library_id {
            return Err(BackendError::Rejected(format!(
                "item '{}' is in library {}, collection '{}' is in library {}",
                item.id, item.library_id, collection.id, collection.library_id
            )));
        }
        Ok(())
    }

    /// Drop an item along with its memberships and child notes.
    fn remove_item(&mut self, item_id: &str) -> bool {
        if self.items.remove(item_id).is_none() {
            return false;
        }
        for collection in self.collections.values_mut() {
            collection.item_ids.remove(item_id);
        }
        self.notes
            .retain(|_, note| note.parent_item_id.as_deref() != Some(item_id));
        self.pages.remove(item_id);
        true
    }
}

/// [`KnowledgeBasePort`] over an in-memory library.
#[derive(Debug)]
pub struct InMemoryKnowledgeBase {
    state: RwLock<State>,
    default_library: String,
}

impl Default for InMemoryKnowledgeBase {
    fn default() -> Self {
        Self::from_snapshot(LibrarySnapshot::default())
    }
}

impl InMemoryKnowledgeBase {
    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Self {
        let default_library = snapshot
            .default_library
            .clone()
            .or_else(|| snapshot.items.first().map(|i| i.library_id.clone()))
            .unwrap_or_else(|| FALLBACK_LIBRARY.to_string());

        let state = State {
            items: snapshot
                .items
                .into_iter()
                .map(|i| (i.id.clone(), i))
                .collect(),
            collections: snapshot
                .collections
                .into_iter()
                .map(|c| (c.id.clone(), c))
                .collect(),
            notes: snapshot
                .notes
                .into_iter()
                .map(|n| (n.id.clone(), n))
                .collect(),
            pages: snapshot.pages,
            next_id: 0,
        };
        debug!(
            "Loaded library: {} items, {} collections, {} notes",
            state.items.len(),
            state.collections.len(),
            state.notes.len()
        );

        Self {
            state: RwLock::new(state),
            default_library,
        }
    }

    pub fn default_library(&self) -> &str {
        &self.default_library
    }

    /// Current contents, suitable for writing back to disk.
    pub async fn snapshot(&self) -> LibrarySnapshot {
        let state = self.state.read().await;
        LibrarySnapshot {
            default_library: Some(self.default_library.clone()),
            items: state.items.values().cloned().collect(),
            collections: state.collections.values().cloned().collect(),
            notes: state.notes.values().cloned().collect(),
            pages: state.pages.clone(),
        }
    }

    /// Extracted page text of an item's PDF, if the snapshot carries it.
    pub async fn pages(&self, item_id: &str) -> Result<Option<Vec<String>>, BackendError> {
        let state = self.state.read().await;
        let item = state.item(item_id)?;
        if !item.has_pdf {
            return Ok(None);
        }
        Ok(Some(state.pages.get(item_id).cloned().unwrap_or_default()))
    }
}

#[async_trait]
impl KnowledgeBasePort for InMemoryKnowledgeBase {
    async fn search_items(&self, query: &ItemQuery) -> Result<Vec<LibraryItem>, BackendError> {
        let state = self.state.read().await;
        let text = query.text.trim();
        Ok(state
            .items
            .values()
            .filter(|i| query.library_id.as_ref().is_none_or(|l| &i.library_id == l))
            .filter(|i| query.item_type.is_none_or(|t| i.item_type == t))
            .filter(|i| {
                query
                    .tag
                    .as_ref()
                    .is_none_or(|tag| i.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
            })
            .filter(|i| text.is_empty() || i.matches(text))
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn get_item(&self, item_id: &str) -> Result<LibraryItem, BackendError> {
        self.state.read().await.item(item_id).cloned()
    }

    async fn find_collections(
        &self,
        library_id: Option<&str>,
        name: &str,
    ) -> Result<Vec<Collection>, BackendError> {
        let needle = name.to_lowercase();
        Ok(self
            .state
            .read()
            .await
            .collections
            .values()
            .filter(|c| library_id.is_none_or(|l| c.library_id == l))
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn list_collections(
        &self,
        library_id: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<Vec<Collection>, BackendError> {
        let state = self.state.read().await;
        if let Some(parent) = parent_id {
            state.collection(parent)?;
        }
        Ok(state
            .collections
            .values()
            .filter(|c| library_id.is_none_or(|l| c.library_id == l))
            .filter(|c| c.parent_id.as_deref() == parent_id)
            .cloned()
            .collect())
    }

    async fn get_collection(&self, collection_id: &str) -> Result<Collection, BackendError> {
        self.state.read().await.collection(collection_id).cloned()
    }

    async fn create_collection(
        &self,
        library_id: Option<&str>,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Collection, BackendError> {
        let mut state = self.state.write().await;
        let library_id = match parent_id {
            Some(parent) => {
                let parent = state.collection(parent)?;
                if library_id.is_some_and(|l| l != parent.library_id) {
                    return Err(BackendError::Rejected(format!(
                        "parent collection '{}' is in library {}",
                        parent.id, parent.library_id
                    )));
                }
                parent.library_id.clone()
            }
            None => library_id.unwrap_or(&self.default_library).to_string(),
        };

        let collection = Collection {
            id: state.allocate("C"),
            library_id,
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
            item_ids: BTreeSet::new(),
        };
        state
            .collections
            .insert(collection.id.clone(), collection.clone());
        Ok(collection)
    }

    async fn add_to_collection(
        &self,
        collection_id: &str,
        item_id: &str,
    ) -> Result<Membership, BackendError> {
        let mut state = self.state.write().await;
        let item = state.item(item_id)?.clone();
        state.same_library(&item, collection_id)?;
        let collection = state.collection_mut(collection_id)?;
        Ok(if collection.item_ids.insert(item_id.to_string()) {
            Membership::Added
        } else {
            Membership::AlreadyPresent
        })
    }

    async fn remove_from_collection(
        &self,
        collection_id: &str,
        item_id: &str,
    ) -> Result<(), BackendError> {
        let mut state = self.state.write().await;
        let collection = state.collection_mut(collection_id)?;
        if collection.item_ids.remove(item_id) {
            Ok(())
        } else {
            Err(BackendError::Conflict(format!(
                "item '{}' is not in collection '{}'",
                item_id, collection_id
            )))
        }
    }

    async fn create_note(&self, draft: NoteDraft) -> Result<Note, BackendError> {
        let mut state = self.state.write().await;
        if let Some(parent) = &draft.parent_item_id {
            state.item(parent)?;
        }
        if let Some(collection) = &draft.collection_id {
            state.collection(collection)?;
        }
        let note = Note {
            id: state.allocate("N"),
            title: draft.title,
            content: draft.content,
            parent_item_id: draft.parent_item_id,
            collection_id: draft.collection_id,
            tags: draft.tags,
        };
        state.notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    async fn get_note(&self, note_id: &str) -> Result<Note, BackendError> {
        self.state
            .read()
            .await
            .notes
            .get(note_id)
            .cloned()
            .ok_or_else(|| BackendError::not_found("note", note_id))
    }

    async fn update_note(&self, note_id: &str, content: &str) -> Result<Note, BackendError> {
        let mut state = self.state.write().await;
        let note = state
            .notes
            .get_mut(note_id)
            .ok_or_else(|| BackendError::not_found("note", note_id))?;
        note.content = content.to_string();
        Ok(note.clone())
    }

    async fn move_item(
        &self,
        item_id: &str,
        target_collection_id: &str,
        source_collection_id: Option<&str>,
    ) -> Result<(), BackendError> {
        let mut state = self.state.write().await;
        let item = state.item(item_id)?.clone();
        state.same_library(&item, target_collection_id)?;
        if let Some(source) = source_collection_id {
            state.same_library(&item, source)?;
            if !state.collection(source)?.item_ids.contains(item_id) {
                return Err(BackendError::Conflict(format!(
                    "item '{}' is not in collection '{}'",
                    item_id, source
                )));
            }
            state.collection_mut(source)?.item_ids.remove(item_id);
        }
        state
            .collection_mut(target_collection_id)?
            .item_ids
            .insert(item_id.to_string());
        Ok(())
    }

    async fn delete_item(&self, item_id: &str) -> Result<(), BackendError> {
        if self.state.write().await.remove_item(item_id) {
            Ok(())
        } else {
            Err(BackendError::not_found("item", item_id))
        }
    }

    async fn delete_collection(
        &self,
        collection_id: &str,
        delete_items: bool,
    ) -> Result<usize, BackendError> {
        let mut state = self.state.write().await;
        let collection = state
            .collections
            .remove(collection_id)
            .ok_or_else(|| BackendError::not_found("collection", collection_id))?;

        // Subcollections move up one level.
        for child in state.collections.values_mut() {
            if child.parent_id.as_deref() == Some(collection_id) {
                child.parent_id = collection.parent_id.clone();
            }
        }
        for note in state.notes.values_mut() {
            if note.collection_id.as_deref() == Some(collection_id) {
                note.collection_id = None;
            }
        }

        if !delete_items {
            return Ok(0);
        }
        Ok(collection
            .item_ids
            .iter()
            .filter(|id| state.remove_item(id))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::ItemType;

    fn item(id: &str, library: &str, title: &str, tags: &[&str]) -> LibraryItem {
        LibraryItem {
            id: id.to_string(),
            library_id: library.to_string(),
            title: title.to_string(),
            item_type: ItemType::Book,
            authors: vec!["Charles Babbage".to_string()],
            year: Some(1864),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            abstract_note: None,
            has_pdf: false,
        }
    }

    fn kb() -> InMemoryKnowledgeBase {
        InMemoryKnowledgeBase::from_snapshot(LibrarySnapshot {
            default_library: Some("L1".to_string()),
            items: vec![
                item("I1", "L1", "Passages from the Life of a Philosopher", &["memoir"]),
                item("I2", "L1", "On the Economy of Machinery", &[]),
                item("I3", "L2", "Principia Mathematica", &[]),
            ],
            collections: vec![Collection {
                id: "C1".to_string(),
                library_id: "L1".to_string(),
                name: "Babbage".to_string(),
                parent_id: None,
                item_ids: ["I1".to_string()].into(),
            }],
            notes: Vec::new(),
            pages: BTreeMap::new(),
        })
    }

    #[tokio::test]
    async fn test_search_filters() {
        let kb = kb();
        let all = kb.search_items(&ItemQuery::new("", 10)).await.unwrap();
        assert_eq!(all.len(), 3);

        let l1 = kb
            .search_items(&ItemQuery::new("", 10).with_library(Some("L1".to_string())))
            .await
            .unwrap();
        assert_eq!(l1.len(), 2);

        let tagged = kb
            .search_items(&ItemQuery::new("", 10).with_tag(Some("MEMOIR".to_string())))
            .await
            .unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].id, "I1");

        let limited = kb.search_items(&ItemQuery::new("", 1)).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_membership_is_a_set() {
        let kb = kb();
        assert_eq!(kb.add_to_collection("C1", "I1").await.unwrap(), Membership::AlreadyPresent);
        assert_eq!(kb.add_to_collection("C1", "I2").await.unwrap(), Membership::Added);
        assert_eq!(kb.get_collection("C1").await.unwrap().item_ids.len(), 2);
    }

    #[tokio::test]
    async fn test_cross_library_add_is_rejected() {
        let kb = kb();
        let err = kb.add_to_collection("C1", "I3").await.unwrap_err();
        assert!(matches!(err, BackendError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_child_collection_inherits_parent_library() {
        let kb = kb();
        let child = kb.create_collection(None, "Machines", Some("C1")).await.unwrap();
        assert_eq!(child.library_id, "L1");
        assert_eq!(child.parent_id.as_deref(), Some("C1"));

        let err = kb
            .create_collection(Some("L2"), "Elsewhere", Some("C1"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        let kb = kb();
        let a = kb.create_collection(None, "A", None).await.unwrap();
        let b = kb.create_collection(None, "B", None).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.library_id, "L1");
    }

    #[tokio::test]
    async fn test_move_requires_source_membership() {
        let kb = kb();
        let target = kb.create_collection(None, "Target", None).await.unwrap();
        let err = kb.move_item("I2", &target.id, Some("C1")).await.unwrap_err();
        assert!(matches!(err, BackendError::Conflict(_)));

        kb.move_item("I1", &target.id, Some("C1")).await.unwrap();
        assert!(kb.get_collection("C1").await.unwrap().item_ids.is_empty());
        assert!(kb.get_collection(&target.id).await.unwrap().item_ids.contains("I1"));
    }

    #[tokio::test]
    async fn test_delete_item_cleans_up() {
        let kb = kb();
        let note = kb
            .create_note(NoteDraft {
                content: "thoughts".to_string(),
                parent_item_id: Some("I1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        kb.delete_item("I1").await.unwrap();
        assert!(kb.get_collection("C1").await.unwrap().item_ids.is_empty());
        assert!(kb.get_note(&note.id).await.is_err());
        assert!(kb.delete_item("I1").await.is_err());
    }

    #[tokio::test]
    async fn test_delete_collection_with_items() {
        let kb = kb();
        let child = kb.create_collection(None, "Child", Some("C1")).await.unwrap();
        assert_eq!(kb.delete_collection("C1", true).await.unwrap(), 1);
        assert!(kb.get_item("I1").await.is_err());
        assert_eq!(kb.get_collection(&child.id).await.unwrap().parent_id, None);
    }

    #[tokio::test]
    async fn test_snapshot_reflects_changes() {
        let kb = kb();
        kb.create_collection(None, "New", None).await.unwrap();
        let snapshot = kb.snapshot().await;
        assert_eq!(snapshot.collections.len(), 2);
        assert_eq!(snapshot.default_library.as_deref(), Some("L1"));
    }
}
