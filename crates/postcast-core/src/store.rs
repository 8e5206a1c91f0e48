//! Post store - the single owner of the scheduled collection and the edit selection.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{NewPost, Post, PostId, Selection};
use crate::error::DomainError;
use crate::notifier::Notifier;
use crate::persistence::PostPersistence;
use crate::ports::KeyValueStorage;

/// Toast shown after [`PostStore::add`].
pub const POST_SCHEDULED: &str = "Post scheduled successfully!";
/// Toast shown after [`PostStore::update`].
pub const POST_UPDATED: &str = "Post updated!";
/// Toast shown after a delete.
pub const POST_DELETED: &str = "Post deleted";
/// Toast shown after [`PostStore::select_for_edit`].
pub const EDITING_ENABLED: &str = "Editing mode enabled";

#[derive(Default)]
struct StoreState {
    posts: Vec<Post>,
    selection: Selection,
}

/// Ordered post collection plus edit-selection.
///
/// Every mutation runs under one lock, including the write-through to storage, so
/// each operation is a single read-modify-write. The collection is written in full
/// after every change. When that write fails the in-memory change is kept, an error
/// notification is shown and the storage error is returned.
pub struct PostStore {
    state: Mutex<StoreState>,
    persistence: PostPersistence,
    notifier: Notifier,
}

impl PostStore {
    /// Open the store on `storage`, loading whatever collection it holds.
    ///
    /// Fails when the stored collection exists but cannot be read.
    pub async fn open(
        storage: Arc<dyn KeyValueStorage>,
        notifier: Notifier,
    ) -> Result<Self, DomainError> {
        Self::with_persistence(PostPersistence::new(storage), notifier).await
    }

    pub async fn with_persistence(
        persistence: PostPersistence,
        notifier: Notifier,
    ) -> Result<Self, DomainError> {
        let posts = persistence.load().await?;
        tracing::info!(count = posts.len(), key = %persistence.key(), "Post store opened");

        Ok(Self {
            state: Mutex::new(StoreState {
                posts,
                selection: Selection::Idle,
            }),
            persistence,
            notifier,
        })
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Snapshot of the collection in stored order.
    pub async fn posts(&self) -> Vec<Post> {
        self.state.lock().await.posts.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.posts.is_empty()
    }

    pub async fn get(&self, id: &PostId) -> Option<Post> {
        let state = self.state.lock().await;
        state.posts.iter().find(|p| &p.id == id).cloned()
    }

    pub async fn selection(&self) -> Selection {
        self.state.lock().await.selection.clone()
    }

    /// Append a post. The caller has already validated it.
    pub async fn add(&self, new_post: NewPost) -> Result<Post, DomainError> {
        let mut state = self.state.lock().await;

        if let Some(id) = &new_post.id
            && state.posts.iter().any(|p| &p.id == id)
        {
            return Err(DomainError::Duplicate(format!("post {id} already exists")));
        }

        let post = new_post.into_post();
        state.posts.push(post.clone());
        self.persist(&state.posts).await?;

        tracing::info!(post_id = %post.id, scheduled_for = %post.scheduled_for, "Post scheduled");
        self.notifier.success(POST_SCHEDULED);
        Ok(post)
    }

    /// Replace the fields of the post with `post.id` in place.
    ///
    /// Position and the original `created` are kept. Returns `None` without touching
    /// anything when no such post exists.
    pub async fn update(&self, post: Post) -> Result<Option<Post>, DomainError> {
        let mut state = self.state.lock().await;

        let Some(slot) = state.posts.iter_mut().find(|p| p.id == post.id) else {
            tracing::debug!(post_id = %post.id, "Update ignored, post not found");
            return Ok(None);
        };
        let created = slot.created;
        *slot = Post { created, ..post };
        let updated = slot.clone();

        state.selection.release(&updated.id);
        self.persist(&state.posts).await?;

        tracing::info!(post_id = %updated.id, "Post updated");
        self.notifier.success(POST_UPDATED);
        Ok(Some(updated))
    }

    /// Remove the post with `id`. Confirmation happens before this is called.
    pub async fn delete(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let mut state = self.state.lock().await;
        self.delete_locked(&mut state, id).await
    }

    /// Load a post into the form: `Idle | Editing | ConfirmingDelete -> Editing`.
    pub async fn select_for_edit(&self, id: &PostId) -> Option<Post> {
        let mut state = self.state.lock().await;
        let post = state.posts.iter().find(|p| &p.id == id).cloned()?;

        state.selection = Selection::Editing(post.clone());
        tracing::debug!(post_id = %id, "Editing post");
        self.notifier.success(EDITING_ENABLED);
        Some(post)
    }

    /// Open the delete confirmation for `id`.
    pub async fn request_delete(&self, id: &PostId) -> Option<Post> {
        let mut state = self.state.lock().await;
        let post = state.posts.iter().find(|p| &p.id == id).cloned()?;

        state.selection = Selection::ConfirmingDelete(id.clone());
        tracing::debug!(post_id = %id, "Awaiting delete confirmation");
        Some(post)
    }

    /// Delete the post awaiting confirmation. No-op when nothing is pending.
    pub async fn confirm_delete(&self) -> Result<Option<Post>, DomainError> {
        let mut state = self.state.lock().await;
        let Some(id) = state.selection.pending_delete().cloned() else {
            return Ok(None);
        };
        self.delete_locked(&mut state, &id).await
    }

    /// Cancel editing or a pending delete.
    pub async fn clear_selection(&self) {
        let mut state = self.state.lock().await;
        if !state.selection.is_idle() {
            tracing::debug!(previous = state.selection.kind(), "Selection cleared");
        }
        state.selection = Selection::Idle;
    }

    /// Move the post at `from` to `to`. Returns whether the order changed.
    pub async fn reorder(&self, from: usize, to: usize) -> Result<bool, DomainError> {
        let mut state = self.state.lock().await;
        let len = state.posts.len();
        if from == to || from >= len || to >= len {
            return Ok(false);
        }

        let post = state.posts.remove(from);
        state.posts.insert(to, post);
        self.persist(&state.posts).await?;

        tracing::debug!(from, to, "Posts reordered");
        Ok(true)
    }

    async fn delete_locked(
        &self,
        state: &mut StoreState,
        id: &PostId,
    ) -> Result<Option<Post>, DomainError> {
        let Some(index) = state.posts.iter().position(|p| &p.id == id) else {
            tracing::debug!(post_id = %id, "Delete ignored, post not found");
            return Ok(None);
        };

        let removed = state.posts.remove(index);
        state.selection.release(id);
        self.persist(&state.posts).await?;

        tracing::info!(post_id = %id, "Post deleted");
        self.notifier.success(POST_DELETED);
        Ok(Some(removed))
    }

    async fn persist(&self, posts: &[Post]) -> Result<(), DomainError> {
        if let Err(e) = self.persistence.save(posts).await {
            tracing::error!(error = %e, count = posts.len(), "Failed to persist posts");
            self.notifier.error(format!("Could not save posts: {e}"));
            return Err(e.into());
        }
        Ok(())
    }
}
