use super::{Post, PostId};

/// Edit-mode state: at most one post is loaded into the form or awaiting
/// delete confirmation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Editing(Post),
    ConfirmingDelete(PostId),
}

impl Selection {
    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    pub fn editing(&self) -> Option<&Post> {
        match self {
            Selection::Editing(post) => Some(post),
            _ => None,
        }
    }

    pub fn pending_delete(&self) -> Option<&PostId> {
        match self {
            Selection::ConfirmingDelete(id) => Some(id),
            _ => None,
        }
    }

    /// Id of the selected post, whichever state refers to it.
    pub fn post_id(&self) -> Option<&PostId> {
        match self {
            Selection::Idle => None,
            Selection::Editing(post) => Some(&post.id),
            Selection::ConfirmingDelete(id) => Some(id),
        }
    }

    pub fn targets(&self, id: &PostId) -> bool {
        self.post_id() == Some(id)
    }

    /// Return to `Idle` if the selection refers to `id`.
    pub(crate) fn release(&mut self, id: &PostId) -> bool {
        if self.targets(id) {
            *self = Selection::Idle;
            true
        } else {
            false
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Selection::Idle => "idle",
            Selection::Editing(_) => "editing",
            Selection::ConfirmingDelete(_) => "confirming_delete",
        }
    }
}
