//! Display-only projection of the collection for the list view.

use std::str::FromStr;

use crate::domain::{Platform, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Manual order as stored (drag-reorder).
    #[default]
    Stored,
    /// Earliest `scheduledFor` first; ties keep stored order.
    Chronological,
}

impl FromStr for ListOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "stored" | "manual" => Ok(ListOrder::Stored),
            "chronological" | "scheduled" => Ok(ListOrder::Chronological),
            other => Err(format!("Unknown list order: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub platform: Option<Platform>,
    pub order: ListOrder,
}

impl ListQuery {
    pub fn apply(&self, posts: Vec<Post>) -> Vec<Post> {
        let mut visible: Vec<Post> = posts
            .into_iter()
            .filter(|post| self.platform.is_none_or(|p| post.targets(p)))
            .collect();

        if self.order == ListOrder::Chronological {
            visible.sort_by_key(|post| post.scheduled_for);
        }
        visible
    }
}
