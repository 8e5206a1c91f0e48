//! Compose/edit form model.
//!
//! Holds what the form view shows, tracks an in-flight image decode explicitly and
//! turns a submission into a validated [`NewPost`].

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::domain::{CONTENT_SOFT_LIMIT, ImageData, NewPost, Platform, Post, PostId};
use crate::error::{DomainError, ImageError};

/// Image slot of the form.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageField {
    #[default]
    Empty,
    /// A decode is running; `previous` is what the preview still shows.
    Pending {
        ticket: u64,
        previous: Option<ImageData>,
    },
    Ready(ImageData),
}

/// Handle for one image decode started by [`PostForm::begin_image_decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeTicket(u64);

#[derive(Debug, Clone, PartialEq)]
struct EditTarget {
    id: PostId,
    created: DateTime<Utc>,
}

/// Non-blocking remarks on an otherwise valid submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormWarning {
    ContentTooLong { length: usize },
    ScheduledInPast,
    ImageStillDecoding,
}

impl fmt::Display for FormWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormWarning::ContentTooLong { length } => write!(
                f,
                "Content is {length} characters, over the {CONTENT_SOFT_LIMIT} character limit"
            ),
            FormWarning::ScheduledInPast => f.write_str("Scheduled time is in the past"),
            FormWarning::ImageStillDecoding => {
                f.write_str("Image was still loading and has not been attached")
            }
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub post: NewPost,
    pub warnings: Vec<FormWarning>,
}

impl Submission {
    /// Id of the post being edited, `None` for a new post.
    pub fn edit_target(&self) -> Option<&PostId> {
        self.post.id.as_ref().filter(|_| self.post.created.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub platforms: BTreeSet<Platform>,
    pub schedule_date: Option<NaiveDate>,
    pub schedule_time: Option<NaiveTime>,
    image: ImageField,
    editing: Option<EditTarget>,
    next_ticket: u64,
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate every field from `post` and enter edit mode.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            platforms: post.platforms.clone(),
            schedule_date: Some(post.scheduled_for.date_naive()),
            schedule_time: Some(post.scheduled_for.time()),
            image: post
                .image
                .clone()
                .map_or(ImageField::Empty, ImageField::Ready),
            editing: Some(EditTarget {
                id: post.id.clone(),
                created: post.created,
            }),
            next_ticket: 0,
        }
    }

    pub fn edit_target(&self) -> Option<&PostId> {
        self.editing.as_ref().map(|target| &target.id)
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Flip a platform button. Returns whether it is now selected.
    pub fn toggle_platform(&mut self, platform: Platform) -> bool {
        if self.platforms.remove(&platform) {
            false
        } else {
            self.platforms.insert(platform);
            true
        }
    }

    pub fn set_schedule(&mut self, at: DateTime<Utc>) {
        self.schedule_date = Some(at.date_naive());
        self.schedule_time = Some(at.time());
    }

    /// Date and time fields combined, read as UTC.
    pub fn scheduled_for(&self) -> Option<DateTime<Utc>> {
        let date = self.schedule_date?;
        let time = self.schedule_time?;
        Some(NaiveDateTime::new(date, time).and_utc())
    }

    pub fn image(&self) -> &ImageField {
        &self.image
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self.image, ImageField::Pending { .. })
    }

    /// Image the preview currently shows.
    pub fn visible_image(&self) -> Option<&ImageData> {
        match &self.image {
            ImageField::Empty => None,
            ImageField::Pending { previous, .. } => previous.as_ref(),
            ImageField::Ready(image) => Some(image),
        }
    }

    /// Mark a new file selection as decoding. Supersedes any earlier decode.
    pub fn begin_image_decode(&mut self) -> DecodeTicket {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let previous = self.visible_image().cloned();
        self.image = ImageField::Pending { ticket, previous };
        DecodeTicket(ticket)
    }

    /// Apply the outcome of a decode.
    ///
    /// Results for superseded tickets are dropped. A failed decode restores the
    /// previous image and hands the error back for the alert.
    pub fn complete_image_decode(
        &mut self,
        ticket: DecodeTicket,
        result: Result<ImageData, ImageError>,
    ) -> Result<(), ImageError> {
        let previous = match &self.image {
            ImageField::Pending {
                ticket: current,
                previous,
            } if *current == ticket.0 => previous.clone(),
            _ => {
                tracing::debug!(ticket = ticket.0, "Dropping superseded image decode");
                return Ok(());
            }
        };

        match result {
            Ok(image) => {
                self.image = ImageField::Ready(image);
                Ok(())
            }
            Err(e) => {
                self.image = previous.map_or(ImageField::Empty, ImageField::Ready);
                Err(e)
            }
        }
    }

    pub fn set_image(&mut self, image: Option<ImageData>) {
        self.image = image.map_or(ImageField::Empty, ImageField::Ready);
    }

    /// Validate the fields and build the post to store.
    pub fn submit(&self, now: DateTime<Utc>) -> Result<Submission, DomainError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }
        if self.content.trim().is_empty() {
            errors.push("Content is required".to_string());
        }
        if self.platforms.is_empty() {
            errors.push("Select at least one platform".to_string());
        }
        if self.schedule_date.is_none() {
            errors.push("Schedule date is required".to_string());
        }
        if self.schedule_time.is_none() {
            errors.push("Schedule time is required".to_string());
        }

        let scheduled_for = match self.scheduled_for() {
            Some(at) if errors.is_empty() => at,
            _ => return Err(DomainError::Validation(errors)),
        };

        let mut warnings = Vec::new();
        let length = self.content.chars().count();
        if length > CONTENT_SOFT_LIMIT {
            warnings.push(FormWarning::ContentTooLong { length });
        }
        if scheduled_for <= now {
            warnings.push(FormWarning::ScheduledInPast);
        }
        if self.is_decoding() {
            warnings.push(FormWarning::ImageStillDecoding);
        }

        let mut post = NewPost::new(
            self.title.trim(),
            self.content.clone(),
            self.platforms.iter().copied(),
            scheduled_for,
        );
        post.image = self.visible_image().cloned();
        if let Some(target) = &self.editing {
            post.id = Some(target.id.clone());
            post.created = Some(target.created);
        }

        Ok(Submission { post, warnings })
    }

    /// Back to a blank create form.
    pub fn reset(&mut self) {
        *self = Self {
            next_ticket: self.next_ticket,
            ..Self::default()
        };
    }
}
