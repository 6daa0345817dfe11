use std::sync::Arc;

use crate::artwork::Artwork;
use crate::theme::Rgba;

/// Number of distinct row shapes a list can hand out.
pub const ROW_SHAPE_COUNT: usize = 2;

/// Layout variant a `RowView` was built for.
///
/// A view built for one shape is never rebound as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowShape {
    /// Thumbnail plus two lines of text.
    Minimal,
    /// Adds line three, the tinted background image, and play-on-tap.
    Extended,
}

impl RowShape {
    /// Dense index for per-shape tables.
    pub fn index(self) -> usize {
        match self {
            Self::Minimal => 0,
            Self::Extended => 1,
        }
    }

    /// Terminal lines a row of this shape occupies.
    pub fn height(self) -> u16 {
        match self {
            Self::Minimal => 2,
            Self::Extended => 3,
        }
    }
}

/// Identity of one image slot, unique for the lifetime of a `RowPool`.
///
/// Asynchronous artwork completions carry this id back to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u64);

/// Interaction attached to a row's thumbnail.
///
/// Carries no position: the target row is resolved from the view's live
/// binding when the action fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    PlayArtist,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSlot {
    text: String,
}

impl TextSlot {
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySlot {
    color: Option<Rgba>,
}

impl OverlaySlot {
    pub fn set_background_color(&mut self, color: Rgba) {
        self.color = Some(color);
    }

    pub fn color(&self) -> Option<Rgba> {
        self.color
    }

    pub fn clear(&mut self) {
        self.color = None;
    }
}

/// Target of an asynchronous artwork load.
///
/// `requested_key` is the key of the most recent load aimed at this slot;
/// completions for any other key are discarded. A slot is pending while it
/// has a requested key but neither artwork nor a recorded failure.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    id: SlotId,
    requested_key: Option<String>,
    artwork: Option<Arc<Artwork>>,
    failed: bool,
}

impl ImageSlot {
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            requested_key: None,
            artwork: None,
            failed: false,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn requested_key(&self) -> Option<&str> {
        self.requested_key.as_deref()
    }

    pub fn artwork(&self) -> Option<&Arc<Artwork>> {
        self.artwork.as_ref()
    }

    /// True when the load for the current key failed.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// True while a load is outstanding for the current key.
    pub fn is_pending(&self) -> bool {
        self.requested_key.is_some() && self.artwork.is_none() && !self.failed
    }

    /// Aim the slot at `key`, dropping whatever it showed before.
    pub fn request(&mut self, key: &str) {
        self.requested_key = Some(key.to_string());
        self.artwork = None;
        self.failed = false;
    }

    /// Show `artwork` if the slot still wants `key`. Returns whether it was written.
    pub fn fill(&mut self, key: &str, artwork: Arc<Artwork>) -> bool {
        if self.requested_key.as_deref() != Some(key) {
            return false;
        }
        self.artwork = Some(artwork);
        self.failed = false;
        true
    }

    /// Record that the load for `key` failed, if the slot still wants it.
    /// Returns whether the slot changed.
    pub fn fail(&mut self, key: &str) -> bool {
        if self.requested_key.as_deref() != Some(key) || self.failed {
            return false;
        }
        self.failed = true;
        true
    }

    pub fn clear(&mut self) {
        self.requested_key = None;
        self.artwork = None;
        self.failed = false;
    }
}

/// Reusable bundle of the visual elements of one row.
///
/// Views are handed out by `RowPool` and repopulated on every bind; they are
/// never torn down by the adapter.
#[derive(Debug, Clone)]
pub struct RowView {
    shape: RowShape,
    pub line_one: TextSlot,
    pub line_two: TextSlot,
    pub line_three: TextSlot,
    pub overlay: OverlaySlot,
    pub image: ImageSlot,
    pub background: ImageSlot,
    pub thumbnail_action: Option<RowAction>,
    bound_position: Option<usize>,
}

impl RowView {
    pub(crate) fn new(shape: RowShape, image: SlotId, background: SlotId) -> Self {
        Self {
            shape,
            line_one: TextSlot::default(),
            line_two: TextSlot::default(),
            line_three: TextSlot::default(),
            overlay: OverlaySlot::default(),
            image: ImageSlot::new(image),
            background: ImageSlot::new(background),
            thumbnail_action: None,
            bound_position: None,
        }
    }

    pub fn shape(&self) -> RowShape {
        self.shape
    }

    /// Position this view is currently bound to, if any.
    pub fn bound_position(&self) -> Option<usize> {
        self.bound_position
    }

    pub(crate) fn bind_to(&mut self, position: usize) {
        self.bound_position = Some(position);
    }

    pub(crate) fn unbind(&mut self) {
        self.bound_position = None;
    }

    /// Clear every slot and the thumbnail action, keeping shape and binding.
    pub fn reset(&mut self) {
        self.line_one.clear();
        self.line_two.clear();
        self.line_three.clear();
        self.overlay.clear();
        self.image.clear();
        self.background.clear();
        self.thumbnail_action = None;
    }

    /// Mutable access to the image slot with the given id, if it belongs to this view.
    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut ImageSlot> {
        if self.image.id() == id {
            Some(&mut self.image)
        } else if self.background.id() == id {
            Some(&mut self.background)
        } else {
            None
        }
    }

    /// True when no text has been written to the view.
    pub fn is_empty(&self) -> bool {
        self.line_one.text().is_empty()
            && self.line_two.text().is_empty()
            && self.line_three.text().is_empty()
    }
}
