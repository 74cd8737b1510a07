//! Interactive edit sessions.
//!
//! A session buffers one round of ROI edits between a data object and a
//! GUI dialog. The object's collection is read once at seeding time and
//! written back only on commit; discarding leaves the object untouched,
//! so no partial edit is ever observable outside the session.

use burn::tensor::backend::Backend;

use rroi_core::{
    roi_title, ImageObj, ImageRoi, Result, RoiItemSpec, RoiShape, SignalObj, SignalRoi,
};

use crate::proxy::{roi_shape_from_item, ProxyKind, RoiProxyItem};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created; proxy handles not attached yet.
    Initialized,
    /// Proxy handles attached; edits accumulating.
    Editing,
    /// Edits written back to the object. Terminal.
    Committed,
    /// Edits dropped. Terminal.
    Discarded,
}

impl SessionState {
    fn is_terminal(self) -> bool {
        matches!(self, SessionState::Committed | SessionState::Discarded)
    }
}

const SIGNAL_KINDS: &[ProxyKind] = &[ProxyKind::XRange];
const IMAGE_KINDS: &[ProxyKind] = &[ProxyKind::Rectangle, ProxyKind::Circle, ProxyKind::Polygon];

/// Converted shape per handle, in order; handles that do not convert yet
/// map to `None`. Used to compare handle lists by membership.
fn shape_values(items: &[Box<dyn RoiProxyItem>]) -> Vec<Option<RoiShape>> {
    items
        .iter()
        .map(|item| roi_shape_from_item(item.as_ref()).ok())
        .collect()
}

/// Shared session mechanics: handle list, lifecycle, modified flag,
/// title renumbering. The signal and image sessions compose this.
struct SessionCore {
    items: Vec<Box<dyn RoiProxyItem>>,
    state: SessionState,
    modified: bool,
    extract_mode: bool,
    single_object: bool,
    accepted: &'static [ProxyKind],
}

impl SessionCore {
    fn new(extract_mode: bool, single_object: bool, accepted: &'static [ProxyKind]) -> Self {
        Self {
            items: Vec::new(),
            state: SessionState::Initialized,
            modified: false,
            extract_mode,
            single_object,
            accepted,
        }
    }

    fn update_titles(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_title(&roi_title(index));
        }
    }

    fn attach_items(&mut self, items: Vec<Box<dyn RoiProxyItem>>) {
        if self.state != SessionState::Initialized {
            log::warn!("proxy handles already attached; ignoring");
            return;
        }
        let accepted = self.accepted;
        self.items = items
            .into_iter()
            .filter(|item| accepted.contains(&item.kind()))
            .collect();
        self.update_titles();
        self.state = SessionState::Editing;
        // In extract mode a pre-populated dialog is immediately
        // confirmable; in edit mode only an actual change enables OK.
        self.modified = self.extract_mode && !self.items.is_empty();
    }

    fn sync_items(&mut self, items: Vec<Box<dyn RoiProxyItem>>) {
        if self.state.is_terminal() {
            return;
        }
        let accepted = self.accepted;
        let items: Vec<_> = items
            .into_iter()
            .filter(|item| accepted.contains(&item.kind()))
            .collect();
        // Replacing one shape with another keeps the count unchanged, so
        // membership is compared by shape value, not by length alone.
        if shape_values(&items) != shape_values(&self.items) {
            self.modified = true;
        }
        self.items = items;
        self.update_titles();
    }

    fn item_moved(&mut self) {
        if !self.state.is_terminal() {
            self.modified = true;
        }
    }

    fn remove_all(&mut self) {
        if self.state.is_terminal() || self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.modified = true;
    }

    fn ok_enabled(&self) -> bool {
        if self.extract_mode {
            self.modified && !self.items.is_empty()
        } else {
            self.modified
        }
    }

    fn set_single_object(&mut self, single_object: bool) {
        if self.state.is_terminal() || self.single_object == single_object {
            return;
        }
        self.single_object = single_object;
        self.modified = true;
    }
}

/// Edit session over a signal object's ROI collection.
///
/// Accepts `XRange` handles only; other kinds present on the plot are
/// silently ignored.
pub struct SignalEditSession {
    core: SessionCore,
}

impl SignalEditSession {
    /// Open a session on `obj`. In extract mode, confirmation requires
    /// at least one shape to extract.
    pub fn new<B: Backend>(obj: &SignalObj<B>, extract_mode: bool) -> Self {
        let single_object = obj.roi().map(SignalRoi::single_object).unwrap_or(false);
        Self {
            core: SessionCore::new(extract_mode, single_object, SIGNAL_KINDS),
        }
    }

    /// Proxy-construction parameters for the object's current shapes,
    /// in display order.
    pub fn seed_specs<B: Backend>(&self, obj: &SignalObj<B>) -> Vec<RoiItemSpec> {
        match obj.roi() {
            Some(roi) => roi.iter_item_specs(obj.frame(), true, true).collect(),
            None => Vec::new(),
        }
    }

    /// Attach the proxy handles built from [`Self::seed_specs`] (plus
    /// any template shapes the dialog adds up front).
    pub fn attach_items(&mut self, items: Vec<Box<dyn RoiProxyItem>>) {
        self.core.attach_items(items);
    }

    /// Replace the handle list after the GUI added or removed items.
    /// Titles are recomputed in order.
    pub fn sync_items(&mut self, items: Vec<Box<dyn RoiProxyItem>>) {
        self.core.sync_items(items);
    }

    /// Record that the user moved or resized an item.
    pub fn item_moved(&mut self) {
        self.core.item_moved();
    }

    /// Drop every handle. Idempotent.
    pub fn remove_all(&mut self) {
        self.core.remove_all();
    }

    /// Whether the dialog's OK action should be enabled.
    pub fn ok_enabled(&self) -> bool {
        self.core.ok_enabled()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.core.state
    }

    /// True once any structural or positional change was recorded.
    pub fn modified(&self) -> bool {
        self.core.modified
    }

    /// Single-object extraction toggle.
    pub fn single_object(&self) -> bool {
        self.core.single_object
    }

    /// Set the single-object extraction toggle.
    pub fn set_single_object(&mut self, single_object: bool) {
        self.core.set_single_object(single_object);
    }

    /// One human-readable line per range, in display order, for the
    /// dialog's info label.
    pub fn range_info_text(&self) -> String {
        self.core
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let (x0, x1) = item.range().ok()?;
                Some(format!("{}: {x0} ≤ x ≤ {x1}", roi_title(index)))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the current shapes back to `obj`, replacing its collection
    /// entirely. An empty handle list removes the collection.
    ///
    /// Any conversion or validation error aborts before the object is
    /// touched and leaves the session editable.
    pub fn commit<B: Backend>(&mut self, obj: &mut SignalObj<B>) -> Result<()> {
        let mut roi = SignalRoi::new();
        for item in &self.core.items {
            let shape = roi_shape_from_item(item.as_ref())?;
            shape.validate()?;
            roi.add_roi(shape)?;
        }
        roi.set_single_object(self.core.single_object);
        log::debug!(
            "committing {} ROI shape(s) to signal '{}'",
            roi.len(),
            obj.title()
        );
        obj.set_roi(if roi.is_empty() { None } else { Some(roi) });
        self.core.state = SessionState::Committed;
        Ok(())
    }

    /// Close the session without touching the object.
    pub fn discard(&mut self) {
        log::debug!("discarding signal ROI edit session");
        self.core.state = SessionState::Discarded;
    }
}

/// Edit session over an image object's ROI collection.
///
/// Accepts rectangle, circle and polygon handles; other kinds present
/// on the plot are silently ignored.
pub struct ImageEditSession {
    core: SessionCore,
}

impl ImageEditSession {
    /// Open a session on `obj`. In extract mode, confirmation requires
    /// at least one shape to extract.
    pub fn new<B: Backend>(obj: &ImageObj<B>, extract_mode: bool) -> Self {
        let single_object = obj.roi().map(ImageRoi::single_object).unwrap_or(false);
        Self {
            core: SessionCore::new(extract_mode, single_object, IMAGE_KINDS),
        }
    }

    /// Proxy-construction parameters for the object's current shapes,
    /// in display order.
    pub fn seed_specs<B: Backend>(&self, obj: &ImageObj<B>) -> Vec<RoiItemSpec> {
        match obj.roi() {
            Some(roi) => roi.iter_item_specs(obj.frame(), true, true).collect(),
            None => Vec::new(),
        }
    }

    /// Attach the proxy handles built from [`Self::seed_specs`] (plus
    /// any template shapes the dialog adds up front).
    pub fn attach_items(&mut self, items: Vec<Box<dyn RoiProxyItem>>) {
        self.core.attach_items(items);
    }

    /// Replace the handle list after the GUI added or removed items.
    /// Titles are recomputed in order.
    pub fn sync_items(&mut self, items: Vec<Box<dyn RoiProxyItem>>) {
        self.core.sync_items(items);
    }

    /// Record that the user moved or resized an item.
    pub fn item_moved(&mut self) {
        self.core.item_moved();
    }

    /// Drop every handle. Idempotent.
    pub fn remove_all(&mut self) {
        self.core.remove_all();
    }

    /// Whether the dialog's OK action should be enabled.
    pub fn ok_enabled(&self) -> bool {
        self.core.ok_enabled()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.core.state
    }

    /// True once any structural or positional change was recorded.
    pub fn modified(&self) -> bool {
        self.core.modified
    }

    /// Single-object extraction toggle.
    pub fn single_object(&self) -> bool {
        self.core.single_object
    }

    /// Set the single-object extraction toggle.
    pub fn set_single_object(&mut self, single_object: bool) {
        self.core.set_single_object(single_object);
    }

    /// Write the current shapes back to `obj`, replacing its collection
    /// entirely. An empty handle list removes the collection.
    ///
    /// Any conversion or validation error aborts before the object is
    /// touched and leaves the session editable.
    pub fn commit<B: Backend>(&mut self, obj: &mut ImageObj<B>) -> Result<()> {
        let mut roi = ImageRoi::new();
        for item in &self.core.items {
            let shape = roi_shape_from_item(item.as_ref())?;
            shape.validate()?;
            roi.add_roi(shape)?;
        }
        roi.set_single_object(self.core.single_object);
        log::debug!(
            "committing {} ROI shape(s) to image '{}'",
            roi.len(),
            obj.title()
        );
        obj.set_roi(if roi.is_empty() { None } else { Some(roi) });
        self.core.state = SessionState::Committed;
        Ok(())
    }

    /// Close the session without touching the object.
    pub fn discard(&mut self) {
        log::debug!("discarding image ROI edit session");
        self.core.state = SessionState::Discarded;
    }
}
