//! Brush widget boundary and brush-to-domain inversion.
//!
//! The pointer/drag state machine of a brush belongs to the host UI. This
//! module only reads a selection snapshot and turns it into a time range.

mod inversion;

pub use inversion::{BrushOutcome, invert_band, invert_brush};

use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Pixel extent `(p0, p1)` along the brushed axis, in gesture order.
pub type BrushExtent = (f64, f64);

/// Read side of an external brush widget.
pub trait Brush {
    /// Current selection, or `None` when nothing is brushed.
    fn current_selection(&self) -> Option<BrushExtent>;
}

impl Brush for Option<BrushExtent> {
    fn current_selection(&self) -> Option<BrushExtent> {
        *self
    }
}

/// Receives brush selection changes.
pub trait BrushListener {
    fn id(&self) -> &str;
    fn on_selection_changed(&mut self, selection: Option<BrushExtent>);
}

/// Selection holder that notifies registered listeners on every change.
///
/// Hosts that already own a brush widget can implement [`Brush`] directly
/// instead.
#[derive(Default)]
pub struct BrushState {
    selection: Option<BrushExtent>,
    listeners: Vec<Box<dyn BrushListener>>,
}

impl std::fmt::Debug for BrushState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrushState")
            .field("selection", &self.selection)
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl BrushState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener with a unique, non-empty id.
    pub fn register_listener(&mut self, listener: Box<dyn BrushListener>) -> ChartResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(ChartError::InvalidData(
                "brush listener id must not be empty".to_owned(),
            ));
        }
        if self.has_listener(&listener_id) {
            return Err(ChartError::InvalidData(format!(
                "brush listener with id `{listener_id}` is already registered"
            )));
        }
        debug!(%listener_id, "register brush listener");
        self.listeners.push(listener);
        Ok(())
    }

    /// Unregisters a listener by id. Returns `true` when removed.
    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        if let Some(position) = self
            .listeners
            .iter()
            .position(|entry| entry.id() == listener_id)
        {
            self.listeners.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.listeners
            .iter()
            .any(|listener| listener.id() == listener_id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replaces the selection, notifying listeners only when it changed.
    pub fn set_selection(&mut self, selection: Option<BrushExtent>) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        for listener in &mut self.listeners {
            listener.on_selection_changed(selection);
        }
    }

    pub fn clear(&mut self) {
        self.set_selection(None);
    }
}

impl Brush for BrushState {
    fn current_selection(&self) -> Option<BrushExtent> {
        self.selection
    }
}
