//! One widget per id.
//!
//! Hosts that may initialize the widget more than once (re-running an embed
//! snippet, a hot reload) go through a [`WidgetRegistry`]. A repeat call for
//! a registered id keeps the running instance.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::warn;

use chatbot_client::ChatBackend;
use chatbot_core::InitError;
use chatbot_settings::{WidgetConfig, resolve};

use crate::errors::WidgetError;
use crate::surface::PresentationSurface;
use crate::widget::ChatWidget;

/// Owns running widgets keyed by widget id.
///
/// No lock is held while a widget renders, so a surface may query the
/// registry from [`PresentationSurface::render`].
#[derive(Default)]
pub struct WidgetRegistry {
    widgets: Mutex<HashMap<String, Arc<ChatWidget>>>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a widget, or return the one already registered under its id.
    pub fn get_or_start(
        &self,
        config: WidgetConfig,
        backend: Arc<dyn ChatBackend>,
        surface: Arc<dyn PresentationSurface>,
        origin: Option<&str>,
    ) -> Result<Arc<ChatWidget>, InitError> {
        let widget_id = config.widget_id.clone();
        self.get_or_insert_with(&widget_id, || {
            ChatWidget::start(config, backend, surface, origin)
        })
    }

    /// [`get_or_start`](Self::get_or_start) with option resolution and the
    /// HTTP backend.
    pub fn get_or_init(
        &self,
        options: Value,
        surface: Arc<dyn PresentationSurface>,
        origin: Option<&str>,
    ) -> Result<Arc<ChatWidget>, WidgetError> {
        let config = resolve(options);
        let widget_id = config.widget_id.clone();
        self.get_or_insert_with(&widget_id, || {
            ChatWidget::start_http(config, surface, origin)
        })
    }

    /// Start a widget, failing if its id is already registered.
    pub fn start_new(
        &self,
        config: WidgetConfig,
        backend: Arc<dyn ChatBackend>,
        surface: Arc<dyn PresentationSurface>,
        origin: Option<&str>,
    ) -> Result<Arc<ChatWidget>, InitError> {
        let widget_id = config.widget_id.clone();
        if self.widgets.lock().contains_key(&widget_id) {
            return Err(InitError::AlreadyRegistered { widget_id });
        }

        let widget = Arc::new(ChatWidget::start(config, backend, surface, origin)?);
        match self.widgets.lock().entry(widget_id) {
            Entry::Occupied(entry) => Err(InitError::AlreadyRegistered {
                widget_id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(widget).clone()),
        }
    }

    /// The map lock is released while `start` runs, so a surface may call
    /// back into the registry from `render`. If another caller registers the
    /// same id in the meantime, theirs is kept and the new widget is dropped.
    fn get_or_insert_with<E, F>(&self, widget_id: &str, start: F) -> Result<Arc<ChatWidget>, E>
    where
        F: FnOnce() -> Result<ChatWidget, E>,
    {
        if let Some(existing) = self.get(widget_id) {
            warn!(widget_id, "chat widget already initialized");
            return Ok(existing);
        }

        let widget = Arc::new(start()?);
        match self.widgets.lock().entry(widget_id.to_string()) {
            Entry::Occupied(entry) => {
                warn!(widget_id, "chat widget initialized concurrently, keeping the first");
                Ok(entry.get().clone())
            }
            Entry::Vacant(entry) => Ok(entry.insert(widget).clone()),
        }
    }

    /// The widget registered under `widget_id`.
    pub fn get(&self, widget_id: &str) -> Option<Arc<ChatWidget>> {
        self.widgets.lock().get(widget_id).cloned()
    }

    /// Unregister and return a widget.
    pub fn remove(&self, widget_id: &str) -> Option<Arc<ChatWidget>> {
        self.widgets.lock().remove(widget_id)
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.widgets.lock().len()
    }

    /// Whether no widgets are registered.
    pub fn is_empty(&self) -> bool {
        self.widgets.lock().is_empty()
    }
}
