//! Presentation widgets layered over rendered markup
//!
//! Grid reflow, lightbox and carousel are optional: sections receive an
//! `Option<&dyn Widgets>` and skip the call when it is `None`. Nothing a
//! section renders depends on whether a widget ran.

use std::sync::Mutex;

use serde::Serialize;

pub trait Widgets: Send + Sync {
    /// Lay out `container` as a filterable grid of `item_selector` elements
    fn reflow_grid(&self, container: &str, item_selector: &str);

    /// Open `selector` links in a lightbox gallery
    fn bind_lightbox(&self, selector: &str);

    /// Turn the children of `container` into an autoplaying carousel
    fn start_carousel(&self, container: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum WidgetCall {
    Grid {
        container: String,
        item_selector: String,
    },
    Lightbox {
        selector: String,
    },
    Carousel {
        container: String,
    },
}

/// [`Widgets`] that only records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingWidgets {
    calls: Mutex<Vec<WidgetCall>>,
}

impl RecordingWidgets {
    pub fn calls(&self) -> Vec<WidgetCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn record(&self, call: WidgetCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

impl Widgets for RecordingWidgets {
    fn reflow_grid(&self, container: &str, item_selector: &str) {
        self.record(WidgetCall::Grid {
            container: container.to_string(),
            item_selector: item_selector.to_string(),
        });
    }

    fn bind_lightbox(&self, selector: &str) {
        self.record(WidgetCall::Lightbox {
            selector: selector.to_string(),
        });
    }

    fn start_carousel(&self, container: &str) {
        self.record(WidgetCall::Carousel {
            container: container.to_string(),
        });
    }
}
