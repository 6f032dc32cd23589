//! The page a section renders into
//!
//! [`Page`] is the only shared resource of a render: every section writes to
//! it through `&self`, so implementations keep their state behind a lock.
//! Writes aimed at a selector the page does not have are dropped, the same
//! way a query that matches nothing leaves a document untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use gardenic_core::markup::Fragment;
use scraper::{Html, Selector as CssSelector};
use serde::Serialize;

pub trait Page: Send + Sync {
    /// Whether the page has an element matching `selector`
    fn exists(&self, selector: &str) -> bool;

    /// Replace every child of the matched container with `children`, in order
    fn replace_children(&self, selector: &str, children: Vec<Fragment>);

    /// Set the text content of every matched element
    fn set_text(&self, selector: &str, text: &str);

    fn set_inner_html(&self, selector: &str, html: &str);

    fn set_attribute(&self, selector: &str, name: &str, value: &str);

    fn set_title(&self, title: &str);

    /// Value of a query-string parameter of the page URL
    fn query_param(&self, name: &str) -> Option<String>;
}

/// Everything written to one selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Region {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Fragment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_html: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub title: Option<String>,
    pub regions: BTreeMap<String, Region>,
}

/// [`Page`] kept in memory
///
/// The set of selectors that exist is fixed at construction, either listed
/// explicitly or detected in an HTML template.
#[derive(Debug, Default)]
pub struct MemoryPage {
    present: BTreeSet<String>,
    query: BTreeMap<String, String>,
    state: Mutex<PageSnapshot>,
}

impl MemoryPage {
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: selectors.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Probe `template` for each candidate selector and keep those that match
    ///
    /// Candidates that are not valid CSS selectors are treated as absent.
    pub fn from_template(template: &str, candidates: &[&str]) -> Self {
        let document = Html::parse_document(template);

        let present = candidates.iter().filter(|candidate| {
            match CssSelector::parse(candidate) {
                Ok(selector) => document.select(&selector).next().is_some(),
                Err(e) => {
                    log::debug!("Skipping selector {candidate:?}: {e:?}");
                    false
                }
            }
        });

        Self::new(present.copied())
    }

    /// Parse a query string such as `?id=abc&ref=home`
    ///
    /// Values are form-decoded and the first occurrence of a name wins.
    pub fn with_query(mut self, query: &str) -> Self {
        let pairs = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes());
        for (name, value) in pairs {
            self.query
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        self
    }

    pub fn with_query_param(mut self, name: &str, value: &str) -> Self {
        self.query.insert(name.to_string(), value.to_string());
        self
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.present.iter().map(String::as_str)
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.lock().clone()
    }

    pub fn region(&self, selector: &str) -> Option<Region> {
        self.lock().regions.get(selector).cloned()
    }

    pub fn title(&self) -> Option<String> {
        self.lock().title.clone()
    }

    fn lock(&self) -> MutexGuard<'_, PageSnapshot> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self, selector: &str, update: impl FnOnce(&mut Region)) {
        if !self.exists(selector) {
            return;
        }
        update(self.lock().regions.entry(selector.to_string()).or_default());
    }
}

impl Page for MemoryPage {
    fn exists(&self, selector: &str) -> bool {
        self.present.contains(selector)
    }

    fn replace_children(&self, selector: &str, children: Vec<Fragment>) {
        self.write(selector, |region| {
            region.children = children;
            region.text = None;
            region.inner_html = None;
        });
    }

    fn set_text(&self, selector: &str, text: &str) {
        self.write(selector, |region| {
            region.children.clear();
            region.inner_html = None;
            region.text = Some(text.to_string());
        });
    }

    fn set_inner_html(&self, selector: &str, html: &str) {
        self.write(selector, |region| {
            region.children.clear();
            region.text = None;
            region.inner_html = Some(html.to_string());
        });
    }

    fn set_attribute(&self, selector: &str, name: &str, value: &str) {
        self.write(selector, |region| {
            region
                .attributes
                .insert(name.to_string(), value.to_string());
        });
    }

    fn set_title(&self, title: &str) {
        self.lock().title = Some(title.to_string());
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.query.get(name).cloned()
    }
}
