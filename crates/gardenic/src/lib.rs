//! Gardenic site data layer
//!
//! Fetches categories, products, certificates, team members and contact
//! details from the site API and renders them into page templates, and
//! submits the contact and subscription forms. The pure parts (records,
//! envelope decoding, markup) live in `gardenic_core`; this crate owns the
//! HTTP client, the page and widget seams, and the section and form logic
//! that drives them.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod page;
pub mod prelude;
pub mod sections;
pub mod widgets;

#[cfg(test)]
mod testing;
