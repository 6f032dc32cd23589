//! Core library for gardenic
//!
//! This crate is the **Functional Core** of the gardenic site data layer. It
//! holds everything that can be expressed without I/O:
//!
//! - [`model`]: raw API payloads and the normalized records built from them
//! - [`api`]: response envelope decoding and raw-to-normalized mapping
//! - [`products`]: category filtering, related products, date formatting
//! - [`markup`]: record-to-markup transformations for every page section
//!
//! The `gardenic` crate is the Imperative Shell: it talks to the API, owns the
//! page, and decides where the fragments produced here are inserted. Keeping
//! the transformations pure means they are tested with plain fixture records.
//!
//! ```rust,ignore
//! use gardenic_core::markup::team_member_fragment;
//!
//! let fragment = team_member_fragment(&member);
//! assert!(fragment.html.contains("https://wa.me/15551234567"));
//! ```

pub mod api;
pub mod markup;
pub mod model;
pub mod products;
