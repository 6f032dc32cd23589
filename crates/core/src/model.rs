//! Site records, both as the API sends them and as the rest of the crate sees them
//!
//! The `Raw*` types mirror the upstream JSON field names (`_id`, `productCount`,
//! `createdAt`, ...). Everything else works on the normalized records, so a
//! renaming upstream only touches this module and [`crate::api`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category as returned by `GET /categories`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "productCount", default)]
    pub product_count: Option<u64>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Category embedded in a product payload
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawCategoryRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Product category field: populated object or bare id
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum RawCategoryField {
    Embedded(RawCategoryRef),
    Id(String),
}

/// Product as returned by `GET /products` and `GET /products/{id}`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<RawCategoryField>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "inStock", default)]
    pub in_stock: Option<bool>,
}

/// Certificate as returned by `GET /certificates`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawCertificate {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Team member as returned by `GET /team`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawTeamMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<bool>,
}

/// Contact entry as returned by `GET /contact`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawContactEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
    pub value: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub product_count: u64,
    pub slug: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl CategoryRef {
    /// Key used to group products: slug, then name, then id, whichever is set first
    pub fn grouping_key(&self) -> &str {
        [&self.slug, &self.name, &self.id]
            .into_iter()
            .find(|value| !value.is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Same category when the ids match, else when the grouping keys match
    ///
    /// A product fetched on its own may carry only the category id while list
    /// entries carry the populated category, so the id is checked first.
    pub fn same_category(&self, other: &CategoryRef) -> bool {
        if !self.id.is_empty() && self.id == other.id {
            return true;
        }
        let key = self.grouping_key();
        !key.is_empty() && key == other.grouping_key()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: Option<CategoryRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub in_stock: bool,
}

/// Certificate category tag
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(into = "String")]
pub enum CertificateCategory {
    Driveways,
    InProgress,
    Pathway,
    Portfolio,
    Other(String),
}

impl CertificateCategory {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "driveways" => Self::Driveways,
            "in_progress" => Self::InProgress,
            "pathway" => Self::Pathway,
            "portfolio" => Self::Portfolio,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Driveways => "driveways",
            Self::InProgress => "in_progress",
            Self::Pathway => "pathway",
            Self::Portfolio => "portfolio",
            Self::Other(tag) => tag,
        }
    }
}

impl From<CertificateCategory> for String {
    fn from(category: CertificateCategory) -> Self {
        category.as_tag().to_string()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub is_active: bool,
    pub category: CertificateCategory,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub position: String,
    pub image: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub is_active: bool,
}

/// Contact entry type tag
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(into = "String")]
pub enum ContactKind {
    Address,
    Email,
    Phone,
    Other(String),
}

impl ContactKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "address" => Self::Address,
            "email" => Self::Email,
            "phone" => Self::Phone,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Other(tag) => tag,
        }
    }
}

impl From<ContactKind> for String {
    fn from(kind: ContactKind) -> Self {
        kind.as_tag().to_string()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ContactEntry {
    pub id: String,
    pub kind: ContactKind,
    pub label: String,
    pub value: String,
}

/// The first address, email and phone found in the contact entries
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactDetails {
    pub fn from_entries(entries: &[ContactEntry]) -> Self {
        let first = |kind: ContactKind| {
            entries
                .iter()
                .find(|entry| entry.kind == kind)
                .map(|entry| entry.value.clone())
        };

        Self {
            address: first(ContactKind::Address),
            email: first(ContactKind::Email),
            phone: first(ContactKind::Phone),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Body of `POST /messages`
///
/// Used both by the contact form (name, email, phone, message, recipient) and
/// by the footer subscription form (email and `type: "subscription"`).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MessageSubmission {
    pub const SUBSCRIPTION: &'static str = "subscription";

    pub fn subscription(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            kind: Some(Self::SUBSCRIPTION.to_string()),
            ..Default::default()
        }
    }
}
