//! API envelope decoding and normalization
//!
//! Every endpoint answers `{ "success": bool, "data": ..., "message"?: string }`.
//! Decoding is strict: a `success: false` envelope, a body that is not JSON,
//! or a single payload item of the wrong shape fails the whole response. The
//! shell decides what a failure means for each caller.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::{
    Category, CategoryRef, Certificate, CertificateCategory, ContactEntry, ContactKind, Product,
    RawCategory, RawCategoryField, RawCertificate, RawContactEntry, RawProduct, RawTeamMember,
    TeamMember,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("{0}")]
    Rejected(String),
}

/// Response envelope shared by every endpoint
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiEnvelope {
    /// Fail unless the API reported success
    pub fn ensure_success(self, fallback: &str) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }

    /// Decode `data` as a list of `T`
    ///
    /// A missing or null `data` on a successful envelope is an empty list.
    pub fn into_list<T: DeserializeOwned>(self) -> Result<Vec<T>, ApiError> {
        let envelope = self.ensure_success("Request failed")?;
        match envelope.data {
            None | Some(serde_json::Value::Null) => Ok(Vec::new()),
            Some(data) => serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string())),
        }
    }

    /// Decode `data` as a single `T`
    pub fn into_item<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let envelope = self.ensure_success("Request failed")?;
        let data = envelope
            .data
            .ok_or_else(|| ApiError::Decode("Response has no data".to_string()))?;
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

pub fn decode_envelope(body: &str) -> Result<ApiEnvelope, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    decode_envelope(body)?.into_list()
}

pub fn decode_item<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    decode_envelope(body)?.into_item()
}

/// Parse an upstream timestamp; anything that is not RFC 3339 is dropped
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn normalize_categories(raw: Vec<RawCategory>) -> Vec<Category> {
    raw.into_iter()
        .map(|category| Category {
            id: category.id,
            name: category.name,
            product_count: category.product_count.unwrap_or(0),
            slug: category.slug.unwrap_or_default(),
        })
        .collect()
}

fn normalize_category_field(field: RawCategoryField) -> CategoryRef {
    match field {
        RawCategoryField::Embedded(category) => CategoryRef {
            id: category.id,
            name: category.name.unwrap_or_default(),
            slug: category.slug.unwrap_or_default(),
        },
        RawCategoryField::Id(id) => CategoryRef {
            id,
            name: String::new(),
            slug: String::new(),
        },
    }
}

pub fn normalize_product(product: RawProduct) -> Product {
    Product {
        created_at: parse_timestamp(product.created_at.as_deref()),
        id: product.id,
        name: product.name,
        description: product.description.unwrap_or_default(),
        image: product.image.unwrap_or_default(),
        category: product.category.map(normalize_category_field),
        in_stock: product.in_stock.unwrap_or(false),
    }
}

pub fn normalize_products(raw: Vec<RawProduct>) -> Vec<Product> {
    raw.into_iter().map(normalize_product).collect()
}

pub fn normalize_certificates(raw: Vec<RawCertificate>) -> Vec<Certificate> {
    raw.into_iter()
        .map(|certificate| Certificate {
            id: certificate.id,
            name: certificate.name,
            description: certificate.description.unwrap_or_default(),
            image: certificate.image.unwrap_or_default(),
            is_active: certificate.is_active.unwrap_or(false),
            category: CertificateCategory::from_tag(certificate.category.as_deref().unwrap_or("")),
        })
        .collect()
}

pub fn normalize_team(raw: Vec<RawTeamMember>) -> Vec<TeamMember> {
    raw.into_iter()
        .map(|member| TeamMember {
            id: member.id,
            name: member.name,
            position: member.position.unwrap_or_default(),
            image: member.image.unwrap_or_default(),
            email: member.email.unwrap_or_default(),
            phone: member.phone.unwrap_or_default(),
            whatsapp: member.whatsapp.unwrap_or_default(),
            is_active: member.is_active.unwrap_or(false),
        })
        .collect()
}

pub fn normalize_contact(raw: Vec<RawContactEntry>) -> Vec<ContactEntry> {
    raw.into_iter()
        .map(|entry| ContactEntry {
            id: entry.id,
            kind: ContactKind::from_tag(&entry.kind),
            label: entry.label.unwrap_or_default(),
            value: entry.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn products_body(count: usize) -> String {
        let items: Vec<serde_json::Value> = (1..=count)
            .map(|i| {
                json!({
                    "_id": format!("p{i}"),
                    "name": format!("Product {i}"),
                    "description": "Dried leaves",
                    "image": format!("https://cdn.example.com/p{i}.jpg"),
                    "category": { "_id": "c1", "name": "Herbs", "slug": "herbs" },
                    "createdAt": "2024-01-05T10:30:00.000Z",
                    "inStock": true
                })
            })
            .collect();
        json!({ "success": true, "data": items }).to_string()
    }

    #[test]
    fn test_decode_list_products() {
        let raw: Vec<RawProduct> = decode_list(&products_body(8)).unwrap();
        let products = normalize_products(raw);

        assert_eq!(products.len(), 8);
        assert_eq!(products[0].id, "p1");
        assert_eq!(products[7].id, "p8");
        let category = products[0].category.as_ref().unwrap();
        assert_eq!(category.id, "c1");
        assert_eq!(category.slug, "herbs");
        assert!(products[0].in_stock);
        let created = products[0].created_at.unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2024, 1, 5));
        assert_eq!(created.hour(), 10);
    }

    #[test]
    fn test_decode_list_rejected() {
        let body = json!({ "success": false, "message": "Database offline" }).to_string();
        let result = decode_list::<RawCategory>(&body);
        assert_eq!(
            result.unwrap_err(),
            ApiError::Rejected("Database offline".to_string())
        );
    }

    #[test]
    fn test_decode_list_rejected_without_message() {
        let body = json!({ "success": false }).to_string();
        let result = decode_list::<RawCategory>(&body);
        assert_eq!(
            result.unwrap_err(),
            ApiError::Rejected("Request failed".to_string())
        );
    }

    #[test]
    fn test_decode_list_malformed_json() {
        let result = decode_list::<RawCategory>("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_decode_list_malformed_item_fails_whole_response() {
        let body = json!({
            "success": true,
            "data": [
                { "_id": "c1", "name": "Herbs" },
                { "name": "missing id" }
            ]
        })
        .to_string();
        assert!(matches!(
            decode_list::<RawCategory>(&body),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_list_null_data_is_empty() {
        let body = json!({ "success": true, "data": null }).to_string();
        let list: Vec<RawCategory> = decode_list(&body).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_decode_item_without_data() {
        let body = json!({ "success": true }).to_string();
        assert!(matches!(
            decode_item::<RawProduct>(&body),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_normalize_categories_defaults() {
        let body = json!({
            "success": true,
            "data": [
                { "_id": "c1", "name": "Herbs", "productCount": 4, "slug": "herbs" },
                { "_id": "c2", "name": "Spices", "productCount": null }
            ]
        })
        .to_string();
        let categories = normalize_categories(decode_list(&body).unwrap());

        assert_eq!(categories[0].product_count, 4);
        assert_eq!(categories[1].product_count, 0);
        assert_eq!(categories[1].slug, "");
    }

    #[test]
    fn test_normalize_product_with_bare_category_and_bad_date() {
        let body = json!({
            "success": true,
            "data": { "_id": "p1", "name": "Basil", "category": "c3", "createdAt": "yesterday" }
        })
        .to_string();
        let product = normalize_product(decode_item(&body).unwrap());

        assert_eq!(product.category.unwrap().id, "c3");
        assert!(product.created_at.is_none());
        assert!(!product.in_stock);
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_normalize_certificates_and_team() {
        let certificates = normalize_certificates(vec![RawCertificate {
            id: "x1".to_string(),
            name: "Organic".to_string(),
            description: None,
            image: Some("cert.png".to_string()),
            is_active: Some(true),
            category: Some("pathway".to_string()),
        }]);
        assert_eq!(certificates[0].category, CertificateCategory::Pathway);
        assert!(certificates[0].is_active);

        let team = normalize_team(vec![RawTeamMember {
            id: "t1".to_string(),
            name: "Mona".to_string(),
            position: Some("Farmer".to_string()),
            image: None,
            email: None,
            phone: None,
            whatsapp: Some("+20 100".to_string()),
            is_active: None,
        }]);
        assert_eq!(team[0].whatsapp, "+20 100");
        assert!(!team[0].is_active);
    }

    #[test]
    fn test_normalize_contact_kinds() {
        let body = json!({
            "success": true,
            "data": [
                { "_id": "1", "type": "address", "label": "Office", "value": "Cairo" },
                { "_id": "2", "type": "fax", "value": "123" }
            ]
        })
        .to_string();
        let contact = normalize_contact(decode_list(&body).unwrap());

        assert_eq!(contact[0].kind, ContactKind::Address);
        assert_eq!(contact[0].label, "Office");
        assert_eq!(contact[1].kind, ContactKind::Other("fax".to_string()));
    }
}
