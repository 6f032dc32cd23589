//! Fixture [`SiteApi`] and records shared by the unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use gardenic_core::api::ApiError;
use gardenic_core::model::{
    Category, CategoryRef, Certificate, CertificateCategory, ContactEntry, ContactKind,
    MessageSubmission, Product, TeamMember,
};
use gardenic_core::products::filter_by_category;

use crate::api::{MessageReceipt, ProductQuery, SiteApi};

pub struct FixtureApi {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub certificates: Vec<Certificate>,
    pub team: Vec<TeamMember>,
    pub contact: Vec<ContactEntry>,
    pub send_result: Result<MessageReceipt, ApiError>,
    pub sent: Mutex<Vec<MessageSubmission>>,
}

impl Default for FixtureApi {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            products: Vec::new(),
            certificates: Vec::new(),
            team: Vec::new(),
            contact: Vec::new(),
            send_result: Ok(MessageReceipt::default()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl FixtureApi {
    pub fn sent(&self) -> Vec<MessageSubmission> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SiteApi for FixtureApi {
    async fn fetch_categories(&self) -> Vec<Category> {
        self.categories.clone()
    }

    async fn fetch_products(&self, query: &ProductQuery) -> Vec<Product> {
        match &query.category_id {
            Some(id) => filter_by_category(self.products.clone(), id),
            None => self.products.clone(),
        }
    }

    async fn fetch_product(&self, id: &str) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    async fn fetch_certificates(&self) -> Vec<Certificate> {
        self.certificates.clone()
    }

    async fn fetch_team(&self) -> Vec<TeamMember> {
        self.team.clone()
    }

    async fn fetch_contact(&self) -> Vec<ContactEntry> {
        self.contact.clone()
    }

    async fn send_message(
        &self,
        message: &MessageSubmission,
    ) -> Result<MessageReceipt, ApiError> {
        self.sent.lock().unwrap().push(message.clone());
        self.send_result.clone()
    }
}

pub fn category(id: &str, name: &str, slug: &str, count: u64) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        product_count: count,
        slug: slug.to_string(),
    }
}

pub fn product(id: &str, category: Option<(&str, &str, &str)>) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: format!("Description of {id}"),
        image: format!("https://cdn.example.com/{id}.jpg"),
        category: category.map(|(id, name, slug)| CategoryRef {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
        }),
        created_at: Some(Utc.with_ymd_and_hms(2024, 3, 9, 8, 0, 0).unwrap()),
        in_stock: true,
    }
}

/// Eight products: six herbs (c1) and two spices (c2)
pub fn catalog() -> Vec<Product> {
    let herbs = Some(("c1", "Herbs", "herbs"));
    let spices = Some(("c2", "Spices", "spices"));
    vec![
        product("p1", herbs),
        product("p2", spices),
        product("p3", herbs),
        product("p4", herbs),
        product("p5", herbs),
        product("p6", spices),
        product("p7", herbs),
        product("p8", herbs),
    ]
}

pub fn certificate(id: &str, category: &str, is_active: bool) -> Certificate {
    Certificate {
        id: id.to_string(),
        name: format!("Certificate {id}"),
        description: "Quality assured".to_string(),
        image: format!("{id}.png"),
        is_active,
        category: CertificateCategory::from_tag(category),
    }
}

pub fn team_member(id: &str, is_active: bool) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: format!("Member {id}"),
        position: "Agronomist".to_string(),
        image: format!("{id}.jpg"),
        email: format!("{id}@example.com"),
        phone: "+20 100 200 300".to_string(),
        whatsapp: "+1 (555) 123-4567".to_string(),
        is_active,
    }
}

pub fn contact_entry(kind: &str, value: &str) -> ContactEntry {
    ContactEntry {
        id: format!("{kind}-1"),
        kind: ContactKind::from_tag(kind),
        label: kind.to_string(),
        value: value.to_string(),
    }
}
