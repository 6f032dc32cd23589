//! Data Access Layer for the site API
//!
//! [`SiteApi`] has one method per resource so sections and forms can be driven
//! by any implementation; [`HttpSiteApi`] is the one that talks to the server.
//!
//! Read accessors never fail: a network error, a body that is not JSON, a
//! `success: false` envelope or a malformed item is logged and turns into an
//! empty list (or `None`). Only [`SiteApi::send_message`] reports failures,
//! because the form that calls it has to tell the visitor.

use async_trait::async_trait;
use gardenic_core::api::{
    decode_envelope, normalize_categories, normalize_certificates, normalize_contact,
    normalize_product, normalize_products, normalize_team, ApiEnvelope, ApiError,
};
use gardenic_core::model::{
    Category, Certificate, ContactEntry, MessageSubmission, Product, RawProduct, TeamMember,
};
use gardenic_core::products::filter_by_category;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::prelude::*;

/// Filters for [`SiteApi::fetch_products`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category_id: Option<String>,
}

impl ProductQuery {
    pub fn in_category(category_id: impl Into<String>) -> Self {
        Self {
            category_id: Some(category_id.into()),
        }
    }
}

/// Successful `POST /messages` response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageReceipt {
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
}

#[async_trait]
pub trait SiteApi: Send + Sync {
    async fn fetch_categories(&self) -> Vec<Category>;

    async fn fetch_products(&self, query: &ProductQuery) -> Vec<Product>;

    async fn fetch_product(&self, id: &str) -> Option<Product>;

    async fn fetch_certificates(&self) -> Vec<Certificate>;

    async fn fetch_team(&self) -> Vec<TeamMember>;

    async fn fetch_contact(&self) -> Vec<ContactEntry>;

    async fn send_message(&self, message: &MessageSubmission)
        -> Result<MessageReceipt, ApiError>;
}

/// [`SiteApi`] over HTTP
///
/// Every call is a fresh round trip: no caching, no retries, no timeout.
#[derive(Debug, Clone)]
pub struct HttpSiteApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSiteApi {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decode a response body as an envelope
    ///
    /// The envelope is trusted over the status code; a non-JSON body on an
    /// error status is reported as an HTTP error.
    async fn read_envelope(response: reqwest::Response) -> Result<ApiEnvelope, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match decode_envelope(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(ApiError::Http {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(e),
        }
    }

    async fn get_envelope(&self, path: &str) -> Result<ApiEnvelope, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_envelope(response).await
    }

    async fn post_message(
        &self,
        message: &MessageSubmission,
    ) -> Result<MessageReceipt, ApiError> {
        let response = self
            .client
            .post(self.url("/messages"))
            .json(message)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let envelope = Self::read_envelope(response)
            .await?
            .ensure_success("Failed to send message")?;

        Ok(MessageReceipt {
            message: envelope.message,
            data: envelope.data,
        })
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Vec<T> {
        match self
            .get_envelope(path)
            .await
            .and_then(ApiEnvelope::into_list::<T>)
        {
            Ok(items) => items,
            Err(e) => {
                log::error!("Error fetching {resource}: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl SiteApi for HttpSiteApi {
    async fn fetch_categories(&self) -> Vec<Category> {
        normalize_categories(self.fetch_list("/categories", "categories").await)
    }

    async fn fetch_products(&self, query: &ProductQuery) -> Vec<Product> {
        let products = normalize_products(self.fetch_list("/products", "products").await);

        match &query.category_id {
            Some(category_id) => filter_by_category(products, category_id),
            None => products,
        }
    }

    async fn fetch_product(&self, id: &str) -> Option<Product> {
        let path = format!("/products/{}", urlencoding::encode(id));

        match self
            .get_envelope(&path)
            .await
            .and_then(|envelope| envelope.ensure_success("Failed to fetch product"))
            .and_then(ApiEnvelope::into_item::<RawProduct>)
        {
            Ok(raw) => Some(normalize_product(raw)),
            Err(e) => {
                log::error!("Error fetching product {id}: {e}");
                None
            }
        }
    }

    async fn fetch_certificates(&self) -> Vec<Certificate> {
        normalize_certificates(self.fetch_list("/certificates", "certificates").await)
    }

    async fn fetch_team(&self) -> Vec<TeamMember> {
        normalize_team(self.fetch_list("/team", "team").await)
    }

    async fn fetch_contact(&self) -> Vec<ContactEntry> {
        normalize_contact(self.fetch_list("/contact", "contact info").await)
    }

    async fn send_message(
        &self,
        message: &MessageSubmission,
    ) -> Result<MessageReceipt, ApiError> {
        let result = self.post_message(message).await;

        if let Err(e) = &result {
            log::error!("Error sending message: {e}");
        }

        result
    }
}
