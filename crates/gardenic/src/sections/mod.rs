//! Page sections
//!
//! Every section follows the same path: make sure its container is on the
//! page, fetch, filter or slice, render the fragments in fetch order, then
//! hand the container to a widget when one is available. A section never
//! fails: a missing container, an empty fetch or a missing record is
//! reported as [`SectionStatus::Skipped`] and the page keeps whatever markup
//! it had.

use serde::Serialize;

use crate::api::SiteApi;
use crate::page::Page;
use crate::widgets::Widgets;

pub mod certificates;
pub mod contact;
pub mod products;
pub mod team;

pub use certificates::{init_certificates, render_certificates};
pub use contact::{init_contact, render_contact};
pub use products::{
    extract_product_id, init_product_details, init_products_page, init_recent_work,
};
pub use team::{init_team, render_team};

pub const CERTIFICATES_CONTAINER: &str = ".image_load";
pub const LIGHTBOX_LINKS: &str = ".venobox";
pub const TEAM_CONTAINER: &str = ".team-section .row:not(:first-child)";

pub const FOOTER_ADDRESS: &str = ".footer-address p";
pub const FOOTER_EMAIL: &str = ".footer-email p a";
pub const FOOTER_PHONE: &str = ".footer-phone p a";
pub const CONTACT_ADDRESS: &str = "#contact-address";
pub const CONTACT_EMAIL: &str = "#contact-email";
pub const CONTACT_PHONE: &str = "#contact-phone";

pub const RECENT_WORK_SECTION: &str = "#recent-work-section";
pub const RECENT_PRODUCTS_CONTAINER: &str = "#recent-products-container";
pub const CATEGORY_FILTERS: &str = "#category-filters";
pub const PRODUCTS_CONTAINER: &str = "#products-container";

pub const BREADCRUMB_TITLE: &str = ".breadcumb-title h1";
pub const BREADCRUMB_TEXT: &str = ".breadcumb-content-text span";
pub const PRODUCT_NAME: &str = "#product-name";
pub const PRODUCT_DESCRIPTION: &str = "#product-description";
pub const PRODUCT_CATEGORY: &str = "#product-category";
pub const PRODUCT_DATE: &str = "#product-date";
pub const PRODUCT_IMAGE: &str = "#product-image";
pub const RELATED_CONTAINER: &str = ".portfolio-details-overview + .row";

/// Every selector a section may read or write
pub const KNOWN_SELECTORS: &[&str] = &[
    CERTIFICATES_CONTAINER,
    TEAM_CONTAINER,
    FOOTER_ADDRESS,
    FOOTER_EMAIL,
    FOOTER_PHONE,
    CONTACT_ADDRESS,
    CONTACT_EMAIL,
    CONTACT_PHONE,
    RECENT_WORK_SECTION,
    RECENT_PRODUCTS_CONTAINER,
    CATEGORY_FILTERS,
    PRODUCTS_CONTAINER,
    BREADCRUMB_TITLE,
    BREADCRUMB_TEXT,
    PRODUCT_NAME,
    PRODUCT_DESCRIPTION,
    PRODUCT_CATEGORY,
    PRODUCT_DATE,
    PRODUCT_IMAGE,
    RELATED_CONTAINER,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Certificates,
    Team,
    Contact,
    RecentWork,
    Products,
    ProductDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingContainer(&'static str),
    NoData,
    MissingQueryParam(&'static str),
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionStatus {
    /// Markup was written; `items` is the number of records rendered
    Rendered { items: usize },
    Skipped { reason: SkipReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOutcome {
    pub section: Section,
    #[serde(flatten)]
    pub status: SectionStatus,
}

impl SectionOutcome {
    pub fn rendered(section: Section, items: usize) -> Self {
        log::info!("Rendered {section:?} section with {items} item(s)");
        Self {
            section,
            status: SectionStatus::Rendered { items },
        }
    }

    pub fn skipped(section: Section, reason: SkipReason) -> Self {
        log::debug!("Skipped {section:?} section: {reason:?}");
        Self {
            section,
            status: SectionStatus::Skipped { reason },
        }
    }

    pub fn missing_container(section: Section, selector: &'static str) -> Self {
        Self::skipped(section, SkipReason::MissingContainer(selector))
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.status, SectionStatus::Rendered { .. })
    }
}

/// Which page template is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Home,
    Products,
    ProductDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub kind: PageKind,
    pub outcomes: Vec<SectionOutcome>,
    /// Contact email found on the page, used as the contact form recipient
    pub contact_email: Option<String>,
}

impl PageReport {
    pub fn outcome(&self, section: Section) -> Option<&SectionOutcome> {
        self.outcomes.iter().find(|outcome| outcome.section == section)
    }
}

/// Run every section that belongs on `kind`
///
/// Certificates, team, contact and recent work run on every page and skip
/// themselves when their containers are absent. The sections run
/// concurrently on the current task; none waits on another.
pub async fn render_page(
    api: &dyn SiteApi,
    page: &dyn Page,
    widgets: Option<&dyn Widgets>,
    kind: PageKind,
) -> PageReport {
    let page_sections = async {
        match kind {
            PageKind::Home => None,
            PageKind::Products => Some(init_products_page(api, page, widgets).await),
            PageKind::ProductDetails => Some(init_product_details(api, page).await),
        }
    };

    let (certificates, team, (contact, contact_email), recent_work, page_specific) = futures::join!(
        init_certificates(api, page, widgets),
        init_team(api, page, widgets),
        init_contact(api, page),
        init_recent_work(api, page),
        page_sections,
    );

    let mut outcomes = vec![certificates, team, contact, recent_work];
    outcomes.extend(page_specific);

    PageReport {
        kind,
        outcomes,
        contact_email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::testing::{catalog, certificate, contact_entry, team_member, FixtureApi};
    use crate::widgets::{RecordingWidgets, WidgetCall};

    fn fixture() -> FixtureApi {
        FixtureApi {
            products: catalog(),
            certificates: vec![certificate("x1", "pathway", true)],
            team: vec![team_member("t1", true)],
            contact: vec![contact_entry("email", "info@gardenic.example")],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_render_home_page() {
        let api = fixture();
        let page = MemoryPage::new(KNOWN_SELECTORS.iter().copied());
        let widgets = RecordingWidgets::default();

        let report = render_page(&api, &page, Some(&widgets), PageKind::Home).await;

        assert_eq!(report.outcomes.len(), 4);
        assert!(report.outcomes.iter().all(SectionOutcome::is_rendered));
        assert_eq!(report.contact_email.as_deref(), Some("info@gardenic.example"));
        assert_eq!(
            report.outcome(Section::RecentWork).unwrap().status,
            SectionStatus::Rendered { items: 6 }
        );
        assert!(widgets
            .calls()
            .contains(&WidgetCall::Lightbox {
                selector: LIGHTBOX_LINKS.to_string()
            }));
    }

    #[tokio::test]
    async fn test_render_page_without_containers() {
        let api = fixture();
        let page = MemoryPage::default();

        let report = render_page(&api, &page, None, PageKind::Products).await;

        assert_eq!(report.outcomes.len(), 5);
        assert!(!report.outcomes.iter().any(SectionOutcome::is_rendered));
        assert!(page.snapshot().regions.is_empty());
    }

    #[tokio::test]
    async fn test_render_page_same_markup_with_and_without_widgets() {
        let api = fixture();
        let with_widgets = MemoryPage::new(KNOWN_SELECTORS.iter().copied());
        let without_widgets = MemoryPage::new(KNOWN_SELECTORS.iter().copied());
        let widgets = RecordingWidgets::default();

        render_page(&api, &with_widgets, Some(&widgets), PageKind::Products).await;
        render_page(&api, &without_widgets, None, PageKind::Products).await;

        assert!(!widgets.calls().is_empty());
        assert_eq!(with_widgets.snapshot(), without_widgets.snapshot());
    }

    #[tokio::test]
    async fn test_render_product_details_page() {
        let api = fixture();
        let page = MemoryPage::new(KNOWN_SELECTORS.iter().copied()).with_query("?id=p3");

        let report = render_page(&api, &page, None, PageKind::ProductDetails).await;

        assert_eq!(
            report.outcome(Section::ProductDetails).unwrap().status,
            SectionStatus::Rendered { items: 3 }
        );
        assert_eq!(page.title().as_deref(), Some("Product p3 - Gardenic"));
    }
}
