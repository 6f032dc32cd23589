use gardenic_core::markup::{certificate_css_class, certificate_fragment};
use gardenic_core::model::Certificate;

use super::{Section, SectionOutcome, SkipReason, CERTIFICATES_CONTAINER, LIGHTBOX_LINKS};
use crate::api::SiteApi;
use crate::page::Page;
use crate::widgets::Widgets;

/// Grid items inside the certificates container
pub const GRID_ITEM: &str = ".grid-item";

pub async fn init_certificates(
    api: &dyn SiteApi,
    page: &dyn Page,
    widgets: Option<&dyn Widgets>,
) -> SectionOutcome {
    if !page.exists(CERTIFICATES_CONTAINER) {
        return SectionOutcome::missing_container(Section::Certificates, CERTIFICATES_CONTAINER);
    }

    let certificates = api.fetch_certificates().await;
    if certificates.is_empty() {
        return SectionOutcome::skipped(Section::Certificates, SkipReason::NoData);
    }

    let rendered = render_certificates(page, widgets, &certificates);
    SectionOutcome::rendered(Section::Certificates, rendered)
}

/// Replace the certificates grid with the active certificates
///
/// Returns the number of certificates written.
pub fn render_certificates(
    page: &dyn Page,
    widgets: Option<&dyn Widgets>,
    certificates: &[Certificate],
) -> usize {
    let fragments: Vec<_> = certificates
        .iter()
        .filter(|certificate| certificate.is_active)
        .inspect(|certificate| {
            if certificate_css_class(&certificate.category).is_none() {
                log::debug!(
                    "Certificate {} has unknown category {:?}",
                    certificate.id,
                    certificate.category.as_tag()
                );
            }
        })
        .map(certificate_fragment)
        .collect();
    let count = fragments.len();

    page.replace_children(CERTIFICATES_CONTAINER, fragments);

    if let Some(widgets) = widgets {
        widgets.bind_lightbox(LIGHTBOX_LINKS);
        widgets.reflow_grid(CERTIFICATES_CONTAINER, GRID_ITEM);
    }

    count
}
