use gardenic_core::markup::{mailto_href, mailto_link, tel_href, tel_link};
use gardenic_core::model::ContactDetails;

use super::{
    Section, SectionOutcome, SkipReason, CONTACT_ADDRESS, CONTACT_EMAIL, CONTACT_PHONE,
    FOOTER_ADDRESS, FOOTER_EMAIL, FOOTER_PHONE,
};
use crate::api::SiteApi;
use crate::page::Page;

const CONTACT_SELECTORS: [&str; 6] = [
    FOOTER_ADDRESS,
    FOOTER_EMAIL,
    FOOTER_PHONE,
    CONTACT_ADDRESS,
    CONTACT_EMAIL,
    CONTACT_PHONE,
];

/// Fill the footer and contact page with the site's contact details
///
/// Also returns the contact email, which the contact form sends to.
pub async fn init_contact(api: &dyn SiteApi, page: &dyn Page) -> (SectionOutcome, Option<String>) {
    if !CONTACT_SELECTORS.iter().any(|selector| page.exists(selector)) {
        return (
            SectionOutcome::missing_container(Section::Contact, FOOTER_EMAIL),
            None,
        );
    }

    let details = ContactDetails::from_entries(&api.fetch_contact().await);
    if details.is_empty() {
        return (SectionOutcome::skipped(Section::Contact, SkipReason::NoData), None);
    }

    let rendered = render_contact(page, &details);
    (
        SectionOutcome::rendered(Section::Contact, rendered),
        details.email,
    )
}

/// Write each known detail to every place it appears; returns how many were known
pub fn render_contact(page: &dyn Page, details: &ContactDetails) -> usize {
    let mut written = 0;

    if let Some(address) = &details.address {
        page.set_text(FOOTER_ADDRESS, address);
        page.set_text(CONTACT_ADDRESS, address);
        written += 1;
    }

    if let Some(email) = &details.email {
        page.set_text(FOOTER_EMAIL, email);
        page.set_attribute(FOOTER_EMAIL, "href", &mailto_href(email));
        page.set_inner_html(CONTACT_EMAIL, &mailto_link(email));
        written += 1;
    }

    if let Some(phone) = &details.phone {
        page.set_text(FOOTER_PHONE, phone);
        page.set_attribute(FOOTER_PHONE, "href", &tel_href(phone));
        page.set_inner_html(CONTACT_PHONE, &tel_link(phone));
        written += 1;
    }

    written
}
