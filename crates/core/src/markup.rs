//! Record-to-markup transformations
//!
//! Each function turns one normalized record into the markup the site
//! templates expect. Nothing here touches a page: the shell decides where a
//! [`Fragment`] is inserted. Every interpolated value is escaped for the
//! context it lands in.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::model::{Category, Certificate, CertificateCategory, Product, TeamMember};
use crate::products::format_date;

/// Site name appended to page titles
pub const SITE_NAME: &str = "Gardenic";

/// Shown in the related products row when nothing matches
pub const NO_RELATED_MARKUP: &str = "<p>No related projects found.</p>";

const WORK_ICON: &str = r#"<img src="assets/images/work-icon.png" alt="work icon">"#;

/// One child element for a container: wrapper tag, wrapper classes and inner HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub html: String,
}

impl Fragment {
    pub fn new(tag: &'static str, classes: &str, html: String) -> Self {
        Self {
            tag,
            classes: classes.split_whitespace().map(str::to_string).collect(),
            html,
        }
    }

    pub fn div(classes: &str, html: String) -> Self {
        Self::new("div", classes, html)
    }

    pub fn with_class(mut self, class: &str) -> Self {
        if !class.is_empty() {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Outer HTML of the fragment
    pub fn to_html(&self) -> String {
        format!(
            r#"<{tag} class="{classes}">{html}</{tag}>"#,
            tag = self.tag,
            classes = encode_double_quoted_attribute(&self.classes.join(" ")),
            html = self.html
        )
    }
}

/// CSS class for a certificate category; unknown tags get none
pub fn certificate_css_class(category: &CertificateCategory) -> Option<&'static str> {
    match category {
        CertificateCategory::Driveways => Some("physics"),
        CertificateCategory::InProgress => Some("chemistry"),
        CertificateCategory::Pathway => Some("math"),
        CertificateCategory::Portfolio => Some("english"),
        CertificateCategory::Other(_) => None,
    }
}

pub fn certificate_fragment(certificate: &Certificate) -> Fragment {
    let image = encode_double_quoted_attribute(&certificate.image);
    let html = format!(
        concat!(
            r#"<div class="protfolio-single-box">"#,
            r#"<div class="protfolio-thumb">"#,
            r#"<img src="{image}" alt="{alt}">"#,
            r#"<div class="protfolio-icon">"#,
            r#"<a class="portfolio-icon venobox vbox-item" data-gall="myportfolio" href="{image}">{icon}</a>"#,
            r#"</div></div>"#,
            r#"<div class="protfolio-content">"#,
            r##"<div class="protfolio-title"><h3><a href="#">{name}</a></h3></div>"##,
            r#"<div class="protfolio-description"><p>{description}</p></div>"#,
            r#"</div></div>"#
        ),
        image = image,
        alt = encode_double_quoted_attribute(&certificate.name),
        icon = WORK_ICON,
        name = encode_text(&certificate.name),
        description = encode_text(&certificate.description),
    );

    Fragment::div("col-md-4 grid-item position-static", html)
        .with_class(certificate_css_class(&certificate.category).unwrap_or(""))
}

/// Digits of a messaging handle, e.g. "+1 (555) 123-4567" -> "15551234567"
pub fn whatsapp_target(handle: &str) -> String {
    handle.chars().filter(char::is_ascii_digit).collect()
}

pub fn team_member_fragment(member: &TeamMember) -> Fragment {
    let html = format!(
        concat!(
            r#"<div class="single-team-box">"#,
            r#"<div class="team-thumb">"#,
            r#"<img src="{image}" alt="{alt}">"#,
            r#"<div class="team-social-icon"><ul class="social-icons">"#,
            r#"<li><a href="mailto:{email}"><i class="far fa-envelope"></i></a></li>"#,
            r#"<li><a href="tel:{phone}"><i class="fas fa-phone"></i></a></li>"#,
            r#"<li><a href="https://wa.me/{whatsapp}"><i class="fab fa-whatsapp"></i></a></li>"#,
            r#"</ul></div>"#,
            r#"<div class="team-content"><div class="team-title">"#,
            r##"<h3><a href="#">{name}</a></h3><p>{position}</p>"##,
            r#"</div></div>"#,
            r#"</div></div>"#
        ),
        image = encode_double_quoted_attribute(&member.image),
        alt = encode_double_quoted_attribute(&member.name),
        email = encode_double_quoted_attribute(&member.email),
        phone = encode_double_quoted_attribute(&member.phone),
        whatsapp = whatsapp_target(&member.whatsapp),
        name = encode_text(&member.name),
        position = encode_text(&member.position),
    );

    Fragment::div("col-lg-4 col-md-6", html)
}

pub fn product_details_href(id: &str) -> String {
    format!("product-details.html?id={}", urlencoding::encode(id))
}

/// Category name shown on product cards
pub fn product_category_label(product: &Product) -> &str {
    product
        .category
        .as_ref()
        .map(|category| category.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Uncategorized")
}

/// Product card for the homepage grid and the products page
///
/// With `category_class` the category slug is added to the wrapper classes
/// so the grid widget can filter on it.
pub fn product_card_fragment(product: &Product, category_class: bool) -> Fragment {
    let href = encode_double_quoted_attribute(&product_details_href(&product.id)).into_owned();
    let html = format!(
        concat!(
            r#"<div class="protfolio-single-box">"#,
            r#"<div class="protfolio-thumb">"#,
            r#"<img src="{image}" alt="{alt}">"#,
            r#"<div class="protfolio-icon"><a href="{href}">{icon}</a></div>"#,
            r#"</div>"#,
            r#"<div class="protfolio-content">"#,
            r#"<div class="protfolio-title"><h3><a href="{href}">{name}</a></h3></div>"#,
            r#"<div class="protfolio-description"><p>{category} - {date}</p></div>"#,
            r#"</div></div>"#
        ),
        image = encode_double_quoted_attribute(&product.image),
        alt = encode_double_quoted_attribute(&product.name),
        href = href,
        icon = WORK_ICON,
        name = encode_text(&product.name),
        category = encode_text(product_category_label(product)),
        date = format_date(product.created_at),
    );

    let slug = product
        .category
        .as_ref()
        .map(|category| category.slug.as_str())
        .filter(|_| category_class)
        .unwrap_or("");

    Fragment::div("col-lg-4 col-md-6 my-5", html).with_class(slug)
}

/// Filter buttons for the products page: "All Products" then one per category
pub fn category_filter_items(categories: &[Category]) -> Vec<Fragment> {
    let all = Fragment::new(
        "li",
        "nav-item",
        r#"<button class="nav-link active" data-filter="*">All Products</button>"#.to_string(),
    );

    std::iter::once(all)
        .chain(categories.iter().map(|category| {
            Fragment::new(
                "li",
                "nav-item",
                format!(
                    r#"<button class="nav-link" data-filter=".{slug}">{name} ({count})</button>"#,
                    slug = encode_double_quoted_attribute(&category.slug),
                    name = encode_text(&category.name),
                    count = category.product_count,
                ),
            )
        }))
        .collect()
}

pub fn related_product_fragment(product: &Product) -> Fragment {
    let html = format!(
        r#"<div class="portfolio-details-thumb"><a href="{href}"><img src="{image}" alt="{alt}"></a></div>"#,
        href = encode_double_quoted_attribute(&product_details_href(&product.id)),
        image = encode_double_quoted_attribute(&product.image),
        alt = encode_double_quoted_attribute(&product.name),
    );

    Fragment::div("col-lg-4 col-md-6", html)
}

pub fn mailto_href(email: &str) -> String {
    format!("mailto:{email}")
}

pub fn tel_href(phone: &str) -> String {
    format!("tel:{phone}")
}

pub fn mailto_link(email: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        encode_double_quoted_attribute(&mailto_href(email)),
        encode_text(email)
    )
}

pub fn tel_link(phone: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        encode_double_quoted_attribute(&tel_href(phone)),
        encode_text(phone)
    )
}

pub fn product_page_title(name: &str) -> String {
    format!("{name} - {SITE_NAME}")
}
