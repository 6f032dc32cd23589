use gardenic_core::markup::{
    category_filter_items, product_card_fragment, product_category_label, product_page_title,
    related_product_fragment, NO_RELATED_MARKUP,
};
use gardenic_core::model::Product;
use gardenic_core::products::{format_date, recent_products, related_products, RELATED_LIMIT};
use regex::Regex;

use super::{
    Section, SectionOutcome, SkipReason, BREADCRUMB_TEXT, BREADCRUMB_TITLE, CATEGORY_FILTERS,
    PRODUCTS_CONTAINER, PRODUCT_CATEGORY, PRODUCT_DATE, PRODUCT_DESCRIPTION, PRODUCT_IMAGE,
    PRODUCT_NAME, RECENT_PRODUCTS_CONTAINER, RECENT_WORK_SECTION, RELATED_CONTAINER,
};
use crate::api::{ProductQuery, SiteApi};
use crate::error::Error;
use crate::page::Page;
use crate::widgets::Widgets;

/// Grid items inside the products container
pub const PRODUCT_GRID_ITEM: &str = ".col-lg-4";

/// Query parameter carrying the product id on the details page
pub const PRODUCT_ID_PARAM: &str = "id";

/// Homepage "recent work" grid
pub async fn init_recent_work(api: &dyn SiteApi, page: &dyn Page) -> SectionOutcome {
    for selector in [RECENT_WORK_SECTION, RECENT_PRODUCTS_CONTAINER] {
        if !page.exists(selector) {
            return SectionOutcome::missing_container(Section::RecentWork, selector);
        }
    }

    let products = api.fetch_products(&ProductQuery::default()).await;
    let fragments: Vec<_> = recent_products(&products)
        .iter()
        .map(|product| product_card_fragment(product, false))
        .collect();
    let count = fragments.len();

    page.replace_children(RECENT_PRODUCTS_CONTAINER, fragments);
    SectionOutcome::rendered(Section::RecentWork, count)
}

/// Products page: category filter buttons and every product card
pub async fn init_products_page(
    api: &dyn SiteApi,
    page: &dyn Page,
    widgets: Option<&dyn Widgets>,
) -> SectionOutcome {
    for selector in [CATEGORY_FILTERS, PRODUCTS_CONTAINER] {
        if !page.exists(selector) {
            return SectionOutcome::missing_container(Section::Products, selector);
        }
    }

    let query = ProductQuery::default();
    let (categories, products) =
        futures::join!(api.fetch_categories(), api.fetch_products(&query));

    page.replace_children(CATEGORY_FILTERS, category_filter_items(&categories));

    let fragments: Vec<_> = products
        .iter()
        .map(|product| product_card_fragment(product, true))
        .collect();
    let count = fragments.len();
    page.replace_children(PRODUCTS_CONTAINER, fragments);

    if let Some(widgets) = widgets {
        widgets.reflow_grid(PRODUCTS_CONTAINER, PRODUCT_GRID_ITEM);
    }

    SectionOutcome::rendered(Section::Products, count)
}

/// Product details page, driven by the `id` query parameter
///
/// The outcome counts the related products shown.
pub async fn init_product_details(api: &dyn SiteApi, page: &dyn Page) -> SectionOutcome {
    let Some(id) = page
        .query_param(PRODUCT_ID_PARAM)
        .filter(|id| !id.is_empty())
    else {
        return SectionOutcome::skipped(
            Section::ProductDetails,
            SkipReason::MissingQueryParam(PRODUCT_ID_PARAM),
        );
    };

    let Some(product) = api.fetch_product(&id).await else {
        return SectionOutcome::skipped(Section::ProductDetails, SkipReason::NotFound(id));
    };

    render_product_details(page, &product);

    if !page.exists(RELATED_CONTAINER) {
        return SectionOutcome::rendered(Section::ProductDetails, 0);
    }

    let all = api.fetch_products(&ProductQuery::default()).await;
    let related = related_products(&product, &all, RELATED_LIMIT);
    let count = related.len();

    if related.is_empty() {
        page.set_inner_html(RELATED_CONTAINER, NO_RELATED_MARKUP);
    } else {
        page.replace_children(
            RELATED_CONTAINER,
            related.into_iter().map(related_product_fragment).collect(),
        );
    }

    SectionOutcome::rendered(Section::ProductDetails, count)
}

fn render_product_details(page: &dyn Page, product: &Product) {
    page.set_title(&product_page_title(&product.name));
    page.set_text(BREADCRUMB_TITLE, &product.name);
    page.set_text(BREADCRUMB_TEXT, &product.name);
    page.set_text(PRODUCT_NAME, &product.name);
    page.set_text(PRODUCT_DESCRIPTION, &product.description);
    page.set_text(PRODUCT_CATEGORY, product_category_label(product));
    page.set_text(PRODUCT_DATE, &format_date(product.created_at));
    page.set_attribute(PRODUCT_IMAGE, "src", &product.image);
    page.set_attribute(PRODUCT_IMAGE, "alt", &product.name);
}

/// Accept either a bare product id or a `product-details.html?id=...` link
///
/// Anything with link punctuation (including the `.` of `.html`) must carry an
/// `id` parameter.
pub fn extract_product_id(input: &str) -> Result<String, Error> {
    let input = input.trim();

    if !input.is_empty() && !input.contains(|c: char| matches!(c, '?' | '&' | '=' | '/' | '.')) {
        return Ok(input.to_string());
    }

    let re = Regex::new(r"[?&]id=([^&#]+)").map_err(|e| Error::Generic(e.to_string()))?;
    if let Some(id_match) = re.captures(input).and_then(|caps| caps.get(1)) {
        return urlencoding::decode(id_match.as_str())
            .map(|id| id.into_owned())
            .map_err(|_| Error::InvalidProductId(input.to_string()));
    }

    Err(Error::InvalidProductId(input.to_string()))
}
