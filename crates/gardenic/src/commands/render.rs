use clap::Args;
use colored::Colorize;
use gardenic::page::{MemoryPage, PageSnapshot};
use gardenic::prelude::{println, *};
use gardenic::sections::products::PRODUCT_ID_PARAM;
use gardenic::sections::{
    extract_product_id, render_page, PageKind, PageReport, SectionStatus, KNOWN_SELECTORS,
};
use gardenic::widgets::{RecordingWidgets, WidgetCall, Widgets};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct RenderOptions {
    /// HTML template to render into
    pub template: std::path::PathBuf,

    /// Which page the template is
    #[arg(long, value_enum, default_value = "home")]
    pub page: PageKind,

    /// Product ID or product-details link (for `product-details`)
    #[arg(long)]
    pub id: Option<String>,

    /// Record the widget calls the page would make
    #[arg(long)]
    pub widgets: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RenderOutput {
    report: PageReport,
    page: PageSnapshot,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    widgets: Vec<WidgetCall>,
}

pub async fn run(options: RenderOptions, global: crate::Global) -> Result<()> {
    let output = render_data(&options, &global).await?;

    if options.json {
        std::println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_output(&output);
    Ok(())
}

async fn render_data(options: &RenderOptions, global: &crate::Global) -> Result<RenderOutput> {
    let template = std::fs::read_to_string(&options.template)
        .wrap_err_with(|| format!("Failed to read template {}", options.template.display()))?;

    let mut page = MemoryPage::from_template(&template, KNOWN_SELECTORS);
    if let Some(input) = &options.id {
        page = page.with_query_param(PRODUCT_ID_PARAM, &extract_product_id(input)?);
    }

    if global.verbose {
        println!("Containers found: {}", page.selectors().count());
        for selector in page.selectors() {
            println!("  {selector}");
        }
        println!();
    }

    let api = super::site_api(global)?;
    let recorder = RecordingWidgets::default();
    let widgets = options.widgets.then_some(&recorder as &dyn Widgets);

    let report = render_page(&api, &page, widgets, options.page).await;

    Ok(RenderOutput {
        report,
        page: page.snapshot(),
        widgets: recorder.calls(),
    })
}

fn print_output(output: &RenderOutput) {
    for outcome in &output.report.outcomes {
        let section = format!("{:?}", outcome.section);
        match &outcome.status {
            SectionStatus::Rendered { items } => {
                println!("{} {} ({items} items)", "rendered".green(), section.bold());
            }
            SectionStatus::Skipped { reason } => {
                println!(
                    "{} {} {}",
                    "skipped ".bright_black(),
                    section.bold(),
                    format!("{reason:?}").bright_black()
                );
            }
        }
    }

    if let Some(title) = &output.page.title {
        println!();
        println!("{} {}", "title".bold().cyan(), title);
    }

    for (selector, region) in &output.page.regions {
        println!();
        println!("{}", selector.bold().cyan());

        if let Some(text) = &region.text {
            println!("  {text}");
        }
        if let Some(html) = &region.inner_html {
            println!("  {html}");
        }
        for (name, value) in &region.attributes {
            println!("  {}={}", name.bright_yellow(), value);
        }
        for child in &region.children {
            println!("  {}", child.to_html());
        }
    }

    if !output.widgets.is_empty() {
        println!();
        println!("{}", "widgets".bold().cyan());
        for call in &output.widgets {
            match call {
                WidgetCall::Grid {
                    container,
                    item_selector,
                } => println!("  grid {container} ({item_selector})"),
                WidgetCall::Lightbox { selector } => println!("  lightbox {selector}"),
                WidgetCall::Carousel { container } => println!("  carousel {container}"),
            }
        }
    }

    if let Some(email) = &output.report.contact_email {
        println!();
        println!("{} {}", "contact form recipient".bold().cyan(), email);
    }
}
