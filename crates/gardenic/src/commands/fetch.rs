use clap::Args;
use colored::Colorize;
use gardenic::api::{ProductQuery, SiteApi};
use gardenic::prelude::{println, *};
use gardenic::sections::extract_product_id;
use gardenic_core::markup::product_category_label;
use gardenic_core::products::format_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Resource {
    Categories,
    Products,
    Product,
    Certificates,
    Team,
    Contact,
}

#[derive(Args, Debug, Clone)]
pub struct FetchOptions {
    /// Resource to fetch
    #[arg(value_enum)]
    pub resource: Resource,

    /// Product ID or product-details link (for `product`)
    #[arg(long)]
    pub id: Option<String>,

    /// Only products in this category (for `products`)
    #[arg(long)]
    pub category_id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: FetchOptions, global: crate::Global) -> Result<()> {
    let api = super::site_api(&global)?;

    match options.resource {
        Resource::Categories => {
            let categories = api.fetch_categories().await;
            if options.json {
                return print_json(&categories);
            }

            let mut table = header(&["ID", "Name", "Slug", "Products"]);
            for category in &categories {
                table.add_row(prettytable::row![
                    category.id.green(),
                    category.name.bright_white(),
                    category.slug.bright_yellow(),
                    category.product_count.to_string()
                ]);
            }
            print_table(table, categories.len(), "categories");
        }
        Resource::Products => {
            let query = ProductQuery {
                category_id: options.category_id,
            };
            let products = api.fetch_products(&query).await;
            if options.json {
                return print_json(&products);
            }

            let mut table = header(&["ID", "Name", "Category", "Created", "In Stock"]);
            for product in &products {
                table.add_row(prettytable::row![
                    product.id.green(),
                    product.name.bright_white(),
                    product_category_label(product).bright_yellow(),
                    format_date(product.created_at).bright_black(),
                    product.in_stock.to_string()
                ]);
            }
            print_table(table, products.len(), "products");
        }
        Resource::Product => {
            let input = options
                .id
                .ok_or_eyre("--id is required when fetching a single product")?;
            let id = extract_product_id(&input)?;
            let product = api
                .fetch_product(&id)
                .await
                .ok_or_else(|| eyre!("Product {id} not found"))?;

            if options.json {
                return print_json(&product);
            }

            println!("{}", product.name.bold().cyan());
            println!();
            let mut table = new_table();
            table.add_row(prettytable::row!["ID".bold().cyan(), product.id]);
            table.add_row(prettytable::row![
                "Category".bold().cyan(),
                product_category_label(&product)
            ]);
            table.add_row(prettytable::row![
                "Created".bold().cyan(),
                format_date(product.created_at)
            ]);
            table.add_row(prettytable::row!["Image".bold().cyan(), product.image]);
            table.printstd();
            println!();
            println!("{}", product.description);
        }
        Resource::Certificates => {
            let certificates = api.fetch_certificates().await;
            if options.json {
                return print_json(&certificates);
            }

            let mut table = header(&["ID", "Name", "Category", "Active"]);
            for certificate in &certificates {
                table.add_row(prettytable::row![
                    certificate.id.green(),
                    certificate.name.bright_white(),
                    certificate.category.as_tag().bright_yellow(),
                    active_cell(certificate.is_active)
                ]);
            }
            print_table(table, certificates.len(), "certificates");
        }
        Resource::Team => {
            let members = api.fetch_team().await;
            if options.json {
                return print_json(&members);
            }

            let mut table = header(&["ID", "Name", "Position", "Email", "Active"]);
            for member in &members {
                table.add_row(prettytable::row![
                    member.id.green(),
                    member.name.bright_white(),
                    member.position.bright_yellow(),
                    member.email,
                    active_cell(member.is_active)
                ]);
            }
            print_table(table, members.len(), "team members");
        }
        Resource::Contact => {
            let entries = api.fetch_contact().await;
            if options.json {
                return print_json(&entries);
            }

            let mut table = header(&["Type", "Label", "Value"]);
            for entry in &entries {
                table.add_row(prettytable::row![
                    entry.kind.as_tag().green(),
                    entry.label.bright_white(),
                    entry.value
                ]);
            }
            print_table(table, entries.len(), "contact entries");
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    std::println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn header(titles: &[&str]) -> prettytable::Table {
    let mut table = new_table();
    table.set_titles(prettytable::Row::new(
        titles
            .iter()
            .map(|title| prettytable::Cell::new(&title.bold().cyan().to_string()))
            .collect(),
    ));
    table
}

fn print_table(table: prettytable::Table, count: usize, what: &str) {
    if count == 0 {
        std::println!("No {what} found.");
    } else {
        table.printstd();
    }
}

fn active_cell(active: bool) -> colored::ColoredString {
    if active {
        "yes".green()
    } else {
        "no".bright_black()
    }
}
