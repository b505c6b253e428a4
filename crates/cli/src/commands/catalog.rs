//! Browsing commands: stores, categories, banners, CEP lookup.

use clap::Subcommand;
use feira_livre_core::format_brl;
use rust_decimal::Decimal;

use super::{CommandError, Ctx};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List stores and their product counts
    Stores,
    /// List product categories
    Categories,
    /// List platform banners
    Banners,
    /// Look up address fields for a CEP
    Cep {
        /// CEP, with or without punctuation (e.g. 01310-100)
        cep: String,
    },
}

#[allow(clippy::print_stdout)]
pub async fn run(action: CatalogAction) -> Result<(), CommandError> {
    let ctx = Ctx::init()?;

    match action {
        CatalogAction::Stores => {
            let stores = ctx.client.companies_with_products().await?;
            if stores.is_empty() {
                println!("No stores available");
            }
            for entry in stores {
                let company = &entry.company;
                let shipping = if company.free_shipping {
                    "free shipping".to_string()
                } else {
                    format!(
                        "delivery from {}",
                        format_brl(company.delivery_fee.unwrap_or(Decimal::ZERO))
                    )
                };
                println!(
                    "[{}] {} - {} products, {}",
                    company.id,
                    company.final_name,
                    entry.products.len(),
                    shipping
                );
            }
        }
        CatalogAction::Categories => {
            for category in ctx.client.categories().await? {
                println!("[{}] {}", category.id, category.name);
            }
        }
        CatalogAction::Banners => {
            for banner in ctx.client.banners().await? {
                let target = banner
                    .target_company_id
                    .map_or_else(|| "all stores".to_string(), |id| format!("store {id}"));
                println!("{} ({target}) {}", banner.title, banner.image_url);
            }
        }
        CatalogAction::Cep { cep } => {
            let address = ctx.client.cep(&cep).await?;
            println!(
                "{}, {} - {} ({})",
                address.street, address.neighborhood, address.city, address.state
            );
        }
    }

    Ok(())
}
