//! Store management commands: orders, products, drivers, profile.

use std::path::PathBuf;

use clap::Subcommand;
use feira_livre_api::store::{
    CategoryChoice, CompanyInfoUpdate, DriverUpsert, OpeningHour, ProductUpsert,
};
use feira_livre_core::{
    CategoryId, DriverId, OrderId, ProductId, UserRole, format_brl,
};
use rust_decimal::Decimal;

use super::{CommandError, Ctx};

#[derive(Subcommand)]
pub enum StoreAction {
    /// Show the store's company record
    Profile,
    /// Save the store's public profile
    UpdateProfile {
        /// Display name; keeps the current one when omitted
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, default_value = "")]
        cep: String,

        #[arg(long, default_value = "")]
        street: String,

        #[arg(long, default_value = "")]
        number: String,

        #[arg(long, default_value = "")]
        neighborhood: String,

        #[arg(long, default_value = "")]
        city: String,

        #[arg(long, default_value = "")]
        state: String,

        /// PIX key receiving payments
        #[arg(long, default_value = "")]
        pix_key: String,

        /// cpf, cnpj, email, phone, or random
        #[arg(long, default_value = "")]
        pix_key_type: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        status: Option<String>,

        /// Delivery fee, e.g. 7.50
        #[arg(long)]
        delivery_fee: Option<Decimal>,

        /// Delivery radius in km
        #[arg(long)]
        delivery_radius: Option<Decimal>,

        /// true or false
        #[arg(long)]
        free_shipping: Option<bool>,

        /// First-purchase discount percent applied by the store
        #[arg(long)]
        store_discount: Option<Decimal>,

        /// First-purchase discount percent funded by the platform
        #[arg(long)]
        app_discount: Option<Decimal>,

        /// Opening hours as day,open,close (repeatable)
        #[arg(long = "opening")]
        opening_hours: Vec<String>,

        /// Logo file to upload
        #[arg(long)]
        logo: Option<PathBuf>,
    },
    /// List incoming orders
    Orders,
    /// Update an order's status
    SetStatus {
        /// Order id
        order: i32,

        /// New status (e.g. processing, ready_for_pickup, completed)
        status: String,
    },
    /// List banners targeting this store
    Banners,
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage delivery drivers
    Drivers {
        #[command(subcommand)]
        action: DriverAction,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
    List,
    /// Create a product
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Unit price, e.g. 10.50
        #[arg(short, long)]
        price: Decimal,

        /// Units in stock
        #[arg(short, long)]
        stock: u32,

        /// ativo, em_falta, or oculto
        #[arg(long, default_value = "ativo")]
        status: String,

        /// Existing category id
        #[arg(long, conflicts_with = "new_category")]
        category: Option<i32>,

        /// Create a category with this name
        #[arg(long)]
        new_category: Option<String>,

        /// Image files to upload (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Update a product
    Update {
        /// Product id
        id: i32,

        #[arg(short, long)]
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(short, long)]
        price: Decimal,

        #[arg(short, long)]
        stock: u32,

        #[arg(long, default_value = "ativo")]
        status: String,

        #[arg(long, conflicts_with = "new_category")]
        category: Option<i32>,

        #[arg(long)]
        new_category: Option<String>,

        /// Stored image paths to keep (repeatable)
        #[arg(long = "keep-image")]
        existing_images: Vec<String>,

        /// New image files to upload (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: i32,
    },
}

#[derive(Subcommand)]
pub enum DriverAction {
    /// List drivers
    List,
    /// Register a driver
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        vehicle: String,

        #[arg(long)]
        plate: String,

        /// ativo or inativo
        #[arg(long, default_value = "ativo")]
        status: String,
    },
    /// Update a driver
    Update {
        /// Driver id
        id: i32,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        vehicle: String,

        #[arg(long)]
        plate: String,

        #[arg(long, default_value = "ativo")]
        status: String,
    },
    /// Remove a driver
    Delete {
        /// Driver id
        id: i32,
    },
}

#[allow(clippy::print_stdout)]
pub async fn run(action: StoreAction) -> Result<(), CommandError> {
    let ctx = Ctx::init()?;
    ctx.require_role(UserRole::Store)?;

    match action {
        StoreAction::Profile => {
            let company = ctx.client.my_company().await?;
            println!("{} ({})", company.final_name, company.legal_name);
            println!("CNPJ: {}", company.cnpj);
            if let Some(category) = &company.category {
                println!("Category: {category}");
            }
            if company.free_shipping {
                println!("Delivery: free shipping");
            } else if let Some(fee) = company.delivery_fee {
                println!("Delivery: {}", format_brl(fee));
            }
        }
        StoreAction::UpdateProfile {
            name,
            phone,
            email,
            cep,
            street,
            number,
            neighborhood,
            city,
            state,
            pix_key,
            pix_key_type,
            category,
            status,
            delivery_fee,
            delivery_radius,
            free_shipping,
            store_discount,
            app_discount,
            opening_hours,
            logo,
        } => {
            // Unspecified fields keep their current backend values
            let current = ctx.client.my_company().await?;
            let opening_hours = opening_hours
                .iter()
                .map(|entry| parse_opening_hours(entry))
                .collect::<Result<Vec<_>, _>>()?;

            let info = CompanyInfoUpdate {
                final_name: name.unwrap_or_else(|| current.final_name.clone()),
                phone: phone.or(current.phone).unwrap_or_default(),
                email: email.or(current.email).unwrap_or_default(),
                cep,
                street,
                number,
                neighborhood,
                city,
                state,
                pix_key,
                pix_key_type,
                category: category.or(current.category).unwrap_or_default(),
                status: status.or(current.status).unwrap_or_default(),
                delivery_fee: delivery_fee
                    .or(current.delivery_fee)
                    .unwrap_or(Decimal::ZERO),
                delivery_radius: delivery_radius
                    .or(current.delivery_radius)
                    .unwrap_or(Decimal::ZERO),
                free_shipping: free_shipping.unwrap_or(current.free_shipping),
                first_purchase_discount_store: store_discount.is_some()
                    || current.first_purchase_discount_store,
                first_purchase_discount_store_value: store_discount
                    .or(current.first_purchase_discount_store_value),
                first_purchase_discount_app: app_discount.is_some()
                    || current.first_purchase_discount_app,
                first_purchase_discount_app_value: app_discount
                    .or(current.first_purchase_discount_app_value),
                opening_hours,
                logo,
            };
            ctx.client.update_company_info(&info).await?;
            println!("Store profile updated");
        }
        StoreAction::Orders => {
            let orders = ctx.client.store_orders().await?;
            if orders.is_empty() {
                println!("No orders found");
            }
            for order in orders {
                println!(
                    "[{}] {} - {} - {} - {}",
                    order.id,
                    order.code,
                    order.status.label(),
                    order.user.name,
                    format_brl(order.total),
                );
            }
        }
        StoreAction::SetStatus { order, status } => {
            let status = status.parse()?;
            ctx.client
                .update_store_order_status(OrderId::new(order), status)
                .await?;
            println!("Order {order} set to {status}");
        }
        StoreAction::Banners => {
            for banner in ctx.client.company_banners().await? {
                println!("{} {}", banner.title, banner.image_url);
            }
        }
        StoreAction::Products { action } => run_products(&ctx, action).await?,
        StoreAction::Drivers { action } => run_drivers(&ctx, action).await?,
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
async fn run_products(ctx: &Ctx, action: ProductAction) -> Result<(), CommandError> {
    match action {
        ProductAction::List => {
            for product in ctx.client.products().await? {
                let category = product
                    .category
                    .as_ref()
                    .map_or("-", |c| c.name.as_str());
                println!(
                    "[{}] {} - {} - stock {} - {} - {category}",
                    product.id,
                    product.name,
                    format_brl(product.price),
                    product.stock_quantity,
                    product.status.as_str(),
                );
            }
        }
        ProductAction::Add {
            name,
            description,
            price,
            stock,
            status,
            category,
            new_category,
            images,
        } => {
            let upsert = product_upsert(
                name,
                description,
                price,
                stock,
                &status,
                category,
                new_category,
                Vec::new(),
                images,
            )?;
            ctx.client.create_product(&upsert).await?;
            println!("Product created");
        }
        ProductAction::Update {
            id,
            name,
            description,
            price,
            stock,
            status,
            category,
            new_category,
            existing_images,
            images,
        } => {
            let upsert = product_upsert(
                name,
                description,
                price,
                stock,
                &status,
                category,
                new_category,
                existing_images,
                images,
            )?;
            ctx.client.update_product(ProductId::new(id), &upsert).await?;
            println!("Product updated");
        }
        ProductAction::Delete { id } => {
            ctx.client.delete_product(ProductId::new(id)).await?;
            println!("Product deleted");
        }
    }
    Ok(())
}

/// Parse one `day,open,close` opening-hours entry.
fn parse_opening_hours(entry: &str) -> Result<OpeningHour, CommandError> {
    let mut parts = entry.splitn(3, ',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(open), Some(close)) => Ok(OpeningHour {
            day: day.trim().to_string(),
            open: open.trim().to_string(),
            close: close.trim().to_string(),
        }),
        _ => Err(format!("invalid opening hours entry {entry:?}; expected day,open,close").into()),
    }
}

#[allow(clippy::too_many_arguments)]
fn product_upsert(
    name: String,
    description: String,
    price: Decimal,
    stock: u32,
    status: &str,
    category: Option<i32>,
    new_category: Option<String>,
    existing_images: Vec<String>,
    images: Vec<PathBuf>,
) -> Result<ProductUpsert, CommandError> {
    let category = match (category, new_category) {
        (_, Some(name)) => Some(CategoryChoice::New(name)),
        (Some(id), None) => Some(CategoryChoice::Existing(CategoryId::new(id))),
        (None, None) => None,
    };

    Ok(ProductUpsert {
        name,
        description,
        price,
        stock_quantity: stock,
        status: status.parse()?,
        category,
        existing_images,
        images,
    })
}

#[allow(clippy::print_stdout)]
async fn run_drivers(ctx: &Ctx, action: DriverAction) -> Result<(), CommandError> {
    match action {
        DriverAction::List => {
            for driver in ctx.client.drivers().await? {
                println!(
                    "[{}] {} <{}> - {} {} - {}",
                    driver.id,
                    driver.name,
                    driver.email,
                    driver.vehicle.as_deref().unwrap_or("-"),
                    driver.plate.as_deref().unwrap_or("-"),
                    driver.status.as_str(),
                );
            }
        }
        DriverAction::Add {
            name,
            email,
            password,
            phone,
            vehicle,
            plate,
            status,
        } => {
            let driver = ctx
                .client
                .create_driver(&DriverUpsert {
                    name,
                    email,
                    password,
                    phone,
                    vehicle,
                    plate,
                    status: status.parse()?,
                })
                .await?;
            println!("Driver registered with id {}", driver.id);
        }
        DriverAction::Update {
            id,
            name,
            email,
            password,
            phone,
            vehicle,
            plate,
            status,
        } => {
            ctx.client
                .update_driver(
                    DriverId::new(id),
                    &DriverUpsert {
                        name,
                        email,
                        password,
                        phone,
                        vehicle,
                        plate,
                        status: status.parse()?,
                    },
                )
                .await?;
            println!("Driver updated");
        }
        DriverAction::Delete { id } => {
            ctx.client.delete_driver(DriverId::new(id)).await?;
            println!("Driver removed");
        }
    }
    Ok(())
}
