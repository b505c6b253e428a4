//! Cart commands: show, mutate, quote, checkout.
//!
//! Every mutation goes through [`CartState`], which re-fetches the cart
//! from the backend afterwards; the printed totals are therefore always
//! server-priced.

use clap::Subcommand;
use feira_livre_api::cart::CartState;
use feira_livre_api::types::CartLine;
use feira_livre_core::{AddressId, CartItemId, ProductId, VariationId, format_brl, format_km};

use super::{CommandError, Ctx};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart and its price breakdown
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        #[arg(short, long)]
        product: i32,

        /// Quantity
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Variation ids (repeatable)
        #[arg(short = 'v', long = "variation")]
        variations: Vec<i32>,
    },
    /// Increase an item's quantity by one
    Increment {
        /// Cart item id
        item: i32,
    },
    /// Decrease an item's quantity by one (min 1; use `remove` to delete)
    Decrement {
        /// Cart item id
        item: i32,
    },
    /// Remove an item from the cart
    Remove {
        /// Cart item id
        item: i32,
    },
    /// Quote delivery to a saved address
    Quote {
        /// Saved address id (see `fl-cli auth me`)
        #[arg(short, long)]
        address: i32,
    },
    /// Place the order
    Checkout {
        /// Saved address id (see `fl-cli auth me`)
        #[arg(short, long)]
        address: i32,
    },
}

#[allow(clippy::print_stdout)]
pub async fn run(action: CartAction) -> Result<(), CommandError> {
    let ctx = Ctx::init()?;
    ctx.require_session()?;

    match action {
        CartAction::Show => {
            let mut cart = CartState::default();
            cart.refresh(&ctx.client).await?;
            print_cart(&cart);
        }
        CartAction::Add {
            product,
            quantity,
            variations,
        } => {
            let line = CartLine {
                id: ProductId::new(product),
                quantity,
                variation_ids: variations.into_iter().map(VariationId::new).collect(),
            };
            ctx.client.add_to_cart(&[line]).await?;
            println!("Added to cart");
        }
        CartAction::Increment { item } => {
            let mut cart = fetch_cart(&ctx).await?;
            cart.increment(&ctx.client, CartItemId::new(item)).await?;
            print_cart(&cart);
        }
        CartAction::Decrement { item } => {
            let mut cart = fetch_cart(&ctx).await?;
            cart.decrement(&ctx.client, CartItemId::new(item)).await?;
            print_cart(&cart);
        }
        CartAction::Remove { item } => {
            let mut cart = fetch_cart(&ctx).await?;
            cart.remove(&ctx.client, CartItemId::new(item)).await?;
            print_cart(&cart);
        }
        CartAction::Quote { address } => {
            let mut cart = fetch_cart(&ctx).await?;
            select_address(&ctx, &mut cart, address).await?;
            print_cart(&cart);
        }
        CartAction::Checkout { address } => {
            let mut cart = fetch_cart(&ctx).await?;
            select_address(&ctx, &mut cart, address).await?;
            let total = cart.quote().total;
            cart.checkout(&ctx.client).await?;
            println!("Order placed; total {}", format_brl(total));
        }
    }

    Ok(())
}

/// Fetch the server cart into a fresh state holder.
async fn fetch_cart(ctx: &Ctx) -> Result<CartState, CommandError> {
    let mut cart = CartState::default();
    cart.refresh(&ctx.client).await?;
    Ok(cart)
}

/// Resolve a saved address by id and attach it (with its delivery quote).
async fn select_address(ctx: &Ctx, cart: &mut CartState, address: i32) -> Result<(), CommandError> {
    let wanted = AddressId::new(address);
    let user = ctx.client.me().await?;
    let address = user
        .addresses
        .into_iter()
        .find(|a| a.id == Some(wanted))
        .ok_or_else(|| {
            format!("no saved address with id {wanted}; add one to your profile first")
        })?;

    cart.select_address(&ctx.client, address).await?;
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &CartState) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    if let Some(company) = cart.company() {
        println!("Store: {}", company.final_name);
    }
    for item in cart.items() {
        let variations = if item.variations.is_empty() {
            String::new()
        } else {
            let rendered: Vec<String> = item
                .variations
                .iter()
                .map(|v| format!("{}: {}", v.kind, v.value))
                .collect();
            format!(" ({})", rendered.join(" | "))
        };
        println!(
            "[{}] {}{} - {} x {} = {}",
            item.id,
            item.product.name,
            variations,
            item.quantity,
            format_brl(item.price),
            format_brl(item.subtotal),
        );
    }

    if let (Some(address), Some(delivery)) = (cart.selected_address(), cart.delivery()) {
        println!("Deliver to: {}", address.formatted_line());
        println!(
            "Delivery: {} ({})",
            format_brl(delivery.fee),
            format_km(delivery.distance)
        );
    }

    println!("{}", cart.quote().display());
}
