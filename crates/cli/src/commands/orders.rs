//! Order tracking and PIX payment commands.
//!
//! `pix --watch` runs the 1-second countdown loop: each tick sweeps the
//! wallet and reprints the remaining time, ending when the code expires.

use std::time::Duration;

use clap::Subcommand;
use feira_livre_api::pix::{self, PixWallet};
use feira_livre_core::{OrderId, format_brl};

use super::{CommandError, Ctx};

#[derive(Subcommand)]
pub enum OrdersAction {
    /// List your orders
    List,
    /// Tell the store a pending order was paid via PIX
    PayPix {
        /// Order id
        order: i32,
    },
    /// Confirm a pickup order (pay at the counter)
    ConfirmPickup {
        /// Order id
        order: i32,
    },
    /// Request the PIX code for a pending order
    Pix {
        /// Order id
        order: i32,

        /// Keep a live countdown until the code expires
        #[arg(long)]
        watch: bool,
    },
}

#[allow(clippy::print_stdout)]
pub async fn run(action: OrdersAction) -> Result<(), CommandError> {
    let ctx = Ctx::init()?;
    ctx.require_session()?;

    match action {
        OrdersAction::List => {
            let orders = ctx.client.orders().await?;
            if orders.is_empty() {
                println!("No orders found");
            }
            for order in orders {
                println!(
                    "[{}] {} - {} - {} - {} - {}",
                    order.id,
                    order.code,
                    order.status.label(),
                    order.store.final_name,
                    order.created_at.format("%Y-%m-%d %H:%M"),
                    format_brl(order.total),
                );
                for item in &order.items {
                    println!(
                        "    {} x{} @ {}",
                        item.product.name,
                        item.quantity,
                        format_brl(item.price)
                    );
                }
            }
        }
        OrdersAction::PayPix { order } => {
            ctx.client.mark_paid_via_pix(OrderId::new(order)).await?;
            println!("Order updated; the store will confirm your payment");
        }
        OrdersAction::ConfirmPickup { order } => {
            ctx.client.confirm_pickup(OrderId::new(order)).await?;
            println!("Order confirmed; pay when you pick it up");
        }
        OrdersAction::Pix { order, watch } => {
            pix_command(&ctx, OrderId::new(order), watch).await?;
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
async fn pix_command(ctx: &Ctx, order: OrderId, watch: bool) -> Result<(), CommandError> {
    let mut wallet = PixWallet::default();
    let code = wallet.request_code(&ctx.client, order).await?;

    let copyable = pix::display_text(&code.code);
    println!("PIX code for order {order}:");
    println!("{copyable}");

    let now = chrono::Utc::now().timestamp();
    match wallet.remaining(order, now) {
        Some(left) => println!("Expires in {}", pix::format_remaining(left)),
        None => {
            println!("Code expired");
            return Ok(());
        }
    }

    if !watch {
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        let now = chrono::Utc::now().timestamp();
        wallet.sweep(now);

        match wallet.remaining(order, now) {
            Some(left) => println!("Expires in {}", pix::format_remaining(left)),
            None => {
                println!("Code expired; select PIX again to request a new one");
                return Ok(());
            }
        }
    }
}
