//! Session commands: login, register, logout, profile.

use std::path::PathBuf;

use clap::Subcommand;
use feira_livre_api::Session;
use feira_livre_api::auth::{ProfileUpdate, RegisterRequest};
use feira_livre_api::types::Address;
use feira_livre_core::AddressId;

use super::{CommandError, Ctx};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create a customer account
    Register {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (min 8 chars, upper/lower/digit/symbol)
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short = 'c', long)]
        password_confirmation: String,
    },
    /// Request a password-reset email
    ForgotPassword {
        /// Account email
        #[arg(short, long)]
        email: String,
    },
    /// Show the signed-in profile (refreshed from the backend)
    Me,
    /// Update name, email, password, or photo
    UpdateProfile {
        /// New display name; keeps the current one when omitted
        #[arg(short, long)]
        name: Option<String>,

        /// New email; keeps the current one when omitted
        #[arg(short, long)]
        email: Option<String>,

        /// New password (min 8 chars, upper/lower/digit/symbol)
        #[arg(short, long, requires = "password_confirmation")]
        password: Option<String>,

        /// Password confirmation
        #[arg(short = 'c', long)]
        password_confirmation: Option<String>,

        /// Profile photo file to upload
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Save a new delivery address (street fields prefilled from the CEP)
    AddAddress {
        /// Short label, e.g. "Casa"
        #[arg(short, long)]
        label: String,

        /// CEP, with or without punctuation
        #[arg(long)]
        cep: String,

        /// Street; prefilled from the CEP lookup when omitted
        #[arg(long)]
        street: Option<String>,

        /// House/building number
        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        complement: Option<String>,

        /// Delivery note for the driver
        #[arg(long)]
        note: Option<String>,
    },
    /// Remove a saved address
    RemoveAddress {
        /// Address id (see `fl-cli auth me`)
        id: i32,
    },
    /// Discard the persisted session
    Logout,
}

#[allow(clippy::print_stdout)]
pub async fn run(action: AuthAction) -> Result<(), CommandError> {
    let ctx = Ctx::init()?;

    match action {
        AuthAction::Login { email, password } => {
            let auth = ctx.client.login(&email, &password).await?;
            ctx.client.set_token(&auth.access_token);
            ctx.sessions.save(&Session {
                user: auth.user.clone(),
                token: auth.access_token,
            })?;
            println!("Signed in as {} ({})", auth.user.name, auth.user.role);
        }
        AuthAction::Register {
            name,
            email,
            password,
            password_confirmation,
        } => {
            ctx.client
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                    password_confirmation,
                })
                .await?;
            println!("Account created; sign in with `fl-cli auth login`");
        }
        AuthAction::ForgotPassword { email } => {
            ctx.client.forgot_password(&email).await?;
            println!("Reset instructions sent to {email}");
        }
        AuthAction::Me => {
            let session = ctx.require_session()?;
            let user = ctx.client.me().await?;
            // Keep the persisted profile in sync with the backend
            ctx.sessions.save(&Session {
                user: user.clone(),
                token: session.token.clone(),
            })?;

            println!("{} <{}> ({})", user.name, user.email, user.role);
            if user.addresses.is_empty() {
                println!("No saved addresses");
            } else {
                println!("Addresses:");
                for address in &user.addresses {
                    let id = address
                        .id
                        .map_or_else(|| "-".to_string(), |id| id.to_string());
                    println!("  [{id}] {}: {}", address.label, address.formatted_line());
                }
            }
        }
        AuthAction::UpdateProfile {
            name,
            email,
            password,
            password_confirmation,
            photo,
        } => {
            ctx.require_session()?;
            let current = ctx.client.me().await?;
            let update = ProfileUpdate {
                name: name.unwrap_or_else(|| current.name.clone()),
                email: email.unwrap_or_else(|| current.email.clone()),
                password,
                password_confirmation,
                photo,
                // The endpoint replaces the address list; pass it through
                addresses: current.addresses,
            };
            ctx.client.update_profile(&update).await?;
            println!("Profile updated");
        }
        AuthAction::AddAddress {
            label,
            cep,
            street,
            number,
            complement,
            note,
        } => {
            ctx.require_session()?;
            let looked_up = ctx.client.cep(&cep).await?;
            let current = ctx.client.me().await?;

            let mut addresses = current.addresses;
            addresses.push(Address {
                id: None,
                label,
                cep,
                street: street.unwrap_or(looked_up.street),
                neighborhood: looked_up.neighborhood,
                city: looked_up.city,
                state: looked_up.state,
                number,
                complement,
                note,
            });

            let update = ProfileUpdate {
                name: current.name,
                email: current.email,
                password: None,
                password_confirmation: None,
                photo: None,
                addresses,
            };
            ctx.client.update_profile(&update).await?;
            println!("Address saved");
        }
        AuthAction::RemoveAddress { id } => {
            ctx.require_session()?;
            ctx.client.delete_address(AddressId::new(id)).await?;
            println!("Address removed");
        }
        AuthAction::Logout => {
            ctx.sessions.clear()?;
            ctx.client.clear_token();
            println!("Signed out");
        }
    }

    Ok(())
}
