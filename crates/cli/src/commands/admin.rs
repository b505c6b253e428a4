//! Platform administration commands: companies, banners, CNPJ lookup.

use clap::Subcommand;
use feira_livre_api::admin::{
    self, AdminAccount, BannerPayload, CompanyPayload,
};
use feira_livre_core::{BannerId, CompanyId, UserRole};

use super::{CommandError, Ctx};

#[derive(Subcommand)]
pub enum AdminAction {
    /// Manage companies
    Companies {
        #[command(subcommand)]
        action: CompanyAction,
    },
    /// Manage banners
    Banners {
        #[command(subcommand)]
        action: BannerAction,
    },
    /// Look up company data by CNPJ (BrasilAPI)
    Cnpj {
        /// CNPJ, with or without punctuation
        cnpj: String,
    },
}

#[derive(Subcommand)]
pub enum CompanyAction {
    /// List companies
    List,
    /// Register a company and its owner account
    Add {
        #[arg(long)]
        cnpj: String,

        /// Legal name; prefilled from the CNPJ lookup when omitted
        #[arg(long)]
        legal_name: Option<String>,

        /// Display name
        #[arg(long)]
        name: String,

        /// Phone; prefilled from the CNPJ lookup when omitted
        #[arg(long)]
        phone: Option<String>,

        /// Address; prefilled from the CNPJ lookup when omitted
        #[arg(long)]
        address: Option<String>,

        #[arg(long, default_value = "padrao")]
        plan: String,

        #[arg(long)]
        admin_name: String,

        #[arg(long)]
        admin_email: String,

        #[arg(long)]
        admin_password: String,
    },
    /// Update a company
    Update {
        /// Company id
        id: i32,

        #[arg(long)]
        cnpj: String,

        #[arg(long)]
        legal_name: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        address: String,

        #[arg(long, default_value = "padrao")]
        plan: String,

        #[arg(long)]
        admin_name: String,

        #[arg(long)]
        admin_email: String,

        /// Leave empty to keep the current password
        #[arg(long, default_value = "")]
        admin_password: String,
    },
    /// Remove a company
    Delete {
        /// Company id
        id: i32,
    },
}

#[derive(Subcommand)]
pub enum BannerAction {
    /// List banners
    List,
    /// Create a banner
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        image_url: String,

        /// Target a single store; all stores when omitted
        #[arg(long)]
        company: Option<i32>,
    },
    /// Update a banner
    Update {
        /// Banner id
        id: i32,

        #[arg(long)]
        title: String,

        #[arg(long)]
        image_url: String,

        #[arg(long)]
        company: Option<i32>,
    },
    /// Remove a banner
    Delete {
        /// Banner id
        id: i32,
    },
}

#[allow(clippy::print_stdout)]
pub async fn run(action: AdminAction) -> Result<(), CommandError> {
    let ctx = Ctx::init()?;

    // The CNPJ lookup is a public service; everything else is admin-only
    if !matches!(action, AdminAction::Cnpj { .. }) {
        ctx.require_role(UserRole::Admin)?;
    }

    match action {
        AdminAction::Companies { action } => run_companies(&ctx, action).await?,
        AdminAction::Banners { action } => run_banners(&ctx, action).await?,
        AdminAction::Cnpj { cnpj } => {
            let info = admin::lookup_cnpj(&cnpj).await?;
            println!("{}", info.razao_social);
            println!("Phone: {}", info.ddd_telefone_1);
            println!("Address: {}", info.formatted_address());
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
async fn run_companies(ctx: &Ctx, action: CompanyAction) -> Result<(), CommandError> {
    match action {
        CompanyAction::List => {
            for company in ctx.client.companies().await? {
                println!(
                    "[{}] {} ({}) - CNPJ {} - plan {}",
                    company.id,
                    company.final_name,
                    company.legal_name,
                    company.cnpj,
                    company.plan.as_deref().unwrap_or("-"),
                );
            }
        }
        CompanyAction::Add {
            cnpj,
            legal_name,
            name,
            phone,
            address,
            plan,
            admin_name,
            admin_email,
            admin_password,
        } => {
            // Prefill missing registry fields from the public CNPJ lookup
            let looked_up = if legal_name.is_none() || phone.is_none() || address.is_none() {
                Some(admin::lookup_cnpj(&cnpj).await?)
            } else {
                None
            };
            let field = |explicit: Option<String>, looked: fn(&admin::CnpjInfo) -> String| {
                explicit.unwrap_or_else(|| looked_up.as_ref().map(looked).unwrap_or_default())
            };

            let payload = CompanyPayload {
                legal_name: field(legal_name, |info| info.razao_social.clone()),
                phone: field(phone, |info| info.ddd_telefone_1.clone()),
                address: field(address, admin::CnpjInfo::formatted_address),
                cnpj,
                final_name: name,
                plan,
                admin: AdminAccount {
                    name: admin_name,
                    email: admin_email,
                    password: admin_password,
                },
            };
            ctx.client.create_company(&payload).await?;
            println!("Company created");
        }
        CompanyAction::Update {
            id,
            cnpj,
            legal_name,
            name,
            phone,
            address,
            plan,
            admin_name,
            admin_email,
            admin_password,
        } => {
            let payload = CompanyPayload {
                cnpj,
                legal_name,
                final_name: name,
                phone,
                address,
                plan,
                admin: AdminAccount {
                    name: admin_name,
                    email: admin_email,
                    password: admin_password,
                },
            };
            ctx.client
                .update_company(CompanyId::new(id), &payload)
                .await?;
            println!("Company updated");
        }
        CompanyAction::Delete { id } => {
            ctx.client.delete_company(CompanyId::new(id)).await?;
            println!("Company deleted");
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn run_banners(ctx: &Ctx, action: BannerAction) -> Result<(), CommandError> {
    match action {
        BannerAction::List => {
            for banner in ctx.client.banners().await? {
                let id = banner
                    .id
                    .map_or_else(|| "-".to_string(), |id| id.to_string());
                let target = banner
                    .target_company_id
                    .map_or_else(|| "all stores".to_string(), |c| format!("store {c}"));
                println!("[{id}] {} ({target}) {}", banner.title, banner.image_url);
            }
        }
        BannerAction::Add {
            title,
            image_url,
            company,
        } => {
            let payload = BannerPayload {
                title,
                image_url,
                target_company_id: company.map(CompanyId::new),
            };
            ctx.client.create_banner(&payload).await?;
            println!("Banner created");
        }
        BannerAction::Update {
            id,
            title,
            image_url,
            company,
        } => {
            let payload = BannerPayload {
                title,
                image_url,
                target_company_id: company.map(CompanyId::new),
            };
            ctx.client
                .update_banner(BannerId::new(id), &payload)
                .await?;
            println!("Banner updated");
        }
        BannerAction::Delete { id } => {
            ctx.client.delete_banner(BannerId::new(id)).await?;
            println!("Banner deleted");
        }
    }
    Ok(())
}
