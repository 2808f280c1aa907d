//! Product commands.
//!
//! `list` is public; everything else acts on the logged-in seller's
//! catalogue.

use clap::{Args, Subcommand};
use farm_direct_client::api::{NewProduct, ProductQuery, ProductUpdate, SortOrder};
use farm_direct_client::{MarketplaceClient, SessionStore};
use farm_direct_core::{CategoryId, Price, ProductId};
use rust_decimal::Decimal;

use super::{exposed, print_json, print_outcome};

#[derive(Subcommand)]
pub enum ProductAction {
    /// Public product listing
    List {
        /// Rows to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Page size
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Your own products
    Mine(MineArgs),
    /// Add a product
    Create(CreateArgs),
    /// Change fields of a product
    Update(UpdateArgs),
    /// Remove a product
    Delete {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Args)]
pub struct MineArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    category: Option<CategoryId>,
    #[arg(long)]
    active: Option<bool>,
    #[arg(long)]
    min_price: Option<Decimal>,
    #[arg(long)]
    max_price: Option<Decimal>,
    #[arg(long)]
    sort_by: Option<String>,
    #[arg(long)]
    sort_order: Option<SortOrder>,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: Price,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    photo_url: Option<String>,
    #[arg(long)]
    category: Option<CategoryId>,
    /// List the product as inactive
    #[arg(long)]
    inactive: bool,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID
    id: ProductId,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<Price>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    photo_url: Option<String>,
    #[arg(long)]
    category: Option<CategoryId>,
    #[arg(long)]
    active: Option<bool>,
}

/// Dispatch a product subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn run(
    api: &MarketplaceClient,
    store: &SessionStore,
    action: ProductAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = store.token();
    let token = exposed(token.as_ref());

    match action {
        ProductAction::List { offset, limit } => {
            print_json(&api.list_products(offset, limit).await?)?;
        }
        ProductAction::Mine(args) => {
            let query = ProductQuery {
                page: args.page,
                limit: args.limit,
                search: args.search,
                category_id: args.category,
                is_active: args.active,
                min_price: args.min_price,
                max_price: args.max_price,
                sort_by: args.sort_by,
                sort_order: args.sort_order,
            };
            let page = api.user_products(&query, token).await?;
            print_json(&page.products)?;
        }
        ProductAction::Create(args) => {
            let product = NewProduct {
                name: args.name,
                description: args.description,
                price: args.price,
                photo_url: args.photo_url,
                is_active: !args.inactive,
                category_id: args.category,
            };
            print_json(&api.create_product(&product, token).await?)?;
        }
        ProductAction::Update(args) => {
            let update = ProductUpdate {
                name: args.name,
                description: args.description,
                price: args.price,
                photo_url: args.photo_url,
                is_active: args.active,
                category_id: args.category,
            };
            print_json(&api.update_product(args.id, &update, token).await?)?;
        }
        ProductAction::Delete { id } => {
            let envelope = api.delete_product(id, token).await?;
            print_outcome(envelope.message.as_deref(), envelope.data.as_ref())?;
        }
    }
    Ok(())
}
