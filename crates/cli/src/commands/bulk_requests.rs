//! Bulk request commands.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use farm_direct_client::api::{BulkRequestQuery, BulkRequestUpdate, NewBulkRequest, SortOrder};
use farm_direct_client::{MarketplaceClient, SessionStore};
use farm_direct_core::{BulkRequestId, BulkRequestStatus, CategoryId, Price};
use rust_decimal::Decimal;

use super::{exposed, print_json, print_outcome};

#[derive(Subcommand)]
pub enum BulkRequestAction {
    /// Requests visible to you
    List(ListArgs),
    /// Post a new request
    Create(CreateArgs),
    /// Change fields of a request
    Update(UpdateArgs),
    /// Remove a request
    Delete {
        /// Bulk request ID
        id: BulkRequestId,
    },
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    category: Option<CategoryId>,
    /// `open`, `partially_filled`, `fully_filled`, `closed` or `expired`
    #[arg(long)]
    status: Option<BulkRequestStatus>,
    #[arg(long)]
    min_quantity: Option<f64>,
    #[arg(long)]
    max_quantity: Option<f64>,
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
    title: String,
    #[arg(long)]
    product_name: String,
    #[arg(long)]
    quantity: f64,
    /// Unit of measurement, e.g. `kg`
    #[arg(long)]
    unit: String,
    /// RFC 3339 timestamp
    #[arg(long)]
    deadline: DateTime<Utc>,
    #[arg(long)]
    location: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<CategoryId>,
    #[arg(long)]
    max_price_per_unit: Option<Price>,
    #[arg(long)]
    total_budget: Option<Price>,
    #[arg(long)]
    instructions: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Bulk request ID
    id: BulkRequestId,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    quantity: Option<f64>,
    #[arg(long)]
    max_price_per_unit: Option<Price>,
    #[arg(long)]
    total_budget: Option<Price>,
    #[arg(long)]
    deadline: Option<DateTime<Utc>>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    instructions: Option<String>,
    #[arg(long)]
    status: Option<BulkRequestStatus>,
}

/// Dispatch a bulk request subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn run(
    api: &MarketplaceClient,
    store: &SessionStore,
    action: BulkRequestAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = store.token();
    let token = exposed(token.as_ref());

    match action {
        BulkRequestAction::List(args) => {
            let query = BulkRequestQuery {
                page: args.page,
                limit: args.limit,
                search: args.search,
                category_id: args.category,
                status: args.status,
                min_quantity: args.min_quantity,
                max_quantity: args.max_quantity,
                min_price: args.min_price,
                max_price: args.max_price,
                sort_by: args.sort_by,
                sort_order: args.sort_order,
            };
            let page = api.list_bulk_requests(&query, token).await?;
            print_json(&page.data)?;
            if let Some(pagination) = page.pagination {
                tracing::info!(
                    page = pagination.page,
                    pages = pagination.pages,
                    total = pagination.total,
                    "Bulk requests"
                );
            }
        }
        BulkRequestAction::Create(args) => {
            let request = NewBulkRequest {
                title: args.title,
                description: args.description,
                product_name: args.product_name,
                category_id: args.category,
                quantity_needed: args.quantity,
                unit: args.unit,
                max_price_per_unit: args.max_price_per_unit,
                total_budget: args.total_budget,
                delivery_deadline: args.deadline,
                delivery_location: args.location,
                delivery_instructions: args.instructions,
            };
            let envelope = api.create_bulk_request(&request, token).await?;
            print_outcome(envelope.message.as_deref(), envelope.data.as_ref())?;
        }
        BulkRequestAction::Update(args) => {
            let update = BulkRequestUpdate {
                title: args.title,
                description: args.description,
                quantity_needed: args.quantity,
                max_price_per_unit: args.max_price_per_unit,
                total_budget: args.total_budget,
                delivery_deadline: args.deadline,
                delivery_location: args.location,
                delivery_instructions: args.instructions,
                status: args.status,
            };
            let envelope = api.update_bulk_request(args.id, &update, token).await?;
            print_outcome(envelope.message.as_deref(), envelope.data.as_ref())?;
        }
        BulkRequestAction::Delete { id } => {
            let envelope = api.delete_bulk_request(id, token).await?;
            print_outcome(envelope.message.as_deref(), envelope.data.as_ref())?;
        }
    }
    Ok(())
}
