use clap::{Subcommand, Args};
use teahouse_api::client::orders::{
    QueryOrders,
    RetrieveOrder,
    CreateOrder,
    UpdateOrderStatus,
    CancelOrder,
    DeleteOrder,
};
use teahouse_api::orders::Order;

use crate::error;
use crate::state::AppState;

use super::{fmt_amount, print_value};

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    command: OrdersCmds
}

#[derive(Debug, Subcommand)]
enum OrdersCmds {
    /// retrieves a list of orders
    Get(GetArgs),

    /// places an order for the contents of the cart
    Create(CreateArgs),

    /// changes the status of an order
    Status(StatusArgs),

    /// cancels an order
    Cancel(IdArgs),

    /// deletes an order
    Delete(IdArgs),
}

pub async fn handle(state: &AppState, args: OrdersArgs) -> error::Result {
    match args.command {
        OrdersCmds::Get(given) => get(state, given).await,
        OrdersCmds::Create(given) => create(state, given).await,
        OrdersCmds::Status(given) => status(state, given).await,
        OrdersCmds::Cancel(given) => cancel(state, given).await,
        OrdersCmds::Delete(given) => delete(state, given).await,
    }
}

fn print_order(order: &Order) {
    println!(
        "{} {} {} {}",
        order.id,
        order.order_number.as_deref().unwrap_or("-"),
        order.status.as_deref().unwrap_or("-"),
        fmt_amount(order.total_price),
    );
}

#[derive(Debug, Args)]
struct GetArgs {
    /// retrieves a single order with its items
    #[arg(long)]
    id: Option<i64>,
}

async fn get(state: &AppState, args: GetArgs) -> error::Result {
    if let Some(id) = args.id {
        let order = RetrieveOrder::id(id)
            .send(&state.client)
            .await?;

        print_order(&order);

        if let Some(date) = &order.order_date {
            println!("placed: {}", date);
        }

        for item in &order.order_items {
            println!(
                "  {} x{} {}",
                item.product_name.as_deref().unwrap_or("unknown"),
                item.quantity.unwrap_or(0),
                fmt_amount(item.item_total_price),
            );
        }

        if let Some(notes) = &order.customer_notes {
            println!("notes: {}", notes);
        }
    } else {
        let list = QueryOrders::new()
            .send(&state.client)
            .await?;

        if list.is_empty() {
            println!("no contents");
        }

        for order in &list {
            print_order(order);
        }
    }

    Ok(())
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// notes for the shop
    #[arg(long)]
    notes: Option<String>,
}

async fn create(state: &AppState, args: CreateArgs) -> error::Result {
    let mut builder = CreateOrder::new();

    if let Some(notes) = args.notes {
        builder.notes(notes);
    }

    let order = builder.send(&state.client).await?;

    state.notifier.success(format!(
        "order {} placed",
        order.order_number.as_deref().unwrap_or("")
    ));

    print_order(&order);

    Ok(())
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// id of the order
    id: i64,

    /// the new status. examples: PENDING | PROCESSING | COMPLETED
    status: String,
}

async fn status(state: &AppState, args: StatusArgs) -> error::Result {
    let value = UpdateOrderStatus::new(args.id, args.status)
        .send(&state.client)
        .await?;

    print_value(value)
}

#[derive(Debug, Args)]
struct IdArgs {
    /// id of the order
    id: i64,
}

async fn cancel(state: &AppState, args: IdArgs) -> error::Result {
    let value = CancelOrder::id(args.id)
        .send(&state.client)
        .await?;

    state.notifier.success(format!("order {} cancelled", args.id));

    print_value(value)
}

async fn delete(state: &AppState, args: IdArgs) -> error::Result {
    let value = DeleteOrder::id(args.id)
        .send(&state.client)
        .await?;

    state.notifier.success(format!("order {} deleted", args.id));

    print_value(value)
}
