use clap::{Subcommand, Args};
use teahouse_api::cart::Cart;
use teahouse_api::client::cart::{
    RetrieveCart,
    AddToCart,
    UpdateCartItem,
    RemoveFromCart,
    ClearCart,
};

use crate::error;
use crate::state::AppState;

use super::fmt_amount;

#[derive(Debug, Args)]
pub struct CartArgs {
    #[command(subcommand)]
    command: CartCmds
}

#[derive(Debug, Subcommand)]
enum CartCmds {
    /// shows the contents of the cart
    Get,

    /// adds a product to the cart
    Add(AddArgs),

    /// changes the quantity of a cart item
    Update(UpdateArgs),

    /// removes an item from the cart
    Remove(RemoveArgs),

    /// removes every item from the cart
    Clear,
}

pub async fn handle(state: &AppState, args: CartArgs) -> error::Result {
    match args.command {
        CartCmds::Get => get(state).await,
        CartCmds::Add(given) => add(state, given).await,
        CartCmds::Update(given) => update(state, given).await,
        CartCmds::Remove(given) => remove(state, given).await,
        CartCmds::Clear => clear(state).await,
    }
}

fn print_cart(cart: &Cart) {
    if cart.cart_items.is_empty() {
        println!("cart is empty");
        return;
    }

    for item in &cart.cart_items {
        println!(
            "{} {}{} x{} {}",
            item.id,
            item.product_emoji.as_deref().map(|e| format!("{} ", e)).unwrap_or_default(),
            item.product_name.as_deref().unwrap_or("unknown"),
            item.quantity,
            fmt_amount(Some(item.item_total_price)),
        );
    }

    println!("total: {}", fmt_amount(cart.total_price));
}

async fn get(state: &AppState) -> error::Result {
    let cart = RetrieveCart::new()
        .send(&state.client)
        .await?;

    print_cart(&cart);

    Ok(())
}

#[derive(Debug, Args)]
struct AddArgs {
    /// id of the product to add
    product_id: i64,

    #[arg(short, long, default_value_t = 1)]
    quantity: i64,
}

async fn add(state: &AppState, args: AddArgs) -> error::Result {
    let mut builder = AddToCart::new(args.product_id);
    builder.quantity(args.quantity);

    let cart = builder.send(&state.client).await?;

    state.notifier.success("added to cart");

    print_cart(&cart);

    Ok(())
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// id of the cart item
    item_id: i64,

    /// the new quantity
    quantity: i64,
}

async fn update(state: &AppState, args: UpdateArgs) -> error::Result {
    let cart = UpdateCartItem::new(args.item_id, args.quantity)
        .send(&state.client)
        .await?;

    print_cart(&cart);

    Ok(())
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// id of the cart item
    item_id: i64,
}

async fn remove(state: &AppState, args: RemoveArgs) -> error::Result {
    RemoveFromCart::item(args.item_id)
        .send(&state.client)
        .await?;

    state.notifier.success("removed from cart");

    Ok(())
}

async fn clear(state: &AppState) -> error::Result {
    ClearCart::new()
        .send(&state.client)
        .await?;

    state.notifier.success("cart cleared");

    Ok(())
}
