use clap::{Subcommand, Args};
use teahouse_api::client::products::{
    QueryProducts,
    RetrieveProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
};
use teahouse_api::products::{Product, ProductBody};

use crate::error;
use crate::state::AppState;

use super::{fmt_amount, print_value};

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    command: ProductsCmds
}

#[derive(Debug, Subcommand)]
enum ProductsCmds {
    /// retrieves a list of products
    Get(GetArgs),

    /// creates a new product
    Create(CreateArgs),

    /// updates a product
    Update(UpdateArgs),

    /// deletes a product
    Delete(DeleteArgs),
}

pub async fn handle(state: &AppState, args: ProductsArgs) -> error::Result {
    match args.command {
        ProductsCmds::Get(given) => get(state, given).await,
        ProductsCmds::Create(given) => create(state, given).await,
        ProductsCmds::Update(given) => update(state, given).await,
        ProductsCmds::Delete(given) => delete(state, given).await,
    }
}

fn print_product(product: &Product) {
    println!(
        "{} {}{} {}",
        product.id,
        product.emoji.as_deref().map(|e| format!("{} ", e)).unwrap_or_default(),
        product.name,
        fmt_amount(product.price),
    );
}

#[derive(Debug, Args)]
struct ProductFields {
    /// display name
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    price: Option<f64>,

    /// name of the category
    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    emoji: Option<String>,

    /// comma separated list of tags
    #[arg(long)]
    tags: Option<String>,

    #[arg(long)]
    available: Option<bool>,

    #[arg(long)]
    image_url: Option<String>,
}

impl From<ProductFields> for ProductBody {
    fn from(fields: ProductFields) -> Self {
        ProductBody {
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            emoji: fields.emoji,
            tags: fields.tags,
            available: fields.available,
            image_url: fields.image_url,
        }
    }
}

#[derive(Debug, Args)]
struct GetArgs {
    /// retrieves information about a single product
    #[arg(long)]
    id: Option<i64>,
}

async fn get(state: &AppState, args: GetArgs) -> error::Result {
    if let Some(id) = args.id {
        let product = RetrieveProduct::id(id)
            .send(&state.client)
            .await?;

        print_product(&product);

        if let Some(category) = &product.category {
            println!("category: {}", category);
        }

        if let Some(description) = &product.description {
            println!("{}", description);
        }
    } else {
        let list = QueryProducts::new()
            .send(&state.client)
            .await?;

        if list.is_empty() {
            println!("no contents");
        }

        for product in &list {
            print_product(product);
        }
    }

    Ok(())
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[command(flatten)]
    fields: ProductFields,
}

async fn create(state: &AppState, args: CreateArgs) -> error::Result {
    let product = CreateProduct::new(args.fields.into())
        .send(&state.client)
        .await?;

    print_product(&product);

    Ok(())
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// id of the product to update
    id: i64,

    #[command(flatten)]
    fields: ProductFields,
}

async fn update(state: &AppState, args: UpdateArgs) -> error::Result {
    let product = UpdateProduct::new(args.id, args.fields.into())
        .send(&state.client)
        .await?;

    print_product(&product);

    Ok(())
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// id of the product to delete
    id: i64,
}

async fn delete(state: &AppState, args: DeleteArgs) -> error::Result {
    let value = DeleteProduct::id(args.id)
        .send(&state.client)
        .await?;

    state.notifier.success(format!("deleted product {}", args.id));

    print_value(value)
}
