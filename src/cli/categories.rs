use clap::{Subcommand, Args};
use teahouse_api::client::categories::{
    QueryCategories,
    RetrieveCategory,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
};
use teahouse_api::categories::{Category, CategoryBody};

use crate::error;
use crate::state::AppState;

use super::print_value;

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    command: CategoriesCmds
}

#[derive(Debug, Subcommand)]
enum CategoriesCmds {
    /// retrieves a list of categories
    Get(GetArgs),

    /// creates a new category
    Create(CreateArgs),

    /// updates a category
    Update(UpdateArgs),

    /// deletes a category
    Delete(DeleteArgs),
}

pub async fn handle(state: &AppState, args: CategoriesArgs) -> error::Result {
    match args.command {
        CategoriesCmds::Get(given) => get(state, given).await,
        CategoriesCmds::Create(given) => create(state, given).await,
        CategoriesCmds::Update(given) => update(state, given).await,
        CategoriesCmds::Delete(given) => delete(state, given).await,
    }
}

fn print_category(category: &Category) {
    match &category.description {
        Some(description) => println!("{} {} - {}", category.id, category.name, description),
        None => println!("{} {}", category.id, category.name),
    }
}

#[derive(Debug, Args)]
struct GetArgs {
    /// retrieves a single category
    #[arg(long)]
    id: Option<i64>,
}

async fn get(state: &AppState, args: GetArgs) -> error::Result {
    if let Some(id) = args.id {
        let category = RetrieveCategory::id(id)
            .send(&state.client)
            .await?;

        print_category(&category);

        for (key, value) in &category.extra {
            println!("{}: {}", key, value);
        }
    } else {
        let list = QueryCategories::new()
            .send(&state.client)
            .await?;

        if list.is_empty() {
            println!("no contents");
        }

        for category in &list {
            print_category(category);
        }
    }

    Ok(())
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// name of the new category
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,
}

async fn create(state: &AppState, args: CreateArgs) -> error::Result {
    let body = CategoryBody {
        name: Some(args.name),
        description: args.description,
    };

    let category = CreateCategory::new(body)
        .send(&state.client)
        .await?;

    print_category(&category);

    Ok(())
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// id of the category to update
    id: i64,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    description: Option<String>,
}

async fn update(state: &AppState, args: UpdateArgs) -> error::Result {
    let body = CategoryBody {
        name: args.name,
        description: args.description,
    };

    let category = UpdateCategory::new(args.id, body)
        .send(&state.client)
        .await?;

    print_category(&category);

    Ok(())
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// id of the category to delete
    id: i64,
}

async fn delete(state: &AppState, args: DeleteArgs) -> error::Result {
    let value = DeleteCategory::id(args.id)
        .send(&state.client)
        .await?;

    state.notifier.success(format!("deleted category {}", args.id));

    print_value(value)
}
