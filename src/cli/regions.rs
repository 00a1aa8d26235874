use clap::{Subcommand, Args};
use teahouse_api::client::regions::{
    QueryRegions,
    RetrieveRegion,
    RecommendRegion,
    QueryRegionProducts,
    SearchRegionProducts,
};
use teahouse_api::regions::{Region, RegionProduct, LocationRequest};

use crate::error;
use crate::state::AppState;

use super::fmt_amount;

#[derive(Debug, Args)]
pub struct RegionsArgs {
    #[command(subcommand)]
    command: RegionsCmds
}

#[derive(Debug, Subcommand)]
enum RegionsCmds {
    /// retrieves a list of regions
    Get(GetArgs),

    /// recommends regional teas for a location
    Recommend(RecommendArgs),

    /// lists the products of a region
    Products(ProductsArgs),

    /// searches regional products
    Search(SearchArgs),
}

pub async fn handle(state: &AppState, args: RegionsArgs) -> error::Result {
    match args.command {
        RegionsCmds::Get(given) => get(state, given).await,
        RegionsCmds::Recommend(given) => recommend(state, given).await,
        RegionsCmds::Products(given) => products(state, given).await,
        RegionsCmds::Search(given) => search(state, given).await,
    }
}

fn print_region(region: &Region) {
    println!(
        "{} {}{}",
        region.code,
        region.icon.as_deref().map(|i| format!("{} ", i)).unwrap_or_default(),
        region.name.as_deref().unwrap_or("-"),
    );
}

fn print_products(list: &[RegionProduct]) {
    if list.is_empty() {
        println!("no contents");
    }

    for item in list {
        println!(
            "{} {}{} {}",
            item.product_id.unwrap_or(0),
            item.product_name.as_deref().unwrap_or("unknown"),
            if item.is_featured.unwrap_or(false) { " *" } else { "" },
            fmt_amount(item.product_price),
        );
    }
}

#[derive(Debug, Args)]
struct GetArgs {
    /// retrieves a single region
    #[arg(long)]
    code: Option<String>,
}

async fn get(state: &AppState, args: GetArgs) -> error::Result {
    if let Some(code) = args.code {
        let region = RetrieveRegion::code(code)
            .send(&state.client)
            .await?;

        print_region(&region);

        if let Some(provinces) = &region.cover_provinces {
            println!("provinces: {}", provinces);
        }

        if let Some(desc) = &region.specialty_desc {
            println!("{}", desc);
        }
    } else {
        let list = QueryRegions::new()
            .send(&state.client)
            .await?;

        if list.is_empty() {
            println!("no contents");
        }

        for region in &list {
            print_region(region);
        }
    }

    Ok(())
}

#[derive(Debug, Args)]
struct RecommendArgs {
    /// answer for this region instead of detecting one
    #[arg(long, conflicts_with_all = ["province", "city"])]
    code: Option<String>,

    #[arg(long)]
    province: Option<String>,

    #[arg(long)]
    city: Option<String>,
}

async fn recommend(state: &AppState, args: RecommendArgs) -> error::Result {
    let builder = match args.code {
        Some(code) => RecommendRegion::mock(code),
        None => RecommendRegion::new(LocationRequest {
            province: args.province,
            city: args.city,
            ..LocationRequest::default()
        }),
    };

    let result = builder.send(&state.client).await?;

    if let Some(region) = &result.region {
        print_region(region);
    }

    if let Some(suggestion) = &result.seasonal_suggestion {
        println!("{}", suggestion);
    }

    if let Some(suggestion) = &result.weather_suggestion {
        println!("{}", suggestion);
    }

    print_products(&result.featured_products);

    Ok(())
}

#[derive(Debug, Args)]
struct ProductsArgs {
    /// code of the region
    code: String,

    /// only the featured products
    #[arg(long)]
    featured: bool,
}

async fn products(state: &AppState, args: ProductsArgs) -> error::Result {
    let mut builder = QueryRegionProducts::code(args.code);
    builder.featured(args.featured);

    let list = builder.send(&state.client).await?;

    print_products(&list);

    Ok(())
}

#[derive(Debug, Args)]
struct SearchArgs {
    keyword: String,

    /// limit the search to a region
    #[arg(long)]
    region: Option<String>,
}

async fn search(state: &AppState, args: SearchArgs) -> error::Result {
    let mut builder = SearchRegionProducts::keyword(args.keyword);

    if let Some(region) = args.region {
        builder.region(region);
    }

    let list = builder.send(&state.client).await?;

    print_products(&list);

    Ok(())
}
