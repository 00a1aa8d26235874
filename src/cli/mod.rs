use std::process::ExitCode;

use clap::{Parser, Subcommand, Args};
use teahouse_api::client::stats::RetrieveStatistics;
use teahouse_api::client::recommendation::Recommend;

use crate::config::{self, CliArgs};
use crate::error::{self, Context};
use crate::input;
use crate::notify::{self, Notifier};
use crate::state::AppState;

mod auth;
mod products;
mod categories;
mod cart;
mod orders;
mod users;
mod regions;

/// a cli for the teahouse shop.
///
/// browse products, manage a cart and orders, and administer the shop. if
/// no command is provided then it will enter interactive mode.
#[derive(Debug, Parser)]
struct Cli {
    #[command(flatten)]
    config: CliArgs,

    #[command(subcommand)]
    command: Option<BaseCmds>
}

/// the exit code reflects whether a one-shot command succeeded
pub async fn start() -> error::Result<ExitCode> {
    let args = Cli::parse();
    let config = config::get_config(&args.config)?;

    let (notifier, rx) = Notifier::channel(config.notify_capacity);
    let printer = notify::spawn_printer(rx);

    let state = AppState::bootstrap(&config, notifier)?;

    let result = match args.command {
        Some(cmd) => if report(&state, handle(&state, cmd).await) {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        },
        None => Interactive::handle(&state).await
            .map(|_| ExitCode::SUCCESS)
    };

    drop(state);

    printer.await.context("notification printer failed")?;

    result
}

/// sends a failed command to the notifier. a dropped notification is
/// still logged. returns false if the command failed
fn report(state: &AppState, result: error::Result) -> bool {
    let Err(err) = result else {
        return true;
    };

    if !state.notifier.error(err.to_string()) {
        tracing::error!("{}", err);
    }

    false
}

#[derive(Debug, Parser)]
#[command(no_binary_name = true)]
enum Interactive {
    #[command(flatten)]
    Base(BaseCmds),
    Quit
}

impl Interactive {
    async fn handle(state: &AppState) -> error::Result {
        loop {
            let Some(given) = input::prompt(|| input::read_stdin("> ")).await? else {
                break;
            };
            let trimmed = given.trim();

            if trimmed.is_empty() {
                continue;
            }

            let Ok(args_list) = shell_words::split(trimmed) else {
                println!("failed to parse command line args");
                continue;
            };

            let cmd = match Interactive::try_parse_from(args_list) {
                Ok(c) => c,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            };

            match cmd {
                Interactive::Base(cmd) => {
                    report(state, handle(state, cmd).await);
                },
                Interactive::Quit => break,
            }
        }

        Ok(())
    }
}

#[derive(Debug, Subcommand)]
enum BaseCmds {
    /// login to the shop
    Login(auth::LoginArgs),

    /// creates a new account and logs into it
    Register(auth::RegisterArgs),

    /// logout and drop the local session
    Logout,

    /// shows the user the server associates with the session
    Whoami,

    /// checks if a username is already taken
    CheckUser(auth::CheckUserArgs),

    /// checks that the auth service is up
    Health,

    /// navigates to the given view
    Goto(GotoArgs),

    /// returns to the previous view
    Back,

    /// shows the active view and session
    Where,

    /// interacts with products
    Products(products::ProductsArgs),

    /// interacts with product categories
    Categories(categories::CategoriesArgs),

    /// interacts with the cart of the current user
    Cart(cart::CartArgs),

    /// interacts with orders
    Orders(orders::OrdersArgs),

    /// manages registered users
    Users(users::UsersArgs),

    /// shows shop statistics
    Stats,

    /// asks the shop for a tea recommendation
    Recommend(RecommendArgs),

    /// regional teas
    Regions(regions::RegionsArgs),
}

async fn handle(state: &AppState, command: BaseCmds) -> error::Result {
    match command {
        BaseCmds::Login(given) => auth::login(state, given).await,
        BaseCmds::Register(given) => auth::register(state, given).await,
        BaseCmds::Logout => auth::logout(state).await,
        BaseCmds::Whoami => auth::whoami(state).await,
        BaseCmds::CheckUser(given) => auth::check_user(state, given).await,
        BaseCmds::Health => auth::health(state).await,
        BaseCmds::Goto(given) => goto(state, given),
        BaseCmds::Back => back(state),
        BaseCmds::Where => location(state),
        BaseCmds::Products(given) => products::handle(state, given).await,
        BaseCmds::Categories(given) => categories::handle(state, given).await,
        BaseCmds::Cart(given) => cart::handle(state, given).await,
        BaseCmds::Orders(given) => orders::handle(state, given).await,
        BaseCmds::Users(given) => users::handle(state, given).await,
        BaseCmds::Stats => stats(state).await,
        BaseCmds::Recommend(given) => recommend(state, given).await,
        BaseCmds::Regions(given) => regions::handle(state, given).await,
    }
}

/// prints whatever payload the server answered with
pub(crate) fn print_value(value: Option<serde_json::Value>) -> error::Result {
    match value {
        Some(serde_json::Value::String(text)) => println!("{}", text),
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => {}
    }

    Ok(())
}

pub(crate) fn fmt_amount(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_owned())
}

#[derive(Debug, Args)]
struct GotoArgs {
    /// path of the view. examples: /customer | /admin | /recommendation
    path: String,
}

fn goto(state: &AppState, args: GotoArgs) -> error::Result {
    state.router.push(&args.path)?;

    location(state)
}

fn back(state: &AppState) -> error::Result {
    state.router.back();

    location(state)
}

fn location(state: &AppState) -> error::Result {
    let route = state.router.current()
        .context("no active view")?;
    let session = state.session().current();

    match route.view() {
        Some(view) => println!("{} ({})", route.path, view),
        None => println!("{}", route.path),
    }

    match &session.username {
        Some(username) => println!("user: {} ({})", username, session.role()),
        None => println!("user: not logged in"),
    }

    Ok(())
}

async fn stats(state: &AppState) -> error::Result {
    let stats = RetrieveStatistics::new()
        .send(&state.client)
        .await?;

    println!("users:    {}", stats.total_users.unwrap_or(0));
    println!("products: {}", stats.total_products.unwrap_or(0));
    println!("orders:   {}", stats.total_orders.unwrap_or(0));
    println!("revenue:  {}", fmt_amount(stats.total_revenue));
    println!("average:  {}", fmt_amount(stats.avg_order_value));

    Ok(())
}

#[derive(Debug, Args)]
struct RecommendArgs {
    /// flavour or kind of tea preferred
    #[arg(long)]
    preference: Option<String>,

    /// current weather
    #[arg(long)]
    weather: Option<String>,

    /// current mood
    #[arg(long)]
    mood: Option<String>,
}

async fn recommend(state: &AppState, args: RecommendArgs) -> error::Result {
    let mut builder = Recommend::new();

    if let Some(preference) = args.preference {
        builder.preference(preference);
    }

    if let Some(weather) = args.weather {
        builder.weather(weather);
    }

    if let Some(mood) = args.mood {
        builder.mood(mood);
    }

    let result = builder.send(&state.client).await?;

    if !result.success {
        return Err(error::Error::from(
            result.message.unwrap_or_else(|| "no recommendation available".to_owned())
        ));
    }

    let name = result.recommended_product.unwrap_or_default();

    match result.product_id {
        Some(id) => println!("{} {} {}", id, name, fmt_amount(result.product_price)),
        None => println!("{}", name),
    }

    if let Some(reasoning) = result.reasoning {
        println!("{}", reasoning);
    }

    if let Some(description) = result.description {
        println!("{}", description);
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::notify::Level;

    #[test]
    fn failed_commands_are_reported() {
        let config = Config {
            url: "http://localhost:8081/api".into(),
            timeout: Duration::from_millis(1000),
            session: None,
            notify_capacity: 4,
        };
        let (notifier, mut rx) = Notifier::channel(4);
        let state = AppState::bootstrap(&config, notifier).unwrap();

        assert!(report(&state, Ok(())));
        assert!(rx.try_recv().is_err());

        assert!(!report(&state, Err(error::Error::from("cart is empty"))));

        let notification = rx.try_recv().unwrap();
        assert_eq!(notification.level, Level::Error);
        assert_eq!(notification.message, "cart is empty");
    }
}
