use clap::{Subcommand, Args};
use teahouse_api::client::users::{
    QueryUsers,
    UpdateRole,
    DeleteUser,
};

use crate::error;
use crate::input;
use crate::state::AppState;

use super::{fmt_amount, print_value};

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    command: UsersCmds
}

#[derive(Debug, Subcommand)]
enum UsersCmds {
    /// retrieves a list of users
    Get,

    /// changes the role of a user
    Role(RoleArgs),

    /// deletes a user
    Delete(DeleteArgs),
}

pub async fn handle(state: &AppState, args: UsersArgs) -> error::Result {
    match args.command {
        UsersCmds::Get => get(state).await,
        UsersCmds::Role(given) => role(state, given).await,
        UsersCmds::Delete(given) => delete(state, given).await,
    }
}

async fn get(state: &AppState) -> error::Result {
    let mut list = QueryUsers::new()
        .send(&state.client)
        .await?;

    if list.is_empty() {
        println!("no contents");
        return Ok(());
    }

    list.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));

    for user in &list {
        println!(
            "{} {} {} orders: {} spent: {}",
            user.id,
            user.username,
            user.role.as_deref().unwrap_or("-"),
            user.order_count.unwrap_or(0),
            fmt_amount(user.total_spent),
        );
    }

    Ok(())
}

#[derive(Debug, Args)]
struct RoleArgs {
    /// id of the user
    id: i64,

    /// the new role. examples: USER | ADMIN
    role: String,
}

async fn role(state: &AppState, args: RoleArgs) -> error::Result {
    let value = UpdateRole::new(args.id, args.role)
        .send(&state.client)
        .await?;

    print_value(value)
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// id of the user
    id: i64,

    /// skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

async fn delete(state: &AppState, args: DeleteArgs) -> error::Result {
    if !args.yes {
        let prefix = format!("delete user {}?", args.id);

        if !input::prompt(move || input::read_yn(prefix)).await? {
            return Ok(());
        }
    }

    let value = DeleteUser::id(args.id)
        .send(&state.client)
        .await?;

    state.notifier.success(format!("deleted user {}", args.id));

    print_value(value)
}
