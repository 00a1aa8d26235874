use clap::Args;
use teahouse_api::auth::{AuthResponse, CurrentUser};
use teahouse_api::client::auth::{
    Login,
    Register,
    Logout,
    RetrieveMe,
    CheckUsername,
    Health,
};
use teahouse_lib::routing::LOGIN_PATH;
use teahouse_lib::session::CURRENT_USER_KEY;

use crate::error::{self, Context};
use crate::input;
use crate::state::AppState;

async fn prompt_username(given: Option<String>) -> error::Result<String> {
    match given {
        Some(username) => Ok(username),
        None => input::prompt(|| input::read_stdin_trimmed("username: ")).await,
    }
}

async fn prompt_password(given: Option<String>) -> error::Result<String> {
    match given {
        Some(password) => Ok(password),
        None => input::prompt(|| rpassword::prompt_password("password: ")).await,
    }
}

/// stores the session from a successful auth response and moves on to the
/// home view of its role
fn establish(state: &AppState, res: AuthResponse) -> error::Result {
    let Some(session) = res.session() else {
        return Err(error::Error::from(
            res.message.unwrap_or_else(|| "authentication failed".to_owned())
        ));
    };

    state.session()
        .establish(&session)
        .context("failed saving session data")?;

    state.router.home()?;

    let message = match res.message {
        Some(msg) => msg,
        None => format!("welcome {}", session.username.unwrap_or_default()),
    };

    state.notifier.success(message);

    Ok(())
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// will prompt if not given
    username: Option<String>,

    /// will prompt if not given
    #[arg(long)]
    password: Option<String>,

    /// login through the admin endpoint
    #[arg(long)]
    admin: bool,
}

pub async fn login(state: &AppState, args: LoginArgs) -> error::Result {
    let username = prompt_username(args.username).await?;
    let password = prompt_password(args.password).await?;

    let res = Login::new(username, password)
        .admin(args.admin)
        .send(&state.client)
        .await?;

    establish(state, res)
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// will prompt if not given
    username: Option<String>,

    /// will prompt if not given
    #[arg(long)]
    password: Option<String>,

    /// email of the new account
    #[arg(long)]
    email: Option<String>,
}

pub async fn register(state: &AppState, args: RegisterArgs) -> error::Result {
    let username = prompt_username(args.username).await?;
    let password = prompt_password(args.password).await?;

    let mut builder = Register::new(username, password);

    if let Some(email) = args.email {
        builder.email(email);
    }

    let res = builder.send(&state.client).await?;

    establish(state, res)
}

/// the local session is dropped even if the server call fails
pub async fn logout(state: &AppState) -> error::Result {
    let result = Logout::new().send(&state.client).await;

    state.session()
        .clear()
        .context("failed clearing session data")?;

    state.router.push(LOGIN_PATH)?;

    match result {
        Ok(_) => {
            state.notifier.success("logged out");
        },
        Err(err) => {
            tracing::debug!("logout request failed: {}", err);

            state.notifier.warning("logged out locally, the server did not confirm");
        }
    }

    Ok(())
}

/// also refreshes the stored `currentUser` record with what the server
/// reports
pub async fn whoami(state: &AppState) -> error::Result {
    let info = RetrieveMe::new()
        .send(&state.client)
        .await?;

    let current = CurrentUser {
        user_id: info.id,
        username: info.username.clone(),
        role: info.role.as_deref().and_then(|r| r.parse().ok()),
    };

    state.session()
        .set(CURRENT_USER_KEY, serde_json::to_string(&current)?)
        .context("failed saving session data")?;

    if let Some(id) = info.id {
        print!("{} ", id);
    }

    println!("{}", info.username.unwrap_or_default());

    if let Some(email) = info.email {
        println!("email: {}", email);
    }

    if let Some(role) = info.role {
        println!("role: {}", role);
    }

    Ok(())
}

#[derive(Debug, Args)]
pub struct CheckUserArgs {
    username: String,
}

pub async fn check_user(state: &AppState, args: CheckUserArgs) -> error::Result {
    let taken = CheckUsername::new(args.username.clone())
        .send(&state.client)
        .await?;

    if taken {
        println!("{} is taken", args.username);
    } else {
        println!("{} is available", args.username);
    }

    Ok(())
}

pub async fn health(state: &AppState) -> error::Result {
    let value = Health::new()
        .send(&state.client)
        .await?;

    super::print_value(value)
}
