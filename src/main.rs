use std::process::ExitCode;

mod error;
mod input;
mod config;
mod notify;
mod state;
mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use tracing_subscriber::{FmtSubscriber, EnvFilter};

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .expect("failed to initialize global tracing subscriber");

    match cli::start().await {
        Ok(code) => code,
        Err(err) => {
            println!("{}", err);

            ExitCode::FAILURE
        }
    }
}
