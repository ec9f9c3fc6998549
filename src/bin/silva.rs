use anyhow::Result;
use silva::cli::{self, actions, actions::Action, telemetry};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let action = cli::start()?;

    // Handle the action
    match action {
        Action::Server { .. } => actions::server::handle(action).await?,
    }

    telemetry::shutdown_tracer();

    Ok(())
}
