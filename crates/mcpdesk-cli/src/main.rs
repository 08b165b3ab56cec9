//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to the core `Console`.

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mcpdesk_cli::{CliContext, CliError, Commands, ConsoleConfig, bootstrap, handlers};
use mcpdesk_core::NewIncident;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}

/// Cancel in-flight fetches when the user presses Ctrl-C.
fn cancel_on_ctrl_c(ctx: &CliContext) {
    let token = ctx.cancel_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Ctrl-C received, cancelling");
            token.cancel();
        }
    });
}

async fn run(ctx: &CliContext, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Servers { id } => handlers::servers::execute(ctx, id.as_deref()).await,
        Commands::Incidents { status } => handlers::incidents::list(ctx, status).await,
        Commands::Incident { command } => handlers::incidents::execute(ctx, command).await,
        Commands::Activity { limit } => handlers::activity::execute(ctx, limit).await,
        Commands::Config { command } => handlers::config::execute(ctx, command).await,
        Commands::ResetPassword { email, password } => {
            handlers::actions::reset_password(ctx, &email, &password).await
        }
        Commands::CreateIncident {
            title,
            description,
            priority,
            category,
        } => {
            let incident = NewIncident {
                title,
                description,
                priority,
                category,
            };
            handlers::actions::create_incident(ctx, incident).await
        }
        Commands::Dashboard => handlers::dashboard::execute(ctx).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = mcpdesk_cli::Cli::parse();
    init_tracing(cli.verbose);

    let config = ConsoleConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        // No command provided - show help
        mcpdesk_cli::Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(&config)?;
    cancel_on_ctrl_c(&ctx);

    if let Err(err) = run(&ctx, command).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
