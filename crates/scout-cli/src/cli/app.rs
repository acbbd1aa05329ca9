use super::*;
pub(super) fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    info!(command = command_label(&cli.command), "Running command");

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Validate(args) => handle_validate(args, config_path),
        Commands::CheckUrl(args) => handle_check_url(args),
        Commands::Guide(args) => handle_guide(args),
        Commands::Profile(args) => handle_profile(args, config_path),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub(super) fn command_label(command: &Commands) -> &'static str {
    match command {
        Commands::Validate(_) => "validate",
        Commands::CheckUrl(_) => "check-url",
        Commands::Guide(_) => "guide",
        Commands::Profile(_) => "profile",
    }
}
