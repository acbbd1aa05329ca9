use super::*;
pub(super) fn handle_profile(args: ProfileArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let path = resolve_config_path(config_path)?;
    match args.command {
        ProfileCommands::Add(args) => handle_add_profile(args, &path),
        ProfileCommands::List => handle_list_profiles(&path),
        ProfileCommands::Remove(args) => handle_remove_profile(args, &path),
    }
}

pub(super) fn handle_add_profile(args: AddProfileArgs, path: &Path) -> anyhow::Result<()> {
    if args.connection.provider.is_none() {
        anyhow::bail!("--provider is required when adding a profile");
    }
    let mut config = AppConfig::load(path)?;
    let entry = NamedConnection {
        name: args.name.clone(),
        connection: args.connection.apply(ConnectionConfig::default()),
    };
    let replaced = config.upsert(entry);
    config.save(path)?;
    info!(profile = %args.name, replaced, "saved connection profile");
    if replaced {
        println!("Profile {} updated in {}", args.name, path.display());
    } else {
        println!("Profile {} added to {}", args.name, path.display());
    }
    Ok(())
}

pub(super) fn handle_list_profiles(path: &Path) -> anyhow::Result<()> {
    let config = AppConfig::load(path)?;
    if config.connections.is_empty() {
        println!("No profiles saved in {}", path.display());
        return Ok(());
    }
    for entry in &config.connections {
        println!("{}", profile_line(entry));
    }
    Ok(())
}

pub(super) fn handle_remove_profile(args: RemoveProfileArgs, path: &Path) -> anyhow::Result<()> {
    let mut config = AppConfig::load(path)?;
    if !config.remove(&args.name) {
        anyhow::bail!("no profile named {} in {}", args.name, path.display());
    }
    config.save(path)?;
    println!("Profile {} removed", args.name);
    Ok(())
}

pub(super) fn profile_line(entry: &NamedConnection) -> String {
    let connection = &entry.connection;
    let provider = connection
        .provider
        .map(|kind| kind.as_prefix())
        .unwrap_or("-");
    let base_url = connection.base_url.as_deref().unwrap_or("-");
    let mut line = format!("{} | {provider} | {base_url}", entry.name);
    if let Some(username) = connection.username.as_deref() {
        line.push_str(&format!(" | {username}"));
    }
    if !connection.verify_ssl {
        line.push_str(" | insecure");
    }
    line
}
