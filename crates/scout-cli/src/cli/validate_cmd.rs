use super::*;
pub(super) fn handle_validate(
    args: ValidateArgs,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let base = match args.profile.as_deref() {
        Some(name) => load_profile(name, config_path)?,
        None => ConnectionConfig::default(),
    };
    let mut connection = args.connection.apply(base);
    connection.secret = read_secret(&args, &mut io::stdin().lock())?;

    let verdict = rules::default_validator().validate_connection(Some(&connection));
    connection.wipe_secret();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&verdict).context("serialize verdict")?
        );
    } else {
        print!("{verdict}");
    }
    if !verdict.is_valid() {
        anyhow::bail!(
            "connection is invalid ({} error(s))",
            verdict.errors().len()
        );
    }
    Ok(())
}

pub(super) fn handle_check_url(args: CheckUrlArgs) -> anyhow::Result<()> {
    let provider: ProviderKind = args.provider.into();
    if !rules::is_valid_url_for_provider(Some(provider), &args.url) {
        anyhow::bail!(
            "{} does not match the expected format for {}",
            args.url,
            provider.display_name()
        );
    }
    println!("{} matches the expected format for {}", args.url, provider.display_name());
    Ok(())
}

pub(super) fn handle_guide(args: GuideArgs) -> anyhow::Result<()> {
    let provider = args.provider.map(ProviderKind::from);
    if let Some(provider) = provider {
        println!("Provider: {}", provider.display_name());
    }
    println!("{}", rules::validation_suggestions(provider));
    Ok(())
}

fn load_profile(name: &str, config_path: Option<&Path>) -> anyhow::Result<ConnectionConfig> {
    let path = resolve_config_path(config_path)?;
    let config = AppConfig::load(&path)?;
    let entry = config
        .find(name)
        .with_context(|| format!("no profile named {name} in {}", path.display()))?;
    debug!(profile = name, "loaded connection profile");
    Ok(entry.connection.clone())
}

/// Reads the secret from the named environment variable or the first line of
/// `input`. `None` when neither source was requested.
pub(super) fn read_secret(
    args: &ValidateArgs,
    input: &mut impl BufRead,
) -> anyhow::Result<Option<SecretBuffer>> {
    if let Some(var) = args.secret_env.as_deref() {
        let value = std::env::var(var).with_context(|| format!("read secret from ${var}"))?;
        return Ok(Some(SecretBuffer::from(value)));
    }
    if args.secret_stdin {
        let mut line = String::new();
        input.read_line(&mut line).context("read secret from stdin")?;
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        return Ok(Some(SecretBuffer::from(line)));
    }
    Ok(None)
}
