use super::*;
#[derive(Parser)]
#[command(author, version, about)]
pub(super) struct Cli {
    #[arg(long, short, global = true, help = "Log at debug level unless RUST_LOG is set")]
    pub(super) verbose: bool,
    #[arg(long, global = true, help = "Path to the saved connections file")]
    pub(super) config: Option<PathBuf>,
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(clap::Subcommand)]
pub(super) enum Commands {
    #[command(about = "Validate a connection before running discovery")]
    Validate(ValidateArgs),
    #[command(about = "Check a URL against a provider's expected shape")]
    CheckUrl(CheckUrlArgs),
    #[command(about = "Show credential guidance for a provider")]
    Guide(GuideArgs),
    #[command(about = "Manage saved connection profiles")]
    Profile(ProfileArgs),
}

/// Connection fields shared by `validate` and `profile add`.
#[derive(clap::Args, Clone, Default)]
pub(super) struct ConnectionArgs {
    #[arg(long, value_enum)]
    pub(super) provider: Option<ProviderKindValue>,
    #[arg(long)]
    pub(super) base_url: Option<String>,
    #[arg(long)]
    pub(super) api_url: Option<String>,
    #[arg(long)]
    pub(super) username: Option<String>,
    #[arg(long, help = "Skip TLS certificate verification")]
    pub(super) insecure: bool,
    #[arg(long)]
    pub(super) self_hosted: bool,
}

impl ConnectionArgs {
    /// Overlays the flags that were given onto `base`.
    pub(super) fn apply(&self, mut base: ConnectionConfig) -> ConnectionConfig {
        if let Some(provider) = self.provider {
            base.provider = Some(provider.into());
        }
        if let Some(url) = &self.base_url {
            base.base_url = Some(url.clone());
        }
        if let Some(url) = &self.api_url {
            base.api_url = Some(url.clone());
        }
        if let Some(username) = &self.username {
            base.username = Some(username.clone());
        }
        if self.insecure {
            base.verify_ssl = false;
        }
        if self.self_hosted {
            base.self_hosted = true;
        }
        base
    }
}

#[derive(Parser)]
pub(super) struct ValidateArgs {
    #[command(flatten)]
    pub(super) connection: ConnectionArgs,
    #[arg(long, help = "Start from a saved profile; flags override its fields")]
    pub(super) profile: Option<String>,
    #[arg(long, value_name = "VAR", conflicts_with = "secret_stdin")]
    pub(super) secret_env: Option<String>,
    #[arg(long, help = "Read the password or token from the first line of stdin")]
    pub(super) secret_stdin: bool,
    #[arg(long)]
    pub(super) json: bool,
}

#[derive(Parser)]
pub(super) struct CheckUrlArgs {
    #[arg(long, value_enum)]
    pub(super) provider: ProviderKindValue,
    pub(super) url: String,
}

#[derive(Parser)]
pub(super) struct GuideArgs {
    #[arg(long, value_enum)]
    pub(super) provider: Option<ProviderKindValue>,
}

#[derive(Parser)]
pub(super) struct ProfileArgs {
    #[command(subcommand)]
    pub(super) command: ProfileCommands,
}

#[derive(clap::Subcommand)]
pub(super) enum ProfileCommands {
    #[command(about = "Save or replace a connection profile (secrets are not stored)")]
    Add(AddProfileArgs),
    #[command(about = "List saved profiles")]
    List,
    #[command(about = "Remove a saved profile")]
    Remove(RemoveProfileArgs),
}

#[derive(Parser)]
pub(super) struct AddProfileArgs {
    #[arg(long)]
    pub(super) name: String,
    #[command(flatten)]
    pub(super) connection: ConnectionArgs,
}

#[derive(Parser)]
pub(super) struct RemoveProfileArgs {
    #[arg(long)]
    pub(super) name: String,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub(super) enum ProviderKindValue {
    #[value(name = "github")]
    GitHub,
    #[value(name = "gitlab")]
    GitLab,
    #[value(name = "bitbucket")]
    Bitbucket,
    #[value(name = "azure-devops")]
    AzureDevOps,
}

impl From<ProviderKindValue> for ProviderKind {
    fn from(value: ProviderKindValue) -> Self {
        match value {
            ProviderKindValue::GitHub => ProviderKind::GitHub,
            ProviderKindValue::GitLab => ProviderKind::GitLab,
            ProviderKindValue::Bitbucket => ProviderKind::Bitbucket,
            ProviderKindValue::AzureDevOps => ProviderKind::AzureDevOps,
        }
    }
}
