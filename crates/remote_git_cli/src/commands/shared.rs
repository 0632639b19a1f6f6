use std::sync::Arc;

use remote_git::{ClientFactory, ClientOptions, FindOptions, GitClient};

use crate::config::{ClientConfig, FindConfig};

/// Connection flags; unset flags fall back to the `[client]` config section.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct ConnectionArgs {
    /// Hosting service URL or local folder
    #[arg(short = 'u', long)]
    pub(crate) url: Option<String>,

    /// Backend type (detected from the URL when omitted)
    #[arg(short = 't', long = "type")]
    pub(crate) client_type: Option<String>,

    /// Access token
    #[arg(short = 'T', long, env = "REMOTE_GIT_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    pub(crate) unsafe_ssl: bool,
}

impl ConnectionArgs {
    pub(crate) fn client_options(&self, defaults: &ClientConfig) -> Result<ClientOptions, String> {
        let url = self
            .url
            .clone()
            .or_else(|| defaults.url.clone())
            .ok_or("no URL given: use --url or set [client] url in the config file")?;

        let mut options =
            ClientOptions::new(url).with_unsafe_ssl(self.unsafe_ssl || defaults.unsafe_ssl);
        if let Some(client_type) = self
            .client_type
            .clone()
            .or_else(|| defaults.client_type.clone())
        {
            options = options.with_type(client_type);
        }
        if let Some(token) = self.token.clone().or_else(|| defaults.token.clone()) {
            options = options.with_token(token);
        }
        Ok(options)
    }

    /// Build the client for these flags.
    pub(crate) fn connect(
        &self,
        defaults: &ClientConfig,
    ) -> Result<Arc<dyn GitClient>, Box<dyn std::error::Error>> {
        let options = self.client_options(defaults)?;
        let factory = ClientFactory::new()?;
        Ok(factory.create_client(&options)?)
    }
}

/// Which users / organizations to list.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct SelectionArgs {
    /// User name, `_me_` for the token owner (repeatable)
    #[arg(long = "user")]
    pub(crate) users: Vec<String>,

    /// Organization or group (repeatable)
    #[arg(short = 'o', long = "org")]
    pub(crate) organizations: Vec<String>,

    /// Free-text search (GitLab only)
    #[arg(short = 's', long)]
    pub(crate) search: Option<String>,
}

impl SelectionArgs {
    /// Flags win over the config; lists are not merged.
    pub(crate) fn find_options(&self, defaults: &FindConfig) -> FindOptions {
        let users = if self.users.is_empty() {
            &defaults.users
        } else {
            &self.users
        };
        let organizations = if self.organizations.is_empty() {
            &defaults.organizations
        } else {
            &self.organizations
        };

        let mut options = FindOptions::new()
            .with_users(users.iter().cloned())
            .with_organizations(organizations.iter().cloned());
        if let Some(search) = self.search.clone().or_else(|| defaults.search.clone()) {
            options = options.with_search(search);
        }
        options
    }
}
