//! Backend registry, type detection and client construction.
//!
//! The registry is an explicit value built from a fixed table; callers that
//! need extra backends register them on their own [`ClientRegistry`] and hand
//! it to [`ClientFactory::with_registry`].

#[cfg(feature = "local")]
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use url::Url;

use crate::github::{GITHUB_API_URL, GitHubClient};
use crate::gitlab::GitLabClient;
use crate::gogs::GogsClient;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{ApiClient, HttpHeaders, HttpTransport, token};
use crate::platform::{ClientError, ClientOptions, GitClient, RemoteBackend, Result};

#[cfg(feature = "local")]
use crate::local::LocalClient;

/// Per-request timeout of the production transport.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(60);

#[derive(Clone, Copy)]
enum Builder {
    Remote(fn(ApiClient) -> Arc<dyn GitClient>),
    #[cfg(feature = "local")]
    Local,
}

#[derive(Clone, Copy)]
struct BackendDescriptor {
    client_type: &'static str,
    token_type: &'static str,
    builder: Builder,
}

fn build_remote<C: RemoteBackend>(api: ApiClient) -> Arc<dyn GitClient> {
    Arc::new(C::from_api(api))
}

/// Known backends, in registration order.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    backends: Vec<BackendDescriptor>,
}

impl ClientRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// GitLab, GitHub, Gogs and (with the `local` feature) Local.
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        registry.register_remote::<GitLabClient>()?;
        registry.register_remote::<GitHubClient>()?;
        registry.register_remote::<GogsClient>()?;
        #[cfg(feature = "local")]
        registry.insert(BackendDescriptor {
            client_type: LocalClient::TYPE,
            token_type: LocalClient::TOKEN_TYPE,
            builder: Builder::Local,
        });
        Ok(registry)
    }

    /// Register an HTTP backend, replacing any backend with the same type.
    pub fn register_remote<C: RemoteBackend>(&mut self) -> Result<()> {
        if C::TYPE.is_empty() {
            return Err(ClientError::Configuration {
                backend: std::any::type_name::<C>(),
                field: "TYPE",
            });
        }
        if !token::is_valid_template(C::TOKEN_TYPE) {
            return Err(ClientError::Configuration {
                backend: std::any::type_name::<C>(),
                field: "TOKEN_TYPE",
            });
        }
        self.insert(BackendDescriptor {
            client_type: C::TYPE,
            token_type: C::TOKEN_TYPE,
            builder: Builder::Remote(build_remote::<C>),
        });
        Ok(())
    }

    fn insert(&mut self, descriptor: BackendDescriptor) {
        match self
            .backends
            .iter_mut()
            .find(|b| b.client_type == descriptor.client_type)
        {
            Some(existing) => *existing = descriptor,
            None => self.backends.push(descriptor),
        }
    }

    fn get(&self, client_type: &str) -> Option<&BackendDescriptor> {
        self.backends.iter().find(|b| b.client_type == client_type)
    }

    pub fn has_type(&self, client_type: &str) -> bool {
        self.get(client_type).is_some()
    }

    /// Registered type identifiers.
    pub fn types(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.client_type).collect()
    }

    /// Token-header template of a registered type.
    pub fn token_type(&self, client_type: &str) -> Option<&'static str> {
        self.get(client_type).map(|b| b.token_type)
    }
}

/// Guess the backend type from a URL.
///
/// Anything that is not an `http(s)` URL is treated as a local folder.
pub fn detect_client_type(url: &str) -> Result<&'static str> {
    let parsed = Url::parse(url).ok();
    let Some(parsed) = parsed.filter(|u| matches!(u.scheme(), "http" | "https")) else {
        return non_http_client_type(url);
    };

    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
    if host == "github.com" || host == "api.github.com" {
        Ok(GitHubClient::TYPE)
    } else if host.contains("gogs") || host.contains("gitea") {
        Ok(GogsClient::TYPE)
    } else {
        Ok(GitLabClient::TYPE)
    }
}

#[cfg(feature = "local")]
fn non_http_client_type(_url: &str) -> Result<&'static str> {
    Ok(LocalClient::TYPE)
}

#[cfg(not(feature = "local"))]
fn non_http_client_type(url: &str) -> Result<&'static str> {
    let scheme = Url::parse(url)
        .map(|u| u.scheme().to_string())
        .unwrap_or_else(|_| "file".to_string());
    Err(ClientError::ProtocolNotSupported {
        scheme,
        url: url.to_string(),
    })
}

/// Folder designated by a local URL (`file://` or a plain path).
#[cfg(feature = "local")]
fn local_root(url: &str) -> PathBuf {
    Url::parse(url)
        .ok()
        .filter(|u| u.scheme() == "file")
        .and_then(|u| u.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(url))
}

/// Builds clients from [`ClientOptions`].
#[derive(Clone)]
pub struct ClientFactory {
    registry: ClientRegistry,
}

impl ClientFactory {
    /// Factory over [`ClientRegistry::with_defaults`].
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(ClientRegistry::with_defaults()?))
    }

    pub fn with_registry(registry: ClientRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    pub fn has_type(&self, client_type: &str) -> bool {
        self.registry.has_type(client_type)
    }

    pub fn types(&self) -> Vec<&'static str> {
        self.registry.types()
    }

    /// Build a client talking to the real service.
    pub fn create_client(&self, options: &ClientOptions) -> Result<Arc<dyn GitClient>> {
        self.create(options, None)
    }

    /// Build a client on top of a caller-supplied transport.
    pub fn create_client_with_transport(
        &self,
        options: &ClientOptions,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Arc<dyn GitClient>> {
        self.create(options, Some(transport))
    }

    fn resolve_type(&self, options: &ClientOptions) -> Result<String> {
        if let Some(client_type) = options.client_type() {
            return Ok(client_type.to_string());
        }
        let detected = detect_client_type(&options.url)?;
        tracing::debug!("Client type detected for '{}' : {}", options.url, detected);
        Ok(detected.to_string())
    }

    fn create(
        &self,
        options: &ClientOptions,
        transport: Option<Arc<dyn HttpTransport>>,
    ) -> Result<Arc<dyn GitClient>> {
        let client_type = self.resolve_type(options)?;
        let descriptor = *self
            .registry
            .get(&client_type)
            .ok_or_else(|| ClientError::ClientNotFound {
                client_type: client_type.clone(),
                known_types: self.types().into_iter().map(String::from).collect(),
            })?;

        match descriptor.builder {
            #[cfg(feature = "local")]
            Builder::Local => Ok(Arc::new(LocalClient::new(local_root(&options.url)))),
            Builder::Remote(build) => {
                let base_url = if descriptor.client_type == GitHubClient::TYPE {
                    GITHUB_API_URL
                } else {
                    options.url.as_str()
                };
                let transport = match transport {
                    Some(transport) => transport,
                    None => Arc::new(ReqwestTransport::with_options(
                        DEFAULT_TIMEOUT,
                        options.unsafe_ssl,
                    )?),
                };

                let mut headers: HttpHeaders =
                    vec![("Accept".to_string(), "application/json".to_string())];
                headers.extend(token::create_http_headers(
                    descriptor.token_type,
                    options.token(),
                ));
                Ok(build(ApiClient::new(base_url, headers, transport)))
            }
        }
    }
}
