use anyhow::{Context, Result, anyhow};
use kube::api::{DynamicObject, ListParams, ObjectList};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::discovery::{self, ApiCapabilities, ApiResource, Scope};
use kube::{Api, Client, Config};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::resources::ResourceTarget;

/// Timeout for connecting to K8s API
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for reading K8s API responses
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum retry attempts for transient failures
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (doubles each retry)
const RETRY_BASE_DELAY: Duration = Duration::from_millis(100);

/// Page size for paginated list requests
const PAGE_SIZE: u32 = 500;

/// A listed resource kind together with the objects found
#[derive(Debug, Clone)]
pub struct ResourceSnapshot {
    pub api_resource: ApiResource,
    pub namespaced: bool,
    pub items: Vec<DynamicObject>,
}

/// Client bound to a single kubeconfig context
pub struct ClusterClient {
    client: Client,
    context: String,
}

impl ClusterClient {
    /// Connect using `context`, or the kubeconfig's current context
    pub async fn connect(context: Option<&str>) -> Result<Self> {
        let kubeconfig = Kubeconfig::read().context("Failed to read kubeconfig")?;

        let context_name = context
            .map(String::from)
            .or_else(|| kubeconfig.current_context.clone())
            .ok_or_else(|| anyhow!("No context specified and no current context in kubeconfig"))?;

        if !kubeconfig.contexts.iter().any(|c| c.name == context_name) {
            return Err(anyhow!(
                "Context '{}' not found in kubeconfig",
                context_name
            ));
        }

        let mut config = Config::from_custom_kubeconfig(
            kubeconfig,
            &KubeConfigOptions {
                context: Some(context_name.clone()),
                ..Default::default()
            },
        )
        .await
        .with_context(|| format!("Failed to load kubeconfig for context '{}'", context_name))?;

        config.connect_timeout = Some(CONNECT_TIMEOUT);
        config.read_timeout = Some(READ_TIMEOUT);

        let client = Client::try_from(config)
            .with_context(|| format!("Failed to create client for context '{}'", context_name))?;

        info!(context = %context_name, "Connected to cluster");

        Ok(Self {
            client,
            context: context_name,
        })
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// List every object of `target`, across all namespaces unless `namespace` is set
    pub async fn list(
        &self,
        target: &ResourceTarget,
        namespace: Option<&str>,
    ) -> Result<ResourceSnapshot> {
        let (ar, caps) = self.resolve(target).await?;
        let namespaced = caps.scope == Scope::Namespaced;

        let (api, scope): (Api<DynamicObject>, &str) = if namespaced {
            match namespace {
                Some(ns) => (
                    Api::namespaced_with(self.client.clone(), ns, &ar),
                    "namespaced",
                ),
                None => (Api::all_with(self.client.clone(), &ar), "all-namespaces"),
            }
        } else {
            (Api::all_with(self.client.clone(), &ar), "cluster-scoped")
        };

        debug!(
            resource = %target,
            context = %self.context,
            group = %ar.group,
            version = %ar.version,
            kind = %ar.kind,
            scope = %scope,
            "Listing resources"
        );

        let list = self.list_with_retry(&api, &target.to_string()).await?;

        // List responses omit per-item apiVersion/kind
        let items = list
            .items
            .into_iter()
            .map(|mut item| {
                item.types = Some(kube::core::TypeMeta {
                    api_version: ar.api_version.clone(),
                    kind: ar.kind.clone(),
                });
                item
            })
            .collect();

        Ok(ResourceSnapshot {
            api_resource: ar,
            namespaced,
            items,
        })
    }

    /// Resolve a target to its API resource using discovery
    async fn resolve(&self, target: &ResourceTarget) -> Result<(ApiResource, ApiCapabilities)> {
        let group = discovery::group(&self.client, &target.group)
            .await
            .with_context(|| {
                format!(
                    "Failed to discover API group '{}' for '{}'",
                    target.group, target
                )
            })?;

        let version = target
            .version
            .clone()
            .unwrap_or_else(|| group.preferred_version_or_latest().to_string());

        group
            .versioned_resources(&version)
            .into_iter()
            .find(|(ar, _)| ar.plural == target.resource)
            .ok_or_else(|| {
                anyhow!(
                    "Resource '{}' not served by the cluster (version {})",
                    target,
                    version
                )
            })
    }

    /// List resources with pagination and retry logic
    /// Uses continue tokens to fetch all pages
    async fn list_with_retry(
        &self,
        api: &Api<DynamicObject>,
        resource: &str,
    ) -> Result<ObjectList<DynamicObject>> {
        let mut all_items: Vec<DynamicObject> = Vec::new();
        let mut continue_token: Option<String> = None;
        let mut page_count = 0u32;

        loop {
            let mut params = ListParams::default().limit(PAGE_SIZE);
            if let Some(ref token) = continue_token {
                params = params.continue_token(token);
            }

            let list = self.list_page_with_retry(api, &params, resource).await?;

            let items_count = list.items.len();
            all_items.extend(list.items);
            page_count += 1;

            match list.metadata.continue_ {
                Some(token) if !token.is_empty() => {
                    debug!(
                        resource = %resource,
                        context = %self.context,
                        page = page_count,
                        items_this_page = items_count,
                        total_so_far = all_items.len(),
                        "Fetched page, continuing"
                    );
                    continue_token = Some(token);
                }
                _ => break,
            }
        }

        if page_count > 1 {
            debug!(
                resource = %resource,
                context = %self.context,
                pages = page_count,
                total_items = all_items.len(),
                "Pagination complete"
            );
        }

        Ok(ObjectList {
            metadata: kube::api::ListMeta::default(),
            items: all_items,
            types: Default::default(),
        })
    }

    /// Fetch a single page with retry logic
    async fn list_page_with_retry(
        &self,
        api: &Api<DynamicObject>,
        params: &ListParams,
        resource: &str,
    ) -> Result<ObjectList<DynamicObject>> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match api.list(params).await {
                Ok(list) => return Ok(list),
                Err(e) if is_retryable_error(&e) => {
                    let delay = RETRY_BASE_DELAY * 2u32.pow(attempt);
                    warn!(
                        resource = %resource,
                        context = %self.context,
                        attempt = attempt + 1,
                        max_attempts = MAX_RETRIES,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "Retryable error, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => {
                    debug!(resource = %resource, error = %e, "Non-retryable error");
                    return Err(anyhow!("K8s API error listing '{}': {}", resource, e));
                }
            }
        }

        Err(anyhow!(
            "Listing '{}' failed after {} retries: {}",
            resource,
            MAX_RETRIES,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        ))
    }
}

/// Context names available in the local kubeconfig
pub fn list_contexts() -> Result<Vec<String>> {
    let kubeconfig = Kubeconfig::read().context("Failed to read kubeconfig")?;
    Ok(kubeconfig.contexts.into_iter().map(|c| c.name).collect())
}

/// Current context from the local kubeconfig, if any
pub fn current_context() -> Option<String> {
    Kubeconfig::read().ok().and_then(|k| k.current_context)
}

/// Transient failures: transport errors and 429/503/504 responses
fn is_retryable_error(err: &kube::Error) -> bool {
    match err {
        kube::Error::HyperError(_) => true,
        kube::Error::Api(api_err) => matches!(api_err.code, 429 | 503 | 504),
        _ => false,
    }
}
