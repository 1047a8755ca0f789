use rand::{Rng, rng};
use std::sync::OnceLock;

/// Default variable holding an explicit decimal host id.
pub const HOST_ID_VAR: &str = "SUID_HOST_ID";

/// Default variables holding a pod or host name ending in `-<ordinal>`,
/// consulted in order.
pub const POD_NAME_VARS: [&str; 2] = ["POD_NAME", "HOSTNAME"];

/// Where a resolved host id came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostSource {
    /// The explicit host id variable.
    Explicit,
    /// The numeric suffix of a pod name, as assigned to StatefulSet replicas.
    PodOrdinal,
    /// No usable variable; the id was drawn at random.
    Random,
}

/// A host id and its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedHost {
    pub id: u64,
    pub source: HostSource,
}

/// Resolves this process's host id from the environment.
///
/// Lookup order:
/// 1. the explicit variable (`SUID_HOST_ID`), parsed as a decimal integer;
/// 2. the first non-empty pod name variable (`POD_NAME`, then `HOSTNAME`),
///    whose last `-`-separated segment is parsed as a decimal integer, so
///    `api-7` gives `7`;
/// 3. a random value.
///
/// Network interfaces are never inspected. Deriving an id from a local
/// address would make the result depend on which interface enumerates first,
/// so deployments without a stable name should set the explicit variable.
///
/// The result is not reduced to any host field; generators mask it to their
/// own width. Uniqueness across hosts is only as good as the ids supplied
/// here, and a random fallback gives no guarantee at all.
///
/// # Example
/// ```
/// use suid::{HostResolver, HostSource};
///
/// let resolver = HostResolver::builder().host_var("MY_APP_HOST").build();
/// let env = |key: &str| (key == "POD_NAME").then(|| "orders-12".to_string());
/// let host = resolver.resolve_from(env);
/// assert_eq!((host.id, host.source), (12, HostSource::PodOrdinal));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostResolver {
    host_var: String,
    pod_vars: Vec<String>,
}

impl Default for HostResolver {
    fn default() -> Self {
        Self {
            host_var: HOST_ID_VAR.to_owned(),
            pod_vars: POD_NAME_VARS.iter().map(|&v| v.to_owned()).collect(),
        }
    }
}

impl HostResolver {
    #[must_use]
    pub fn builder() -> HostResolverBuilder {
        HostResolverBuilder::default()
    }

    /// Resolves the host id from the process environment.
    #[must_use]
    pub fn resolve(&self) -> u64 {
        self.resolve_from(|key| std::env::var(key).ok()).id
    }

    /// Resolves the host id, reading variables through `lookup`.
    pub fn resolve_from<F>(&self, lookup: F) -> ResolvedHost
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = lookup(self.host_var.as_str()).and_then(|v| v.trim().parse::<u64>().ok());
        if let Some(id) = explicit {
            #[cfg(feature = "tracing")]
            tracing::debug!(var = %self.host_var, id, "host id from explicit variable");
            return ResolvedHost {
                id,
                source: HostSource::Explicit,
            };
        }

        let pod_name = self
            .pod_vars
            .iter()
            .filter_map(|var| lookup(var.as_str()))
            .find(|name| !name.is_empty());
        if let Some(id) = pod_name.as_deref().and_then(pod_ordinal) {
            #[cfg(feature = "tracing")]
            tracing::debug!(pod = ?pod_name, id, "host id from pod ordinal");
            return ResolvedHost {
                id,
                source: HostSource::PodOrdinal,
            };
        }

        let id = rng().random::<u64>();
        #[cfg(feature = "tracing")]
        tracing::warn!(
            id,
            "no host id configured; using a random one, set {} to guarantee uniqueness",
            self.host_var
        );
        ResolvedHost {
            id,
            source: HostSource::Random,
        }
    }
}

/// Parses the trailing ordinal of `name-<n>`. Names without a `-` yield
/// nothing.
fn pod_ordinal(name: &str) -> Option<u64> {
    let (_, last) = name.rsplit_once('-')?;
    last.parse().ok()
}

/// Builder for [`HostResolver`] with custom variable names.
#[derive(Clone, Debug, Default)]
pub struct HostResolverBuilder {
    host_var: Option<String>,
    pod_vars: Option<Vec<String>>,
}

impl HostResolverBuilder {
    /// Sets the variable holding an explicit host id.
    #[must_use]
    pub fn host_var(mut self, name: impl Into<String>) -> Self {
        self.host_var = Some(name.into());
        self
    }

    /// Replaces the pod name variables, consulted in the given order.
    #[must_use]
    pub fn pod_vars<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pod_vars = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn build(self) -> HostResolver {
        let defaults = HostResolver::default();
        HostResolver {
            host_var: self.host_var.unwrap_or(defaults.host_var),
            pod_vars: self.pod_vars.unwrap_or(defaults.pod_vars),
        }
    }
}

/// The host id of this process, resolved with the default
/// [`HostResolver`] on first use and cached for the process lifetime.
pub fn process_host_id() -> u64 {
    static HOST_ID: OnceLock<u64> = OnceLock::new();
    *HOST_ID.get_or_init(|| HostResolver::default().resolve())
}
