use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use suid::{Group, Guid, HostResolver, HostSource, ResolvedHost, Suid};

/// Upper bound on `--count`, so a typo cannot flood the terminal.
pub const MAX_COUNT: usize = 1_000_000;

/// Command-line arguments for `suid-cli`.
///
/// Every option can also be set through the environment or a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "suid-cli",
    version,
    about = "Generate and inspect compact, sortable identifiers"
)]
pub struct CliArgs {
    /// Host id stamped into generated identifiers.
    ///
    /// Must fit the host field of the requested kind (0..=255 for SUID,
    /// 0..=127 for GUID). When unset, the ordinal suffix of `POD_NAME` or
    /// `HOSTNAME` is used, then a random value.
    ///
    /// Environment variable: `SUID_HOST_ID`
    #[arg(long, env = "SUID_HOST_ID", global = true)]
    pub host_id: Option<u64>,

    #[command(subcommand)]
    pub command: CommandArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CommandArgs {
    /// Generate new identifiers, one per line.
    New {
        /// Identifier kind.
        #[arg(long, value_enum, env = "SUID_KIND", default_value_t = Kind::Suid)]
        kind: Kind,

        /// GUID group tag (0..=7). Only valid with `--kind guid`.
        #[arg(long)]
        group: Option<u8>,

        /// Number of identifiers to print.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Print the raw integer (SUID) or hex bytes (GUID) instead of text.
        #[arg(long, default_value_t = false)]
        raw: bool,
    },

    /// Decode a 13-character SUID or 16-character GUID and print its fields.
    Inspect {
        /// The encoded identifier.
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    #[value(name = "suid")]
    Suid,
    #[value(name = "guid")]
    Guid,
}

impl Kind {
    pub const fn max_host(self) -> u64 {
        match self {
            Self::Suid => Suid::MAX_HOST,
            Self::Guid => Guid::MAX_HOST,
        }
    }
}

/// A decoded identifier of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyId {
    Suid(Suid),
    Guid(Guid),
}

impl AnyId {
    /// Decodes `text`, choosing the kind by its length.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let text = text.trim();
        match text.len() {
            13 => Ok(Self::Suid(
                text.parse().with_context(|| format!("invalid SUID {text:?}"))?,
            )),
            16 => Ok(Self::Guid(
                text.parse().with_context(|| format!("invalid GUID {text:?}"))?,
            )),
            len => bail!("expected 13 (SUID) or 16 (GUID) characters, got {len}"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    New {
        kind: Kind,
        group: Group,
        count: usize,
        raw: bool,
    },
    Inspect(AnyId),
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub host: ResolvedHost,
    pub action: Action,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        Self::from_args(args, HostResolver::default())
    }
}

impl CliConfig {
    /// Validates `args`, resolving a missing host id through `resolver`.
    pub fn from_args(args: CliArgs, resolver: HostResolver) -> anyhow::Result<Self> {
        let action = match args.command {
            CommandArgs::New {
                kind,
                group,
                count,
                raw,
            } => {
                if count == 0 {
                    bail!("--count must be greater than 0");
                }
                if count > MAX_COUNT {
                    bail!("--count ({count}) exceeds the limit of {MAX_COUNT}");
                }
                let group = match (kind, group) {
                    (_, None) => Group::DEFAULT,
                    (Kind::Guid, Some(g)) => Group::new(g)?,
                    (Kind::Suid, Some(_)) => bail!("--group is only valid with --kind guid"),
                };
                Action::New {
                    kind,
                    group,
                    count,
                    raw,
                }
            }
            CommandArgs::Inspect { text } => Action::Inspect(AnyId::parse(&text)?),
        };

        let host = match args.host_id {
            Some(id) => ResolvedHost {
                id,
                source: HostSource::Explicit,
            },
            None => {
                let resolved = resolver.resolve_from(|key| std::env::var(key).ok());
                // Only an explicit id is validated; derived ones are masked.
                let mask = match action {
                    Action::New { kind, .. } => kind.max_host(),
                    Action::Inspect(_) => u64::MAX,
                };
                ResolvedHost {
                    id: resolved.id & mask,
                    ..resolved
                }
            }
        };

        if let Action::New { kind, .. } = action {
            if host.id > kind.max_host() {
                bail!(
                    "host id {} exceeds the {:?} host field (max = {})",
                    host.id,
                    kind,
                    kind.max_host()
                );
            }
        }

        Ok(Self { host, action })
    }
}
