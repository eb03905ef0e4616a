//! Configuration for the DR dashboard service.
//!
//! The dashboard is started either from the project root or from one of the
//! environment subdirectories (`on-prem/`, `eks/`). Data and runbook paths
//! are derived from the detected base directory unless overridden.

use clap::{Parser, ValueEnum};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Default HTTP port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Catalog filename inside an environment directory.
pub const SCENARIO_FILE: &str = "disaster_scenarios.json";

/// Runbook directory inside an environment directory.
pub const RECOVERY_DIR: &str = "recovery_processes";

/// Static UI directory under the base directory.
pub const STATIC_DIR: &str = "static";

/// Deployment variant the dashboard describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    #[value(name = "on-prem")]
    OnPrem,
    #[value(name = "eks")]
    Eks,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::OnPrem, Environment::Eks];

    /// Tag reported by the API and name of the environment directory.
    pub fn tag(self) -> &'static str {
        match self {
            Environment::OnPrem => "on-prem",
            Environment::Eks => "eks",
        }
    }

    /// Match a directory name against the known environments.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|env| env.tag() == name)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Disaster-recovery scenario dashboard
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "dr-dashboard")]
#[command(about = "Serves the disaster-recovery scenario catalog and recovery runbooks")]
#[command(version)]
pub struct Args {
    /// Deployment variant (inferred from the working directory when omitted)
    #[arg(long, env = "DR_ENVIRONMENT", value_enum)]
    pub environment: Option<Environment>,

    /// HTTP listen port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// HTTP listen address
    #[arg(long, env = "DR_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind: Option<IpAddr>,

    /// Project base directory (detected from the working directory when omitted)
    #[arg(long, env = "DR_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Scenario catalog JSON file
    #[arg(long, env = "DR_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Directory holding recovery-process markdown files
    #[arg(long, env = "DR_RECOVERY_DIR")]
    pub recovery_dir: Option<PathBuf>,

    /// Directory holding the static UI
    #[arg(long, env = "DR_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, env = "DR_LOG_JSON")]
    pub log_json: bool,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: Environment,
    pub listen_addr: SocketAddr,
    pub base_dir: PathBuf,
    pub data_file: PathBuf,
    pub recovery_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Resolve paths and environment from parsed args and the working directory.
    pub fn resolve(args: &Args, cwd: &Path) -> Self {
        let (detected_base, detected_env) = detect_base_dir(cwd);
        let base_dir = args.base_dir.clone().unwrap_or(detected_base);
        let environment = args.environment.or(detected_env).unwrap_or_default();
        let env_dir = base_dir.join(environment.tag());

        Self {
            environment,
            listen_addr: SocketAddr::new(
                args.bind.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
                args.port,
            ),
            data_file: args
                .data_file
                .clone()
                .unwrap_or_else(|| env_dir.join(SCENARIO_FILE)),
            recovery_dir: args
                .recovery_dir
                .clone()
                .unwrap_or_else(|| env_dir.join(RECOVERY_DIR)),
            static_dir: args
                .static_dir
                .clone()
                .unwrap_or_else(|| base_dir.join(STATIC_DIR)),
            base_dir,
        }
    }

    /// Location of the single-page UI shell.
    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

/// Find the project base directory from the working directory.
///
/// When `cwd` is an environment subdirectory, its parent is the base and the
/// environment is reported alongside.
pub fn detect_base_dir(cwd: &Path) -> (PathBuf, Option<Environment>) {
    let env = cwd
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(Environment::from_dir_name);

    match (env, cwd.parent()) {
        (Some(env), Some(parent)) => (parent.to_path_buf(), Some(env)),
        _ => (cwd.to_path_buf(), None),
    }
}
