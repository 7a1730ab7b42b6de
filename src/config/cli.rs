use crate::config::toml_config::HospitalConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "fatfox-hospital")]
#[command(about = "Manage the FatFox Hospital nurse registry")]
pub struct Cli {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Base URL of the hospital backend (enables the remote backend)")]
    pub base_url: Option<String>,

    #[arg(long, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List every nurse
    List,
    /// Show one nurse by id
    Show { id: i64 },
    /// Search by name, surname or username
    Search { query: String },
    /// Look a nurse up by name
    FindName { name: String },
    /// Look a nurse up by username
    FindUser { user: String },
    /// Check a username and password
    Login {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        password: Option<String>,
    },
    /// Register a new nurse
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        surname: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: Option<String>,

        #[arg(long, default_value_t = 0)]
        profile: u8,
    },
    /// Update the given fields of a nurse
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        surname: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        profile: Option<u8>,
    },
    /// Delete a nurse by id
    Delete { id: i64 },
}

impl Cli {
    /// 讀取設定檔（若有）並套用命令列覆寫
    pub fn load_config(&self) -> Result<HospitalConfig> {
        let mut config = match &self.config {
            Some(path) => HospitalConfig::from_file(path)?,
            None => HospitalConfig::default(),
        };
        config.apply_overrides(self.base_url.clone(), self.timeout, self.json_logs);
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BackendKind, ConfigProvider};

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from(["fatfox-hospital", "login", "--user", "alice.j"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Login {
                user: "alice.j".to_string(),
                password: None
            }
        );
    }

    #[test]
    fn test_parse_update_with_partial_fields() {
        let cli = Cli::try_parse_from([
            "fatfox-hospital",
            "update",
            "3",
            "--surname",
            "Smythe",
            "--profile",
            "4",
        ])
        .unwrap();

        match cli.command {
            Command::Update {
                id,
                surname,
                profile,
                name,
                ..
            } => {
                assert_eq!(id, 3);
                assert_eq!(surname.as_deref(), Some("Smythe"));
                assert_eq!(profile, Some(4));
                assert!(name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_base_url_flag_selects_remote_backend() {
        let cli = Cli::try_parse_from([
            "fatfox-hospital",
            "--base-url",
            "http://localhost:8080/",
            "--verbose",
            "list",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.backend_kind(), BackendKind::Remote);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_register_requires_email() {
        assert!(Cli::try_parse_from([
            "fatfox-hospital",
            "register",
            "--name",
            "Hana",
            "--surname",
            "Ito",
            "--username",
            "hana.i"
        ])
        .is_err());
    }
}
