use crate::hook::Invocation;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "amendguard")]
#[command(
    author,
    version,
    about = "Block trivial commits and recommend `git commit --amend` instead"
)]
pub struct Cli {
    /// File holding the proposed commit message; omit to check the last commit
    pub message_file: Option<PathBuf>,

    /// Config file (default: .amendguard.toml, then ~/.config/amendguard/config.toml)
    #[arg(long, env = "AMENDGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository to inspect (default: discovered from the working directory)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Only block when the staged diff looks trivial as well
    #[arg(long, overrides_with = "no_corroborate")]
    pub corroborate: bool,

    /// Decide on the message alone, even if the config asks for corroboration
    #[arg(long, overrides_with = "corroborate")]
    pub no_corroborate: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Corroboration setting from the flags, if either was given
    pub fn corroboration_override(&self) -> Option<bool> {
        match (self.corroborate, self.no_corroborate) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn invocation(&self) -> Invocation {
        Invocation {
            message_file: self.message_file.clone(),
            repo_dir: self.repo.clone(),
            config_path: self.config.clone(),
            corroborate: self.corroboration_override(),
        }
    }
}
