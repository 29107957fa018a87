use clap::Args;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Identities allowed to change file permissions (repeatable)
    #[arg(long = "admin", default_value = common::fs::DEFAULT_ADMIN)]
    pub admins: Vec<String>,

    /// Identity the shell starts as (defaults to the first admin)
    #[arg(long)]
    pub default_user: Option<String>,

    /// Directory the shell starts in
    #[arg(long, default_value = "/root")]
    pub default_dir: String,

    /// Default log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut config = AppConfig {
            admins: self.admins.clone(),
            default_dir: self.default_dir.clone(),
            log_level: self.log_level.clone(),
            ..AppConfig::default()
        };
        config.default_user = match &self.default_user {
            Some(user) => user.clone(),
            None => config.primary_admin().to_string(),
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized jfs directory at: {}\n\
             - Config: {}\n\
             - Admins: {}\n\
             - Default user: {}\n\
             - Default directory: {}\n\
             - Log level: {}",
            state.jfs_dir.display(),
            state.config_path.display(),
            state.config.admins.join(", "),
            state.config.default_user,
            state.config.default_dir,
            state.config.log_level
        );

        Ok(output)
    }
}
