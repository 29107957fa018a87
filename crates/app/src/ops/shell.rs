use clap::Args;
use common::fs::Filesystem;
use tokio::io::BufReader;

use crate::shell::{self, Session, FAREWELL};

#[derive(Args, Debug, Clone)]
pub struct Shell {
    /// Identity to act as (defaults to the configured default user)
    #[arg(long)]
    pub user: Option<String>,

    /// Directory to start in (defaults to the configured default directory)
    #[arg(long)]
    pub dir: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("shell IO failed: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Shell {
    type Error = ShellError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = &ctx.state.config;
        let user = self.user.as_deref().unwrap_or(&config.default_user);
        let dir = self.dir.as_deref().unwrap_or(&config.default_dir);

        tracing::info!("starting shell as {} in {}", user, dir);
        let mut session = Session::new(Filesystem::with_policy(config.policy()), user, dir);

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        shell::run(&mut session, stdin, &mut stdout).await?;

        tracing::info!(
            "shell closed as {} in {} with {} journal entries",
            session.user(),
            session.cwd(),
            session.fs().journal().len()
        );
        Ok(FAREWELL.to_string())
    }
}
