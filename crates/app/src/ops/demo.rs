use std::fmt::Display;

use clap::Args;
use common::fs::{AccessPolicy, Filesystem, FsError, Permission};

const PROJECTS: &str = "/root/projetos";
const PROJETO1: &str = "/root/projetos/projeto1.txt";
const PROJETO2: &str = "/root/projetos/projeto2.txt";
const JOAO: &str = "joao";
const MARIA: &str = "maria";

#[derive(Args, Debug, Clone)]
pub struct Demo;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// A step the scenario depends on did not succeed
    #[error("demo setup failed: {0}")]
    Setup(#[from] FsError),
}

#[async_trait::async_trait]
impl crate::op::Op for Demo {
    type Error = DemoError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = &ctx.state.config;
        let transcript = run_scenario(config.policy(), config.primary_admin())?;
        Ok(transcript.join("\n"))
    }
}

/// Render the outcome of one step as a single line
fn outcome<T: Display>(step: &str, result: Result<T, FsError>) -> String {
    match result {
        Ok(value) => format!("{}: {}", step, value),
        Err(e) => format!("{}: refused ({})", step, e),
    }
}

fn read(fs: &Filesystem, path: &str, user: &str) -> String {
    let step = format!("[{}] read {}", user, path);
    let result = fs.read_file(path, user).map(|content| quoted(&content));
    outcome(&step, result)
}

fn quoted(content: &[u8]) -> String {
    format!("\"{}\"", String::from_utf8_lossy(content))
}

fn done(result: Result<(), FsError>) -> Result<&'static str, FsError> {
    result.map(|()| "ok")
}

/// Run the reference project scenario and return one line per step.
///
/// Setup steps (directory, files, grants) must succeed; everything after
/// that is reported whatever the outcome.
pub fn run_scenario(policy: AccessPolicy, admin: &str) -> Result<Vec<String>, DemoError> {
    let mut fs = Filesystem::with_policy(policy);
    let mut lines = Vec::new();

    fs.create_directory(PROJECTS)?;
    lines.push(format!("[{}] created directory {}", admin, PROJECTS));
    fs.create_file(PROJETO1, "documentação inicial", admin)?;
    lines.push(format!("[{}] created {}", admin, PROJETO1));
    fs.create_file(PROJETO2, "progresso", admin)?;
    lines.push(format!("[{}] created {}", admin, PROJETO2));

    fs.set_file_permission(PROJETO1, JOAO, Permission::ReadWrite, admin)?;
    lines.push(format!(
        "[{}] granted rw to {} on {}",
        admin, JOAO, PROJETO1
    ));
    fs.set_file_permission(PROJETO2, MARIA, Permission::Read, admin)?;
    lines.push(format!(
        "[{}] granted r to {} on {}",
        admin, MARIA, PROJETO2
    ));

    lines.push(read(&fs, PROJETO1, JOAO));
    lines.push(outcome(
        &format!("[{}] write {}", JOAO, PROJETO1),
        done(fs.write_file(PROJETO1, "documentação atualizada", JOAO)),
    ));

    lines.push(read(&fs, PROJETO2, MARIA));
    lines.push(outcome(
        &format!("[{}] write {}", MARIA, PROJETO2),
        done(fs.write_file(PROJETO2, "tentativa de edição", MARIA)),
    ));

    lines.push(outcome(
        &format!("[{}] delete {}", JOAO, PROJETO2),
        done(fs.delete_file(PROJETO2, JOAO)),
    ));
    lines.push(outcome(
        &format!("[{}] delete {}", admin, PROJETO2),
        done(fs.delete_file(PROJETO2, admin)),
    ));

    let stats = fs.simulate_crash_and_recovery();
    lines.push(format!("[recovery] crash simulated, {}", stats));

    lines.push(read(&fs, PROJETO1, JOAO));
    lines.push(read(&fs, PROJETO1, admin));
    lines.push(read(&fs, PROJETO2, MARIA));

    Ok(lines)
}
