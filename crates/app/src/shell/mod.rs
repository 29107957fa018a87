//! Interactive shell over a [`Filesystem`].
//!
//! A [`Session`] owns the filesystem plus the shell's notion of where it is
//! and who it is acting as. Input lines are parsed into [`ShellCommand`]s and
//! turned into [`Reply`]s; the IO loop in [`run`] is kept separate so it can
//! be driven by any async reader and writer.

mod command;

use common::fs::{join, Filesystem, FsError, JournalEntry, Permission};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub use command::{parse, ShellCommand, HELP};

pub const BANNER: &str = "jfs journaled filesystem simulator. Type 'help' for a list of commands.";
pub const CONTENT_PROMPT: &str = "New content: ";
pub const WRITE_CANCELLED: &str = "Write cancelled: no content given.";
pub const FAREWELL: &str = "Leaving the simulator...";

/// What the IO loop should do after a line has been handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    /// Nothing to print
    Silent,
    /// Ask for content on the next line, then call [`Session::write`]
    NeedContent { path: String },
    Exit,
}

#[derive(Debug)]
pub struct Session {
    fs: Filesystem,
    cwd: String,
    user: String,
}

impl Session {
    /// Start a session as `user` in `start_dir`, creating the directory if needed
    pub fn new(mut fs: Filesystem, user: impl Into<String>, start_dir: &str) -> Self {
        let cwd = join("/", start_dir);
        if !fs.directory_exists(&cwd) {
            // only fails if it already exists
            let _ = fs.create_directory(&cwd);
        }
        Self {
            fs,
            cwd,
            user: user.into(),
        }
    }

    pub fn fs(&self) -> &Filesystem {
        &self.fs
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn prompt(&self) -> String {
        format!("{}@jfs:{}$ ", self.user, self.cwd)
    }

    /// Handle one line of input
    pub fn handle(&mut self, line: &str) -> Reply {
        match parse(line) {
            Ok(command) => self.dispatch(command),
            Err(e) => Reply::Output(e.to_string()),
        }
    }

    /// Replace the content of `path` as the current user
    pub fn write(&mut self, path: &str, content: &str) -> String {
        match self.fs.write_file(path, content, &self.user) {
            Ok(()) => format!("[{}] File '{}' updated.", self.user, path),
            Err(e) => render_error(&e),
        }
    }

    fn resolve(&self, path: &str) -> String {
        join(&self.cwd, path)
    }

    fn dispatch(&mut self, command: ShellCommand) -> Reply {
        let output = match command {
            ShellCommand::Empty => return Reply::Silent,
            ShellCommand::Exit => return Reply::Exit,
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Mkdir(dir) => {
                let path = self.resolve(&dir);
                match self.fs.create_directory(&path) {
                    Ok(()) => format!("Directory '{}' created.", path),
                    Err(e) => render_error(&e),
                }
            }
            ShellCommand::Cd(target) => {
                let path = self.resolve(&target);
                if self.fs.directory_exists(&path) {
                    self.cwd = path;
                    return Reply::Silent;
                }
                format!("Directory '{}' not found.", target)
            }
            ShellCommand::Ls(target) => {
                let path = match target {
                    Some(target) => self.resolve(&target),
                    None => self.cwd.clone(),
                };
                match self.fs.list_directory(&path) {
                    Ok(listing) if listing.is_empty() => format!("Directory '{}' is empty.", path),
                    Ok(listing) => listing.to_string(),
                    Err(e) => render_error(&e),
                }
            }
            ShellCommand::Create(file) => {
                let path = self.resolve(&file);
                match self.fs.create_file(&path, Vec::new(), &self.user) {
                    Ok(()) => format!("[{}] File '{}' created.", self.user, path),
                    Err(e) => render_error(&e),
                }
            }
            ShellCommand::Read(file) => {
                let path = self.resolve(&file);
                match self.fs.read_file(&path, &self.user) {
                    Ok(content) => format!(
                        "[{}] Contents of '{}':\n{}",
                        self.user,
                        path,
                        String::from_utf8_lossy(&content)
                    ),
                    Err(e) => render_error(&e),
                }
            }
            ShellCommand::Write { path, content } => {
                let path = self.resolve(&path);
                match content {
                    Some(content) => self.write(&path, &content),
                    None => {
                        // fail fast instead of prompting for a file that isn't there
                        if self.fs.find_file(&path).is_none() {
                            return Reply::Output(render_error(&FsError::NotFound(path)));
                        }
                        return Reply::NeedContent { path };
                    }
                }
            }
            ShellCommand::Delete(file) => {
                let path = self.resolve(&file);
                match self.fs.delete_file(&path, &self.user) {
                    Ok(()) => format!("[{}] File '{}' deleted.", self.user, path),
                    Err(e) => render_error(&e),
                }
            }
            ShellCommand::Chmod { path, user, level } => {
                let path = self.resolve(&path);
                match self.chmod(&path, &user, &level) {
                    Ok(level) => format!(
                        "[{}] Permission '{}' granted to '{}' on '{}'.",
                        self.user, level, user, path
                    ),
                    Err(e) => render_error(&e),
                }
            }
            ShellCommand::Su(user) => {
                tracing::debug!("switching from {} to {}", self.user, user);
                self.user = user;
                format!("Now acting as '{}'.", self.user)
            }
            ShellCommand::Whoami => {
                let role = self.fs.policy().role_of(&self.user);
                format!("{} ({})", self.user, role)
            }
            ShellCommand::Crash => {
                let stats = self.fs.simulate_crash_and_recovery();
                if !self.fs.directory_exists(&self.cwd) {
                    self.cwd = "/".to_string();
                }
                format!("[recovery] System recovered: {}", stats)
            }
            ShellCommand::Journal => render_journal(self.fs.journal().entries()),
        };
        Reply::Output(output)
    }

    fn chmod(&mut self, path: &str, user: &str, level: &str) -> Result<Permission, FsError> {
        let level = level.parse::<Permission>()?;
        self.fs.set_file_permission(path, user, level, &self.user)?;
        Ok(level)
    }
}

fn render_error(e: &FsError) -> String {
    format!("Error: {}", e)
}

/// Journal entry as shown to a person: content decoded as text
#[derive(Serialize)]
struct JournalLine<'a> {
    seq: u64,
    action: String,
    path: &'a str,
    content: String,
    user: &'a str,
}

fn render_journal(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "Journal is empty.".to_string();
    }
    let lines: Vec<JournalLine<'_>> = entries
        .iter()
        .map(|entry| JournalLine {
            seq: entry.seq,
            action: entry.action.to_string(),
            path: &entry.path,
            content: String::from_utf8_lossy(&entry.content).into_owned(),
            user: &entry.user,
        })
        .collect();
    match serde_json::to_string_pretty(&lines) {
        Ok(json) => json,
        Err(e) => format!("Error: failed to render journal: {}", e),
    }
}

async fn emit<W>(output: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await
}

/// Drive a session from `input` until `exit` or end of input
pub async fn run<R, W>(session: &mut Session, input: R, output: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    emit(output, BANNER).await?;

    loop {
        output.write_all(session.prompt().as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session.handle(&line) {
            Reply::Output(text) => emit(output, &text).await?,
            Reply::Silent => {}
            Reply::NeedContent { path } => {
                output.write_all(CONTENT_PROMPT.as_bytes()).await?;
                output.flush().await?;

                // end of input at the prompt leaves the file alone
                let Some(content) = lines.next_line().await? else {
                    emit(output, WRITE_CANCELLED).await?;
                    break;
                };
                let text = session.write(&path, &content);
                emit(output, &text).await?;
            }
            Reply::Exit => break,
        }
    }
    output.flush().await
}
