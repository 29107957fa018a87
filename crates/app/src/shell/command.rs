//! Parsing of shell input lines

/// A single parsed shell command. Paths are kept as typed; the session
/// joins them against its current directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Blank line
    Empty,
    Help,
    Exit,
    Mkdir(String),
    Cd(String),
    Ls(Option<String>),
    Create(String),
    Read(String),
    /// `None` content means the user should be prompted for it
    Write {
        path: String,
        content: Option<String>,
    },
    Delete(String),
    Chmod {
        path: String,
        user: String,
        level: String,
    },
    Su(String),
    Whoami,
    Crash,
    Journal,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Unknown command: {0}. Type 'help' for help.")]
    Unknown(String),
}

pub const HELP: &str = "Available commands:
mkdir <dir>                   - Create a directory (relative to the current one)
cd <path>                     - Change to another directory
ls [path]                     - List files and directories
create <file>                 - Create an empty file
read <file>                   - Show a file's content
write <file> [content...]     - Replace a file's content (prompts if omitted)
delete <file>                 - Delete a file
chmod <file> <user> <perm>    - Set a user's permission (rw, r, w, none)
su <user>                     - Act as another user
whoami                        - Show the current user
crash                         - Simulate a crash and recover from the journal
journal                       - Print the journal
help                          - Show this help
exit                          - Leave the simulator";

/// Parse a raw input line
pub fn parse(line: &str) -> Result<ShellCommand, ParseError> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(ShellCommand::Empty);
    };
    let args: Vec<&str> = parts.collect();

    let command = command.to_lowercase();
    let parsed = match (command.as_str(), args.as_slice()) {
        ("help", []) => ShellCommand::Help,
        ("exit", []) => ShellCommand::Exit,
        ("mkdir", [dir]) => ShellCommand::Mkdir(dir.to_string()),
        ("mkdir", _) => return Err(ParseError::Usage("mkdir <dir>")),
        ("cd", [path]) => ShellCommand::Cd(path.to_string()),
        ("cd", _) => return Err(ParseError::Usage("cd <path>")),
        ("ls", []) => ShellCommand::Ls(None),
        ("ls", [path]) => ShellCommand::Ls(Some(path.to_string())),
        ("ls", _) => return Err(ParseError::Usage("ls [path]")),
        ("create", [file]) => ShellCommand::Create(file.to_string()),
        ("create", _) => return Err(ParseError::Usage("create <file>")),
        ("read", [file]) => ShellCommand::Read(file.to_string()),
        ("read", _) => return Err(ParseError::Usage("read <file>")),
        ("write", [file]) => ShellCommand::Write {
            path: file.to_string(),
            content: None,
        },
        ("write", [file, ..]) => ShellCommand::Write {
            path: file.to_string(),
            content: Some(remainder(line, 2).to_string()),
        },
        ("write", _) => return Err(ParseError::Usage("write <file> [content...]")),
        ("delete", [file]) => ShellCommand::Delete(file.to_string()),
        ("delete", _) => return Err(ParseError::Usage("delete <file>")),
        ("chmod", [file, user, level]) => ShellCommand::Chmod {
            path: file.to_string(),
            user: user.to_string(),
            level: level.to_string(),
        },
        ("chmod", _) => return Err(ParseError::Usage("chmod <file> <user> <perm>")),
        ("su", [user]) => ShellCommand::Su(user.to_string()),
        ("su", _) => return Err(ParseError::Usage("su <user>")),
        ("whoami", []) => ShellCommand::Whoami,
        ("crash", []) => ShellCommand::Crash,
        ("journal", []) => ShellCommand::Journal,
        _ => return Err(ParseError::Unknown(command)),
    };
    Ok(parsed)
}

/// The raw text of `line` after its first `skip` words, inner spacing intact
fn remainder(line: &str, skip: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..skip {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse(""), Ok(ShellCommand::Empty));
        assert_eq!(parse("   "), Ok(ShellCommand::Empty));
        assert_eq!(parse("help"), Ok(ShellCommand::Help));
        assert_eq!(parse("EXIT"), Ok(ShellCommand::Exit));
        assert_eq!(parse("ls"), Ok(ShellCommand::Ls(None)));
        assert_eq!(parse("ls /a"), Ok(ShellCommand::Ls(Some("/a".to_string()))));
        assert_eq!(
            parse("  mkdir   docs "),
            Ok(ShellCommand::Mkdir("docs".to_string()))
        );
    }

    #[test]
    fn test_parse_write() {
        assert_eq!(
            parse("write notes.txt"),
            Ok(ShellCommand::Write {
                path: "notes.txt".to_string(),
                content: None,
            })
        );
        assert_eq!(
            parse("write notes.txt hello   world"),
            Ok(ShellCommand::Write {
                path: "notes.txt".to_string(),
                content: Some("hello   world".to_string()),
            })
        );
        assert_eq!(
            parse("  write\tnotes.txt   \t a\tb  "),
            Ok(ShellCommand::Write {
                path: "notes.txt".to_string(),
                content: Some("a\tb  ".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_chmod() {
        assert_eq!(
            parse("chmod a.txt joao rw"),
            Ok(ShellCommand::Chmod {
                path: "a.txt".to_string(),
                user: "joao".to_string(),
                level: "rw".to_string(),
            })
        );
        assert_eq!(
            parse("chmod a.txt joao"),
            Err(ParseError::Usage("chmod <file> <user> <perm>"))
        );
    }

    #[test]
    fn test_parse_usage_errors() {
        assert_eq!(parse("mkdir"), Err(ParseError::Usage("mkdir <dir>")));
        assert_eq!(parse("cd a b"), Err(ParseError::Usage("cd <path>")));
        assert_eq!(parse("read"), Err(ParseError::Usage("read <file>")));
        assert_eq!(
            parse("write"),
            Err(ParseError::Usage("write <file> [content...]"))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("rm x"), Err(ParseError::Unknown("rm".to_string())));
        // known commands with extra arguments and no usage line
        assert_eq!(
            parse("help me"),
            Err(ParseError::Unknown("help".to_string()))
        );
    }
}
