//! Stored dashboard session — `opsgrid login / logout / whoami`.
//!
//! Reads/writes ~/.config/opsgrid/session.json (0600 on Unix). Every
//! table command picks the stored session up to scope its output;
//! `OPSGRID_STATE_DIR` overrides the directory, mainly for tests.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use opsgrid_engine::{authenticate, LayoutConfig, Session};

use crate::exit_codes::{EXIT_AUTH_FAILED, EXIT_AUTH_STORE, EXIT_NOT_LOGGED_IN};
use crate::CliError;

/// Directory holding CLI state. `OPSGRID_STATE_DIR` wins over the
/// platform config dir.
pub(crate) fn state_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("OPSGRID_STATE_DIR") {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|c| c.join("opsgrid"))
}

fn session_path() -> Option<PathBuf> {
    state_dir().map(|d| d.join("session.json"))
}

/// Load the stored session, if any. An unreadable or malformed file
/// counts as not logged in rather than an error.
pub(crate) fn load_session() -> Option<Session> {
    let path = session_path()?;
    let contents = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn save_session(session: &Session) -> Result<(), CliError> {
    let path = session_path().ok_or_else(|| {
        store_err("could not determine a config directory for the session store")
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| store_err(format!("creating {}: {e}", parent.display())))?;
    }

    let contents = serde_json::to_string_pretty(session)
        .map_err(|e| store_err(format!("serializing session: {e}")))?;
    std::fs::write(&path, &contents)
        .map_err(|e| store_err(format!("writing {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| store_err(format!("setting permissions on {}: {e}", path.display())))?;
    }

    Ok(())
}

fn delete_session() -> Result<bool, CliError> {
    let Some(path) = session_path() else {
        return Ok(false);
    };
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&path)
        .map_err(|e| store_err(format!("deleting {}: {e}", path.display())))?;
    Ok(true)
}

fn store_err(msg: impl Into<String>) -> CliError {
    CliError {
        code: EXIT_AUTH_STORE,
        message: msg.into(),
        hint: None,
    }
}

// ── Commands ────────────────────────────────────────────────────────

pub(crate) fn cmd_login(
    config: &LayoutConfig,
    username: &str,
    password: Option<String>,
    quiet: bool,
) -> Result<(), CliError> {
    let password = match password {
        Some(p) => p,
        None => read_password(username, quiet)?,
    };

    let Some(session) = authenticate(&config.users, username, &password) else {
        // One message for both unknown user and wrong password.
        return Err(CliError {
            code: EXIT_AUTH_FAILED,
            message: "invalid username or password".into(),
            hint: None,
        });
    };

    save_session(&session)?;
    if !quiet {
        eprintln!(
            "logged in as {} — {} ({})",
            session.username, session.display_name, session.role
        );
    }
    Ok(())
}

/// Read the password from stdin. The prompt goes to stderr and only
/// when stdin is a TTY, so `echo pw | opsgrid login u` stays clean.
fn read_password(username: &str, quiet: bool) -> Result<String, CliError> {
    if !quiet && atty::is(atty::Stream::Stdin) {
        eprint!("password for {username}: ");
        io::stderr().flush().ok();
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::io(format!("reading password: {e}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn cmd_logout(quiet: bool) -> Result<(), CliError> {
    let removed = delete_session()?;
    if !quiet {
        if removed {
            eprintln!("logged out");
        } else {
            eprintln!("no stored session");
        }
    }
    Ok(())
}

pub(crate) fn cmd_whoami(json: bool) -> Result<(), CliError> {
    let Some(session) = load_session() else {
        return Err(CliError {
            code: EXIT_NOT_LOGGED_IN,
            message: "not logged in".into(),
            hint: Some("run: opsgrid login <username>".into()),
        });
    };

    if json {
        let rendered = serde_json::to_string_pretty(&session)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{rendered}");
    } else {
        println!(
            "{} — {} ({})",
            session.username, session.display_name, session.role
        );
    }
    Ok(())
}
