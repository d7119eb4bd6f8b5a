//! Grid acquisition for the CLI: published-sheet HTTP source, source
//! selection, and the per-run snapshot cache.

use std::path::Path;
use std::thread;
use std::time::Duration;

use opsgrid_engine::config::SourceConfig;
use opsgrid_engine::Grid;
use opsgrid_io::{csv, CachedSource, FileSource, GridSource, SourceError};

use crate::CliError;

const MAX_RETRIES: u32 = 3;
const USER_AGENT: &str = concat!("opsgrid/", env!("CARGO_PKG_VERSION"));

// ── HTTP source ─────────────────────────────────────────────────────

/// Published-sheet CSV endpoint.
///
/// Transient failures (network errors, 5xx, 429) retry with
/// exponential backoff; anything else fails immediately. Connectivity
/// is the one error class this tool always surfaces, so the final
/// error keeps the last failure text.
pub(crate) struct HttpSource {
    url: String,
    delimiter: Option<u8>,
    quiet: bool,
    client: reqwest::blocking::Client,
}

enum Attempt {
    Done(Grid),
    Fatal(SourceError),
    Retry(String),
}

impl HttpSource {
    pub(crate) fn new(url: impl Into<String>, delimiter: Option<u8>, quiet: bool) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            url: url.into(),
            delimiter,
            quiet,
            client,
        }
    }

    fn attempt(&self) -> Attempt {
        let resp = match self.client.get(&self.url).send() {
            Ok(resp) => resp,
            Err(e) => return Attempt::Retry(e.to_string()),
        };

        let status = resp.status();
        if status.is_server_error() || status.as_u16() == 429 {
            return Attempt::Retry(format!("status {status}"));
        }
        if !status.is_success() {
            return Attempt::Fatal(SourceError::Http(format!(
                "status {status} from {}",
                self.url
            )));
        }

        let body = match resp.text() {
            Ok(body) => body,
            Err(e) => return Attempt::Fatal(SourceError::Http(format!("reading body: {e}"))),
        };
        let delimiter = self
            .delimiter
            .unwrap_or_else(|| csv::sniff_delimiter(&body));
        match csv::grid_from_str(&body, delimiter) {
            Ok(grid) => Attempt::Done(grid),
            Err(e) => Attempt::Fatal(e),
        }
    }
}

impl GridSource for HttpSource {
    fn fetch(&self) -> Result<Grid, SourceError> {
        let mut backoff_secs = 1u64;
        let mut last_failure = String::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                if !self.quiet && atty::is(atty::Stream::Stderr) {
                    eprintln!(
                        "fetch failed ({last_failure}); retry {}/{}",
                        attempt + 1,
                        MAX_RETRIES
                    );
                }
                thread::sleep(Duration::from_secs(backoff_secs));
                backoff_secs *= 2;
            }
            match self.attempt() {
                Attempt::Done(grid) => return Ok(grid),
                Attempt::Fatal(err) => return Err(err),
                Attempt::Retry(msg) => last_failure = msg,
            }
        }

        Err(SourceError::Http(format!(
            "{last_failure} after {MAX_RETRIES} attempts"
        )))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// ── Source selection ────────────────────────────────────────────────

/// Whichever source a run ends up using.
pub(crate) enum AnySource {
    File(FileSource),
    Http(HttpSource),
}

impl GridSource for AnySource {
    fn fetch(&self) -> Result<Grid, SourceError> {
        match self {
            Self::File(s) => s.fetch(),
            Self::Http(s) => s.fetch(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(s) => s.describe(),
            Self::Http(s) => s.describe(),
        }
    }
}

/// Pick the grid source for this run: explicit flags first, then the
/// layout's `[source]` block.
pub(crate) fn resolve_source(
    source: &SourceConfig,
    input: Option<&Path>,
    url: Option<&str>,
    quiet: bool,
) -> Result<CachedSource<AnySource>, CliError> {
    let delimiter = match source.delimiter {
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => {
            return Err(CliError::args(format!(
                "source.delimiter '{c}' is not an ASCII character"
            )));
        }
        None => None,
    };

    let picked = if let Some(path) = input {
        AnySource::File(file_source(path, delimiter))
    } else if let Some(url) = url {
        AnySource::Http(http_source(url, delimiter, quiet)?)
    } else if let Some(file) = &source.file {
        AnySource::File(file_source(Path::new(file), delimiter))
    } else if let Some(url) = &source.url {
        AnySource::Http(http_source(url, delimiter, quiet)?)
    } else {
        return Err(CliError::args("no grid source configured")
            .with_hint("set [source] file or url in the layout, or pass --input / --url"));
    };

    Ok(CachedSource::new(
        picked,
        Duration::from_secs(source.ttl_secs),
    ))
}

fn file_source(path: &Path, delimiter: Option<u8>) -> FileSource {
    match delimiter {
        Some(d) => FileSource::new(path).with_delimiter(d),
        None => FileSource::new(path),
    }
}

fn http_source(raw: &str, delimiter: Option<u8>, quiet: bool) -> Result<HttpSource, CliError> {
    let parsed = url::Url::parse(raw).map_err(|e| CliError::args(format!("invalid url: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(CliError::args(format!(
            "unsupported url scheme '{}'",
            parsed.scheme()
        )));
    }
    Ok(HttpSource::new(raw, delimiter, quiet))
}
