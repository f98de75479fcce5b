//! CLI surface for checklist-sync.
//!
//! Two kinds of commands:
//! - file commands (`migrate`, `merge`, `gc`) run the pure operations over
//!   snapshot JSON files and print the result
//! - session commands (`toggle`, `set`, `show`, `stats`, `sync`, `reset`)
//!   act on the configured local and remote stores

use std::ffi::OsString;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand, builder::BoolishValueParser};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::Config;
use crate::core::{Category, RawSnapshot, ReferenceData, Snapshot, Status, WallClock};
use crate::store::{DirRemoteStore, FileBlobStore, LocalSnapshots, UserId};
use crate::sync::Session;
use crate::{Error, Result};

mod commands;
mod render;

// =============================================================================
// Entry + global options
// =============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "cks",
    version,
    about = "Travel checklist selections: migrate, merge, and sync",
    infer_subcommands = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Machine-readable JSON output.
    #[arg(
        long,
        global = true,
        default_value_t = false,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub json: bool,

    /// Extra config file layered over the user config.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// User whose snapshot to act on (overrides config and CKS_USER).
    #[arg(long, global = true, value_name = "USER")]
    pub user: Option<String>,

    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upgrade a snapshot file to the current category layout.
    Migrate(commands::migrate::MigrateArgs),

    /// Merge two snapshot files (last writer wins).
    Merge(commands::merge::MergeArgs),

    /// Drop expired tombstones from a snapshot file.
    #[command(alias = "collect")]
    Gc(commands::gc::GcArgs),

    /// Cycle a place: unvisited -> visited -> bucket list -> unvisited.
    Toggle(commands::mark::ToggleArgs),

    /// Set a place's status directly.
    Set(commands::mark::SetArgs),

    /// Show the current selections.
    #[command(alias = "ls")]
    Show(commands::show::ShowArgs),

    /// Per-category progress.
    Stats,

    /// Fetch, merge, and push the user's snapshot.
    Sync,

    /// Delete local and remote selections for the user.
    Reset(commands::reset::ResetArgs),
}

// =============================================================================
// Public API
// =============================================================================

/// Parse CLI from raw args, normalizing `--flag_name` spellings.
pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let raw: Vec<OsString> = args.into_iter().map(|t| t.into()).collect();
    Cli::parse_from(normalize_args(raw))
}

/// Run the CLI (used by bin).
pub fn run(cli: Cli, config: Config) -> Result<()> {
    let ctx = Ctx {
        json: cli.json,
        user: cli.user,
        config,
    };

    match cli.command {
        Commands::Migrate(args) => commands::migrate::handle(&ctx, args),
        Commands::Merge(args) => commands::merge::handle(&ctx, args),
        Commands::Gc(args) => commands::gc::handle(&ctx, args),
        Commands::Toggle(args) => commands::mark::handle_toggle(&ctx, args),
        Commands::Set(args) => commands::mark::handle_set(&ctx, args),
        Commands::Show(args) => commands::show::handle(&ctx, args),
        Commands::Stats => commands::stats::handle(&ctx),
        Commands::Sync => commands::sync::handle(&ctx),
        Commands::Reset(args) => commands::reset::handle(&ctx, args),
    }
}

// =============================================================================
// Context + helpers
// =============================================================================

struct Ctx {
    json: bool,
    user: Option<String>,
    config: Config,
}

impl Ctx {
    fn user_id(&self) -> Result<UserId> {
        match (&self.user, &self.config.user_id) {
            (Some(raw), _) => Ok(UserId::parse(raw.as_str())?),
            (None, Some(user)) => Ok(user.clone()),
            (None, None) => Err(Error::Usage(
                "no user configured; pass --user, set CKS_USER, or set user_id in config".into(),
            )),
        }
    }

    fn reference_data(&self) -> Result<ReferenceData> {
        let Some(path) = &self.config.reference_data else {
            return Ok(ReferenceData::default());
        };
        let raw = read_input(path)?;
        Ok(ReferenceData::from_json_str(&raw)?)
    }

    /// Open a session on the configured directory stores.
    fn open_session(&self) -> Result<(Session, ReferenceData)> {
        let user = self.user_id()?;
        let reference = self.reference_data()?;
        let local = LocalSnapshots::new(
            Arc::new(FileBlobStore::new(self.config.local_dir().join(user.as_str()))),
            self.config.local.blob_key.clone(),
        );
        let remote = Arc::new(DirRemoteStore::new(self.config.remote_dir()));
        let session = Session::open(user, local, remote, Arc::new(reference.parent_table()))
            .with_retention(self.config.retention());
        Ok((session, reference))
    }
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String> {
    let display = path.display().to_string();
    if display == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|source| Error::Io {
                path: display,
                source,
            })?;
        return Ok(raw);
    }
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: display,
        source,
    })
}

fn read_raw_snapshot(path: &Path) -> Result<RawSnapshot> {
    let raw = read_input(path)?;
    RawSnapshot::from_json_str(&raw).map_err(|source| Error::Json {
        path: path.display().to_string(),
        source,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).map_err(|source| Error::Json {
        path: "<stdout>".into(),
        source,
    })?;
    print_line(&s)
}

fn print_snapshot(snapshot: &Snapshot) -> Result<()> {
    print_json(snapshot)
}

fn print_line(s: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{s}").map_err(|source| Error::Io {
        path: "<stdout>".into(),
        source,
    })
}

/// Accepts epoch milliseconds or an RFC 3339 timestamp.
fn parse_now(raw: &str) -> std::result::Result<WallClock, String> {
    let raw = raw.trim();
    if let Ok(ms) = raw.parse::<u64>() {
        return Ok(WallClock(ms));
    }
    let at = OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|e| format!("expected epoch millis or RFC 3339 time: {e}"))?;
    let ms = at.unix_timestamp_nanos() / 1_000_000;
    u64::try_from(ms).map(WallClock).map_err(|_| "time is before 1970".to_string())
}

fn parse_category(raw: &str) -> std::result::Result<Category, String> {
    Category::parse(raw).map_err(|e| e.to_string())
}

/// Target of `set`; `None` clears the mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StatusArg(pub(crate) Option<Status>);

/// `none`, `unvisited`, and `clear` all clear the mark.
fn parse_status_arg(raw: &str) -> std::result::Result<StatusArg, String> {
    let s = raw.trim().to_lowercase();
    if s == "clear" {
        return Ok(StatusArg(None));
    }
    match Status::parse(&s).or_else(|| Status::parse(raw)) {
        Some(Status::Unvisited) => Ok(StatusArg(None)),
        Some(status) => Ok(StatusArg(Some(status))),
        None => Err(format!(
            "unknown status `{raw}`; expected visited, bucketList, or none"
        )),
    }
}

fn normalize_args(mut raw: Vec<OsString>) -> Vec<OsString> {
    if raw.is_empty() {
        return raw;
    }

    let mut out = Vec::with_capacity(raw.len());
    out.push(raw.remove(0)); // program name

    for arg in raw {
        let s = arg.to_string_lossy();
        if s.starts_with("--") {
            let mut pieces = s.splitn(2, '=');
            let flag = pieces.next().unwrap_or("");
            let val = pieces.next();
            let canon = flag.to_lowercase().replace('_', "-");
            if let Some(v) = val {
                out.push(OsString::from(format!("{canon}={v}")));
            } else {
                out.push(OsString::from(canon));
            }
        } else {
            out.push(arg);
        }
    }
    out
}
