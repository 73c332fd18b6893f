//! Lexicon settings tool: entry point.
//!
//! Inspects and edits the per-user Lexicon configuration from the command
//! line.  Every mutating command loads the configuration once, applies one
//! edit, and saves once; nothing is written if the edit is rejected.
//!
//! # Usage
//!
//! ```text
//! lexicon-settings [--config-dir DIR] [--catalog FILE] [--log-level LEVEL] <COMMAND>
//!
//! Commands:
//!   show [--json]                        Print the configuration
//!   locate                               Print the storage paths
//!   paths add|remove <PATH>              Edit dictionary search paths
//!   groups add|remove|rename|move|icon   Edit the group list
//!   dicts add|remove|set                 Edit group membership (needs --catalog)
//!   prefs set <KEY> <VALUE>              Change a preference
//!   select --main|--popup <NAME>         Remember the selected group
//!   active [--popup]                     List active dictionaries (needs --catalog)
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable          | Description                          |
//! |-------------------|--------------------------------------|
//! | `LEXICON_HOME`    | Storage root instead of the default  |
//! | `LEXICON_CATALOG` | TOML manifest of loaded dictionaries |
//! | `RUST_LOG`        | Log filter when `--log-level` is unset |

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lexicon_core::groups::icon_display_name;
use lexicon_core::{Catalog, Configuration, GroupList, PreferenceKey, Preferences, ScanPopupModifiers};
use lexicon_settings::application::manage_paths::{add_path, remove_path};
use lexicon_settings::application::session::{EditingSession, GroupContext};
use lexicon_settings::infrastructure::catalog::ManifestCatalog;
use lexicon_settings::infrastructure::storage::{ConfigRoot, ConfigStore};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Lexicon configuration editor.
#[derive(Debug, Parser)]
#[command(
    name = "lexicon-settings",
    about = "Inspect and edit the per-user Lexicon configuration",
    version
)]
struct Cli {
    /// Storage root to use instead of the per-user default.
    #[arg(long, global = true, env = "LEXICON_HOME")]
    config_dir: Option<PathBuf>,

    /// TOML manifest listing the loaded dictionaries.
    #[arg(long, global = true, env = "LEXICON_CATALOG")]
    catalog: Option<PathBuf>,

    /// Log filter (e.g. `debug`, `lexicon_core=trace`).  Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the configuration.
    Show {
        /// Print as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the configuration file, index directory and stylesheet paths.
    Locate,
    /// Edit dictionary search paths.
    Paths {
        #[command(subcommand)]
        action: PathsCommand,
    },
    /// Edit the group list.
    Groups {
        #[command(subcommand)]
        action: GroupsCommand,
    },
    /// Edit the dictionaries of a group.
    Dicts {
        #[command(subcommand)]
        action: DictsCommand,
    },
    /// Change preferences.
    Prefs {
        #[command(subcommand)]
        action: PrefsCommand,
    },
    /// Remember the group selected in the main window or the scan popup.
    Select(SelectArgs),
    /// List the dictionaries searched in the main window or the scan popup.
    Active {
        /// Use the scan popup selection instead of the main window's.
        #[arg(long)]
        popup: bool,
    },
}

#[derive(Debug, Subcommand)]
enum PathsCommand {
    /// Append a search path.
    Add { path: String },
    /// Remove every occurrence of a search path.
    Remove { path: String },
}

#[derive(Debug, Subcommand)]
enum GroupsCommand {
    /// Create an empty group.
    Add {
        name: String,
        /// Insert at this index instead of appending.
        #[arg(long)]
        at: Option<usize>,
    },
    /// Delete the group at INDEX.
    Remove { index: usize },
    /// Rename the group at INDEX.
    Rename { index: usize, name: String },
    /// Move the group at FROM so that it ends up at TO.
    Move { from: usize, to: usize },
    /// Set the icon file of the group at INDEX; an empty string clears it.
    Icon { index: usize, icon: String },
}

#[derive(Debug, Subcommand)]
enum DictsCommand {
    /// Insert a dictionary into the group at GROUP.
    Add {
        group: usize,
        id: String,
        /// Insert at this position instead of appending.
        #[arg(long)]
        at: Option<usize>,
    },
    /// Remove dictionaries from the group at GROUP.
    Remove {
        group: usize,
        position: usize,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Replace the dictionary at POSITION of the group at GROUP.
    Set { group: usize, position: usize, id: String },
}

#[derive(Debug, Subcommand)]
enum PrefsCommand {
    /// Set a preference by its document name, e.g. `enableScanPopup 1`.
    ///
    /// Flags take `0`, `1`, `true` or `false`.  `scanPopupModifiers` takes a
    /// decimal mask or a `+`-separated list of `alt`, `ctrl`, `shift`, `win`.
    Set { key: PreferenceKey, value: String },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct SelectArgs {
    /// Group name for the main window; empty clears the selection.
    #[arg(long)]
    main: Option<String>,
    /// Group name for the scan popup; empty clears the selection.
    #[arg(long)]
    popup: Option<String>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    let root = match &cli.config_dir {
        Some(dir) => ConfigRoot::new(dir),
        None => ConfigRoot::from_home().context("cannot locate the per-user storage directory")?,
    };
    let store = ConfigStore::new(root);
    debug!(root = %store.root().path().display(), "using storage root");

    run(cli.command, &store, cli.catalog.map(ManifestCatalog::new).as_ref())
}

fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(command: Command, store: &ConfigStore, catalog: Option<&ManifestCatalog>) -> anyhow::Result<()> {
    let mut config = store.load().context("failed to load configuration")?;

    match command {
        Command::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                let catalog = catalog.map(ManifestCatalog::load).transpose()?;
                print!("{}", describe(&config, catalog.as_ref()));
            }
            return Ok(());
        }
        Command::Locate => {
            println!("config      {}", store.config_file_path()?.display());
            println!("index       {}", store.index_dir()?.display());
            println!("style       {}", store.user_stylesheet_path()?.display());
            let qt_css = store.user_qt_stylesheet_path()?;
            match store.read_user_qt_stylesheet()? {
                Some(css) => println!("qt-style    {} ({} bytes)", qt_css.display(), css.len()),
                None => println!("qt-style    {} (absent)", qt_css.display()),
            }
            return Ok(());
        }
        Command::Active { popup } => {
            let session = EditingSession::open(config, require_catalog(catalog)?)?;
            let context = if popup { GroupContext::Popup } else { GroupContext::Main };
            for dictionary in session.active_dictionaries(context) {
                println!("{}\t{}", dictionary.id(), dictionary.name());
            }
            return Ok(());
        }
        Command::Dicts { action } => {
            let mut session = EditingSession::open(config, require_catalog(catalog)?)?;
            match action {
                DictsCommand::Add { group, id, at } => session.add_dictionary(group, at, &id)?,
                DictsCommand::Remove { group, position, count } => {
                    session.remove_dictionaries(group, position, count)?
                }
                DictsCommand::Set { group, position, id } => session.set_dictionary(group, position, &id)?,
            }
            config = session.commit();
        }
        Command::Paths { action } => match action {
            PathsCommand::Add { path } => add_path(&mut config, path),
            PathsCommand::Remove { path } => {
                let removed = remove_path(&mut config, &path);
                info!(%path, removed, "search path removed");
            }
        },
        Command::Groups { action } => {
            let mut groups = GroupList::new(std::mem::take(&mut config.groups));
            match action {
                GroupsCommand::Add { name, at } => groups.add_group(at.unwrap_or(groups.len()), name)?,
                GroupsCommand::Remove { index } => {
                    let removed = groups.remove_group(index)?;
                    info!(group = %removed.name, "group removed");
                }
                GroupsCommand::Rename { index, name } => groups.rename_group(index, name)?,
                GroupsCommand::Move { from, to } => groups.move_group(from, to)?,
                GroupsCommand::Icon { index, icon } => groups.set_group_icon(index, icon)?,
            }
            config.groups = groups.into_vec();
        }
        Command::Prefs { action } => match action {
            PrefsCommand::Set { key, value } => apply_preference(&mut config.preferences, key, &value)?,
        },
        Command::Select(SelectArgs { main, popup }) => {
            if let Some(name) = main {
                config.last_main_group = name;
            }
            if let Some(name) = popup {
                config.last_popup_group = name;
            }
        }
    }

    store.save(&config).context("failed to save configuration")?;
    Ok(())
}

fn require_catalog(catalog: Option<&ManifestCatalog>) -> anyhow::Result<&ManifestCatalog> {
    catalog.context("this command needs a dictionary catalog; pass --catalog or set LEXICON_CATALOG")
}

/// Applies a textual preference value.
fn apply_preference(prefs: &mut Preferences, key: PreferenceKey, value: &str) -> anyhow::Result<()> {
    if key == PreferenceKey::ScanPopupModifiers {
        prefs.scan_popup_modifiers = parse_modifiers(value)?;
        return Ok(());
    }

    let on = match value {
        "1" | "true" => true,
        "0" | "false" => false,
        other => bail!("'{other}' is not a flag value; use 0, 1, true or false"),
    };
    if let Some(flag) = prefs.flag_mut(key) {
        *flag = on;
    }
    Ok(())
}

fn parse_modifiers(value: &str) -> anyhow::Result<ScanPopupModifiers> {
    if let Ok(bits) = value.parse::<u32>() {
        return Ok(ScanPopupModifiers::from(bits));
    }

    let mut mask = ScanPopupModifiers::default();
    for name in value.split('+').map(str::trim).filter(|n| !n.is_empty()) {
        let flag = match name.to_ascii_lowercase().as_str() {
            "alt" => ScanPopupModifiers::ALT,
            "ctrl" => ScanPopupModifiers::CTRL,
            "shift" => ScanPopupModifiers::SHIFT,
            "win" => ScanPopupModifiers::WIN,
            _ => bail!("unknown modifier '{name}'; use alt, ctrl, shift or win"),
        };
        mask = mask.with(flag, true);
    }
    Ok(mask)
}

fn modifier_names(mask: ScanPopupModifiers) -> String {
    let names: Vec<&str> = [
        (mask.alt(), "alt"),
        (mask.ctrl(), "ctrl"),
        (mask.shift(), "shift"),
        (mask.win(), "win"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();

    if names.is_empty() {
        "none".to_string()
    } else {
        names.join("+")
    }
}

/// Human-readable listing of `config`.  With a catalog, dictionary ids are
/// shown with their names and ids missing from the catalog are marked.
fn describe(config: &Configuration, catalog: Option<&Catalog>) -> String {
    let mut out = String::new();

    out.push_str("paths:\n");
    for path in &config.paths {
        out.push_str(&format!("  {path}\n"));
    }

    out.push_str("groups:\n");
    for (index, group) in config.groups.iter().enumerate() {
        out.push_str(&format!(
            "  [{index}] {} (icon: {})\n",
            group.name,
            icon_display_name(&group.icon)
        ));
        for id in &group.dictionary_ids {
            let label = match catalog {
                Some(catalog) => match catalog.find(id) {
                    Some(dictionary) => format!("{id}  {}", dictionary.name()),
                    None => format!("{id}  (not loaded)"),
                },
                None => id.clone(),
            };
            out.push_str(&format!("      {label}\n"));
        }
    }

    out.push_str("preferences:\n");
    for key in PreferenceKey::ALL {
        match config.preferences.flag(key) {
            Some(on) => out.push_str(&format!("  {key} = {}\n", u8::from(on))),
            None => {
                let mask = config.preferences.scan_popup_modifiers;
                let state = if ScanPopupModifiers::effective(&config.preferences).is_some() {
                    "active"
                } else {
                    "inactive"
                };
                out.push_str(&format!("  {key} = {} ({}, {state})\n", mask.bits(), modifier_names(mask)));
            }
        }
    }

    out.push_str(&format!("lastMainGroup: {}\n", config.last_main_group));
    out.push_str(&format!("lastPopupGroup: {}\n", config.last_popup_group));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
