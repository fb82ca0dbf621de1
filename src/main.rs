//! CLI entry point for hotkey-remapper
//!
//! Provides command-line interface for checking conflicts, listing
//! shortcuts, converting between manifest text and JSON, and editing a
//! single slot.

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::*;
use hotkey_remapper::config::{self, validate_hotkey_file, ManifestStore};
use hotkey_remapper::core::codec::{encode, import_manifest_with_diagnostics, Diagnostic};
use hotkey_remapper::core::grammar::canonicalize;
use hotkey_remapper::core::types::CommandRef;
use hotkey_remapper::editor::{Assignment, ConflictPolicy, Controller, SlotRef};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotkey-remapper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a manifest for shortcut conflicts
    Check {
        /// Path to the hotkeys manifest
        manifest: PathBuf,
    },

    /// List all shortcuts
    List {
        /// Path to the hotkeys manifest
        manifest: PathBuf,

        /// Only list this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Print the canonical form of shortcut tokens
    Canon {
        /// Tokens such as "Shift + Ctrl + A" or "alt + '+'"
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Convert a manifest to structured JSON
    Import {
        /// Path to the hotkeys manifest
        manifest: PathBuf,

        /// JSON file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert structured JSON back to a manifest
    Export {
        /// JSON file to read
        json: PathBuf,

        /// Manifest file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Assign a shortcut to one slot and save (with backup)
    Bind(BindArgs),
}

#[derive(Args)]
struct BindArgs {
    /// Path to the hotkeys manifest
    manifest: PathBuf,

    #[arg(long)]
    category: String,

    #[arg(long)]
    command: String,

    /// Slot index within the command
    #[arg(long, default_value_t = 0)]
    slot: usize,

    /// New shortcut; an empty string deletes the slot
    shortcut: String,

    /// Remove the shortcut from commands already using it
    #[arg(long, conflicts_with = "keep_conflicts")]
    strip_conflicts: bool,

    /// Assign even if other commands already use the shortcut
    #[arg(long)]
    keep_conflicts: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Check { manifest } => check_conflicts(&expand(&manifest)?)?,
        Commands::List { manifest, category } => list_shortcuts(&expand(&manifest)?, category.as_deref())?,
        Commands::Canon { tokens } => canonicalize_tokens(&tokens),
        Commands::Import { manifest, output } => import_to_json(&expand(&manifest)?, &expand(&output)?)?,
        Commands::Export { json, output } => export_to_text(&expand(&json)?, &expand(&output)?)?,
        Commands::Bind(args) => bind_shortcut(args)?,
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flag.
fn setup_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "hotkey_remapper=debug,info",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Expand tilde in path
fn expand(path: &Path) -> anyhow::Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?;
    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

/// Gate, read and import a manifest file
fn load_manifest_file(path: &Path) -> anyhow::Result<Controller> {
    validate_hotkey_file(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let controller = Controller::new();
    let diagnostics = controller.import_text(&text)?;
    print_diagnostics(&diagnostics);

    Ok(controller)
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!(
            "{} {} dropped: {}",
            "⚠".yellow(),
            diagnostic.command.to_string().cyan(),
            diagnostic.error
        );
    }
}

/// Check manifest for shortcut conflicts
fn check_conflicts(path: &Path) -> anyhow::Result<()> {
    println!("{} Parsing manifest: {}", "→".cyan(), path.display());

    let controller = load_manifest_file(path)?;
    println!(
        "{} Found {} shortcuts in {} categories\n",
        "✓".green(),
        controller.shortcut_count(),
        controller.categories().len()
    );

    let conflicts = controller.conflict_groups();

    if conflicts.is_empty() {
        println!("{} {}", "✓".green().bold(), "No conflicts detected!".bold());
    } else {
        println!(
            "{} Found {} conflict{}:\n",
            "✗".red().bold(),
            conflicts.len(),
            if conflicts.len() == 1 { "" } else { "s" }
        );

        for (i, conflict) in conflicts.iter().enumerate() {
            println!(
                "{} {}",
                format!("Conflict {}", i + 1).yellow().bold(),
                conflict.shortcut.cyan()
            );

            for (idx, owner) in conflict.owners.iter().enumerate() {
                println!(
                    "  {} {} → {}",
                    format!("{}.", idx + 1).dimmed(),
                    owner.category_id.magenta(),
                    owner.command_id
                );
            }
            println!();
        }

        println!("{}", "⚠ These shortcuts trigger more than one command!".yellow());
        std::process::exit(1);
    }

    Ok(())
}

/// List all shortcuts in the manifest
fn list_shortcuts(path: &Path, only: Option<&str>) -> anyhow::Result<()> {
    let controller = load_manifest_file(path)?;
    println!("{}", format!("Shortcuts from: {}\n", path.display()).bold());

    let categories: Vec<String> = controller
        .categories()
        .into_iter()
        .filter(|c| only.is_none_or(|wanted| wanted == c))
        .collect();
    if categories.is_empty() {
        anyhow::bail!("Category not found: {}", only.unwrap_or_default());
    }

    for category in categories {
        println!("{}", format!("--- {} ---", category).magenta().bold());

        for row in controller.rows(&category) {
            let name = if row.first_of_command {
                row.slot.command.command_id.green()
            } else {
                " ".repeat(row.slot.command.command_id.len()).normal()
            };

            let shortcut = match (row.shortcut.is_empty(), row.conflicting) {
                (true, _) => "(unassigned)".dimmed(),
                (false, true) => format!("{} ⚠", row.shortcut).red().bold(),
                (false, false) => row.shortcut.cyan().bold(),
            };

            println!("  {} → {}", name, shortcut);
        }
        println!();
    }

    println!(
        "{} Total: {} shortcuts, {} conflicts",
        "✓".green(),
        controller.shortcut_count(),
        controller.conflict_count()
    );

    Ok(())
}

/// Print canonical forms; exits with 1 if any token is invalid
fn canonicalize_tokens(tokens: &[String]) {
    let mut failed = false;

    for token in tokens {
        match canonicalize(token) {
            Ok(canonical) => println!("{} {} → {}", "✓".green(), token, canonical.cyan().bold()),
            Err(e) => {
                failed = true;
                println!("{} {}", "✗".red(), e);
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Manifest text → structured JSON
fn import_to_json(path: &Path, output: &Path) -> anyhow::Result<()> {
    validate_hotkey_file(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let (manifest, diagnostics) = import_manifest_with_diagnostics(&text)?;
    print_diagnostics(&diagnostics);

    config::save_structured(output, &manifest)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Wrote {} commands to {}",
        "✓".green(),
        manifest.command_count(),
        output.display()
    );
    Ok(())
}

/// Structured JSON → manifest text
fn export_to_text(json: &Path, output: &Path) -> anyhow::Result<()> {
    let manifest = config::load_structured(json)
        .with_context(|| format!("Failed to read {}", json.display()))?;

    config::write_atomic(output, &encode(&manifest))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Wrote {} categories to {}",
        "✓".green(),
        manifest.categories().len(),
        output.display()
    );
    Ok(())
}

/// Assign one slot through the edit controller and save with a backup
fn bind_shortcut(args: BindArgs) -> anyhow::Result<()> {
    let path = expand(&args.manifest)?;
    let store = ManifestStore::new(path)?;

    let (manifest, diagnostics) = store.load_with_diagnostics()?;
    print_diagnostics(&diagnostics);
    let controller = Controller::with_manifest(manifest);

    let policy = if args.strip_conflicts {
        ConflictPolicy::StripOthers
    } else if args.keep_conflicts {
        ConflictPolicy::Keep
    } else {
        ConflictPolicy::Ask
    };

    let slot = SlotRef::new(args.category, args.command, args.slot);
    match controller.assign(&slot, &args.shortcut, policy)? {
        Assignment::Conflicts(others) => {
            println!(
                "{} {} is already used by:",
                "✗".red().bold(),
                args.shortcut.cyan()
            );
            for CommandRef {
                category_id,
                command_id,
            } in others
            {
                println!("  {} → {}", category_id.magenta(), command_id);
            }
            println!("\nRe-run with --strip-conflicts or --keep-conflicts.");
            std::process::exit(1);
        }
        Assignment::Unchanged => {
            println!("{} {} already holds that shortcut", "✓".green(), slot.command);
            return Ok(());
        }
        Assignment::Deleted => {
            println!("{} Deleted slot {} of {}", "✓".green(), slot.index, slot.command);
        }
        Assignment::Assigned { shortcut, stripped } => {
            println!("{} {} → {}", "✓".green(), slot.command, shortcut.cyan().bold());
            for owner in stripped {
                println!("  {} removed from {}", "-".dimmed(), owner);
            }
        }
    }

    let backup = store.save(&controller.manifest())?;
    controller.mark_saved();
    println!("{} Backup: {}", "✓".green(), backup.display());

    Ok(())
}
