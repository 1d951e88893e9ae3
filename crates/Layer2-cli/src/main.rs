//! Playfield CLI - Main entry point

mod script;

use anyhow::Context;
use clap::{Parser, Subcommand};
use playfield_foundation::{
    init_main_window, kinds, JsonStore, PlayfieldConfig, PLAYFIELD_CONFIG_FILE,
};
use script::{Replay, Script};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Playfield - replay input bindings and events against the main window
#[derive(Parser, Debug)]
#[command(name = "playfield")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Config file to use instead of the global/project config.json
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a script's bindings on the main window and dispatch its events
    Replay {
        /// Script file (.json or .toml)
        script: PathBuf,
    },
    /// List the built-in event kinds
    Kinds,
    /// Manage the Playfield config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a starter config.json to .playfield/ (or the global config dir)
    Init {
        /// Write to the global config dir instead of the current project
        #[arg(long)]
        global: bool,
        /// Overwrite an existing config.json
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective (merged) config
    Show,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => PlayfieldConfig::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}", e);
            PlayfieldConfig::default()
        }),
    };

    // Initialize logging
    let log_level = if args.debug {
        "debug".to_string()
    } else {
        config.log_level.clone().unwrap_or_else(|| "info".to_string())
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match args.command {
        Command::Replay { script } => replay_cmd(&script, config),
        Command::Kinds => {
            kinds_cmd();
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigAction::Init { global, force } => {
                let store = if global {
                    JsonStore::global()?
                } else {
                    JsonStore::current_project()?
                };
                init_config(&store, force)
            }
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
        },
    }
}

/// `--config`로 지정한 파일 로드 (기본값 위에 병합)
fn load_config_file(path: &Path) -> anyhow::Result<PlayfieldConfig> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Invalid config path: {}", path.display()))?;

    let loaded = JsonStore::new(dir)
        .read(file)?
        .with_context(|| format!("Config file not found: {}", path.display()))?;

    let mut config = PlayfieldConfig::new();
    config.merge(loaded);
    Ok(config)
}

/// starter config.json 생성 (이미 있으면 --force 없이는 건너뜀)
fn init_config(store: &JsonStore, force: bool) -> anyhow::Result<()> {
    if store.exists(PLAYFIELD_CONFIG_FILE) && !force {
        println!(
            "✓ Config already exists: {}",
            store.path(PLAYFIELD_CONFIG_FILE).display()
        );
        println!("  Use --force to overwrite.");
        return Ok(());
    }

    let path = PlayfieldConfig::starter().save_to(store)?;
    println!("  Created {}", path.display());
    Ok(())
}

fn replay_cmd(path: &Path, config: PlayfieldConfig) -> anyhow::Result<()> {
    let script = Script::load(path)?;
    let window = init_main_window(config.main_window);

    tracing::info!(
        target_id = %window.id(),
        label = window.label(),
        bindings = script.bindings.len(),
        steps = script.events.len(),
        "Replaying script"
    );

    let mut replay = Replay::new(window.clone());
    replay.install(&script.bindings);
    let outcomes = replay.run(&script.events);

    for outcome in &outcomes {
        println!("{}", outcome);
    }

    let remaining = window.event_types();
    if !remaining.is_empty() {
        println!("\nRemaining listeners on {}:", window.label());
        for event_type in remaining {
            println!("  {:<20} {}", event_type, window.listener_count(&event_type));
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} steps failed", failed, outcomes.len());
    }
    Ok(())
}

fn kinds_cmd() {
    println!("Built-in event kinds (all cancelable):\n");
    for kind in kinds::BUILTIN_TYPES {
        println!("  {:<20} {}", kind, describe_kind(kind));
    }
}

fn describe_kind(kind: &str) -> &'static str {
    match kind {
        kinds::COMMAND => "command mapped to a button; default runs the command",
        kinds::KEY_DOWN => "keyboard key pressed",
        kinds::KEY_UP => "keyboard key released",
        kinds::JOYSTICK_BUTTON_DOWN => "joystick button pressed",
        kinds::JOYSTICK_BUTTON_UP => "joystick button released",
        kinds::LAUNCH => "game about to launch; default starts the game",
        _ => "custom event",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["playfield", "--debug", "replay", "demo.toml"]);
        assert!(args.debug);
        assert!(matches!(args.command, Command::Replay { ref script } if script == Path::new("demo.toml")));

        let args = Args::parse_from(["playfield", "kinds", "--config", "cfg.json"]);
        assert!(matches!(args.command, Command::Kinds));
        assert_eq!(args.config.as_deref(), Some(Path::new("cfg.json")));
    }

    #[test]
    fn test_every_kind_is_described() {
        for kind in kinds::BUILTIN_TYPES {
            assert_ne!(describe_kind(kind), "custom event");
        }
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cabinet.json");
        std::fs::write(&path, r#"{"mainWindow": {"traceDispatch": true}, "logLevel": "warn"}"#)
            .unwrap();

        let config = load_config_file(&path).unwrap();
        assert!(config.main_window.is_tracing());
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert!(load_config_file(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_config_subcommand_parse() {
        let args = Args::parse_from(["playfield", "config", "init", "--force"]);
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Init { global: false, force: true }
            }
        ));
    }

    #[test]
    fn test_init_config_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::project(dir.path());

        init_config(&store, false).unwrap();
        let written = PlayfieldConfig::load_from(&store).unwrap();
        assert_eq!(written.main_window.label.as_deref(), Some("mainWindow"));

        // 기존 파일은 --force 없이 유지
        std::fs::write(store.path(PLAYFIELD_CONFIG_FILE), r#"{"logLevel": "trace"}"#).unwrap();
        init_config(&store, false).unwrap();
        let kept = PlayfieldConfig::load_from(&store).unwrap();
        assert_eq!(kept.log_level.as_deref(), Some("trace"));

        init_config(&store, true).unwrap();
        let replaced = PlayfieldConfig::load_from(&store).unwrap();
        assert_eq!(replaced.log_level.as_deref(), Some("info"));
    }
}
