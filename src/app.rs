//! Application orchestrator.
//! Merges config, initializes logging, installs the Ctrl-C handler, validates directories,
//! and runs the selected mode.

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use file_organizer::cli::Args;
use file_organizer::config::{Config, Mode, default_config_path, load_config_from_xml};
use file_organizer::logging::init_tracing;
use file_organizer::output as out;
use file_organizer::{Mover, OrganizerError, Shutdown, WatchOptions, WatchSession, scan_once};

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("Config file location:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file exists at that location.");
                } else {
                    out::print_info("No config file exists there; built-in defaults and flags are used.");
                }
            }
            None => out::print_error("Could not determine a config file location."),
        }
        return Ok(());
    }

    // Defaults < XML < CLI
    let mut cfg = Config::default();
    let loaded = load_config_from_xml()?;
    if let Some((path, xml)) = &loaded {
        xml.apply(&mut cfg)
            .with_context(|| format!("invalid value in config '{}'", path.display()))?;
    }
    args.apply_overrides(&mut cfg);

    // Held until return so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
    })?;

    let shutdown = Shutdown::new();
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.request();
            out::print_warn("Received interrupt; shutting down gracefully...");
        })
        .context("install signal handler")?;
    }

    if let Some((path, _)) = &loaded {
        info!(path = %path.display(), "using config file");
    }
    debug!("Starting file_organizer: {:?}", args);

    let result = execute(&mut cfg, &shutdown);
    if let Err(e) = &result {
        match e.downcast_ref::<OrganizerError>() {
            Some(OrganizerError::Interrupted) => warn!("stopped before completion"),
            Some(oe) => error!(code = oe.code(), kind = ?oe.kind(), error = %oe, "fatal error"),
            None => error!(error = ?e, "fatal error"),
        }
    }
    result
}

fn execute(cfg: &mut Config, shutdown: &Shutdown) -> Result<()> {
    cfg.prepare()?;
    let mover = Mover::from_config(cfg, shutdown.clone());

    match cfg.mode {
        Mode::Once => {
            let report = scan_once(&cfg.source, &cfg.dest, cfg.recursive, cfg.dry_run, &mover)?;
            info!(
                moved = report.moved,
                planned = report.planned,
                unclassified = report.unclassified,
                failed = report.failed,
                "Organization completed"
            );
            out::print_success("Organization completed.");
        }
        Mode::Watch => {
            out::print_info("Starting watch mode...");
            let session = WatchSession::open(&cfg.source, &cfg.dest, cfg.recursive)?;
            out::print_info(&format!("Watching directory: {}", session.source().display()));
            let opts = WatchOptions {
                dry_run: cfg.dry_run,
                follow_new_dirs: cfg.follow_new_dirs,
            };
            // Blocks until Ctrl-C requests shutdown.
            let report = session.spawn(mover, opts).join();
            let (verb, count) = if cfg.dry_run {
                ("would move", report.files.planned)
            } else {
                ("moved", report.files.moved)
            };
            out::print_info(&format!(
                "Watch stopped: {count} {verb}, {} failed.",
                report.files.failed
            ));
        }
    }
    Ok(())
}
