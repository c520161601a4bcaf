//! Clockface headless host.
//!
//! This is the application entry point. It handles:
//! - Tracing setup (filter via `RUST_LOG`, default `info`)
//! - Configuration loading and hot-reload watching
//! - A fixed-rate frame loop reading the local time via chrono
//!
//! Each frame is written to stdout as one JSON line so a separate renderer can
//! draw the clock face from a pipe.

use chrono::{Local, Timelike};
use clockface::config::{Config, ConfigLoadResult};
use clockface::{Animator, DigitCell, DisplayState, Phase};
use notify::{Event, RecursiveMode, Watcher};
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::channel;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Debounce interval for config reload in milliseconds.
/// Prevents multiple reloads when a file is saved with multiple write events.
const CONFIG_RELOAD_DEBOUNCE_MS: u128 = 300;

/// Delay after detecting file change to ensure write is complete.
const FILE_WRITE_SETTLE_MS: u64 = 100;

/// State for managing config file reload with debouncing.
struct ReloadState {
    /// Whether a reload should be triggered
    should_reload: bool,
    /// Timestamp of the last reload to implement debouncing
    last_reload: Instant,
}

type SharedReloadState = Arc<Mutex<ReloadState>>;

/// One emitted frame.
#[derive(Serialize)]
struct FrameRecord<'a> {
    elapsed_frames: u32,
    phase: Phase,
    digits: [u8; 6],
    cells: &'a [DigitCell; 6],
}

/// Everything derived from one loaded config.
struct Host {
    animator: Animator,
    frame_interval: Duration,
    only_changes: bool,
    last_emitted: Option<DisplayState>,
}

impl Host {
    /// Builds a host showing `now` without animating to it.
    fn new<T: Timelike>(config: &Config, now: &T) -> Result<Self, Box<dyn Error>> {
        Ok(Host {
            animator: Animator::at_time(now, config.animation.duration()?)?,
            frame_interval: config.animation.frame_interval()?,
            only_changes: config.output.only_changes,
            last_emitted: None,
        })
    }

    /// Advances one frame at `now` and writes it unless it repeats the last one.
    fn frame<T: Timelike>(&mut self, now: &T, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
        let frame = *self.animator.tick_time(now)?;

        if self.only_changes && self.last_emitted == Some(frame) {
            return Ok(());
        }

        let record = FrameRecord {
            elapsed_frames: self.animator.elapsed_frames(),
            phase: self.animator.phase(),
            digits: frame.digits(),
            cells: &frame.cells,
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)?;
        out.flush()?;

        self.last_emitted = Some(frame);
        Ok(())
    }
}

fn main() -> ExitCode {
    init_tracer();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracer() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Runs the frame loop until stdout is closed.
fn run() -> Result<(), Box<dyn Error>> {
    let config_path = Config::default_path();
    let ConfigLoadResult {
        config,
        source_files,
    } = Config::load_or_default(&config_path);
    tracing::info!(
        duration_frames = config.animation.duration_frames,
        frames_per_second = config.animation.frames_per_second,
        "starting"
    );

    let mut config = config;
    let mut host = Host::new(&config, &Local::now())?;
    let reload_state = setup_config_watcher(source_files);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let frame_start = Instant::now();

        if take_reload(&reload_state) {
            reload_config(&config_path, &mut config, &mut host);
        }

        if let Err(e) = host.frame(&Local::now(), &mut out) {
            if is_broken_pipe(e.as_ref()) {
                tracing::info!("output closed, stopping");
                return Ok(());
            }
            return Err(e);
        }

        thread::sleep(host.frame_interval.saturating_sub(frame_start.elapsed()));
    }
}

/// Whether an output error means the reading end of stdout went away.
fn is_broken_pipe(e: &(dyn Error + 'static)) -> bool {
    let kind = if let Some(e) = e.downcast_ref::<io::Error>() {
        Some(e.kind())
    } else if let Some(e) = e.downcast_ref::<serde_json::Error>() {
        e.io_error_kind()
    } else {
        None
    };
    kind == Some(io::ErrorKind::BrokenPipe)
}

/// Checks and clears the reload flag.
fn take_reload(reload_state: &SharedReloadState) -> bool {
    match reload_state.lock() {
        Ok(mut state) if state.should_reload => {
            state.should_reload = false;
            true
        }
        _ => false,
    }
}

/// Reloads the configuration and rebuilds the host from it.
///
/// The new host starts on the current time without animating, since the
/// transition length may have changed. A config that fails to load keeps
/// the running one.
fn reload_config(config_path: &Path, config: &mut Config, host: &mut Host) {
    let new_config = match Config::load(config_path) {
        Ok(result) => result.config,
        Err(e) => {
            tracing::warn!("{}, keeping current config", e);
            return;
        }
    };

    match Host::new(&new_config, &Local::now()) {
        Ok(new_host) => {
            *host = new_host;
            *config = new_config;
            tracing::info!(
                duration_frames = config.animation.duration_frames,
                frames_per_second = config.animation.frames_per_second,
                "config reloaded"
            );
        }
        Err(e) => tracing::warn!("{}, keeping current config", e),
    }
}

/// Sets up file system watching for configuration hot-reload.
///
/// Creates a background thread that monitors the directories holding the
/// config and its includes. When one of those files changes, a reload flag is
/// raised for the frame loop to pick up. Uses debouncing (300ms) to avoid
/// multiple reloads from rapid file changes.
///
/// The watched set is fixed at startup, so includes added by a later reload
/// are only picked up on restart.
fn setup_config_watcher(source_files: Vec<PathBuf>) -> SharedReloadState {
    let reload_state = Arc::new(Mutex::new(ReloadState {
        should_reload: false,
        last_reload: Instant::now(),
    }));
    let reload_state_clone = reload_state.clone();

    let watch_dirs: HashSet<PathBuf> = source_files
        .iter()
        .filter_map(|path| path.parent().map(Path::to_path_buf))
        .collect();

    if watch_dirs.is_empty() {
        tracing::warn!("could not determine config directory to watch");
        return reload_state;
    }

    let (tx, rx) = channel();

    thread::spawn(move || {
        let mut watcher = match notify::recommended_watcher(tx) {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!("failed to create file watcher: {}", e);
                return;
            }
        };

        for dir in &watch_dirs {
            if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
                tracing::warn!("failed to watch config directory {:?}: {}", dir, e);
            }
        }

        // Keep the watcher alive and forward events
        loop {
            match rx.recv() {
                Ok(Ok(event)) => {
                    if !is_config_file_event(&event, &source_files) {
                        continue;
                    }

                    // Small delay to ensure file is written completely
                    thread::sleep(Duration::from_millis(FILE_WRITE_SETTLE_MS));

                    if let Ok(mut state) = reload_state_clone.lock() {
                        let now = Instant::now();
                        if now.duration_since(state.last_reload).as_millis()
                            > CONFIG_RELOAD_DEBOUNCE_MS
                        {
                            tracing::debug!(paths = ?event.paths, "config change detected");
                            state.should_reload = true;
                            state.last_reload = now;
                        }
                    }
                }
                Ok(Err(e)) => tracing::warn!("watch error: {:?}", e),
                Err(e) => {
                    tracing::warn!("watch channel closed: {:?}", e);
                    break;
                }
            }
        }
    });

    reload_state
}

/// Checks if a file system event touches one of the config source files.
fn is_config_file_event(event: &Event, source_files: &[PathBuf]) -> bool {
    event.paths.iter().any(|path| {
        source_files
            .iter()
            .any(|source| path.file_name() == source.file_name())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_is_config_file_event() {
        let sources = vec![
            PathBuf::from("/home/user/.config/clockface/config.toml"),
            PathBuf::from("/home/user/.config/clockface/slow.toml"),
        ];
        let event = Event::new(notify::EventKind::Any)
            .add_path(PathBuf::from("/home/user/.config/clockface/slow.toml"));
        assert!(is_config_file_event(&event, &sources));

        let other = Event::new(notify::EventKind::Any)
            .add_path(PathBuf::from("/home/user/.config/clockface/notes.txt"));
        assert!(!is_config_file_event(&other, &sources));
    }

    #[test]
    fn test_is_broken_pipe() {
        let broken: Box<dyn Error> = Box::new(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(is_broken_pipe(broken.as_ref()));

        let other: Box<dyn Error> = Box::new(io::Error::from(io::ErrorKind::NotFound));
        assert!(!is_broken_pipe(other.as_ref()));
    }

    #[test]
    fn test_take_reload_clears_flag() {
        let state = Arc::new(Mutex::new(ReloadState {
            should_reload: true,
            last_reload: Instant::now(),
        }));
        assert!(take_reload(&state));
        assert!(!take_reload(&state));
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn records(out: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8(out.to_vec())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_host_frame_skips_repeats() {
        let now = at(12, 0, 0);
        let mut host = Host::new(&Config::default(), &now).unwrap();
        let mut out = Vec::new();
        host.frame(&now, &mut out).unwrap();
        host.frame(&now, &mut out).unwrap();
        host.frame(&now, &mut out).unwrap();

        let records = records(&out);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["phase"], "idle");
        assert_eq!(records[0]["digits"].as_array().unwrap().len(), 6);
        assert_eq!(records[0]["cells"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_host_frame_emits_every_frame_without_only_changes() {
        let mut config = Config::default();
        config.output.only_changes = false;
        let now = at(12, 0, 0);
        let mut host = Host::new(&config, &now).unwrap();
        let mut out = Vec::new();
        for _ in 0..3 {
            host.frame(&now, &mut out).unwrap();
        }
        assert_eq!(records(&out).len(), 3);
    }

    #[test]
    fn test_host_frame_records_transition() {
        let mut host = Host::new(&Config::default(), &at(12, 0, 0)).unwrap();
        let next = at(12, 0, 1);
        let mut out = Vec::new();
        for _ in 0..25 {
            host.frame(&next, &mut out).unwrap();
        }

        // Frames 0 through 19 move, frame 20 lands on the target, then repeats are skipped
        let records = records(&out);
        assert_eq!(records.len(), 21);
        assert_eq!(records[0]["elapsed_frames"], 0);
        assert_eq!(records[0]["phase"], "animating");
        assert_eq!(records[19]["elapsed_frames"], 19);
        assert_eq!(records[19]["phase"], "animating");
        assert_eq!(records[20]["elapsed_frames"], 20);
        assert_eq!(records[20]["phase"], "idle");
        assert_eq!(records[20]["digits"][5], 1);
    }
}
