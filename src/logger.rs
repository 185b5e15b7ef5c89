//! Console output switches and macros.
//!
//! Lines go through [`emit`] so that, while a batch progress bar is attached,
//! they are printed above the bar instead of tearing it.

use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);
static ACTIVE_PROGRESS: Mutex<Option<ProgressBar>> = Mutex::new(None);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Applies the CLI output flags. `quiet` wins over `verbose`.
pub fn init(quiet: bool, verbose: bool) {
    set_quiet_mode(quiet);
    set_verbose_mode(verbose && !quiet);
}

pub fn set_quiet_mode(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose_mode(verbose: bool) {
    VERBOSE_MODE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::Relaxed)
}

pub fn attach_progress(progress: &ProgressBar) {
    if let Ok(mut slot) = ACTIVE_PROGRESS.lock() {
        *slot = Some(progress.clone());
    }
}

pub fn detach_progress() {
    if let Ok(mut slot) = ACTIVE_PROGRESS.lock() {
        *slot = None;
    }
}

pub fn emit(stream: Stream, line: &str) {
    let write = || match stream {
        Stream::Stdout => println!("{}", line),
        Stream::Stderr => eprintln!("{}", line),
    };

    let progress = ACTIVE_PROGRESS.lock().ok().and_then(|slot| slot.clone());
    match progress {
        Some(pb) if !pb.is_hidden() => pb.suspend(write),
        _ => write(),
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            $crate::logger::emit($crate::logger::Stream::Stdout, &format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose() && !$crate::logger::is_quiet() {
            $crate::logger::emit(
                $crate::logger::Stream::Stdout,
                &format!("🔍 {}", format!($($arg)*)),
            );
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logger::emit(
            $crate::logger::Stream::Stderr,
            &format!("❌ {}", format!($($arg)*)),
        );
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            $crate::logger::emit(
                $crate::logger::Stream::Stderr,
                &format!("⚠️  {}", format!($($arg)*)),
            );
        }
    };
}
