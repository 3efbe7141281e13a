//! User-facing console lines.
//! Colored prefixes only when stdout is a TTY; plain text otherwise so output stays scriptable.

use owo_colors::OwoColorize;
use std::path::Path;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Plain line, no prefix.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// "Moved: a → b" (or "Would move: a → b" for dry runs).
pub fn print_relocation(from: &Path, to: &Path, dry_run: bool) {
    let verb = if dry_run { "Would move:" } else { "Moved:" };
    if is_tty() {
        println!("{} {} → {}", verb.bold(), from.display(), to.display().green());
    } else {
        print_user(&format!("{} {} → {}", verb, from.display(), to.display()));
    }
}
