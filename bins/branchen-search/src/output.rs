//! Terminal output helpers
//!
//! Results go to stdout uncoloured so they can be piped; status lines go to
//! stderr.

use owo_colors::{OwoColorize, Stream};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✓".if_supports_color(Stream::Stderr, |s| s.green()), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |s| s.red()), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".if_supports_color(Stream::Stderr, |s| s.yellow()), message);
    }

    /// Print a recovery hint below an error
    pub fn hint(message: &str) {
        eprintln!("  {}", message.if_supports_color(Stream::Stderr, |s| s.dimmed()));
    }

    /// Print a labelled value
    pub fn field(label: &str, value: &str) {
        eprintln!("{:>12} {}", label.if_supports_color(Stream::Stderr, |s| s.bold()), value);
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json(value: &impl serde::Serialize) -> branchen_core::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
