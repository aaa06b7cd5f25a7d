/* packages/cli/core/src/ui.rs */

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

// Progress goes to stderr so `quire render` can stream the page on stdout

pub fn ok(msg: &str) {
  eprintln!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn arrow(msg: &str) {
  eprintln!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  eprintln!("  {YELLOW}warning{RESET}: {msg}");
}

pub fn detail(msg: &str) {
  eprintln!("        {DIM}{msg}{RESET}");
}

pub fn banner(cmd: &str) {
  eprintln!();
  eprintln!("  {BOLD}quire{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  eprintln!();
}

pub fn format_size(bytes: u64) -> String {
  if bytes >= 1_000_000 {
    format!("{:.1} MB", bytes as f64 / 1_000_000.0)
  } else if bytes >= 1_000 {
    format!("{:.1} kB", bytes as f64 / 1_000.0)
  } else {
    format!("{bytes} B")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn format_size_units() {
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(2_500), "2.5 kB");
    assert_eq!(format_size(3_200_000), "3.2 MB");
  }
}
