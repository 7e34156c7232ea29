//! Terminal detection utilities.
//!
//! These read process-wide state (stdout, environment). Call them once at
//! startup and pass the results along; layout code never queries them.

use std::env;
use std::ffi::OsString;

/// Width used when the terminal size cannot be determined.
pub const DEFAULT_WIDTH: usize = 100;

/// Returns `true` if stdout is connected to a terminal (TTY).
pub fn is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Columns of the attached terminal, or [`DEFAULT_WIDTH`] when stdout is
/// redirected or reports a zero size.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _rows)) if cols > 0 => usize::from(cols),
        _ => DEFAULT_WIDTH,
    }
}

/// Whether the report should be colored, judged from the real environment
/// and stdout.
pub fn supports_color() -> bool {
    color_from_env(|key| env::var_os(key), is_tty())
}

/// Color decision for an environment given as a lookup function.
///
/// `NO_COLOR` (any value, <https://no-color.org/>), `CLICOLOR=0` and
/// `TERM=dumb` turn color off. Otherwise `CLICOLOR_FORCE` (any value)
/// turns it on. Failing all of those, color follows `tty`.
pub fn color_from_env<F>(lookup: F, tty: bool) -> bool
where
    F: Fn(&str) -> Option<OsString>,
{
    let is = |key: &str, value: &str| lookup(key).is_some_and(|v| v == value);

    if lookup("NO_COLOR").is_some() || is("CLICOLOR", "0") || is("TERM", "dumb") {
        return false;
    }
    lookup("CLICOLOR_FORCE").is_some() || tty
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn decide(vars: &[(&str, &str)], tty: bool) -> bool {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        color_from_env(|key| vars.get(key).cloned(), tty)
    }

    #[test]
    fn terminal_width_returns_positive() {
        assert!(terminal_width() > 0);
    }

    #[test]
    fn follows_tty_by_default() {
        assert!(decide(&[], true));
        assert!(!decide(&[], false));
    }

    #[test]
    fn no_color_wins_even_when_empty() {
        assert!(!decide(&[("NO_COLOR", "")], true));
        assert!(!decide(&[("NO_COLOR", "1"), ("CLICOLOR_FORCE", "1")], true));
    }

    #[test]
    fn clicolor_zero_and_dumb_terminal_disable() {
        assert!(!decide(&[("CLICOLOR", "0")], true));
        assert!(!decide(&[("TERM", "dumb")], true));
        assert!(decide(&[("CLICOLOR", "1"), ("TERM", "xterm-256color")], true));
    }

    #[test]
    fn force_colors_a_pipe() {
        assert!(decide(&[("CLICOLOR_FORCE", "1")], false));
    }
}
