//! Output width and screen control.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::render::DEFAULT_WIDTH;

/// Query the display width once.
///
/// Tries the terminal size, then `COLUMNS`, then [`DEFAULT_WIDTH`]. Never
/// fails, so rendering is never blocked on the terminal.
pub fn width() -> usize {
    let size = match crossterm::terminal::size() {
        Ok((cols, _)) => Some(cols),
        Err(err) => {
            tracing::debug!(%err, "terminal size unavailable");
            None
        }
    };
    resolve_width(size, std::env::var("COLUMNS").ok().as_deref())
}

fn resolve_width(size: Option<u16>, columns: Option<&str>) -> usize {
    size.filter(|&cols| cols > 0)
        .map(usize::from)
        .or_else(|| {
            columns
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|&cols| cols > 0)
        })
        .unwrap_or(DEFAULT_WIDTH)
}

/// Clear the screen and home the cursor before a re-render.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn clear_screen(out: &mut impl Write) -> std::io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_size_wins() {
        assert_eq!(resolve_width(Some(120), Some("90")), 120);
    }

    #[test]
    fn test_columns_used_without_terminal() {
        assert_eq!(resolve_width(None, Some("90")), 90);
        assert_eq!(resolve_width(Some(0), Some(" 72 ")), 72);
    }

    #[test]
    fn test_fallback_width() {
        assert_eq!(resolve_width(None, None), DEFAULT_WIDTH);
        assert_eq!(resolve_width(None, Some("wide")), DEFAULT_WIDTH);
        assert_eq!(resolve_width(None, Some("0")), DEFAULT_WIDTH);
    }

    #[test]
    fn test_width_is_positive() {
        assert!(width() > 0);
    }

    #[test]
    fn test_clear_screen_writes_escapes() {
        let mut buf = Vec::new();
        clear_screen(&mut buf).unwrap();
        assert!(buf.starts_with(b"\x1b["));
    }
}
