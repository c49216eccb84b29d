//! Raw mode and alternate screen handling for the dashboard.

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Puts the terminal back the way it was when dropped, including when setup
/// fails halfway.
pub struct TerminalGuard {
    restore: fn(),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        Self::enter_with(enable_raw_mode, enter_alternate_screen, restore_terminal)
    }

    fn enter_with(
        enable: fn() -> io::Result<()>,
        setup: fn() -> io::Result<()>,
        restore: fn(),
    ) -> io::Result<Self> {
        enable()?;
        let guard = Self { restore };
        setup()?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn enter_alternate_screen() -> io::Result<()> {
    execute!(io::stdout(), EnterAlternateScreen)
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Restore the terminal before the default hook prints the panic.
pub fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        hook(info);
    }));
}
