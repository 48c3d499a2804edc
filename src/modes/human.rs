use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

use crate::console::{Console, check_fits_display};
use crate::device::terminal::TerminalDevice;
use crate::game::{GameConfig, GameEngine};

type HostTerminal = Terminal<CrosstermBackend<Stderr>>;
type HostConsole = Console<TerminalDevice<CrosstermBackend<Stderr>>, StdRng>;

/// Play on the terminal with the keyboard standing in for the keypad
pub struct HumanMode {
    config: GameConfig,
    seed: Option<u64>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self { config, seed: None }
    }

    /// Fix the food placement sequence
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        // Everything fallible about the game is settled before the terminal
        // is taken over
        check_fits_display(&self.config)?;
        let engine = GameEngine::with_rng(self.config.clone(), self.rng())?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let device = TerminalDevice::new(terminal);
        let mut console = Console::with_engine(device, engine);

        // Run game loop with cleanup
        let result = Self::run_game_loop(&mut console);

        // Cleanup terminal
        Self::cleanup_terminal(console.device_mut().terminal_mut())?;

        result
    }

    fn run_game_loop(console: &mut HostConsole) -> Result<()> {
        console.boot()?;

        while !console.device().quit_requested() {
            console.frame()?;
        }

        info!("quit requested");
        Ok(())
    }

    fn cleanup_terminal(terminal: &mut HostTerminal) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        use rand::Rng;

        let mode = HumanMode::new(GameConfig::default()).with_seed(5);
        let a: u64 = mode.rng().r#gen();
        let b: u64 = mode.rng().r#gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseeded_by_default() {
        let mode = HumanMode::new(GameConfig::default());
        assert_eq!(mode.seed, None);
        assert_eq!(mode.config, GameConfig::default());
    }
}
