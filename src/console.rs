//! The handheld's frame loop
//!
//! Each frame polls one key, maps it, advances the simulation, renders, plays
//! whatever cue came up and then blocks for the frame delay. Game speed is
//! controlled by the engine's move delay, never by the frame cadence.

use anyhow::{Result, bail};
use log::info;
use rand::Rng;

use crate::device::{DISPLAY_HEIGHT, DISPLAY_WIDTH, Device, audio};
use crate::game::{GameConfig, GameEngine, GameState, Sound};
use crate::render::Renderer;
use crate::render::renderer::{CELL_ORIGIN, CELL_SIZE};

/// Fails when the last interior cell would be drawn outside the display border
pub fn check_fits_display(config: &GameConfig) -> Result<()> {
    let interior = config.playfield.interior();
    let right = interior.max_x * CELL_SIZE + CELL_ORIGIN + CELL_SIZE - 1;
    let bottom = interior.max_y * CELL_SIZE + CELL_ORIGIN + CELL_SIZE - 1;
    if right >= DISPLAY_WIDTH || bottom >= DISPLAY_HEIGHT {
        bail!(
            "playfield {}x{} does not fit a {}x{} display",
            config.playfield.width,
            config.playfield.height,
            DISPLAY_WIDTH,
            DISPLAY_HEIGHT
        );
    }
    Ok(())
}

pub struct Console<D: Device, R: Rng> {
    device: D,
    engine: GameEngine<R>,
    state: GameState,
    renderer: Renderer,
    frame_delay_ms: u32,
}

impl<D: Device, R: Rng> Console<D, R> {
    pub fn new(device: D, config: GameConfig, rng: R) -> Result<Self> {
        check_fits_display(&config)?;
        let engine = GameEngine::with_rng(config, rng)?;
        Ok(Self::with_engine(device, engine))
    }

    /// Attach a ready engine to a device. The engine's playfield is expected
    /// to have passed [`check_fits_display`].
    pub fn with_engine(device: D, mut engine: GameEngine<R>) -> Self {
        let frame_delay_ms = engine.config().frame_delay_ms;
        let state = engine.new_state();

        Self {
            device,
            engine,
            state,
            renderer: Renderer::new(),
            frame_delay_ms,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Power-on sequence: blank screen and a two-note jingle
    pub fn boot(&mut self) -> Result<()> {
        info!("booting");
        self.device.clear();
        self.device.commit()?;

        self.play(Sound::BootLow);
        self.device.wait_ms(50);
        self.play(Sound::BootHigh);
        Ok(())
    }

    /// Run one frame
    pub fn frame(&mut self) -> Result<()> {
        let key = self.device.poll_key();
        if let Some(sound) = self.engine.handle_input(&mut self.state, key) {
            self.play(sound);
        }

        let result = self.engine.update(&mut self.state);
        if let Some(sound) = result.sound {
            self.play(sound);
        }

        self.renderer.render(&mut self.device, &self.state)?;
        self.device.wait_ms(self.frame_delay_ms);
        Ok(())
    }

    fn play(&mut self, sound: Sound) {
        audio::emit(&mut self.device, sound.tone());
    }
}
