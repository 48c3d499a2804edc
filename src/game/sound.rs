/// A tone request in the units the firmware uses: a frequency code
/// (0 = silence) and a duration code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub freq: u8,
    pub duration: u8,
}

impl Tone {
    pub const fn new(freq: u8, duration: u8) -> Self {
        Self { freq, duration }
    }
}

/// Audible cues the game asks the frame loop to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Button acknowledged in the menu or on the game over screen
    Confirm,
    Eat,
    /// Fatal collision
    Crash,
    BootLow,
    BootHigh,
}

impl Sound {
    pub fn tone(&self) -> Tone {
        match self {
            Sound::Confirm => Tone::new(100, 50),
            Sound::Eat => Tone::new(150, 30),
            Sound::Crash => Tone::new(50, 200),
            Sound::BootLow => Tone::new(100, 100),
            Sound::BootHigh => Tone::new(150, 100),
        }
    }
}
