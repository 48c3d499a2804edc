//! Tone synthesis on top of a bare [`Speaker`]

use log::trace;

use super::{Clock, Speaker};
use crate::game::Tone;

/// Timer period for a frequency code. Higher codes give shorter periods.
pub fn tone_period(freq: u8) -> u16 {
    510u16.saturating_sub(2 * freq as u16)
}

/// How long a tone of `period` is held for a duration code
pub fn hold_micros(period: u16, duration: u8) -> u32 {
    let cycles = period as u32 * duration as u32;
    cycles + cycles / 2
}

/// Play `tone` and block until it is over. A zero frequency is a rest.
pub fn emit<D: Speaker + Clock + ?Sized>(device: &mut D, tone: Tone) {
    if tone.freq == 0 {
        device.wait_ms(tone.duration as u32);
        return;
    }

    let period = tone_period(tone.freq);
    let hold = hold_micros(period, tone.duration);
    trace!("tone period {} for {}us", period, hold);

    device.play_tone(period.saturating_sub(1));
    device.wait_us(hold);
    device.stop_tone();
}
