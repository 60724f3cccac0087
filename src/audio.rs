//! Audio cues
//!
//! The simulation only emits semantic `Cue` tags. Hosts pick an `AudioSink`:
//! procedural Web Audio beeps in the browser (no sound files), a logging sink
//! natively. Every cue maps to a short list of tones in `tones`.

use crate::sim::Cue;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One oscillator burst with an exponential fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    /// Start frequency (Hz)
    pub freq: f32,
    /// Frequency at the end of the burst (Hz), same as `freq` for a flat tone
    pub freq_end: f32,
    /// Offset from the cue trigger (seconds)
    pub delay: f32,
    pub duration: f32,
    /// Peak gain before the master volume
    pub gain: f32,
}

impl Tone {
    const fn flat(wave: Wave, freq: f32, delay: f32, duration: f32, gain: f32) -> Self {
        Self {
            wave,
            freq,
            freq_end: freq,
            delay,
            duration,
            gain,
        }
    }

    const fn sweep(wave: Wave, freq: f32, freq_end: f32, duration: f32, gain: f32) -> Self {
        Self {
            wave,
            freq,
            freq_end,
            delay: 0.0,
            duration,
            gain,
        }
    }
}

const JUMP: [Tone; 1] = [Tone::sweep(Wave::Square, 320.0, 640.0, 0.12, 0.2)];
const LAND: [Tone; 1] = [Tone::sweep(Wave::Sine, 140.0, 70.0, 0.08, 0.35)];
const COIN: [Tone; 2] = [
    Tone::flat(Wave::Square, 988.0, 0.0, 0.06, 0.18),
    Tone::flat(Wave::Square, 1319.0, 0.06, 0.12, 0.18),
];
const POWER: [Tone; 3] = [
    Tone::flat(Wave::Triangle, 523.0, 0.0, 0.1, 0.3),
    Tone::flat(Wave::Triangle, 659.0, 0.08, 0.1, 0.3),
    Tone::flat(Wave::Triangle, 784.0, 0.16, 0.16, 0.3),
];
const SHIELD_BREAK: [Tone; 1] = [Tone::sweep(Wave::Sawtooth, 1200.0, 200.0, 0.2, 0.25)];
const HIT: [Tone; 2] = [
    Tone::sweep(Wave::Sawtooth, 220.0, 55.0, 0.4, 0.4),
    Tone::sweep(Wave::Square, 110.0, 40.0, 0.5, 0.2),
];
const MILESTONE: [Tone; 2] = [
    Tone::flat(Wave::Sine, 880.0, 0.0, 0.08, 0.25),
    Tone::flat(Wave::Sine, 1760.0, 0.09, 0.14, 0.25),
];

/// Tone recipe for a cue
pub fn tones(cue: Cue) -> &'static [Tone] {
    match cue {
        Cue::Jump => &JUMP,
        Cue::Land => &LAND,
        Cue::Coin => &COIN,
        Cue::Power => &POWER,
        Cue::ShieldBreak => &SHIELD_BREAK,
        Cue::Hit => &HIT,
        Cue::Milestone => &MILESTONE,
    }
}

/// Fire-and-forget cue consumer
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Recording sink for tests
impl AudioSink for Vec<Cue> {
    fn play(&mut self, cue: Cue) {
        self.push(cue);
    }
}

/// Native sink: writes cues to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio {
    pub played: usize,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        self.played += 1;
        let recipe = tones(cue);
        log::debug!(
            "cue {:?}: {} tone(s), {:.2}s",
            cue,
            recipe.len(),
            recipe
                .iter()
                .map(|t| t.delay + t.duration)
                .fold(0.0_f32, f32::max)
        );
    }
}

/// Hand every cue to the sink, in emission order
pub fn dispatch(cues: impl IntoIterator<Item = Cue>, sink: &mut dyn AudioSink) {
    for cue in cues {
        sink.play(cue);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, Tone, Wave, tones};
    use crate::sim::Cue;

    /// Procedural beeps through the Web Audio API
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            wave: Wave,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Triangle => OscillatorType::Triangle,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
            let Some((osc, gain)) = Self::create_osc(ctx, tone.freq, tone.wave) else {
                return;
            };
            let t = ctx.current_time() + tone.delay as f64;
            let end = t + tone.duration as f64;

            gain.gain()
                .set_value_at_time(tone.gain * self.master_volume, t)
                .ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if tone.freq_end != tone.freq {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.freq_end, end)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.02).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, cue: Cue) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in tones(cue) {
                self.play_tone(ctx, tone);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Cue; 7] = [
        Cue::Jump,
        Cue::Land,
        Cue::Coin,
        Cue::Power,
        Cue::ShieldBreak,
        Cue::Hit,
        Cue::Milestone,
    ];

    #[test]
    fn test_every_cue_has_audible_tones() {
        for cue in ALL {
            let recipe = tones(cue);
            assert!(!recipe.is_empty(), "{:?} is silent", cue);
            for tone in recipe {
                assert!(tone.freq > 0.0 && tone.freq_end > 0.0);
                assert!(tone.duration > 0.0 && tone.delay >= 0.0);
                assert!(tone.gain > 0.0 && tone.gain <= 1.0);
            }
        }
    }

    #[test]
    fn test_dispatch_preserves_order() {
        let mut sink: Vec<Cue> = Vec::new();
        dispatch(vec![Cue::Coin, Cue::Jump, Cue::Hit], &mut sink);
        assert_eq!(sink, vec![Cue::Coin, Cue::Jump, Cue::Hit]);

        let mut log = LogAudio::default();
        dispatch(ALL, &mut log);
        assert_eq!(log.played, ALL.len());
    }
}
