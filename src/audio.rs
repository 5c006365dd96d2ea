//! Audio cues
//!
//! The game only decides *when* a cue fires. [`AudioSink`] implementations
//! decide how it sounds; on the web that is a pair of procedurally generated
//! tones through the Web Audio API, no external files needed.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Craft cleared an obstacle pair
    Pass,
    /// Craft hit an obstacle
    Collision,
}

/// Fire-and-forget cue playback
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Silent sink (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Records cues in order
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    pub played: Vec<SoundEffect>,
}

#[cfg(test)]
impl AudioSink for CueLog {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

/// Envelope for a single synthesized note (seconds, sustain as a gain fraction)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub attack: f64,
    pub decay: f64,
    pub sustain: f32,
    /// How long the note is held before release
    pub hold: f64,
    pub release: f64,
    /// Peak gain before volume scaling
    pub peak: f32,
}

/// Eighth note at 120 bpm
const EIGHTH_NOTE: f64 = 0.25;

impl SoundEffect {
    /// The note each cue plays
    pub fn tone(&self) -> Tone {
        match self {
            // C4, soft sine chime
            SoundEffect::Pass => Tone {
                freq: 261.63,
                attack: 0.05,
                decay: 0.2,
                sustain: 0.05,
                hold: EIGHTH_NOTE,
                release: 0.5,
                peak: 0.4,
            },
            // C2, short square thud
            SoundEffect::Collision => Tone {
                freq: 65.41,
                attack: 0.01,
                decay: 0.1,
                sustain: 0.0,
                hold: EIGHTH_NOTE,
                release: 0.2,
                peak: 0.6,
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect, Tone};

    /// Smallest gain for exponential ramps (they cannot reach zero)
    const SILENCE: f32 = 0.001;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_sfx_volume(&mut self, vol: f32) {
            self.sfx_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Create an oscillator routed through its own gain node
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Play one note with an attack/decay/sustain/release envelope
        fn play_tone(&self, ctx: &AudioContext, tone: Tone, osc_type: OscillatorType, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            let peak = (tone.peak * vol).max(SILENCE);
            let sustain = (peak * tone.sustain).max(SILENCE);
            let release_at = t + tone.hold.max(tone.attack + tone.decay);
            let end = release_at + tone.release;

            gain.gain().set_value_at_time(SILENCE, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(peak, t + tone.attack)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(sustain, t + tone.attack + tone.decay)
                .ok();
            gain.gain().set_value_at_time(sustain, release_at).ok();
            gain.gain().exponential_ramp_to_value_at_time(SILENCE, end).ok();

            osc.start().ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let osc_type = match effect {
                SoundEffect::Pass => OscillatorType::Sine,
                SoundEffect::Collision => OscillatorType::Square,
            };
            self.play_tone(ctx, effect.tone(), osc_type, vol);
        }
    }
}
