//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Every cue is a single oscillator with a gain envelope and a pitch
//! ramp; playback is fire-and-forget and never blocks the simulation.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::SoundCue;

/// One oscillator recipe per cue
struct CueParams {
    shape: OscillatorType,
    start_freq: f32,
    end_freq: f32,
    duration: f64,
    volume: f32,
}

fn cue_params(cue: SoundCue) -> CueParams {
    match cue {
        SoundCue::Jump => CueParams {
            shape: OscillatorType::Sine,
            start_freq: 500.0,
            end_freq: 900.0,
            duration: 0.15,
            volume: 0.3,
        },
        SoundCue::Hit => CueParams {
            shape: OscillatorType::Square,
            start_freq: 200.0,
            end_freq: 120.0,
            duration: 0.23,
            volume: 0.4,
        },
        SoundCue::Sword => CueParams {
            shape: OscillatorType::Sawtooth,
            start_freq: 800.0,
            end_freq: 300.0,
            duration: 0.11,
            volume: 0.3,
        },
        SoundCue::Arrow => CueParams {
            shape: OscillatorType::Sine,
            start_freq: 1200.0,
            end_freq: 1700.0,
            duration: 0.08,
            volume: 0.2,
        },
        SoundCue::Boss => CueParams {
            shape: OscillatorType::Square,
            start_freq: 120.0,
            end_freq: 90.0,
            duration: 0.4,
            volume: 0.5,
        },
        SoundCue::Win => CueParams {
            shape: OscillatorType::Sine,
            start_freq: 600.0,
            end_freq: 1000.0,
            duration: 0.7,
            volume: 0.4,
        },
        SoundCue::Die => CueParams {
            shape: OscillatorType::Square,
            start_freq: 150.0,
            end_freq: 60.0,
            duration: 0.55,
            volume: 0.5,
        },
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    /// Overall volume (0.0 - 1.0); the shell feeds the effective value
    /// from settings
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Resume the context (browsers require a user gesture first)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a one-shot cue
    pub fn play(&self, cue: SoundCue) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let params = cue_params(cue);
        if self.play_tone(ctx, &params).is_none() {
            log::warn!("audio cue {cue:?} failed to schedule");
        }
    }

    fn play_tone(&self, ctx: &AudioContext, params: &CueParams) -> Option<()> {
        let (osc, gain) = self.create_osc(ctx, params.start_freq, params.shape)?;
        let now = ctx.current_time();
        let end = now + params.duration;

        // Pitch slide
        osc.frequency().set_value_at_time(params.start_freq, now).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(params.end_freq.max(1.0), end)
            .ok()?;

        // Sharp attack, linear decay to silence
        let peak = params.volume * self.volume;
        gain.gain().set_value_at_time(peak, now).ok()?;
        gain.gain().linear_ramp_to_value_at_time(0.0001, end).ok()?;

        osc.start().ok()?;
        osc.stop_with_when(end + 0.01).ok()?;
        Some(())
    }

    /// Create an oscillator wired through a gain node to the output
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        shape: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(shape);
        osc.frequency().set_value(freq);

        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}
