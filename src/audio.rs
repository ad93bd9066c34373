//! Audio cues using Web Audio API
//!
//! Procedurally generated tones - no external files needed! Each cue is a
//! small plan of oscillator notes; the plans are plain data so they work (and
//! are tested) off the browser, and only `AudioManager` touches Web Audio.

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// How the pitch moves from `freq` to `end_freq`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glide {
    Linear,
    Exponential,
}

/// One oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Waveform,
    /// Start frequency (Hz)
    pub freq: f32,
    /// Optional target frequency reached at the end of the note
    pub end_freq: Option<(f32, Glide)>,
    /// Offset from the cue start (s)
    pub delay: f64,
    /// Note length (s)
    pub duration: f64,
    /// Peak gain (0.0 - 1.0)
    pub gain: f32,
    /// Linear fade-in time (s), 0 for an instant start
    pub attack: f64,
}

impl Tone {
    const fn new(wave: Waveform, freq: f32, duration: f64, gain: f32) -> Self {
        Self {
            wave,
            freq,
            end_freq: None,
            delay: 0.0,
            duration,
            gain,
            attack: 0.0,
        }
    }

    const fn glide(mut self, to: f32, glide: Glide) -> Self {
        self.end_freq = Some((to, glide));
        self
    }

    const fn at(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    const fn attack(mut self, attack: f64) -> Self {
        self.attack = attack;
        self
    }
}

/// Voice used when a collected animal is tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalVoice {
    Cat,
    Dog,
    Bird,
    Bee,
    Frog,
    Roar,
    Pig,
    Cow,
    /// Anything without a dedicated voice
    Chirp,
}

impl AnimalVoice {
    /// Voice for a collected glyph. Glyphs without their own voice (shapes,
    /// sea creatures, new catalog entries) get `Chirp`.
    pub fn for_glyph(glyph: &str) -> Self {
        match glyph {
            "🐱" => AnimalVoice::Cat,
            "🐶" | "🦊" => AnimalVoice::Dog,
            "🐔" | "🦆" | "🦉" | "🐧" => AnimalVoice::Bird,
            "🐝" | "🐞" | "🦋" => AnimalVoice::Bee,
            "🐸" | "🐢" | "🦎" => AnimalVoice::Frog,
            "🦁" | "🐉" | "🐘" => AnimalVoice::Roar,
            "🐷" => AnimalVoice::Pig,
            "🐮" => AnimalVoice::Cow,
            _ => AnimalVoice::Chirp,
        }
    }

    fn tones(&self) -> Vec<Tone> {
        use Glide::*;
        use Waveform::*;
        match self {
            // Rising then falling "mee-ow"
            AnimalVoice::Cat => vec![
                Tone::new(Sine, 500.0, 0.18, 0.2).glide(800.0, Linear),
                Tone::new(Sine, 800.0, 0.25, 0.2).glide(400.0, Linear).at(0.18),
            ],
            // Two short barks
            AnimalVoice::Dog => vec![
                Tone::new(Square, 250.0, 0.1, 0.15).glide(150.0, Exponential),
                Tone::new(Square, 250.0, 0.1, 0.15).glide(150.0, Exponential).at(0.18),
            ],
            // Quick tweets
            AnimalVoice::Bird => vec![
                Tone::new(Sine, 1800.0, 0.08, 0.15).glide(2400.0, Linear),
                Tone::new(Sine, 2000.0, 0.08, 0.15).glide(2600.0, Linear).at(0.12),
                Tone::new(Sine, 1900.0, 0.1, 0.15).glide(2500.0, Linear).at(0.24),
            ],
            // Buzz
            AnimalVoice::Bee => vec![Tone::new(Sawtooth, 220.0, 0.5, 0.08).glide(240.0, Linear)],
            // Ribbit
            AnimalVoice::Frog => vec![
                Tone::new(Square, 180.0, 0.08, 0.12).glide(120.0, Linear),
                Tone::new(Square, 200.0, 0.12, 0.12).glide(110.0, Linear).at(0.1),
            ],
            // Low growl
            AnimalVoice::Roar => vec![
                Tone::new(Sawtooth, 120.0, 0.6, 0.2).glide(70.0, Exponential).attack(0.1),
            ],
            // Oink
            AnimalVoice::Pig => vec![
                Tone::new(Square, 300.0, 0.12, 0.12).glide(200.0, Exponential),
                Tone::new(Square, 320.0, 0.12, 0.12).glide(210.0, Exponential).at(0.15),
            ],
            // Moo
            AnimalVoice::Cow => vec![
                Tone::new(Sawtooth, 140.0, 0.8, 0.15).glide(110.0, Linear).attack(0.15),
            ],
            AnimalVoice::Chirp => vec![Tone::new(Triangle, 700.0, 0.15, 0.2).glide(1100.0, Exponential)],
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Button press
    Click,
    /// Trace point reached
    Pop,
    /// Stroke being drawn (throttled by the games)
    Draw,
    /// A pair was found
    Match,
    /// Shape traced / board cleared / animal home
    Success,
    /// Gentle "not quite"
    TryAgain,
    /// Extra cheer after a full board
    Encouragement,
    /// Collected animal tapped
    Animal(AnimalVoice),
}

impl SoundEffect {
    /// Voice for a collected glyph
    pub fn animal(glyph: &str) -> Self {
        SoundEffect::Animal(AnimalVoice::for_glyph(glyph))
    }

    /// Oscillator plan for this cue
    pub fn tones(&self) -> Vec<Tone> {
        use Glide::*;
        use Waveform::*;
        match self {
            SoundEffect::Click => vec![Tone::new(Square, 800.0, 0.05, 0.1)],
            SoundEffect::Pop => vec![Tone::new(Sine, 600.0, 0.15, 0.3).glide(1200.0, Exponential)],
            SoundEffect::Draw => vec![Tone::new(Sine, 300.0, 0.05, 0.05)],
            // Two notes together for a happy chord (C5 + E5)
            SoundEffect::Match => vec![
                Tone::new(Triangle, 523.0, 0.4, 0.2),
                Tone::new(Triangle, 659.0, 0.4, 0.2),
            ],
            // C5, E5, G5, C6
            SoundEffect::Success => [523.0, 659.0, 784.0, 1047.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| {
                    Tone::new(Triangle, freq, 0.3, 0.2)
                        .at(i as f64 * 0.1)
                        .attack(0.05)
                })
                .collect(),
            SoundEffect::TryAgain => vec![Tone::new(Sine, 300.0, 0.2, 0.1).glide(200.0, Linear)],
            // G5, A5, B5, D6 after the fanfare has started
            SoundEffect::Encouragement => [784.0, 880.0, 988.0, 1175.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone::new(Sine, freq, 0.2, 0.15).at(0.45 + i as f64 * 0.08))
                .collect(),
            SoundEffect::Animal(voice) => voice.tones(),
        }
    }
}

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<web_sys::AudioContext>,
    muted: bool,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = web_sys::AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted: false }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a sound effect (silently does nothing when muted or unavailable)
    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        // Vary the scribble sound so strokes don't drone
        let detune = if effect == SoundEffect::Draw {
            (js_sys::Math::random() * 200.0) as f32
        } else {
            0.0
        };

        for tone in effect.tones() {
            self.play_tone(ctx, &tone, detune);
        }
    }

    /// Schedule one oscillator note with a gain envelope
    fn play_tone(&self, ctx: &web_sys::AudioContext, tone: &Tone, detune: f32) -> Option<()> {
        use web_sys::OscillatorType;

        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(match tone.wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Triangle => OscillatorType::Triangle,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
        });
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let t = ctx.current_time() + tone.delay;
        let end = t + tone.duration;

        osc.frequency().set_value_at_time(tone.freq + detune, t).ok()?;
        match tone.end_freq {
            Some((to, Glide::Linear)) => {
                osc.frequency().linear_ramp_to_value_at_time(to + detune, end).ok()?;
            }
            Some((to, Glide::Exponential)) => {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(to + detune, end)
                    .ok()?;
            }
            None => {}
        }

        if tone.attack > 0.0 {
            gain.gain().set_value_at_time(0.0, t).ok()?;
            gain.gain()
                .linear_ramp_to_value_at_time(tone.gain, t + tone.attack)
                .ok()?;
        } else {
            gain.gain().set_value_at_time(tone.gain, t).ok()?;
        }
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end).ok()?;
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cue_has_audible_tones() {
        let cues = [
            SoundEffect::Click,
            SoundEffect::Pop,
            SoundEffect::Draw,
            SoundEffect::Match,
            SoundEffect::Success,
            SoundEffect::TryAgain,
            SoundEffect::Encouragement,
            SoundEffect::animal("🐱"),
            SoundEffect::animal("🔵"),
        ];
        for cue in cues {
            let tones = cue.tones();
            assert!(!tones.is_empty(), "{:?} has no tones", cue);
            for t in tones {
                assert!(t.freq > 0.0 && t.duration > 0.0 && t.gain > 0.0);
                assert!(t.attack < t.duration);
            }
        }
    }

    #[test]
    fn test_success_is_a_rising_arpeggio() {
        let tones = SoundEffect::Success.tones();
        assert_eq!(tones.len(), 4);
        assert!(tones.windows(2).all(|w| w[1].freq > w[0].freq && w[1].delay > w[0].delay));
    }

    #[test]
    fn test_voice_mapping_has_fallback() {
        assert_eq!(AnimalVoice::for_glyph("🐱"), AnimalVoice::Cat);
        assert_eq!(AnimalVoice::for_glyph("🐧"), AnimalVoice::Bird);
        assert_eq!(AnimalVoice::for_glyph("🐙"), AnimalVoice::Chirp);
        assert_eq!(AnimalVoice::for_glyph(""), AnimalVoice::Chirp);
    }
}
