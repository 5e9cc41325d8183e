//! Audio-trigger events
//!
//! The simulation never talks to a sound device. It pushes cues into an
//! [`EventQueue`] and whoever owns audio drains the queue into an
//! [`AudioSink`] between frames. Nobody draining is fine: the queue keeps
//! only the most recent cues.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Cues the table can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Bumper contact, or a slingshot firing its kick
    BumperHit,
    /// Hard flipper contact
    FlipperHit,
    /// A lit target went dark
    TargetHit,
    /// Ball lost below the playfield
    Drain,
}

/// Maximum cues held when no consumer is draining
pub const MAX_PENDING_CUES: usize = 256;

/// Something that turns cues into sound
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue, volume: f32);
}

/// FIFO of cues produced by the simulation
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    cues: VecDeque<AudioCue>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cue (drops the oldest one when full)
    pub fn push(&mut self, cue: AudioCue) {
        if self.cues.len() >= MAX_PENDING_CUES {
            self.cues.pop_front();
        }
        self.cues.push_back(cue);
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Take every pending cue in emission order
    pub fn drain(&mut self) -> impl Iterator<Item = AudioCue> + '_ {
        self.cues.drain(..)
    }

    /// Drain pending cues into a sink, honouring the mixer settings
    pub fn dispatch<S: AudioSink + ?Sized>(&mut self, mixer: &Mixer, sink: &mut S) {
        let volume = mixer.effective_volume();
        if volume <= 0.0 {
            self.cues.clear();
            return;
        }
        for cue in self.cues.drain(..) {
            sink.play(cue, volume);
        }
    }
}

/// Consumer-side sound settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mixer {
    /// Sound effects on/off
    pub sfx_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for Mixer {
    fn default() -> Self {
        Self {
            sfx_enabled: true,
            master_volume: 0.3,
        }
    }
}

impl Mixer {
    fn effective_volume(&self) -> f32 {
        if self.sfx_enabled {
            self.master_volume
        } else {
            0.0
        }
    }
}

/// Sink that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        self.played += 1;
        log::debug!("audio cue {:?} at volume {:.2}", cue, volume);
    }
}
