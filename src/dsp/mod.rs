//! DSP Engine: additive electric-motor synthesis driven by RPM.
//!
//! The same code runs inside a WebAudio AudioWorklet (via WASM) and in the
//! offline WAV renderer.

pub mod automation;
pub mod engine;
pub mod filter;
pub mod lfo;
pub mod mapper;
pub mod mixer;
pub mod noise;
pub mod oscillator;
pub mod renderer;
pub mod voice;
pub mod waveform;
pub mod whine;
