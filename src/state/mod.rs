pub mod glitch;

pub use glitch::GlitchPhase;
