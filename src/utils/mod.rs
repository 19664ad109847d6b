pub mod buffer;
pub mod octave;
pub mod peak;
