use crate::detector::internals::Pitch;
use crate::float::Float;

pub mod autocorrelation;
pub mod config;
pub mod correlation;
pub mod internals;

pub trait PitchDetector<T>
where
    T: Float,
{
    /// Detect the pitch of one block. `None` means no pitch this block.
    fn get_pitch(&mut self, signal: &[T]) -> Option<Pitch<T>>;
}
