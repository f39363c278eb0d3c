//! # Random Sources
//!
//! The engine's only source of nondeterminism. Every uniform draw the
//! generator makes (which affordable item, which material, whether an
//! optional placeholder stays empty) goes through [`RandomSource::pick`].

use rand::Rng;

/// Uniform index draws.
///
/// Any [`rand::Rng`] is a `RandomSource`, so production code passes a
/// `StdRng` or `ThreadRng`. Tests can pass a [`ScriptedSource`] to force
/// particular outcomes.
pub trait RandomSource {
    /// Returns an index uniformly drawn from `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays a fixed sequence of picks, cycling when it runs out.
///
/// Each scripted value is reduced modulo the number of choices, so a script
/// of zeros always takes the first candidate. An empty script behaves like
/// a script of zeros.
///
/// # Examples
///
/// ```
/// use loot_generator::{RandomSource, ScriptedSource};
///
/// let mut source = ScriptedSource::new(vec![1, 4]);
/// assert_eq!(source.pick(3), 1);
/// assert_eq!(source.pick(3), 1); // 4 % 3
/// assert_eq!(source.pick(2), 1); // cycled back to 1
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Number of picks made so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, len: usize) -> usize {
        let value = if self.script.is_empty() {
            0
        } else {
            self.script[self.cursor % self.script.len()]
        };
        self.cursor += 1;
        value % len.max(1)
    }
}
