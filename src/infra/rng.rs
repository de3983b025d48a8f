use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use crate::engine::RandomSource;

/// Системный RNG (thread-local генератор `rand`).
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }

    fn index(&mut self, upper: usize) -> usize {
        thread_rng().gen_range(0..upper)
    }

    fn next_seed(&mut self) -> u64 {
        thread_rng().gen()
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи и оценки при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }

    fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }
}

/// RNG сессии: с seed из конфига – детерминированный, иначе системный.
#[derive(Clone, Debug)]
pub enum SessionRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl SessionRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => SessionRng::Seeded(DeterministicRng::from_seed(seed)),
            None => SessionRng::System(SystemRng),
        }
    }
}

impl RandomSource for SessionRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            SessionRng::System(rng) => rng.shuffle(slice),
            SessionRng::Seeded(rng) => rng.shuffle(slice),
        }
    }

    fn index(&mut self, upper: usize) -> usize {
        match self {
            SessionRng::System(rng) => rng.index(upper),
            SessionRng::Seeded(rng) => rng.index(upper),
        }
    }

    fn next_seed(&mut self) -> u64 {
        match self {
            SessionRng::System(rng) => rng.next_seed(),
            SessionRng::Seeded(rng) => rng.next_seed(),
        }
    }
}
