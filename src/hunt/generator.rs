//! Random candidate generator

use rand::Rng;

use super::Alphabet;

/// Generator for fixed-length random candidates
pub struct CandidateGenerator<R> {
    alphabet: Alphabet,
    rng: R,
    buffer: Vec<u8>,
    generated: u64,
}

impl<R: Rng> CandidateGenerator<R> {
    /// Create a new generator for candidates of given length
    pub fn new(alphabet: Alphabet, length: usize, rng: R) -> Self {
        Self {
            alphabet,
            rng,
            buffer: vec![0; length],
            generated: 0,
        }
    }

    /// Candidate length in bytes
    pub fn length(&self) -> usize {
        self.buffer.len()
    }

    /// Number of candidates produced so far
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Size of the candidate space, `None` when it overflows u64
    pub fn search_space(&self) -> Option<u64> {
        let length = u32::try_from(self.buffer.len()).ok()?;
        (self.alphabet.bytes().len() as u64).checked_pow(length)
    }

    /// Draw the next candidate; the slice is overwritten by the following call
    pub fn next_candidate(&mut self) -> &[u8] {
        let chars = self.alphabet.bytes();
        for slot in self.buffer.iter_mut() {
            *slot = chars[self.rng.gen_range(0..chars.len())];
        }
        self.generated += 1;
        &self.buffer
    }
}

impl<R: Rng> Iterator for CandidateGenerator<R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let candidate = self.next_candidate();
        // Alphabet bytes are ASCII
        Some(String::from_utf8_lossy(candidate).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_candidate_length_and_charset() {
        for length in [1, 2, 10, 64] {
            let mut gen = CandidateGenerator::new(Alphabet::Legacy, length, SmallRng::seed_from_u64(7));
            for _ in 0..200 {
                let candidate = gen.next_candidate();
                assert_eq!(candidate.len(), length);
                assert!(candidate.iter().all(|&b| Alphabet::Legacy.contains(b)));
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a: Vec<String> = CandidateGenerator::new(Alphabet::Base36, 8, SmallRng::seed_from_u64(42))
            .take(5)
            .collect();
        let b: Vec<String> = CandidateGenerator::new(Alphabet::Base36, 8, SmallRng::seed_from_u64(42))
            .take(5)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_characters_reachable() {
        let mut gen = CandidateGenerator::new(Alphabet::Base36, 1, SmallRng::seed_from_u64(1));
        let mut seen = [false; 256];
        for _ in 0..5000 {
            seen[gen.next_candidate()[0] as usize] = true;
        }
        assert!(Alphabet::Base36.bytes().iter().all(|&b| seen[b as usize]));
    }

    #[test]
    fn test_counters() {
        let mut gen = CandidateGenerator::new(Alphabet::Base36, 4, SmallRng::seed_from_u64(0));
        assert_eq!(gen.search_space(), Some(36_u64.pow(4)));
        gen.next_candidate();
        gen.next_candidate();
        assert_eq!(gen.generated(), 2);

        let gen = CandidateGenerator::new(Alphabet::Base36, 20, SmallRng::seed_from_u64(0));
        assert_eq!(gen.search_space(), None);
    }
}
