//! Environment abstraction for deterministic testing.
//!
//! Decouples protocol logic from system resources (wall-clock time,
//! randomness). Production uses the OS clock and RNG; tests use a fixed clock
//! and a seeded RNG so protected messages are reproducible byte for byte.

/// Abstract environment providing wall-clock time and randomness.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - Methods are infallible except in exceptional circumstances (e.g., OS
///   entropy exhaustion, incorrect test setup)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Seconds since the Unix epoch.
    fn unix_time_secs(&self) -> u64;

    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    /// - Uses cryptographically secure RNG
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Current time as the 4-byte signed wire timestamp.
    ///
    /// Epoch seconds truncated to their low 32 bits, two's complement.
    fn timestamp(&self) -> i32 {
        self.unix_time_secs() as i32
    }

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Uniform index in `[0, bound)`.
    ///
    /// Rejection sampling over `u64`, so no index is favoured. Returns 0 when
    /// `bound` is 0 or 1.
    fn random_below(&self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }

        let bound = bound as u128;
        let span = u128::from(u64::MAX) + 1;
        let zone = span - span % bound;
        loop {
            let value = u128::from(self.random_u64());
            if value < zone {
                return (value % bound) as usize;
            }
        }
    }
}


/// Deterministic environment for tests and fuzzing.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    use std::sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    };

    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::Environment;

    /// Settable clock plus either a seeded ChaCha stream or all-zero entropy.
    ///
    /// Clones share the clock and the RNG, so a sender and a verifier built
    /// from the same `MockEnv` observe the same time.
    #[derive(Clone)]
    pub struct MockEnv {
        clock: Arc<AtomicU64>,
        rng: Option<Arc<Mutex<ChaCha8Rng>>>,
    }

    impl MockEnv {
        /// Every random byte is 0: first pseudonym, key index 0.
        pub fn zeroed(unix_secs: u64) -> Self {
            Self { clock: Arc::new(AtomicU64::new(unix_secs)), rng: None }
        }

        /// Seeded ChaCha8 entropy.
        pub fn seeded(seed: u64, unix_secs: u64) -> Self {
            Self {
                clock: Arc::new(AtomicU64::new(unix_secs)),
                rng: Some(Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed)))),
            }
        }

        /// Move the shared clock.
        pub fn set_time(&self, unix_secs: u64) {
            self.clock.store(unix_secs, Ordering::SeqCst);
        }
    }

    impl Environment for MockEnv {
        fn unix_time_secs(&self) -> u64 {
            self.clock.load(Ordering::SeqCst)
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            match &self.rng {
                Some(rng) => rng.lock().unwrap_or_else(PoisonError::into_inner).fill_bytes(buffer),
                None => buffer.fill(0),
            }
        }
    }
}
