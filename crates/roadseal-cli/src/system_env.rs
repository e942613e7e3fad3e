//! Production Environment implementation using the system clock and RNG.
//!
//! # Capabilities
//!
//! - Real wall-clock time (`std::time::SystemTime`), or a pinned second so a
//!   frame protected by one invocation verifies in another
//! - OS cryptographic RNG (getrandom). Truly random, not reproducible

use roadseal_core::env::Environment;

/// Production environment using system time and cryptographic RNG.
///
/// # Security
///
/// The RNG uses getrandom which provides OS-level cryptographic randomness
/// (e.g., /dev/urandom on Linux, `BCryptGenRandom` on Windows). Pseudonym
/// pools and key indices are drawn from it.
///
/// # Panics
///
/// Panics if the OS RNG fails. A station without working randomness would
/// emit predictable pseudonyms and must not keep running.
#[derive(Clone, Default)]
pub struct SystemEnv {
    pinned_secs: Option<u64>,
}

impl SystemEnv {
    /// Environment following the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment whose clock always reads `unix_secs`.
    #[must_use]
    pub fn pinned(unix_secs: u64) -> Self {
        Self { pinned_secs: Some(unix_secs) }
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::disallowed_methods)]
    #[allow(clippy::expect_used)]
    fn unix_time_secs(&self) -> u64 {
        if let Some(secs) = self.pinned_secs {
            return secs;
        }
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("invariant: system clock is after Unix epoch (1970-01-01)")
            .as_secs()
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - station cannot operate securely");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_env_clock_is_recent() {
        // 2023-11-14, well before any plausible test run
        assert!(SystemEnv::new().unix_time_secs() > 1_700_000_000);
    }

    #[test]
    fn pinned_clock_does_not_move() {
        let env = SystemEnv::pinned(42);
        assert_eq!(env.unix_time_secs(), 42);
        assert_eq!(env.timestamp(), 42);
    }

    #[test]
    fn system_env_random_bytes_are_random() {
        let env = SystemEnv::new();

        let mut bytes1 = [0u8; 32];
        let mut bytes2 = [0u8; 32];

        env.random_bytes(&mut bytes1);
        env.random_bytes(&mut bytes2);

        // Extremely unlikely to be equal if random
        assert_ne!(bytes1, bytes2, "Random bytes should differ");
    }
}
