//! RngSeed: доменный seed для RNG раздачи.
//!
//! Позволяет:
//!   - хранить базовый seed (u64 или [u8;32])
//!   - делать детерминированное hash-reseeding:
//!         new = H(domain || old || session_id || game_index)
//!   - создавать DeterministicRng из seed

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::SessionId;
use crate::infra::rng::DeterministicRng;

const DOMAIN_TAG: &[u8] = b"BIG_TWO_ENGINE_RNG_V1";

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Seed для конкретной партии:
    ///   - `session_id`: партия;
    ///   - `game_index`: номер партии в группе (счётчик).
    pub fn derive(&self, session_id: SessionId, game_index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_TAG);
        hasher.update(self.bytes);
        hasher.update(session_id.to_le_bytes());
        hasher.update(game_index.to_le_bytes());

        let hash = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash[..32]);

        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
