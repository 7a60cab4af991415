//! Deterministic random number generation
//!
//! Every system draws from its own named ChaCha8 stream derived from the
//! master seed, so adding or reordering systems never perturbs another
//! system's draws. Per-entity draws derive a fresh stream from
//! (stream, entity, tick) and are independent of visit order.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ecs::EntityId;

pub struct RngManager {
    master_seed: u64,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master_seed: seed,
            streams: HashMap::new(),
        }
    }

    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let stream_seed = mix(self.master_seed, hash_name(name), 0);
        let inner = self
            .streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(stream_seed));
        SystemRng { inner, stream_seed }
    }
}

pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
    stream_seed: u64,
}

impl SystemRng<'_> {
    /// Deterministic per-(entity, tick) stream.
    pub fn for_entity(&self, id: EntityId, tick: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(mix(self.stream_seed, id.raw(), tick))
    }
}

impl RngCore for SystemRng<'_> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

fn hash_name(name: &str) -> u64 {
    // FNV-1a
    name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

fn mix(seed: u64, a: u64, b: u64) -> u64 {
    const MUL: u64 = 6364136223846793005;
    const ADD: u64 = 1442695040888963407;
    let mut state = seed;
    state = state.wrapping_mul(MUL).wrapping_add(ADD);
    state ^= a.wrapping_mul(48271);
    state = state.wrapping_mul(MUL).wrapping_add(ADD);
    state ^= b.wrapping_mul(69069);
    state.wrapping_mul(MUL).wrapping_add(ADD)
}
