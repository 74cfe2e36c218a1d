#[cfg(not(any(feature = "wasm", feature = "nowasm")))]
compile_error!("enable either the `nowasm` or the `wasm` feature to select a random source");

#[cfg(not(feature = "wasm"))]
pub type DefaultRng = rand::rngs::ThreadRng;

/// per-thread generator, seeded from the operating system
#[cfg(not(feature = "wasm"))]
pub fn default_rng() -> DefaultRng {
    rand::thread_rng()
}

#[cfg(feature = "wasm")]
pub type DefaultRng = JsMathRng;

#[cfg(feature = "wasm")]
pub fn default_rng() -> DefaultRng {
    JsMathRng
}

/// Feeds `Math.random()` into rand, so range sampling stays unbiased in the browser.
#[cfg(feature = "wasm")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsMathRng;

#[cfg(feature = "wasm")]
impl rand::RngCore for JsMathRng {
    fn next_u32(&mut self) -> u32 {
        // Math.random() carries at least 32 random bits in [0, 1)
        (js_sys::Math::random() * 4_294_967_296.0) as u32
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
