use crate::asset::AssetSymbol;

/// Seed for an asset's synthetic series: the sum of its ticker's character codes.
pub fn seed_for(symbol: AssetSymbol) -> u32 {
    symbol.as_str().chars().map(|c| c as u32).sum()
}

/// Mulberry32 pseudo-random generator.
///
/// A 32-bit multiply-xor-shift generator. All arithmetic wraps modulo 2^32,
/// so the same seed produces the same stream on every platform.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    const INCREMENT: u32 = 0x6D2B_79F5;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn for_symbol(symbol: AssetSymbol) -> Self {
        Self::new(seed_for(symbol))
    }

    /// Next value, uniformly distributed in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}
