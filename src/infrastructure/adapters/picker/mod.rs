//! Seed Picker Adapter - 基于 StdRng 的随机源

mod std_rng_picker;

pub use std_rng_picker::StdRngSeedPicker;
