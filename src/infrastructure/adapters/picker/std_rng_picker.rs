//! StdRng Seed Picker
//!
//! 实现 SeedPickerPort；配置了种子时结果可复现

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::application::ports::SeedPickerPort;

pub struct StdRngSeedPicker {
    rng: Mutex<StdRng>,
}

impl StdRngSeedPicker {
    /// `seed` 为 None 时从系统熵源初始化
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => {
                tracing::info!(rng_seed = seed, "Seed picker uses a fixed RNG seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl SeedPickerPort for StdRngSeedPicker {
    fn pick_index(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}
