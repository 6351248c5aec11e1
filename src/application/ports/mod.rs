//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod seed_picker;
mod voice_cache;

pub use seed_picker::SeedPickerPort;
pub use voice_cache::{CachedVoice, CharacterVoiceCachePort, CharacterVoiceKey, VoiceKeyScope};
