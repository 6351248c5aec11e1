//! Memory Layer - In-Memory State Management
//!
//! 实现 CharacterVoiceCache，进程内保存角色到种子的映射

mod voice_cache;

pub use voice_cache::InMemoryCharacterVoiceCache;
