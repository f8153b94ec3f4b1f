//! # `finboard-store` - 设置存储
//!
//! 提供 `SettingsStore` 的 SQLite 与内存实现。
//! `apiUrl` 持久化到 `<data_dir>/settings.db`，会话数据只保存在内存中。

pub mod config;
pub mod memory;
mod session;
pub mod settings;

pub use memory::MemorySettingsStore;
pub use settings::SqliteSettingsStore;
