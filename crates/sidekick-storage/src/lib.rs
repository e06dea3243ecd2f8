//! # sidekick-storage
//!
//! [`KeyValueStore`](sidekick_core::ports::storage::KeyValueStore) 포트 구현.
//!
//! - [`sqlite::SqliteKvStore`]: 파일 기반 SQLite (rusqlite)
//! - [`memory::MemoryKvStore`]: 프로세스 내 메모리 (테스트, 일회성 실행)

pub mod memory;
pub mod migration;
pub mod sqlite;
