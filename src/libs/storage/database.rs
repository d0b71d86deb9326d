pub mod migration;
pub mod storage_sqlite;
