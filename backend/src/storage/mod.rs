mod sqlite;

pub use sqlite::SqliteBlobStore;
