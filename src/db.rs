use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Build the connection pool. Pool size defaults to r2d2's but can be tuned
/// through `DATABASE_POOL_SIZE` for constrained deployments.
pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let mut builder = Pool::builder();
    if let Some(size) = std::env::var("DATABASE_POOL_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        builder = builder.max_size(size);
    }
    builder
        .build(manager)
        .expect("Failed to create database connection pool")
}
