use crate::table_metadata::Record;
use crate::DbPool;

/// PostgreSQL-backed store for one record type
#[derive(Clone)]
pub struct GenericStore<T: Record> {
    pub(crate) db_pool: DbPool,
    pub(crate) _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T: Record> std::fmt::Debug for GenericStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericStore")
            .field("table", &T::table_name())
            .field("pool_size", &self.db_pool.size())
            .finish()
    }
}

impl<T: Record> GenericStore<T> {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            db_pool,
            _phantom: std::marker::PhantomData,
        }
    }
}
