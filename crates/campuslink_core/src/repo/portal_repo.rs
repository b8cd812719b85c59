//! Portal aggregate repository.
//!
//! # Responsibility
//! - Load the durable aggregate blob, seeding the fixed default dataset
//!   when the key is absent.
//! - Save the whole aggregate atomically after every mutation.
//!
//! # Invariants
//! - `load` on an absent key persists the seed before returning it, so a
//!   first read and a later reload observe the same data.
//! - `save` overwrites the previous blob; last writer wins.

use log::info;

use crate::model::aggregate::Aggregate;
use crate::repo::{decode, encode, RepoResult, AGGREGATE_KEY};
use crate::storage::KvStorage;

/// Load/save contract for the durable portal aggregate.
pub trait PortalRepository {
    fn load(&mut self) -> RepoResult<Aggregate>;
    fn save(&mut self, aggregate: &Aggregate) -> RepoResult<()>;
}

/// Key/value-backed aggregate repository.
pub struct KvPortalRepository<S: KvStorage> {
    storage: S,
}

impl<S: KvStorage> KvPortalRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Releases the underlying storage, e.g. to reopen the repository and
    /// simulate a process restart in tests.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: KvStorage> PortalRepository for KvPortalRepository<S> {
    fn load(&mut self) -> RepoResult<Aggregate> {
        match self.storage.get(AGGREGATE_KEY)? {
            Some(raw) => decode(AGGREGATE_KEY, &raw),
            None => {
                let seed = Aggregate::seed();
                self.storage.put(AGGREGATE_KEY, &encode(AGGREGATE_KEY, &seed)?)?;
                info!(
                    "event=aggregate_seeded module=repo status=ok schedule={} org={}",
                    seed.schedule.len(),
                    seed.org.len()
                );
                Ok(seed)
            }
        }
    }

    fn save(&mut self, aggregate: &Aggregate) -> RepoResult<()> {
        self.storage
            .put(AGGREGATE_KEY, &encode(AGGREGATE_KEY, aggregate)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KvPortalRepository, PortalRepository};
    use crate::model::aggregate::Aggregate;
    use crate::repo::{RepoError, AGGREGATE_KEY};
    use crate::storage::{KvStorage, MemoryKvStorage};

    #[test]
    fn load_on_absent_key_seeds_and_persists() {
        let mut repo = KvPortalRepository::new(MemoryKvStorage::new());
        let first = repo.load().unwrap();
        assert_eq!(first, Aggregate::seed());

        let storage = repo.into_storage();
        assert!(storage.get(AGGREGATE_KEY).unwrap().is_some());

        let mut reopened = KvPortalRepository::new(storage);
        assert_eq!(reopened.load().unwrap(), first);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut repo = KvPortalRepository::new(MemoryKvStorage::new());
        let mut aggregate = repo.load().unwrap();
        aggregate.org.pop();
        repo.save(&aggregate).unwrap();
        assert_eq!(repo.load().unwrap(), aggregate);
    }

    #[test]
    fn corrupt_blob_surfaces_invalid_data() {
        let mut storage = MemoryKvStorage::new();
        storage.put(AGGREGATE_KEY, "not json").unwrap();
        let mut repo = KvPortalRepository::new(storage);
        assert!(matches!(repo.load(), Err(RepoError::InvalidData(_))));
    }
}
