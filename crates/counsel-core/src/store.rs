use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::error::{InputError, SeedError};
use crate::profile::{Profile, ProfileFields, ProfileInput};

/// Authoritative in-memory profile collection and its id counter.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    profiles: Vec<Profile>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            profiles: Vec::new(),
            next_id: 1,
        }
    }
}

impl RecordStore {
    #[tracing::instrument(skip(seed), fields(count = seed.len()))]
    pub fn from_seed(seed: Vec<Profile>) -> Result<Self, SeedError> {
        let mut seen = BTreeSet::new();
        for profile in &seed {
            if profile.id == 0 {
                return Err(SeedError::ZeroId {
                    name: profile.name.clone(),
                });
            }
            if !seen.insert(profile.id) {
                return Err(SeedError::DuplicateId { id: profile.id });
            }
        }

        let next_id = seed.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        info!(count = seed.len(), next_id, "seeded record store");

        Ok(Self {
            profiles: seed,
            next_id,
        })
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, id: u64) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Id the next created profile will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    #[tracing::instrument(skip(self, input))]
    pub fn create(&mut self, input: &ProfileInput) -> Result<Profile, InputError> {
        let fields = input.parse()?;
        Ok(self.insert(fields))
    }

    pub fn insert(&mut self, fields: ProfileFields) -> Profile {
        let fields = clamp_logged(fields);
        let id = self.next_id;
        self.next_id += 1;

        let profile = Profile::new(id, fields);
        info!(id, bar_id = %profile.bar_id, name = %profile.name, "created profile");
        self.profiles.push(profile.clone());
        profile
    }

    /// Replaces the editable fields of `id` in place. `Ok(None)` when no
    /// profile has that id.
    #[tracing::instrument(skip(self, input))]
    pub fn update(&mut self, id: u64, input: &ProfileInput) -> Result<Option<Profile>, InputError> {
        let fields = clamp_logged(input.parse()?);

        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) else {
            debug!(id, "update target missing; ignoring");
            return Ok(None);
        };

        profile.apply(fields);
        info!(id, bar_id = %profile.bar_id, "updated profile");
        Ok(Some(profile.clone()))
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: u64) -> Option<Profile> {
        let Some(idx) = self.profiles.iter().position(|p| p.id == id) else {
            debug!(id, "delete target missing; ignoring");
            return None;
        };

        let removed = self.profiles.remove(idx);
        info!(id, remaining = self.profiles.len(), "deleted profile");
        Some(removed)
    }
}

fn clamp_logged(fields: ProfileFields) -> ProfileFields {
    let raw = fields.rating;
    let fields = fields.clamped();
    if fields.rating != raw {
        debug!(raw, clamped = fields.rating, "rating out of range; clamped");
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(id: u64, bar_id: &str) -> Profile {
        Profile {
            id,
            name: format!("Seed {id}"),
            specialty: "Civil".to_string(),
            city: "Lahore".to_string(),
            fee: 10_000,
            rating: 4.0,
            bar_id: bar_id.to_string(),
        }
    }

    fn form(name: &str, fee: &str, rating: &str) -> ProfileInput {
        ProfileInput {
            name: name.to_string(),
            specialty: "Tax".to_string(),
            city: "Karachi".to_string(),
            fee: fee.to_string(),
            rating: rating.to_string(),
        }
    }

    #[test]
    fn counter_starts_after_highest_seed_id() {
        let store = RecordStore::from_seed(vec![seeded(3, "PK-3"), seeded(9, "PK-9")]).unwrap();
        assert_eq!(store.next_id(), 10);
        assert_eq!(RecordStore::default().next_id(), 1);
        assert_eq!(RecordStore::from_seed(vec![]).unwrap().next_id(), 1);
    }

    #[test]
    fn seed_rejects_duplicate_and_zero_ids() {
        assert!(matches!(
            RecordStore::from_seed(vec![seeded(1, "a"), seeded(1, "b")]),
            Err(SeedError::DuplicateId { id: 1 })
        ));
        assert!(matches!(
            RecordStore::from_seed(vec![seeded(0, "a")]),
            Err(SeedError::ZeroId { .. })
        ));
    }

    #[test]
    fn create_appends_with_fresh_id_and_registration() {
        let mut store = RecordStore::from_seed(vec![seeded(4, "PK-4")]).unwrap();
        let created = store.create(&form("Nadia", "25000", "4.0")).unwrap();

        assert_eq!(created.id, 5);
        assert_eq!(created.bar_id, "PK-NEW-5");
        assert_eq!(store.len(), 2);
        assert_eq!(store.profiles().last(), Some(&created));
        assert_eq!(store.next_id(), 6);
    }

    #[test]
    fn create_with_bad_numbers_changes_nothing() {
        let mut store = RecordStore::from_seed(vec![seeded(1, "PK-1")]).unwrap();
        let before = store.clone();

        assert!(store.create(&form("Nadia", "abc", "4")).is_err());
        assert!(store.create(&form("Nadia", "100", "four")).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let mut store = RecordStore::default();
        let first = store.create(&form("A", "1", "3")).unwrap();
        store.delete(first.id);
        let second = store.create(&form("B", "1", "3")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn update_preserves_identity_order_and_neighbours() {
        let mut store =
            RecordStore::from_seed(vec![seeded(1, "PK-1"), seeded(2, "PK-2"), seeded(3, "PK-3")])
                .unwrap();
        let untouched = store.profiles().to_vec();

        let updated = store
            .update(2, &form("Renamed", "30000", "7.2"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, 2);
        assert_eq!(updated.bar_id, "PK-2");
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.city, "Karachi");
        assert_eq!(updated.fee, 30000);
        assert_eq!(updated.rating, 5.0);

        let ids: Vec<u64> = store.profiles().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.profiles()[0], untouched[0]);
        assert_eq!(store.profiles()[2], untouched[2]);
    }

    #[test]
    fn update_clamps_low_rating() {
        let mut store = RecordStore::from_seed(vec![seeded(1, "PK-1")]).unwrap();
        let updated = store.update(1, &form("A", "1", "-3")).unwrap().unwrap();
        assert_eq!(updated.rating, 1.0);
    }

    #[test]
    fn update_missing_or_invalid_leaves_store_alone() {
        let mut store = RecordStore::from_seed(vec![seeded(1, "PK-1")]).unwrap();
        let before = store.clone();

        assert_eq!(store.update(42, &form("A", "1", "3")), Ok(None));
        assert!(store.update(1, &form("A", "x", "3")).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn delete_removes_only_existing_ids() {
        let mut store = RecordStore::from_seed(vec![seeded(1, "PK-1"), seeded(2, "PK-2")]).unwrap();

        assert_eq!(store.delete(7), None);
        assert_eq!(store.len(), 2);

        let removed = store.delete(1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
    }
}
