use crate::models::{EmployerProfile, InternProfile, Posting};
use crate::services::store::{CandidateStore, StoreError};
use std::sync::RwLock;

/// In-memory marketplace snapshot, used for tests and local runs
#[derive(Debug, Default)]
pub struct InMemoryStore {
    postings: RwLock<Vec<Posting>>,
    interns: RwLock<Vec<InternProfile>>,
    employers: RwLock<Vec<EmployerProfile>>,
}

impl InMemoryStore {
    pub fn new(
        postings: Vec<Posting>,
        interns: Vec<InternProfile>,
        employers: Vec<EmployerProfile>,
    ) -> Self {
        Self {
            postings: RwLock::new(postings),
            interns: RwLock::new(interns),
            employers: RwLock::new(employers),
        }
    }

    pub fn add_posting(&self, posting: Posting) {
        write(&self.postings).push(posting);
    }

    pub fn add_intern(&self, intern: InternProfile) {
        write(&self.interns).push(intern);
    }

    pub fn add_employer(&self, employer: EmployerProfile) {
        write(&self.employers).push(employer);
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CandidateStore for InMemoryStore {
    async fn listed_postings(&self) -> Result<Vec<Posting>, StoreError> {
        Ok(read(&self.postings)
            .iter()
            .filter(|p| p.is_listed())
            .cloned()
            .collect())
    }

    async fn confirmed_interns(&self) -> Result<Vec<InternProfile>, StoreError> {
        Ok(read(&self.interns)
            .iter()
            .filter(|i| i.email_confirmed)
            .cloned()
            .collect())
    }

    async fn intern_profile(&self, id: i64) -> Result<InternProfile, StoreError> {
        read(&self.interns)
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("intern profile {}", id)))
    }

    async fn employer_profile(&self, id: i64) -> Result<EmployerProfile, StoreError> {
        read(&self.employers)
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("employer profile {}", id)))
    }
}
