use std::sync::Arc;

use crate::db::Database;
use crate::error::{DomainError, DomainResult};
use crate::model::Nas;
use crate::patch::NasPatch;
use crate::store::NasStore;
use crate::tables::Tables;

/// Decision logic for NAS entries. No peer relation, so only the
/// not-found/already-exists shape applies.
#[derive(Clone)]
pub struct NasService {
    db: Database,
    tables: Arc<Tables>,
    page_size: i64,
}

impl NasService {
    pub fn new(db: Database, tables: Arc<Tables>, page_size: i64) -> Self {
        Self {
            db,
            tables,
            page_size,
        }
    }

    pub async fn get(&self, nasname: &str) -> DomainResult<Nas> {
        let mut tx = self.db.begin().await?;
        let nas = NasStore::new(&self.tables)
            .fetch(&mut *tx, nasname)
            .await?
            .ok_or_else(|| DomainError::NasNotFound(nasname.to_string()))?;
        tx.commit().await?;
        Ok(nas)
    }

    pub async fn find(&self, after: Option<&str>) -> DomainResult<Vec<Nas>> {
        let mut tx = self.db.begin().await?;
        let store = NasStore::new(&self.tables);

        let names = store.find_names(&mut *tx, after, self.page_size).await?;
        let mut entries = Vec::with_capacity(names.len());
        for name in &names {
            let nas = store
                .fetch(&mut *tx, name)
                .await?
                .ok_or_else(|| DomainError::Storage(sqlx::Error::RowNotFound))?;
            entries.push(nas);
        }
        tx.commit().await?;
        Ok(entries)
    }

    pub async fn create(&self, nas: &Nas) -> DomainResult<Nas> {
        nas.validate()?;

        let mut tx = self.db.begin().await?;
        let store = NasStore::new(&self.tables);

        if store.exists(&mut *tx, &nas.nasname).await? {
            return Err(DomainError::NasAlreadyExists(nas.nasname.clone()));
        }

        store.insert(&mut *tx, nas).await?;
        tx.commit().await?;

        tracing::debug!(nasname = %nas.nasname, "NAS created");
        Ok(nas.clone())
    }

    /// Replace only the fields present in the patch; null fields are no-ops.
    pub async fn update(&self, nasname: &str, patch: &NasPatch) -> DomainResult<Nas> {
        patch.validate()?;

        let mut tx = self.db.begin().await?;
        let store = NasStore::new(&self.tables);

        if !store.exists(&mut *tx, nasname).await? {
            return Err(DomainError::NasNotFound(nasname.to_string()));
        }

        store
            .set(
                &mut *tx,
                nasname,
                patch.shortname.as_deref(),
                patch.secret.as_deref(),
            )
            .await?;

        let updated = store
            .fetch(&mut *tx, nasname)
            .await?
            .ok_or_else(|| DomainError::NasNotFound(nasname.to_string()))?;
        tx.commit().await?;

        tracing::debug!(nasname, "NAS updated");
        Ok(updated)
    }

    pub async fn delete(&self, nasname: &str) -> DomainResult<()> {
        let mut tx = self.db.begin().await?;
        let store = NasStore::new(&self.tables);

        if !store.exists(&mut *tx, nasname).await? {
            return Err(DomainError::NasNotFound(nasname.to_string()));
        }

        store.delete(&mut *tx, nasname).await?;
        tx.commit().await?;

        tracing::debug!(nasname, "NAS deleted");
        Ok(())
    }
}
