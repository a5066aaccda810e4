use std::sync::Arc;

use crate::db::Database;
use crate::error::{DomainError, DomainResult};
use crate::model::User;
use crate::patch::UserPatch;
use crate::store::{GroupStore, UserStore};
use crate::tables::Tables;

/// Decision logic for users. Depends on the group store to validate and
/// cascade across the membership relation.
#[derive(Clone)]
pub struct UserService {
    db: Database,
    tables: Arc<Tables>,
    page_size: i64,
}

impl UserService {
    pub fn new(db: Database, tables: Arc<Tables>, page_size: i64) -> Self {
        Self {
            db,
            tables,
            page_size,
        }
    }

    pub async fn get(&self, username: &str) -> DomainResult<User> {
        let mut tx = self.db.begin().await?;
        let user = UserStore::new(&self.tables)
            .fetch(&mut *tx, username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;
        tx.commit().await?;
        Ok(user)
    }

    /// One keyset page of users, names strictly greater than `after`.
    pub async fn find(&self, after: Option<&str>) -> DomainResult<Vec<User>> {
        let mut tx = self.db.begin().await?;
        let store = UserStore::new(&self.tables);

        let names = store.find_names(&mut *tx, after, self.page_size).await?;
        let mut users = Vec::with_capacity(names.len());
        for name in &names {
            // A name that came back from the scan always has rows; treat a
            // miss as a storage inconsistency rather than skipping silently.
            let user = store
                .fetch(&mut *tx, name)
                .await?
                .ok_or_else(|| DomainError::Storage(sqlx::Error::RowNotFound))?;
            users.push(user);
        }
        tx.commit().await?;
        Ok(users)
    }

    pub async fn create(&self, user: &User, allow_groups_creation: bool) -> DomainResult<User> {
        user.validate()?;

        let mut tx = self.db.begin().await?;
        let users = UserStore::new(&self.tables);
        let groups = GroupStore::new(&self.tables);

        if users.exists(&mut *tx, &user.username).await? {
            return Err(DomainError::UserAlreadyExists(user.username.clone()));
        }

        if !allow_groups_creation {
            for membership in &user.groups {
                if !groups.exists(&mut *tx, &membership.groupname).await? {
                    return Err(DomainError::PeerNotFound {
                        name: membership.groupname.clone(),
                    });
                }
            }
        }

        users.insert_all(&mut *tx, user).await?;
        tx.commit().await?;

        tracing::debug!(username = %user.username, "user created");
        Ok(user.clone())
    }

    /// Delete the user and every row it owns. With `prevent_groups_deletion`,
    /// refuse when any of its groups has no attributes of its own, since
    /// removing the membership would make that group vanish. With the flag off the
    /// vanishing is allowed and not separately reported.
    pub async fn delete(&self, username: &str, prevent_groups_deletion: bool) -> DomainResult<()> {
        let mut tx = self.db.begin().await?;
        let users = UserStore::new(&self.tables);
        let groups = GroupStore::new(&self.tables);

        let user = users
            .fetch(&mut *tx, username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        if prevent_groups_deletion {
            for membership in &user.groups {
                if let Some(group) = groups.fetch(&mut *tx, &membership.groupname).await? {
                    if group.checks.is_empty() && group.replies.is_empty() {
                        return Err(DomainError::PeerWouldBeDeleted {
                            name: group.groupname,
                        });
                    }
                }
            }
        }

        users.delete_all(&mut *tx, username).await?;
        tx.commit().await?;

        tracing::debug!(username, "user deleted");
        Ok(())
    }

    /// Merge-patch update. Validation order: existence, new-peer existence,
    /// cascade-safety of current peers, then the no-attributes-left check on
    /// the resulting union; only then are rows replaced.
    pub async fn update(
        &self,
        username: &str,
        patch: &UserPatch,
        allow_groups_creation: bool,
        prevent_groups_deletion: bool,
    ) -> DomainResult<User> {
        patch.validate()?;

        let mut tx = self.db.begin().await?;
        let users = UserStore::new(&self.tables);
        let groups = GroupStore::new(&self.tables);

        let current = users
            .fetch(&mut *tx, username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        if let Some(new_groups) = patch.groups() {
            if !allow_groups_creation {
                for membership in new_groups {
                    if !groups.exists(&mut *tx, &membership.groupname).await? {
                        return Err(DomainError::PeerNotFound {
                            name: membership.groupname.clone(),
                        });
                    }
                }
            }

            // Replacing the membership list (even with an empty one) drops
            // the current rows. Any current group whose only reason to exist
            // is this membership would vanish with them.
            if prevent_groups_deletion {
                for membership in &current.groups {
                    if let Some(group) = groups.fetch(&mut *tx, &membership.groupname).await? {
                        if group.checks.is_empty() && group.replies.is_empty() {
                            return Err(DomainError::PeerWouldBeDeleted {
                                name: group.groupname,
                            });
                        }
                    }
                }
            }
        }

        let new_checks = patch.checks().unwrap_or(&current.checks);
        let new_replies = patch.replies().unwrap_or(&current.replies);
        let new_groups = patch.groups().unwrap_or(&current.groups);
        if new_checks.is_empty() && new_replies.is_empty() && new_groups.is_empty() {
            return Err(DomainError::WouldHaveNoAttributes);
        }

        users
            .set(
                &mut *tx,
                username,
                patch.checks(),
                patch.replies(),
                patch.groups(),
            )
            .await?;

        let updated = users
            .fetch(&mut *tx, username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;
        tx.commit().await?;

        tracing::debug!(username, "user updated");
        Ok(updated)
    }
}
