use std::sync::Arc;

use crate::db::Database;
use crate::error::{DomainError, DomainResult};
use crate::model::Group;
use crate::patch::GroupPatch;
use crate::store::{GroupStore, UserStore};
use crate::tables::Tables;

/// Decision logic for groups, the mirror image of
/// [`crate::service::UserService`] across the membership relation.
#[derive(Clone)]
pub struct GroupService {
    db: Database,
    tables: Arc<Tables>,
    page_size: i64,
}

impl GroupService {
    pub fn new(db: Database, tables: Arc<Tables>, page_size: i64) -> Self {
        Self {
            db,
            tables,
            page_size,
        }
    }

    pub async fn get(&self, groupname: &str) -> DomainResult<Group> {
        let mut tx = self.db.begin().await?;
        let group = GroupStore::new(&self.tables)
            .fetch(&mut *tx, groupname)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(groupname.to_string()))?;
        tx.commit().await?;
        Ok(group)
    }

    pub async fn find(&self, after: Option<&str>) -> DomainResult<Vec<Group>> {
        let mut tx = self.db.begin().await?;
        let store = GroupStore::new(&self.tables);

        let names = store.find_names(&mut *tx, after, self.page_size).await?;
        let mut groups = Vec::with_capacity(names.len());
        for name in &names {
            let group = store
                .fetch(&mut *tx, name)
                .await?
                .ok_or_else(|| DomainError::Storage(sqlx::Error::RowNotFound))?;
            groups.push(group);
        }
        tx.commit().await?;
        Ok(groups)
    }

    pub async fn create(&self, group: &Group, allow_users_creation: bool) -> DomainResult<Group> {
        group.validate()?;

        let mut tx = self.db.begin().await?;
        let groups = GroupStore::new(&self.tables);
        let users = UserStore::new(&self.tables);

        if groups.exists(&mut *tx, &group.groupname).await? {
            return Err(DomainError::GroupAlreadyExists(group.groupname.clone()));
        }

        if !allow_users_creation {
            for membership in &group.users {
                if !users.exists(&mut *tx, &membership.username).await? {
                    return Err(DomainError::PeerNotFound {
                        name: membership.username.clone(),
                    });
                }
            }
        }

        groups.insert_all(&mut *tx, group).await?;
        tx.commit().await?;

        tracing::debug!(groupname = %group.groupname, "group created");
        Ok(group.clone())
    }

    /// Delete the group. Refuses while members remain unless `ignore_users`;
    /// with `prevent_users_deletion`, refuses when a member user has no
    /// attributes of its own and would vanish with its last membership row.
    pub async fn delete(
        &self,
        groupname: &str,
        ignore_users: bool,
        prevent_users_deletion: bool,
    ) -> DomainResult<()> {
        let mut tx = self.db.begin().await?;
        let groups = GroupStore::new(&self.tables);
        let users = UserStore::new(&self.tables);

        let group = groups
            .fetch(&mut *tx, groupname)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(groupname.to_string()))?;

        if !group.users.is_empty() && !ignore_users {
            return Err(DomainError::StillHasMembers(groupname.to_string()));
        }

        if prevent_users_deletion {
            for membership in &group.users {
                if let Some(user) = users.fetch(&mut *tx, &membership.username).await? {
                    if user.checks.is_empty() && user.replies.is_empty() {
                        return Err(DomainError::PeerWouldBeDeleted {
                            name: user.username,
                        });
                    }
                }
            }
        }

        groups.delete_all(&mut *tx, groupname).await?;
        tx.commit().await?;

        tracing::debug!(groupname, "group deleted");
        Ok(())
    }

    pub async fn update(
        &self,
        groupname: &str,
        patch: &GroupPatch,
        allow_users_creation: bool,
        prevent_users_deletion: bool,
    ) -> DomainResult<Group> {
        patch.validate()?;

        let mut tx = self.db.begin().await?;
        let groups = GroupStore::new(&self.tables);
        let users = UserStore::new(&self.tables);

        let current = groups
            .fetch(&mut *tx, groupname)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(groupname.to_string()))?;

        if let Some(new_users) = patch.users() {
            if !allow_users_creation {
                for membership in new_users {
                    if !users.exists(&mut *tx, &membership.username).await? {
                        return Err(DomainError::PeerNotFound {
                            name: membership.username.clone(),
                        });
                    }
                }
            }

            if prevent_users_deletion {
                for membership in &current.users {
                    if let Some(user) = users.fetch(&mut *tx, &membership.username).await? {
                        if user.checks.is_empty() && user.replies.is_empty() {
                            return Err(DomainError::PeerWouldBeDeleted {
                                name: user.username,
                            });
                        }
                    }
                }
            }
        }

        let new_checks = patch.checks().unwrap_or(&current.checks);
        let new_replies = patch.replies().unwrap_or(&current.replies);
        let new_users = patch.users().unwrap_or(&current.users);
        if new_checks.is_empty() && new_replies.is_empty() && new_users.is_empty() {
            return Err(DomainError::WouldHaveNoAttributes);
        }

        groups
            .set(
                &mut *tx,
                groupname,
                patch.checks(),
                patch.replies(),
                patch.users(),
            )
            .await?;

        let updated = groups
            .fetch(&mut *tx, groupname)
            .await?
            .ok_or_else(|| DomainError::GroupNotFound(groupname.to_string()))?;
        tx.commit().await?;

        tracing::debug!(groupname, "group updated");
        Ok(updated)
    }
}
