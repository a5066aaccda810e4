use sqlx::{Row, SqliteConnection};

use super::users::{delete_rows, fetch_avps, insert_avps};
use crate::model::{AttributeOpValue, Group, GroupUser};
use crate::tables::Tables;

/// Row access for groups: radgroupcheck, radgroupreply and the membership
/// table viewed from the group side.
pub struct GroupStore<'a> {
    tables: &'a Tables,
}

impl<'a> GroupStore<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    /// A group exists iff it has any check, reply or membership row.
    pub async fn exists(&self, conn: &mut SqliteConnection, groupname: &str) -> sqlx::Result<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {radgroupcheck} WHERE groupname = ?1)
                 OR EXISTS (SELECT 1 FROM {radgroupreply} WHERE groupname = ?1)
                 OR EXISTS (SELECT 1 FROM {radusergroup} WHERE groupname = ?1)",
            radgroupcheck = self.tables.radgroupcheck,
            radgroupreply = self.tables.radgroupreply,
            radusergroup = self.tables.radusergroup,
        );
        let row = sqlx::query(&sql).bind(groupname).fetch_one(conn).await?;
        Ok(row.get::<bool, _>(0))
    }

    pub async fn find_names(
        &self,
        conn: &mut SqliteConnection,
        after: Option<&str>,
        limit: i64,
    ) -> sqlx::Result<Vec<String>> {
        let union = format!(
            "SELECT DISTINCT groupname FROM {radgroupcheck}
             UNION SELECT DISTINCT groupname FROM {radgroupreply}
             UNION SELECT DISTINCT groupname FROM {radusergroup}",
            radgroupcheck = self.tables.radgroupcheck,
            radgroupreply = self.tables.radgroupreply,
            radusergroup = self.tables.radusergroup,
        );

        let rows = match after {
            Some(after) => {
                let sql = format!(
                    "SELECT groupname FROM ({union}) g \
                     WHERE groupname > ?1 ORDER BY groupname LIMIT ?2"
                );
                sqlx::query(&sql)
                    .bind(after)
                    .bind(limit)
                    .fetch_all(conn)
                    .await?
            }
            None => {
                let sql =
                    format!("SELECT groupname FROM ({union}) g ORDER BY groupname LIMIT ?1");
                sqlx::query(&sql).bind(limit).fetch_all(conn).await?
            }
        };

        Ok(rows.iter().map(|r| r.get("groupname")).collect())
    }

    pub async fn fetch(
        &self,
        conn: &mut SqliteConnection,
        groupname: &str,
    ) -> sqlx::Result<Option<Group>> {
        if !self.exists(&mut *conn, groupname).await? {
            return Ok(None);
        }

        let checks =
            fetch_avps(&mut *conn, &self.tables.radgroupcheck, "groupname", groupname).await?;
        let replies =
            fetch_avps(&mut *conn, &self.tables.radgroupreply, "groupname", groupname).await?;

        let sql = format!(
            "SELECT username, priority FROM {} WHERE groupname = ?1 ORDER BY priority, rowid",
            self.tables.radusergroup
        );
        let users = sqlx::query(&sql)
            .bind(groupname)
            .fetch_all(conn)
            .await?
            .iter()
            .map(|r| GroupUser {
                username: r.get("username"),
                priority: r.get("priority"),
            })
            .collect();

        Ok(Some(Group {
            groupname: groupname.to_string(),
            checks,
            replies,
            users,
        }))
    }

    pub async fn insert_all(&self, conn: &mut SqliteConnection, group: &Group) -> sqlx::Result<()> {
        insert_avps(
            &mut *conn,
            &self.tables.radgroupcheck,
            "groupname",
            &group.groupname,
            &group.checks,
        )
        .await?;
        insert_avps(
            &mut *conn,
            &self.tables.radgroupreply,
            "groupname",
            &group.groupname,
            &group.replies,
        )
        .await?;

        let sql = format!(
            "INSERT INTO {} (groupname, username, priority) VALUES (?1, ?2, ?3)",
            self.tables.radusergroup
        );
        for user in &group.users {
            sqlx::query(&sql)
                .bind(&group.groupname)
                .bind(&user.username)
                .bind(user.priority)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    pub async fn set(
        &self,
        conn: &mut SqliteConnection,
        groupname: &str,
        new_checks: Option<&[AttributeOpValue]>,
        new_replies: Option<&[AttributeOpValue]>,
        new_users: Option<&[GroupUser]>,
    ) -> sqlx::Result<()> {
        if let Some(checks) = new_checks {
            delete_rows(&mut *conn, &self.tables.radgroupcheck, "groupname", groupname).await?;
            insert_avps(
                &mut *conn,
                &self.tables.radgroupcheck,
                "groupname",
                groupname,
                checks,
            )
            .await?;
        }

        if let Some(replies) = new_replies {
            delete_rows(&mut *conn, &self.tables.radgroupreply, "groupname", groupname).await?;
            insert_avps(
                &mut *conn,
                &self.tables.radgroupreply,
                "groupname",
                groupname,
                replies,
            )
            .await?;
        }

        if let Some(users) = new_users {
            delete_rows(&mut *conn, &self.tables.radusergroup, "groupname", groupname).await?;
            let sql = format!(
                "INSERT INTO {} (groupname, username, priority) VALUES (?1, ?2, ?3)",
                self.tables.radusergroup
            );
            for user in users {
                sqlx::query(&sql)
                    .bind(groupname)
                    .bind(&user.username)
                    .bind(user.priority)
                    .execute(&mut *conn)
                    .await?;
            }
        }
        Ok(())
    }

    /// Delete every row owned by the group, memberships included. A member
    /// user whose only row was this membership vanishes with it.
    pub async fn delete_all(
        &self,
        conn: &mut SqliteConnection,
        groupname: &str,
    ) -> sqlx::Result<()> {
        delete_rows(&mut *conn, &self.tables.radgroupcheck, "groupname", groupname).await?;
        delete_rows(&mut *conn, &self.tables.radgroupreply, "groupname", groupname).await?;
        delete_rows(&mut *conn, &self.tables.radusergroup, "groupname", groupname).await?;
        Ok(())
    }
}
