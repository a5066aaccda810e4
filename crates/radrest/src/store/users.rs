use sqlx::{Row, SqliteConnection};

use crate::model::{AttributeOpValue, User, UserGroup};
use crate::tables::Tables;

/// Row access for users, whose state is scattered across the radcheck,
/// radreply and radusergroup tables.
pub struct UserStore<'a> {
    tables: &'a Tables,
}

impl<'a> UserStore<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    /// Derived existence: a user exists iff any of its tables holds a row for
    /// the name. Never cached; always recomputed inside the caller's
    /// transaction.
    pub async fn exists(&self, conn: &mut SqliteConnection, username: &str) -> sqlx::Result<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {radcheck} WHERE username = ?1)
                 OR EXISTS (SELECT 1 FROM {radreply} WHERE username = ?1)
                 OR EXISTS (SELECT 1 FROM {radusergroup} WHERE username = ?1)",
            radcheck = self.tables.radcheck,
            radreply = self.tables.radreply,
            radusergroup = self.tables.radusergroup,
        );
        let row = sqlx::query(&sql).bind(username).fetch_one(conn).await?;
        Ok(row.get::<bool, _>(0))
    }

    /// Keyset page of distinct usernames, strictly greater than `after` when
    /// given, in lexicographic order.
    pub async fn find_names(
        &self,
        conn: &mut SqliteConnection,
        after: Option<&str>,
        limit: i64,
    ) -> sqlx::Result<Vec<String>> {
        let union = format!(
            "SELECT DISTINCT username FROM {radcheck}
             UNION SELECT DISTINCT username FROM {radreply}
             UNION SELECT DISTINCT username FROM {radusergroup}",
            radcheck = self.tables.radcheck,
            radreply = self.tables.radreply,
            radusergroup = self.tables.radusergroup,
        );

        let rows = match after {
            Some(after) => {
                let sql = format!(
                    "SELECT username FROM ({union}) u \
                     WHERE username > ?1 ORDER BY username LIMIT ?2"
                );
                sqlx::query(&sql)
                    .bind(after)
                    .bind(limit)
                    .fetch_all(conn)
                    .await?
            }
            None => {
                let sql =
                    format!("SELECT username FROM ({union}) u ORDER BY username LIMIT ?1");
                sqlx::query(&sql).bind(limit).fetch_all(conn).await?
            }
        };

        Ok(rows.iter().map(|r| r.get("username")).collect())
    }

    /// Assemble the aggregate from its scattered rows, or `None` if no row
    /// exists. Attribute rows come back in insertion order, memberships by
    /// priority.
    pub async fn fetch(
        &self,
        conn: &mut SqliteConnection,
        username: &str,
    ) -> sqlx::Result<Option<User>> {
        if !self.exists(&mut *conn, username).await? {
            return Ok(None);
        }

        let checks = fetch_avps(&mut *conn, &self.tables.radcheck, "username", username).await?;
        let replies = fetch_avps(&mut *conn, &self.tables.radreply, "username", username).await?;

        let sql = format!(
            "SELECT groupname, priority FROM {} WHERE username = ?1 ORDER BY priority, rowid",
            self.tables.radusergroup
        );
        let groups = sqlx::query(&sql)
            .bind(username)
            .fetch_all(conn)
            .await?
            .iter()
            .map(|r| UserGroup {
                groupname: r.get("groupname"),
                priority: r.get("priority"),
            })
            .collect();

        Ok(Some(User {
            username: username.to_string(),
            checks,
            replies,
            groups,
        }))
    }

    /// One insert per attribute and membership row.
    pub async fn insert_all(&self, conn: &mut SqliteConnection, user: &User) -> sqlx::Result<()> {
        insert_avps(
            &mut *conn,
            &self.tables.radcheck,
            "username",
            &user.username,
            &user.checks,
        )
        .await?;
        insert_avps(
            &mut *conn,
            &self.tables.radreply,
            "username",
            &user.username,
            &user.replies,
        )
        .await?;

        let sql = format!(
            "INSERT INTO {} (username, groupname, priority) VALUES (?1, ?2, ?3)",
            self.tables.radusergroup
        );
        for group in &user.groups {
            sqlx::query(&sql)
                .bind(&user.username)
                .bind(&group.groupname)
                .bind(group.priority)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Per-group replacement: `None` leaves the rows untouched, `Some(rows)`
    /// deletes then reinserts (possibly nothing).
    pub async fn set(
        &self,
        conn: &mut SqliteConnection,
        username: &str,
        new_checks: Option<&[AttributeOpValue]>,
        new_replies: Option<&[AttributeOpValue]>,
        new_groups: Option<&[UserGroup]>,
    ) -> sqlx::Result<()> {
        if let Some(checks) = new_checks {
            delete_rows(&mut *conn, &self.tables.radcheck, "username", username).await?;
            insert_avps(&mut *conn, &self.tables.radcheck, "username", username, checks).await?;
        }

        if let Some(replies) = new_replies {
            delete_rows(&mut *conn, &self.tables.radreply, "username", username).await?;
            insert_avps(&mut *conn, &self.tables.radreply, "username", username, replies).await?;
        }

        if let Some(groups) = new_groups {
            delete_rows(&mut *conn, &self.tables.radusergroup, "username", username).await?;
            let sql = format!(
                "INSERT INTO {} (username, groupname, priority) VALUES (?1, ?2, ?3)",
                self.tables.radusergroup
            );
            for group in groups {
                sqlx::query(&sql)
                    .bind(username)
                    .bind(&group.groupname)
                    .bind(group.priority)
                    .execute(&mut *conn)
                    .await?;
            }
        }
        Ok(())
    }

    /// Delete every row owned by the user. Removing the last membership row
    /// referencing a group may make that group vanish; the service layer is
    /// responsible for deciding whether that is acceptable.
    pub async fn delete_all(&self, conn: &mut SqliteConnection, username: &str) -> sqlx::Result<()> {
        delete_rows(&mut *conn, &self.tables.radcheck, "username", username).await?;
        delete_rows(&mut *conn, &self.tables.radreply, "username", username).await?;
        delete_rows(&mut *conn, &self.tables.radusergroup, "username", username).await?;
        Ok(())
    }
}

pub(super) async fn fetch_avps(
    conn: &mut SqliteConnection,
    table: &str,
    key_column: &str,
    key: &str,
) -> sqlx::Result<Vec<AttributeOpValue>> {
    let sql =
        format!("SELECT attribute, op, value FROM {table} WHERE {key_column} = ?1 ORDER BY id");
    let rows = sqlx::query(&sql).bind(key).fetch_all(conn).await?;
    Ok(rows
        .iter()
        .map(|r| AttributeOpValue {
            attribute: r.get("attribute"),
            op: r.get("op"),
            value: r.get("value"),
        })
        .collect())
}

pub(super) async fn insert_avps(
    conn: &mut SqliteConnection,
    table: &str,
    key_column: &str,
    key: &str,
    avps: &[AttributeOpValue],
) -> sqlx::Result<()> {
    let sql = format!(
        "INSERT INTO {table} ({key_column}, attribute, op, value) VALUES (?1, ?2, ?3, ?4)"
    );
    for avp in avps {
        sqlx::query(&sql)
            .bind(key)
            .bind(&avp.attribute)
            .bind(&avp.op)
            .bind(&avp.value)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

pub(super) async fn delete_rows(
    conn: &mut SqliteConnection,
    table: &str,
    key_column: &str,
    key: &str,
) -> sqlx::Result<()> {
    let sql = format!("DELETE FROM {table} WHERE {key_column} = ?1");
    sqlx::query(&sql).bind(key).execute(conn).await?;
    Ok(())
}
