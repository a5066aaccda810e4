use sqlx::{Row, SqliteConnection};

use crate::model::Nas;
use crate::tables::Tables;

/// Row access for NAS entries. Unlike users and groups this is a single flat
/// table keyed by nasname, so existence is an ordinary row probe.
pub struct NasStore<'a> {
    tables: &'a Tables,
}

impl<'a> NasStore<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    pub async fn exists(&self, conn: &mut SqliteConnection, nasname: &str) -> sqlx::Result<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE nasname = ?1)",
            self.tables.nas
        );
        let row = sqlx::query(&sql).bind(nasname).fetch_one(conn).await?;
        Ok(row.get::<bool, _>(0))
    }

    pub async fn find_names(
        &self,
        conn: &mut SqliteConnection,
        after: Option<&str>,
        limit: i64,
    ) -> sqlx::Result<Vec<String>> {
        let rows = match after {
            Some(after) => {
                let sql = format!(
                    "SELECT nasname FROM {} WHERE nasname > ?1 ORDER BY nasname LIMIT ?2",
                    self.tables.nas
                );
                sqlx::query(&sql)
                    .bind(after)
                    .bind(limit)
                    .fetch_all(conn)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT nasname FROM {} ORDER BY nasname LIMIT ?1",
                    self.tables.nas
                );
                sqlx::query(&sql).bind(limit).fetch_all(conn).await?
            }
        };

        Ok(rows.iter().map(|r| r.get("nasname")).collect())
    }

    pub async fn fetch(
        &self,
        conn: &mut SqliteConnection,
        nasname: &str,
    ) -> sqlx::Result<Option<Nas>> {
        let sql = format!(
            "SELECT nasname, shortname, secret FROM {} WHERE nasname = ?1",
            self.tables.nas
        );
        let row = sqlx::query(&sql).bind(nasname).fetch_optional(conn).await?;
        Ok(row.map(|r| Nas {
            nasname: r.get("nasname"),
            shortname: r.get("shortname"),
            secret: r.get("secret"),
        }))
    }

    pub async fn insert(&self, conn: &mut SqliteConnection, nas: &Nas) -> sqlx::Result<()> {
        let sql = format!(
            "INSERT INTO {} (nasname, shortname, secret) VALUES (?1, ?2, ?3)",
            self.tables.nas
        );
        sqlx::query(&sql)
            .bind(&nas.nasname)
            .bind(&nas.shortname)
            .bind(&nas.secret)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Partial update: only the provided fields are touched.
    pub async fn set(
        &self,
        conn: &mut SqliteConnection,
        nasname: &str,
        new_shortname: Option<&str>,
        new_secret: Option<&str>,
    ) -> sqlx::Result<()> {
        if let Some(shortname) = new_shortname {
            let sql = format!(
                "UPDATE {} SET shortname = ?1 WHERE nasname = ?2",
                self.tables.nas
            );
            sqlx::query(&sql)
                .bind(shortname)
                .bind(nasname)
                .execute(&mut *conn)
                .await?;
        }

        if let Some(secret) = new_secret {
            let sql = format!(
                "UPDATE {} SET secret = ?1 WHERE nasname = ?2",
                self.tables.nas
            );
            sqlx::query(&sql)
                .bind(secret)
                .bind(nasname)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    pub async fn delete(&self, conn: &mut SqliteConnection, nasname: &str) -> sqlx::Result<()> {
        let sql = format!("DELETE FROM {} WHERE nasname = ?1", self.tables.nas);
        sqlx::query(&sql).bind(nasname).execute(conn).await?;
        Ok(())
    }
}
