// Each test binary compiles its own copy and uses a different subset.
#![allow(dead_code)]

use std::sync::Arc;

use radrest::{
    AttributeOpValue, Database, Group, GroupService, Nas, NasService, Tables, User, UserService,
};

/// Fresh in-memory database with all three services wired against it.
pub async fn services() -> (UserService, GroupService, NasService) {
    services_with_page_size(radrest::DEFAULT_PAGE_SIZE).await
}

pub async fn services_with_page_size(page_size: i64) -> (UserService, GroupService, NasService) {
    let db = Database::memory().await.expect("in-memory database");
    let tables = Arc::new(Tables::default());
    (
        UserService::new(db.clone(), tables.clone(), page_size),
        GroupService::new(db.clone(), tables.clone(), page_size),
        NasService::new(db, tables, page_size),
    )
}

pub fn checks() -> Vec<AttributeOpValue> {
    vec![AttributeOpValue::new("Cleartext-Password", ":=", "my-pass")]
}

pub fn replies() -> Vec<AttributeOpValue> {
    vec![
        AttributeOpValue::new("Framed-IP-Address", ":=", "10.0.0.1"),
        AttributeOpValue::new("Framed-Route", "+=", "192.168.1.0/24"),
    ]
}

pub fn user(username: &str) -> User {
    User {
        username: username.into(),
        checks: checks(),
        replies: replies(),
        groups: vec![],
    }
}

pub fn group(groupname: &str) -> Group {
    Group {
        groupname: groupname.into(),
        checks: vec![AttributeOpValue::new("Auth-Type", ":=", "Accept")],
        replies: vec![],
        users: vec![],
    }
}

pub fn nas(nasname: &str) -> Nas {
    Nas {
        nasname: nasname.into(),
        shortname: "my-nas".into(),
        secret: "my-secret".into(),
    }
}
