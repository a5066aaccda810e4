mod support;

use radrest::{DomainError, User, UserGroup, UserPatch};
use support::*;

#[tokio::test]
async fn create_then_get_returns_equal_aggregate() {
    let (users, _, _) = services().await;

    let created = users.create(&user("alice"), false).await.unwrap();
    let fetched = users.get("alice").await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.checks, checks());
    assert_eq!(fetched.replies, replies());
}

#[tokio::test]
async fn create_twice_fails_already_exists() {
    let (users, _, _) = services().await;

    users.create(&user("alice"), false).await.unwrap();
    let err = users.create(&user("alice"), false).await.unwrap_err();
    assert!(matches!(err, DomainError::UserAlreadyExists(name) if name == "alice"));
}

#[tokio::test]
async fn get_and_delete_missing_user_fail_not_found() {
    let (users, _, _) = services().await;

    assert!(matches!(
        users.get("ghost").await.unwrap_err(),
        DomainError::UserNotFound(_)
    ));
    assert!(matches!(
        users.delete("ghost", true).await.unwrap_err(),
        DomainError::UserNotFound(_)
    ));
}

#[tokio::test]
async fn delete_then_second_delete_fails_not_found() {
    let (users, _, _) = services().await;

    users.create(&user("alice"), false).await.unwrap();
    users.delete("alice", true).await.unwrap();

    assert!(matches!(
        users.get("alice").await.unwrap_err(),
        DomainError::UserNotFound(_)
    ));
    assert!(matches!(
        users.delete("alice", true).await.unwrap_err(),
        DomainError::UserNotFound(_)
    ));
}

#[tokio::test]
async fn create_with_unknown_group_requires_the_flag() {
    let (users, groups, _) = services().await;

    let mut alice = user("alice");
    alice.groups = vec![UserGroup::new("vpn")];

    let err = users.create(&alice, false).await.unwrap_err();
    assert!(matches!(err, DomainError::PeerNotFound { name } if name == "vpn"));

    // With the flag, the membership row implicitly creates the group: it
    // exists even though it has no attributes of its own.
    users.create(&alice, true).await.unwrap();
    let vpn = groups.get("vpn").await.unwrap();
    assert!(vpn.checks.is_empty() && vpn.replies.is_empty());
    assert_eq!(vpn.users.len(), 1);
    assert_eq!(vpn.users[0].username, "alice");
}

#[tokio::test]
async fn membership_only_user_is_a_valid_creation_source() {
    let (users, groups, _) = services().await;

    groups.create(&group("staff"), false).await.unwrap();

    let bob = User {
        username: "bob".into(),
        checks: vec![],
        replies: vec![],
        groups: vec![UserGroup::new("staff")],
    };
    users.create(&bob, false).await.unwrap();

    let fetched = users.get("bob").await.unwrap();
    assert!(fetched.checks.is_empty() && fetched.replies.is_empty());
    assert_eq!(fetched.groups, vec![UserGroup::new("staff")]);
}

#[tokio::test]
async fn deleting_user_refuses_to_take_attributeless_group_with_it() {
    let (users, groups, _) = services().await;

    let mut alice = user("alice");
    alice.groups = vec![UserGroup::new("vpn")];
    users.create(&alice, true).await.unwrap();

    // "vpn" only exists through alice's membership row.
    let err = users.delete("alice", true).await.unwrap_err();
    assert!(matches!(err, DomainError::PeerWouldBeDeleted { name } if name == "vpn"));
    users.get("alice").await.unwrap();

    // With prevention off the group silently vanishes with its last row.
    users.delete("alice", false).await.unwrap();
    assert!(matches!(
        groups.get("vpn").await.unwrap_err(),
        DomainError::GroupNotFound(_)
    ));
}

#[tokio::test]
async fn deleting_user_succeeds_when_group_has_own_attributes() {
    // Group has one reply attribute, so it is not held alive solely by the
    // membership: deleting the member must succeed and leave the group.
    let (users, groups, _) = services().await;

    let mut g = group("g");
    g.checks = vec![];
    g.replies = vec![radrest::AttributeOpValue::new("Filter-Id", ":=", "10m")];
    groups.create(&g, false).await.unwrap();

    let u = User {
        username: "u".into(),
        checks: vec![],
        replies: vec![],
        groups: vec![UserGroup::new("g")],
    };
    users.create(&u, false).await.unwrap();

    users.delete("u", true).await.unwrap();
    let g = groups.get("g").await.unwrap();
    assert!(g.users.is_empty());
    assert_eq!(g.replies.len(), 1);
}

#[tokio::test]
async fn update_replaces_only_provided_groups() {
    let (users, _, _) = services().await;

    users.create(&user("alice"), false).await.unwrap();

    let patch = UserPatch {
        checks: Some(Some(vec![radrest::AttributeOpValue::new(
            "Cleartext-Password",
            ":=",
            "new-pass",
        )])),
        ..Default::default()
    };
    let updated = users.update("alice", &patch, false, true).await.unwrap();

    assert_eq!(updated.checks[0].value, "new-pass");
    // Replies were absent from the patch and stay untouched.
    assert_eq!(updated.replies, replies());
}

#[tokio::test]
async fn update_with_null_and_empty_list_clear_identically() {
    let (users, _, _) = services().await;

    users.create(&user("a"), false).await.unwrap();
    users.create(&user("b"), false).await.unwrap();

    let null_patch: UserPatch = serde_json::from_str(r#"{"checks": null}"#).unwrap();
    let empty_patch: UserPatch = serde_json::from_str(r#"{"checks": []}"#).unwrap();

    let a = users.update("a", &null_patch, false, true).await.unwrap();
    let b = users.update("b", &empty_patch, false, true).await.unwrap();

    assert!(a.checks.is_empty());
    assert_eq!(a.checks, b.checks);
    assert_eq!(a.replies, b.replies);
}

#[tokio::test]
async fn update_cannot_strip_the_last_attribute_group() {
    let (users, _, _) = services().await;

    let only_checks = User {
        username: "c".into(),
        checks: checks(),
        replies: vec![],
        groups: vec![],
    };
    users.create(&only_checks, false).await.unwrap();

    let patch: UserPatch = serde_json::from_str(r#"{"checks": []}"#).unwrap();
    let err = users.update("c", &patch, false, true).await.unwrap_err();
    assert!(matches!(err, DomainError::WouldHaveNoAttributes));

    // Nothing was applied.
    assert_eq!(users.get("c").await.unwrap().checks, checks());
}

#[tokio::test]
async fn update_checks_new_peers_and_current_cascades() {
    let (users, groups, _) = services().await;

    groups.create(&group("staff"), false).await.unwrap();
    let mut alice = user("alice");
    alice.groups = vec![UserGroup::new("staff")];
    users.create(&alice, false).await.unwrap();

    // New peer missing and creation disallowed.
    let patch = UserPatch {
        groups: Some(Some(vec![UserGroup::new("missing")])),
        ..Default::default()
    };
    let err = users.update("alice", &patch, false, true).await.unwrap_err();
    assert!(matches!(err, DomainError::PeerNotFound { name } if name == "missing"));

    // Same patch with creation allowed replaces the membership wholesale.
    let updated = users.update("alice", &patch, true, false).await.unwrap();
    assert_eq!(updated.groups, vec![UserGroup::new("missing")]);
    assert!(groups.get("missing").await.is_ok());
}

#[tokio::test]
async fn update_refuses_to_orphan_attributeless_current_peer() {
    let (users, _, _) = services().await;

    let mut alice = user("alice");
    alice.groups = vec![UserGroup::new("vpn")];
    users.create(&alice, true).await.unwrap();

    // Replacing the membership list would drop vpn's only row.
    let patch: UserPatch = serde_json::from_str(r#"{"groups": []}"#).unwrap();
    let err = users.update("alice", &patch, false, true).await.unwrap_err();
    assert!(matches!(err, DomainError::PeerWouldBeDeleted { name } if name == "vpn"));

    // Patches not touching the membership list skip the cascade check.
    let patch = UserPatch {
        checks: Some(Some(checks())),
        ..Default::default()
    };
    users.update("alice", &patch, false, true).await.unwrap();
}

#[tokio::test]
async fn update_preserves_membership_priority_order() {
    let (users, groups, _) = services().await;

    groups.create(&group("g1"), false).await.unwrap();
    groups.create(&group("g2"), false).await.unwrap();

    users.create(&user("alice"), false).await.unwrap();
    let patch = UserPatch {
        groups: Some(Some(vec![
            UserGroup {
                groupname: "g2".into(),
                priority: 2,
            },
            UserGroup {
                groupname: "g1".into(),
                priority: 1,
            },
        ])),
        ..Default::default()
    };
    let updated = users.update("alice", &patch, false, true).await.unwrap();

    let names: Vec<_> = updated.groups.iter().map(|g| g.groupname.as_str()).collect();
    assert_eq!(names, ["g1", "g2"]);
}
