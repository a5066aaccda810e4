mod support;

use radrest::{AttributeOpValue, User, UserGroup};
use support::*;

/// Users deliberately spread across the three owning tables: some have only
/// checks, some only replies, some only memberships. The name scan must see
/// them all exactly once.
#[tokio::test]
async fn user_pages_cover_the_full_set_without_gaps_or_duplicates() {
    let (users, groups, _) = services_with_page_size(10).await;

    groups.create(&group("g"), false).await.unwrap();

    let mut expected = Vec::new();
    for i in 0..25 {
        let name = format!("user-{i:03}");
        let user = match i % 3 {
            0 => User {
                username: name.clone(),
                checks: checks(),
                replies: vec![],
                groups: vec![],
            },
            1 => User {
                username: name.clone(),
                checks: vec![],
                replies: replies(),
                groups: vec![],
            },
            _ => User {
                username: name.clone(),
                checks: vec![],
                replies: vec![],
                groups: vec![UserGroup::new("g")],
            },
        };
        users.create(&user, false).await.unwrap();
        expected.push(name);
    }
    expected.sort();

    let mut seen = Vec::new();
    let mut after: Option<String> = None;
    loop {
        let page = users.find(after.as_deref()).await.unwrap();
        if page.is_empty() {
            break;
        }
        assert!(page.len() <= 10);
        for user in &page {
            if let Some(last) = seen.last() {
                assert!(&user.username > last, "names must be strictly ascending");
            }
            if let Some(after) = &after {
                assert!(&user.username > after);
            }
            seen.push(user.username.clone());
        }
        after = seen.last().cloned();
    }

    assert_eq!(seen, expected);
}

#[tokio::test]
async fn page_resumes_strictly_after_the_cursor() {
    let (users, _, _) = services_with_page_size(2).await;

    for name in ["a", "b", "c", "d"] {
        users
            .create(
                &User {
                    username: name.into(),
                    checks: vec![AttributeOpValue::new("a", ":=", "b")],
                    replies: vec![],
                    groups: vec![],
                },
                false,
            )
            .await
            .unwrap();
    }

    let first = users.find(None).await.unwrap();
    let names: Vec<_> = first.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["a", "b"]);

    let second = users.find(Some("b")).await.unwrap();
    let names: Vec<_> = second.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, ["c", "d"]);

    assert!(users.find(Some("d")).await.unwrap().is_empty());
}

#[tokio::test]
async fn nas_pages_follow_the_same_cursor_rules() {
    let (_, _, nases) = services_with_page_size(2).await;

    for name in ["10.0.0.1", "10.0.0.2", "10.0.0.3"] {
        nases.create(&nas(name)).await.unwrap();
    }

    let first = nases.find(None).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].nasname, "10.0.0.1");

    let rest = nases.find(Some(&first[1].nasname)).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].nasname, "10.0.0.3");
}

#[tokio::test]
async fn group_pages_are_ordered_and_distinct() {
    let (users, groups, _) = services_with_page_size(10).await;

    // One group reached from two tables at once: attributes and memberships.
    groups.create(&group("both"), false).await.unwrap();
    let mut member = user("m");
    member.groups = vec![UserGroup::new("both")];
    users.create(&member, false).await.unwrap();
    groups.create(&group("attrs-only"), false).await.unwrap();

    let page = groups.find(None).await.unwrap();
    let names: Vec<_> = page.iter().map(|g| g.groupname.as_str()).collect();
    assert_eq!(names, ["attrs-only", "both"]);
}
