use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

//
// The models implement the domain's aggregate view; it is NOT a one-to-one
// mapping with the database tables. The association between User and Group is
// one underlying row seen from two directions, so it appears as two types.
//
// Structural validation (non-empty strings, priorities, duplicate
// memberships) lives here and runs at the transport boundary, before any
// service logic or query.
//

/// One attribute row: `attribute op value`, e.g. `Framed-IP-Address := 10.0.0.1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOpValue {
    pub attribute: String,
    pub op: String,
    pub value: String,
}

impl AttributeOpValue {
    pub fn new(
        attribute: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            op: op.into(),
            value: value.into(),
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if self.attribute.is_empty() {
            return Err(DomainError::EmptyField("attribute"));
        }
        if self.op.is_empty() {
            return Err(DomainError::EmptyField("op"));
        }
        if self.value.is_empty() {
            return Err(DomainError::EmptyField("value"));
        }
        Ok(())
    }
}

fn default_priority() -> i64 {
    1
}

/// A user's membership in a group, seen from the user side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub groupname: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

impl UserGroup {
    pub fn new(groupname: impl Into<String>) -> Self {
        Self {
            groupname: groupname.into(),
            priority: 1,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if self.groupname.is_empty() {
            return Err(DomainError::EmptyField("groupname"));
        }
        if self.priority < 1 {
            return Err(DomainError::InvalidPriority);
        }
        Ok(())
    }
}

/// The same membership row, seen from the group side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUser {
    pub username: String,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

impl GroupUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            priority: 1,
        }
    }

    fn validate(&self) -> DomainResult<()> {
        if self.username.is_empty() {
            return Err(DomainError::EmptyField("username"));
        }
        if self.priority < 1 {
            return Err(DomainError::InvalidPriority);
        }
        Ok(())
    }
}

/// A RADIUS user: check/reply attributes plus group memberships, assembled
/// from up to three tables. The user exists iff at least one owned row does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub checks: Vec<AttributeOpValue>,
    #[serde(default)]
    pub replies: Vec<AttributeOpValue>,
    #[serde(default)]
    pub groups: Vec<UserGroup>,
}

impl User {
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.is_empty() {
            return Err(DomainError::EmptyField("username"));
        }
        for avp in self.checks.iter().chain(&self.replies) {
            avp.validate()?;
        }
        for group in &self.groups {
            group.validate()?;
        }
        if self.checks.is_empty() && self.replies.is_empty() && self.groups.is_empty() {
            return Err(DomainError::WouldHaveNoAttributes);
        }
        if has_duplicates(self.groups.iter().map(|g| g.groupname.as_str())) {
            return Err(DomainError::DuplicateMembership);
        }
        Ok(())
    }
}

/// A RADIUS group, mirroring [`User`]: attributes plus member users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub groupname: String,
    #[serde(default)]
    pub checks: Vec<AttributeOpValue>,
    #[serde(default)]
    pub replies: Vec<AttributeOpValue>,
    #[serde(default)]
    pub users: Vec<GroupUser>,
}

impl Group {
    pub fn validate(&self) -> DomainResult<()> {
        if self.groupname.is_empty() {
            return Err(DomainError::EmptyField("groupname"));
        }
        for avp in self.checks.iter().chain(&self.replies) {
            avp.validate()?;
        }
        for user in &self.users {
            user.validate()?;
        }
        if self.checks.is_empty() && self.replies.is_empty() && self.users.is_empty() {
            return Err(DomainError::WouldHaveNoAttributes);
        }
        if has_duplicates(self.users.iter().map(|u| u.username.as_str())) {
            return Err(DomainError::DuplicateMembership);
        }
        Ok(())
    }
}

/// An access-point credential row. Unlike users and groups, this is a plain
/// single-table record keyed by `nasname`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nas {
    pub nasname: String,
    pub shortname: String,
    pub secret: String,
}

impl Nas {
    pub fn validate(&self) -> DomainResult<()> {
        if self.nasname.is_empty() {
            return Err(DomainError::EmptyField("nasname"));
        }
        if self.shortname.is_empty() {
            return Err(DomainError::EmptyField("shortname"));
        }
        if self.secret.is_empty() {
            return Err(DomainError::EmptyField("secret"));
        }
        Ok(())
    }
}

pub(crate) fn has_duplicates<'a>(names: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checks() -> Vec<AttributeOpValue> {
        vec![AttributeOpValue::new("a", ":=", "b")]
    }

    #[test]
    fn user_needs_at_least_one_attribute_or_group() {
        let user = User {
            username: "u".into(),
            checks: vec![],
            replies: vec![],
            groups: vec![],
        };
        assert!(matches!(
            user.validate(),
            Err(DomainError::WouldHaveNoAttributes)
        ));
    }

    #[test]
    fn user_with_only_a_membership_is_valid() {
        let user = User {
            username: "u".into(),
            checks: vec![],
            replies: vec![],
            groups: vec![UserGroup::new("g")],
        };
        assert!(user.validate().is_ok());
    }

    #[test]
    fn user_rejects_duplicate_groups() {
        let user = User {
            username: "u".into(),
            checks: checks(),
            replies: vec![],
            groups: vec![UserGroup::new("not-unique"), UserGroup::new("not-unique")],
        };
        assert!(matches!(
            user.validate(),
            Err(DomainError::DuplicateMembership)
        ));
    }

    #[test]
    fn user_rejects_empty_username_and_bad_priority() {
        let user = User {
            username: "".into(),
            checks: checks(),
            replies: vec![],
            groups: vec![],
        };
        assert!(matches!(user.validate(), Err(DomainError::EmptyField(_))));

        let user = User {
            username: "u".into(),
            checks: vec![],
            replies: vec![],
            groups: vec![UserGroup {
                groupname: "g".into(),
                priority: 0,
            }],
        };
        assert!(matches!(user.validate(), Err(DomainError::InvalidPriority)));
    }

    #[test]
    fn group_rejects_duplicate_users() {
        let group = Group {
            groupname: "g".into(),
            checks: checks(),
            replies: vec![],
            users: vec![GroupUser::new("not-unique"), GroupUser::new("not-unique")],
        };
        assert!(matches!(
            group.validate(),
            Err(DomainError::DuplicateMembership)
        ));
    }

    #[test]
    fn nas_rejects_empty_fields() {
        let nas = Nas {
            nasname: "5.5.5.5".into(),
            shortname: "".into(),
            secret: "s".into(),
        };
        assert!(matches!(
            nas.validate(),
            Err(DomainError::EmptyField("shortname"))
        ));
    }

    #[test]
    fn membership_defaults_priority_to_one() {
        let m: UserGroup = serde_json::from_str(r#"{"groupname": "g"}"#).unwrap();
        assert_eq!(m.priority, 1);
    }
}
