use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::model::{has_duplicates, AttributeOpValue, GroupUser, UserGroup};

//
// Merge-patch parameters, RFC 7396 style, decided per attribute group:
//
//   - field absent from the patch     -> leave that group untouched
//   - field explicitly null           -> clear the group (same as [])
//   - field a non-empty list          -> replace the group wholesale
//
// The absent/null distinction needs a double Option: the outer level is
// "was the key provided at all", the inner level is "was it null".
//

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Partial update of a user. Each field independently follows merge-patch
/// rules; `groups` replacement additionally drives the peer checks in
/// [`crate::service::UserService::update`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub checks: Option<Option<Vec<AttributeOpValue>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub replies: Option<Option<Vec<AttributeOpValue>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub groups: Option<Option<Vec<UserGroup>>>,
}

impl UserPatch {
    /// `None` = key absent; `Some(&[])` = clear (null or empty list).
    pub fn checks(&self) -> Option<&[AttributeOpValue]> {
        flatten(&self.checks)
    }

    pub fn replies(&self) -> Option<&[AttributeOpValue]> {
        flatten(&self.replies)
    }

    pub fn groups(&self) -> Option<&[UserGroup]> {
        flatten(&self.groups)
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_avps(self.checks())?;
        validate_avps(self.replies())?;
        if let Some(groups) = self.groups() {
            for group in groups {
                if group.groupname.is_empty() {
                    return Err(DomainError::EmptyField("groupname"));
                }
                if group.priority < 1 {
                    return Err(DomainError::InvalidPriority);
                }
            }
            if has_duplicates(groups.iter().map(|g| g.groupname.as_str())) {
                return Err(DomainError::DuplicateMembership);
            }
        }
        // A patch clearing every group it names, with nothing else named,
        // cannot produce a live entity whatever the current state is.
        if cleared(self.checks()) && cleared(self.replies()) && cleared(self.groups()) {
            return Err(DomainError::WouldHaveNoAttributes);
        }
        Ok(())
    }
}

/// Partial update of a group, mirroring [`UserPatch`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub checks: Option<Option<Vec<AttributeOpValue>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub replies: Option<Option<Vec<AttributeOpValue>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub users: Option<Option<Vec<GroupUser>>>,
}

impl GroupPatch {
    pub fn checks(&self) -> Option<&[AttributeOpValue]> {
        flatten(&self.checks)
    }

    pub fn replies(&self) -> Option<&[AttributeOpValue]> {
        flatten(&self.replies)
    }

    pub fn users(&self) -> Option<&[GroupUser]> {
        flatten(&self.users)
    }

    pub fn validate(&self) -> DomainResult<()> {
        validate_avps(self.checks())?;
        validate_avps(self.replies())?;
        if let Some(users) = self.users() {
            for user in users {
                if user.username.is_empty() {
                    return Err(DomainError::EmptyField("username"));
                }
                if user.priority < 1 {
                    return Err(DomainError::InvalidPriority);
                }
            }
            if has_duplicates(users.iter().map(|u| u.username.as_str())) {
                return Err(DomainError::DuplicateMembership);
            }
        }
        if cleared(self.checks()) && cleared(self.replies()) && cleared(self.users()) {
            return Err(DomainError::WouldHaveNoAttributes);
        }
        Ok(())
    }
}

/// Partial update of a NAS. There is no "clear" semantic here: a null or
/// absent field is simply left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NasPatch {
    pub shortname: Option<String>,
    pub secret: Option<String>,
}

impl NasPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if self.shortname.as_deref() == Some("") {
            return Err(DomainError::EmptyField("shortname"));
        }
        if self.secret.as_deref() == Some("") {
            return Err(DomainError::EmptyField("secret"));
        }
        Ok(())
    }
}

fn cleared<T>(field: Option<&[T]>) -> bool {
    field.is_some_and(|rows| rows.is_empty())
}

fn flatten<T>(field: &Option<Option<Vec<T>>>) -> Option<&[T]> {
    field
        .as_ref()
        .map(|inner| inner.as_deref().unwrap_or_default())
}

fn validate_avps(avps: Option<&[AttributeOpValue]>) -> DomainResult<()> {
    for avp in avps.unwrap_or_default() {
        if avp.attribute.is_empty() {
            return Err(DomainError::EmptyField("attribute"));
        }
        if avp.op.is_empty() {
            return Err(DomainError::EmptyField("op"));
        }
        if avp.value.is_empty() {
            return Err(DomainError::EmptyField("value"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_field_is_left_untouched() {
        let patch: UserPatch = serde_json::from_str(r#"{"checks": []}"#).unwrap();
        assert_eq!(patch.checks(), Some(&[][..]));
        assert_eq!(patch.replies(), None);
        assert_eq!(patch.groups(), None);
    }

    #[test]
    fn null_and_empty_list_both_mean_clear() {
        let null: UserPatch = serde_json::from_str(r#"{"groups": null}"#).unwrap();
        let empty: UserPatch = serde_json::from_str(r#"{"groups": []}"#).unwrap();
        assert_eq!(null.groups(), Some(&[][..]));
        assert_eq!(null.groups(), empty.groups());
    }

    #[test]
    fn clearing_everything_is_rejected_up_front() {
        let patch: UserPatch =
            serde_json::from_str(r#"{"checks": null, "replies": [], "groups": null}"#).unwrap();
        assert!(matches!(
            patch.validate(),
            Err(DomainError::WouldHaveNoAttributes)
        ));
    }

    #[test]
    fn duplicate_groups_in_patch_are_rejected() {
        let patch: UserPatch = serde_json::from_str(
            r#"{"groups": [{"groupname": "g"}, {"groupname": "g", "priority": 2}]}"#,
        )
        .unwrap();
        assert!(matches!(
            patch.validate(),
            Err(DomainError::DuplicateMembership)
        ));
    }

    #[test]
    fn replacement_list_is_exposed_as_is() {
        let patch: GroupPatch =
            serde_json::from_str(r#"{"users": [{"username": "u", "priority": 3}]}"#).unwrap();
        let users = patch.users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].priority, 3);
    }

    #[test]
    fn nas_patch_null_means_no_op() {
        let patch: NasPatch = serde_json::from_str(r#"{"secret": null}"#).unwrap();
        assert!(patch.secret.is_none());
        assert!(patch.validate().is_ok());

        let patch: NasPatch = serde_json::from_str(r#"{"secret": ""}"#).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<UserPatch>(r#"{"username": "nope"}"#).is_err());
    }
}
