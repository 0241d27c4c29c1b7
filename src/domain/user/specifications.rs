use crate::domain::user::{entity::User, value_objects::UserId};

pub trait ProfileSpecification {
    fn is_satisfied_by(&self, target: &User) -> bool;
}

/// A user may view and edit their own profile; superusers may edit any.
pub struct CanEditProfile {
    pub actor_id: UserId,
    pub actor_is_superuser: bool,
}

impl ProfileSpecification for CanEditProfile {
    fn is_satisfied_by(&self, target: &User) -> bool {
        self.actor_is_superuser || self.actor_id == target.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::value_objects::{PasswordHash, PersonName, Username};
    use chrono::Utc;

    fn user(id: i64) -> User {
        User {
            id: UserId::new(id).unwrap(),
            username: Username::new(format!("user{id}")).unwrap(),
            password_hash: PasswordHash::new("hash").unwrap(),
            first_name: PersonName::default(),
            last_name: PersonName::default(),
            is_superuser: false,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_may_edit() {
        let spec = CanEditProfile {
            actor_id: UserId(7),
            actor_is_superuser: false,
        };
        assert!(spec.is_satisfied_by(&user(7)));
    }

    #[test]
    fn other_users_may_not_edit() {
        let spec = CanEditProfile {
            actor_id: UserId(8),
            actor_is_superuser: false,
        };
        assert!(!spec.is_satisfied_by(&user(7)));
    }

    #[test]
    fn superuser_may_edit_anyone() {
        let spec = CanEditProfile {
            actor_id: UserId(1),
            actor_is_superuser: true,
        };
        assert!(spec.is_satisfied_by(&user(7)));
    }
}
