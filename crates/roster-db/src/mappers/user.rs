//! User model -> entity mapper

use roster_core::{DomainError, Role, User, UserId};

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<Role>()
            .map_err(|e| DomainError::DatabaseError(format!("users.id={}: {e}", model.id)))?;

        Ok(User {
            id: UserId::new(model.id),
            name: model.name,
            email: model.email,
            role,
            manager_id: model.manager_id.map(UserId::new),
            is_active: model.is_active,
            location: model.location,
            picture: model.picture,
            date_of_birth: model.date_of_birth,
            joined_date: model.joined_date,
        })
    }
}
