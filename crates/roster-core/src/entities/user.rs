//! User entity - an employee account

use chrono::NaiveDate;

use crate::value_objects::{Role, UserId};

/// Employee account with its role and manager link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub manager_id: Option<UserId>,
    pub is_active: bool,
    pub location: Option<String>,
    pub picture: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub joined_date: Option<NaiveDate>,
}

impl User {
    /// Create an active user with no manager and an empty profile
    pub fn new(id: UserId, name: String, email: String, role: Role) -> Self {
        Self {
            id,
            name,
            email,
            role,
            manager_id: None,
            is_active: true,
            location: None,
            picture: None,
            date_of_birth: None,
            joined_date: None,
        }
    }

    /// Check if the user holds a managerial role
    #[inline]
    pub fn is_manager(&self) -> bool {
        self.role.is_managerial()
    }

    /// Check if `other` is a direct report of this user
    #[inline]
    pub fn manages(&self, other: &User) -> bool {
        other.manager_id == Some(self.id)
    }

    /// Check if this user reports directly to `manager_id`
    #[inline]
    pub fn reports_to(&self, manager_id: UserId) -> bool {
        self.manager_id == Some(manager_id)
    }
}

/// Data for inserting a user; the id is assigned by storage
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub manager_id: Option<UserId>,
    pub is_active: bool,
    pub location: Option<String>,
    pub picture: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub joined_date: Option<NaiveDate>,
}
