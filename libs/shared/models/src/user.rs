use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Admin,
    Specialist,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
            Role::Specialist => write!(f, "specialist"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub telegram_username: String,
    pub name: String,
    pub phone: String,
    pub role: Role,
    /// Lookup into the specialist directory, set only for specialist users.
    pub specialist_id: Option<Uuid>,
}

impl User {
    pub fn customer(name: &str, telegram_username: &str, phone: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            telegram_username: telegram_username.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            role: Role::Customer,
            specialist_id: None,
        }
    }

    pub fn admin(name: &str, telegram_username: &str, phone: &str) -> Self {
        Self {
            role: Role::Admin,
            ..Self::customer(name, telegram_username, phone)
        }
    }

    pub fn specialist(name: &str, telegram_username: &str, phone: &str, specialist_id: Uuid) -> Self {
        Self {
            role: Role::Specialist,
            specialist_id: Some(specialist_id),
            ..Self::customer(name, telegram_username, phone)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The specialist this user acts for, if they are one.
    pub fn acting_specialist(&self) -> Option<Uuid> {
        match self.role {
            Role::Specialist => self.specialist_id,
            Role::Customer | Role::Admin => None,
        }
    }
}
