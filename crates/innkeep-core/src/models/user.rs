//! User account domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InnkeepError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    HotelOwner,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::HotelOwner => "hotel_owner",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = InnkeepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "hotel_owner" => Ok(UserRole::HotelOwner),
            "admin" => Ok(UserRole::Admin),
            other => Err(InnkeepError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Identifier of a hotel. Accounts hold these as plain references; the
/// hotel lifecycle is owned elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelId(pub String);

impl HotelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2id PHC string. Only the account store writes this field.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub clicked_hotels: Vec<HotelId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    /// Raw password (hashed with Argon2id before the first write).
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl CreateUser {
    /// Reject empty required fields.
    pub fn validate(&self) -> Result<(), InnkeepError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)
    }
}

/// Partial update. There is deliberately no hash field: a new `password`
/// is the only way to change the stored credential.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    /// New raw password.
    pub password: Option<String>,
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), InnkeepError> {
        if let Some(email) = &self.email {
            require("email", email)?;
        }
        if let Some(password) = &self.password {
            require("password", password)?;
        }
        if let Some(first_name) = &self.first_name {
            require("first_name", first_name)?;
        }
        if let Some(last_name) = &self.last_name {
            require("last_name", last_name)?;
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), InnkeepError> {
    if value.trim().is_empty() {
        return Err(InnkeepError::validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateUser {
        CreateUser {
            email: "guest@example.com".into(),
            password: "hunter2".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            role: UserRole::User,
        }
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [UserRole::User, UserRole::HotelOwner, UserRole::Admin] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("hotel owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&UserRole::HotelOwner).unwrap();
        assert_eq!(json, "\"hotel_owner\"");
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        assert!(create_input().validate().is_ok());

        let mut input = create_input();
        input.first_name = "   ".into();
        assert!(matches!(
            input.validate(),
            Err(InnkeepError::Validation { .. })
        ));

        let update = UpdateUser {
            password: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
