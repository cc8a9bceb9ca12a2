//! SurrealDB implementation of [`UserRepository`].
//!
//! Plaintext passwords are sealed by the repository's
//! [`CredentialHasher`] inside `create` and `update` before any statement
//! is sent, so no caller can reach storage with an unhashed password.
//! Email uniqueness is left to the `idx_user_email` UNIQUE index; a
//! conflict surfaces as [`InnkeepError::DuplicateIdentity`].

use chrono::{DateTime, Utc};
use innkeep_core::error::{InnkeepError, InnkeepResult};
use innkeep_core::models::user::{CreateUser, HotelId, UpdateUser, User, UserRole};
use innkeep_core::repository::{PaginatedResult, Pagination, UserRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};
use uuid::Uuid;

use crate::credential::CredentialHasher;
use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: String,
    clicked_hotels: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    role: String,
    clicked_hotels: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|e| DbError::Decode(e.to_string()))?;
        Ok(User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            clicked_hotels: self.clicked_hotels.into_iter().map(HotelId).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        UserRow {
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
            clicked_hotels: self.clicked_hotels,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user(id)
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Map a failed write to `DuplicateIdentity` when it tripped the email
/// index.
fn write_error(err: surrealdb::Error, email: Option<&str>) -> InnkeepError {
    match DbError::from_write(err) {
        DbError::UniqueViolation(_) => InnkeepError::DuplicateIdentity {
            email: email.unwrap_or_default().to_string(),
        },
        other => other.into(),
    }
}

fn not_found(id: impl ToString) -> DbError {
    DbError::NotFound {
        entity: "user".into(),
        id: id.to_string(),
    }
}

/// SurrealDB implementation of the account store.
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
    hasher: CredentialHasher,
}

impl<C: Connection> Clone for SurrealUserRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

impl<C: Connection> SurrealUserRepository<C> {
    /// Repository with the default Argon2id work factor and no pepper.
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            hasher: CredentialHasher::default(),
        }
    }

    pub fn with_hasher(db: Surreal<C>, hasher: CredentialHasher) -> Self {
        Self { db, hasher }
    }

    async fn find_by_email(&self, email: &str) -> InnkeepResult<User> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM user WHERE email = $email")
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| not_found(format!("email={email}")))?;

        Ok(row.try_into_user()?)
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> InnkeepResult<User> {
        input.validate()?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let email = input.email;

        let password_hash = self.hasher.seal(input.password).await?;

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 email = $email, \
                 password_hash = $password_hash, \
                 first_name = $first_name, \
                 last_name = $last_name, \
                 role = $role, \
                 clicked_hotels = []",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", email.clone()))
            .bind(("password_hash", password_hash))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("role", input.role.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| write_error(e, Some(&email)))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;
        let user = row.into_user(id)?;

        info!(user_id = %user.id, role = %user.role, "Created user account");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> InnkeepResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        Ok(row.into_user(id)?)
    }

    async fn get_by_email(&self, email: &str) -> InnkeepResult<User> {
        self.find_by_email(email).await
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> InnkeepResult<User> {
        input.validate()?;

        let id_str = id.to_string();

        // The only way a hash enters an UPDATE statement. A missing account
        // is reported before any hashing work is spent.
        let password_hash = match input.password {
            Some(password) => {
                self.get_by_id(id).await?;
                Some(self.hasher.seal(password).await?)
            }
            None => None,
        };

        let mut sets = Vec::new();
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.first_name.is_some() {
            sets.push("first_name = $first_name");
        }
        if input.last_name.is_some() {
            sets.push("last_name = $last_name");
        }
        if input.role.is_some() {
            sets.push("role = $role");
        }
        if password_hash.is_some() {
            sets.push("password_hash = $password_hash");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('user', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        let new_email = input.email.clone();
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(first_name) = input.first_name {
            builder = builder.bind(("first_name", first_name));
        }
        if let Some(last_name) = input.last_name {
            builder = builder.bind(("last_name", last_name));
        }
        if let Some(role) = input.role {
            builder = builder.bind(("role", role.as_str().to_string()));
        }
        let credential_changed = password_hash.is_some();
        if let Some(password_hash) = password_hash {
            builder = builder.bind(("password_hash", password_hash));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| write_error(e, new_email.as_deref()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        debug!(user_id = %id, credential_changed, "Updated user account");
        Ok(row.into_user(id)?)
    }

    async fn verify_credential(&self, email: &str, password: &str) -> InnkeepResult<bool> {
        let user = self.find_by_email(email).await?;
        let matched = self
            .hasher
            .check(password.to_string(), user.password_hash)
            .await?;

        debug!(user_id = %user.id, matched, "Verified credential");
        Ok(matched)
    }

    async fn record_hotel_click(&self, id: Uuid, hotel_id: HotelId) -> InnkeepResult<User> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('user', $id) SET \
                 clicked_hotels = array::append(clicked_hotels, $hotel_id), \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("hotel_id", hotel_id.0))
            .await
            .map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| write_error(e, None))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| not_found(&id_str))?;

        Ok(row.into_user(id)?)
    }

    async fn list(&self, pagination: Pagination) -> InnkeepResult<PaginatedResult<User>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM user GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
