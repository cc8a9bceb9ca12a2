//! Integration tests for the account store using in-memory SurrealDB.

use innkeep_core::error::InnkeepError;
use innkeep_core::models::user::{CreateUser, HotelId, UpdateUser, UserRole};
use innkeep_core::repository::{Pagination, UserRepository};
use innkeep_db::repository::SurrealUserRepository;
use innkeep_db::{CredentialHasher, HashingConfig};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Cheap work factor so the suite does not spend its time in Argon2.
fn fast_hasher() -> CredentialHasher {
    CredentialHasher::new(&HashingConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
        pepper: None,
    })
    .unwrap()
}

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> (Surreal<Db>, SurrealUserRepository<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    innkeep_db::run_migrations(&db).await.unwrap();

    let repo = SurrealUserRepository::with_hasher(db.clone(), fast_hasher());
    (db, repo)
}

fn new_user(email: &str, password: &str) -> CreateUser {
    CreateUser {
        email: email.into(),
        password: password.into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        role: UserRole::User,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let (_db, repo) = setup().await;

    let user = repo
        .create(new_user("alice@example.com", "SuperSecret123!"))
        .await
        .unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.role, UserRole::User);
    assert!(user.clicked_hotels.is_empty());

    // Password should be hashed, not stored in plaintext.
    assert_ne!(user.password_hash, "SuperSecret123!");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.password_hash, user.password_hash);

    let by_email = repo.get_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn default_work_factor_hashes_on_create() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    innkeep_db::run_migrations(&db).await.unwrap();
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(new_user("default@example.com", "MyPassword42!"))
        .await
        .unwrap();

    assert!(user.password_hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    assert!(
        repo.verify_credential("default@example.com", "MyPassword42!")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn stored_record_never_holds_plaintext() {
    let (db, repo) = setup().await;

    let user = repo
        .create(new_user("bob@example.com", "MyPassword42!"))
        .await
        .unwrap();

    // Inspect the persisted document directly, bypassing the repository.
    let mut result = db
        .query("SELECT VALUE password_hash FROM type::record('user', $id)")
        .bind(("id", user.id.to_string()))
        .await
        .unwrap();
    let stored: Vec<String> = result.take(0).unwrap();
    assert_eq!(stored.len(), 1);
    assert_ne!(stored[0], "MyPassword42!");

    assert!(
        repo.verify_credential("bob@example.com", "MyPassword42!")
            .await
            .unwrap()
    );
    assert!(
        !repo
            .verify_credential("bob@example.com", "WrongPassword")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn schema_rejects_plaintext_password_hash() {
    let (db, _repo) = setup().await;

    let result = db
        .query(
            "CREATE user SET email = 'raw@example.com', \
             password_hash = 'plaintext', first_name = 'R', \
             last_name = 'W', role = 'user'",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "non-PHC password_hash should be rejected");
}

#[tokio::test]
async fn profile_update_leaves_hash_untouched() {
    let (_db, repo) = setup().await;

    let user = repo
        .create(new_user("carol@example.com", "Original1!"))
        .await
        .unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                first_name: Some("X".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "X");
    assert_eq!(updated.last_name, "Lovelace");
    assert_eq!(updated.password_hash, user.password_hash);

    let role_change = repo
        .update(
            user.id,
            UpdateUser {
                role: Some(UserRole::HotelOwner),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(role_change.role, UserRole::HotelOwner);
    assert_eq!(role_change.password_hash, user.password_hash);
    assert!(
        repo.verify_credential("carol@example.com", "Original1!")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn password_update_rehashes_once() {
    let (_db, repo) = setup().await;

    let user = repo
        .create(new_user("dave@example.com", "OldPassword1!"))
        .await
        .unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                password: Some("NewPassword2!".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(updated.password_hash, user.password_hash);
    assert_ne!(updated.password_hash, "NewPassword2!");
    assert!(
        repo.verify_credential("dave@example.com", "NewPassword2!")
            .await
            .unwrap()
    );
    assert!(
        !repo
            .verify_credential("dave@example.com", "OldPassword1!")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let (_db, repo) = setup().await;

    let original = repo
        .create(new_user("same@example.com", "pass123"))
        .await
        .unwrap();

    let mut second = new_user("same@example.com", "other-pass");
    second.first_name = "Impostor".into();
    let result = repo.create(second).await;

    assert!(
        matches!(result, Err(InnkeepError::DuplicateIdentity { ref email }) if email == "same@example.com"),
        "duplicate email should be rejected, got {result:?}"
    );

    let existing = repo.get_by_email("same@example.com").await.unwrap();
    assert_eq!(existing.id, original.id);
    assert_eq!(existing.first_name, "Ada");
    assert_eq!(existing.password_hash, original.password_hash);
}

#[tokio::test]
async fn email_change_to_taken_address_rejected() {
    let (_db, repo) = setup().await;

    repo.create(new_user("first@example.com", "pass123"))
        .await
        .unwrap();
    let second = repo
        .create(new_user("second@example.com", "pass123"))
        .await
        .unwrap();

    let result = repo
        .update(
            second.id,
            UpdateUser {
                email: Some("first@example.com".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(InnkeepError::DuplicateIdentity { .. })
    ));
    let unchanged = repo.get_by_id(second.id).await.unwrap();
    assert_eq!(unchanged.email, "second@example.com");
}

#[tokio::test]
async fn update_missing_account_is_not_found() {
    let (_db, repo) = setup().await;

    let result = repo
        .update(
            Uuid::new_v4(),
            UpdateUser {
                last_name: Some("Nobody".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(InnkeepError::NotFound { .. })));
}

#[tokio::test]
async fn password_update_on_missing_account_is_not_found() {
    let (_db, repo) = setup().await;
    let ghost = Uuid::new_v4();

    let result = repo
        .update(
            ghost,
            UpdateUser {
                password: Some("new-secret".into()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(InnkeepError::NotFound { ref id, .. }) if *id == ghost.to_string()
    ));

    let page = repo
        .list(Pagination {
            offset: 0,
            limit: 10,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn verify_unknown_email_is_not_found() {
    let (_db, repo) = setup().await;

    let result = repo.verify_credential("ghost@example.com", "pw").await;
    assert!(matches!(result, Err(InnkeepError::NotFound { .. })));
}

#[tokio::test]
async fn blank_fields_rejected_before_write() {
    let (_db, repo) = setup().await;

    let result = repo.create(new_user("", "pw")).await;
    assert!(matches!(result, Err(InnkeepError::Validation { .. })));

    let result = repo.create(new_user("blank@example.com", "")).await;
    assert!(matches!(result, Err(InnkeepError::Validation { .. })));

    let page = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn hotel_clicks_append_in_order() {
    let (_db, repo) = setup().await;

    let user = repo
        .create(new_user("eve@example.com", "pass123"))
        .await
        .unwrap();

    repo.record_hotel_click(user.id, HotelId::new("hotel-1"))
        .await
        .unwrap();
    let updated = repo
        .record_hotel_click(user.id, HotelId::new("hotel-2"))
        .await
        .unwrap();

    assert_eq!(
        updated.clicked_hotels,
        vec![HotelId::new("hotel-1"), HotelId::new("hotel-2")]
    );
    assert_eq!(updated.password_hash, user.password_hash);

    let missing = repo
        .record_hotel_click(Uuid::new_v4(), HotelId::new("hotel-3"))
        .await;
    assert!(matches!(missing, Err(InnkeepError::NotFound { .. })));
}

#[tokio::test]
async fn list_users_with_pagination() {
    let (_db, repo) = setup().await;

    for i in 0..5 {
        repo.create(new_user(&format!("user{i}@example.com"), "pass"))
            .await
            .unwrap();
    }

    let page1 = repo
        .list(Pagination {
            offset: 0,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page1.total, 5);
    assert_eq!(page1.items.len(), 3);

    let page2 = repo
        .list(Pagination {
            offset: 3,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page2.total, 5);
    assert_eq!(page2.items.len(), 2);
}
