use sea_orm::{Database, DatabaseConnection};

use migration::MigratorTrait;
use store::{Store, StoreError};
use uuid::Uuid;

async fn store_with_db() -> (Store, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let store = Store::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (store, db)
}

#[tokio::test]
async fn users_list_orders_by_name() {
    let (store, _db) = store_with_db().await;

    store.new_user("Carla").await.unwrap();
    store.new_user("Ana").await.unwrap();
    store.new_user("Bruno").await.unwrap();

    let users = store.users().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
}

#[tokio::test]
async fn user_lookup_excludes_soft_deleted() {
    let (store, _db) = store_with_db().await;

    let ana = store.new_user("Ana").await.unwrap();
    store.delete_user(ana.id).await.unwrap();

    let err = store.user(ana.id).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("user not exists".to_string()));
    assert!(store.users().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_user_twice_succeeds() {
    let (store, _db) = store_with_db().await;

    let ana = store.new_user("Ana").await.unwrap();
    store.delete_user(ana.id).await.unwrap();
    store.delete_user(ana.id).await.unwrap();
}

#[tokio::test]
async fn deleting_an_unknown_user_fails() {
    let (store, _db) = store_with_db().await;

    let err = store.delete_user(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("user not exists".to_string()));
}

#[tokio::test]
async fn update_user_renames_and_stamps_updated_at() {
    let (store, _db) = store_with_db().await;

    let created = store.new_user("Ana").await.unwrap();
    let before = store.user(created.id).await.unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    let updated = store.update_user(created.id, "Ana Maria").await.unwrap();

    assert_eq!(updated.name, "Ana Maria");
    assert_eq!(updated.created_at, before.created_at);
    assert!(updated.updated_at > before.updated_at);

    let fetched = store.user(created.id).await.unwrap();
    assert_eq!(fetched.name, "Ana Maria");
}

#[tokio::test]
async fn blank_user_name_is_rejected() {
    let (store, _db) = store_with_db().await;

    let err = store.new_user("   ").await.unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidName("user name must not be empty".to_string())
    );
}

#[tokio::test]
async fn payment_methods_list_orders_by_name() {
    let (store, _db) = store_with_db().await;

    store.new_payment_method("Pix", "#40C4FF").await.unwrap();
    store
        .new_payment_method("Dinheiro", "#69F0AE")
        .await
        .unwrap();
    store
        .new_payment_method("Crédito", "#FF5252")
        .await
        .unwrap();

    let methods = store.payment_methods().await.unwrap();
    let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Crédito", "Dinheiro", "Pix"]);
}

#[tokio::test]
async fn blank_payment_method_color_is_rejected() {
    let (store, _db) = store_with_db().await;

    let err = store.new_payment_method("Pix", "  ").await.unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidColor("payment method color must not be empty".to_string())
    );
}

#[tokio::test]
async fn update_payment_method_changes_name_and_color() {
    let (store, _db) = store_with_db().await;

    let pix = store.new_payment_method("Pix", "#40C4FF").await.unwrap();
    let updated = store
        .update_payment_method(pix.id, "Pix Ana", "#18FFFF")
        .await
        .unwrap();

    assert_eq!(updated.name, "Pix Ana");
    assert_eq!(updated.color, "#18FFFF");
}

#[tokio::test]
async fn tags_list_orders_by_name() {
    let (store, _db) = store_with_db().await;

    store.new_tag("Viagem", "#7C4DFF").await.unwrap();
    store.new_tag("Comida", "#FFAB40").await.unwrap();
    store.new_tag("Lazer", "#64FFDA").await.unwrap();

    let tags = store.tags().await.unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Comida", "Lazer", "Viagem"]);
}

#[tokio::test]
async fn tag_lookup_excludes_soft_deleted() {
    let (store, _db) = store_with_db().await;

    let tag = store.new_tag("Comida", "#FFAB40").await.unwrap();
    store.delete_tag(tag.id).await.unwrap();

    let err = store.tag(tag.id).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("tag not exists".to_string()));
    assert!(store.tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn groups_list_newest_first() {
    let (store, _db) = store_with_db().await;

    let first = store.new_group("Casa").await.unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = store.new_group("Viagem").await.unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let third = store.new_group("Churrasco").await.unwrap();

    let groups = store.groups().await.unwrap();
    let ids: Vec<_> = groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn group_lookup_excludes_soft_deleted() {
    let (store, _db) = store_with_db().await;

    let casa = store.new_group("Casa").await.unwrap();
    store.delete_group(casa.id).await.unwrap();

    let err = store.group(casa.id).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("group not exists".to_string()));
    assert!(store.groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_group_renames() {
    let (store, _db) = store_with_db().await;

    let casa = store.new_group("Casa").await.unwrap();
    let updated = store.update_group(casa.id, "Casa de praia").await.unwrap();

    assert_eq!(updated.name, "Casa de praia");
    assert_eq!(store.group(casa.id).await.unwrap().name, "Casa de praia");
}
