use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use migration::MigratorTrait;
use store::{Group, PaymentMethod, Store, StoreError, User};
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

async fn seed_basics(store: &Store) -> (Group, User, PaymentMethod) {
    let group = store.new_group("Viagem").await.unwrap();
    let ana = store.new_user("Ana").await.unwrap();
    let pix = store.new_payment_method("Pix", "#40C4FF").await.unwrap();
    (group, ana, pix)
}

#[tokio::test]
async fn new_expense_rejects_non_positive_amount() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;

    let err = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 0, &[])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidAmount("amount_cents must be > 0".to_string())
    );

    let err = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", -500, &[])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidAmount("amount_cents must be > 0".to_string())
    );
}

#[tokio::test]
async fn new_expense_links_tags_and_hydrates() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;
    let viagem = store.new_tag("Viagem", "#7C4DFF").await.unwrap();
    let comida = store.new_tag("Comida", "#FFAB40").await.unwrap();

    let expense = store
        .new_expense(
            group.id,
            ana.id,
            pix.id,
            "Jantar",
            5000,
            &[viagem.id, comida.id],
        )
        .await
        .unwrap();

    assert_eq!(expense.amount_cents, 5000);
    assert_eq!(expense.payer.unwrap().name, "Ana");
    let method = expense.payment_method.unwrap();
    assert_eq!(method.name, "Pix");
    assert_eq!(method.color, "#40C4FF");
    let tag_names: Vec<&str> = expense.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, vec!["Comida", "Viagem"]);

    let listed = store.group_expenses(group.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].tags.len(), 2);
}

#[tokio::test]
async fn new_expense_rejects_unknown_payer() {
    let (store, _db) = store_with_db().await;
    let (group, _ana, pix) = seed_basics(&store).await;

    let err = store
        .new_expense(group.id, Uuid::new_v4(), pix.id, "Jantar", 5000, &[])
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound("user not exists".to_string()));
}

#[tokio::test]
async fn new_expense_rejects_deleted_payment_method() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;

    store.delete_payment_method(pix.id).await.unwrap();

    let err = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::NotFound("payment method not exists".to_string())
    );
}

#[tokio::test]
async fn new_expense_rejects_deleted_tag() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;
    let comida = store.new_tag("Comida", "#FFAB40").await.unwrap();

    store.delete_tag(comida.id).await.unwrap();

    let err = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[comida.id])
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound("tag not exists".to_string()));
}

#[tokio::test]
async fn group_expenses_orders_newest_first() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;

    store
        .new_expense(group.id, ana.id, pix.id, "Mercado", 12000, &[])
        .await
        .unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    store
        .new_expense(group.id, ana.id, pix.id, "Uber", 2500, &[])
        .await
        .unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[])
        .await
        .unwrap();

    let listed = store.group_expenses(group.id).await.unwrap();
    let names: Vec<&str> = listed.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Jantar", "Uber", "Mercado"]);
}

#[tokio::test]
async fn group_expenses_for_unknown_group_is_empty() {
    let (store, _db) = store_with_db().await;

    let listed = store.group_expenses(Uuid::new_v4()).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn groups_overview_embeds_live_expenses_only() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;

    let jantar = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[])
        .await
        .unwrap();
    store
        .new_expense(group.id, ana.id, pix.id, "Uber", 2500, &[])
        .await
        .unwrap();
    store.delete_expense(jantar.id).await.unwrap();

    let groups = store.groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    let names: Vec<&str> = groups[0].expenses.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Uber"]);
    assert!(groups[0].expenses[0].payer.is_none());

    let plain = store.group(group.id).await.unwrap();
    assert!(plain.expenses.is_empty());
}

#[tokio::test]
async fn update_expense_replaces_tags_and_fields() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;
    let viagem = store.new_tag("Viagem", "#7C4DFF").await.unwrap();
    let comida = store.new_tag("Comida", "#FFAB40").await.unwrap();
    let lazer = store.new_tag("Lazer", "#64FFDA").await.unwrap();
    let bruno = store.new_user("Bruno").await.unwrap();

    let expense = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[viagem.id])
        .await
        .unwrap();

    let updated = store
        .update_expense(
            expense.id,
            bruno.id,
            pix.id,
            "Jantar fora",
            7500,
            &[comida.id, lazer.id],
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Jantar fora");
    assert_eq!(updated.amount_cents, 7500);
    assert_eq!(updated.group_id, group.id);
    assert_eq!(updated.payer.unwrap().name, "Bruno");
    let tag_names: Vec<&str> = updated.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, vec!["Comida", "Lazer"]);
}

#[tokio::test]
async fn update_expense_with_unknown_tag_rolls_back() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;
    let comida = store.new_tag("Comida", "#FFAB40").await.unwrap();

    let expense = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[comida.id])
        .await
        .unwrap();

    let err = store
        .update_expense(
            expense.id,
            ana.id,
            pix.id,
            "Jantar fora",
            7500,
            &[comida.id, Uuid::new_v4()],
        )
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound("tag not exists".to_string()));

    let unchanged = store.expense(expense.id).await.unwrap();
    assert_eq!(unchanged.name, "Jantar");
    assert_eq!(unchanged.amount_cents, 5000);
    assert_eq!(unchanged.tags.len(), 1);
}

#[tokio::test]
async fn replace_tags_with_empty_set_clears() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;
    let comida = store.new_tag("Comida", "#FFAB40").await.unwrap();

    let expense = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[comida.id])
        .await
        .unwrap();

    let replaced = store.replace_tags(expense.id, &[]).await.unwrap();
    assert!(replaced.is_empty());
    assert!(store.expense(expense.id).await.unwrap().tags.is_empty());
}

#[tokio::test]
async fn replace_tags_swaps_the_whole_set() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;
    let viagem = store.new_tag("Viagem", "#7C4DFF").await.unwrap();
    let comida = store.new_tag("Comida", "#FFAB40").await.unwrap();
    let lazer = store.new_tag("Lazer", "#64FFDA").await.unwrap();

    let expense = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[viagem.id])
        .await
        .unwrap();

    let replaced = store
        .replace_tags(expense.id, &[comida.id, lazer.id])
        .await
        .unwrap();
    let names: Vec<&str> = replaced.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Comida", "Lazer"]);

    let fetched = store.expense(expense.id).await.unwrap();
    let names: Vec<&str> = fetched.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Comida", "Lazer"]);
}

#[tokio::test]
async fn duplicate_tag_ids_collapse() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;
    let comida = store.new_tag("Comida", "#FFAB40").await.unwrap();

    let expense = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[comida.id, comida.id])
        .await
        .unwrap();

    assert_eq!(expense.tags.len(), 1);
}

#[tokio::test]
async fn deleted_payer_stays_embedded() {
    let (store, _db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;

    let expense = store
        .new_expense(group.id, ana.id, pix.id, "Jantar", 5000, &[])
        .await
        .unwrap();
    store.delete_user(ana.id).await.unwrap();

    let fetched = store.expense(expense.id).await.unwrap();
    assert_eq!(fetched.payer.unwrap().name, "Ana");
}

#[tokio::test]
async fn deleting_an_expense_keeps_tag_links() {
    let (store, db) = store_with_db().await;
    let (group, ana, pix) = seed_basics(&store).await;
    let viagem = store.new_tag("Viagem", "#7C4DFF").await.unwrap();
    let comida = store.new_tag("Comida", "#FFAB40").await.unwrap();

    let expense = store
        .new_expense(
            group.id,
            ana.id,
            pix.id,
            "Jantar",
            5000,
            &[viagem.id, comida.id],
        )
        .await
        .unwrap();
    store.delete_expense(expense.id).await.unwrap();

    let err = store.expense(expense.id).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("expense not exists".to_string()));

    let backend = db.get_database_backend();
    let rows = db
        .query_all(Statement::from_sql_and_values(
            backend,
            "SELECT tag_id FROM expense_tags WHERE expense_id = ?",
            vec![expense.id.to_string().into()],
        ))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}
