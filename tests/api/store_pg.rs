use cc_goodies::configuration::get_configuration;
use cc_goodies::store::postgres::PgDocumentStore;
use cc_goodies::store::DocumentStore;
use serde_json::json;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use uuid::Uuid;

/// Read `DatabaseSettings`, create a db with a randomised name, and run the
/// migrations in `migrations/` against it.
async fn configure_database() -> PgPool {
    let mut cfg = get_configuration().unwrap().database;
    cfg.database_name = Uuid::new_v4().to_string();

    // connect to the top-level db to create the randomised one
    let mut conn = PgConnection::connect_with(&cfg.connection_without_db())
        .await
        .expect("postgres must be running");
    conn.execute(format!(r#"CREATE DATABASE "{}";"#, cfg.database_name).as_str())
        .await
        .unwrap();

    let pool = PgPool::connect_with(cfg.connection()).await.unwrap();
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to migrate");
    pool
}

/// The API tests exercise the in-memory store; this one pins the Postgres
/// backend to the same semantics. It needs a running instance, so it is
/// opt-in:
///
/// ```sh
///     cargo test pg_store -- --ignored
/// ```
#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn pg_store_matches_the_documented_semantics() {
    let store = PgDocumentStore::new(configure_database().await);

    // insert assigns _id
    let id = store
        .insert_one("cereals", json!({ "name": "muesli", "price": 3 }))
        .await
        .unwrap();
    let doc = store
        .find_one("cereals", &json!({ "_id": id.to_string() }))
        .await
        .unwrap()
        .expect("inserted document not found");
    assert_eq!(doc["name"], "muesli");

    // empty filter matches all, collections are disjoint
    store.insert_one("cereals", json!({ "name": "granola" })).await.unwrap();
    assert_eq!(store.find_many("cereals", &json!({})).await.unwrap().len(), 2);
    assert_eq!(store.find_many("dairy", &json!({})).await.unwrap().len(), 0);

    // shallow merge into the first match
    store
        .update_one("cereals", &json!({ "name": "muesli" }), json!({ "price": 4 }))
        .await
        .unwrap();
    let doc = store
        .find_one("cereals", &json!({ "name": "muesli" }))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doc["price"], 4);
    assert_eq!(doc["name"], "muesli");

    // delete removes exactly one
    store
        .delete_one("cereals", &json!({ "name": "muesli" }))
        .await
        .unwrap();
    assert_eq!(store.find_many("cereals", &json!({})).await.unwrap().len(), 1);
}
