use bus_routes_backend::db::{repository, RepositoryError};
use bus_routes_backend::domain::{Route, Station};
use serial_test::serial;
use sqlx::{postgres::PgPoolOptions, PgPool};

async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    bus_routes_backend::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE TABLE route_stations, route, station RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to truncate tables");

    pool
}

#[tokio::test]
#[serial]
async fn test_create_writes_back_generated_id() {
    let pool = setup_test_db().await;

    let mut first = Station::new(0, "Central");
    let mut second = Station::new(0, "North");
    repository::create(&pool, &mut first).await.unwrap();
    repository::create(&pool, &mut second).await.unwrap();

    assert!(first.id > 0);
    assert!(second.id > first.id);

    let found = repository::find_station_by_id(&pool, second.id).await.unwrap();
    assert_eq!(found, second);
}

#[tokio::test]
#[serial]
async fn test_route_scenario_position_order() {
    let pool = setup_test_db().await;

    let mut central = Station::new(0, "Central");
    let mut north = Station::new(0, "North");
    let mut line = Route::new(0, "Line 5", Vec::new());
    repository::create(&pool, &mut central).await.unwrap();
    repository::create(&pool, &mut north).await.unwrap();
    repository::create(&pool, &mut line).await.unwrap();

    sqlx::query(
        "INSERT INTO route_stations (route_id, station_id, pos) VALUES ($1, $2, 0), ($1, $3, 1)",
    )
    .bind(line.id)
    .bind(north.id)
    .bind(central.id)
    .execute(&pool)
    .await
    .unwrap();

    let found = repository::find_route_by_id(&pool, line.id).await.unwrap();
    assert_eq!(found.stations, vec![north.clone(), central.clone()]);

    let all = repository::list_routes(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].stations, vec![north, central]);
}

#[tokio::test]
#[serial]
async fn test_update_and_delete_missing_rows_are_not_found() {
    let pool = setup_test_db().await;

    let ghost = Route::new(4242, "Ghost", Vec::new());

    assert!(matches!(
        repository::update(&pool, &ghost).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repository::delete(&pool, &ghost).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repository::find_route_by_id(&pool, 4242).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
#[serial]
async fn test_delete_then_find_is_not_found() {
    let pool = setup_test_db().await;

    let mut station = Station::new(0, "Depot");
    repository::create(&pool, &mut station).await.unwrap();
    repository::delete(&pool, &station).await.unwrap();

    assert!(matches!(
        repository::find_station_by_id(&pool, station.id).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
#[serial]
async fn test_list_stations_orders_by_name() {
    let pool = setup_test_db().await;

    for name in ["Uptown", "Airport", "Market"] {
        let mut station = Station::new(0, name);
        repository::create(&pool, &mut station).await.unwrap();
    }

    let names: Vec<String> = repository::list_stations(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();

    assert_eq!(names, vec!["Airport", "Market", "Uptown"]);
}
