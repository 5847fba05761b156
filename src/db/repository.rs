use crate::db::error::{log_db, RepositoryError};
use crate::domain::{Model, Route, Station};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

#[derive(Debug, FromRow)]
struct RouteRow {
    id: i64,
    name: String,
}

#[derive(Debug, FromRow)]
struct StationRow {
    id: i64,
    name: String,
}

/// One `route_stations` entry joined with its station.
#[derive(Debug, FromRow)]
struct RouteStationRow {
    route_id: i64,
    station_id: i64,
    station_name: String,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Station {
            id: row.id,
            name: row.name,
        }
    }
}

/// Attaches each route's stations, keeping the incoming order on both levels.
///
/// `links` must already be sorted by position; routes with no links get an
/// empty list.
fn assemble_routes(routes: Vec<RouteRow>, links: Vec<RouteStationRow>) -> Vec<Route> {
    let mut stations_by_route: HashMap<i64, Vec<Station>> = HashMap::new();
    for link in links {
        stations_by_route
            .entry(link.route_id)
            .or_default()
            .push(Station {
                id: link.station_id,
                name: link.station_name,
            });
    }

    routes
        .into_iter()
        .map(|row| Route {
            stations: stations_by_route.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
        })
        .collect()
}

/// All routes ordered by name, each with its stations in position order.
///
/// Two queries (links first, then routes) instead of one per route. They do
/// not share a transaction.
pub async fn list_routes(pool: &PgPool) -> Result<Vec<Route>, RepositoryError> {
    let links: Vec<RouteStationRow> = sqlx::query_as(
        "SELECT rs.route_id, s.id AS station_id, s.name AS station_name \
         FROM route_stations rs \
         JOIN station s ON s.id = rs.station_id \
         ORDER BY rs.route_id, rs.pos",
    )
    .fetch_all(pool)
    .await
    .map_err(log_db("list_routes.stations"))?;

    let routes: Vec<RouteRow> = sqlx::query_as("SELECT id, name FROM route ORDER BY name, id")
        .fetch_all(pool)
        .await
        .map_err(log_db("list_routes"))?;

    Ok(assemble_routes(routes, links))
}

pub async fn find_route_by_id(pool: &PgPool, id: i64) -> Result<Route, RepositoryError> {
    let row: RouteRow = sqlx::query_as("SELECT id, name FROM route WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(log_db("find_route_by_id"))?
        .ok_or(RepositoryError::NotFound)?;

    let stations: Vec<StationRow> = sqlx::query_as(
        "SELECT s.id, s.name \
         FROM route_stations rs \
         JOIN station s ON s.id = rs.station_id \
         WHERE rs.route_id = $1 \
         ORDER BY rs.pos",
    )
    .bind(id)
    .fetch_all(pool)
    .await
    .map_err(log_db("find_route_by_id.stations"))?;

    Ok(Route {
        id: row.id,
        name: row.name,
        stations: stations.into_iter().map(Station::from).collect(),
    })
}

pub async fn list_stations(pool: &PgPool) -> Result<Vec<Station>, RepositoryError> {
    let rows: Vec<StationRow> = sqlx::query_as("SELECT id, name FROM station ORDER BY name, id")
        .fetch_all(pool)
        .await
        .map_err(log_db("list_stations"))?;

    Ok(rows.into_iter().map(Station::from).collect())
}

pub async fn find_station_by_id(pool: &PgPool, id: i64) -> Result<Station, RepositoryError> {
    let row: Option<StationRow> = sqlx::query_as("SELECT id, name FROM station WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(log_db("find_station_by_id"))?;

    row.map(Station::from).ok_or(RepositoryError::NotFound)
}

/// Inserts `item` and writes the generated id back into it.
pub async fn create<M: Model>(pool: &PgPool, item: &mut M) -> Result<(), RepositoryError> {
    let (id,): (i64,) = sqlx::query_as(M::KIND.insert_sql())
        .bind(item.name())
        .fetch_one(pool)
        .await
        .map_err(log_db("create"))?;

    item.set_id(id);
    Ok(())
}

/// Renames the row addressed by `item.id()`.
pub async fn update<M: Model>(pool: &PgPool, item: &M) -> Result<(), RepositoryError> {
    let result = sqlx::query(M::KIND.update_sql())
        .bind(item.name())
        .bind(item.id())
        .execute(pool)
        .await
        .map_err(log_db("update"))?;

    if result.rows_affected() == 0 {
        tracing::debug!(entity = %M::KIND, id = item.id(), "update matched no row");
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}

/// Deletes the row addressed by `item.id()`. Route links go with it; the
/// linked entities on the other side stay.
pub async fn delete<M: Model>(pool: &PgPool, item: &M) -> Result<(), RepositoryError> {
    let result = sqlx::query(M::KIND.delete_sql())
        .bind(item.id())
        .execute(pool)
        .await
        .map_err(log_db("delete"))?;

    if result.rows_affected() == 0 {
        tracing::debug!(entity = %M::KIND, id = item.id(), "delete matched no row");
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}
