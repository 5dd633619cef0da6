use crate::common::{DomainError, DomainResult};
use crate::config::PostgresConfig;
use crate::domains::fleet::{FleetRegistry, Location, Trip, TripId, TripLedger, Vehicle, VehicleId};
use async_trait::async_trait;
use deadpool_postgres::{Config, Object, Pool, PoolConfig, Runtime};
use tokio_postgres::NoTls;
use uuid::Uuid;

/// Document store on PostgreSQL: each record is a JSONB document keyed by UUID.
pub struct PostgresFleetStore {
    pool: Pool,
}

impl PostgresFleetStore {
    /// Open the pool and make sure the schema exists.
    pub async fn connect(config: PostgresConfig) -> DomainResult<Self> {
        let mut pg_config = Config::new();
        pg_config.host = Some(config.host);
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database);
        pg_config.user = Some(config.username);
        pg_config.password = Some(config.password);
        pg_config.pool = Some(PoolConfig::new(config.max_connections));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| {
                DomainError::StoreUnavailable(format!("Failed to create PostgreSQL pool: {}", e))
            })?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: Pool) -> DomainResult<Self> {
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Close the pool; later calls fail with `StoreUnavailable`.
    pub fn close(&self) {
        self.pool.close();
    }

    async fn client(&self) -> DomainResult<Object> {
        self.pool.get().await.map_err(|e| {
            DomainError::StoreUnavailable(format!("Failed to get database connection: {}", e))
        })
    }

    async fn initialize_schema(&self) -> DomainResult<()> {
        let client = self.client().await?;

        let schema = r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                id UUID PRIMARY KEY,
                document JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE TABLE IF NOT EXISTS trips (
                id UUID PRIMARY KEY,
                vehicle_id UUID NOT NULL,
                document JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            CREATE INDEX IF NOT EXISTS idx_trips_vehicle_id
            ON trips(vehicle_id);
        "#;

        client
            .batch_execute(schema)
            .await
            .map_err(query_failed("Failed to initialize database schema"))?;

        Ok(())
    }
}

#[async_trait]
impl FleetRegistry for PostgresFleetStore {
    async fn create(&self, vehicle: &Vehicle) -> DomainResult<VehicleId> {
        let client = self.client().await?;
        let id = Uuid::new_v4();
        let document = serde_json::to_value(vehicle)?;

        client
            .execute(
                "INSERT INTO vehicles (id, document) VALUES ($1, $2)",
                &[&id, &document],
            )
            .await
            .map_err(query_failed("Failed to insert vehicle"))?;

        Ok(id)
    }

    async fn get(&self, id: VehicleId) -> DomainResult<Option<Vehicle>> {
        let client = self.client().await?;

        let row = client
            .query_opt("SELECT document FROM vehicles WHERE id = $1", &[&id])
            .await
            .map_err(query_failed("Failed to load vehicle"))?;

        match row {
            Some(row) => {
                let document: serde_json::Value = row.get(0);
                Ok(Some(serde_json::from_value(document)?))
            }
            None => Ok(None),
        }
    }

    async fn update_position(&self, id: VehicleId, location: &Location) -> DomainResult<()> {
        let client = self.client().await?;
        let location = serde_json::to_value(location)?;

        client
            .execute(
                "UPDATE vehicles SET document = jsonb_set(document, '{currentLocation}', $2) \
                 WHERE id = $1",
                &[&id, &location],
            )
            .await
            .map_err(query_failed("Failed to update vehicle position"))?;

        Ok(())
    }
}

#[async_trait]
impl TripLedger for PostgresFleetStore {
    async fn create(&self, trip: &Trip) -> DomainResult<TripId> {
        let client = self.client().await?;
        let id = Uuid::new_v4();
        let document = serde_json::to_value(trip)?;

        client
            .execute(
                "INSERT INTO trips (id, vehicle_id, document) VALUES ($1, $2, $3)",
                &[&id, &trip.vehicle_id, &document],
            )
            .await
            .map_err(query_failed("Failed to insert trip"))?;

        Ok(id)
    }

    async fn count(&self) -> DomainResult<u64> {
        let client = self.client().await?;

        let row = client
            .query_one("SELECT COUNT(*) FROM trips", &[])
            .await
            .map_err(query_failed("Failed to count trips"))?;

        Ok(row.get::<_, i64>(0) as u64)
    }
}

fn query_failed(context: &'static str) -> impl FnOnce(tokio_postgres::Error) -> DomainError {
    move |e| DomainError::InfrastructureError(format!("{}: {}", context, e))
}
