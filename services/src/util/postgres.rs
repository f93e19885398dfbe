use rastertiles_operators::source::{DatabaseRegistry, DatabaseSettings};
use snafu::ResultExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Config, NoTls, Row};
use tracing::{debug, error};

use crate::error::{self, Error, Result};

/// Creates the `tokio_postgres` configuration of a configured database
pub fn pg_config(settings: &DatabaseSettings) -> Result<Config> {
    let port = settings.port_or_default();
    let port: u16 = port
        .parse()
        .context(error::InvalidDatabasePort { port })?;

    let mut config = Config::new();
    config
        .user(&settings.user)
        .password(&settings.password)
        .host(settings.host_or_default())
        .port(port)
        .dbname(&settings.name);
    Ok(config)
}

/// A blocking database client.
///
/// The client drives its connection on a private current-thread runtime, so every query blocks
/// the calling thread until it is answered.
pub struct PostgresClient {
    runtime: Runtime,
    client: Client,
}

impl PostgresClient {
    pub fn connect(settings: &DatabaseSettings) -> Result<Self> {
        let config = pg_config(settings)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context(error::Io)?;

        let (client, connection) = runtime
            .block_on(config.connect(NoTls))
            .context(error::TokioPostgres)?;

        runtime.spawn(async move {
            if let Err(e) = connection.await {
                error!("Database connection failed: {e}");
            }
        });

        debug!(
            "Connected to database {} on {}:{}",
            settings.name,
            settings.host_or_default(),
            settings.port_or_default()
        );

        Ok(Self { runtime, client })
    }

    pub fn query(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        self.runtime
            .block_on(self.client.query(statement, params))
            .context(error::TokioPostgres)
    }

    pub fn query_opt(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Option<Row>> {
        self.runtime
            .block_on(self.client.query_opt(statement, params))
            .context(error::TokioPostgres)
    }

    #[cfg(test)]
    pub(crate) fn batch_execute(&self, statements: &str) -> Result<()> {
        self.runtime
            .block_on(self.client.batch_execute(statements))
            .context(error::TokioPostgres)
    }
}

/// Connections to the configured databases, opened on first use and shared afterwards
pub struct PostgresConnections {
    registry: DatabaseRegistry,
    clients: Mutex<HashMap<String, Arc<PostgresClient>>>,
}

impl PostgresConnections {
    pub fn new(registry: DatabaseRegistry) -> Self {
        Self {
            registry,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &DatabaseRegistry {
        &self.registry
    }

    /// The client of the database configured as `alias`
    pub fn client(&self, alias: &str) -> Result<Arc<PostgresClient>> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|_error| Error::ConnectionLockFailed)?;

        if let Some(client) = clients.get(alias) {
            return Ok(client.clone());
        }

        let settings = self.registry.get(alias).context(error::Operator)?;
        let client = Arc::new(PostgresClient::connect(settings)?);
        clients.insert(alias.to_string(), client.clone());

        Ok(client)
    }
}

/// Connections to the databases of `Settings-test.toml`
#[cfg(test)]
pub(crate) fn test_connections() -> PostgresConnections {
    let settings = crate::config::Settings::load().unwrap();
    PostgresConnections::new(settings.databases().unwrap())
}
