use rastertiles_datatypes::tiles::TableName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::Error;
use crate::util::Result;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: &str = "5432";
const SCHEMA: &str = "public";

/// Connection parameters of one configured database.
///
/// `host` and `port` are required keys, but may be left empty, in which case `localhost` and `5432`
/// are used.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: String,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DatabaseSettings {
    pub fn host_or_default(&self) -> &str {
        if self.host.is_empty() {
            DEFAULT_HOST
        } else {
            &self.host
        }
    }

    pub fn port_or_default(&self) -> &str {
        if self.port.is_empty() {
            DEFAULT_PORT
        } else {
            &self.port
        }
    }
}

/// The configured databases by their alias, e.g. `raster`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseRegistry {
    databases: HashMap<String, DatabaseSettings>,
}

impl DatabaseRegistry {
    #[must_use]
    pub fn with_database(mut self, alias: impl Into<String>, settings: DatabaseSettings) -> Self {
        self.databases.insert(alias.into(), settings);
        self
    }

    pub fn get(&self, alias: &str) -> Result<&DatabaseSettings> {
        self.databases
            .get(alias)
            .ok_or_else(|| Error::UnknownDatabaseAlias {
                alias: alias.to_string(),
            })
    }
}

/// The connection string for opening a single tile with the `PostGISRaster` driver.
///
/// The string is handed to GDAL as is and never parsed back. Its `Display` output masks the password
/// and is meant for logging.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    descriptor: String,
    redacted: String,
}

impl ConnectionDescriptor {
    /// Builds the descriptor that selects the row of `table` whose `filename` equals `tile`.
    ///
    /// `mode=1` makes the driver treat the selected row as one raster instead of a tiled mosaic.
    ///
    /// # Examples
    ///
    /// ```
    /// use rastertiles_datatypes::tiles::TableName;
    /// use rastertiles_operators::source::{ConnectionDescriptor, DatabaseRegistry, DatabaseSettings};
    ///
    /// let registry = DatabaseRegistry::default().with_database(
    ///     "raster",
    ///     DatabaseSettings {
    ///         host: String::new(),
    ///         port: String::new(),
    ///         name: "tiles".to_string(),
    ///         user: "reader".to_string(),
    ///         password: "secret".to_string(),
    ///     },
    /// );
    ///
    /// let descriptor =
    ///     ConnectionDescriptor::build(&registry, "raster", &TableName::ahn(), "T1").unwrap();
    ///
    /// assert_eq!(
    ///     descriptor.as_str(),
    ///     r"PG:host=localhost port=5432 dbname='tiles' user='reader' password='secret' schema='public' table='data_ahn' where='filename=\'T1\'' mode=1"
    /// );
    /// ```
    pub fn build(
        registry: &DatabaseRegistry,
        alias: &str,
        table: &TableName,
        tile: &str,
    ) -> Result<Self> {
        let database = registry.get(alias)?;

        let render = |password: &str| {
            format!(
                "PG:host={host} port={port} dbname={dbname} user={user} password={password} schema={schema} table={table} where={filter} mode=1",
                host = database.host_or_default(),
                port = database.port_or_default(),
                dbname = quote_value(&database.name),
                user = quote_value(&database.user),
                password = quote_value(password),
                schema = quote_value(SCHEMA),
                table = quote_value(table.as_str()),
                filter = quote_value(&format!("filename={}", sql_string_literal(tile))),
            )
        };

        Ok(Self {
            descriptor: render(&database.password),
            redacted: render("*****"),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.descriptor
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted)
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionDescriptor")
            .field(&self.redacted)
            .finish()
    }
}

/// Quotes a value of the connection string, escaping backslashes and single quotes
fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Renders `value` as SQL string literal
fn sql_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(host: &str, port: &str) -> DatabaseRegistry {
        DatabaseRegistry::default().with_database(
            "raster",
            DatabaseSettings {
                host: host.to_string(),
                port: port.to_string(),
                name: "lizard_raster".to_string(),
                user: "buildout".to_string(),
                password: "buildout".to_string(),
            },
        )
    }

    #[test]
    fn uses_configured_host_and_port() {
        let descriptor = ConnectionDescriptor::build(
            &registry("db.example.org", "6543"),
            "raster",
            &TableName::lgn(),
            "i37en2_08",
        )
        .unwrap();

        assert_eq!(
            descriptor.as_str(),
            r"PG:host=db.example.org port=6543 dbname='lizard_raster' user='buildout' password='buildout' schema='public' table='data_lgn' where='filename=\'i37en2_08\'' mode=1"
        );
    }

    #[test]
    fn falls_back_to_local_defaults() {
        let descriptor =
            ConnectionDescriptor::build(&registry("", ""), "raster", &TableName::ahn(), "T1")
                .unwrap();

        assert!(descriptor.as_str().starts_with("PG:host=localhost port=5432 "));
    }

    #[test]
    fn is_deterministic() {
        let registry = registry("", "");
        let a = ConnectionDescriptor::build(&registry, "raster", &TableName::ahn(), "T1").unwrap();
        let b = ConnectionDescriptor::build(&registry, "raster", &TableName::ahn(), "T1").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn escapes_tile_name() {
        let descriptor = ConnectionDescriptor::build(
            &registry("", ""),
            "raster",
            &TableName::ahn(),
            r"o'brien\x",
        )
        .unwrap();

        assert!(
            descriptor
                .as_str()
                .contains(r"where='filename=\'o\'\'brien\\x\'' mode=1")
        );
    }

    #[test]
    fn unknown_alias_fails_at_build_time() {
        let result =
            ConnectionDescriptor::build(&registry("", ""), "elevation", &TableName::ahn(), "T1");

        assert!(matches!(
            result,
            Err(Error::UnknownDatabaseAlias { alias }) if alias == "elevation"
        ));
    }

    #[test]
    fn display_masks_password() {
        let descriptor =
            ConnectionDescriptor::build(&registry("", ""), "raster", &TableName::ahn(), "T1")
                .unwrap();

        assert!(descriptor.to_string().contains("password='*****'"));
        assert!(!descriptor.to_string().contains("password='buildout'"));
        assert!(descriptor.as_str().contains("password='buildout'"));
        assert!(!format!("{descriptor:?}").contains("password='buildout'"));
    }
}
