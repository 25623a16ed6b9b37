use serde::{Deserialize, Serialize};

/// Database engines a profile can describe, in menu order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "mariadb")]
    MariaDb,
    #[serde(rename = "postgresql")]
    Postgres,
    #[serde(rename = "sqlite")]
    Sqlite,
    #[serde(rename = "sqlserver")]
    SqlServer,
    #[serde(rename = "redshift")]
    Redshift,
    #[serde(rename = "cockroachdb")]
    CockroachDb,
}

impl ConnectionType {
    pub const ALL: &'static [ConnectionType] = &[
        Self::MySql,
        Self::MariaDb,
        Self::Postgres,
        Self::Sqlite,
        Self::SqlServer,
        Self::Redshift,
        Self::CockroachDb,
    ];

    /// Maps a raw user- or URL-supplied engine name to a known type.
    ///
    /// Best-effort classification, not validation: empty input, unknown
    /// names, and unknown aliases all resolve to `None` without error.
    pub fn normalize(raw: Option<&str>) -> Option<ConnectionType> {
        let raw = raw?.trim();
        if raw.is_empty() {
            return None;
        }
        let canonical = match raw {
            "psql" | "postgres" => "postgresql",
            "mssql" => "sqlserver",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == canonical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Postgres => "postgresql",
            Self::Sqlite => "sqlite",
            Self::SqlServer => "sqlserver",
            Self::Redshift => "redshift",
            Self::CockroachDb => "cockroachdb",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::MariaDb => "MariaDB",
            Self::Postgres => "Postgres",
            Self::Sqlite => "SQLite",
            Self::SqlServer => "SQL Server",
            Self::Redshift => "Amazon Redshift",
            Self::CockroachDb => "CockroachDB",
        }
    }

    /// Conventional port for the engine, `None` where there is no
    /// network convention (sqlite) or the provider assigns one (redshift).
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::MySql | Self::MariaDb => Some(3306),
            Self::Postgres => Some(5432),
            Self::SqlServer => Some(1433),
            Self::CockroachDb => Some(26257),
            Self::Sqlite | Self::Redshift => None,
        }
    }
}

/// SSH tunnel authentication strategies. The profile stores the mode as a
/// raw string, so these are constants rather than an enum.
pub mod ssh_mode {
    pub const AGENT: &str = "agent";
    pub const USERPASS: &str = "userpass";
    pub const KEYFILE: &str = "keyfile";
}
