//! Database provisioning for the embedded PostgreSQL suites.
//!
//! Databases are dropped and recreated through the plain `postgres` client;
//! schemas come from the migrations the server applies at startup.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use recipe_backend::outbound::persistence::run_pending_migrations;

use super::format_postgres_error;

/// Drop `name` if present and create it empty.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE);"))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\";"))
        .map_err(|err| format_postgres_error(&err))
}

/// Apply every embedded migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    run_pending_migrations(url)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

/// Open a synchronous client for assertions that bypass the repositories.
pub fn connect(url: &str) -> Result<Client, String> {
    Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))
}
