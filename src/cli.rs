use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "registry_harness")]
#[command(about = "Schema bootstrap and login probe for the package registry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override DATABASE_PATH
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the users and packages tables if they are missing
    InitDb,
    /// Print the tables, columns and row counts of the database
    Schema {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Drive a browser through the login page and report where it lands
    ProbeLogin {
        /// Site root; /login is appended (PROBE_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,
        /// Login name (PROBE_USERNAME)
        #[arg(long)]
        username: Option<String>,
        /// Password (PROBE_PASSWORD)
        #[arg(long)]
        password: Option<String>,
        /// WebDriver endpoint (WEBDRIVER_URL)
        #[arg(long)]
        webdriver_url: Option<String>,
        /// Show the browser window
        #[arg(long)]
        headed: bool,
        /// Click "Log In" once before filling the form
        #[arg(long)]
        pre_fill_submit: bool,
        /// Append a statement-injection fragment to the password
        #[arg(long)]
        inject: bool,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve a stub login page implementing the probe's DOM contract
    ServeStub {
        /// Port to listen on (STUB_PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Leave the admin toggle out of the page
        #[arg(long)]
        without_admin_toggle: bool,
    },
}
