mod cli;

use std::net::SocketAddr;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Commands};
use registry_harness::{
    config::Config,
    db::{self, TableSchema},
    logging,
    probe::{self, Credentials, ProbeOptions},
    stub::{self, StubPage},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = cli.database {
        config.database_path = path;
    }

    logging::init(config.log_level.as_deref(), config.log_file.as_deref())?;

    match cli.command {
        Commands::InitDb => {
            db::initialize_schema(&config.database_path).await?;
            println!("Schema ready at {}", config.database_path.display());
        }
        Commands::Schema { json } => {
            let tables = db::describe_schema(&config.database_path)
                .await
                .with_context(|| format!("reading {}", config.database_path.display()))?;
            let pool = db::open_pool(&config.database_path).await?;

            let mut counts = Vec::with_capacity(tables.len());
            for table in &tables {
                counts.push(db::count_rows(&pool, &table.name).await?);
            }
            pool.close().await;

            if json {
                let report: Vec<_> = tables
                    .iter()
                    .zip(&counts)
                    .map(|(table, rows)| serde_json::json!({ "table": table, "rows": rows }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for (table, rows) in tables.iter().zip(&counts) {
                    print_table(table, *rows);
                }
            }
        }
        Commands::ProbeLogin {
            base_url,
            username,
            password,
            webdriver_url,
            headed,
            pre_fill_submit,
            inject,
            json,
        } => {
            let Some(base_url) = base_url.or(config.base_url.clone()) else {
                bail!("no target: pass --base-url or set PROBE_BASE_URL");
            };
            let Some(username) = username.or(config.username.clone()) else {
                bail!("no username: pass --username or set PROBE_USERNAME");
            };
            let password = password.or(config.password.clone()).unwrap_or_default();

            let mut credentials = Credentials::new(username, password);
            if inject {
                credentials = credentials.with_injection_suffix();
            }

            let mut options = ProbeOptions::from(&config);
            if let Some(url) = webdriver_url {
                options.webdriver_url = url;
            }
            options.headless &= !headed;
            options.pre_fill_submit |= pre_fill_submit;

            let report = probe::probe_login(&base_url, &credentials, &options).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Current Page Title: {}", report.title);
                println!("Current URL: {}", report.url);
                if !report.settled {
                    println!("(no reaction to the submit before the settle timeout)");
                }
            }
        }
        Commands::ServeStub {
            port,
            without_admin_toggle,
        } => {
            let addr = SocketAddr::from(([127, 0, 0, 1], port.unwrap_or(config.stub_port)));
            let page = if without_admin_toggle {
                StubPage::WithoutAdminToggle
            } else {
                StubPage::Full
            };
            stub::serve(addr, page).await?;
        }
    }

    Ok(())
}

fn print_table(table: &TableSchema, rows: i64) {
    println!("{} ({} rows)", table.name, rows);
    for column in &table.columns {
        let mut flags = Vec::new();
        if column.primary_key {
            flags.push("PRIMARY KEY");
        }
        if column.not_null {
            flags.push("NOT NULL");
        }
        if column.unique {
            flags.push("UNIQUE");
        }
        println!("  {:<26} {:<8} {}", column.name, column.declared_type, flags.join(" "));
    }
}
