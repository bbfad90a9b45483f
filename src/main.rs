use anyhow::{bail, Context, Result};
use std::env;
use std::path::Path;
use tracing::info;

use customer_api::{load_csv, open_store, AppConfig, CustomerService};

const USAGE: &str = "usage: customer-api <import <file.csv> | list>";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = AppConfig::load().context("Failed to load configuration")?;
    customer_api::config::init_logging(&config);

    let store = open_store(&config.database.path)?;
    let service = CustomerService::new(store);

    match args.get(1).map(String::as_str) {
        Some("import") => {
            let csv_path = args.get(2).context(USAGE)?;
            run_import(&service, Path::new(csv_path))
        }
        Some("list") => run_list(&service),
        _ => bail!(USAGE),
    }
}

fn run_import(service: &CustomerService, csv_path: &Path) -> Result<()> {
    let requests = load_csv(csv_path)
        .with_context(|| format!("Failed to read {}", csv_path.display()))?;
    info!(rows = requests.len(), "loaded CSV");

    let mut created = 0;
    for request in requests {
        service.create(request)?;
        created += 1;
    }

    println!("Imported {} customers", created);
    Ok(())
}

fn run_list(service: &CustomerService) -> Result<()> {
    let customers = service.list()?;
    println!("{}", serde_json::to_string_pretty(&customers)?);
    Ok(())
}
