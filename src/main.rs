use clap::Parser;
use sniperdb::adapter::outbound::sqlite::store::SqliteStore;
use sniperdb::error::Error;
use sniperdb::infrastructure::config::settings::Config;
use sniperdb::port::outbound::store::UserStore;
use tracing::{error, info};

/// Open the user store and make sure its schema exists.
#[derive(Debug, Parser)]
#[command(name = "sniperdb", version, about)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

/// `EX_TEMPFAIL`: the store itself failed and a later run may succeed.
const EXIT_STORAGE: i32 = 75;

fn exit_code(err: &Error) -> i32 {
    if err.is_storage() {
        EXIT_STORAGE
    } else {
        1
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = match Config::load_or_default(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!(path = %config.database.path, "sniperdb starting");

    let store = match SqliteStore::open(&config.database) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Failed to open store");
            std::process::exit(exit_code(&e));
        }
    };

    if let Err(e) = store.initialize().await {
        error!(error = %e, "Failed to initialize store");
        std::process::exit(exit_code(&e));
    }

    match store.get_all_users().await {
        Ok(users) => info!(users = users.len(), "Store ready"),
        Err(e) => {
            error!(error = %e, retryable = e.is_storage(), "Failed to read users");
            std::process::exit(exit_code(&e));
        }
    }
}
