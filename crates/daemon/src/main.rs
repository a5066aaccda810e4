use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use url::Url;

use radrest::Tables;
use radrest_daemon::{process, ServiceConfig};

#[derive(Parser, Debug)]
#[command(name = "radrestd")]
#[command(about = "REST API daemon for FreeRADIUS configuration tables", version)]
struct Args {
    /// Address the HTTP API listens on
    #[arg(long, env = "RADREST_LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    listen_addr: SocketAddr,

    /// External base URL used in Location and Link headers
    #[arg(long, env = "RADREST_API_URL", default_value = "http://localhost:8000")]
    api_url: Url,

    /// Shared secret for the X-API-Key header, unset disables authentication
    #[arg(long, env = "RADREST_API_KEY")]
    api_key: Option<String>,

    /// Maximum number of entries returned by list endpoints
    #[arg(long, env = "RADREST_PAGE_SIZE", default_value_t = radrest::DEFAULT_PAGE_SIZE)]
    page_size: i64,

    /// SQLite database URL, e.g. sqlite:/var/lib/radrest/radius.db
    #[arg(long, env = "RADREST_DATABASE_URL", default_value = "sqlite::memory:")]
    database_url: Url,

    #[arg(long, env = "RADREST_LOG_LEVEL", default_value = "info")]
    log_level: tracing::Level,

    /// Directory for log files, logs to stdout only when unset
    #[arg(long, env = "RADREST_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(flatten)]
    tables: TableArgs,
}

/// Table name overrides for deployments that renamed the standard schema.
#[derive(clap::Args, Debug)]
struct TableArgs {
    #[arg(long, env = "RADREST_RADCHECK_TABLE", default_value = "radcheck")]
    radcheck_table: String,

    #[arg(long, env = "RADREST_RADREPLY_TABLE", default_value = "radreply")]
    radreply_table: String,

    #[arg(
        long,
        env = "RADREST_RADGROUPCHECK_TABLE",
        default_value = "radgroupcheck"
    )]
    radgroupcheck_table: String,

    #[arg(
        long,
        env = "RADREST_RADGROUPREPLY_TABLE",
        default_value = "radgroupreply"
    )]
    radgroupreply_table: String,

    #[arg(
        long,
        env = "RADREST_RADUSERGROUP_TABLE",
        default_value = "radusergroup"
    )]
    radusergroup_table: String,

    #[arg(long, env = "RADREST_NAS_TABLE", default_value = "nas")]
    nas_table: String,
}

impl From<TableArgs> for Tables {
    fn from(args: TableArgs) -> Self {
        Tables {
            radcheck: args.radcheck_table,
            radreply: args.radreply_table,
            radgroupcheck: args.radgroupcheck_table,
            radgroupreply: args.radgroupreply_table,
            radusergroup: args.radusergroup_table,
            nas: args.nas_table,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = ServiceConfig {
        listen_addr: args.listen_addr,
        api_url: args.api_url,
        api_key: args.api_key,
        page_size: args.page_size,
        database_url: args.database_url,
        tables: args.tables.into(),
        log_level: args.log_level,
        log_dir: args.log_dir,
    };

    process::spawn_service(&config).await;
}
