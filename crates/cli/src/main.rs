use clap::Parser;
use ferrous_resolv_application::use_cases::LookupRequest;
use ferrous_resolv_domain::{CliOverrides, RecordClass, RecordType};
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;

#[derive(Parser, Debug)]
#[command(name = "ferrous-resolv")]
#[command(version)]
#[command(about = "Ferrous Resolv - asynchronous DNS stub resolver")]
struct Cli {
    /// Name to look up
    name: String,

    /// Record type (A, AAAA, MX, TXT, TYPE65280, ...)
    #[arg(default_value = "A")]
    record_type: RecordType,

    /// Record class (IN, CH, HS, CLASS7, ...)
    #[arg(default_value = "IN")]
    record_class: RecordClass,

    /// Name server to query (IP, IP:PORT or [IPv6]:PORT); repeatable
    #[arg(short = 's', long = "server", value_name = "ADDR")]
    servers: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Use TCP only
    #[arg(long)]
    tcp: bool,

    /// Query all servers at once and take the first valid answer
    #[arg(long)]
    parallel: bool,

    /// Tries per server
    #[arg(long)]
    tries: Option<usize>,

    /// Per-try timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Enable EDNS(0) with this UDP payload size
    #[arg(long, value_name = "SIZE")]
    edns: Option<u16>,

    /// Set the DNSSEC OK bit (enables EDNS(0))
    #[arg(long)]
    dnssec: bool,

    /// Clear the recursion desired bit
    #[arg(long)]
    no_recurse: bool,

    /// Set the checking disabled bit
    #[arg(long)]
    cd: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            servers: self.servers.clone(),
            query_timeout_ms: self.timeout_ms,
            tries: self.tries,
            tcp_only: self.tcp,
            parallel_queries: self.parallel,
            no_recursion: self.no_recurse,
            edns_buffer_size: self.edns,
            dnssec_ok: self.dnssec,
            checking_disabled: self.cd,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config, cli.log_level.is_some());

    let services = di::DnsServices::new(&config)?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, cancelling lookup");
            ctrl_c.cancel();
        }
    });

    let request = LookupRequest::new(cli.name.clone(), cli.record_type)
        .with_class(cli.record_class)
        .with_options(config.resolver.query_options());

    let lookup = services.resolve_name.execute(&request, &cancel).await?;

    println!("{}", lookup.response);
    println!(";; Query time: {} msec", lookup.elapsed.as_millis());
    Ok(())
}
