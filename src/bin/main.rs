//! mantis-impala CLI - inspect the Impala dialect adapter
//!
//! Usage:
//!   mantis-impala describe
//!   mantis-impala connect [--connection <name>] [--host <h>] [--database <db>] ...
//!   mantis-impala map-type <native type>
//!   mantis-impala humanize <driver message>
//!   mantis-impala truncate --unit <unit> --column <col> [--dialect <dialect>]
//!   mantis-impala date-add --column <col> --amount <n> --unit <unit> [--dialect <dialect>]
//!
//! Examples:
//!   mantis-impala connect --database sales --options "useSSL=true"
//!   mantis-impala truncate --unit quarter-of-year --column created_at
//!   mantis-impala date-add --column created_at --amount -3 --unit day

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use mantis_impala::config::{ConnectionDescriptor, ConnectionParams, Settings};
use mantis_impala::humanize::{classify, humanize};
use mantis_impala::sql::dialect::{Dialect, SqlDialect, IMPALA_CAPABILITIES};
use mantis_impala::sql::expr::col;
use mantis_impala::sql::types::{map_native_type, normalize_type_name};
use mantis_impala::temporal::{GranularityUnit, IntervalUnit};

#[derive(Parser)]
#[command(name = "mantis-impala")]
#[command(about = "Impala dialect adapter for the Mantis SQL layer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Impala capability descriptor as JSON
    Describe,

    /// Build a connection descriptor and print it
    Connect {
        /// Named connection from the settings file
        #[arg(short, long)]
        connection: Option<String>,

        /// Server hostname
        #[arg(long)]
        host: Option<String>,

        /// Server port
        #[arg(long)]
        port: Option<u16>,

        /// Database name
        #[arg(long)]
        database: Option<String>,

        /// Enable SSL
        #[arg(long)]
        ssl: bool,

        /// Additional options (`key=value;key=value`)
        #[arg(long)]
        options: Option<String>,
    },

    /// Classify a native column type
    MapType {
        /// Native type name, e.g. `BIGINT UNSIGNED` or `decimal(10,2)`
        native: String,
    },

    /// Humanize a driver error message
    Humanize {
        /// Raw driver message
        message: String,
    },

    /// Render a truncation/extraction expression
    Truncate {
        /// Granularity unit, e.g. `month` or `day-of-week`
        #[arg(short, long)]
        unit: GranularityUnit,

        /// Column to truncate
        #[arg(short, long)]
        column: String,

        /// SQL dialect to generate
        #[arg(short, long, default_value = "impala")]
        dialect: DialectArg,
    },

    /// Render a date arithmetic expression
    DateAdd {
        /// Column to shift
        #[arg(short, long)]
        column: String,

        /// Amount to add (fractions truncate toward zero)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,

        /// Interval unit, e.g. `day` or `months`
        #[arg(short, long)]
        unit: IntervalUnit,

        /// SQL dialect to generate
        #[arg(short, long, default_value = "impala")]
        dialect: DialectArg,
    },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Impala,
    Generic,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Impala => Dialect::Impala,
            DialectArg::Generic => Dialect::Generic,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.logging.level);

    match cli.command {
        Commands::Describe => cmd_describe(),
        Commands::Connect {
            connection,
            host,
            port,
            database,
            ssl,
            options,
        } => {
            let overrides = ConnectOverrides {
                host,
                port,
                database,
                ssl,
                options,
            };
            cmd_connect(&settings, connection, overrides)
        }
        Commands::MapType { native } => cmd_map_type(&native),
        Commands::Humanize { message } => cmd_humanize(&message),
        Commands::Truncate {
            unit,
            column,
            dialect,
        } => cmd_truncate(unit, &column, dialect.into()),
        Commands::DateAdd {
            column,
            amount,
            unit,
            dialect,
        } => cmd_date_add(&column, amount, unit, dialect.into()),
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_describe() -> ExitCode {
    match serde_json::to_string_pretty(&IMPALA_CAPABILITIES) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing capabilities: {}", e);
            ExitCode::FAILURE
        }
    }
}

struct ConnectOverrides {
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    ssl: bool,
    options: Option<String>,
}

fn cmd_connect(settings: &Settings, connection: Option<String>, overrides: ConnectOverrides) -> ExitCode {
    let mut params = match connection {
        Some(name) => match settings.resolved_connection(&name) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ConnectionParams::default(),
    };

    if let Some(host) = overrides.host {
        params.host = host;
    }
    if let Some(port) = overrides.port {
        params.port = Some(port);
    }
    if let Some(database) = overrides.database {
        params.database = database;
    }
    if overrides.ssl {
        params.ssl = true;
    }
    if let Some(options) = overrides.options {
        params.additional_options = Some(options);
    }

    let built = match ConnectionDescriptor::build(&params) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output = serde_json::json!({
        "descriptor": &built.value,
        "connection_string": built.value.to_connection_string(),
        "advisories": &built.advisories,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing descriptor: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_map_type(native: &str) -> ExitCode {
    println!("{} -> {}", normalize_type_name(native), map_native_type(native));
    ExitCode::SUCCESS
}

fn cmd_humanize(message: &str) -> ExitCode {
    match classify(message) {
        Some(category) => println!("{} ({:?})", humanize(message), category),
        None => println!("{}", humanize(message)),
    }
    ExitCode::SUCCESS
}

fn cmd_truncate(unit: GranularityUnit, column: &str, dialect: Dialect) -> ExitCode {
    println!("{}", dialect.truncate(unit, col(column)).to_sql(dialect));
    ExitCode::SUCCESS
}

fn cmd_date_add(column: &str, amount: f64, unit: IntervalUnit, dialect: Dialect) -> ExitCode {
    if !amount.is_finite() {
        eprintln!("Error: amount must be a finite number");
        return ExitCode::FAILURE;
    }
    println!("{}", dialect.add_interval(col(column), amount, unit).to_sql(dialect));
    ExitCode::SUCCESS
}
