use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{io::stdout, path::PathBuf, process};
use sysflux_core::{config::CliConfig, Config, MetricsCollector};
use sysflux_report::InfluxConnector;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("sysflux")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Collect host metrics once and print them or write them to InfluxDB")
        // -h selects the InfluxDB host, help is --help only
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .help("Print help")
                .action(ArgAction::Help),
        )
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print the version number and exit")
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Display debug information and print series even when writing to a database")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("prefix")
                .short('P')
                .long("prefix")
                .value_name("PREFIX")
                .help("Change series name prefix [default: host name]"),
        )
        .arg(
            Arg::new("host")
                .short('h')
                .long("host")
                .value_name("HOST:PORT")
                .help("Connect to host [default: localhost:8086]"),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .value_name("USER")
                .help("User for login [default: root]"),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .value_name("PASSWORD")
                .help("Password to use when connecting to server [default: root]"),
        )
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .value_name("NAME")
                .help("Name of the database to use; series are only printed when empty"),
        )
        .arg(
            Arg::new("json-config")
                .long("json-config")
                .value_name("PATH")
                .help("Path to JSON configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn log_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    format!("warn,sysflux={0},sysflux_core={0},sysflux_report={0}", level)
}

fn log_subscriber(verbose: bool) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(verbose))),
        )
        .with_writer(std::io::stderr)
        .finish()
}

fn cli_config(matches: &ArgMatches) -> CliConfig {
    let value = |id: &str| matches.get_one::<String>(id).cloned();

    CliConfig {
        prefix: value("prefix"),
        verbose: matches.get_flag("verbose"),
        host: value("host"),
        username: value("username"),
        password: value("password"),
        database: value("database"),
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let cli_config = cli_config(matches);
    let json_config_path = matches.get_one::<PathBuf>("json-config").map(PathBuf::as_path);

    // Until the configuration is known, only the command line decides the log level
    let config = tracing::subscriber::with_default(log_subscriber(cli_config.verbose), || {
        Config::load(Some(&cli_config), json_config_path)
    })?;
    tracing::subscriber::set_global_default(log_subscriber(config.verbose))?;

    let collector = MetricsCollector::for_current_platform();
    tracing::debug!(
        platform = collector.platform_name(),
        prefix = %config.prefix,
        sink = config.sink.is_some(),
        "Collecting metrics"
    );
    let data = collector.run(&config.prefix);

    let mut stdout = stdout().lock();
    sysflux_report::report(
        &mut stdout,
        &data,
        config.sink.as_ref(),
        config.verbose,
        &InfluxConnector,
    )?;

    Ok(())
}
