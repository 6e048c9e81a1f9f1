use chk_cert::args::{self, Args};
use chk_cert::config;
use chk_cert::errors::*;
use env_logger::Env;
use std::env;
use std::process;
use structopt::StructOpt;
use time::OffsetDateTime;

fn main() -> Result<()> {
    let args = Args::from_iter(args::normalize(env::args_os()));

    let logging = match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::init_from_env(Env::default().default_filter_or(logging));

    let config = config::load(args.config.as_deref())?;
    debug!("Loaded runtime config: {:?}", config);

    let check = args
        .subcommand
        .into_request()
        .validate(&config)
        .context("Invalid arguments")?;
    debug!("Running check: {:?}", check);

    let result = check.run(OffsetDateTime::now_utc());
    println!("{}", result);
    process::exit(result.exit_code);
}
