use crate::check::{CheckRequest, Password, Source};
use std::ffi::OsString;
use std::path::PathBuf;
use structopt::clap::AppSettings;
use structopt::StructOpt;

/// Flags that may be written with a single dash, like `-in cert.pem`
const LONG_FLAGS: &[&str] = &["in", "inform", "pass", "nopass", "warn", "crit", "config"];
/// Flags from `LONG_FLAGS` that consume the following argument
const VALUE_FLAGS: &[&str] = &["in", "inform", "pass", "warn", "crit", "config"];

#[derive(Debug, StructOpt)]
#[structopt(
    name = "chk-cert",
    about = "Check how many days a certificate has left before it expires",
    global_settings = &[AppSettings::ColoredHelp, AppSettings::AllowNegativeNumbers]
)]
pub struct Args {
    /// Verbose logging output (Can be set multiple times)
    #[structopt(short, long, global = true, parse(from_occurrences))]
    pub verbose: u8,
    /// Silent output (except errors)
    #[structopt(short, long, global = true)]
    pub quiet: bool,
    /// Read default thresholds and the PKCS12 password from a TOML file
    #[structopt(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,
    #[structopt(subcommand)]
    pub subcommand: SubCommand,
}

#[derive(Debug, Clone, StructOpt)]
pub enum SubCommand {
    /// Check the leaf certificate of a PKCS12 bundle
    Pkcs12(Pkcs12Args),
    /// Check the leaf certificate of a PEM or DER file
    X509(X509Args),
}

#[derive(Debug, Clone, StructOpt)]
pub struct Pkcs12Args {
    /// The PKCS12 bundle
    #[structopt(long = "in", value_name = "path")]
    pub input: Option<PathBuf>,
    /// The password of the bundle
    #[structopt(long, value_name = "secret", allow_hyphen_values = true)]
    pub pass: Option<String>,
    /// Indicates the bundle is not protected by a password
    #[structopt(long, conflicts_with = "pass")]
    pub nopass: bool,
    #[structopt(flatten)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, StructOpt)]
pub struct X509Args {
    /// The x509 certificate file
    #[structopt(long = "in", value_name = "path")]
    pub input: Option<PathBuf>,
    /// The format of the input file (pem or der)
    #[structopt(long, value_name = "format", default_value = "pem")]
    pub inform: String,
    #[structopt(flatten)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Default, StructOpt)]
pub struct Thresholds {
    /// Warn if the certificate expires within this many days [default: 30]
    #[structopt(long, value_name = "days")]
    pub warn: Option<i64>,
    /// Critical if the certificate expires within this many days [default: 15]
    #[structopt(long, value_name = "days")]
    pub crit: Option<i64>,
}

impl SubCommand {
    pub fn into_request(self) -> CheckRequest {
        match self {
            SubCommand::Pkcs12(args) => CheckRequest {
                input: args.input,
                source: Source::Pkcs12(if args.nopass {
                    Password::Disabled
                } else if let Some(pass) = args.pass {
                    Password::Given(pass)
                } else {
                    Password::Missing
                }),
                thresholds: args.thresholds,
            },
            SubCommand::X509(args) => CheckRequest {
                input: args.input,
                source: Source::X509 {
                    inform: args.inform,
                },
                thresholds: args.thresholds,
            },
        }
    }
}

/// Rewrite `-in` style flags to `--in` so clap accepts them
pub fn normalize<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut expect_value = false;
    let mut passthrough = false;

    for arg in args {
        if passthrough || expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }

        let s = match arg.to_str() {
            Some(s) => s,
            None => {
                out.push(arg);
                continue;
            }
        };

        if s == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let flag = s.strip_prefix("--").or_else(|| s.strip_prefix('-'));
        let (name, inline_value) = match flag {
            Some(flag) => match flag.find('=') {
                Some(idx) => (&flag[..idx], true),
                None => (flag, false),
            },
            None => {
                out.push(arg);
                continue;
            }
        };

        if !LONG_FLAGS.contains(&name) {
            out.push(arg);
            continue;
        }

        expect_value = !inline_value && VALUE_FLAGS.contains(&name);
        if s.starts_with("--") {
            out.push(arg);
        } else {
            out.push(format!("-{}", s).into());
        }
    }

    out
}
