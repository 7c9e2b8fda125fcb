// Key reconstruction from

// Shamir A.,
// How to Share a Secret,
// Communications of the ACM, 22, 1979, pp. 612--613.

// This version works over the integers rather than a finite field:
// share values are arbitrary-radix text of any length, decoded to big
// integers, and the constant term is found by exact Lagrange
// interpolation at zero.

// Each input file is one share set:
//
// { "keys": { "n": N, "k": K },
//   "X": { "base": B, "value": "digits" }, ... }
//
// K  quorum value
// X  this share number (x coordinate)
// B  radix of the digits, 2 to 36
//
// Files are processed independently; a bad file is reported on stderr
// and doesn't stop the others.

use std::fs::File;
use std::io::BufReader;
use std::process;

use clap::{App, Arg};
use num_bigint::{BigInt, Sign};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ssss_combine::{reconstruct_share_set, Config, Selection, ShareError, ShareSet, Validation};

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn secret_as_hex(secret: &BigInt) -> Result<String, String> {
    let (sign, bytes) = secret.to_bytes_be();
    if sign == Sign::Minus {
        return Err(format!("secret {} is negative and has no hex form", secret));
    }
    Ok(hex::encode(bytes))
}

fn combine(filename: &str, config: &Config, as_hex: bool) -> Result<String, String> {
    let file = File::open(filename).map_err(|e| format!("unable to open {}: {}", filename, e))?;
    let set = ShareSet::from_reader(BufReader::new(file)).map_err(|e| e.to_string())?;
    let result = reconstruct_share_set(&set, config).map_err(|e| e.to_string())?;

    info!(file = filename, subset = ?result.subset, checked = result.checked, "reconstructed");

    let secret = match result.verified_secret() {
        Ok(secret) => secret,
        Err(e @ ShareError::InconsistentShares { .. }) => {
            let (value, votes) = result.majority();
            return Err(format!(
                "{} (majority value {} with {} of {} votes)",
                e,
                value,
                votes,
                result.checked + 1
            ));
        }
        Err(e) => return Err(e.to_string()),
    };

    if as_hex {
        secret_as_hex(&secret)
    } else {
        Ok(secret.to_string())
    }
}

fn main() {
    let matches = App::new("shamir-combine")
        .version("1.0")
        .author("Declan Malone <idablack@users.sourceforge.net>")
        .about("Shamir's Secret Sharing Scheme")
        .usage("shamir-combine [OPTIONS] <FILE>...")
        .arg(
            Arg::with_name("FILE")
                .help("share set JSON files")
                .required(true)
                .multiple(true),
        )
        .arg(
            Arg::with_name("validate")
                .long("validate")
                .takes_value(true)
                .possible_values(&["off", "shifted", "exhaustive", "auto"])
                .default_value("auto")
                .help("which alternate share subsets to cross-check"),
        )
        .arg(
            Arg::with_name("select")
                .long("select")
                .takes_value(true)
                .possible_values(&["smallest", "index"])
                .default_value("smallest")
                .help("smallest: k smallest x; index: shares 1..=k"),
        )
        .arg(
            Arg::with_name("lenient")
                .long("lenient")
                .help("skip shares that fail to decode"),
        )
        .arg(
            Arg::with_name("cross-check")
                .long("cross-check")
                .help("also solve the primary subset by Gaussian elimination"),
        )
        .arg(
            Arg::with_name("hex")
                .long("hex")
                .help("print the secret as big-endian hex"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("more logging; repeat for more"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    // possible_values has already vetted these
    let validation: Validation = matches
        .value_of("validate")
        .unwrap_or("auto")
        .parse()
        .unwrap_or(Validation::Auto);
    let selection: Selection = matches
        .value_of("select")
        .unwrap_or("smallest")
        .parse()
        .unwrap_or(Selection::SmallestX);
    let config = Config {
        validation,
        selection,
        lenient: matches.is_present("lenient"),
        cross_check: matches.is_present("cross-check"),
        ..Config::default()
    };
    let as_hex = matches.is_present("hex");

    let mut failed = false;
    for filename in matches.values_of("FILE").into_iter().flatten() {
        match combine(filename, &config, as_hex) {
            Ok(secret) => println!("The secret (constant term) for {} is: {}", filename, secret),
            Err(e) => {
                eprintln!("Error: {}: {}", filename, e);
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}
