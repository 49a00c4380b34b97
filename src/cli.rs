//! CLI definitions using clap derive API

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use clap::error::ErrorKind;

/// Single-dash spellings used by existing build-phase scripts
const LEGACY_FLAGS: &[(&str, &str)] = &[("-local", "--local"), ("-verbose", "--verbose")];

/// Long options that consume a value
const VALUE_OPTIONS: &[&str] = &["--api-base", "--cache-dir", "--output-dir", "--timeout"];

/// Variable consulted for the API base when clap's own parse was abandoned
const API_BASE_ENV: &str = "BUNDLESYNC_API_BASE";

/// bundlesync - stage remote resource bundles into an application build
#[derive(Parser, Debug)]
#[command(
    name = "bundlesync",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Download, cache and stage remote resource bundles during a build",
    long_about = "Queries the bundle manifest service for the application being built, \
                  downloads any bundle version missing from the local cache and copies the \
                  current version of every bundle into the application's resources. \
                  Network failures never fail the build.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  bundlesync $API_TOKEN\n    \
                  bundlesync $API_TOKEN -local -verbose\n    \
                  bundlesync $API_TOKEN --cache-dir /tmp/bundles --output-dir ./Resources"
)]
pub struct Cli {
    /// API token for the manifest service
    pub token: Option<String>,

    /// Use the local manifest service instead of production
    #[arg(long)]
    pub local: bool,

    /// Enable verbose diagnostic output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Manifest service base URL (overrides -local)
    #[arg(long, env = "BUNDLESYNC_API_BASE", value_name = "URL")]
    pub api_base: Option<String>,

    /// Exit with a failure status when the manifest cannot be retrieved
    #[arg(long)]
    pub fail_on_manifest_error: bool,

    /// Cache directory (defaults to $CONFIGURATION_BUILD_DIR/LaunchKitCachedBundles)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Staging directory (defaults to the app's LaunchKitRemoteResources folder)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// HTTP timeout in seconds (defaults to the transport default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Arguments that were not understood and are ignored
    #[arg(skip)]
    pub ignored: Vec<String>,
}

impl Cli {
    /// Parse process arguments, accepting the legacy single-dash flags.
    pub fn parse_args() -> Self {
        Self::parse_lenient(std::env::args_os())
    }

    /// Parse arguments without ever rejecting them.
    ///
    /// Help and version requests print and exit as usual. Any other parse
    /// error falls back to [`Cli::scan`], so a stray argument in a build phase
    /// never fails the build.
    pub fn parse_lenient<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let args = normalize_legacy_flags(args);
        match Self::try_parse_from(&args) {
            Ok(cli) => cli,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::DisplayHelp
                        | ErrorKind::DisplayVersion
                        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                e.exit()
            }
            Err(_) => Self::scan(&args, std::env::var(API_BASE_ENV).ok()),
        }
    }

    /// Word-by-word scan of normalized arguments.
    ///
    /// Known flags and options are honoured, the first other argument is the
    /// token (even when it starts with `-`), and the rest end up in `ignored`.
    fn scan(args: &[OsString], api_base: Option<String>) -> Self {
        let mut cli = Self {
            token: None,
            local: false,
            verbose: false,
            api_base,
            fail_on_manifest_error: false,
            cache_dir: None,
            output_dir: None,
            timeout: None,
            ignored: Vec::new(),
        };

        let mut words = args.iter().skip(1).map(|a| a.to_string_lossy().into_owned());
        while let Some(word) = words.next() {
            let (name, inline_value) = match word.split_once('=') {
                Some((name, value)) if name.starts_with("--") => {
                    (name.to_string(), Some(value.to_string()))
                }
                _ => (word.clone(), None),
            };

            match name.as_str() {
                "--local" => cli.local = true,
                "--verbose" | "-v" => cli.verbose = true,
                "--fail-on-manifest-error" => cli.fail_on_manifest_error = true,
                option if VALUE_OPTIONS.contains(&option) => {
                    let Some(value) = inline_value.or_else(|| words.next()) else {
                        cli.ignored.push(word);
                        continue;
                    };
                    match option {
                        "--api-base" => cli.api_base = Some(value),
                        "--cache-dir" => cli.cache_dir = Some(PathBuf::from(value)),
                        "--output-dir" => cli.output_dir = Some(PathBuf::from(value)),
                        _ => match value.parse() {
                            Ok(secs) => cli.timeout = Some(secs),
                            Err(_) => cli.ignored.push(format!("{word} {value}")),
                        },
                    }
                }
                _ if cli.token.is_none() => cli.token = Some(word),
                _ => cli.ignored.push(word),
            }
        }

        cli
    }
}

/// Rewrite `-local` and `-verbose` to their double-dash forms.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            LEGACY_FLAGS
                .iter()
                .find(|(legacy, _)| arg == *legacy)
                .map_or(arg, |(_, modern)| OsString::from(modern))
        })
        .collect()
}
