use anyhow::Result;
use clap::Parser;
use pkginfo::registry::PackageSpec;
use std::path::PathBuf;

/// pkginfo - pinned package metadata lookup
///
/// Fetch version, tarball URL, integrity hash and license for exact package
/// versions from an npm-compatible registry and print them as JSON.
///
/// Without --package, looks up react-native-iap@14.4.46 (as "iap") and
/// react-native-nitro-modules@0.31.10 (as "nitro").
///
/// Examples:
///   pkginfo                                   # JSON report for the default packages
///   pkginfo -p lodash=lodash@4.17.21          # JSON report for lodash only
///   pkginfo hashes --output build/hashes.txt  # Write integrity hashes to a file
#[derive(Parser, Debug)]
#[command(author, version = env!("PKGINFO_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Registry base URL (defaults to https://registry.npmjs.org)
    #[arg(
        long = "registry",
        env = "PKGINFO_REGISTRY",
        value_name = "URL",
        global = true
    )]
    pub registry_url: Option<String>,

    /// Package to look up, repeatable (replaces the default packages)
    #[arg(
        long = "package",
        short = 'p',
        value_name = "LABEL=NAME@VERSION",
        global = true
    )]
    pub packages: Vec<PackageSpec>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print package metadata as JSON (default)
    Report,

    /// Write integrity hashes to a file
    Hashes(HashesArgs),
}

#[derive(clap::Args, Debug)]
pub struct HashesArgs {
    /// Output file
    #[arg(long, short = 'o', value_name = "PATH", default_value = "hashes.txt")]
    pub output: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pkginfo::runtime::RealRuntime;

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => {
            pkginfo::commands::report(runtime, cli.registry_url, cli.packages).await?
        }
        Commands::Hashes(args) => {
            pkginfo::commands::hashes(runtime, cli.registry_url, cli.packages, args.output).await?
        }
    }
    Ok(())
}
