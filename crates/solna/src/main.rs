#![forbid(unsafe_code)]

//! Solna CLI: list JKS keystores and export their keys and certificates.

use clap::{Parser, Subcommand};
use solna::{Certificate, Entry, KeyStore};
use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "solna", about = "Read Java KeyStore (JKS) files", version)]
struct Cli {
    /// Log library events at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entries of a keystore
    List {
        /// Keystore file
        file: PathBuf,

        /// Keystore password; the checksum is skipped when absent
        #[arg(long, env = "SOLNA_STOREPASS", hide_env_values = true)]
        storepass: Option<String>,
    },

    /// Export a private key and its certificate chain as PEM
    ExportKey {
        /// Keystore file
        file: PathBuf,

        /// Entry alias
        #[arg(short, long)]
        alias: String,

        /// Keystore password
        #[arg(long, env = "SOLNA_STOREPASS", hide_env_values = true)]
        storepass: Option<String>,

        /// Key password (default: the keystore password)
        #[arg(long, env = "SOLNA_KEYPASS", hide_env_values = true)]
        keypass: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the certificate(s) stored under an alias as PEM
    ExportCert {
        /// Keystore file
        file: PathBuf,

        /// Entry alias
        #[arg(short, long)]
        alias: String,

        /// Keystore password
        #[arg(long, env = "SOLNA_STOREPASS", hide_env_values = true)]
        storepass: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Keystore(#[from] solna::Error),

    #[error("cannot access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List { file, storepass } => cmd_list(&file, storepass.as_deref()),
        Commands::ExportKey {
            file,
            alias,
            storepass,
            keypass,
            output,
        } => cmd_export_key(&file, &alias, storepass.as_deref(), keypass.as_deref(), output),
        Commands::ExportCert {
            file,
            alias,
            storepass,
            output,
        } => cmd_export_cert(&file, &alias, storepass.as_deref(), output),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn cmd_list(file: &Path, storepass: Option<&str>) -> Result<(), CliError> {
    let store = load(file, storepass)?;
    let mut out = String::new();
    for entry in store.entries() {
        let detail = match entry {
            Entry::PrivateKey(key) => format!("chain length {}", key.chain.len()),
            Entry::TrustedCert(cert) => cert.certificate.subject(),
        };
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            entry.alias(),
            entry.kind_name(),
            entry.timestamp_ms(),
            detail
        ));
    }
    write_output(None, out.as_bytes())
}

fn cmd_export_key(
    file: &Path,
    alias: &str,
    storepass: Option<&str>,
    keypass: Option<&str>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let store = load(file, storepass)?;
    let password = keypass.or(storepass).ok_or_else(|| {
        CliError::Usage("a key password is required (--keypass or --storepass)".into())
    })?;
    let entry = store
        .private_key(alias)
        .ok_or_else(|| solna::Error::KeyNotFound(alias.to_string()))?;

    let key = entry.recover(password, store.config())?;
    let mut out = String::from(key.pem.as_str());
    append_pems(&mut out, &entry.chain)?;
    write_output(output, out.as_bytes())
}

fn cmd_export_cert(
    file: &Path,
    alias: &str,
    storepass: Option<&str>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let store = load(file, storepass)?;
    let certs = match store.get(alias) {
        Some(Entry::TrustedCert(entry)) => std::slice::from_ref(&entry.certificate),
        Some(Entry::PrivateKey(entry)) => entry.chain.as_slice(),
        None => return Err(solna::Error::KeyNotFound(alias.to_string()).into()),
    };
    if certs.is_empty() {
        return Err(CliError::Usage(format!("entry {alias:?} has no certificates")));
    }
    let mut out = String::new();
    append_pems(&mut out, certs)?;
    write_output(output, out.as_bytes())
}

// ── Utility functions ────────────────────────────────────────────────

fn load(file: &Path, storepass: Option<&str>) -> Result<KeyStore, CliError> {
    let data = std::fs::read(file).map_err(|source| CliError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    if storepass.is_none() {
        tracing::warn!("no keystore password given, integrity not verified");
    }
    Ok(KeyStore::load(&data, storepass)?)
}

fn append_pems(out: &mut String, certs: &[Certificate]) -> Result<(), CliError> {
    for cert in certs {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&cert.to_pem()?);
    }
    Ok(())
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<(), CliError> {
    match path {
        Some(p) => std::fs::write(&p, data).map_err(|source| CliError::Io { path: p, source }),
        None => {
            use std::io::Write;
            std::io::stdout().write_all(data).map_err(|source| CliError::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })
        }
    }
}
