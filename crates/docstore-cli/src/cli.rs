use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docstore",
    about = "Anchor document hashes to ledger identities",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// REST gateway URL
    #[arg(long, global = true, default_value = "http://localhost:8008")]
    pub url: String,

    /// Run against an embedded in-memory gateway instead of a REST
    /// gateway. State lives only for the duration of the process.
    #[arg(long, global = true, conflicts_with = "url")]
    pub embedded: bool,

    /// Key directory; defaults to ~/.docstore/keys
    #[arg(long, global = true)]
    pub key_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store the hash of a document under a user's identity
    Store(StoreArgs),
    /// Retrieve the stored document hash for a user
    Retrieve(RetrieveArgs),
    /// Generate a keypair for a user
    Keygen(KeygenArgs),
    /// Run the docstore REST gateway
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct StoreArgs {
    /// Hash of the document
    pub hash_value: String,
    /// Name of the user whose key signs the transaction
    pub username: String,
}

#[derive(Args)]
pub struct RetrieveArgs {
    /// Name of the user
    pub username: String,
}

#[derive(Args)]
pub struct KeygenArgs {
    /// Name of the user
    pub username: String,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:8008")]
    pub bind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_store() {
        let cli = Cli::try_parse_from(["docstore", "store", "deadbeef", "alice"]).unwrap();
        if let Command::Store(args) = cli.command {
            assert_eq!(args.hash_value, "deadbeef");
            assert_eq!(args.username, "alice");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_retrieve() {
        let cli = Cli::try_parse_from(["docstore", "retrieve", "alice"]).unwrap();
        if let Command::Retrieve(args) = cli.command {
            assert_eq!(args.username, "alice");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_keygen() {
        let cli = Cli::try_parse_from(["docstore", "keygen", "bob"]).unwrap();
        assert!(matches!(cli.command, Command::Keygen(_)));
    }

    #[test]
    fn parse_serve_bind() {
        let cli = Cli::try_parse_from(["docstore", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, "0.0.0.0:9000");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_global_url() {
        let cli =
            Cli::try_parse_from(["docstore", "retrieve", "alice", "--url", "http://host:8008"])
                .unwrap();
        assert_eq!(cli.url, "http://host:8008");
        assert!(!cli.embedded);
    }

    #[test]
    fn url_defaults_to_local_gateway() {
        let cli = Cli::try_parse_from(["docstore", "retrieve", "alice"]).unwrap();
        assert_eq!(cli.url, "http://localhost:8008");
        assert!(!cli.embedded);
    }

    #[test]
    fn parse_embedded() {
        let cli = Cli::try_parse_from(["docstore", "--embedded", "retrieve", "alice"]).unwrap();
        assert!(cli.embedded);
    }

    #[test]
    fn embedded_conflicts_with_url() {
        let result = Cli::try_parse_from([
            "docstore",
            "--embedded",
            "--url",
            "http://host:8008",
            "retrieve",
            "alice",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_key_dir() {
        let cli =
            Cli::try_parse_from(["docstore", "keygen", "bob", "--key-dir", "/tmp/keys"]).unwrap();
        assert_eq!(cli.key_dir, Some(PathBuf::from("/tmp/keys")));
    }

    #[test]
    fn store_requires_both_arguments() {
        assert!(Cli::try_parse_from(["docstore", "store", "deadbeef"]).is_err());
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["docstore", "--verbose", "retrieve", "alice"]).unwrap();
        assert!(cli.verbose);
    }
}
