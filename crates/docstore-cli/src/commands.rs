use anyhow::Context;
use colored::Colorize;

use docstore_client::{DocumentStoreClient, HttpGateway, LedgerGateway};
use docstore_crypto::{FileKeyStore, SigningKey};
use docstore_server::{GatewayServer, LoopbackGateway, ServerConfig};

use crate::cli::{Cli, Command, KeygenArgs, RetrieveArgs, ServeArgs, StoreArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let keys = match &cli.key_dir {
        Some(dir) => FileKeyStore::new(dir),
        None => FileKeyStore::default_dir()?,
    };
    let transport = if cli.embedded {
        Transport::Embedded
    } else {
        Transport::Http(cli.url.clone())
    };
    match cli.command {
        Command::Store(args) => cmd_store(args, &keys, &transport),
        Command::Retrieve(args) => cmd_retrieve(args, &keys, &transport),
        Command::Keygen(args) => cmd_keygen(args, &keys),
        Command::Serve(args) => cmd_serve(args),
    }
}

enum Transport {
    Http(String),
    Embedded,
}

fn cmd_store(args: StoreArgs, keys: &FileKeyStore, transport: &Transport) -> anyhow::Result<()> {
    let key = load_key(keys, &args.username)?;
    match transport {
        Transport::Http(url) => {
            do_store(DocumentStoreClient::new(HttpGateway::new(url), key), &args)
        }
        Transport::Embedded => do_store(
            DocumentStoreClient::new(LoopbackGateway::in_memory(), key),
            &args,
        ),
    }
}

fn do_store<G: LedgerGateway>(
    client: DocumentStoreClient<G>,
    args: &StoreArgs,
) -> anyhow::Result<()> {
    let ack = client.store(&args.hash_value)?;
    println!(
        "{} Stored hash for {} at {}",
        "✓".green().bold(),
        args.username.yellow(),
        client.address().to_string().cyan()
    );
    println!("  Batch: {}", ack.batch_id.dimmed());
    Ok(())
}

fn cmd_retrieve(
    args: RetrieveArgs,
    keys: &FileKeyStore,
    transport: &Transport,
) -> anyhow::Result<()> {
    let key = load_key(keys, &args.username)?;
    match transport {
        Transport::Http(url) => do_retrieve(
            DocumentStoreClient::new(HttpGateway::new(url), key),
            &args,
        ),
        Transport::Embedded => do_retrieve(
            DocumentStoreClient::new(LoopbackGateway::in_memory(), key),
            &args,
        ),
    }
}

fn do_retrieve<G: LedgerGateway>(
    client: DocumentStoreClient<G>,
    args: &RetrieveArgs,
) -> anyhow::Result<()> {
    match client.retrieve()? {
        Some(data) => {
            let hash = String::from_utf8_lossy(&data);
            println!(
                "{} {} has a document with hash {}",
                "✓".green().bold(),
                args.username.yellow(),
                hash.cyan()
            );
            Ok(())
        }
        None => anyhow::bail!("no document stored for {}", args.username),
    }
}

fn cmd_keygen(args: KeygenArgs, keys: &FileKeyStore) -> anyhow::Result<()> {
    let key = keys.generate(&args.username)?;
    println!(
        "{} Generated keypair for {}",
        "✓".green().bold(),
        args.username.yellow()
    );
    println!("  Public key: {}", key.public_key_hex().cyan());
    println!("  Private key: {}", keys.key_path(&args.username).display());
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let bind_addr = args
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", args.bind))?;
    let server = GatewayServer::new(ServerConfig { bind_addr });
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn load_key(keys: &FileKeyStore, username: &str) -> anyhow::Result<SigningKey> {
    keys.load(username)
        .with_context(|| format!("no key for {username}; run `docstore keygen {username}` first"))
}
