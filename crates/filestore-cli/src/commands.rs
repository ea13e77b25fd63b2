use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use filestore_server::{FileStoreServer, ServerConfig};
use filestore_store::{DiskFileStore, FileStore, StoreConfig};
use filestore_types::{Extension, FileId, FileKey};

use crate::cli::*;

const DEFAULT_ROOT: &str = "./files";

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let root = cli.root;
    let format = cli.format;
    let mut out = io::stdout();
    match cli.command {
        Command::Serve(args) => cmd_serve(args, root).await,
        Command::Put(args) => cmd_put(&open_local(root)?, args, &format, &mut out),
        Command::Get(args) => cmd_get(&open_local(root)?, args, &mut out),
        Command::Update(args) => cmd_update(&open_local(root)?, args, &format, &mut out),
        Command::Rm(args) => cmd_rm(&open_local(root)?, args, &format, &mut out),
        Command::Ls(_) => cmd_ls(&open_local(root)?, &format, &mut out),
    }
}

fn open_local(root: Option<PathBuf>) -> anyhow::Result<DiskFileStore> {
    let root = root.unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
    Ok(DiskFileStore::open(StoreConfig::with_root(root))?)
}

async fn cmd_serve(args: ServeArgs, root: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    if let Some(root) = root {
        config.store.root = root;
    }
    if args.no_atomic {
        config.store.atomic_writes = false;
    }
    println!(
        "FileStore server on {} (root: {})",
        config.bind_addr.to_string().bold(),
        config.store.root.display()
    );
    FileStoreServer::new(config)?.serve().await?;
    Ok(())
}

/// Key for a file the caller already holds an id for. The extension gets the
/// same normalization create applied, so `--ext pdf` finds `<id>.pdf`. An
/// explicit `--ext ""` addresses a file stored without an extension.
fn key_for(id: &str, ext: Option<&str>) -> anyhow::Result<FileKey> {
    let extension = match ext {
        Some("") => Extension::verbatim("")?,
        other => Extension::normalize(other)?,
    };
    Ok(FileKey::new(FileId::parse(id)?, extension))
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn cmd_put(
    store: &dyn FileStore,
    args: PutArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let content = read_input(&args.path)?;
    let ext = args
        .ext
        .or_else(|| args.path.extension().and_then(|e| e.to_str()).map(String::from));
    let key = store.create(&content, ext.as_deref())?;
    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "id": key.id.as_str(), "extension": key.extension.as_str() })
        )?,
        OutputFormat::Text => writeln!(
            out,
            "{} Stored {} bytes as {}{}",
            "✓".green().bold(),
            content.len(),
            key.id.as_str().yellow(),
            key.extension
        )?,
    }
    Ok(())
}

fn cmd_get(store: &dyn FileStore, args: GetArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let key = key_for(&args.id, args.ext.as_deref())?;
    let data = store.read(&key)?;
    match &args.output {
        Some(path) => fs::write(path, &data).with_context(|| format!("writing {}", path.display()))?,
        None => out.write_all(&data)?,
    }
    Ok(())
}

fn cmd_update(
    store: &dyn FileStore,
    args: UpdateArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let key = key_for(&args.id, args.ext.as_deref())?;
    let content = read_input(&args.path)?;
    let existed = store.exists(&key)?;
    store.update(&key, &content)?;
    let verb = if existed { "Updated" } else { "Created" };
    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "updated": key.file_name(), "created": !existed })
        )?,
        OutputFormat::Text => writeln!(out, "{} {} {}", "✓".green().bold(), verb, key.to_string().yellow())?,
    }
    Ok(())
}

fn cmd_rm(
    store: &dyn FileStore,
    args: RmArgs,
    format: &OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let key = key_for(&args.id, args.ext.as_deref())?;
    store.delete(&key)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", json!({ "deleted": key.file_name() }))?,
        OutputFormat::Text => writeln!(out, "{} Deleted {}", "✓".green().bold(), key.to_string().yellow())?,
    }
    Ok(())
}

fn cmd_ls(store: &dyn FileStore, format: &OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let keys = store.list()?;
    match format {
        OutputFormat::Json => {
            let files: Vec<_> = keys
                .iter()
                .map(|k| json!({ "id": k.id.as_str(), "extension": k.extension.as_str() }))
                .collect();
            writeln!(out, "{}", json!({ "files": files }))?;
        }
        OutputFormat::Text if keys.is_empty() => writeln!(out, "No files stored.")?,
        OutputFormat::Text => {
            for key in &keys {
                writeln!(out, "{}{}", key.id.as_str().yellow(), key.extension)?;
            }
        }
    }
    Ok(())
}
