use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bookstore_core::{Book, starter_catalog, validate_book};
use bookstore_sqlite::Migration;
use clap::{Args, Parser, Subcommand};

mod prompt;
mod session;

use session::ClerkSession;

#[derive(Debug, Parser)]
#[command(name = "bookstore")]
#[command(about = "Interactive bookstore clerk over a local SQLite catalog")]
struct Cli {
    /// Database file path.
    #[arg(long, default_value = "ebookstore.db")]
    db: PathBuf,
    /// Table prefix.
    #[arg(long, default_value = "bs_")]
    prefix: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Catalog table migration and seeding operations.
    Migrate(MigrateArgs),
}

#[derive(Debug, Args)]
struct MigrateArgs {
    #[command(subcommand)]
    operation: MigrateOperation,
}

#[derive(Debug, Subcommand)]
enum MigrateOperation {
    /// Create the catalog table in the database.
    Up,
    /// Drop the catalog table from the database.
    Down,
    /// Seed the catalog with books from a JSON file or the starter catalog.
    Seed(SeedArgs),
    /// Drop the table, recreate, and reseed.
    Refresh(SeedArgs),
    /// Show table and record-count status.
    Status,
}

#[derive(Debug, Args)]
struct SeedArgs {
    /// JSON file holding an array of books; defaults to the built-in
    /// starter catalog.
    #[arg(long)]
    source: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Migrate(args)) => run_migrate(&cli.db, &cli.prefix, args),
        None => run_clerk(&cli.db, &cli.prefix),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Default mode: ensure the schema, seed the starter catalog, and run the
/// interactive menu over one connection held for the whole session.
fn run_clerk(db: &Path, prefix: &str) -> Result<(), String> {
    tracing::debug!(db = %db.display(), prefix, "opening catalog");
    let conn = open_database(db)?;
    let mut migration = Migration::new(conn, prefix)
        .map_err(|e| format!("Failed to initialize catalog: {e}"))?;
    migration
        .up()
        .map_err(|e| format!("Failed to create catalog table: {e}"))?;

    let report = migration
        .seed(&starter_catalog())
        .map_err(|e| format!("Failed to seed catalog: {e}"))?;
    if report.conflicting_id.is_some() {
        println!("Data already exists in the table.");
    }

    let conn = migration.into_connection();
    let stdin = io::stdin();
    let mut session = ClerkSession::new(&conn, prefix, stdin.lock(), io::stdout())
        .map_err(|e| format!("Failed to start session: {e}"))?;
    session.run().map_err(|e| format!("Session failed: {e}"))
}

fn run_migrate(db: &Path, prefix: &str, args: MigrateArgs) -> Result<(), String> {
    match args.operation {
        MigrateOperation::Up => run_migrate_up(db, prefix),
        MigrateOperation::Down => run_migrate_down(db, prefix),
        MigrateOperation::Seed(a) => run_migrate_seed(db, prefix, a),
        MigrateOperation::Refresh(a) => run_migrate_refresh(db, prefix, a),
        MigrateOperation::Status => run_migrate_status(db, prefix),
    }
}

fn run_migrate_up(db: &Path, prefix: &str) -> Result<(), String> {
    let mut migration = open_migration(db, prefix)?;
    migration
        .up()
        .map_err(|e| format!("Migration up failed: {e}"))?;
    println!(
        "Migration up complete. Catalog table created with prefix '{}' in '{}'.",
        prefix,
        db.display()
    );
    Ok(())
}

fn run_migrate_down(db: &Path, prefix: &str) -> Result<(), String> {
    let mut migration = open_migration(db, prefix)?;
    migration
        .down()
        .map_err(|e| format!("Migration down failed: {e}"))?;
    println!(
        "Migration down complete. Catalog table with prefix '{}' dropped from '{}'.",
        prefix,
        db.display()
    );
    Ok(())
}

fn run_migrate_seed(db: &Path, prefix: &str, args: SeedArgs) -> Result<(), String> {
    let books = load_seed_books(args.source.as_deref())?;
    let mut migration = open_migration(db, prefix)?;
    let report = migration
        .seed(&books)
        .map_err(|e| format!("Seed failed: {e}"))?;
    print_seed_report(&report);
    Ok(())
}

fn run_migrate_refresh(db: &Path, prefix: &str, args: SeedArgs) -> Result<(), String> {
    let books = load_seed_books(args.source.as_deref())?;
    let mut migration = open_migration(db, prefix)?;
    let report = migration
        .refresh(&books)
        .map_err(|e| format!("Refresh failed: {e}"))?;
    println!("Refresh complete (table dropped, recreated, and reseeded):");
    print_seed_report(&report);
    Ok(())
}

fn run_migrate_status(db: &Path, prefix: &str) -> Result<(), String> {
    let migration = open_migration(db, prefix)?;
    let status = migration
        .status()
        .map_err(|e| format!("Failed to get migration status: {e}"))?;
    println!("Migration Status:");
    println!(
        "  Table exists: {}",
        if status.tables_exist { "yes" } else { "no" }
    );
    println!("  Book count: {}", status.book_count);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_database(db: &Path) -> Result<rusqlite::Connection, String> {
    rusqlite::Connection::open(db)
        .map_err(|e| format!("Failed to open database '{}': {e}", db.display()))
}

fn open_migration(db: &Path, prefix: &str) -> Result<Migration, String> {
    let conn = open_database(db)?;
    Migration::new(conn, prefix).map_err(|e| format!("Failed to initialize migration: {e}"))
}

fn print_seed_report(report: &bookstore_sqlite::SeedReport) {
    match report.conflicting_id {
        Some(id) => println!(
            "Seed skipped: id {id} already exists, batch rolled back (0 books inserted)."
        ),
        None => println!("Seed complete: {} book(s) inserted.", report.books_inserted),
    }
}

/// Loads seed records from a JSON file, falling back to the starter
/// catalog when no source is given. Every record must pass validation.
fn load_seed_books(source: Option<&Path>) -> Result<Vec<Book>, String> {
    let Some(path) = source else {
        return Ok(starter_catalog());
    };
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {e}", path.display()))?;
    parse_seed_books(&raw).map_err(|e| format!("Invalid seed file '{}': {e}", path.display()))
}

/// Parses a JSON array of books and validates each record.
fn parse_seed_books(raw: &str) -> Result<Vec<Book>, String> {
    let books: Vec<Book> =
        serde_json::from_str(raw).map_err(|e| format!("not a JSON array of books: {e}"))?;
    for book in &books {
        let errors = validate_book(book);
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            return Err(format!("book {}: {}", book.id, messages.join("; ")));
        }
    }
    Ok(books)
}
