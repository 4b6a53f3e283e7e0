use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::warn;
use url::Url;

use jobtrail::{
    store::keys, ApiClient, Extractor, JobPosting, JobStore, SettingsStore, SqliteBackend,
    UserProfile,
};

#[derive(Parser)]
#[command(name = "jobtrail", version, about = "Track job postings captured from career sites")]
struct Cli {
    /// SQLite file holding the saved-job collections
    #[arg(long, env = "JOBTRAIL_DB", default_value = "jobtrail.sqlite3", global = true)]
    db: PathBuf,

    /// Settings file (API endpoint, signed-in user)
    #[arg(
        long,
        env = "JOBTRAIL_SETTINGS",
        default_value = "jobtrail-settings.json",
        global = true
    )]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract every job listing from a saved HTML page
    Extract {
        /// Path to the saved HTML document
        file: PathBuf,
        /// URL the page was loaded from; picks the site strategy
        #[arg(long)]
        url: Url,
        /// Persist every extracted job to the local store
        #[arg(long)]
        save: bool,
    },
    /// Capture one opened posting page in detail (includes salary)
    Page {
        file: PathBuf,
        #[arg(long)]
        url: Url,
        #[arg(long)]
        save: bool,
        /// Override the captured salary
        #[arg(long)]
        salary: Option<String>,
        /// Override the captured description
        #[arg(long)]
        notes: Option<String>,
    },
    /// List saved jobs
    List,
    /// Remove a saved job by id
    Remove { id: String },
    /// Record a search query and filter saved jobs by it
    Search { query: String },
    /// Show recent search queries
    History,
    /// Delete all locally stored data
    Clear,
    /// Sign in to the remote tracking backend
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Send a saved job to the remote tracking backend
    Push { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let store = JobStore::new(Arc::new(SqliteBackend::new(cli.db)?));
    let settings = SettingsStore::new(cli.settings)?;

    match cli.command {
        Command::Extract { file, url, save } => extract(&store, &file, &url, save).await,
        Command::Page {
            file,
            url,
            save,
            salary,
            notes,
        } => page(&store, &file, &url, save, salary, notes).await,
        Command::List => list(&store).await,
        Command::Remove { id } => {
            store.remove_job(&id).await?;
            println!("Removed {id} (if it was saved)");
            Ok(())
        }
        Command::Search { query } => search(&store, &query).await,
        Command::History => {
            for entry in store.search_history().await? {
                println!("{entry}");
            }
            Ok(())
        }
        Command::Clear => {
            store.clear_all().await?;
            println!("Cleared {} collections", keys::ALL.len());
            Ok(())
        }
        Command::Login { email, password } => login(&store, &settings, &email, &password).await,
        Command::Logout => {
            settings.clear_auth()?;
            println!("Logged out");
            Ok(())
        }
        Command::Push { id } => push(&store, &settings, &id).await,
    }
}

fn read_page(file: &PathBuf) -> Result<String> {
    std::fs::read_to_string(file)
        .with_context(|| format!("failed to read page from {}", file.display()))
}

fn print_job(job: &JobPosting) {
    let remote = if job.remote { ", remote" } else { "" };
    println!(
        "{}  {} — {} ({}{})",
        job.id,
        job.title,
        job.company,
        job.location,
        remote
    );
}

async fn extract(store: &JobStore, file: &PathBuf, url: &Url, save: bool) -> Result<()> {
    let hostname = url.host_str().unwrap_or("");
    if !jobtrail::is_job_site(hostname) {
        warn!("'{hostname}' is not a known job board; extracting with the generic strategy");
    }

    let html = read_page(file)?;
    let extractor = Extractor::new()?;
    let jobs = extractor.extract_all(&html, url);

    if jobs.is_empty() {
        println!("No jobs found on this page");
        return Ok(());
    }

    for job in &jobs {
        print_job(job);
        if save {
            store.save_job(job).await?;
        }
    }
    println!(
        "{} jobs extracted{}",
        jobs.len(),
        if save { " and saved" } else { "" }
    );
    Ok(())
}

async fn page(
    store: &JobStore,
    file: &PathBuf,
    url: &Url,
    save: bool,
    salary: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let html = read_page(file)?;
    let extractor = Extractor::new()?;

    let mut capture = extractor.capture_page(&html, url);
    if let Some(salary) = salary {
        capture.salary = salary;
    }
    if let Some(notes) = notes {
        capture.description = notes;
    }

    let Some(job) = extractor.promote(capture) else {
        bail!("company and position are required; this page resolved neither");
    };

    print_job(&job);
    if let Some(salary) = &job.salary {
        println!("  salary: {salary}");
    }
    if save {
        store.save_job(&job).await?;
        println!("Saved {}", job.id);
    }
    Ok(())
}

async fn list(store: &JobStore) -> Result<()> {
    let jobs = store.saved_jobs().await?;
    if jobs.is_empty() {
        println!("No saved jobs");
        return Ok(());
    }
    for job in &jobs {
        print_job(job);
    }
    Ok(())
}

async fn search(store: &JobStore, query: &str) -> Result<()> {
    store.save_search_history(query).await?;

    let needle = query.to_lowercase();
    let jobs = store.saved_jobs().await?;
    let matches: Vec<&JobPosting> = jobs
        .iter()
        .filter(|job| {
            job.title.to_lowercase().contains(&needle)
                || job.company.to_lowercase().contains(&needle)
                || job.location.to_lowercase().contains(&needle)
                || job.tags.iter().any(|tag| tag.contains(&needle))
        })
        .collect();

    if matches.is_empty() {
        println!("No saved jobs match '{query}'");
        return Ok(());
    }
    for job in matches {
        print_job(job);
    }
    Ok(())
}

async fn login(
    store: &JobStore,
    settings: &SettingsStore,
    email: &str,
    password: &str,
) -> Result<()> {
    let api = ApiClient::new(&settings.api().base_url, None)?;
    let session = api.login(email, password).await?;

    settings.store_auth(
        session.token,
        session.user.email.clone(),
        session.user.uid.clone(),
    )?;
    store
        .save_user(&UserProfile {
            email: session.user.email,
            uid: session.user.uid,
        })
        .await?;

    println!("Signed in as {email}");
    Ok(())
}

async fn push(store: &JobStore, settings: &SettingsStore, id: &str) -> Result<()> {
    let jobs = store.saved_jobs().await?;
    let Some(job) = jobs.iter().find(|job| job.id == id) else {
        bail!("no saved job with id '{id}'");
    };

    let api_settings = settings.api();
    let api = ApiClient::new(&api_settings.base_url, api_settings.auth_token)?;
    api.save_job(job).await?;

    println!("Pushed {} to {}", job.id, api_settings.base_url);
    Ok(())
}
