use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use moviediary::config::Configuration;
use moviediary::models::{poster_url, Rating};
use moviediary::screen::ScreenState;
use moviediary::screens::{
    DiaryScreen, EntryDetail, LogMovieScreen, MovieDetailScreen, ProfileScreen, SearchScreen,
    WatchlistScreen,
};
use moviediary::Services;
use tracing::{debug, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the movie catalog
    Search { query: String },
    /// Show a movie with credits and its diary/watchlist status
    Movie { id: u64 },
    /// List diary entries
    Diary,
    /// List the watchlist
    Watchlist,
    /// Add a movie to the watchlist
    Watch { id: u64 },
    /// Remove a movie from the watchlist
    Unwatch { id: u64 },
    /// Log a movie into the diary
    Log {
        id: u64,
        /// Rating from 1 to 7
        #[arg(short, long)]
        rating: Option<u8>,
        #[arg(long)]
        remarks: Option<String>,
    },
    /// Show the profile summary
    Profile,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = Configuration::from_file(&cli.config)?;
    debug!("Configuration loaded from: {}", cli.config);

    let services = Services::from_config(&config)?;

    match cli.command {
        Command::Search { query } => search(&config, &services, &query).await,
        Command::Movie { id } => movie(&config, &services, id).await,
        Command::Diary => diary(&config, &services).await,
        Command::Watchlist => watchlist(&services).await,
        Command::Watch { id } => watch(&services, id).await,
        Command::Unwatch { id } => unwatch(&services, id).await,
        Command::Log {
            id,
            rating,
            remarks,
        } => log(&services, id, rating, remarks).await,
        Command::Profile => profile(&services).await,
    }
}

fn ready<T>(state: ScreenState<T>) -> Result<T> {
    match state {
        ScreenState::Ready(data) | ScreenState::Refreshing(data) => Ok(data),
        ScreenState::Error(message) => Err(anyhow!(message)),
        ScreenState::Loading => Err(anyhow!("screen is still loading")),
    }
}

async fn search(config: &Configuration, services: &Services, query: &str) -> Result<()> {
    let screen = SearchScreen::new(services.catalog.clone(), config.search_debounce());
    screen.set_query(query).await;

    let state = screen.state();
    if let Some(error) = state.error {
        return Err(anyhow!(error));
    }
    if state.has_searched && state.results.is_empty() {
        println!("No movies found");
    }
    for movie in state.results {
        let year = moviediary::models::release_year(movie.release_date.as_deref()).unwrap_or("----");
        println!("{:>8}  {}  {}", movie.id, year, movie.title);
    }
    Ok(())
}

async fn movie(config: &Configuration, services: &Services, id: u64) -> Result<()> {
    let screen = MovieDetailScreen::new(
        id,
        services.catalog.clone(),
        services.diary.clone(),
        services.watchlist.clone(),
    );
    screen.load().await;
    let view = ready(screen.state())?;

    println!("{} ({})", view.movie.title, view.year().unwrap_or("----"));
    if let Some(url) = poster_url(config.image_base(), view.movie.poster_path.as_deref()) {
        println!("Poster: {}", url);
    }
    if let Some(runtime) = view.movie.runtime {
        println!("Runtime: {} min", runtime);
    }
    let genres: Vec<_> = view.movie.genres.iter().map(|g| g.name.as_str()).collect();
    if !genres.is_empty() {
        println!("Genres: {}", genres.join(", "));
    }
    if let Some(overview) = view.movie.overview.as_deref().filter(|o| !o.is_empty()) {
        println!("\n{}\n", overview);
    }

    let names = |crew: Vec<&moviediary::models::CrewMember>| {
        crew.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", ")
    };
    for (label, crew) in [
        ("Director", view.directors()),
        ("Cinematography", view.cinematographers()),
        ("Music", view.composers()),
    ] {
        if !crew.is_empty() {
            println!("{}: {}", label, names(crew));
        }
    }
    for member in view.top_cast() {
        println!("  {} as {}", member.name, member.character.as_deref().unwrap_or("?"));
        if let Some(url) = poster_url(config.profile_image_base(), member.profile_path.as_deref()) {
            println!("    {}", url);
        }
    }

    match &view.user_entry {
        Some(entry) => println!("\nYour rating: {}", EntryDetail::new(entry.clone()).rating_label()),
        None => println!("\nNot logged yet"),
    }
    println!("In watchlist: {}", if view.in_watchlist { "yes" } else { "no" });
    Ok(())
}

async fn diary(config: &Configuration, services: &Services) -> Result<()> {
    let screen = DiaryScreen::new(services.diary.clone(), config.page_limit());
    screen.focus().await;

    let entries = ready(screen.state())?;
    info!("Diary has {} entries on this page", entries.len());
    for entry in entries {
        let detail = EntryDetail::new(entry);
        println!(
            "{:<20}  {:>4}  {}",
            detail.logged_label(),
            detail.rating_label(),
            detail.entry().title
        );
        if let Some(remarks) = detail.remarks() {
            println!("{:<20}  {:>4}  \"{}\"", "", "", remarks);
        }
    }
    Ok(())
}

async fn watchlist(services: &Services) -> Result<()> {
    let screen = WatchlistScreen::new(services.watchlist.clone());
    screen.focus().await;

    for item in ready(screen.state())? {
        println!("{:>8}  {}", item.tmdb_id, item.title);
    }
    Ok(())
}

async fn watch(services: &Services, id: u64) -> Result<()> {
    let screen = MovieDetailScreen::new(
        id,
        services.catalog.clone(),
        services.diary.clone(),
        services.watchlist.clone(),
    );
    screen.load().await;
    ready(screen.state())?;

    let message = screen.add_to_watchlist().await.map_err(|e| anyhow!(e))?;
    println!("{}", message);
    Ok(())
}

async fn unwatch(services: &Services, id: u64) -> Result<()> {
    let screen = WatchlistScreen::new(services.watchlist.clone());
    screen.remove(id).await.map_err(|e| anyhow!(e))?;
    println!("Removed {} from your watchlist", id);
    Ok(())
}

async fn log(services: &Services, id: u64, rating: Option<u8>, remarks: Option<String>) -> Result<()> {
    let detail = services.catalog.movie_detail(id).await?;
    let screen = LogMovieScreen::new(services.diary.clone(), id, detail.title, detail.poster_path);

    if let Some(value) = rating {
        screen.set_rating(value)?;
    }
    if let Some(remarks) = remarks {
        screen.set_remarks(remarks);
    }

    let entry = screen.submit().await?;
    let rating = entry.rating_overall.map(Rating::value).unwrap_or_default();
    println!("\"{}\" has been logged ({}/{})", screen.title(), rating, Rating::MAX);
    Ok(())
}

async fn profile(services: &Services) -> Result<()> {
    let screen = ProfileScreen::new(services.profiles.clone());
    screen.focus().await;
    let view = ready(screen.state())?;

    println!("{}", view.username());
    if let Some(bio) = view.summary.bio.as_deref() {
        println!("{}", bio);
    }
    println!("Watched: {}", view.media_watched());

    for (label, row) in [("Top 4", view.top_four()), ("Recent", view.recent_four())] {
        println!("\n{}", label);
        for entry in row {
            let rating = entry
                .rating_overall
                .map(|r| r.to_string())
                .unwrap_or_default();
            println!("  {}  {}", entry.title, rating);
        }
    }
    Ok(())
}
