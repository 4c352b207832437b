use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use minimate::cache::{PersistentCache, open_database};
use minimate::i18n::{Language, Localizer, Message};
use minimate::report::{WeatherReport, render_daily, render_hourly};
use minimate::weather::{CachedWeatherSource, OpenMeteoClient, WeatherSource};
use minimate::{
    DebouncedSearch, LocationResolver, MiniMateConfig, MiniMateError, ProfileStore, SearchOutcome,
    UserProfile,
};

#[derive(Parser)]
#[command(name = "minimate")]
#[command(version, about = "Weather companion that tells you what to wear")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Current weather and what to wear
    Now {
        /// Place name or "lat,lon"; defaults to the profile location
        #[arg(short, long)]
        location: Option<String>,
        /// Language override ("de", "en")
        #[arg(long)]
        lang: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forecast for the next hours
    Hourly {
        #[arg(short, long)]
        location: Option<String>,
        /// Number of hours to show (1-48)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=48))]
        hours: Option<u32>,
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Seven-day forecast
    Daily {
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long)]
        lang: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Search for places by name
    Search {
        query: Option<String>,
        /// Read queries from stdin as they are typed
        #[arg(short, long)]
        interactive: bool,
    },
    /// Name the place at the given coordinates
    Locate {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
    },
    /// Show or change the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Print the stored profile
    Show,
    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        language: Option<String>,
        /// Default location, place name or "lat,lon"
        #[arg(long)]
        location: Option<String>,
    },
    /// Delete the stored profile
    Reset,
}

struct App {
    config: MiniMateConfig,
    source: Arc<dyn WeatherSource>,
    profiles: ProfileStore,
}

impl App {
    fn new(config: MiniMateConfig) -> Result<Self> {
        let dir = config.ensure_cache_dir()?;
        let db = open_database(&dir)
            .with_context(|| format!("Failed to open data directory {}", dir.display()))?;
        let cache = PersistentCache::new(&db)?;
        let profiles = ProfileStore::new(&db)?.with_default_language(config.defaults.language.clone());

        let client = OpenMeteoClient::new(&config.weather, config.defaults.search_results)?;
        let ttl = Duration::from_secs(u64::from(config.cache.ttl_minutes) * 60);
        let source: Arc<dyn WeatherSource> = Arc::new(CachedWeatherSource::new(client, cache, ttl));

        Ok(Self {
            config,
            source,
            profiles,
        })
    }

    async fn profile_and_localizer(&self, lang: Option<&str>) -> Result<(UserProfile, Localizer)> {
        let profile = self
            .profiles
            .get_profile()
            .await
            .context("Failed to read profile")?;
        let localizer = Localizer::new(lang.unwrap_or(profile.language.as_str()));
        Ok((profile, localizer))
    }

    async fn now(&self, location: Option<&str>, lang: Option<&str>, json: bool) -> Result<()> {
        let (profile, localizer) = self.profile_and_localizer(lang).await?;
        let location =
            LocationResolver::resolve(self.source.as_ref(), location, &profile, &localizer).await?;
        let current = self
            .source
            .current_weather(location.latitude, location.longitude)
            .await
            .with_context(|| format!("Failed to fetch current weather for {}", location.name))?;

        let report = WeatherReport::new(location, current, localizer).with_greeting(&profile.name);
        info!(category = ?report.recommendation.category, "Recommendation ready");

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{report}");
        }
        Ok(())
    }

    async fn hourly(
        &self,
        location: Option<&str>,
        hours: Option<u32>,
        lang: Option<&str>,
        json: bool,
    ) -> Result<()> {
        let (profile, localizer) = self.profile_and_localizer(lang).await?;
        let location =
            LocationResolver::resolve(self.source.as_ref(), location, &profile, &localizer).await?;
        let outlook = self
            .source
            .hourly_forecast(location.latitude, location.longitude)
            .await
            .with_context(|| format!("Failed to fetch hourly forecast for {}", location.name))?;

        let count = hours.unwrap_or(self.config.defaults.hourly_hours);
        let now_local = outlook.to_local(Utc::now().naive_utc());
        let upcoming = outlook.upcoming(now_local, count);

        if json {
            println!("{}", serde_json::to_string_pretty(&upcoming)?);
        } else {
            println!("📍 {}", location.name);
            print!("{}", render_hourly(&upcoming, &localizer));
        }
        Ok(())
    }

    async fn daily(&self, location: Option<&str>, lang: Option<&str>, json: bool) -> Result<()> {
        let (profile, localizer) = self.profile_and_localizer(lang).await?;
        let location =
            LocationResolver::resolve(self.source.as_ref(), location, &profile, &localizer).await?;
        let days = self
            .source
            .daily_forecast(location.latitude, location.longitude)
            .await
            .with_context(|| format!("Failed to fetch daily forecast for {}", location.name))?;

        if json {
            println!("{}", serde_json::to_string_pretty(&days)?);
        } else {
            println!("📍 {}", location.name);
            print!("{}", render_daily(&days, &localizer));
        }
        Ok(())
    }

    async fn search(&self, query: Option<&str>, interactive: bool) -> Result<()> {
        let (_, localizer) = self.profile_and_localizer(None).await?;

        if interactive {
            return self.search_interactive(&localizer).await;
        }
        let Some(query) = query else {
            bail!(MiniMateError::validation("Give a search query or use --interactive"));
        };

        let results = self
            .source
            .search_location(query, localizer.api_language())
            .await
            .with_context(|| format!("Search for '{query}' failed"))?;
        print_outcome(
            &SearchOutcome {
                query: query.trim().to_string(),
                results,
            },
            &localizer,
        );
        Ok(())
    }

    async fn search_interactive(&self, localizer: &Localizer) -> Result<()> {
        let delay = Duration::from_millis(self.config.defaults.search_debounce_ms);
        let (mut search, mut outcomes) =
            DebouncedSearch::new(Arc::clone(&self.source), localizer.api_language(), delay);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut last_input: Option<String> = None;
        let mut last_shown: Option<String> = None;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line.context("Failed to read stdin")? {
                        Some(line) => {
                            last_input = Some(line.trim().to_string());
                            search.input(&line);
                        }
                        None => break,
                    }
                }
                Some(outcome) = outcomes.recv() => {
                    last_shown = Some(outcome.query.clone());
                    print_outcome(&outcome, localizer);
                }
            }
        }

        // Input closed: wait for the search of the final query, if still pending
        if last_input.is_some() && last_input != last_shown {
            let wait = delay + Duration::from_secs(u64::from(self.config.weather.timeout_seconds));
            if let Ok(Some(outcome)) = tokio::time::timeout(wait, outcomes.recv()).await {
                print_outcome(&outcome, localizer);
            }
        }
        Ok(())
    }

    async fn locate(&self, latitude: f64, longitude: f64) -> Result<()> {
        minimate::LocationParser::validate_coordinates(latitude, longitude)?;
        let (_, localizer) = self.profile_and_localizer(None).await?;
        let location =
            LocationResolver::resolve_coordinates(self.source.as_ref(), latitude, longitude, &localizer)
                .await;
        println!("📍 {} ({})", location.name, location.format_coordinates());
        Ok(())
    }

    async fn profile(&self, action: ProfileCommand) -> Result<()> {
        match action {
            ProfileCommand::Show => {
                let profile = self.profiles.get_profile().await?;
                print_profile(&profile);
            }
            ProfileCommand::Set {
                name,
                language,
                location,
            } => {
                let mut profile = self.profiles.get_profile().await?;
                if let Some(name) = name {
                    profile.name = name.trim().to_string();
                }
                if let Some(language) = language {
                    if Language::from_code(&language).is_none() {
                        tracing::warn!(
                            "No translations for '{}', texts will show symbolic names",
                            language
                        );
                    }
                    profile.language = language.trim().to_string();
                }
                if let Some(location) = location {
                    let localizer = Localizer::new(&profile.language);
                    let resolved = LocationResolver::resolve(
                        self.source.as_ref(),
                        Some(&location),
                        &profile,
                        &localizer,
                    )
                    .await?;
                    profile.set_default_location(&resolved);
                }
                self.profiles
                    .save_profile(&profile)
                    .await
                    .context("Failed to save profile")?;
                info!("Profile updated");
                print_profile(&profile);
            }
            ProfileCommand::Reset => {
                self.profiles.reset().await?;
                println!("Profile reset");
            }
        }
        Ok(())
    }
}

fn print_outcome(outcome: &SearchOutcome, localizer: &Localizer) {
    if outcome.results.is_empty() {
        println!("{} ('{}')", localizer.message(Message::NoResults), outcome.query);
        return;
    }
    for (i, record) in outcome.results.iter().enumerate() {
        println!(
            "{:>2}. {}  ({:.4}, {:.4})",
            i + 1,
            record.display_name(),
            record.latitude,
            record.longitude
        );
    }
}

fn print_profile(profile: &UserProfile) {
    println!("Name:     {}", profile.name);
    println!("Language: {}", profile.language);
    match profile.default_location() {
        Some(location) => println!(
            "Location: {} ({})",
            location.name,
            location.format_coordinates()
        ),
        None => println!("Location: -"),
    }
}

/// Message for the terminal: the typed error's user message when there is one
fn user_message(err: &anyhow::Error) -> String {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<MiniMateError>())
        .map_or_else(|| format!("{err:#}"), MiniMateError::user_message)
}

async fn run(cli: Cli, config: MiniMateConfig) -> Result<()> {
    let app = App::new(config)?;

    match cli.command {
        Command::Now {
            location,
            lang,
            json,
        } => app.now(location.as_deref(), lang.as_deref(), json).await,
        Command::Hourly {
            location,
            hours,
            lang,
            json,
        } => {
            app.hourly(location.as_deref(), hours, lang.as_deref(), json)
                .await
        }
        Command::Daily {
            location,
            lang,
            json,
        } => app.daily(location.as_deref(), lang.as_deref(), json).await,
        Command::Search { query, interactive } => app.search(query.as_deref(), interactive).await,
        Command::Locate {
            latitude,
            longitude,
        } => app.locate(latitude, longitude).await,
        Command::Profile { action } => app.profile(action).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match MiniMateConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = minimate::logging::init(&config.logging, cli.verbose) {
        eprintln!("❌ {e:#}");
        return ExitCode::FAILURE;
    }
    info!("MiniMate v{} starting", minimate::VERSION);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("❌ {}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}
