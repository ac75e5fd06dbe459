//! Clap derive structures for the `atlas` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// atlas -- browse the world's countries from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "atlas",
    version,
    about = "Browse countries, check capital-city weather, and keep favourites",
    long_about = "Browse the public country directory, filter it by name, capital, or region,\n\
        look up the current weather in a capital, and keep a personal list of\n\
        favourite countries on a hosted backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "ATLAS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "ATLAS_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds [default: from profile, else 30]
    #[arg(long, env = "ATLAS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    pub fn color(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the country directory
    #[command(alias = "c")]
    Countries(CountriesArgs),

    /// Current weather for a city
    #[command(alias = "w")]
    Weather(WeatherArgs),

    /// Manage your favourite countries (requires sign-in)
    #[command(alias = "fav", alias = "favorites")]
    Favourites(FavouritesArgs),

    /// Manage protected records (requires sign-in)
    Protected(ProtectedArgs),

    /// Inspect the backend session
    Auth(AuthArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Command {
    /// Whether the command signs in to the backend before running.
    pub fn needs_session(&self) -> bool {
        matches!(
            self,
            Self::Favourites(_) | Self::Protected(_) | Self::Auth(_)
        )
    }
}

// ── Countries ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CountriesArgs {
    #[command(subcommand)]
    pub command: CountriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CountriesCommand {
    /// List countries, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on country name or capital
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Exact region name (see `atlas countries regions`)
        #[arg(long, short = 'r')]
        region: Option<String>,
    },

    /// List the distinct regions
    Regions,

    /// Show one country with the current weather in its capital
    Show {
        /// Country common name (case-insensitive)
        name: String,

        /// Skip the weather lookup
        #[arg(long)]
        no_weather: bool,
    },
}

// ── Weather ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WeatherArgs {
    /// City name
    pub city: String,
}

// ── Favourites ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FavouritesArgs {
    #[command(subcommand)]
    pub command: FavouritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FavouritesCommand {
    /// List your favourites
    #[command(alias = "ls")]
    List,

    /// Add a country to your favourites
    Add {
        /// Country common name (case-insensitive)
        name: String,
    },

    /// Remove a country from your favourites
    #[command(alias = "rm")]
    Remove {
        /// Country common name
        name: String,
    },

    /// Add the country if it is not a favourite, remove it if it is
    Toggle {
        /// Country common name (case-insensitive)
        name: String,
    },
}

// ── Protected data ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProtectedArgs {
    #[command(subcommand)]
    pub command: ProtectedCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProtectedCommand {
    /// List your protected records
    #[command(alias = "ls")]
    List,

    /// Create a protected record
    Create {
        /// Record name
        name: String,

        /// Optional description
        #[arg(long, short = 'd', default_value = "")]
        description: String,
    },
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in and show the user the backend reports
    Whoami,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the resolved configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,

    /// Store the backend password in the system keyring
    SetPassword,

    /// Store the weather API key in the system keyring
    SetWeatherKey,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
