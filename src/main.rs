use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tvshelf::{
    cli, config,
    store::{EpisodeFilter, FilterPatch, ShowStore},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show carousels for the home genres
    Home,

    /// List shows of one genre
    Genre(GenreOptions),

    /// Search the catalog by show name
    Search(SearchOptions),

    /// Show details and episodes of one show
    Show(ShowOptions),

    /// Handle favorite shows
    Favorites(FavoritesOptions),

    /// Render the view for a client path, e.g. /show/169 or /genre/Drama
    Open(OpenOptions),

    /// Serve the views as JSON on SERVER_ADDRESS
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GenreOptions {
    /// Genre name as used by the catalog (e.g. Drama, Science-Fiction)
    pub genre: String,

    /// Number of index pages to scan
    #[clap(long, default_value_t = 1)]
    pub pages: u32,

    /// Only list shows that have artwork
    #[clap(long)]
    pub has_image: bool,

    /// Only list shows rated at least this high
    #[clap(long)]
    pub min_rating: Option<f64>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    pub query: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    pub id: u64,

    /// Only list episodes of this season
    #[clap(long)]
    pub season: Option<u32>,

    /// Only list episodes rated at least this high
    #[clap(long, default_value_t = 0.0)]
    pub min_rating: f64,

    /// Only list episodes whose name contains this text
    #[clap(long)]
    pub term: Option<String>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle favorite shows",
    args_conflicts_with_subcommands = true
)]
pub struct FavoritesOptions {
    #[command(subcommand)]
    pub command: Option<FavoritesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesSubcommand {
    /// Add or remove a show
    Toggle(ToggleOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct ToggleOpts {
    pub id: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct OpenOptions {
    pub path: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the home view in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    // RUST_LOG may come from the .env file
    let env_loaded = config::load_env().await;
    config::init_tracing();
    if let Err(e) = env_loaded {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let store = Arc::new(ShowStore::from_env().await);

    match cli.command {
        Command::Home => cli::home(&store).await,
        Command::Genre(opt) => {
            let filters = FilterPatch {
                has_image: Some(opt.has_image),
                min_rating: opt.min_rating,
            };
            cli::genre(&store, &opt.genre, opt.pages, filters).await
        }
        Command::Search(opt) => cli::search(&store, &opt.query).await,
        Command::Show(opt) => {
            let filter = EpisodeFilter {
                season: opt.season,
                min_rating: opt.min_rating,
                term: opt.term,
            };
            cli::show(&store, opt.id, filter).await
        }
        Command::Favorites(opt) => match opt.command {
            Some(FavoritesSubcommand::Toggle(t)) => cli::favorites(&store, Some(t.id)).await,
            None => cli::favorites(&store, None).await,
        },
        Command::Open(opt) => cli::open(&store, &opt.path).await,
        Command::Serve(opt) => cli::serve(Arc::clone(&store), opt.open).await,
        Command::Completions(_) => {}
    }
}
