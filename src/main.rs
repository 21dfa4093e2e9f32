use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;

use spofavcli::{
    cli,
    config::{self, Config},
    error,
    management::{AuthSession, StoreLocation, TokenManager},
    spotify::auth::SpotifyAuthorization,
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
    /// Authorize with Spotify API
    Auth,

    /// Search the catalog for tracks or artists
    Search(SearchOptions),

    /// Manage locally saved favorite tracks
    Favorites(FavoritesOptions),

    /// Manage playlists on your Spotify account
    Playlist(PlaylistOptions),

    /// Show recent search history
    History(HistoryOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search query
    pub query: String,

    /// Search in artist mode: resolve the primary artist and show its top
    /// tracks first
    #[clap(long)]
    pub artist: bool,

    /// Maximum number of track results
    #[clap(long, default_value_t = 20)]
    pub limit: u32,

    /// Market used for the primary artist's top tracks
    #[clap(long, default_value = "BR")]
    pub region: String,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage locally saved favorite tracks")]
pub struct FavoritesOptions {
    /// Subcommands under `favorites` (e.g., `add`); no subcommand lists
    /// the saved favorites
    #[command(subcommand)]
    pub command: Option<FavoritesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesSubcommand {
    /// Add a track to favorites by its catalog id
    Add {
        /// Catalog id of the track
        track_id: String,
    },

    /// Remove a track from favorites
    Remove {
        /// Catalog id of the track
        track_id: String,
    },

    /// Show aggregate statistics for saved favorites
    Stats,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Manage playlists on your Spotify account")]
pub struct PlaylistOptions {
    /// Subcommands under `playlist` (e.g., `create`); no subcommand lists
    /// your playlists
    #[command(subcommand)]
    pub command: Option<PlaylistSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Create a new playlist
    Create {
        /// Playlist name
        name: String,

        /// Playlist description
        #[clap(long, default_value = "")]
        description: String,

        /// Make the playlist publicly visible
        #[clap(long)]
        public: bool,
    },

    /// Show one playlist with its tracks
    Show {
        /// Playlist id
        playlist_id: String,
    },

    /// Add tracks to a playlist
    Add {
        /// Playlist id
        playlist_id: String,

        /// Track URIs to add
        #[clap(required = true)]
        uris: Vec<String>,
    },

    /// Remove tracks from a playlist
    Remove {
        /// Playlist id
        playlist_id: String,

        /// Track URIs to remove
        #[clap(required = true)]
        uris: Vec<String>,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct HistoryOptions {
    /// Number of entries to show
    #[clap(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn new_session(config: &Config) -> Arc<Mutex<AuthSession>> {
    let exchange = Box::new(SpotifyAuthorization::new(config));
    Arc::new(Mutex::new(AuthSession::new(TokenManager::new(exchange))))
}

#[tokio::main]
async fn main() {
    config::load_env().await;

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };
    let store = StoreLocation::default_location();

    match cli.command {
        Command::Auth => {
            let session = new_session(&config);
            cli::auth(&config, session).await;
        }
        Command::Search(opt) => {
            cli::search(&config, &store, opt.query, opt.artist, opt.limit, opt.region).await
        }
        Command::Favorites(opt) => match opt.command {
            Some(FavoritesSubcommand::Add { track_id }) => {
                cli::add_favorite(&config, &store, track_id).await
            }
            Some(FavoritesSubcommand::Remove { track_id }) => {
                cli::remove_favorite(&store, track_id).await
            }
            Some(FavoritesSubcommand::Stats) => cli::favorites_stats(&store).await,
            None => cli::list_favorites(&store).await,
        },
        Command::Playlist(opt) => {
            let session = new_session(&config);
            match opt.command {
                Some(PlaylistSubcommand::Create {
                    name,
                    description,
                    public,
                }) => cli::create_playlist(&config, session, name, description, public).await,
                Some(PlaylistSubcommand::Show { playlist_id }) => {
                    cli::show_playlist(&config, session, playlist_id).await
                }
                Some(PlaylistSubcommand::Add { playlist_id, uris }) => {
                    cli::add_playlist_tracks(&config, session, playlist_id, uris).await
                }
                Some(PlaylistSubcommand::Remove { playlist_id, uris }) => {
                    cli::remove_playlist_tracks(&config, session, playlist_id, uris).await
                }
                None => cli::list_playlists(&config, session).await,
            }
        }
        Command::History(opt) => cli::show_history(&store, opt.limit).await,
        Command::Completions(_) => unreachable!(),
    }
}
