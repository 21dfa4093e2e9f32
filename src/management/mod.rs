mod favorites;
mod history;
mod playlist;
mod store;
mod token;

pub use favorites::FavoritesManager;
pub use history::SearchHistoryManager;
pub use playlist::PlaylistOrchestrator;
pub use store::StoreLocation;
pub use token::AuthSession;
pub use token::AuthorizationExchange;
pub use token::TokenManager;
