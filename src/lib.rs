//! Riyobox: catalog, accounts, watchlists and uploads for a video-streaming front end.

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;

pub mod crypto {
    pub mod password;
    pub mod token;
}

pub mod models {
    pub mod movie;
    pub mod session;
    pub mod upload;
    pub mod user;
}

pub mod repositories;

pub mod services {
    pub mod auth;
    pub mod movies;
    pub mod uploads;
    pub mod watchlist;
}

pub mod handlers {
    pub mod admin;
    pub mod auth;
    pub mod health;
    pub mod movies;
    pub mod upload;
    pub mod users;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod auth;
    pub mod movie;
}

pub use config::Config;
pub use state::AppState;
