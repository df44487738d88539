//! tagwright
//!
//! A desktop editor (iced) for MP3 libraries whose song metadata is kept as
//! JSON inside an ID3 comment frame. It scans a folder, lets you search,
//! sort and inspect songs, edit the JSON, and derive the visible ID3
//! title/artist/album from ordered "if ... then template" rules.
//!
//! Message loop:
//! - `Tagwright` holds all state
//! - `Message` says what happened
//! - `update(state, message)` changes state and may start background work
//! - `view(state)` draws the UI from state
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=tagwright=debug`) for more output.

mod core;
mod gui;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gui::{Tagwright, update, view};

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagwright=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting tagwright");

    iced::application(Tagwright::new, update, view)
        .title("tagwright")
        .window_size((1400.0, 860.0))
        .run()
}
