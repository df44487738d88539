//! gui/update/util.rs
use iced::futures::channel::oneshot;
use tracing::warn;

use super::super::state::Tagwright;
use crate::core::settings;

/// Run a blocking function on a background thread and await the result.
///
/// Avoids repeating the oneshot + thread boilerplate for every
/// “do work off-thread, then send Message::Finished(Result<...>)” case.
/// A worker that panics comes back as `Err`.
pub(crate) async fn spawn_blocking<T>(f: impl FnOnce() -> T + Send + 'static) -> Result<T, String>
where
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel::<T>();

    std::thread::spawn(move || {
        let _ = tx.send(f());
    });

    rx.await
        .map_err(|_| "background worker stopped without a result".to_string())
}

/// Write settings next to the executable. Failure only costs persistence.
pub(crate) fn persist_settings(state: &Tagwright) {
    let path = settings::settings_path(&state.base_dir);
    if let Err(e) = state.settings.save_to(&path) {
        warn!(path = %path.display(), error = %e, "could not save settings");
    }
}
