//! gui/mod.rs
//!
//! This folder contains ONLY frontend concerns:
//! - app state ('Tagwright') and messages ('Message')
//! - update logic ('update()')
//! - view layout ('view()')
//! - small UI helpers ('util')
//!
//! Everything that touches files lives in `core`; update/ runs it on
//! blocking threads and turns the result into a Message.

pub(crate) mod state;
pub(crate) mod update;
pub(crate) mod util;
pub(crate) mod view;

pub(crate) use state::Tagwright;
pub(crate) use update::update;
pub(crate) use view::view;
