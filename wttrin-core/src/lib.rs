//! Client library for the wttr.in weather forecast service.
//!
//! wttr.in answers in three shapes, each with its own URL grammar:
//!
//! - [`Mode::Line`]: one formatted line, `<location>?lang=..&format=..&<flags>`
//! - [`Mode::Ascii`]: a multi-line text report, `<location>?lang=..&<flags>`
//! - [`Mode::Image`]: a PNG, `<location>_lang=.._<flags>.png`
//!
//! Flags are single-letter or word tokens forwarded verbatim and joined with
//! `_`, for example `0` (current weather only), `1`..`3` (days), `A` (force
//! ASCII), `T` (no colors), `F` (no footer), `q`/`Q` (quiet headers), `m`/`u`
//! (metric/USCS), `M` (wind in m/s), `p` (padding), `t` (transparent PNG).
//!
//! Line format placeholders are substituted by the service: `%l` location,
//! `%c`/`%C` condition icon/text, `%t` temperature, `%w` wind, `%m`/`%M` moon
//! phase/day, `%h` humidity, `%p` precipitation, `%o` probability of
//! precipitation, `%P` pressure, `%s` sunset.

pub mod classify;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod model;
pub mod query;
pub mod stream;

pub use client::WttrClient;
pub use config::Config;
pub use defaults::{Defaults, OutageSignature};
pub use error::{Result, WttrError};
pub use model::{Forecast, ForecastRequest, Mode};
pub use stream::ForecastStream;
