pub mod api;
pub mod flags;
pub mod http;
pub mod loader;

pub use api::{AlertActions, PulseDirectory};
pub use flags::{FileSplashFlagStore, MemorySplashFlagStore, SplashFlagStore};
pub use http::MetabaseClient;
pub use loader::{ChannelDirectory, Loadable};
