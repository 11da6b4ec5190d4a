pub mod anchor;
pub mod behavior;
pub mod config;
pub mod contact;
pub mod errors;
pub mod fade;
pub mod header;
pub mod models;
pub mod nav;
pub mod page;
pub mod preloader;
pub mod sections;

#[cfg(target_arch = "wasm32")]
pub mod browser;

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod handlers;
#[cfg(not(target_arch = "wasm32"))]
pub mod memory;
#[cfg(not(target_arch = "wasm32"))]
pub mod state;
#[cfg(not(target_arch = "wasm32"))]
pub mod storage;

pub use behavior::Behavior;
pub use config::BehaviorConfig;
pub use errors::SetupError;
pub use page::{NodeId, Page};

#[cfg(not(target_arch = "wasm32"))]
pub use app::router;
#[cfg(not(target_arch = "wasm32"))]
pub use state::ServerState;
