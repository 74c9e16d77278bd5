//! Client-side synchronization for a remote videogame collection.

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod reducer;
pub mod state;

pub use controller::CollectionController;
pub use error::{ControllerError, ErrorKind, GatewayError, OperationContext};
pub use gateway::{HttpGateway, VideogameGateway};
pub use state::{CollectionState, FormBuffer, SyncStatus};
