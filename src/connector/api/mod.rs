pub mod container;
pub mod controller;
pub mod router;
pub mod server;

pub use container::{Container, ContainerConfig};
pub use router::create_router;
pub use server::{serve, RelayServer, RelayServerConfig};
