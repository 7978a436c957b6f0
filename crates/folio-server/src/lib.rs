//! Save endpoint and static file server.
//!
//! One route mutates state: `POST /api/save` takes the full project list
//! as a JSON array and writes it to `projects.json`. Every other `GET` is
//! served from the static root.

pub mod http;
pub mod routes;
pub mod server;

/// Request handling state shared by all connections.
pub use routes::ServerState;
/// The listening server.
pub use server::SaveServer;
