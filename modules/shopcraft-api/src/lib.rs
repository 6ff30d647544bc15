pub mod deps;
pub mod fetch;
pub mod pipeline;
pub mod prompts;
pub mod rest;
pub mod routes;
pub mod storage;

pub use deps::ServerDeps;
pub use routes::build_router;
