// modelstudio external-facing services
// Clients for the generation API and for the history endpoints.

pub mod generation_client;
pub mod history_client;
