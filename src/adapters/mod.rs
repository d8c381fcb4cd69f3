// Adapters layer: concrete implementations for external systems. The only
// collaborator this client has is the HTTP transport.

pub mod http;
