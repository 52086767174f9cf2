/// Router Module Index
///
/// Organizes the application's routing into security-segregated modules so
/// access control is applied explicitly at the module level (via Axum
/// layers), never per-handler by accident.

/// Server-rendered pages and fragments, accessible anonymously.
pub mod web;

/// The JSON API, protected by the `AuthUser` extractor middleware.
pub mod api;

/// Staff-only administration surface; the staff check runs inside each
/// handler after the authentication layer has resolved the caller.
pub mod admin;
