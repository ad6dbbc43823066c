// Server-rendered presentation: form, results, diagnostics, and text exports.
// Owns no business logic beyond score display and export formatting.

pub mod export;
pub mod handlers;
pub mod views;
