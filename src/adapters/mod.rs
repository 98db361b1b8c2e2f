// Adapters layer: concrete implementations for the external collaborators
// (notice feed, SMTP transport, text-generation API).

pub mod federal_register;
pub mod gemini;
pub mod smtp;
