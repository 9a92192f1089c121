// Adapters layer: concrete clients for the external systems (commerce order
// source and CRM). Everything here speaks JSON over HTTPS via reqwest.

pub mod pipedrive;
pub mod shopify;

pub use pipedrive::PipedriveClient;
pub use shopify::ShopifyOrderSource;
