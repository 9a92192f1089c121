pub mod engine;
pub mod orchestrator;

pub use crate::domain::model::{Order, Person, Product, SyncReport};
pub use crate::domain::ports::{CrmClient, OrderSource};
pub use crate::utils::error::Result;
