pub mod deserializers;
pub mod etiquettes;
pub mod pipeline;
pub mod types;

pub use pipeline::{normaliser_lot_chambres, normaliser_lot_tickets};
