pub mod accumulation;
pub mod consolidation;
pub mod statut;
