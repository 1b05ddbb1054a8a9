pub mod csv_chambres;
pub mod rapport_tickets;
