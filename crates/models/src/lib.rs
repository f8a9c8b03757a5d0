pub mod errors;
pub mod db;
pub mod validation;
pub mod orphanage;
pub mod image;

#[cfg(test)]
mod tests;
