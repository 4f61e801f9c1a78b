pub mod goal;
pub mod investment;
