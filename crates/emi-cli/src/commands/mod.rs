pub mod export;
pub mod loan;
pub mod tenure;
