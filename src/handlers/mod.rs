pub mod pages;
pub mod roadmap;
pub mod system;
