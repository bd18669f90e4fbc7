pub mod cave;
