pub mod dictionary;
pub mod extract;
pub mod prescriptions;
pub mod samples;
