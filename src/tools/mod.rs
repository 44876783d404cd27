pub mod manifest;
pub mod reference;
pub mod status;
