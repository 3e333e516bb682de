pub mod local_min;
pub mod partition;
pub mod path;
pub mod reduction;
pub mod relaxation;
pub mod sequential;
