pub mod deployer;
pub mod error;
pub mod fixture;
pub mod fuel;
pub mod runtime;
pub mod shared;
