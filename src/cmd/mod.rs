pub mod evaluate;
pub mod policy;
pub mod progress;
pub mod serve;
