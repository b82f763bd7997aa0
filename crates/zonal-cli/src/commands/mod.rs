pub mod generators;
pub mod load;
pub mod profiles;
pub mod run;
pub mod transmission;
