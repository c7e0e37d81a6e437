//! Database repository layer

pub mod cat_repo;
pub mod user_repo;
pub mod weight_repo;

pub use cat_repo::CatRepository;
pub use user_repo::{UserRepository, UserStore};
pub use weight_repo::WeightRepository;
