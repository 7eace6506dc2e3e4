pub mod memory;
pub mod profile;
pub mod user;

pub use memory::InMemoryRepository;
pub use profile::PostgresProfileRepository;
pub use user::PostgresUserRepository;
