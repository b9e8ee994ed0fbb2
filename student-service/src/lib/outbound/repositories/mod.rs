pub mod account;
pub mod memory;
pub mod student;

pub use account::PostgresAccountRepository;
pub use memory::InMemoryAccountRepository;
pub use memory::InMemoryStudentRepository;
pub use student::PostgresStudentRepository;
