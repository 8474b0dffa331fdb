pub mod manager;
pub mod mongo;
