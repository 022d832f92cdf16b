pub mod session;

pub use session::{MemorySessionStorage, SessionStorage};
