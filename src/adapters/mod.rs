// Adapters layer: concrete NurseRepository implementations (memory, REST) and the wire format.

pub mod http;
pub mod memory;
pub mod wire;

pub use http::RestRepository;
pub use memory::InMemoryRepository;
