pub mod publish_worker;

pub use publish_worker::run as run_publish_worker;
