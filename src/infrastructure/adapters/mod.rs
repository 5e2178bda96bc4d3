//! 애플리케이션 포트의 인프라 구현 어댑터 모음.

mod advisory_factory;
mod config_repository;

pub use advisory_factory::HttpAdvisoryFactory;
pub use config_repository::JsonConfigRepository;
