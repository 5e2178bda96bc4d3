//! 애플리케이션 유스케이스 모음.

pub mod give_advice;
pub mod inspect_config;
