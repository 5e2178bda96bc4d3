//! Domain layer
//! 화면 상태/프롬프트 규칙을 외부 의존성 없이 표현한다.

pub mod advice;
pub mod prompt;
