//! finpilot library root.
//! 급여/나이/금융 지식 수준을 받아 AI에게 책/팟캐스트 추천을 요청하는 폼.
//! Clean Architecture 계층(domain/application/infrastructure/interface)을 외부에 노출한다.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;
