//! 설정 파일 탐색/병합 결과를 확인하는 유스케이스.

use anyhow::Result;

use crate::application::ports::ConfigRepository;

/// 현재 적용 중인 설정을 사람이 읽기 쉬운 JSON으로 반환한다.
/// 비밀값은 출력하지 않고 인증 정보의 출처만 보여준다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl InspectConfigUseCase<'_> {
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}
