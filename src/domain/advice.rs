//! 조언 요청 화면의 도메인 상태(입력값/요청 결과) 모델.
//!
//! 모든 상태 변경은 `ViewState::apply`를 통해 새 스냅샷으로만 이뤄진다.

/// 생성 실패 시 사용자에게 보여주는 고정 문구.
pub const FAILURE_MESSAGE: &str = "Failed to generate text. Please try again.";

/// 폼 입력 필드 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Salary,
    Age,
    Knowledge,
}

impl FormField {
    /// 화면 표시 순서.
    pub const ALL: [FormField; 3] = [Self::Salary, Self::Age, Self::Knowledge];

    /// 폼 입력 이름(`input1`/`input2`/`input3`)을 필드로 변환한다.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "input1" => Some(Self::Salary),
            "input2" => Some(Self::Age),
            "input3" => Some(Self::Knowledge),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Salary => "input1",
            Self::Age => "input2",
            Self::Knowledge => "input3",
        }
    }

    /// 입력 라벨 문구.
    pub fn label(self) -> &'static str {
        match self {
            Self::Salary => "Enter Your Salary",
            Self::Age => "Enter your age",
            Self::Knowledge => "Enter your level of financial knowledge",
        }
    }
}

/// 세 입력 필드의 현재 값. 모든 필드는 항상 존재한다(기본 빈 문자열).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    salary: String,
    age: String,
    knowledge: String,
}

impl FormInputs {
    pub fn new(
        salary: impl Into<String>,
        age: impl Into<String>,
        knowledge: impl Into<String>,
    ) -> Self {
        Self {
            salary: salary.into(),
            age: age.into(),
            knowledge: knowledge.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Salary => &self.salary,
            FormField::Age => &self.age,
            FormField::Knowledge => &self.knowledge,
        }
    }

    pub fn salary(&self) -> &str {
        &self.salary
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn knowledge(&self) -> &str {
        &self.knowledge
    }

    /// 지정한 필드 하나만 교체한 새 스냅샷을 반환한다.
    #[must_use]
    pub fn update(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FormField::Salary => next.salary = value,
            FormField::Age => next.age = value,
            FormField::Knowledge => next.knowledge = value,
        }
        next
    }
}

/// 조언 요청의 현재 결과 상태. 항상 정확히 하나만 성립한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestOutcome {
    #[default]
    Idle,
    Loading,
    Success(String),
    Failure(String),
}

impl RequestOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// 표시할 오류 문구(있을 때만).
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// 표시할 결과 텍스트. 오류가 있으면 항상 `None`이다.
    pub fn result(&self) -> Option<&str> {
        match self {
            Self::Success(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

/// 화면 상태를 바꾸는 이벤트.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    FieldChanged { field: FormField, value: String },
    SubmitStarted,
    Succeeded(String),
    Failed,
}

/// 입력값 + 요청 결과로 구성된 불변 화면 스냅샷.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    inputs: FormInputs,
    outcome: RequestOutcome,
}

impl ViewState {
    pub fn inputs(&self) -> &FormInputs {
        &self.inputs
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    /// 이벤트를 적용한 다음 스냅샷을 계산한다(단일 갱신 진입점).
    /// - 완료 이벤트는 Loading 상태에서만 반영되고 그 외에는 무시된다.
    #[must_use]
    pub fn apply(&self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::FieldChanged { field, value } => Self {
                inputs: self.inputs.update(field, value),
                outcome: self.outcome.clone(),
            },
            ViewEvent::SubmitStarted => Self {
                inputs: self.inputs.clone(),
                outcome: RequestOutcome::Loading,
            },
            ViewEvent::Succeeded(text) if self.outcome.is_loading() => Self {
                inputs: self.inputs.clone(),
                outcome: RequestOutcome::Success(text),
            },
            ViewEvent::Failed if self.outcome.is_loading() => Self {
                inputs: self.inputs.clone(),
                outcome: RequestOutcome::Failure(FAILURE_MESSAGE.to_string()),
            },
            ViewEvent::Succeeded(_) | ViewEvent::Failed => self.clone(),
        }
    }
}
