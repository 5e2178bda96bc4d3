//! 조언 폼 HTML 렌더링.

use crate::domain::advice::{FormField, ViewState};

pub const SUBMIT_LABEL: &str = "Give Advice";
pub const RESULT_HEADING: &str = "Given Advice";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;background:#f9fafb;margin:0;padding:48px 16px}\
main{max-width:28rem;margin:0 auto}\
h2{text-align:center;font-size:1.875rem;font-weight:800;color:#111827}\
label{display:block;font-size:.875rem;font-weight:500;color:#374151;margin-top:1rem}\
input{display:block;width:100%;box-sizing:border-box;margin-top:.25rem;padding:.5rem;border:1px solid #d1d5db;border-radius:.375rem}\
button{width:100%;margin-top:1.5rem;padding:.5rem 1rem;border:0;border-radius:.375rem;color:#fff;background:#4f46e5;font-weight:500}\
button:disabled{opacity:.5}\
.spinner{display:inline-block;width:1.25rem;height:1.25rem;border:2px solid #fff;border-top-color:transparent;border-radius:50%;animation:spin 1s linear infinite}\
@keyframes spin{to{transform:rotate(360deg)}}\
.error{margin-top:1rem;color:#dc2626;font-size:.875rem}\
.result{margin-top:1.5rem}\
.result p{margin-top:.5rem;padding:1rem;background:#fff;border-radius:.375rem;color:#374151;white-space:pre-wrap}";

/// 현재 화면 상태를 전체 HTML 페이지로 렌더링한다.
/// - 오류 블록과 결과 블록 중 하나만 표시한다(오류 우선).
/// - Loading 중에는 제출 버튼을 비활성화하고 라벨 대신 진행 표시를 보여준다.
pub fn render_page(state: &ViewState) -> String {
    let outcome = state.outcome();
    let loading = outcome.is_loading();

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if loading {
        // 제출 직후 받은 Loading 화면이 완료 시점까지 스스로 새로고침된다.
        html.push_str("<meta http-equiv=\"refresh\" content=\"2\">\n");
    }
    html.push_str("<title>AI Financial Advisor</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n<main>\n"));
    html.push_str("<h2>AI FINANCIAL ADVISOR</h2>\n");

    html.push_str("<form method=\"post\" action=\"/\">\n");
    for field in FormField::ALL {
        let name = field.name();
        html.push_str(&format!(
            "<div>\n<label for=\"{name}\">{label}</label>\n\
             <input type=\"text\" name=\"{name}\" id=\"{name}\" required value=\"{value}\">\n</div>\n",
            label = field.label(),
            value = escape_html(state.inputs().get(field)),
        ));
    }
    if loading {
        html.push_str(
            "<button type=\"submit\" disabled aria-busy=\"true\">\
             <span class=\"spinner\" role=\"status\" aria-label=\"Loading\"></span></button>\n",
        );
    } else {
        html.push_str(&format!("<button type=\"submit\">{SUBMIT_LABEL}</button>\n"));
    }
    html.push_str("</form>\n");

    if let Some(error) = outcome.error() {
        html.push_str(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            escape_html(error)
        ));
    } else if let Some(text) = outcome.result() {
        html.push_str(&format!(
            "<div class=\"result\">\n<h3>{RESULT_HEADING}</h3>\n<p>{}</p>\n</div>\n",
            escape_html(text)
        ));
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// HTML 텍스트/속성 값으로 안전하게 넣을 수 있도록 특수문자를 치환한다.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
