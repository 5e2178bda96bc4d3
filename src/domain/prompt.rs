//! 추천 요청 프롬프트 구성.

use super::advice::FormInputs;

/// 입력값을 그대로(escape 없이) 끼워 넣은 추천 요청 프롬프트를 생성한다.
pub fn build_prompt(inputs: &FormInputs) -> String {
    format!(
        "Provide personalized recommendations for books and podcasts based on the following criteria:

Salary Range: {salary}
Age: {age}
Level of Financial Knowledge: {knowledge}
Output the suggestions in the following format:

Title: [Name of the book or podcast]
Type: [Book/Podcast]
Why It’s Recommended: [Brief explanation of how this aligns with the input criteria]
Key Takeaways: [What the user will learn or benefit from engaging with this resource]
Ensure each recommendation is listed on a new line and presented in a clear, visually appealing structure.",
        salary = inputs.salary(),
        age = inputs.age(),
        knowledge = inputs.knowledge(),
    )
}
