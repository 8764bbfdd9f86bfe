// Profile review prompt. Replace `{profile_json}` before sending.

pub const PROFILE_REVIEW_PROMPT_TEMPLATE: &str = r#"You are a GitHub profile reviewer. Analyze this GitHub profile data and provide a comprehensive review with a rating out of 100.
Focus on these criteria:
1. Activity level (frequency and recency of contributions)
2. Project diversity (variety of repositories)
3. Skill breadth (programming languages and technologies used)
4. Community engagement (followers, stars received)
5. Code quality indicators (from repository descriptions and stats)

Profile data:
{profile_json}

Provide your assessment as a JSON object with these fields:
- overallScore (0-100)
- criteriaScores (object with scores for each of the 5 criteria above)
- strengths (array of strings highlighting strong points)
- areasForImprovement (array of strings with suggestions)
- summary (brief text summary of overall profile)"#;
