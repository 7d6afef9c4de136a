//! Prompt templates for the answering pipeline

use super::entities::Prompt;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for core-question extraction
    pub fn core_question_system() -> &'static str {
        r#"Extract the core question, removing all background information.

Examples:
Input: A Japanese musician who joined a famous Japanese band at age 26. The band's name contains a well-known Japanese city. Who is the musician?
Output: Who is the musician

Input: What title was this Peking Opera performer awarded by the Ministry of Culture between 2015-2020?
Output: What title was awarded"#
    }

    /// Prompt asking for the interrogative core of `text`
    pub fn core_question(text: &str) -> Prompt {
        Prompt::with_system(Self::core_question_system(), text)
    }

    /// System prompt for search keyword extraction
    pub fn keywords_system() -> &'static str {
        r#"Extract search keywords from the text, preserving complete semantics.

**Extraction Rules:**
1. Extract core entities: names, places, organizations, proper nouns
2. Extract key numbers: ages, years, time periods
3. Extract important features: professions, awards, works, location characteristics
4. Keep important qualifiers: famous, first, etc.
5. Separate each keyword with space, extract 5-10 keywords
6. Output directly, no explanations

**Example 1:**
Input: A Japanese musician who joined a famous Japanese band at age 26. The band's name contains a well-known Japanese city
Output: Japanese musician 26 years old famous band city name

**Example 2:**
Input: He is both a singer and actor who studied medicine early on. He debuted in the 1980s and won multiple Gold Record Awards
Output: singer actor medicine 1980s Gold Record Award

**Example 3:**
Input: What title was this Peking Opera performer awarded by the Ministry of Culture between 2015-2020
Output: Peking Opera performer 2015-2020 Ministry of Culture title

**Example 4:**
Input: This city is in a landlocked Chinese province, ancestral home of a Chinese leader, dates back to Yuan Dynasty
Output: landlocked province city leader ancestral home Yuan Dynasty"#
    }

    /// Prompt asking for 5-10 search keywords from `text`
    pub fn keywords(text: &str) -> Prompt {
        Prompt::with_system(Self::keywords_system(), text)
    }

    /// System prompt for sub-query decomposition
    pub fn sub_queries_system() -> &'static str {
        r#"# Role
Search Query Architect for Complex Riddles.

# Task
Break down the complex nested question into **3-5 independent, factual search queries**.
You MUST separate the constraints based on the **Subject/Entity** they describe.

# Critical Rules
1. **Remove Interrogatives**: Delete "What is", "Who is", "Name of the..." etc. Convert them into declarative phrases.
2. **De-nest Clauses**: If a sentence says "A university that is X, Y, and Z", create a query specifically for "University X Y Z".
3. **Keep Original Language**: If the input is English, output English queries. Specific terms like "Land-grant", "Academy Award", "Fortune 500" work best in English.
4. **No Summarization**: Do not shorten "second half of the 1800s" to "1800s". Keep the specific detail.

# Decomposition Strategy (Example)
Input: "What is the band that released an album in 1990, after playing at a university where a Nobel winner graduated?"
*Analysis*:
- Entity 1: Band (Action: Album 1990)
- Entity 2: University (Constraint: Nobel winner graduated)
*Output*:
- band released album 1990
- university Nobel prize winner graduated
- band played concert at university with Nobel alumni

# Your Turn

# Output format
Output only the queries separated by commas.
"#
    }

    /// Prompt asking for 3-5 comma-separated sub-queries of `text`
    pub fn sub_queries(text: &str) -> Prompt {
        Prompt::with_system(Self::sub_queries_system(), text)
    }

    /// System prompt for the final answer, with the extracted context embedded
    pub fn answer_system(context: &str) -> String {
        format!(
            r#"Answer the question in the most concise way.

Context:
{}

Rules:
1. Output only the answer (name/place/number/time)
2. Maximum 10 words
3. No explanations

Examples:
Question: Who is the musician
Answer: Ringo Sheena

Question: What title was awarded
Answer: Outstanding Young Talent"#,
            context
        )
    }

    /// Prompt for the final answer
    pub fn answer(context: &str, core_question: &str) -> Prompt {
        Prompt::with_system(Self::answer_system(context), core_question)
    }

    /// Simplified retry prompt used after the quality gate rejects an answer
    pub fn answer_retry(context: &str, core_question: &str) -> Prompt {
        Prompt::user(format!(
            "{}\n\nQuestion: {}\nAnswer:",
            context, core_question
        ))
    }
}
