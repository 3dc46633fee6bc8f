// Prompt templates for study material. Placeholders are `<name>`.

pub const ASSESSMENT_PROMPT: &str = r#"You write assessments for an AI engineering course.
Create exactly <count> multiple-choice questions for the "<exam_type>" exam.

Parameters:
- Topic: <topic>
- Difficulty: <difficulty>
<source>
Reply with strict JSON of this shape, without prose or code fences:
{
  "questions": [
    {
      "question": "Question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "answerIndex": 0,
      "explanation": "Why the answer is correct"
    }
  ]
}

Rules:
- Exactly 4 distinct options per question.
- <grounding>
- Use advanced vocabulary only when the difficulty is "professional".
- Keep explanations to one or two sentences.
- Every option must look plausible to someone who has not studied the material."#;

pub const ASSESSMENT_SOURCE: &str = r#"
SOURCE CONTENT (takes priority):
Base every question on the lesson below. Use only concepts, examples and facts it covers.

<content>

---
"#;

pub const GROUNDING_PAGE: &str =
    "Draw questions only from the source content above and reference its concepts or terminology.";
pub const GROUNDING_GENERAL: &str = "Keep the questions appropriate for the course.";

pub const TOPICS_PROMPT: &str = r#"You extract topics from educational content.
List the main topics the following page covers.

Content:
<content>

Reply with strict JSON of this shape, without prose or code fences:
{
  "topics": ["Topic one", "Topic two", "Topic three"]
}

Rules:
- 3 to 8 distinct topics naming the main concepts
- concise names of 3 to 6 words
- concepts rather than section titles
- most prominent first
- no generic entries such as "Introduction" or "Overview""#;

pub const SUMMARY_PROMPT: &str = r#"You are an expert technical summarizer. Summarize the page "<title>" below.

FORMAT
- Markdown only: ## for sections, ### for sub-sections, - for bullets
- **bold** for key terms and `code` for identifiers
- open with a short overview paragraph and close with key takeaways

DEPTH
- <instruction>
- scale the detail with the length of the source
- stay technically accurate

AVOID
- meta commentary such as "This document discusses"
- filler such as "In summary"
- repetition

===== CONTENT =====
<content>

===== OUTPUT (Markdown) ====="#;

pub const SUMMARY_BULLETED: &str = "Write a comprehensive summary with several headed sections made mostly of bullet points. Longer sources deserve more detail.";
pub const SUMMARY_SHORT: &str = "Write a detailed summary with headings, bullet points and structured sections. Aim for 300 to <words> words.";
pub const SUMMARY_LONG: &str = "Write a thorough summary with sections, sub-sections, bullet points and full explanations, proportional to the source. Aim for 600 to <words> words.";

pub const EXPLANATION_PROMPT: &str = r#"You are an expert educator. Explain "<title>" to a student with <ai_level> AI experience and <coding_level> coding experience.

RULES
1. Output only the HTML content, starting directly with a tag such as <h3>.
2. Allowed tags: <h3>, <h4>, <ul>, <li>, <p>, <strong>, <code>, <br>.
3. Open with a short introduction, use 2 to 4 <h3> sections with bullet points, add examples suited to the student's level and end with practical takeaways.
4. Simple language and more examples for beginners; concise and advanced for experts.
5. No code fences, no Markdown, no remarks about the answer itself."#;
