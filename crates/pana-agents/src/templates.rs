// Prompt templates. Placeholders are `<name>` and are filled with `str::replace`.

pub const PROJECT_DOMAIN: &str = "AI Native Software Development";

pub const DEFAULT_PROJECT_DESCRIPTION: &str = "AI Native Software Development - a book about AI-driven development, Python, TypeScript and agentic AI systems";

pub const TONE_PROMPT: &str = r#"You decide whether a reader's question belongs to the subject of a technical book.

BOOK DOMAIN: AI Native Software Development
- AI-driven development with Python and TypeScript, agentic AI systems
- Spec-driven development, OpenAI Agents SDK, Google Gemini, MCP, realtime and voice agents, containerization, event-driven architecture

PROJECT MATERIAL:
<context>

QUESTION: "<query>"

A question is in tone when it concerns the book, its code, its documentation or the domain topics above.
It is out of tone when it is unrelated or only loosely related.

Reply with a JSON object of exactly this shape:
{
  "isInTone": boolean,
  "confidence": number between 0.0 and 1.0,
  "reasoning": "one short sentence"
}

Reply with the JSON only."#;

pub const STRUCTURING_PROMPT: &str = r#"Turn the reader's message into a structured JSON description.

Signals:
- In tone: <is_in_tone>
- Confidence: <confidence>
- Summary request: <is_summary>
- Project material: <context>

Message: "<query>"

Schema:
{
  "intent": "question | command | clarification | general",
  "topics": ["relevant topics"],
  "keywords": ["important keywords"],
  "requiresContext": boolean,
  "complexity": "simple | medium | complex",
  "expectedResponseType": "explanation | code | example | reference | search"
}

Reply with the JSON only."#;

pub const BROWSER_SEARCH_PROMPT: &str = r#"You synthesize web knowledge for a reader of a book on <domain>.
The reader asked: "<query>"

The question sits outside the book's immediate material. Using what you know, write two or three short paragraphs that:
1. cover the relevant facts about the topic
2. relate it back to <domain> where that makes sense
3. end with the key takeaways"#;

pub const BROWSER_SEARCH_FALLBACK: &str = r#"I found some information about "<query>". It lies outside the immediate scope of the book, but it is an interesting topic, and similar ideas often apply when building intelligent systems with AI Native Software Development."#;

pub const ANSWER_PROMPT: &str = r#"You are the study assistant of the book "AI Native Software Development".

<mode>

Project material:
<context>
<external>
Recent conversation:
<history>

Query analysis: intent=<intent>, complexity=<complexity>, expected response=<response_type>, keywords=<keywords>

Reader: <query>

Answer in Markdown. Ground the answer in the project material when it is relevant and say so when it is not."#;

pub const ANSWER_MODE_CHAT: &str =
    "Answer the reader's question clearly, with code when it helps.";

pub const ANSWER_MODE_SUMMARY: &str =
    "The reader asked for a summary of a passage. Follow their length and format instructions exactly and stay faithful to the passage.";

pub const ANSWER_MODE_OUT_OF_TONE: &str = "The question is outside the book's core subject. Answer helpfully using the external notes and point out connections to the book where they exist.";
