//! Prompt builders. Output contracts here must stay in sync with what the
//! extractor accepts: JSON-object prompts parse via the brace-span path,
//! exam prompts via the bracketed grammar.

use crate::catalog::Topic;
use crate::models::{Difficulty, QuestionEntry};

pub fn explanation(topic: &Topic) -> String {
    format!(
        "Write a thorough explanation of \"{title}\" for a first-year calculus student.\n\
         Topic scope: {description}\n\
         Use short paragraphs with <h3> subheadings, define every new term when it first \
         appears, and include at least two fully worked mini-examples. Return only the HTML \
         body with LaTeX math, no surrounding commentary.",
        title = topic.title,
        description = topic.description,
    )
}

pub fn summary(topic: &Topic) -> String {
    format!(
        "Summarise the essentials of \"{title}\" ({description}) for revision in at most five \
         sentences of plain prose. No lists, no headings.",
        title = topic.title,
        description = topic.description,
    )
}

pub fn worked_example(topic: &Topic) -> String {
    format!(
        "Create one exam-style worked example for \"{title}\" ({description}).\n\
         Return a single JSON object and nothing else:\n\
         {{\n\
           \"problem\": \"the problem statement\",\n\
           \"solution\": \"the full solution narrative\",\n\
           \"steps\": [\"step 1\", \"step 2\", \"step 3\"],\n\
           \"marks\": 5\n\
         }}\n\
         Break the solution into three to six short steps.",
        title = topic.title,
        description = topic.description,
    )
}

pub fn practice_set(topic: &Topic, count: usize) -> String {
    format!(
        "Create {count} practice questions for \"{title}\" ({description}).\n\
         Spread the difficulties across easy, medium and hard.\n\
         Return a single JSON object and nothing else:\n\
         {{\n\
           \"questions\": [\n\
             {{\n\
               \"problem\": \"the question text\",\n\
               \"answer\": \"the concise final answer\",\n\
               \"hint\": \"a one-line hint\",\n\
               \"solution\": \"the full step-by-step solution\",\n\
               \"difficulty\": \"easy\"\n\
             }}\n\
           ]\n\
         }}",
        count = count,
        title = topic.title,
        description = topic.description,
    )
}

pub fn graded_question(topic: &Topic, difficulty: Difficulty) -> String {
    format!(
        "Create one {difficulty} practice question for \"{title}\" ({description}).\n\
         Return a single JSON object and nothing else:\n\
         {{\n\
           \"problem\": \"the question text\",\n\
           \"answer\": \"the concise final answer\",\n\
           \"hint\": \"a one-line hint\",\n\
           \"solution\": \"the full step-by-step solution\",\n\
           \"difficulty\": \"{difficulty}\"\n\
         }}",
        difficulty = difficulty.as_str(),
        title = topic.title,
        description = topic.description,
    )
}

pub fn challenge_question(topic: &Topic) -> String {
    format!(
        "Write one challenging exam question on \"{title}\" ({description}).\n\
         Respond in exactly this format, one field per line:\n\
         [Topic: {title}]\n\
         [Question Type: Multiple Choice or Full Solution]\n\
         [Question: the question text]\n\
         [Mark: N marks]\n\
         [Answer: the concise final answer]\n\
         [Hint: a one-line hint]\n\
         [If MCQ: Options (a) first option (b) second option (c) third option (d) fourth \
         option (Correct: letter)]\n\
         Include the If MCQ line only when the type is Multiple Choice.",
        title = topic.title,
        description = topic.description,
    )
}

pub fn improve_question(topic_title: &str, entry: &QuestionEntry) -> String {
    format!(
        "This practice question on \"{topic_title}\" was flagged as low quality. Rewrite it.\n\
         Current problem: {problem}\n\
         Current answer: {answer}\n\
         Current hint: {hint}\n\
         Current solution: {solution}\n\
         Keep the same concept and the same difficulty ({difficulty}). Improve the wording, \
         give a genuinely useful hint, and write a complete step-by-step solution.\n\
         Return a single JSON object and nothing else:\n\
         {{\n\
           \"problem\": \"...\",\n\
           \"answer\": \"...\",\n\
           \"hint\": \"...\",\n\
           \"solution\": \"...\",\n\
           \"difficulty\": \"{difficulty}\",\n\
           \"qualityScore\": 0.9\n\
         }}\n\
         qualityScore is your honest 0 to 1 rating of the rewritten question.",
        topic_title = topic_title,
        problem = entry.problem,
        answer = entry.answer,
        hint = entry.hint.as_deref().unwrap_or("(none)"),
        solution = entry.solution,
        difficulty = entry.difficulty.as_str(),
    )
}
