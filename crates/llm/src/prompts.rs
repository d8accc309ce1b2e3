//! Fixed instructions sent with journal entries

/// Entry summary, told back to the writer
pub const SUMMARY_INSTRUCTION: &str = "Summarize the following journal entry. Write the summary as if you're telling the person what they did or felt that day. Start by saying 'On this day'.";

/// Plain title request
pub const TITLE_INSTRUCTION: &str = "Create a title for the following content:";

/// Title generator persona for the journaling app
pub const TITLE_GENERATOR_INSTRUCTION: &str = "You are acting as a title generator for a journaling app. Every message sent to you will be a journal entry and you will respond with a short title that fits the entry. Do not put the title in quotes or respond with anything else but the complete title.";

/// Prefix for the self-hosted model, which gets a single prompt and no system message
pub const RECORD_SUMMARY_PREFIX: &str = "With less than 100 words, please summarize this journal entry as if it will go in a record (write it in a serious way but with conversational words, do not say \"Here's a summary...\", write it in second-person, and don't say today, instead say on this day): ";

/// Follow-up question contract: role plus strict output format
pub const QUESTION_SYSTEM_INSTRUCTION: &str = "You are a thoughtful journaling companion. You will receive a numbered list of the user's previous journal entries. Write exactly 3 open-ended questions that invite the user to reflect further on what they wrote. Respond with only a JSON array of 3 strings, for example [\"...\", \"...\", \"...\"]. Do not add numbering, keys, markdown, or any other text.";

/// Single prompt for the record-style summary
pub fn record_summary_prompt(entry: &str) -> String {
    format!("{}{}", RECORD_SUMMARY_PREFIX, entry)
}

/// Numbered entry list, one `"{index}: {entry}"` line each, 1-based
pub fn numbered_entries<S: AsRef<str>>(entries: &[S]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}: {}\n", i + 1, entry.as_ref()))
        .collect()
}
